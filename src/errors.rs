// Create the Error, ErrorKind, ResultExt, and Result types.
// Other modules `use crate::errors::*;` to get access to everything `error_chain!` creates.
use error_chain::*;

error_chain! {

    errors {
        InvalidSize(size: usize) {
            description("invalid maze size")
            display("Invalid maze size {}: the size must be an odd number", size)
        }
    }
}
