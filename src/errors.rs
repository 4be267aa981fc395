// Create the Error, ErrorKind, ResultExt, and Result types
// Result is a typedef of std `Result` with the error type our own `Error`
// Defines the From conversions that let ? work for our `Error`.
use error_chain::*;

error_chain! {
    errors {
        InvalidDimensions(width: usize, height: usize) {
            description("invalid maze dimensions")
            display("Maze dimensions must be odd and at least 3, got {}x{}", width, height)
        }
        MalformedGrid(reason: String) {
            description("malformed grid rows")
            display("Malformed grid: {}", reason)
        }
    }
}
