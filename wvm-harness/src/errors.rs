//! Harness-local error type: everything that can go wrong driving the
//! external assembler/linker script, as opposed to the three error
//! universes `wvm`/`wvm-codegen` define for the language itself.

use std::error::Error;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum HarnessError {
    /// Writing `prog.s`, spawning `script.sh`, or reading `out.txt` failed.
    Io(io::Error),
}

impl fmt::Display for HarnessError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HarnessError::Io(e) => write!(f, "differential oracle I/O failure: {}", e),
        }
    }
}

impl Error for HarnessError {}

impl From<io::Error> for HarnessError {
    fn from(e: io::Error) -> HarnessError {
        HarnessError::Io(e)
    }
}
