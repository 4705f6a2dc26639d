//! I/O abstraction (spec §4.2): a capability the stepper is polymorphic
//! over, with a real stdin/stdout backend and a scripted in-memory backend
//! for testing. Modeled the way the teacher keeps `Storage` as a trait with
//! one production implementation (`src/memory.rs`) — here a second, fake
//! implementation exists purely for tests.

use crate::errors::RuntimeError;
use std::io::{self, Read, Write};

/// A single-character-at-a-time input/output capability.
pub trait IoCapability {
    /// Reads and returns one character.
    ///
    /// # Errors
    /// Returns [`RuntimeError::InputExhausted`] if no input remains.
    fn read_char(&mut self) -> Result<char, RuntimeError>;

    /// Reads a line of input and parses it as a signed integer.
    ///
    /// # Errors
    /// Returns [`RuntimeError::InputExhausted`] if no input remains, or
    /// [`RuntimeError::MalformedNumber`] if the line isn't a valid integer.
    fn read_num(&mut self) -> Result<crate::Int, RuntimeError> {
        let mut line = String::new();
        loop {
            let c = self.read_char()?;
            if c == '\n' {
                break;
            }
            line.push(c);
        }
        line.trim()
            .parse()
            .map_err(|_| RuntimeError::MalformedNumber)
    }

    /// Writes raw bytes. Infallible in the real backend.
    ///
    /// Byte-oriented rather than `&str`: `OutputChar` writes a single raw
    /// byte (spec §8 property 5 demands the interpreter and the compiled
    /// `_output_char` thunk produce byte-identical output), and UTF-8
    /// encoding a lone byte >= 0x80 as `char` would silently turn it into
    /// two bytes.
    fn write_bytes(&mut self, bytes: &[u8]);
}

/// The real backend: reads from stdin one byte at a time, writes straight
/// to stdout.
#[derive(Default)]
pub struct RealIo {
    stdin: io::Stdin,
}

impl RealIo {
    pub fn new() -> RealIo {
        RealIo { stdin: io::stdin() }
    }
}

impl IoCapability for RealIo {
    fn read_char(&mut self) -> Result<char, RuntimeError> {
        let mut byte = [0u8; 1];
        match self.stdin.read(&mut byte) {
            Ok(0) => Err(RuntimeError::InputExhausted),
            Ok(_) => Ok(byte[0] as char),
            Err(_) => Err(RuntimeError::InputExhausted),
        }
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        let _ = io::stdout().write_all(bytes);
    }
}

/// The scripted, in-memory backend used by tests and the differential
/// harness. Input is consumed from a fixed string; output accumulates in a
/// buffer that [`ScriptedIo::output`] hands back as raw bytes.
#[derive(Default)]
pub struct ScriptedIo {
    input: std::vec::IntoIter<char>,
    output: Vec<u8>,
}

impl ScriptedIo {
    pub fn new(input: &str) -> ScriptedIo {
        ScriptedIo {
            input: input.chars().collect::<Vec<_>>().into_iter(),
            output: Vec::new(),
        }
    }

    /// Consumes the capability and returns everything written to it.
    pub fn output(self) -> Vec<u8> {
        self.output
    }
}

impl IoCapability for ScriptedIo {
    fn read_char(&mut self) -> Result<char, RuntimeError> {
        self.input.next().ok_or(RuntimeError::InputExhausted)
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        self.output.extend_from_slice(bytes);
    }
}
