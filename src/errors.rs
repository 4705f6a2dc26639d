//! Error universes for the W toolchain: load-time, runtime, and (over in
//! `wvm_codegen`) compile-time. Each is a plain enum implementing
//! `Display`/`Error` by hand rather than reaching for a derive-macro error
//! crate.

use crate::LabelId;
use std::error::Error;
use std::fmt;

/// Fails construction of a [`Program`](crate::program::Program). The
/// compiler and interpreter both refuse to proceed past this point.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum LoadError {
    /// Two `Label` instructions in the source define the same id.
    DuplicateLabel(LabelId),
    /// A `Call`, `Jump` or `Branch` targets an id no `Label` defines.
    NoSuchLabel(LabelId),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoadError::DuplicateLabel(l) => write!(f, "label {} is defined more than once", l),
            LoadError::NoSuchLabel(l) => write!(f, "no Label instruction defines label {}", l),
        }
    }
}

impl Error for LoadError {}

/// A failure encountered while stepping the VM. The stepper returns the
/// first one it hits and does not attempt to recover.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum RuntimeError {
    /// Popped the operand stack while it was empty.
    ValStackEmpty,
    /// `Return` executed with an empty call stack.
    CallStackEmpty,
    /// A `Call`/`Jump`/`Branch` target disappeared — unreachable once the
    /// program has passed [`Program::new`](crate::program::Program::new),
    /// kept as a distinct variant because `lookup` is itself a public,
    /// independently callable operation.
    NoSuchLabel(LabelId),
    /// The program counter ran off the end of the instruction array without
    /// hitting `End`.
    OutOfBounds,
    /// `Arith(Div)` or `Arith(Mod)` with a zero divisor.
    DivByZero,
    /// `readChar` was called with no input remaining.
    InputExhausted,
    /// `InputNum` read a line that does not parse as a signed integer.
    MalformedNumber,
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RuntimeError::ValStackEmpty => write!(f, "operand stack underflow"),
            RuntimeError::CallStackEmpty => write!(f, "call stack underflow on Return"),
            RuntimeError::NoSuchLabel(l) => write!(f, "no such label: {}", l),
            RuntimeError::OutOfBounds => write!(f, "program counter ran past the end of the program"),
            RuntimeError::DivByZero => write!(f, "division by zero"),
            RuntimeError::InputExhausted => write!(f, "no input remaining"),
            RuntimeError::MalformedNumber => write!(f, "input was not a valid signed integer"),
        }
    }
}

impl Error for RuntimeError {}

impl From<LoadError> for RuntimeError {
    fn from(err: LoadError) -> RuntimeError {
        match err {
            LoadError::DuplicateLabel(l) | LoadError::NoSuchLabel(l) => RuntimeError::NoSuchLabel(l),
        }
    }
}
