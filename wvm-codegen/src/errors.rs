//! Compile-time errors (spec §7, universe 3): the emitter's only failure
//! mode, since its input is already a validated `Program`.

use std::error::Error;
use std::fmt;
use wvm::LabelId;

/// The emitter's only failure mode (spec §7, universe 3): a `Call`/`Jump`/
/// `Branch` target no `Label` instruction defines. In practice unreachable
/// — `compile_w`'s input is always a `Program`, and `Program::new` already
/// refuses to construct one with an unresolved label — but `compile_w`
/// checks again rather than assume its caller upheld that invariant,
/// mirroring why `RuntimeError::NoSuchLabel` stays a distinct variant even
/// though `Program::lookup` is its only source.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum CompileError {
    UnresolvedLabel(LabelId),
    /// A `Push` immediate doesn't fit in a 64-bit two's-complement register
    /// (spec §9's documented arbitrary-precision-vs-64-bit envelope). The
    /// interpreter keeps running such a program at full precision; the
    /// compiled path can't represent the value at all, so this is a hard
    /// compile-time refusal rather than a silent truncation.
    ValueOutOfRange,
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CompileError::UnresolvedLabel(l) => write!(f, "no Label instruction defines label {}", l),
            CompileError::ValueOutOfRange => write!(f, "Push immediate does not fit in a 64-bit register"),
        }
    }
}

impl Error for CompileError {}
