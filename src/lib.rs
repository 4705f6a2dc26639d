//! Virtual machine, instruction model and reference interpreter for the
//! W stack/heap language and its B byte-tape sibling.
//!
//! This crate is the leaf of the workspace: [`wvm_codegen`](../wvm_codegen/index.html)
//! lowers the instruction model defined here to ARM64, and
//! [`wvm_harness`](../wvm_harness/index.html) drives both against each other.

extern crate num_bigint;
extern crate num_integer;
extern crate num_traits;

pub mod constants;
pub mod errors;
pub mod instr;
pub mod interp;
pub mod io;
pub mod program;

/// The arbitrary-precision signed integer type used for every value on the
/// operand stack and every heap cell.
pub type Int = num_bigint::BigInt;

/// Identifies a `Label` instruction and every `Call`/`Jump`/`Branch` that
/// targets it. Chosen as an integer rather than a source-text name because
/// W source parsing is outside this crate's scope — whatever produces a
/// [`WInstr`](instr::WInstr) stream, human parser or property-test
/// generator, mints these ids directly.
pub type LabelId = u32;

pub use errors::{LoadError, RuntimeError};
pub use instr::{ArithOp, BInstr, BranchCond, WInstr};
pub use interp::{exec, Step, VmState};
pub use io::{IoCapability, RealIo, ScriptedIo};
pub use program::Program;

#[cfg(test)]
mod test;
