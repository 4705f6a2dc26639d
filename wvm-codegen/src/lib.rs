//! ARM64 lowering for the W and B languages (spec §4.4–§4.6): the
//! instruction model, the W and B compilers, and the assembly printer.
//!
//! [`wvm`] supplies the validated source (`Program`, `BInstr`); this crate
//! never performs the interpreter's runtime checks — a malformed program
//! (one that wouldn't pass `Program::new`) produces undefined machine code
//! by design, since the differential harness only ever compiles programs
//! the interpreter already accepted.

extern crate num_traits;
extern crate wvm;

pub mod arm64;
mod compile_b;
mod compile_w;
pub mod errors;
pub mod printer;
mod runtime;

pub use arm64::Arm64Instr;
pub use compile_b::compile_b;
pub use compile_w::compile_w;
pub use errors::CompileError;
pub use printer::print_program;

#[cfg(test)]
mod test;
