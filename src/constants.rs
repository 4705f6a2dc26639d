//! Shared sizing constants for the B byte-tape and the ARM64 runtime memory
//! layout that mirrors it (see `wvm_codegen`'s prologue/epilogue emitter).

/// Size in bytes of the B tape, and of the `array` region the ARM64 backend
/// reserves for it (shared with the W heap's byte-cell encoding).
pub const TAPE_SIZE: usize = 30_000;

/// Size in bytes of the `buf` scratch region the ARM64 I/O thunks use.
pub const IO_BUF_SIZE: usize = 20;

/// Size in bytes of the dedicated call-stack region the W backend's
/// `Call`/`Return` lowering uses, kept disjoint from the operand stack on
/// `SP` (spec §3, §9). 1000 return addresses at 8 bytes each.
pub const CALL_STACK_SIZE: usize = 8_000;
