use super::*;
use crate::instr::{ArithOp, BranchCond, WInstr};
use crate::io::ScriptedIo;
use crate::Int;

/// Builds a [`Program`] from a `Vec<WInstr>`, panicking (test-only) if it
/// fails validation — mirrors the teacher's `test_program` helper in
/// `src/lib.rs`, which likewise assumes well-formed fixtures.
fn program(instrs: Vec<WInstr>) -> Program {
    Program::new(instrs).expect("test program should be well-formed")
}

fn run(instrs: Vec<WInstr>) -> (Result<(), RuntimeError>, String) {
    run_with_input(instrs, "")
}

fn run_with_input(instrs: Vec<WInstr>, input: &str) -> (Result<(), RuntimeError>, String) {
    let prog = program(instrs);
    let mut io = ScriptedIo::new(input);
    let result = exec(&prog, &mut io);
    (result, String::from_utf8_lossy(&io.output()).into_owned())
}

fn push(n: i64) -> WInstr {
    WInstr::Push(Int::from(n))
}

mod scenarios;
mod errors;
