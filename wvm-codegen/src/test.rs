//! Codegen test tree (spec §8): structural checks on the lowered
//! instruction sequences and the printed assembly. Byte-for-byte codegen
//! fidelity (invariant 5, the differential oracle) lives in `wvm-harness`,
//! which actually assembles and runs the output; this crate only checks
//! that lowering and printing behave the way §4.4–§4.6 specify.


use crate::{compile_w, print_program};
use wvm::{ArithOp, Int, Program, WInstr};

fn push(n: i64) -> WInstr {
    WInstr::Push(Int::from(n))
}

fn program(instrs: Vec<WInstr>) -> Program {
    Program::new(instrs).expect("test program should be well-formed")
}

#[test]
fn header_directives_appear_in_required_order() {
    let p = program(vec![WInstr::End]);
    let lowered = compile_w(&p).unwrap();
    let lines: Vec<String> = lowered.iter().map(crate::printer::print_instr).collect();

    let directive_order = [
        ".data",
        ".balign 4",
        "buf: .skip 20",
        ".balign 4",
        "array: .skip 30000",
        ".text",
        ".global _start",
        ".balign 16",
    ];
    let positions: Vec<usize> = directive_order
        .iter()
        .map(|want| lines.iter().position(|l| l == want).expect("missing required directive"))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn required_global_labels_are_present() {
    let p = program(vec![push(1), WInstr::OutputNum, WInstr::End]);
    let lowered = compile_w(&p).unwrap();
    let labels: Vec<&str> = lowered
        .iter()
        .filter_map(|i| match i {
            crate::arm64::Arm64Instr::LabelDef(l) => Some(l.as_str()),
            _ => None,
        })
        .collect();

    for required in ["_start", "_output_char", "_input_char"] {
        assert!(labels.contains(&required), "missing label {}", required);
    }
}

#[test]
fn printer_totality_over_a_full_compiled_program() {
    let p = program(vec![push(65), WInstr::OutputChar, WInstr::End]);
    let lowered = compile_w(&p).unwrap();
    let text = print_program(&lowered);
    for line in text.lines() {
        assert!(!line.trim().is_empty());
    }
    assert_eq!(text.lines().count(), lowered.len());
}

#[test]
fn push_out_of_range_is_a_compile_error() {
    let huge = Int::from(1u64) << 100;
    let p = program(vec![WInstr::Push(huge), WInstr::End]);
    let result = compile_w(&p);
    assert_eq!(result.err(), Some(crate::errors::CompileError::ValueOutOfRange));
}

#[test]
fn output_num_lowers_to_a_call_into_the_shared_thunk() {
    let p = program(vec![push(3), push(4), WInstr::Arith(ArithOp::Add), WInstr::OutputNum, WInstr::End]);
    let lowered = compile_w(&p).unwrap();
    let calls_output_num = lowered.iter().any(|i| {
        matches!(i, crate::arm64::Arm64Instr::Bl { label } if label == "_output_num")
    });
    assert!(calls_output_num);
}

#[test]
fn call_sites_get_distinct_return_labels() {
    let p = program(vec![
        WInstr::Call(1),
        WInstr::Call(1),
        WInstr::End,
        WInstr::Label(1),
        WInstr::Return,
    ]);
    let lowered = compile_w(&p).unwrap();
    let ret_labels: Vec<&str> = lowered
        .iter()
        .filter_map(|i| match i {
            crate::arm64::Arm64Instr::LabelDef(l) if l.starts_with("w_ret_") => Some(l.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(ret_labels.len(), 2);
    assert_ne!(ret_labels[0], ret_labels[1]);
}
