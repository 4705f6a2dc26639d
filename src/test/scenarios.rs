//! The concrete W scenarios from spec §8 (S1–S6; S7 is a B program and
//! lives with the B compiler's tests in `wvm_codegen`).

use super::*;

#[test]
fn s1_push_output_char() {
    let (result, output) = run(vec![push(65), WInstr::OutputChar, WInstr::End]);
    assert_eq!(result, Ok(()));
    assert_eq!(output, "A");
}

#[test]
fn s2_add() {
    let (result, output) = run(vec![
        push(3),
        push(4),
        WInstr::Arith(ArithOp::Add),
        WInstr::OutputNum,
        WInstr::End,
    ]);
    assert_eq!(result, Ok(()));
    assert_eq!(output, "7");
}

#[test]
fn s3_sub() {
    let (result, output) = run(vec![
        push(10),
        push(7),
        WInstr::Arith(ArithOp::Sub),
        WInstr::OutputNum,
        WInstr::End,
    ]);
    assert_eq!(result, Ok(()));
    assert_eq!(output, "3");
}

#[test]
fn s4_heap_round_trip() {
    let (result, output) = run(vec![
        push(0),
        push(42),
        WInstr::Store,
        push(0),
        WInstr::Retrieve,
        WInstr::OutputNum,
        WInstr::End,
    ]);
    assert_eq!(result, Ok(()));
    assert_eq!(output, "42");
}

#[test]
fn s5_dup_add() {
    let (result, output) = run(vec![
        push(1),
        WInstr::Dup,
        WInstr::Arith(ArithOp::Add),
        WInstr::OutputNum,
        WInstr::End,
    ]);
    assert_eq!(result, Ok(()));
    assert_eq!(output, "2");
}

#[test]
fn s6_branch_zero_taken() {
    const L: LabelId = 1;
    let (result, output) = run(vec![
        push(0),
        WInstr::Branch(BranchCond::Zero, L),
        push(9),
        WInstr::OutputNum,
        WInstr::Label(L),
        push(1),
        WInstr::OutputNum,
        WInstr::End,
    ]);
    assert_eq!(result, Ok(()));
    assert_eq!(output, "1");
}
