//! Load-time and runtime error coverage.

use super::*;

#[test]
fn duplicate_label_is_a_load_error() {
    let result = Program::new(vec![WInstr::Label(1), WInstr::Label(1), WInstr::End]);
    assert_eq!(result.err(), Some(LoadError::DuplicateLabel(1)));
}

#[test]
fn unresolved_label_is_a_load_error() {
    let result = Program::new(vec![WInstr::Jump(7), WInstr::End]);
    assert_eq!(result.err(), Some(LoadError::NoSuchLabel(7)));
}

#[test]
fn pop_on_empty_stack_is_val_stack_empty() {
    let (result, _) = run(vec![WInstr::Discard, WInstr::End]);
    assert_eq!(result, Err(RuntimeError::ValStackEmpty));
}

#[test]
fn copy_requires_sufficient_depth() {
    let (result, _) = run(vec![push(1), WInstr::Copy(3), WInstr::End]);
    assert_eq!(result, Err(RuntimeError::ValStackEmpty));
}

#[test]
fn return_with_empty_call_stack_is_an_error() {
    let (result, _) = run(vec![WInstr::Return]);
    assert_eq!(result, Err(RuntimeError::CallStackEmpty));
}

#[test]
fn division_by_zero_is_reported() {
    let (result, _) = run(vec![
        push(1),
        push(0),
        WInstr::Arith(ArithOp::Div),
        WInstr::End,
    ]);
    assert_eq!(result, Err(RuntimeError::DivByZero));
}

#[test]
fn falling_off_the_end_without_end_is_fatal() {
    let (result, _) = run(vec![push(1), WInstr::Discard]);
    assert_eq!(result, Err(RuntimeError::OutOfBounds));
}

#[test]
fn input_exhausted_on_empty_scripted_input() {
    let (result, _) = run_with_input(vec![push(0), WInstr::InputChar, WInstr::End], "");
    assert_eq!(result, Err(RuntimeError::InputExhausted));
}

#[test]
fn malformed_number_input_is_reported() {
    let (result, _) = run_with_input(
        vec![push(0), WInstr::InputNum, WInstr::End],
        "not a number\n",
    );
    assert_eq!(result, Err(RuntimeError::MalformedNumber));
}

#[test]
fn retrieve_of_unset_address_is_zero() {
    let (result, output) = run(vec![push(123), WInstr::Retrieve, WInstr::OutputNum, WInstr::End]);
    assert_eq!(result, Ok(()));
    assert_eq!(output, "0");
}

#[test]
fn floor_division_matches_euclidean_sign_convention() {
    let (result, output) = run(vec![
        push(-7),
        push(2),
        WInstr::Arith(ArithOp::Mod),
        WInstr::OutputNum,
        WInstr::End,
    ]);
    assert_eq!(result, Ok(()));
    // Floored modulo: -7 mod 2 == 1 (always same sign as the divisor).
    assert_eq!(output, "1");
}
