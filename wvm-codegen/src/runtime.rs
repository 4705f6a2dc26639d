//! The fixed runtime (spec §4.4): directives, storage reservations, entry
//! point, exit sequence, and the four leaf I/O routines shared by every
//! compiled W and B program.
//!
//! Labels defined here (`_start`, `_output_char`, `_input_char`,
//! `_output_num`, `_input_num`, and their private `_output_num_*` /
//! `_input_num_*` helpers) live in a reserved, leading-underscore namespace
//! disjoint from both the W emitter's `w_` prefix and the B emitter's
//! `while_`/`whileend_` prefix.

use crate::arm64::{Arm64Instr, Cond, Directive, Reg};
use wvm::constants::{CALL_STACK_SIZE, IO_BUF_SIZE, TAPE_SIZE};

pub const START: &str = "_start";
pub const OUTPUT_CHAR: &str = "_output_char";
pub const INPUT_CHAR: &str = "_input_char";
pub const OUTPUT_NUM: &str = "_output_num";
pub const INPUT_NUM: &str = "_input_num";
pub const BUF: &str = "buf";
pub const ARRAY: &str = "array";
/// The W backend's dedicated call-stack region (spec §3/§9): kept separate
/// from the operand stack on `SP` so a `Call`'s return address can never be
/// observed by `Dup`/`Swap`/`Copy`/… or vice versa.
pub const CALLSTACK: &str = "callstack";

/// Section directives, storage reservations, and the `_start` prologue that
/// establishes `X29` as the heap/tape base, `X28` as the call-stack top, and
/// seeds the zero sentinel. Callers append the lowered instruction body
/// directly after this.
pub fn header() -> Vec<Arm64Instr> {
    use Arm64Instr::*;
    vec![
        Directive(Directive::DataSection),
        Directive(Directive::Balign(4)),
        Reserve { label: BUF.to_string(), size: IO_BUF_SIZE },
        Directive(Directive::Balign(4)),
        Reserve { label: ARRAY.to_string(), size: TAPE_SIZE },
        Directive(Directive::Balign(4)),
        Reserve { label: CALLSTACK.to_string(), size: CALL_STACK_SIZE },
        Directive(Directive::TextSection),
        Directive(Directive::Global(START.to_string())),
        Directive(Directive::Balign(16)),
        LabelDef(START.to_string()),
        Comment("x29 := base of the heap/tape region".to_string()),
        Adr { dst: Reg::X29, label: ARRAY.to_string() },
        Comment("x28 := top of the (empty) dedicated call stack".to_string()),
        Adr { dst: Reg::X28, label: CALLSTACK.to_string() },
        Comment("zero sentinel so a stray Discard/Return has something harmless to find".to_string()),
        MovImm { dst: Reg::X0, imm: 0 },
        Psh { reg: Reg::X0 },
    ]
}

/// Label every `End` lowers to (`compile_w.rs`), wherever in the program it
/// appears.
pub const EXIT: &str = "_wvm_exit";

/// The normal-termination sequence (`exit(0)`). Callers append this after
/// the lowered instruction body.
pub fn footer() -> Vec<Arm64Instr> {
    use Arm64Instr::*;
    vec![
        Comment("normal termination: exit(0)".to_string()),
        LabelDef(EXIT.to_string()),
        MovImm { dst: Reg::X0, imm: 0 },
        MovImm { dst: Reg::X(16), imm: 1 },
        Svc { imm: 0x80 },
    ]
}

/// `_output_char`: writes the low byte of `w0` to stdout.
pub fn output_char_thunk() -> Vec<Arm64Instr> {
    use Arm64Instr::*;
    vec![
        Comment("_output_char(w0): write one byte to stdout".to_string()),
        LabelDef(OUTPUT_CHAR.to_string()),
        Adr { dst: Reg::X1, label: BUF.to_string() },
        Strb { src: Reg::W(0), base: Reg::X1, offset: 0 },
        MovImm { dst: Reg::X0, imm: 1 },
        MovImm { dst: Reg::X2, imm: 1 },
        MovImm { dst: Reg::X(16), imm: 4 },
        Svc { imm: 0x80 },
        Ret,
    ]
}

/// `_input_char`: reads one byte from stdin into `w0`.
pub fn input_char_thunk() -> Vec<Arm64Instr> {
    use Arm64Instr::*;
    vec![
        Comment("_input_char() -> w0: read one byte from stdin".to_string()),
        LabelDef(INPUT_CHAR.to_string()),
        Adr { dst: Reg::X1, label: BUF.to_string() },
        MovImm { dst: Reg::X0, imm: 0 },
        MovImm { dst: Reg::X2, imm: 1 },
        MovImm { dst: Reg::X(16), imm: 3 },
        Svc { imm: 0x80 },
        Ldrb { dst: Reg::W(0), base: Reg::X1, offset: 0 },
        Ret,
    ]
}

/// `_output_num`: writes the decimal representation of the signed value in
/// `x0` to stdout via repeated calls to `_output_char`. Scratch: `x1`-`x6`;
/// `buf` holds the digits, built back-to-front.
pub fn output_num_thunk() -> Vec<Arm64Instr> {
    use Arm64Instr::*;
    vec![
        LabelDef(OUTPUT_NUM.to_string()),
        Psh { reg: Reg::X30 },
        Mov { dst: Reg::X2, src: Reg::X0 },
        CmpImm { a: Reg::X2, imm: 0 },
        BCond { cond: Cond::Ne, label: "_output_num_nonzero".to_string() },
        MovImm { dst: Reg::X0, imm: '0' as i64 },
        Bl { label: OUTPUT_CHAR.to_string() },
        B { label: "_output_num_done".to_string() },

        LabelDef("_output_num_nonzero".to_string()),
        BCond { cond: Cond::Lt, label: "_output_num_negative".to_string() },
        B { label: "_output_num_digits".to_string() },

        LabelDef("_output_num_negative".to_string()),
        MovImm { dst: Reg::X0, imm: '-' as i64 },
        Bl { label: OUTPUT_CHAR.to_string() },
        MovImm { dst: Reg::X(3), imm: 0 },
        Sub { dst: Reg::X2, a: Reg::X(3), b: Reg::X2 },

        LabelDef("_output_num_digits".to_string()),
        MovImm { dst: Reg::X1, imm: 10 },
        Adr { dst: Reg::X(4), label: BUF.to_string() },
        AddImm { dst: Reg::X(4), a: Reg::X(4), imm: (IO_BUF_SIZE - 1) as i64 },

        LabelDef("_output_num_digit_loop".to_string()),
        Sdiv { dst: Reg::X(5), a: Reg::X2, b: Reg::X1 },
        Mul { dst: Reg::X(6), a: Reg::X(5), b: Reg::X1 },
        Sub { dst: Reg::X(6), a: Reg::X2, b: Reg::X(6) },
        AddImm { dst: Reg::X(6), a: Reg::X(6), imm: '0' as i64 },
        Strb { src: Reg::W(6), base: Reg::X(4), offset: 0 },
        SubImm { dst: Reg::X(4), a: Reg::X(4), imm: 1 },
        Mov { dst: Reg::X2, src: Reg::X(5) },
        CmpImm { a: Reg::X2, imm: 0 },
        BCond { cond: Cond::Ne, label: "_output_num_digit_loop".to_string() },

        AddImm { dst: Reg::X(4), a: Reg::X(4), imm: 1 },
        Adr { dst: Reg::X(5), label: BUF.to_string() },
        AddImm { dst: Reg::X(5), a: Reg::X(5), imm: IO_BUF_SIZE as i64 },

        LabelDef("_output_num_emit_loop".to_string()),
        Cmp { a: Reg::X(4), b: Reg::X(5) },
        BCond { cond: Cond::Ge, label: "_output_num_done".to_string() },
        Ldrb { dst: Reg::W(0), base: Reg::X(4), offset: 0 },
        Bl { label: OUTPUT_CHAR.to_string() },
        AddImm { dst: Reg::X(4), a: Reg::X(4), imm: 1 },
        B { label: "_output_num_emit_loop".to_string() },

        LabelDef("_output_num_done".to_string()),
        Pop { reg: Reg::X30 },
        Ret,
    ]
}

/// `_input_num`: reads a `-`-optional digit string terminated by `\n` from
/// stdin via repeated calls to `_input_char`, leaving the parsed signed
/// value in `x0`.
pub fn input_num_thunk() -> Vec<Arm64Instr> {
    use Arm64Instr::*;
    vec![
        LabelDef(INPUT_NUM.to_string()),
        Psh { reg: Reg::X30 },
        MovImm { dst: Reg::X2, imm: 0 },
        MovImm { dst: Reg::X(3), imm: 1 },
        Bl { label: INPUT_CHAR.to_string() },
        CmpImm { a: Reg::X0, imm: '-' as i64 },
        BCond { cond: Cond::Ne, label: "_input_num_loop".to_string() },
        MovImm { dst: Reg::X(3), imm: -1 },
        Bl { label: INPUT_CHAR.to_string() },

        LabelDef("_input_num_loop".to_string()),
        CmpImm { a: Reg::X0, imm: '\n' as i64 },
        BCond { cond: Cond::Eq, label: "_input_num_done".to_string() },
        SubImm { dst: Reg::X(4), a: Reg::X0, imm: '0' as i64 },
        MovImm { dst: Reg::X(5), imm: 10 },
        Mul { dst: Reg::X2, a: Reg::X2, b: Reg::X(5) },
        Add { dst: Reg::X2, a: Reg::X2, b: Reg::X(4) },
        Bl { label: INPUT_CHAR.to_string() },
        B { label: "_input_num_loop".to_string() },

        LabelDef("_input_num_done".to_string()),
        Mul { dst: Reg::X0, a: Reg::X2, b: Reg::X(3) },
        Pop { reg: Reg::X30 },
        Ret,
    ]
}
