//! B-to-ARM64 lowering (spec §4.5).
//!
//! B has no source-level labels; only `While` nests. Every loop is labeled
//! with its path index — the top-level loop at sibling position `i` becomes
//! `while_i`/`whileend_i`, its nested loops `i.j`, `i.j.k`, … — which keeps
//! every loop label unique regardless of nesting depth (invariant 6).
//!
//! The data pointer is not a raw address: it is a 64-bit index kept in the
//! same stack slot the shared header seeds as a zero sentinel, and every
//! tape access computes `X29 + index`. This reuses the W/B-shared `array`
//! region and `X29` base exactly as the W compiler does.

use crate::arm64::{Arm64Instr, Cond, Reg};
use crate::runtime::{self, INPUT_CHAR, OUTPUT_CHAR};
use wvm::BInstr;

/// Lowers a full B program to ARM64, including the fixed header, footer,
/// and the two character I/O thunks (B has no numeric I/O, so the
/// `_output_num`/`_input_num` thunks are omitted).
pub fn compile_b(instrs: &[BInstr]) -> Vec<Arm64Instr> {
    let mut out = runtime::header();
    out.extend(lower_seq(instrs, ""));
    out.extend(runtime::footer());
    out.extend(runtime::output_char_thunk());
    out.extend(runtime::input_char_thunk());
    out
}

fn lower_seq(instrs: &[BInstr], path_prefix: &str) -> Vec<Arm64Instr> {
    let mut out = Vec::new();
    let mut loop_idx = 0usize;
    for instr in instrs {
        if let BInstr::While(body) = instr {
            let idx = if path_prefix.is_empty() {
                loop_idx.to_string()
            } else {
                format!("{}.{}", path_prefix, loop_idx)
            };
            loop_idx += 1;
            out.extend(lower_while(body, &idx));
        } else {
            out.extend(lower_simple(instr));
        }
    }
    out
}

fn lower_while(body: &[BInstr], idx: &str) -> Vec<Arm64Instr> {
    use Arm64Instr::*;

    let start = format!("while_{}", idx);
    let end = format!("whileend_{}", idx);

    let mut out = vec![
        Comment(format!("While, path {}", idx)),
        LabelDef(start.clone()),
        Ldr { dst: Reg::X0, base: Reg::Sp, offset: 0 },
        LdrbIndexed { dst: Reg::W(1), base: Reg::X29, index: Reg::X0 },
        CmpImm { a: Reg::W(1), imm: 0 },
        BCond { cond: Cond::Eq, label: end.clone() },
    ];
    out.extend(lower_seq(body, idx));
    out.push(B { label: start });
    out.push(LabelDef(end));
    out
}

fn lower_simple(instr: &BInstr) -> Vec<Arm64Instr> {
    use Arm64Instr::*;

    let mut out = vec![Comment(format!("{:?}", instr))];
    match instr {
        BInstr::IncrPtr => {
            out.push(Ldr { dst: Reg::X0, base: Reg::Sp, offset: 0 });
            out.push(AddImm { dst: Reg::X0, a: Reg::X0, imm: 1 });
            out.push(Str { src: Reg::X0, base: Reg::Sp, offset: 0 });
        }
        BInstr::DecrPtr => {
            out.push(Ldr { dst: Reg::X0, base: Reg::Sp, offset: 0 });
            out.push(SubImm { dst: Reg::X0, a: Reg::X0, imm: 1 });
            out.push(Str { src: Reg::X0, base: Reg::Sp, offset: 0 });
        }
        BInstr::IncrByte => {
            out.push(Ldr { dst: Reg::X0, base: Reg::Sp, offset: 0 });
            out.push(LdrbIndexed { dst: Reg::W(1), base: Reg::X29, index: Reg::X0 });
            out.push(AddImm { dst: Reg::W(1), a: Reg::W(1), imm: 1 });
            out.push(StrbIndexed { src: Reg::W(1), base: Reg::X29, index: Reg::X0 });
        }
        BInstr::DecrByte => {
            out.push(Ldr { dst: Reg::X0, base: Reg::Sp, offset: 0 });
            out.push(LdrbIndexed { dst: Reg::W(1), base: Reg::X29, index: Reg::X0 });
            out.push(SubImm { dst: Reg::W(1), a: Reg::W(1), imm: 1 });
            out.push(StrbIndexed { src: Reg::W(1), base: Reg::X29, index: Reg::X0 });
        }
        BInstr::Output => {
            out.push(Ldr { dst: Reg::X0, base: Reg::Sp, offset: 0 });
            out.push(LdrbIndexed { dst: Reg::W(0), base: Reg::X29, index: Reg::X0 });
            out.push(Bl { label: OUTPUT_CHAR.to_string() });
        }
        BInstr::Input => {
            out.push(Ldr { dst: Reg::X(3), base: Reg::Sp, offset: 0 });
            out.push(Bl { label: INPUT_CHAR.to_string() });
            out.push(StrbIndexed { src: Reg::W(0), base: Reg::X29, index: Reg::X(3) });
        }
        BInstr::While(_) => unreachable!("While is handled by lower_seq before reaching lower_simple"),
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;

    fn collect_labels(instrs: &[Arm64Instr]) -> Vec<String> {
        instrs
            .iter()
            .filter_map(|i| match i {
                Arm64Instr::LabelDef(l) => Some(l.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn sibling_and_nested_loop_labels_are_all_unique() {
        let program = vec![
            BInstr::While(vec![BInstr::IncrByte]),
            BInstr::While(vec![
                BInstr::While(vec![BInstr::IncrPtr]),
                BInstr::While(vec![BInstr::DecrPtr]),
            ]),
        ];

        let lowered = compile_b(&program);
        let labels = collect_labels(&lowered);
        let mut seen = std::collections::HashSet::new();
        for label in &labels {
            assert!(seen.insert(label.clone()), "duplicate label {}", label);
        }
        assert!(labels.contains(&"while_0".to_string()));
        assert!(labels.contains(&"while_1".to_string()));
        assert!(labels.contains(&"while_1.0".to_string()));
        assert!(labels.contains(&"while_1.1".to_string()));
    }
}
