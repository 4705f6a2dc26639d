//! The assembly printer (spec §4.6): the sole place that turns an
//! [`Arm64Instr`] value into text. The compiler itself never concatenates
//! assembly strings.

use crate::arm64::{Arm64Instr, Cond, Directive, Reg};

fn reg_name(r: Reg) -> String {
    match r {
        Reg::X(n) => format!("x{}", n),
        Reg::W(n) => format!("w{}", n),
        Reg::Sp => "sp".to_string(),
    }
}

fn cond_name(c: Cond) -> &'static str {
    match c {
        Cond::Eq => "eq",
        Cond::Ne => "ne",
        Cond::Lt => "lt",
        Cond::Ge => "ge",
        Cond::Mi => "mi",
    }
}

/// Renders one [`Arm64Instr`] to exactly one non-empty line, with no
/// trailing newline (invariant 7, "printer totality").
pub fn print_instr(instr: &Arm64Instr) -> String {
    match instr {
        Arm64Instr::Directive(Directive::DataSection) => ".data".to_string(),
        Arm64Instr::Directive(Directive::TextSection) => ".text".to_string(),
        Arm64Instr::Directive(Directive::Balign(n)) => format!(".balign {}", n),
        Arm64Instr::Directive(Directive::Global(label)) => format!(".global {}", label),

        Arm64Instr::LabelDef(label) => format!("{}:", label),
        Arm64Instr::Reserve { label, size } => format!("{}: .skip {}", label, size),

        Arm64Instr::Mov { dst, src } => format!("mov {}, {}", reg_name(*dst), reg_name(*src)),
        Arm64Instr::MovImm { dst, imm } => format!("mov {}, #{}", reg_name(*dst), imm),

        Arm64Instr::Add { dst, a, b } => {
            format!("add {}, {}, {}", reg_name(*dst), reg_name(*a), reg_name(*b))
        }
        Arm64Instr::AddImm { dst, a, imm } => {
            format!("add {}, {}, #{}", reg_name(*dst), reg_name(*a), imm)
        }
        Arm64Instr::Sub { dst, a, b } => {
            format!("sub {}, {}, {}", reg_name(*dst), reg_name(*a), reg_name(*b))
        }
        Arm64Instr::SubImm { dst, a, imm } => {
            format!("sub {}, {}, #{}", reg_name(*dst), reg_name(*a), imm)
        }

        Arm64Instr::Ldr { dst, base, offset } => {
            format!("ldr {}, [{}, #{}]", reg_name(*dst), reg_name(*base), offset)
        }
        Arm64Instr::Str { src, base, offset } => {
            format!("str {}, [{}, #{}]", reg_name(*src), reg_name(*base), offset)
        }
        Arm64Instr::Ldrb { dst, base, offset } => {
            format!("ldrb {}, [{}, #{}]", reg_name(*dst), reg_name(*base), offset)
        }
        Arm64Instr::Strb { src, base, offset } => {
            format!("strb {}, [{}, #{}]", reg_name(*src), reg_name(*base), offset)
        }
        Arm64Instr::LdrIndexed { dst, base, index } => {
            format!("ldr {}, [{}, {}]", reg_name(*dst), reg_name(*base), reg_name(*index))
        }
        Arm64Instr::StrIndexed { src, base, index } => {
            format!("str {}, [{}, {}]", reg_name(*src), reg_name(*base), reg_name(*index))
        }
        Arm64Instr::LdrbIndexed { dst, base, index } => {
            format!("ldrb {}, [{}, {}]", reg_name(*dst), reg_name(*base), reg_name(*index))
        }
        Arm64Instr::StrbIndexed { src, base, index } => {
            format!("strb {}, [{}, {}]", reg_name(*src), reg_name(*base), reg_name(*index))
        }

        Arm64Instr::Mul { dst, a, b } => {
            format!("mul {}, {}, {}", reg_name(*dst), reg_name(*a), reg_name(*b))
        }
        Arm64Instr::Sdiv { dst, a, b } => {
            format!("sdiv {}, {}, {}", reg_name(*dst), reg_name(*a), reg_name(*b))
        }
        Arm64Instr::AndImm { dst, a, imm } => {
            format!("and {}, {}, #{}", reg_name(*dst), reg_name(*a), imm)
        }

        Arm64Instr::Cmp { a, b } => format!("cmp {}, {}", reg_name(*a), reg_name(*b)),
        Arm64Instr::CmpImm { a, imm } => format!("cmp {}, #{}", reg_name(*a), imm),
        Arm64Instr::B { label } => format!("b {}", label),
        Arm64Instr::BCond { cond, label } => format!("b.{} {}", cond_name(*cond), label),
        Arm64Instr::Bl { label } => format!("bl {}", label),
        Arm64Instr::Br { reg } => format!("br {}", reg_name(*reg)),
        Arm64Instr::Ret => "ret".to_string(),
        Arm64Instr::Svc { imm } => format!("svc #{:#x}", imm),

        Arm64Instr::Psh { reg } => format!("str {}, [sp, #-16]!", reg_name(*reg)),
        Arm64Instr::Pop { reg } => format!("ldr {}, [sp], #16", reg_name(*reg)),

        Arm64Instr::Adr { dst, label } => format!("adr {}, {}", reg_name(*dst), label),

        Arm64Instr::Comment(text) => format!("// {}", text),
    }
}

/// Renders a full instruction sequence, one line per instruction, newline
/// terminated — this is the literal contents written to `prog.s`.
pub fn print_program(instrs: &[Arm64Instr]) -> String {
    let mut out = String::new();
    for instr in instrs {
        out.push_str(&print_instr(instr));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::arm64::Reg;

    #[test]
    fn every_variant_renders_one_nonempty_line() {
        let sample = vec![
            Arm64Instr::Directive(Directive::DataSection),
            Arm64Instr::Directive(Directive::Balign(4)),
            Arm64Instr::Reserve { label: "buf".to_string(), size: 20 },
            Arm64Instr::LabelDef("_start".to_string()),
            Arm64Instr::Mov { dst: Reg::X0, src: Reg::X1 },
            Arm64Instr::MovImm { dst: Reg::X0, imm: 42 },
            Arm64Instr::Psh { reg: Reg::X0 },
            Arm64Instr::Pop { reg: Reg::X0 },
            Arm64Instr::Ret,
            Arm64Instr::Comment("anchor".to_string()),
        ];
        for instr in &sample {
            let line = print_instr(instr);
            assert!(!line.is_empty());
            assert_eq!(line.lines().count(), 1);
        }
    }

    #[test]
    fn register_width_is_quoted_correctly() {
        assert_eq!(reg_name(Reg::X(0)), "x0");
        assert_eq!(reg_name(Reg::W(0)), "w0");
        assert_eq!(reg_name(Reg::Sp), "sp");
    }
}
