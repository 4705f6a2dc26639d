//! The W interpreter — a single-stepping virtual machine.
//!
//! Splits the way `Core::tick` (one instruction) and `Processor::run` (loop
//! to exit) split: [`VmState::step`] performs one transition, [`exec`]
//! drives it to normal termination or the first error.

use crate::errors::RuntimeError;
use crate::instr::{ArithOp, BranchCond, WInstr};
use crate::io::IoCapability;
use crate::program::Program;
use crate::Int;
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};
use std::collections::HashMap;

/// The outcome of a single [`VmState::step`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Step {
    /// The program has more instructions to run.
    Continue,
    /// `End` was executed; the program halted normally.
    Halted,
}

/// The four linear containers that make up a W program's runtime state:
/// operand stack, heap, call stack and program counter.
pub struct VmState {
    operand_stack: Vec<Int>,
    heap: HashMap<Int, Int>,
    call_stack: Vec<usize>,
    pc: usize,
}

impl Default for VmState {
    fn default() -> VmState {
        VmState::new()
    }
}

impl VmState {
    /// A fresh VM state: empty stacks and heap, pc at the first instruction.
    pub fn new() -> VmState {
        VmState {
            operand_stack: Vec::new(),
            heap: HashMap::new(),
            call_stack: Vec::new(),
            pc: 0,
        }
    }

    /// The operand stack, top last.
    pub fn operand_stack(&self) -> &[Int] {
        &self.operand_stack
    }

    /// The heap cell at `address`, or zero if it was never written.
    pub fn heap_get(&self, address: &Int) -> Int {
        self.heap.get(address).cloned().unwrap_or_else(Int::zero)
    }

    /// The current program counter.
    pub fn pc(&self) -> usize {
        self.pc
    }

    fn pop(&mut self) -> Result<Int, RuntimeError> {
        self.operand_stack.pop().ok_or(RuntimeError::ValStackEmpty)
    }

    fn push(&mut self, value: Int) {
        self.operand_stack.push(value);
    }

    /// Executes the instruction at the current program counter against
    /// `program`, using `io` for any input/output, and advances the program
    /// counter.
    pub fn step<IO: IoCapability>(
        &mut self,
        program: &Program,
        io: &mut IO,
    ) -> Result<Step, RuntimeError> {
        let instr = program.at(self.pc)?.clone();
        let mut next_pc = self.pc + 1;

        match instr {
            WInstr::InputChar => {
                let address = self.pop()?;
                let c = io.read_char()?;
                self.heap.insert(address, Int::from(c as u32));
            }

            WInstr::InputNum => {
                let address = self.pop()?;
                let value = io.read_num()?;
                self.heap.insert(address, value);
            }

            WInstr::OutputChar => {
                let value = self.pop()?;
                let byte = value.mod_floor(&Int::from(256)).to_u8().unwrap_or(0);
                io.write_bytes(&[byte]);
            }

            WInstr::OutputNum => {
                let value = self.pop()?;
                io.write_bytes(value.to_string().as_bytes());
            }

            WInstr::Push(n) => self.push(n),

            WInstr::Dup => {
                let top = self.operand_stack.last().ok_or(RuntimeError::ValStackEmpty)?.clone();
                self.push(top);
            }

            WInstr::Swap => {
                let len = self.operand_stack.len();
                if len < 2 {
                    return Err(RuntimeError::ValStackEmpty);
                }
                self.operand_stack.swap(len - 1, len - 2);
            }

            WInstr::Discard => {
                self.pop()?;
            }

            WInstr::Copy(k) => {
                let len = self.operand_stack.len();
                if len < k + 1 {
                    return Err(RuntimeError::ValStackEmpty);
                }
                let value = self.operand_stack[len - 1 - k].clone();
                self.push(value);
            }

            WInstr::Slide(k) => {
                let len = self.operand_stack.len();
                if len < k + 1 {
                    return Err(RuntimeError::ValStackEmpty);
                }
                let top = self.pop()?;
                self.operand_stack.truncate(len - 1 - k);
                self.push(top);
            }

            WInstr::Arith(op) => {
                let b = self.pop()?;
                let a = self.pop()?;
                self.push(apply_arith(op, a, b)?);
            }

            WInstr::Label(_) => {}

            WInstr::Call(label) => {
                self.call_stack.push(next_pc);
                next_pc = program.lookup(label)?;
            }

            WInstr::Jump(label) => {
                next_pc = program.lookup(label)?;
            }

            WInstr::Branch(cond, label) => {
                let value = self.pop()?;
                let taken = match cond {
                    BranchCond::Zero => value.is_zero(),
                    BranchCond::Neg => value < Int::zero(),
                };
                if taken {
                    next_pc = program.lookup(label)?;
                }
            }

            WInstr::Return => {
                next_pc = self.call_stack.pop().ok_or(RuntimeError::CallStackEmpty)?;
            }

            WInstr::End => {
                return Ok(Step::Halted);
            }

            WInstr::Store => {
                let value = self.pop()?;
                let address = self.pop()?;
                self.heap.insert(address, value);
            }

            WInstr::Retrieve => {
                let address = self.pop()?;
                let value = self.heap_get(&address);
                self.push(value);
            }
        }

        self.pc = next_pc;
        Ok(Step::Continue)
    }
}

fn apply_arith(op: ArithOp, a: Int, b: Int) -> Result<Int, RuntimeError> {
    Ok(match op {
        ArithOp::Add => a + b,
        ArithOp::Sub => a - b,
        ArithOp::Mul => a * b,
        ArithOp::Div => {
            if b.is_zero() {
                return Err(RuntimeError::DivByZero);
            }
            a.div_floor(&b)
        }
        ArithOp::Mod => {
            if b.is_zero() {
                return Err(RuntimeError::DivByZero);
            }
            a.mod_floor(&b)
        }
    })
}

/// Runs `program` from a fresh [`VmState`] to normal termination (`End`),
/// or returns the first [`RuntimeError`] encountered.
pub fn exec<IO: IoCapability>(program: &Program, io: &mut IO) -> Result<(), RuntimeError> {
    let mut state = VmState::new();
    loop {
        match state.step(program, io)? {
            Step::Continue => {}
            Step::Halted => return Ok(()),
        }
    }
}
