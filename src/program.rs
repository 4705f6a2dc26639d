//! Program container: a finite, indexable instruction array plus the label
//! table built once at load time.

use crate::errors::{LoadError, RuntimeError};
use crate::instr::WInstr;
use crate::LabelId;
use std::collections::HashMap;

/// An immutable, validated W instruction array with its label table.
///
/// Constructed once per program via [`Program::new`] and never mutated
/// afterwards — mirrors `Memory`/`Executable`-style types built once from a
/// `Vec` and then only read.
#[derive(Debug)]
pub struct Program {
    instructions: Vec<WInstr>,
    labels: HashMap<LabelId, usize>,
}

impl Program {
    /// Scans `instructions` for `Label` definitions, failing on a duplicate,
    /// then checks that every `Call`/`Jump`/`Branch` target is defined.
    ///
    /// Both checks are statically knowable and are therefore load-time
    /// errors, not runtime ones.
    pub fn new(instructions: Vec<WInstr>) -> Result<Program, LoadError> {
        let mut labels = HashMap::new();

        for (index, instr) in instructions.iter().enumerate() {
            if let WInstr::Label(id) = instr {
                if labels.insert(*id, index).is_some() {
                    return Err(LoadError::DuplicateLabel(*id));
                }
            }
        }

        for instr in &instructions {
            let target = match instr {
                WInstr::Call(id) | WInstr::Jump(id) | WInstr::Branch(_, id) => Some(*id),
                _ => None,
            };

            if let Some(id) = target {
                if !labels.contains_key(&id) {
                    return Err(LoadError::NoSuchLabel(id));
                }
            }
        }

        Ok(Program {
            instructions,
            labels,
        })
    }

    /// Number of instructions in the program.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Fetches the instruction at `pc`.
    pub fn at(&self, pc: usize) -> Result<&WInstr, RuntimeError> {
        self.instructions.get(pc).ok_or(RuntimeError::OutOfBounds)
    }

    /// Resolves a label id to its instruction index.
    pub fn lookup(&self, label: LabelId) -> Result<usize, RuntimeError> {
        self.labels
            .get(&label)
            .copied()
            .ok_or(RuntimeError::NoSuchLabel(label))
    }

    /// The raw instruction slice, e.g. for the codegen crate to iterate over
    /// while lowering.
    pub fn instructions(&self) -> &[WInstr] {
        &self.instructions
    }
}
