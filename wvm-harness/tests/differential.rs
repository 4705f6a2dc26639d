//! Codegen fidelity (spec §8, invariant 5): for every generator-produced
//! program the interpreter runs to completion on empty input, the ARM64
//! translation must produce byte-identical stdout once assembled, linked
//! and executed.
//!
//! This test drives the real external contract — `script.sh` must exist at
//! `WVM_SCRIPT` (or `test_files/qcoutput/script.sh`) and actually assemble,
//! link and run `prog.s` (spec §6); the assembler/linker themselves are an
//! explicit non-goal, referenced only by contract. It's `#[ignore]`d by
//! default for the same reason cross-compiled/QEMU-dependent tests usually
//! are: the toolchain is environment setup, not something `cargo test`
//! alone can provide.

use std::env;
use std::path::PathBuf;
use wvm_harness::gen::w_program_strategy;
use wvm_harness::{run_differential, Outcome};

fn script_path() -> PathBuf {
    env::var("WVM_SCRIPT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("test_files/qcoutput/script.sh"))
}

#[test]
#[ignore]
fn codegen_output_matches_the_interpreter_on_at_least_150_samples() {
    use proptest::strategy::Strategy;
    use proptest::test_runner::TestRunner;

    let out_dir = PathBuf::from("test_files/qcoutput");
    let script = script_path();
    let strategy = w_program_strategy(40);
    let mut runner = TestRunner::default();

    let mut passed = 0;
    let mut discarded = 0;
    for _ in 0..150 {
        let tree = strategy.new_tree(&mut runner).unwrap();
        let instrs = tree.current();
        match run_differential(instrs, &script, &out_dir).expect("harness I/O should succeed") {
            Outcome::Pass => passed += 1,
            Outcome::Discard => discarded += 1,
            Outcome::Fail { interp, exec } => {
                panic!("codegen fidelity violated: interpreter produced {:?}, executable produced {:?}", interp, exec);
            }
        }
    }

    assert!(passed + discarded == 150);
}
