//! CLI entry point for the differential oracle: a thin `clap`-parsed
//! wrapper around a library call.

#[macro_use]
extern crate clap;
extern crate log;
extern crate pretty_env_logger;
extern crate proptest;
extern crate wvm_harness;

use clap::{Arg, ArgGroup};
use log::info;
use std::path::PathBuf;
use std::process;
use wvm_harness::gen::w_program_strategy;
use wvm_harness::Outcome;

fn main() {
    pretty_env_logger::init();

    let matches = app_from_crate!()
        .arg(
            Arg::with_name("script")
                .short("s")
                .long("script")
                .takes_value(true)
                .value_name("SCRIPT")
                .required(true)
                .help("Path to the assemble-and-run script (reads prog.s, writes out.txt)"),
        )
        .arg(
            Arg::with_name("out-dir")
                .short("o")
                .long("out-dir")
                .takes_value(true)
                .value_name("DIR")
                .default_value("test_files/qcoutput")
                .help("Working directory for prog.s/out.txt"),
        )
        .arg(
            Arg::with_name("count")
                .short("n")
                .long("count")
                .takes_value(true)
                .value_name("COUNT")
                .default_value("150")
                .help("Number of random programs to run"),
        )
        .arg(
            Arg::with_name("max-len")
                .long("max-len")
                .takes_value(true)
                .value_name("LEN")
                .default_value("40")
                .help("Maximum instruction count per generated program"),
        )
        .group(ArgGroup::with_name("required-args").args(&["script"]).required(true))
        .get_matches();

    let script_path = PathBuf::from(matches.value_of("script").unwrap());
    let out_dir = PathBuf::from(matches.value_of("out-dir").unwrap());
    let count = value_t!(matches.value_of("count"), usize).unwrap_or_else(|e| e.exit());
    let max_len = value_t!(matches.value_of("max-len"), usize).unwrap_or_else(|e| e.exit());

    let mut failures = 0usize;
    let mut discards = 0usize;
    let mut runner = proptest::test_runner::TestRunner::default();
    let strategy = w_program_strategy(max_len);

    for i in 0..count {
        use proptest::strategy::Strategy;
        let tree = strategy.new_tree(&mut runner).expect("strategy generation should not fail");
        let instrs = tree.current();

        match wvm_harness::run_differential(instrs, &script_path, &out_dir) {
            Ok(Outcome::Pass) => info!("trial {}/{}: pass", i + 1, count),
            Ok(Outcome::Discard) => discards += 1,
            Ok(Outcome::Fail { interp, exec }) => {
                failures += 1;
                eprintln!("trial {}/{}: MISMATCH\n  interpreter: {:?}\n  executable:  {:?}", i + 1, count, interp, exec);
            }
            Err(e) => {
                eprintln!("trial {}/{}: harness error: {}", i + 1, count, e);
                failures += 1;
            }
        }
    }

    println!("{} pass, {} fail, {} discarded (of {})", count - failures - discards, failures, discards, count);
    if failures > 0 {
        process::exit(1);
    }
}
