mod cli_test;
mod solve_test;

use std::path::PathBuf;
use std::process::{Command, Output};

pub fn get_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_numbers"))
}

/// Run the solver with `args` and return its output
pub fn run_numbers(args: &[&str]) -> Output {
    Command::new(get_binary_path())
        .args(args)
        .output()
        .expect("Failed to execute numbers")
}

/// Run the solver, require success and return the stdout lines sorted
pub fn solutions(args: &[&str]) -> Vec<String> {
    let output = run_numbers(args);
    if !output.status.success() {
        panic!(
            "Command {:?} failed with status: {:?}\nstderr: {}",
            args,
            output.status,
            String::from_utf8_lossy(&output.stderr)
        );
    }

    let mut lines: Vec<String> = String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect();
    lines.sort();
    lines
}
