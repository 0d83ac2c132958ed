//! Testbench harness for the RAM, ROM and FIFO models.
//!
//! Usage: `memlab [fifo|ram|rom|all]` (defaults to `all`).

mod bench;
mod error;

use std::process::ExitCode;

use crate::error::LabError;

fn run(scenario: &str) -> Result<(), LabError> {
    match scenario {
        "fifo" => bench::fifo_bench(),
        "ram" => bench::ram_bench(),
        "rom" => bench::rom_bench(),
        "all" => {
            bench::fifo_bench()?;
            bench::ram_bench()?;
            bench::rom_bench()
        },
        other => Err(LabError::UnknownScenario(other.to_string())),
    }
}

fn main() -> ExitCode {
    let scenario = std::env::args().nth(1).unwrap_or_else(|| "all".to_string());
    match run(&scenario) {
        Ok(()) => {
            println!("{}: PASS", scenario);
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("{}: FAIL: {}", scenario, e);
            ExitCode::FAILURE
        },
    }
}
