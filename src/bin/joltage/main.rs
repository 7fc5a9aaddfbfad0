#![warn(rust_2018_idioms)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused_qualifications)]

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Result};
use itertools::Itertools;
use joltage::error::SolveError;
use joltage::machine::Machine;
use joltage::solve::MachineSolver;

use crate::options::{Options, Source};

mod options;

fn main() -> Result<()> {
    env_logger::init();
    let options = Options::from_args()?;
    let machines = source_machines(&options)?;
    if let Some(path) = options.output_path() {
        save_machines(path, &machines)?;
        println!("Saved {} machines to {}", machines.len(), path.display());
    }
    if options.solve() {
        solve_machines(&machines)?;
    } else {
        for (i, machine) in machines.iter().enumerate() {
            println!("{:>3}: {}", i + 1, machine);
        }
    }
    Ok(())
}

fn source_machines(options: &Options) -> Result<Vec<Machine>> {
    let machines = match options.source() {
        Source::File(path) => {
            println!("Reading machines from \"{}\"", path.display());
            Machine::from_file(path)?
        }
        Source::Generate(generate) => {
            println!("Generating {} machines", generate.count);
            (0..generate.count)
                .map(|_| Machine::generate_untested(&generate.machine))
                .collect()
        }
    };
    Ok(machines)
}

fn save_machines(path: &Path, machines: &[Machine]) -> Result<()> {
    let mut contents = machines.iter().join("\n");
    contents.push('\n');
    fs::write(path, contents)?;
    Ok(())
}

fn solve_machines(machines: &[Machine]) -> Result<()> {
    let mut sum: u128 = 0;
    let mut failed = 0;
    for (i, machine) in machines.iter().enumerate() {
        println!("{:>3}: {}", i + 1, machine);
        match MachineSolver::new(machine).solve() {
            Ok(configuration) => {
                println!(
                    "     presses: [{}] total: {}",
                    configuration.presses().iter().join(","),
                    configuration.total()
                );
                sum += configuration.total();
            }
            Err(e) => {
                let msg = match &e {
                    SolveError::InfeasibleTarget { .. } => "Machine targets are not reachable",
                    SolveError::Unsolvable => "Machine is not solvable",
                    SolveError::DivisionByZero(_) => "Machine could not be reduced",
                };
                println!("     {}: {}", msg, e);
                failed += 1;
            }
        }
    }
    println!("Fewest presses for all machines: {}", sum);
    if failed > 0 {
        return Err(anyhow!("{} of {} machines could not be configured", failed, machines.len()));
    }
    Ok(())
}
