//! Find the fewest presses that configure a machine

pub use self::bounds::{press_bound, press_bounds};
pub use self::rational::Rational;

use crate::error::SolveError;
use crate::machine::{Machine, Presses};

use self::search::search_configuration;
use self::system::reduce;

mod bounds;
mod rational;
mod search;
mod system;

/// Press counts that bring every counter of a machine exactly to its target
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Configuration {
    presses: Vec<Presses>,
    total: u128,
}

impl Configuration {
    /// The number of times to press each button
    pub fn presses(&self) -> &[Presses] {
        &self.presses
    }

    /// The sum of all presses
    pub fn total(&self) -> u128 {
        self.total
    }
}

pub struct MachineSolver<'a> {
    machine: &'a Machine,
}

impl<'a> MachineSolver<'a> {
    pub fn new(machine: &'a Machine) -> Self {
        Self { machine }
    }

    /// Find a configuration with the minimum total presses
    pub fn solve(&self) -> Result<Configuration, SolveError> {
        let bounds = press_bounds(self.machine);
        let system = reduce(self.machine)?;
        debug!(
            "Reduced {} buttons and {} counters to rank {} with {} free buttons",
            self.machine.button_count(),
            self.machine.counter_count(),
            system.rank(),
            system.free.len()
        );
        if !system.free.is_empty() {
            info!("Begin searching free buttons {:?}", system.free);
        }
        let configuration = search_configuration(&system, &bounds).ok_or(SolveError::Unsolvable)?;
        debug_assert!(self.machine.verify_presses(&configuration.presses));
        Ok(configuration)
    }
}
