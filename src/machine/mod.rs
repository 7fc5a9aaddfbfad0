//! Factory machines: buttons wired to joltage counters

pub use self::button::Button;
pub use self::generate::GenerateOptions;

use std::fmt::{self, Display};
use std::fs;
use std::path::Path;

use itertools::Itertools;

use crate::error::{InvalidMachine, MachineFromFileError, ParseMachineError};
use crate::parse::{parse_machine, parse_machines};

mod button;
pub(crate) mod generate;

pub type ButtonId = usize;
pub type CounterId = usize;
/// A number of button presses, or a counter value reachable by pressing buttons
pub type Presses = u64;

/// A machine with joltage counters and the buttons that increment them
///
/// Each press of a button increments every counter wired to that button by one.
/// The machine is configured when every counter equals its target exactly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Machine {
    buttons: Vec<Button>,
    targets: Vec<Presses>,
}

impl Machine {
    pub fn new(buttons: Vec<Button>, targets: Vec<Presses>) -> Result<Self, InvalidMachine> {
        let machine = Self { buttons, targets };
        validate(&machine)?;
        Ok(machine)
    }

    /// Parse a single machine from one line of text
    pub fn parse(s: &str) -> Result<Self, ParseMachineError> {
        parse_machine(s)
    }

    /// Parse one machine per non-blank line
    pub fn parse_all(s: &str) -> Result<Vec<Self>, ParseMachineError> {
        parse_machines(s)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Vec<Self>, MachineFromFileError> {
        let s = fs::read_to_string(path)?;
        let machines = Self::parse_all(&s)?;
        Ok(machines)
    }

    /// Generate a random machine. It is solvable by construction.
    pub fn generate_untested(options: &GenerateOptions) -> Self {
        let (machine, _) = generate::generate_untested_machine_with_presses(options);
        machine
    }

    /// Generate a random machine along with the presses used to derive its targets
    pub fn generate_untested_with_presses(options: &GenerateOptions) -> (Self, Vec<Presses>) {
        generate::generate_untested_machine_with_presses(options)
    }

    pub fn button(&self, id: ButtonId) -> &Button {
        &self.buttons[id]
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    pub fn counter_count(&self) -> usize {
        self.targets.len()
    }

    pub fn target(&self, counter: CounterId) -> Presses {
        self.targets[counter]
    }

    pub fn targets(&self) -> &[Presses] {
        &self.targets
    }

    /// Counter values after pressing each button the given number of times, starting from zero
    pub fn apply_presses(&self, presses: &[Presses]) -> Vec<u128> {
        assert_eq!(self.buttons.len(), presses.len(), "one press count per button");
        let mut counters = vec![0_u128; self.targets.len()];
        for (button, &count) in self.buttons.iter().zip(presses) {
            for &counter in button.counter_ids() {
                counters[counter] += u128::from(count);
            }
        }
        counters
    }

    /// Returns true if the presses bring every counter exactly to its target
    pub fn verify_presses(&self, presses: &[Presses]) -> bool {
        presses.len() == self.buttons.len()
            && self
                .apply_presses(presses)
                .iter()
                .zip(&self.targets)
                .all(|(&value, &target)| value == u128::from(target))
    }
}

fn validate(machine: &Machine) -> Result<(), InvalidMachine> {
    let counter_count = machine.counter_count();
    for (id, button) in machine.buttons.iter().enumerate() {
        if let Some(&counter) = button.counter_ids().iter().find(|&&c| c >= counter_count) {
            return Err(InvalidMachine::new(format!(
                "button {} references counter {} but the machine has {} counters",
                id, counter, counter_count
            )));
        }
    }
    Ok(())
}

impl Display for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for button in &self.buttons {
            write!(f, "{} ", button)?;
        }
        write!(f, "{{{}}}", self.targets.iter().join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::{Button, Machine};

    fn machine() -> Machine {
        Machine::new(
            vec![Button::new(vec![0, 1]), Button::new(vec![0]), Button::new(vec![])],
            vec![4, 1],
        )
        .unwrap()
    }

    #[test]
    fn rejects_unknown_counter() {
        let result = Machine::new(vec![Button::new(vec![0, 2])], vec![1, 1]);
        assert!(result.is_err());
    }

    #[test]
    fn apply_presses() {
        assert_eq!(machine().apply_presses(&[1, 3, 7]), vec![4, 1]);
        assert_eq!(machine().apply_presses(&[0, 0, 0]), vec![0, 0]);
    }

    #[test]
    fn verify_presses() {
        let machine = machine();
        assert!(machine.verify_presses(&[1, 3, 0]));
        assert!(machine.verify_presses(&[1, 3, 9]));
        assert!(!machine.verify_presses(&[2, 2, 0]));
        assert!(!machine.verify_presses(&[1, 3]));
    }

    #[test]
    fn display_parses_back() {
        let machine = machine();
        let s = machine.to_string();
        assert_eq!(s, "(0,1) (0) () {4,1}");
        assert_eq!(Machine::parse(&s).unwrap(), machine);
    }
}
