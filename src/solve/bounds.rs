use crate::machine::{ButtonId, Machine, Presses};

/// The most times a button can be pressed without overshooting any of its counters.
///
/// A button wired to no counters is never useful, so its bound is zero.
pub fn press_bound(machine: &Machine, button: ButtonId) -> Presses {
    machine
        .button(button)
        .counter_ids()
        .iter()
        .map(|&counter| machine.target(counter))
        .min()
        .unwrap_or(0)
}

/// `press_bound` for every button
pub fn press_bounds(machine: &Machine) -> Vec<Presses> {
    (0..machine.button_count())
        .map(|button| press_bound(machine, button))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::press_bounds;
    use crate::machine::Machine;

    #[test]
    fn bounds() {
        let machine = Machine::parse("(0,1) (0) () (1,2) {4,1,9}").unwrap();
        assert_eq!(press_bounds(&machine), vec![1, 4, 0, 1]);
    }
}
