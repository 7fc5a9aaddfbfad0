use std::convert::TryFrom;

use rand::distributions::Uniform;
use rand::seq::index;
use rand::{thread_rng, Rng};

use crate::machine::{Button, Machine, Presses};

const DEFAULT_COUNTER_COUNT: usize = 6;
const DEFAULT_BUTTON_COUNT: usize = 8;
const DEFAULT_MAX_PRESSES: Presses = 20;

/// Parameters for generating random machines
#[derive(Clone, Debug)]
pub struct GenerateOptions {
    pub counters: usize,
    pub buttons: usize,
    /// Upper limit on how many times each button is pressed to derive the targets
    pub max_presses: Presses,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            counters: DEFAULT_COUNTER_COUNT,
            buttons: DEFAULT_BUTTON_COUNT,
            max_presses: DEFAULT_MAX_PRESSES,
        }
    }
}

pub(crate) fn generate_untested_machine_with_presses(options: &GenerateOptions) -> (Machine, Vec<Presses>) {
    generate_machine_with_rng(options, &mut thread_rng())
}

/// Wires random buttons, presses each a random number of times and
/// uses the resulting counter values as the targets
pub(crate) fn generate_machine_with_rng(
    options: &GenerateOptions,
    rng: &mut impl Rng,
) -> (Machine, Vec<Presses>) {
    let buttons: Vec<Button> = (0..options.buttons)
        .map(|_| random_button(options.counters, &mut *rng))
        .collect();
    let press_distribution = Uniform::new_inclusive(0, options.max_presses);
    let presses: Vec<Presses> = (0..options.buttons)
        .map(|_| rng.sample(&press_distribution))
        .collect();
    let mut targets = vec![0; options.counters];
    for (button, &count) in buttons.iter().zip(&presses) {
        for &counter in button.counter_ids() {
            let sum = u128::from(targets[counter]) + u128::from(count);
            targets[counter] = Presses::try_from(sum).expect("generated target overflow");
        }
    }
    debug!("Generated presses: {:?}", presses);
    let machine = Machine::new(buttons, targets).expect("generated buttons reference known counters");
    (machine, presses)
}

fn random_button(counter_count: usize, rng: &mut impl Rng) -> Button {
    if counter_count == 0 {
        return Button::new(Vec::new());
    }
    let size = rng.gen_range(1, counter_count + 1);
    Button::new(index::sample(rng, counter_count, size).into_vec())
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{generate_machine_with_rng, GenerateOptions};

    #[test]
    fn generated_presses_reach_targets() {
        let mut rng = StdRng::seed_from_u64(7);
        let options = GenerateOptions::default();
        for _ in 0..20 {
            let (machine, presses) = generate_machine_with_rng(&options, &mut rng);
            assert_eq!(machine.button_count(), options.buttons);
            assert_eq!(machine.counter_count(), options.counters);
            assert!(presses.iter().all(|&p| p <= options.max_presses));
            assert!(machine.verify_presses(&presses));
        }
    }

    #[test]
    fn no_counters() {
        let mut rng = StdRng::seed_from_u64(1);
        let options = GenerateOptions {
            counters: 0,
            buttons: 2,
            max_presses: 3,
        };
        let (machine, _) = generate_machine_with_rng(&options, &mut rng);
        assert!(machine.buttons().iter().all(|b| b.counter_ids().is_empty()));
    }
}
