use std::fmt::{self, Display};

use itertools::Itertools;

use crate::machine::CounterId;

/// A button on a machine
///
/// Every press increments each of the button's counters by exactly one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Button {
    /// Sorted and without duplicates
    counter_ids: Box<[CounterId]>,
}

impl Button {
    pub fn new(counter_ids: impl Into<Vec<CounterId>>) -> Self {
        let mut counter_ids = counter_ids.into();
        counter_ids.sort_unstable();
        counter_ids.dedup();
        Self {
            counter_ids: counter_ids.into_boxed_slice(),
        }
    }

    /// The IDs of the counters wired to this button
    pub fn counter_ids(&self) -> &[CounterId] {
        &self.counter_ids
    }

    pub fn affects(&self, counter: CounterId) -> bool {
        self.counter_ids.binary_search(&counter).is_ok()
    }
}

impl Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.counter_ids.iter().join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::Button;

    #[test]
    fn normalizes_counters() {
        let button = Button::new(vec![3, 1, 3, 0]);
        assert_eq!(button.counter_ids(), &[0, 1, 3]);
        assert!(button.affects(1));
        assert!(!button.affects(2));
        assert_eq!(button.to_string(), "(0,1,3)");
    }
}
