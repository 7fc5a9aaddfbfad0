use std::mem;

use itertools::Itertools;

use crate::machine::{ButtonId, Presses};
use crate::solve::rational::Rational;
use crate::solve::system::ReducedSystem;
use crate::solve::Configuration;

/// Find the configuration with the fewest total presses by searching over the free buttons.
///
/// Returns `None` if no assignment within `bounds` makes every pivot button's presses
/// a non-negative integer within its own bound.
pub(crate) fn search_configuration(system: &ReducedSystem, bounds: &[Presses]) -> Option<Configuration> {
    let mut context = SearchContext::new(system, bounds);
    context.search(0);
    debug!("Search visited {} nodes", context.nodes);
    context.best
}

/// A free button, in search order
struct FreeVariable {
    button: ButtonId,
    bound: Presses,
    /// coefficient in each pivot row
    coefficients: Vec<Rational>,
    /// change in total presses (pivot buttons included) per press of this button
    weight: Rational,
}

struct PivotVariable {
    button: ButtonId,
    bound: Presses,
    bound_value: Rational,
    rhs: Rational,
    /// least and greatest contribution of the free variables at search position `i` and after
    suffix_min: Vec<Rational>,
    suffix_max: Vec<Rational>,
}

struct SearchContext {
    free: Vec<FreeVariable>,
    pivots: Vec<PivotVariable>,
    /// total presses when every free variable is zero
    base_total: Rational,
    /// least possible weighted presses of the free variables at search position `i` and after
    weight_suffix_min: Vec<Rational>,

    /// per pivot row, the contribution of the assigned free variables
    assigned: Vec<Rational>,
    /// weighted presses of the assigned free variables
    weighted: Rational,
    /// per search position
    values: Vec<Presses>,
    free_total: u128,
    best: Option<Configuration>,
    nodes: u64,
}

impl SearchContext {
    fn new(system: &ReducedSystem, bounds: &[Presses]) -> Self {
        // tightly bounded buttons first to prune early
        let free = system
            .free
            .iter()
            .enumerate()
            .map(|(i, &button)| {
                let coefficients = system
                    .pivot_rows
                    .iter()
                    .map(|row| row.coefficients[i].clone())
                    .collect_vec();
                let weight = coefficients.iter().fold(Rational::one(), |w, c| &w - c);
                FreeVariable {
                    button,
                    bound: bounds[button],
                    coefficients,
                    weight,
                }
            })
            .sorted_by_key(|var| (var.bound, var.button))
            .collect_vec();
        let pivots = system
            .pivot_rows
            .iter()
            .enumerate()
            .map(|(r, row)| {
                let (suffix_min, suffix_max) =
                    suffix_extremes(&free, |var| &var.coefficients[r] * &Rational::from(var.bound));
                let bound = bounds[row.button];
                PivotVariable {
                    button: row.button,
                    bound,
                    bound_value: Rational::from(bound),
                    rhs: row.rhs.clone(),
                    suffix_min,
                    suffix_max,
                }
            })
            .collect_vec();
        let (weight_suffix_min, _) = suffix_extremes(&free, |var| &var.weight * &Rational::from(var.bound));
        let base_total = pivots.iter().fold(Rational::zero(), |sum, p| &sum + &p.rhs);
        Self {
            assigned: vec![Rational::zero(); pivots.len()],
            values: vec![0; free.len()],
            free,
            pivots,
            base_total,
            weight_suffix_min,
            weighted: Rational::zero(),
            free_total: 0,
            best: None,
            nodes: 0,
        }
    }

    fn search(&mut self, position: usize) {
        self.nodes += 1;
        if !self.pivots_feasible(position) {
            return;
        }
        if position == self.free.len() {
            self.check_leaf();
            return;
        }
        trace!(
            "Searching button {} (depth={})",
            self.free[position].button,
            position
        );
        let weight_non_negative = !self.free[position].weight.is_negative();
        for value in 0..=self.free[position].bound {
            let free_total = self.free_total + u128::from(value);
            // pivot presses are never negative
            if !self.improves_on_best(free_total) {
                break;
            }
            let x = Rational::from(value);
            let weighted = &self.weighted + &(&self.free[position].weight * &x);
            let lower_bound = &(&self.base_total + &weighted) + &self.weight_suffix_min[position + 1];
            if !self.lower_bound_improves_on_best(&lower_bound) {
                if weight_non_negative {
                    break;
                }
                continue;
            }
            let deltas = self.free[position]
                .coefficients
                .iter()
                .map(|c| c * &x)
                .collect_vec();
            for (assigned, delta) in self.assigned.iter_mut().zip(&deltas) {
                *assigned = &*assigned + delta;
            }
            let saved_weighted = mem::replace(&mut self.weighted, weighted);
            let saved_total = mem::replace(&mut self.free_total, free_total);
            self.values[position] = value;

            self.search(position + 1);

            self.values[position] = 0;
            self.free_total = saved_total;
            self.weighted = saved_weighted;
            for (assigned, delta) in self.assigned.iter_mut().zip(&deltas) {
                *assigned = &*assigned - delta;
            }
        }
    }

    /// Every pivot button can still land within `[0, bound]` once the remaining free variables are assigned
    fn pivots_feasible(&self, position: usize) -> bool {
        self.pivots
            .iter()
            .zip(&self.assigned)
            .all(|(pivot, assigned)| {
                let residual = &pivot.rhs - assigned;
                pivot.suffix_min[position] <= residual
                    && pivot.suffix_max[position] >= &residual - &pivot.bound_value
            })
    }

    fn check_leaf(&mut self) {
        let mut pivot_presses = Vec::with_capacity(self.pivots.len());
        for (pivot, assigned) in self.pivots.iter().zip(&self.assigned) {
            // negative and fractional values are rejected here
            let presses = match (&pivot.rhs - assigned).to_u64() {
                Some(presses) if presses <= pivot.bound => presses,
                _ => return,
            };
            pivot_presses.push(presses);
        }
        let total = self.free_total + pivot_presses.iter().map(|&p| u128::from(p)).sum::<u128>();
        if !self.improves_on_best(total) {
            return;
        }
        let mut presses = vec![0; self.free.len() + self.pivots.len()];
        for (var, &value) in self.free.iter().zip(&self.values) {
            presses[var.button] = value;
        }
        for (pivot, &value) in self.pivots.iter().zip(&pivot_presses) {
            presses[pivot.button] = value;
        }
        debug!("Found configuration with {} presses", total);
        self.best = Some(Configuration { presses, total });
    }

    fn improves_on_best(&self, total: u128) -> bool {
        self.best.as_ref().map_or(true, |best| total < best.total)
    }

    fn lower_bound_improves_on_best(&self, lower_bound: &Rational) -> bool {
        self.best
            .as_ref()
            .map_or(true, |best| *lower_bound < Rational::from(best.total))
    }
}

/// Suffix sums of the least and greatest of `0` and `extreme(var)` for each free variable.
/// The result has one more element than `free`, ending in zero.
fn suffix_extremes(
    free: &[FreeVariable],
    extreme: impl Fn(&FreeVariable) -> Rational,
) -> (Vec<Rational>, Vec<Rational>) {
    let mut min = vec![Rational::zero(); free.len() + 1];
    let mut max = vec![Rational::zero(); free.len() + 1];
    for (i, var) in free.iter().enumerate().rev() {
        let extreme = extreme(var);
        if extreme.is_negative() {
            min[i] = &min[i + 1] + &extreme;
            max[i] = max[i + 1].clone();
        } else {
            min[i] = min[i + 1].clone();
            max[i] = &max[i + 1] + &extreme;
        }
    }
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::search_configuration;
    use crate::machine::Machine;
    use crate::solve::bounds::press_bounds;
    use crate::solve::system::reduce;

    fn search(s: &str) -> Option<(Vec<u64>, u128)> {
        let machine = Machine::parse(s).unwrap();
        let system = reduce(&machine).unwrap();
        search_configuration(&system, &press_bounds(&machine)).map(|c| (c.presses, c.total))
    }

    #[test]
    fn prefers_shared_button() {
        // pressing (0,1,2) once beats pressing each single button once
        assert_eq!(search("(0) (1) (2) (0,1,2) {1,1,1}"), Some((vec![0, 0, 0, 1], 1)));
    }

    #[test]
    fn duplicate_buttons() {
        let (presses, total) = search("(0) (0) {4}").unwrap();
        assert_eq!(total, 4);
        assert_eq!(presses.iter().sum::<u64>(), 4);
    }

    #[test]
    fn fractional_pivots_rejected() {
        // x0 + x1 = 1, x1 + x2 = 1, x0 + x2 = 1 only has x = 1/2
        assert_eq!(search("(0,2) (0,1) (1,2) {1,1,1}"), None);
    }

    #[test]
    fn bounds_exclude_solution() {
        // the only solutions need a negative press count
        assert_eq!(search("(0,1) (0) (1) (0,1,2) {1,1,2}"), None);
    }
}
