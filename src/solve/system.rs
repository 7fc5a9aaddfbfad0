//! The machine as a linear system over exact rationals, in reduced row-echelon form

use crate::error::SolveError;
use crate::machine::{ButtonId, CounterId, Machine};
use crate::solve::rational::Rational;

/// One row of the augmented matrix: a coefficient per button, then the target
struct Row {
    /// the counter this row was built from, kept across row swaps
    counter: CounterId,
    values: Vec<Rational>,
}

impl Row {
    fn rhs(&self) -> &Rational {
        self.values.last().expect("row has a right-hand side")
    }
}

/// A row whose pivot button is determined by the free buttons:
/// `presses[button] = rhs - sum(coefficients[i] * presses[free[i]])`
pub(crate) struct PivotRow {
    pub button: ButtonId,
    /// parallel to `ReducedSystem::free`
    pub coefficients: Vec<Rational>,
    pub rhs: Rational,
}

pub(crate) struct ReducedSystem {
    pub pivot_rows: Vec<PivotRow>,
    /// buttons that never became a pivot, in ascending order
    pub free: Vec<ButtonId>,
}

impl ReducedSystem {
    pub fn rank(&self) -> usize {
        self.pivot_rows.len()
    }
}

/// Build the augmented matrix for `machine` and reduce it.
///
/// Fails with `InfeasibleTarget` if some constraint reduces to `0 = rhs` with `rhs != 0`.
pub(crate) fn reduce(machine: &Machine) -> Result<ReducedSystem, SolveError> {
    let button_count = machine.button_count();
    let mut rows = augmented_matrix(machine);
    let mut pivots: Vec<ButtonId> = Vec::new();
    for col in 0..button_count {
        let rank = pivots.len();
        let row = match (rank..rows.len()).find(|&i| !rows[i].values[col].is_zero()) {
            Some(row) => row,
            None => continue,
        };
        rows.swap(rank, row);
        let pivot = rows[rank].values[col].clone();
        for value in &mut rows[rank].values {
            *value = value.checked_div(&pivot)?;
        }
        let pivot_values = rows[rank].values.clone();
        for (i, row) in rows.iter_mut().enumerate() {
            if i == rank || row.values[col].is_zero() {
                continue;
            }
            let factor = row.values[col].clone();
            for (value, pivot_value) in row.values.iter_mut().zip(&pivot_values) {
                if !pivot_value.is_zero() {
                    *value = &*value - &(&factor * pivot_value);
                }
            }
        }
        pivots.push(col);
    }
    let rank = pivots.len();
    if let Some(row) = rows[rank..].iter().find(|row| !row.rhs().is_zero()) {
        debug!("Row for counter {} reduced to 0 = {}", row.counter, row.rhs());
        return Err(SolveError::InfeasibleTarget {
            counter: row.counter,
        });
    }
    let free: Vec<ButtonId> = (0..button_count).filter(|b| !pivots.contains(b)).collect();
    let pivot_rows = rows
        .into_iter()
        .zip(pivots)
        .map(|(row, button)| PivotRow {
            button,
            coefficients: free.iter().map(|&f| row.values[f].clone()).collect(),
            rhs: row.rhs().clone(),
        })
        .collect();
    Ok(ReducedSystem { pivot_rows, free })
}

fn augmented_matrix(machine: &Machine) -> Vec<Row> {
    (0..machine.counter_count())
        .map(|counter| {
            let mut values: Vec<Rational> = machine
                .buttons()
                .iter()
                .map(|button| {
                    if button.affects(counter) {
                        Rational::one()
                    } else {
                        Rational::zero()
                    }
                })
                .collect();
            values.push(Rational::from(machine.target(counter)));
            Row { counter, values }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::reduce;
    use crate::error::SolveError;
    use crate::machine::Machine;
    use crate::solve::rational::Rational;

    #[test]
    fn unique_solution() {
        let machine = Machine::parse("(0,1) (0) {4,1}").unwrap();
        let system = reduce(&machine).unwrap();
        assert_eq!(system.rank(), 2);
        assert!(system.free.is_empty());
        let solution: Vec<_> = system
            .pivot_rows
            .iter()
            .map(|row| (row.button, row.rhs.clone()))
            .collect();
        assert_eq!(solution, vec![(0, Rational::from(1_u64)), (1, Rational::from(3_u64))]);
    }

    #[test]
    fn free_buttons() {
        // both buttons only touch counter 0
        let machine = Machine::parse("(0) (0) (1) {2,3}").unwrap();
        let system = reduce(&machine).unwrap();
        assert_eq!(system.rank(), 2);
        assert_eq!(system.free, vec![1]);
        let row = &system.pivot_rows[0];
        assert_eq!(row.button, 0);
        assert_eq!(row.coefficients, vec![Rational::one()]);
        assert_eq!(row.rhs, Rational::from(2_u64));
    }

    #[test]
    fn redundant_rows() {
        let machine = Machine::parse("(0,1) {3,3}").unwrap();
        let system = reduce(&machine).unwrap();
        assert_eq!(system.rank(), 1);
        assert_eq!(system.pivot_rows[0].rhs, Rational::from(3_u64));
    }

    #[test]
    fn infeasible() {
        let machine = Machine::parse("(0,1) {3,4}").unwrap();
        assert_eq!(reduce(&machine).err(), Some(SolveError::InfeasibleTarget { counter: 1 }));
        let machine = Machine::parse("{0,2}").unwrap();
        assert_eq!(reduce(&machine).err(), Some(SolveError::InfeasibleTarget { counter: 1 }));
    }
}
