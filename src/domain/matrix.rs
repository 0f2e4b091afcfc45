use std::collections::BTreeMap;

use glpk::Problem;
use libc::c_int;

/// Constraint coefficients as `(row, col, value)` triplets in GLPK numbering.
///
/// Position 0 of each array is a placeholder so the arrays can be handed to
/// `glp_load_matrix` as they are.
#[derive(Debug, Clone)]
pub(crate) struct SparseMatrix {
    rows: Vec<c_int>,
    cols: Vec<c_int>,
    values: Vec<f64>,
}

impl SparseMatrix {
    pub(crate) fn new() -> Self {
        SparseMatrix {
            rows: vec![0],
            cols: vec![0],
            values: vec![0.0],
        }
    }

    /// Number of stored coefficients
    pub(crate) fn len(&self) -> usize {
        self.values.len() - 1
    }

    /// Append the coefficients of `row`, given as `(column, value)` pairs.
    ///
    /// GLPK rejects a row that names a column twice, so repeated columns are
    /// summed; entries that end up exactly zero are dropped.
    pub(crate) fn push_row<I>(&mut self, row: usize, entries: I)
    where
        I: IntoIterator<Item = (usize, f64)>,
    {
        let mut merged: BTreeMap<usize, f64> = BTreeMap::new();
        for (col, value) in entries {
            *merged.entry(col).or_insert(0.0) += value;
        }
        for (col, value) in merged.into_iter().filter(|(_, value)| *value != 0.0) {
            self.rows.push(row as c_int);
            self.cols.push(col as c_int);
            self.values.push(value);
        }
    }

    pub(crate) fn load_into(&self, problem: &mut Problem) {
        log::trace!("loading {} constraint coefficients", self.len());
        problem.load_matrix(&self.rows, &self.cols, &self.values);
    }

    #[cfg(test)]
    fn triplets(&self) -> Vec<(c_int, c_int, f64)> {
        self.rows
            .iter()
            .zip(&self.cols)
            .zip(&self.values)
            .skip(1)
            .map(|((&row, &col), &value)| (row, col, value))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_matrix_reserves_position_zero() {
        let matrix = SparseMatrix::new();
        assert_eq!(matrix.len(), 0);
        assert_eq!(matrix.rows, vec![0]);
    }

    #[test]
    fn test_push_row_keeps_column_order() {
        let mut matrix = SparseMatrix::new();
        matrix.push_row(1, [(3, 5.3), (1, -1.0), (2, 1.0)]);
        matrix.push_row(2, [(1, 2.0)]);
        assert_eq!(
            matrix.triplets(),
            vec![(1, 1, -1.0), (1, 2, 1.0), (1, 3, 5.3), (2, 1, 2.0)]
        );
    }

    #[test]
    fn test_push_row_merges_repeated_columns() {
        let mut matrix = SparseMatrix::new();
        matrix.push_row(1, [(1, 2.0), (2, 1.0), (1, 3.0), (2, -1.0)]);
        assert_eq!(matrix.triplets(), vec![(1, 1, 5.0)]);
    }

    #[test]
    fn test_load_into_problem() {
        let mut problem = Problem::new();
        problem.add_cols(2);
        problem.add_rows(1);
        let mut matrix = SparseMatrix::new();
        matrix.push_row(1, [(1, 1.0), (2, 2.0)]);
        matrix.load_into(&mut problem);
        assert_eq!(problem.num_rows(), 1);
    }
}
