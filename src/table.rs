use ordered_float::OrderedFloat;
use std::ops::Range;
use thiserror::Error;

/// Columnar view over a dataset with one column designated as the
/// regression target.
///
/// Row operations (sorting, splitting) permute an index vector and narrow a
/// row window; the underlying column data is never moved. Feature indices
/// skip the target column but otherwise preserve the original column order.
#[derive(Debug, Clone)]
pub struct Table<'a> {
    row_index: Vec<usize>,
    row_range: Range<usize>,
    columns: Vec<&'a [f64]>,
    target: usize,
}

impl<'a> Table<'a> {
    pub fn new(columns: Vec<&'a [f64]>, target: usize) -> Result<Self, TableError> {
        if columns.len() < 2 {
            return Err(TableError::TooFewColumns);
        }

        if columns[0].is_empty() {
            return Err(TableError::EmptyTable);
        }

        let rows_len = columns[0].len();
        if columns.iter().skip(1).any(|c| c.len() != rows_len) {
            return Err(TableError::RowSizeMismatch);
        }

        if target >= columns.len() {
            return Err(TableError::TargetOutOfRange { target });
        }

        if columns[target].iter().any(|t| !t.is_finite()) {
            return Err(TableError::NonFiniteTarget);
        }

        Ok(Self {
            row_index: (0..rows_len).collect(),
            row_range: Range {
                start: 0,
                end: rows_len,
            },
            columns,
            target,
        })
    }

    pub fn target(&self) -> impl '_ + Iterator<Item = f64> + Clone {
        self.column(self.target)
    }

    pub fn feature(&self, index: usize) -> impl '_ + Iterator<Item = f64> + Clone {
        self.column(self.column_of(index))
    }

    pub fn features_len(&self) -> usize {
        self.columns.len() - 1
    }

    pub fn rows_len(&self) -> usize {
        self.row_range.end - self.row_range.start
    }

    pub fn is_single_target(&self) -> bool {
        let mut target = self.target();
        let first = target.next().expect("never fails");
        target.all(|y| y == first)
    }

    fn column_of(&self, feature_index: usize) -> usize {
        if feature_index < self.target {
            feature_index
        } else {
            feature_index + 1
        }
    }

    fn column(&self, column_index: usize) -> impl '_ + Iterator<Item = f64> + Clone {
        self.rows().map(move |i| self.columns[column_index][i])
    }

    fn rows(&self) -> impl '_ + Iterator<Item = usize> + Clone {
        self.row_index[self.row_range.start..self.row_range.end]
            .iter()
            .copied()
    }

    pub fn sort_rows_by_feature(&mut self, feature_index: usize) {
        let column = self.columns[self.column_of(feature_index)];
        self.row_index[self.row_range.start..self.row_range.end]
            .sort_by_key(|&x| OrderedFloat(column[x]))
    }

    /// Midpoints between consecutive distinct values of a feature column,
    /// paired with the in-window row offset where the upper value starts.
    ///
    /// Non finite midpoints (infinite cells parsed from the input) are
    /// skipped, so every returned threshold splits off a non empty right side.
    pub fn thresholds(&self, feature_index: usize) -> impl '_ + Iterator<Item = (usize, f64)> {
        // Assumption: the rows have been sorted by this feature.
        let column = self.columns[self.column_of(feature_index)];
        self.rows()
            .map(move |i| column[i])
            .enumerate()
            .scan(None, |prev, (i, x)| {
                if prev.is_none() {
                    *prev = Some(x);
                    Some(None)
                } else if *prev != Some(x) {
                    let y = prev.expect("never fails");
                    *prev = Some(x);
                    // Halving before adding keeps the midpoint of two huge
                    // finite values from overflowing.
                    Some(Some((i, x / 2.0 + y / 2.0)))
                } else {
                    Some(None)
                }
            })
            .flatten()
            .filter(|&(_, threshold)| threshold.is_finite())
    }

    pub fn with_split<F, T>(&mut self, row: usize, mut f: F) -> (T, T)
    where
        F: FnMut(&mut Self) -> T,
    {
        let row = row + self.row_range.start;
        let original = self.row_range.clone();

        self.row_range.end = row;
        let left = f(self);
        self.row_range.end = original.end;

        self.row_range.start = row;
        let right = f(self);
        self.row_range.start = original.start;

        (left, right)
    }
}

#[derive(Debug, Error, Clone)]
pub enum TableError {
    #[error("table must have at least one feature column and one target column")]
    TooFewColumns,

    #[error("table must have at least one row")]
    EmptyTable,

    #[error("some of columns have a different row count from others")]
    RowSizeMismatch,

    #[error("target column index {target} is out of range")]
    TargetOutOfRange { target: usize },

    #[error("target column contains non finite numbers")]
    NonFiniteTarget,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_degenerate_tables() {
        assert!(matches!(
            Table::new(vec![&[1.0][..]], 0),
            Err(TableError::TooFewColumns)
        ));
        assert!(matches!(
            Table::new(vec![&[][..], &[][..]], 1),
            Err(TableError::EmptyTable)
        ));
        assert!(matches!(
            Table::new(vec![&[1.0, 2.0][..], &[1.0][..]], 1),
            Err(TableError::RowSizeMismatch)
        ));
        assert!(matches!(
            Table::new(vec![&[1.0][..], &[f64::NAN][..]], 1),
            Err(TableError::NonFiniteTarget)
        ));
        assert!(matches!(
            Table::new(vec![&[1.0][..], &[2.0][..]], 2),
            Err(TableError::TargetOutOfRange { target: 2 })
        ));
    }

    #[test]
    fn feature_indices_skip_the_target_column() -> Result<(), anyhow::Error> {
        let a = [1.0, 2.0];
        let b = [3.0, 4.0];
        let c = [5.0, 6.0];

        let table = Table::new(vec![&a, &b, &c], 1)?;
        assert_eq!(table.features_len(), 2);
        assert_eq!(table.feature(0).collect::<Vec<_>>(), vec![1.0, 2.0]);
        assert_eq!(table.feature(1).collect::<Vec<_>>(), vec![5.0, 6.0]);
        assert_eq!(table.target().collect::<Vec<_>>(), vec![3.0, 4.0]);
        Ok(())
    }

    #[test]
    fn thresholds_are_midpoints_of_distinct_values() -> Result<(), anyhow::Error> {
        let xs = [3.0, 1.0, 1.0, 2.0];
        let ys = [0.0, 0.0, 0.0, 0.0];

        let mut table = Table::new(vec![&xs, &ys], 1)?;
        table.sort_rows_by_feature(0);
        let thresholds = table.thresholds(0).collect::<Vec<_>>();
        assert_eq!(thresholds, vec![(2, 1.5), (3, 2.5)]);
        Ok(())
    }

    #[test]
    fn non_finite_thresholds_are_skipped() -> Result<(), anyhow::Error> {
        let xs = [1.0, 2.0, f64::INFINITY];
        let ys = [0.0, 0.0, 0.0];

        let mut table = Table::new(vec![&xs, &ys], 1)?;
        table.sort_rows_by_feature(0);
        assert_eq!(table.thresholds(0).collect::<Vec<_>>(), vec![(1, 1.5)]);

        // Two huge finite values whose plain sum would overflow.
        let xs = [1.6e308, 1.7e308];
        let ys = [0.0, 0.0];

        let mut table = Table::new(vec![&xs, &ys], 1)?;
        table.sort_rows_by_feature(0);
        let thresholds = table.thresholds(0).collect::<Vec<_>>();
        assert_eq!(thresholds.len(), 1);
        assert!(thresholds[0].1.is_finite());
        assert!(1.6e308 < thresholds[0].1 && thresholds[0].1 < 1.7e308);
        Ok(())
    }

    #[test]
    fn with_split_partitions_and_restores_the_window() -> Result<(), anyhow::Error> {
        let xs = [2.0, 1.0, 4.0, 3.0];
        let ys = [20.0, 10.0, 40.0, 30.0];

        let mut table = Table::new(vec![&xs, &ys], 1)?;
        table.sort_rows_by_feature(0);
        let (left, right) = table.with_split(2, |t| t.target().collect::<Vec<_>>());
        assert_eq!(left, vec![10.0, 20.0]);
        assert_eq!(right, vec![30.0, 40.0]);
        assert_eq!(table.rows_len(), 4);
        Ok(())
    }
}
