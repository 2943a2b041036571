use crate::table::{Table, TableError};
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Named numeric columns parsed from a CSV file.
///
/// The first CSV row is taken as the header; every cell below it must parse
/// as a number. Which column is the target is decided afterwards, by
/// [`Dataset::target_index`].
#[derive(Debug, Clone)]
pub struct Dataset {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl Dataset {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        Self::load(csv::Reader::from_path(path)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        Self::load(csv::Reader::from_reader(reader))
    }

    fn load<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, LoadError> {
        let names = reader
            .headers()?
            .iter()
            .map(|name| name.trim().to_owned())
            .collect::<Vec<_>>();
        if names.len() < 2 {
            return Err(LoadError::TooFewColumns);
        }

        let mut columns = vec![Vec::new(); names.len()];
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            for (column, value) in record.iter().enumerate() {
                let parsed = value
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| LoadError::NonNumeric {
                        row: row + 1,
                        column: names[column].clone(),
                        value: value.to_owned(),
                    })?;
                columns[column].push(parsed);
            }
        }

        if columns[0].is_empty() {
            return Err(LoadError::NoRows);
        }

        Ok(Self { names, columns })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn rows_len(&self) -> usize {
        self.columns[0].len()
    }

    /// Resolves which column is the regression target.
    ///
    /// `None` keeps the conventional choice, the rightmost column. Passing a
    /// header name makes the choice explicit and immune to column reordering.
    pub fn target_index(&self, name: Option<&str>) -> Result<usize, LoadError> {
        match name {
            Some(name) => self
                .names
                .iter()
                .position(|n| n == name)
                .ok_or_else(|| LoadError::UnknownColumn(name.to_owned())),
            None => Ok(self.columns.len() - 1),
        }
    }

    pub fn table(&self, target: usize) -> Result<Table<'_>, TableError> {
        Table::new(self.columns.iter().map(|c| c.as_slice()).collect(), target)
    }

    /// Feature rows in file order, the target column excluded.
    pub fn feature_rows(&self, target: usize) -> impl '_ + Iterator<Item = Vec<f64>> {
        (0..self.rows_len()).map(move |row| {
            self.columns
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != target)
                .map(|(_, c)| c[row])
                .collect()
        })
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read CSV input")]
    Csv(#[from] csv::Error),

    #[error("input must have at least two columns (features and a target)")]
    TooFewColumns,

    #[error("input has a header but no data rows")]
    NoRows,

    #[error("row {row}: column {column:?} contains a non numeric value {value:?}")]
    NonNumeric {
        row: usize,
        column: String,
        value: String,
    },

    #[error("no column named {0:?}")]
    UnknownColumn(String),
}
