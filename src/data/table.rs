use csv::StringRecord;
use serde::de::DeserializeOwned;
use std::io::Read;

use crate::core::error::{DashboardError, Result};
use crate::core::types::DatasetKind;
use crate::data::normalize::normalize_headers;

/// A dataset as read from disk: normalized headers plus raw string rows.
///
/// Tables are immutable once loaded and shared through the dataset cache;
/// typed access goes through [`Table::typed`], which checks the required
/// columns before decoding any row.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    kind: DatasetKind,
    headers: StringRecord,
    rows: Vec<StringRecord>,
}

/// A record type that can be decoded from a normalized [`Table`].
pub trait DatasetRecord: DeserializeOwned {
    /// Dataset the record belongs to
    const KIND: DatasetKind;

    /// Columns that must exist after normalization and renaming
    const REQUIRED_COLUMNS: &'static [&'static str];
}

impl Table {
    /// Read a comma-separated source, normalizing its header row.
    pub fn from_reader<R: Read>(kind: DatasetKind, reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let raw_headers = reader.headers()?.clone();
        let headers = StringRecord::from(normalize_headers(raw_headers.iter()));

        let rows = reader
            .records()
            .collect::<std::result::Result<Vec<_>, csv::Error>>()?;

        Ok(Self {
            kind,
            headers,
            rows,
        })
    }

    pub fn kind(&self) -> DatasetKind {
        self.kind
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.headers.iter().collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rename `from` to `to`. Returns false when `from` is absent.
    pub fn rename(&mut self, from: &str, to: &str) -> bool {
        match self.headers.iter().position(|h| h == from) {
            Some(index) => self.rename_at(index, to),
            None => false,
        }
    }

    /// Rename the column at `index`. Returns false when out of range.
    pub fn rename_at(&mut self, index: usize, to: &str) -> bool {
        if index >= self.headers.len() {
            return false;
        }

        let renamed: StringRecord = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| if i == index { to } else { h })
            .collect();
        self.headers = renamed;
        true
    }

    /// Fail with `MissingColumn` on the first required column not present.
    pub fn require_columns(&self, columns: &[&str]) -> Result<()> {
        match columns.iter().find(|column| !self.has_column(column)) {
            Some(missing) => Err(DashboardError::MissingColumn {
                dataset: self.kind.name().to_string(),
                column: (*missing).to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Decode every row into `T` after validating its required columns.
    pub fn typed<T: DatasetRecord>(&self) -> Result<Vec<T>> {
        if T::KIND != self.kind {
            return Err(DashboardError::InvalidArgument(format!(
                "cannot decode {} records from the {} table",
                T::KIND,
                self.kind
            )));
        }
        self.require_columns(T::REQUIRED_COLUMNS)?;

        self.rows
            .iter()
            .map(|row| row.deserialize::<T>(Some(&self.headers)).map_err(Into::into))
            .collect()
    }
}
