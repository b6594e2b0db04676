use crate::models::{RawEntry, Record, TableView, View};
use crate::normalizer::{Rejection, normalize_at};
use chrono::NaiveDate;

/// Append-only history of daily records, kept in entry order.
#[derive(Debug, Clone, Default)]
pub struct CycleLog {
    records: Vec<Record>,
}

impl CycleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: Record) -> &[Record] {
        self.records.push(record);
        &self.records
    }

    pub fn all(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Date of the first entered record, which is not necessarily the earliest.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.first().map(|record| record.date)
    }

    /// Normalizes against the current state and appends on success.
    ///
    /// An idle submission yields the unchanged records; any other rejection
    /// leaves the log untouched and is returned to the caller.
    pub fn submit(&mut self, raw: &RawEntry, today: NaiveDate) -> Result<&[Record], Rejection> {
        match normalize_at(raw, self.first_date(), today) {
            Ok(record) => Ok(self.append(record)),
            Err(rejection) if rejection.is_idle() => Ok(self.all()),
            Err(rejection) => Err(rejection),
        }
    }

    pub fn table(&self, view: View) -> TableView {
        let columns = view.columns();
        TableView {
            columns: columns.iter().map(|c| c.name().to_string()).collect(),
            rows: self
                .records
                .iter()
                .map(|record| columns.iter().map(|&c| record.cell(c)).collect())
                .collect(),
        }
    }
}
