//! Bulk import of historical expenses from CSV.

use std::{fs::File, path::Path};

use chrono::{DateTime, NaiveDate, Utc};
use csv::{Position, ReaderBuilder, StringRecord, Trim};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    domain::OwnerId,
    errors::{ConfirmError, ImportError},
};

use super::{ConfirmRequest, SuggestionWorkflow};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A CSV row that did not become a ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    /// 1-based line in the file where the row starts.
    pub line: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: Vec<Uuid>,
    pub rejected: Vec<RejectedRow>,
}

struct Columns {
    description: usize,
    amount: usize,
    category: usize,
    date: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self, ImportError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header.trim().eq_ignore_ascii_case(name))
        };
        Ok(Self {
            description: find("description").ok_or(ImportError::MissingColumn("Description"))?,
            amount: find("amount").ok_or(ImportError::MissingColumn("Amount"))?,
            category: find("category").ok_or(ImportError::MissingColumn("Category"))?,
            date: find("date"),
        })
    }
}

impl SuggestionWorkflow {
    /// Imports `Description, Amount, Category[, Date]` rows for `owner`.
    ///
    /// Each row passes the same validation as [`SuggestionWorkflow::confirm`].
    /// Invalid rows are skipped and reported; a store failure aborts the import.
    pub fn import_csv(&self, path: &Path, owner: &OwnerId) -> Result<ImportReport, ImportError> {
        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(file);
        let columns = Columns::from_headers(reader.headers()?)?;

        let mut report = ImportReport::default();
        for (index, record) in reader.records().enumerate() {
            // Quoted fields may span lines, so the record count is only a fallback.
            let fallback = index + 2;
            let record = match record {
                Ok(record) => record,
                Err(err) => {
                    report.rejected.push(RejectedRow {
                        line: err.position().map_or(fallback, line_of),
                        reason: err.to_string(),
                    });
                    continue;
                }
            };
            let line = record.position().map_or(fallback, line_of);
            match self.import_row(&record, &columns, owner) {
                Ok(id) => report.imported.push(id),
                Err(RowError::Rejected(reason)) => {
                    warn!(line, %reason, "Import row skipped");
                    report.rejected.push(RejectedRow { line, reason });
                }
                Err(RowError::Store(err)) => return Err(err.into()),
            }
        }

        info!(
            path = %path.display(),
            owner = %owner,
            imported = report.imported.len(),
            rejected = report.rejected.len(),
            "Import finished"
        );
        Ok(report)
    }

    fn import_row(
        &self,
        record: &StringRecord,
        columns: &Columns,
        owner: &OwnerId,
    ) -> Result<Uuid, RowError> {
        let field = |index: usize| record.get(index).unwrap_or("");
        let raw_amount = field(columns.amount);
        let amount: i64 = raw_amount
            .parse()
            .map_err(|_| RowError::Rejected(format!("amount: `{raw_amount}` is not an integer")))?;
        let created_at = match columns.date.map(field).filter(|raw| !raw.is_empty()) {
            Some(raw) => parse_date(raw)?,
            None => self.clock.now(),
        };
        let request = ConfirmRequest::new(field(columns.description), amount, field(columns.category));
        self.confirm_at(&request, owner, created_at)
            .map_err(|err| match err {
                ConfirmError::Validation(err) => RowError::Rejected(err.to_string()),
                ConfirmError::Store(err) => RowError::Store(err),
            })
    }
}

enum RowError {
    Rejected(String),
    Store(crate::errors::StoreError),
}

fn line_of(position: &Position) -> usize {
    usize::try_from(position.line()).unwrap_or(usize::MAX)
}

fn parse_date(raw: &str) -> Result<DateTime<Utc>, RowError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| RowError::Rejected(format!("date: `{raw}` is not YYYY-MM-DD")))
}
