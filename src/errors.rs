use std::{fmt, path::PathBuf};

use thiserror::Error;

/// Fatal failure while loading the frozen model artifacts at startup.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model artifact `{}` not found", path.display())]
    Missing { path: PathBuf },
    #[error("failed to read model artifact `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("model artifact `{}` is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("model artifact `{}` has unsupported schema: {reason}", path.display())]
    Schema { path: PathBuf, reason: String },
    #[error("model artifacts are incompatible: {0}")]
    Incompatible(String),
}

/// Errors surfaced by ledger store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Ledger file is from a newer schema version ({0})")]
    UnsupportedSchema(u32),
    #[error("Ledger store unavailable: {0}")]
    Unavailable(String),
}

/// Field of a confirmation request that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Description,
    Amount,
    Category,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::Description => "description",
            Field::Amount => "amount",
            Field::Category => "category",
        };
        f.write_str(label)
    }
}

/// A single violated constraint together with the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: Field,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Recoverable, caller-visible rejection of a confirmation request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid expense: {}", render_violations(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn fields(&self) -> Vec<Field> {
        self.violations.iter().map(|v| v.field).collect()
    }

    pub fn violates(&self, field: Field) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

fn render_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Outcome of a failed `confirm` call.
#[derive(Debug, Error)]
pub enum ConfirmError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Misuse of the caller-held suggest/confirm state machine.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
    #[error(transparent)]
    Confirm(#[from] ConfirmError),
}

/// Errors that abort a bulk import before any row is processed.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Configuration persistence failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Serde(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_lists_every_violation() {
        let err = ValidationError {
            violations: vec![
                FieldViolation::new(Field::Description, "must not be empty"),
                FieldViolation::new(Field::Amount, "must be a positive integer, got -10"),
            ],
        };
        let message = err.to_string();
        assert!(message.contains("description: must not be empty"));
        assert!(message.contains("amount: must be a positive integer"));
        assert!(err.violates(Field::Amount));
        assert!(!err.violates(Field::Category));
    }
}
