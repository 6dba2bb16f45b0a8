//! Field checks applied before any expense reaches the ledger.

use crate::{
    domain::{CategoryLabel, CategorySet},
    errors::{Field, FieldViolation, ValidationError},
};

/// A user's decision to record an expense, as submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub description: String,
    pub amount: i64,
    pub category: String,
}

impl ConfirmRequest {
    pub fn new(description: impl Into<String>, amount: i64, category: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            amount,
            category: category.into(),
        }
    }
}

/// Request fields after every constraint has been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedExpense {
    pub description: String,
    pub amount: u64,
    pub category: CategoryLabel,
}

/// Checks description, amount and category, reporting every violation at once.
pub fn validate(
    request: &ConfirmRequest,
    categories: &CategorySet,
) -> Result<ValidatedExpense, ValidationError> {
    let mut violations = Vec::new();

    let description = request.description.trim();
    if description.is_empty() {
        violations.push(FieldViolation::new(Field::Description, "must not be empty"));
    }

    let amount = match u64::try_from(request.amount) {
        Ok(amount) if amount > 0 => Some(amount),
        _ => {
            violations.push(FieldViolation::new(
                Field::Amount,
                format!("must be a positive integer, got {}", request.amount),
            ));
            None
        }
    };

    let category = categories.get(&request.category).cloned();
    if category.is_none() {
        violations.push(FieldViolation::new(
            Field::Category,
            category_message(&request.category, categories),
        ));
    }

    match (amount, category) {
        (Some(amount), Some(category)) if violations.is_empty() => Ok(ValidatedExpense {
            description: description.to_string(),
            amount,
            category,
        }),
        _ => Err(ValidationError { violations }),
    }
}

fn category_message(submitted: &str, categories: &CategorySet) -> String {
    let mut message = if submitted.trim().is_empty() {
        format!("must be one of: {categories}")
    } else {
        format!("`{submitted}` is not one of: {categories}")
    };
    if let Some(hint) = categories.closest(submitted) {
        message.push_str(&format!(" (did you mean `{hint}`?)"));
    }
    message
}
