//! Two-step suggest/confirm protocol turning a prediction into a ledger entry.
//!
//! Nothing here keeps a server-side session: the draft travels back to the
//! caller, and `confirm` is self-contained.

pub mod import;
pub mod interaction;
pub mod validation;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    domain::{CategoryLabel, CategorySet, Clock, ExpenseEntry, OwnerId, SystemClock},
    errors::{ConfirmError, StoreError},
    normalizer::NormalizedText,
    pipeline::Categorizer,
    storage::{clamp_limit, LedgerStore},
};

pub use import::{ImportReport, RejectedRow};
pub use interaction::{Interaction, InteractionState};
pub use validation::{validate, ConfirmRequest, ValidatedExpense};

/// Ephemeral category prediction awaiting the user's decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftSuggestion {
    original: String,
    normalized: NormalizedText,
    category: CategoryLabel,
}

impl DraftSuggestion {
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn normalized(&self) -> &NormalizedText {
        &self.normalized
    }

    /// The predicted label. Advisory only: `confirm` accepts any member of the set.
    pub fn category(&self) -> &CategoryLabel {
        &self.category
    }

    /// Builds a confirmation from the original text, keeping the predicted
    /// category unless `category_override` is given.
    pub fn into_confirmation(self, amount: i64, category_override: Option<&str>) -> ConfirmRequest {
        let category = match category_override {
            Some(category) => category.to_string(),
            None => self.category.as_str().to_string(),
        };
        ConfirmRequest {
            description: self.original,
            amount,
            category,
        }
    }
}

/// Caller-facing entry point for the categorization workflow.
#[derive(Clone)]
pub struct SuggestionWorkflow {
    categorizer: Categorizer,
    store: Arc<dyn LedgerStore>,
    clock: Arc<dyn Clock>,
}

impl SuggestionWorkflow {
    pub fn new(categorizer: Categorizer, store: Arc<dyn LedgerStore>) -> Self {
        Self::with_clock(categorizer, store, Arc::new(SystemClock))
    }

    pub fn with_clock(
        categorizer: Categorizer,
        store: Arc<dyn LedgerStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            categorizer,
            store,
            clock,
        }
    }

    pub fn categories(&self) -> &CategorySet {
        self.categorizer.categories()
    }

    pub fn categorizer(&self) -> &Categorizer {
        &self.categorizer
    }

    /// Normalizes `raw` and predicts a category.
    ///
    /// Returns `None` when nothing survives normalization; the model is not
    /// consulted in that case.
    pub fn suggest(&self, raw: &str) -> Option<DraftSuggestion> {
        let normalized = self.categorizer.normalize(raw);
        if normalized.is_empty() {
            debug!("No suggestion: input is empty after normalization");
            return None;
        }
        let category = self.categorizer.categorize(&normalized);
        debug!(normalized = %normalized, category = %category, "Category suggested");
        Some(DraftSuggestion {
            original: raw.to_string(),
            normalized,
            category,
        })
    }

    /// Validates `request` and records it for `owner`, returning the new entry's id.
    ///
    /// Nothing is written unless every field is valid.
    pub fn confirm(&self, request: &ConfirmRequest, owner: &OwnerId) -> Result<Uuid, ConfirmError> {
        self.confirm_at(request, owner, self.clock.now())
    }

    pub(crate) fn confirm_at(
        &self,
        request: &ConfirmRequest,
        owner: &OwnerId,
        created_at: DateTime<Utc>,
    ) -> Result<Uuid, ConfirmError> {
        let valid = validate(request, self.categories()).map_err(|err| {
            warn!(owner = %owner, %err, "Expense rejected");
            err
        })?;
        let entry = ExpenseEntry {
            id: Uuid::new_v4(),
            description: valid.description,
            amount: valid.amount,
            category: valid.category,
            owner: owner.clone(),
            created_at,
        };
        let category = entry.category.clone();
        let amount = entry.amount;
        let id = self.store.create(entry)?;
        info!(%id, owner = %owner, %category, amount, "Expense confirmed");
        Ok(id)
    }

    /// Abandons a draft. No side effects beyond a trace event.
    pub fn discard(&self, draft: DraftSuggestion) {
        debug!(category = %draft.category, "Draft discarded");
    }

    pub fn recent(&self, owner: &OwnerId, limit: usize) -> Result<Vec<ExpenseEntry>, StoreError> {
        self.store.list_recent(owner, clamp_limit(limit))
    }

    pub fn delete(&self, owner: &OwnerId, id: Uuid) -> Result<bool, StoreError> {
        let deleted = self.store.delete(id, owner)?;
        if deleted {
            info!(%id, owner = %owner, "Expense deleted");
        } else {
            debug!(%id, owner = %owner, "Nothing to delete");
        }
        Ok(deleted)
    }
}
