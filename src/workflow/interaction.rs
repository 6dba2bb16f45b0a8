//! Caller-held state for one suggest → confirm round trip.

use uuid::Uuid;

use crate::{
    domain::OwnerId,
    errors::{ConfirmError, WorkflowError},
};

use super::{ConfirmRequest, DraftSuggestion, SuggestionWorkflow};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Drafted(DraftSuggestion),
    Confirmed(Uuid),
    Discarded,
}

impl InteractionState {
    pub fn name(&self) -> &'static str {
        match self {
            InteractionState::Idle => "idle",
            InteractionState::Drafted(_) => "drafted",
            InteractionState::Confirmed(_) => "confirmed",
            InteractionState::Discarded => "discarded",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            InteractionState::Confirmed(_) | InteractionState::Discarded
        )
    }
}

/// One user's pass through the workflow.
///
/// Owned by the caller (a request handler, a CLI prompt), never by the
/// workflow, so concurrent users cannot observe each other's drafts.
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    state: InteractionState,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn draft(&self) -> Option<&DraftSuggestion> {
        match &self.state {
            InteractionState::Drafted(draft) => Some(draft),
            _ => None,
        }
    }

    /// Idle|Drafted → Drafted. A fresh suggestion replaces any earlier draft;
    /// when the text yields no suggestion the interaction returns to Idle.
    pub fn suggest(
        &mut self,
        workflow: &SuggestionWorkflow,
        raw: &str,
    ) -> Result<Option<&DraftSuggestion>, WorkflowError> {
        self.ensure_open("suggest")?;
        self.state = match workflow.suggest(raw) {
            Some(draft) => InteractionState::Drafted(draft),
            None => InteractionState::Idle,
        };
        Ok(self.draft())
    }

    /// Idle|Drafted → Confirmed. A rejected request leaves the state untouched
    /// so the caller can correct it and retry.
    pub fn confirm(
        &mut self,
        workflow: &SuggestionWorkflow,
        request: &ConfirmRequest,
        owner: &OwnerId,
    ) -> Result<Uuid, WorkflowError> {
        self.ensure_open("confirm")?;
        let id = workflow.confirm(request, owner)?;
        self.state = InteractionState::Confirmed(id);
        Ok(id)
    }

    /// Confirms the pending draft with `amount`, optionally overriding its category.
    pub fn accept(
        &mut self,
        workflow: &SuggestionWorkflow,
        amount: i64,
        category_override: Option<&str>,
        owner: &OwnerId,
    ) -> Result<Uuid, WorkflowError> {
        let request = match &self.state {
            InteractionState::Drafted(draft) => draft
                .clone()
                .into_confirmation(amount, category_override),
            other => {
                return Err(WorkflowError::InvalidTransition {
                    action: "accept a draft",
                    state: other.name(),
                })
            }
        };
        self.confirm(workflow, &request, owner)
    }

    /// Drafted → Discarded.
    pub fn discard(&mut self, workflow: &SuggestionWorkflow) -> Result<(), WorkflowError> {
        match std::mem::take(&mut self.state) {
            InteractionState::Drafted(draft) => {
                workflow.discard(draft);
                self.state = InteractionState::Discarded;
                Ok(())
            }
            other => {
                let state = other.name();
                self.state = other;
                Err(WorkflowError::InvalidTransition {
                    action: "discard",
                    state,
                })
            }
        }
    }

    fn ensure_open(&self, action: &'static str) -> Result<(), WorkflowError> {
        if self.state.is_terminal() {
            return Err(WorkflowError::InvalidTransition {
                action,
                state: self.state.name(),
            });
        }
        Ok(())
    }
}

impl WorkflowError {
    /// The underlying confirmation failure, when there is one.
    pub fn as_confirm(&self) -> Option<&ConfirmError> {
        match self {
            WorkflowError::Confirm(err) => Some(err),
            WorkflowError::InvalidTransition { .. } => None,
        }
    }
}
