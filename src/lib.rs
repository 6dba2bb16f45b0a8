#![doc(test(attr(deny(warnings))))]

//! Expense Categorizer suggests a spending category for a free-text
//! description and records the user's confirmed choice in an owner-scoped
//! ledger.

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod model;
pub mod normalizer;
pub mod pipeline;
pub mod storage;
pub mod utils;
pub mod workflow;

use std::sync::Once;

pub use pipeline::Categorizer;
pub use workflow::{ConfirmRequest, DraftSuggestion, Interaction, SuggestionWorkflow};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Expense categorizer tracing initialized.");
    });
}
