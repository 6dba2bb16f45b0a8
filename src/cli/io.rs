//! Prompt helpers and message shortcuts shared by command handlers.

use std::fmt;

use dialoguer::{theme::ColorfulTheme, Select};

use crate::cli::core::CommandError;
use crate::cli::output;
use crate::domain::{CategoryLabel, CategorySet};

pub fn print_info(message: impl fmt::Display) {
    output::info(message);
}

pub fn print_warning(message: impl fmt::Display) {
    output::warning(message);
}

pub fn print_error(message: impl fmt::Display) {
    output::error(message);
}

pub fn print_success(message: impl fmt::Display) {
    output::success(message);
}

/// Lets the user keep `preselected` or pick another member of the closed set.
pub fn select_category(
    theme: &ColorfulTheme,
    prompt: &str,
    categories: &CategorySet,
    preselected: Option<&CategoryLabel>,
) -> Result<CategoryLabel, CommandError> {
    let items: Vec<&str> = categories.iter().map(CategoryLabel::as_str).collect();
    let default = preselected
        .and_then(|label| categories.position(label.as_str()))
        .unwrap_or(0);
    let index = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(&items)
        .default(default)
        .interact()?;
    categories
        .label_at(index)
        .cloned()
        .ok_or_else(|| CommandError::InvalidArguments("no category selected".into()))
}
