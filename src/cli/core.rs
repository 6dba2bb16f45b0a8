//! Shell construction, dispatch, and error reporting.

use std::{io, sync::Arc};

use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;
use thiserror::Error;

use crate::{
    config::ConfigManager,
    domain::OwnerId,
    errors::{ConfigError, ImportError, ModelError, StoreError, WorkflowError},
    model::{load_categorizer, ModelPaths},
    storage::JsonLedgerStore,
    workflow::{Interaction, SuggestionWorkflow},
};

use super::commands::{all_definitions, CommandRegistry};
use super::io as cli_io;
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Errors that stop the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cannot start: {0}")]
    Model(#[from] ModelError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Prompt(#[from] dialoguer::Error),
}

/// Errors reported for a single command; the shell keeps running.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl ShellContext {
    /// Loads configuration and the model, then opens the ledger. A model that
    /// fails to load aborts startup.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        Self::with_config_manager(mode, &config_manager)
    }

    pub fn with_config_manager(
        mode: CliMode,
        config_manager: &ConfigManager,
    ) -> Result<Self, CliError> {
        let config = config_manager.load_resolved()?;
        let paths = ModelPaths {
            extractor: config.extractor_path.clone(),
            classifier: config.classifier_path.clone(),
            dictionary: config.dictionary_path.clone(),
        };
        let categorizer = load_categorizer(&paths, config.max_edit_distance)?;
        let store = JsonLedgerStore::open(&config.ledger_path)?;
        let workflow = SuggestionWorkflow::new(categorizer, Arc::new(store));
        let owner = OwnerId::new(config.owner.clone());

        Ok(Self {
            mode,
            registry: CommandRegistry::new(all_definitions()),
            theme: ColorfulTheme::default(),
            config,
            workflow,
            owner,
            interaction: Interaction::new(),
            running: true,
        })
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn prompt(&self) -> String {
        match self.interaction.draft() {
            Some(draft) => format!("expenses [{}]> ", draft.category()),
            None => "expenses> ".to_string(),
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(definition) = self.registry.get(command) {
            let handler = definition.handler;
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!("Unknown command `{}`.", input));

        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, input), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        dialoguer::Confirm::with_theme(&self.theme)
            .with_prompt("Exit shell?")
            .default(true)
            .interact()
            .map_err(CliError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                self.print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            other => {
                self.print_error(&other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn print_error(&self, message: &str) {
        cli_io::print_error(message);
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }

    pub(crate) fn print_hint(&self, message: &str) {
        cli_io::print_info(message);
    }
}
