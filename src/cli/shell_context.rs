use dialoguer::theme::ColorfulTheme;

use crate::{
    config::Config,
    domain::OwnerId,
    workflow::{Interaction, SuggestionWorkflow},
};

use super::commands::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub config: Config,
    pub workflow: SuggestionWorkflow,
    pub owner: OwnerId,
    /// The user's pending suggest → confirm round trip, if any.
    pub interaction: Interaction,
    pub running: bool,
}

impl ShellContext {
    pub fn status(&self) -> String {
        format!(
            "ShellContext {{ running: {}, owner: {}, interaction: {} }}",
            self.running,
            self.owner,
            self.interaction.state().name()
        )
    }
}
