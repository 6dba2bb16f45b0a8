use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::{io as cli_io, output};

use super::CommandDefinition;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("help", "Show available commands", "help [command]", cmd_help),
        CommandDefinition::new(
            "categories",
            "List the categories the model can suggest",
            "categories",
            cmd_categories,
        ),
        CommandDefinition::new("whoami", "Show the active ledger owner", "whoami", cmd_whoami),
        CommandDefinition::new("exit", "Leave the shell", "exit", cmd_exit),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        let definition = context
            .registry
            .get(&name.to_ascii_lowercase())
            .ok_or_else(|| CommandError::InvalidArguments(format!("Unknown command `{name}`")))?;
        cli_io::print_info(format!("{} - {}", definition.usage, definition.description));
        return Ok(());
    }
    output::section("Available commands");
    for definition in context.registry.iter() {
        println!("  {:<12} {}", definition.name, definition.description);
    }
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Categories");
    for label in context.workflow.categories().iter() {
        println!("  {label}");
    }
    Ok(())
}

fn cmd_whoami(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    cli_io::print_info(format!(
        "Recording expenses as `{}` in {}",
        context.owner,
        context.config.ledger_path.display()
    ));
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
