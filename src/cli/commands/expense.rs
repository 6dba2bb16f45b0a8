use std::path::Path;

use uuid::Uuid;

use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::{io as cli_io, output};
use crate::domain::ExpenseEntry;
use crate::errors::{ConfirmError, WorkflowError};
use crate::workflow::{ConfirmRequest, Interaction};

use super::{parse_amount, usage_error, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "suggest",
            "Predict a category for a description",
            "suggest [--scores] <description...>",
            cmd_suggest,
        ),
        CommandDefinition::new(
            "accept",
            "Record the pending suggestion",
            "accept <amount> [category]",
            cmd_accept,
        ),
        CommandDefinition::new(
            "discard",
            "Drop the pending suggestion",
            "discard",
            cmd_discard,
        ),
        CommandDefinition::new(
            "add",
            "Suggest, pick a category, and record in one step",
            "add <amount> <description...>",
            cmd_add,
        ),
        CommandDefinition::new(
            "confirm",
            "Record an expense with an explicit category",
            "confirm <amount> <category> <description...>",
            cmd_confirm,
        ),
        CommandDefinition::new(
            "recent",
            "List your most recent expenses",
            "recent [limit]",
            cmd_recent,
        ),
        CommandDefinition::new("delete", "Delete one of your expenses", "delete <id>", cmd_delete),
        CommandDefinition::new(
            "import",
            "Import Description,Amount,Category[,Date] rows from CSV",
            "import <file.csv>",
            cmd_import,
        ),
    ]
}

fn cmd_suggest(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (show_scores, words) = match args {
        ["--scores", rest @ ..] => (true, rest),
        _ => (false, args),
    };
    if words.is_empty() {
        return Err(usage_error("suggest [--scores] <description...>"));
    }
    let text = words.join(" ");
    reset_if_finished(context);
    match context.interaction.suggest(&context.workflow, &text)? {
        Some(draft) => {
            cli_io::print_success(format!("Suggested category: {}", draft.category()));
            if show_scores {
                let rows: Vec<Vec<String>> = context
                    .workflow
                    .categorizer()
                    .scores(draft.normalized())
                    .into_iter()
                    .map(|(label, score)| vec![label.to_string(), format!("{score:.4}")])
                    .collect();
                println!("{}", output::render_table(&["Category", "Score"], &rows));
            }
            cli_io::print_info("Use `accept <amount> [category]` to record it or `discard`.");
        }
        None => cli_io::print_warning("Nothing left to categorize after cleaning the text."),
    }
    Ok(())
}

fn cmd_accept(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = "accept <amount> [category]";
    let (amount, category) = match args {
        [amount] => (parse_amount(amount)?, None),
        [amount, category] => (parse_amount(amount)?, Some(*category)),
        _ => return Err(usage_error(usage)),
    };
    let result = context
        .interaction
        .accept(&context.workflow, amount, category, &context.owner);
    finish_confirmation(context, result)
}

fn cmd_discard(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.interaction.discard(&context.workflow)?;
    context.interaction = Interaction::new();
    cli_io::print_info("Suggestion discarded.");
    Ok(())
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = "add <amount> <description...>";
    let [amount, description @ ..] = args else {
        return Err(usage_error(usage));
    };
    if description.is_empty() {
        return Err(usage_error(usage));
    }
    let amount = parse_amount(amount)?;
    let text = description.join(" ");

    reset_if_finished(context);
    let predicted = context
        .interaction
        .suggest(&context.workflow, &text)?
        .map(|draft| draft.category().clone());

    let category = match (context.mode, predicted) {
        (CliMode::Script, Some(predicted)) => predicted,
        (CliMode::Script, None) => {
            return Err(CommandError::InvalidArguments(
                "no suggestion for this text; use `confirm <amount> <category> <description...>`"
                    .into(),
            ))
        }
        (CliMode::Interactive, predicted) => cli_io::select_category(
            &context.theme,
            "Category",
            context.workflow.categories(),
            predicted.as_ref(),
        )?,
    };

    let request = ConfirmRequest::new(text, amount, category.as_str());
    let result = context
        .interaction
        .confirm(&context.workflow, &request, &context.owner);
    finish_confirmation(context, result)
}

fn cmd_confirm(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [amount, category, description @ ..] = args else {
        return Err(usage_error("confirm <amount> <category> <description...>"));
    };
    let request = ConfirmRequest::new(description.join(" "), parse_amount(amount)?, *category);
    reset_if_finished(context);
    let result = context
        .interaction
        .confirm(&context.workflow, &request, &context.owner);
    finish_confirmation(context, result)
}

fn cmd_recent(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let limit = match args {
        [] => context.config.recent_limit,
        [raw] => raw.parse().map_err(|_| {
            CommandError::InvalidArguments(format!("`{raw}` is not a valid limit"))
        })?,
        _ => return Err(usage_error("recent [limit]")),
    };
    let entries = context.workflow.recent(&context.owner, limit)?;
    if entries.is_empty() {
        cli_io::print_info("No expenses recorded yet.");
        return Ok(());
    }
    output::section(format!("Recent expenses for {}", context.owner));
    let rows: Vec<Vec<String>> = entries.iter().map(entry_row).collect();
    println!(
        "{}",
        output::render_table(&["ID", "Date", "Amount", "Category", "Description"], &rows)
    );
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(usage_error("delete <id>"));
    };
    let id = Uuid::parse_str(raw)
        .map_err(|_| CommandError::InvalidArguments(format!("`{raw}` is not an expense id")))?;
    if context.workflow.delete(&context.owner, id)? {
        cli_io::print_success(format!("Deleted expense {id}."));
    } else {
        cli_io::print_warning(format!("No expense {id} found for {}.", context.owner));
    }
    Ok(())
}

fn cmd_import(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [path] = args else {
        return Err(usage_error("import <file.csv>"));
    };
    let report = context
        .workflow
        .import_csv(Path::new(path), &context.owner)?;
    cli_io::print_success(format!("Imported {} expense(s).", report.imported.len()));
    for rejected in &report.rejected {
        cli_io::print_warning(format!("Line {}: {}", rejected.line, rejected.reason));
    }
    Ok(())
}

fn entry_row(entry: &ExpenseEntry) -> Vec<String> {
    vec![
        entry.id.to_string(),
        entry.created_at.format("%Y-%m-%d %H:%M").to_string(),
        entry.amount.to_string(),
        entry.category.to_string(),
        entry.description.clone(),
    ]
}

/// A confirmed or discarded interaction cannot move again; start a new round.
fn reset_if_finished(context: &mut ShellContext) {
    if context.interaction.state().is_terminal() {
        context.interaction = Interaction::new();
    }
}

fn finish_confirmation(
    context: &mut ShellContext,
    result: Result<Uuid, WorkflowError>,
) -> CommandResult {
    match result {
        Ok(id) => {
            context.interaction = Interaction::new();
            cli_io::print_success(format!("Recorded expense {id}."));
            Ok(())
        }
        Err(WorkflowError::Confirm(ConfirmError::Validation(err))) => {
            for violation in &err.violations {
                cli_io::print_error(violation);
            }
            if context.interaction.draft().is_some() {
                cli_io::print_info("The suggestion is still pending; correct and retry.");
            }
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
