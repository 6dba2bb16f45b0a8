//! Interactive and scripted command shell over the suggestion workflow.

pub mod commands;
pub mod core;
pub mod io;
pub mod output;
mod shell;
pub mod shell_context;

pub use shell::{run_cli, SCRIPT_MODE_ENV};
