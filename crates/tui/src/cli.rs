use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "tareas",
    version,
    about = "Cliente de terminal para el API de tareas.",
    after_help = "Examples:\n  tareas                         Launch the TUI (same as `tareas tui`)\n  tareas login --email ana@example.com --password secreto\n  tareas login --register --name Ana --email ana@example.com --password secreto\n  tareas delete 64f1c0aa"
)]
pub struct Cli {
    /// Base URL of the task API (defaults to TAREAS_API_URL or http://localhost:5000)
    #[arg(long, value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Override the data directory that stores the session token
    #[arg(long, value_name = "PATH", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Tracing filter for one-shot commands (e.g. "info", "tareas=debug")
    #[arg(long = "log", value_name = "DIRECTIVE", global = true)]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Launch the keyboard-first terminal UI (default command)
    Tui,
    /// Authenticate against the API and store the session token
    Login(LoginArgs),
    /// Forget the stored session token
    Logout,
    /// Delete one or more tasks by id
    Delete(DeleteArgs),
}

#[derive(Args, Debug, Clone)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,

    /// Register a new account instead of logging in
    #[arg(long)]
    pub register: bool,

    /// Display name (required with --register)
    #[arg(long, required_if_eq("register", "true"))]
    pub name: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    /// One or more task ids to delete
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<String>,
}
