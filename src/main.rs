use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = tareas::cli::Cli::parse();

    match cli.command.clone() {
        Some(tareas::cli::CliCommand::Tui) | None => {
            // The TUI owns the terminal; tracing stays a no-op there.
            let config = tareas::config::from_cli(&cli)?;
            tareas::tui::run(config)?;
        }
        Some(command) => {
            init_tracing(cli.log_filter.as_deref());
            let config = tareas::config::from_cli(&cli)?;
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            tareas::commands::execute(&config, command, &mut handle)?;
        }
    }

    Ok(())
}

fn init_tracing(directive: Option<&str>) {
    let filter = match directive {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
