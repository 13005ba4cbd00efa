use std::fmt;
use std::io::Write;

use anyhow::{anyhow, Context, Result};

use crate::cli::{CliCommand, DeleteArgs, LoginArgs};
use crate::config::AppConfig;
use tareas_core::api::{ApiClient, TaskApi};
use tareas_core::session::SessionStore;

pub fn execute<W: Write>(config: &AppConfig, command: CliCommand, mut writer: W) -> Result<()> {
    match command {
        CliCommand::Login(args) => handle_login(config, &args, &mut writer),
        CliCommand::Logout => handle_logout(config, &mut writer),
        CliCommand::Delete(args) => handle_delete(config, &args, &mut writer),
        CliCommand::Tui => Err(anyhow!("launch the interactive surface directly")),
    }
}

fn build_client(config: &AppConfig) -> Result<(ApiClient, SessionStore)> {
    let session = SessionStore::new(config);
    let api = ApiClient::new(config, session.clone()).context("Failed to build the HTTP client")?;
    Ok((api, session))
}

fn handle_login<W: Write>(config: &AppConfig, args: &LoginArgs, mut writer: W) -> Result<()> {
    let (api, session) = build_client(config)?;
    let token = if args.register {
        let name = args.name.as_deref().unwrap_or_default();
        api.register(name, &args.email, &args.password)
    } else {
        api.login(&args.email, &args.password)
    }
    .map_err(|err| anyhow!(err.auth_message()))?;

    session.save(&token)?;
    writeln!(writer, "Sesión iniciada como {}", args.email)?;
    Ok(())
}

fn handle_logout<W: Write>(config: &AppConfig, mut writer: W) -> Result<()> {
    let session = SessionStore::new(config);
    session.clear()?;
    writeln!(writer, "Sesión cerrada")?;
    Ok(())
}

fn handle_delete<W: Write>(config: &AppConfig, args: &DeleteArgs, mut writer: W) -> Result<()> {
    let (api, _session) = build_client(config)?;
    let mut summary = DeleteSummary::default();
    for id in &args.ids {
        match api.delete(id) {
            Ok(()) => summary.deleted += 1,
            Err(err) if err.is_auth() => {
                return Err(anyhow!(err).context("No hay sesión activa; ejecuta `tareas login`"));
            }
            Err(err) => summary.failed.push((id.clone(), err.to_string())),
        }
    }
    summary.write_to(&mut writer)
}

#[derive(Debug, Default)]
struct DeleteSummary {
    deleted: usize,
    failed: Vec<(String, String)>,
}

impl DeleteSummary {
    fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writeln!(writer, "{}", SummaryLine::deleted(self.deleted))?;
        for (id, reason) in &self.failed {
            writeln!(writer, "No se pudo eliminar {}: {}", id, reason)?;
        }
        Ok(())
    }
}

enum SummaryLine {
    Deleted(usize),
    NoneDeleted,
}

impl SummaryLine {
    fn deleted(count: usize) -> Self {
        if count > 0 {
            SummaryLine::Deleted(count)
        } else {
            SummaryLine::NoneDeleted
        }
    }
}

impl fmt::Display for SummaryLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryLine::Deleted(count) => {
                write!(
                    f,
                    "{} tarea{} eliminada{}",
                    count,
                    if *count == 1 { "" } else { "s" },
                    if *count == 1 { "" } else { "s" }
                )
            }
            SummaryLine::NoneDeleted => write!(f, "Ninguna tarea eliminada"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn render(summary: &DeleteSummary) -> String {
        let mut buffer = Vec::new();
        summary.write_to(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn summary_counts_deletions() {
        let summary = DeleteSummary {
            deleted: 2,
            failed: Vec::new(),
        };
        assert_eq!(render(&summary), "2 tareas eliminadas\n");

        let one = DeleteSummary {
            deleted: 1,
            failed: Vec::new(),
        };
        assert_eq!(render(&one), "1 tarea eliminada\n");
    }

    #[test]
    fn summary_lists_failures_with_reasons() {
        let summary = DeleteSummary {
            deleted: 0,
            failed: vec![(String::from("9"), String::from("server error 404: no"))],
        };
        let output = render(&summary);
        assert!(output.starts_with("Ninguna tarea eliminada\n"));
        assert!(output.contains("No se pudo eliminar 9: server error 404: no"));
    }
}
