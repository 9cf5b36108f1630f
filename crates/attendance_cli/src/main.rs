//! Attendance command-line front end.
//!
//! # Responsibility
//! - Drive the core store through import, report and summary commands.
//! - Enable file logging only when a log directory is given.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

/// Attendance tracking over the demo roster
#[derive(Parser)]
#[command(name = "attendance", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log level: trace, debug, info, warn or error (needs --log-dir)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Directory for rolling log files (enables file logging)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show attendance summary overall or for one day
    Summary(commands::summary::SummaryArgs),

    /// List students marked absent on a day
    Absentees(commands::summary::AbsenteesArgs),

    /// Import an attendance CSV and apply it to the roster
    Import(commands::import::ImportArgs),

    /// Export a per-student attendance report as CSV
    Report(commands::report::ReportArgs),

    /// Write the attendance upload template
    Template(commands::report::TemplateArgs),
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = setup_logging(cli.log_level.as_deref(), cli.log_dir.as_deref()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }

    let result = match cli.command {
        Commands::Summary(args) => commands::summary::run(args),
        Commands::Absentees(args) => commands::summary::run_absentees(args),
        Commands::Import(args) => commands::import::run(args),
        Commands::Report(args) => commands::report::run(args),
        Commands::Template(args) => commands::report::run_template(args),
    };

    if let Err(e) = result {
        log::error!("event=cli_command module=cli status=error");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn setup_logging(
    level: Option<&str>,
    log_dir: Option<&std::path::Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(log_dir) = log_dir else {
        if level.is_some() {
            return Err("--log-level requires --log-dir".into());
        }
        return Ok(());
    };
    let log_dir = if log_dir.is_absolute() {
        log_dir.to_path_buf()
    } else {
        std::env::current_dir()?.join(log_dir)
    };
    let level = level.unwrap_or(attendance_core::default_log_level());
    attendance_core::init_logging(level, &log_dir.to_string_lossy())?;
    log::info!(
        "event=cli_start module=cli status=ok version={}",
        attendance_core::core_version()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{setup_logging, Cli};
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "attendance",
            "summary",
            "--log-level",
            "warn",
            "--date",
            "2025-04-07",
        ])
        .unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("warn"));
        assert!(cli.log_dir.is_none());
    }

    #[test]
    fn log_level_without_log_dir_is_rejected() {
        let err = setup_logging(Some("debug"), None).unwrap_err();
        assert!(err.to_string().contains("--log-dir"));
        assert!(setup_logging(None, None).is_ok());
    }
}
