//! Command-line front end for the ticket record.
//!
//! # Responsibility
//! - Stand in for the form UI: collect input, show the record, report
//!   import/export success or failure.
//! - Own the process lifecycle: config, logging, single-instance session.

use log::{error, info, warn};
use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use ticket_core::config::DEFAULT_CONFIG_FILE;
use ticket_core::{
    core_version, init_logging, AppConfig, AppSession, PropertiesTicketRepository, Ticket,
    TicketDraft, TicketField, TicketService,
};

const USAGE: &str = "usage: ticket [--config PATH] [--file PATH] <command>

commands:
  import                       load the ticket file and print its fields
  export [--number N] [--series S] [--fraction F] [--date DD/MM/YYYY] [--price P]
                               validate the given fields and write the ticket file
  defaults                     print a ticket with default values
  version                      print the core version";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Import,
    Export(TicketDraft),
    Defaults,
    Version,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliArgs {
    config: PathBuf,
    file: Option<PathBuf>,
    command: Command,
}

fn main() -> ExitCode {
    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    match args.command {
        Command::Defaults => {
            print_ticket(&Ticket::default());
            return ExitCode::SUCCESS;
        }
        Command::Version => {
            println!("ticket_core version={}", core_version());
            return ExitCode::SUCCESS;
        }
        Command::Import | Command::Export(_) => {}
    }

    let config = match AppConfig::load(&args.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    // Logging is diagnostics only; the command still runs without it.
    let log_dir = match init_logging(&config.log_level, absolute(&config.log_dir)) {
        Ok(dir) => Some(dir),
        Err(err) => {
            eprintln!("warning: {err}");
            None
        }
    };

    for key in &config.unknown_keys {
        warn!("event=config_load module=cli status=ignored key={key}");
    }

    let session = match AppSession::acquire(config.lock_port) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let data_file = args.file.unwrap_or(config.data_file);
    info!(
        "event=cli_start module=cli status=ok data_file={}",
        data_file.display()
    );
    let service = TicketService::new(PropertiesTicketRepository::new(data_file));

    let code = match args.command {
        Command::Import => match service.import_ticket() {
            Ok(ticket) => {
                print_ticket(&ticket);
                println!("ticket imported");
                ExitCode::SUCCESS
            }
            Err(err) => {
                error!("event=cli_import module=cli status=error error={err}");
                eprintln!(
                    "{}",
                    failure_line("import", &err.user_message(), log_dir.as_deref())
                );
                ExitCode::FAILURE
            }
        },
        Command::Export(draft) => match service.export_ticket(&draft) {
            Ok(_) => {
                println!("ticket exported");
                ExitCode::SUCCESS
            }
            Err(err) => {
                error!("event=cli_export module=cli status=error error={err}");
                eprintln!(
                    "{}",
                    failure_line("export", &err.user_message(), log_dir.as_deref())
                );
                ExitCode::FAILURE
            }
        },
        Command::Defaults | Command::Version => ExitCode::SUCCESS,
    };

    session.release();
    code
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliArgs, String> {
    let mut config = PathBuf::from(DEFAULT_CONFIG_FILE);
    let mut file = None;
    let mut command = None;
    let mut draft = TicketDraft::from(&Ticket::default());
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let mut value_for = |flag: &str| {
            args.next()
                .ok_or_else(|| format!("missing value for `{flag}`"))
        };
        match arg.as_str() {
            "--config" => config = PathBuf::from(value_for("--config")?),
            "--file" => file = Some(PathBuf::from(value_for("--file")?)),
            "--number" => draft.set(TicketField::Number, value_for("--number")?),
            "--series" => draft.set(TicketField::Series, value_for("--series")?),
            "--fraction" => draft.set(TicketField::Fraction, value_for("--fraction")?),
            "--date" => draft.set(TicketField::Date, value_for("--date")?),
            "--price" => draft.set(TicketField::Price, value_for("--price")?),
            "-h" | "--help" => return Err("ticket record tool".to_string()),
            other if other.starts_with('-') => return Err(format!("unknown flag `{other}`")),
            other if command.is_none() => command = Some(other.to_string()),
            other => return Err(format!("unexpected argument `{other}`")),
        }
    }

    let command = match command.as_deref() {
        Some("import") => Command::Import,
        Some("export") => Command::Export(draft),
        Some("defaults") => Command::Defaults,
        Some("version") => Command::Version,
        Some(other) => return Err(format!("unknown command `{other}`")),
        None => return Err("missing command".to_string()),
    };

    Ok(CliArgs {
        config,
        file,
        command,
    })
}

fn print_ticket(ticket: &Ticket) {
    for (field, value) in ticket.fields() {
        println!("{}={value}", field.key());
    }
}

fn failure_line(action: &str, message: &str, log_dir: Option<&Path>) -> String {
    match log_dir {
        Some(dir) => format!("{action} failed: {message} (details in {})", dir.display()),
        None => format!("{action} failed: {message}"),
    }
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
