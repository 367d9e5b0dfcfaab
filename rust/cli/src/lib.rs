//! # Blackjack CLI Library
//!
//! Command-line front end for the blackjack engine. Everything runs in
//! process; there is no server.
//!
//! ## Main Entry Point
//!
//! [`run`] parses arguments and dispatches to a subcommand, writing to the
//! given streams and returning the process exit code.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["blackjack", "sim", "--rounds", "10", "--seed", "42"];
//! let code = blackjack_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `cfg`: Display the resolved configuration and value sources
//! - `tables`: Display every table's view as JSON
//! - `play`: Hot-seat play at one table from stdin
//! - `sim`: Automated rounds with optional JSONL round history

use clap::Parser;
use std::io::{BufRead, Write};

#[macro_use]
mod macros;

pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{BlackjackCli, Commands};
use commands::{
    handle_cfg_command, handle_play_command, handle_sim_command, handle_tables_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["cfg", "tables", "play", "sim"];

/// Main entry point for the CLI application, reading interactive input
/// from the process's stdin.
///
/// Returns `0` on success and `2` on any error.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdin = std::io::stdin();
    let mut stdin_lock = stdin.lock();
    run_with_input(args, &mut stdin_lock, out, err)
}

/// Same as [`run`] with an explicit input stream for `play`.
pub fn run_with_input<I, S>(
    args: I,
    stdin: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match BlackjackCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return usage_error(e, out, err),
    };
    logging::init_logging(cli.verbose);

    match cli.cmd {
        Commands::Cfg => exit_code_for!(err, handle_cfg_command(out, err)),
        Commands::Tables => exit_code_for!(err, handle_tables_command(out, err)),
        Commands::Play {
            players,
            table,
            rounds,
            seed,
        } => exit_code_for!(
            err,
            handle_play_command(&players, table, rounds, seed, out, err, stdin)
        ),
        Commands::Sim {
            rounds,
            players,
            bet,
            seed,
            output,
        } => exit_code_for!(
            err,
            handle_sim_command(rounds, players, bet, seed, output, out, err)
        ),
    }
}

fn usage_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version go to stdout and succeed
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }

    let _ = writeln!(err, "{}", e);
    let _ = writeln!(err, "Usage: blackjack <command> [options]\n");
    let _ = writeln!(err, "Commands:");
    for c in COMMANDS {
        let _ = writeln!(err, "  {}", c);
    }
    let _ = writeln!(err, "\nFor full help, run: blackjack --help");
    exit_code::ERROR
}
