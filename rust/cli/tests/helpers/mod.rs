//! In-process CLI runner shared by the integration tests.
#![allow(dead_code)]

use std::io::Cursor;

#[derive(Debug, Clone)]
pub struct CliResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Runs the CLI with `args` (without the program name) and `input` as stdin.
pub fn run_cli(args: &[&str], input: &str) -> CliResult {
    let mut argv = vec!["blackjack"];
    argv.extend_from_slice(args);
    let mut stdin = Cursor::new(input.as_bytes().to_vec());
    let mut out = Vec::new();
    let mut err = Vec::new();
    let exit_code = blackjack_cli::run_with_input(argv, &mut stdin, &mut out, &mut err);
    CliResult {
        exit_code,
        stdout: String::from_utf8_lossy(&out).into_owned(),
        stderr: String::from_utf8_lossy(&err).into_owned(),
    }
}

/// Clears every configuration variable the CLI reads.
pub fn clear_config_env() {
    for key in [
        "BLACKJACK_CONFIG",
        "BLACKJACK_DECKS",
        "BLACKJACK_TABLES",
        "BLACKJACK_CREDITS",
        "BLACKJACK_SEED",
    ] {
        unsafe {
            std::env::remove_var(key);
        }
    }
}
