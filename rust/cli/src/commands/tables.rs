//! Prints a fresh registry's table views as JSON.

use crate::config;
use crate::error::CliError;
use crate::ui;
use blackjack_engine::registry::TableRegistry;
use std::io::Write;

pub fn handle_tables_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let cfg = match config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::write_error(err, &e.to_string())?;
            return Err(CliError::Config(e.to_string()));
        }
    };

    let registry = TableRegistry::from_config(&cfg)?;
    let views = registry.view_all()?;
    let json_str = serde_json::to_string_pretty(&views).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
