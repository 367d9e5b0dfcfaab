//! Configuration command handler.
//!
//! Prints the resolved engine configuration as JSON, with the source of
//! every value (default, file or env).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "num_decks_in_shoe": {
//!     "value": 8,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &e.to_string())?;
            return Err(CliError::Config(e.to_string()));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "num_decks_in_shoe": {
            "value": config.num_decks_in_shoe,
            "source": sources.num_decks_in_shoe,
        },
        "num_tables": {
            "value": config.num_tables,
            "source": sources.num_tables,
        },
        "starting_credits": {
            "value": config.starting_credits,
            "source": sources.starting_credits,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
