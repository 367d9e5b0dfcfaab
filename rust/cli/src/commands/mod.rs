//! Command handler modules for the blackjack CLI.
//!
//! Each command lives in its own file and follows the same pattern:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) and input (`&mut dyn BufRead`) passed in
//! - Errors propagated via the `CliError` enum

pub mod cfg;
pub mod play;
pub mod sim;
pub mod tables;

pub use cfg::handle_cfg_command;
pub use play::handle_play_command;
pub use sim::handle_sim_command;
pub use tables::handle_tables_command;
