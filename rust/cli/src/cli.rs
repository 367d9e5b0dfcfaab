//! Command-line argument definitions.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "blackjack", version, about = "Blackjack dealer CLI")]
pub struct BlackjackCli {
    /// Log engine events at debug level to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the resolved configuration and where each value came from
    Cfg,
    /// Show every table as JSON
    Tables,
    /// Play rounds at one table, reading bets and actions from stdin
    Play {
        /// Comma-separated player names, seated in order
        #[arg(long)]
        players: String,
        #[arg(long)]
        table: Option<u64>,
        #[arg(long)]
        rounds: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run automated rounds where every player hits below 17
    Sim {
        #[arg(long)]
        rounds: u32,
        #[arg(long)]
        players: Option<usize>,
        #[arg(long)]
        bet: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
        /// Write one JSON record per settled round
        #[arg(long)]
        output: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_play_arguments() {
        let cli = BlackjackCli::try_parse_from([
            "blackjack", "play", "--players", "ann,bob", "--rounds", "3", "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.cmd {
            Commands::Play {
                players,
                table,
                rounds,
                seed,
            } => {
                assert_eq!(players, "ann,bob");
                assert_eq!(table, None);
                assert_eq!(rounds, Some(3));
                assert_eq!(seed, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn sim_requires_rounds() {
        assert!(BlackjackCli::try_parse_from(["blackjack", "sim"]).is_err());
    }
}
