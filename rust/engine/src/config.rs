use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::player::STARTING_CREDITS;

pub const DEFAULT_NUM_DECKS: usize = 8;
pub const DEFAULT_NUM_TABLES: usize = 6;

/// Startup parameters for a casino.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub num_decks_in_shoe: usize,
    pub num_tables: usize,
    pub starting_credits: i64,
    /// Base seed; table `n` builds its shoes from `seed + n`
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            num_decks_in_shoe: DEFAULT_NUM_DECKS,
            num_tables: DEFAULT_NUM_TABLES,
            starting_credits: STARTING_CREDITS,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.num_decks_in_shoe == 0 {
            return Err(GameError::InvalidArgument(
                "num_decks_in_shoe must be at least 1".to_string(),
            ));
        }
        if self.num_tables == 0 {
            return Err(GameError::InvalidArgument(
                "num_tables must be at least 1".to_string(),
            ));
        }
        if self.starting_credits <= 0 {
            return Err(GameError::InvalidArgument(
                "starting_credits must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
