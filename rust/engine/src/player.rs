use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::table::TableId;

pub type PlayerId = u64;

/// Default credits for a newly created player
pub const STARTING_CREDITS: i64 = 1_000;

/// A player's persistent identity and balance, independent of any table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub credits: i64,
    /// Table the player is seated at, `None` while in the lobby
    pub table_id: Option<TableId>,
    pub online: bool,
}

/// Narrow view of the player records a table needs.
///
/// Tables read players, move credits during settlement and keep each
/// player's table membership in sync with their own seat map.
pub trait PlayerDirectory {
    fn get(&self, id: PlayerId) -> Result<&Player, GameError>;

    /// Adds `delta` (possibly negative) to the player's credits and returns
    /// the new balance.
    fn adjust_credits(&mut self, id: PlayerId, delta: i64) -> Result<i64, GameError>;

    fn set_table(&mut self, id: PlayerId, table: Option<TableId>) -> Result<(), GameError>;
}

/// In-memory player directory with name-based login.
#[derive(Debug, Clone)]
pub struct PlayerRegistry {
    all: BTreeMap<PlayerId, Player>,
    name_to_id: HashMap<String, PlayerId>,
    next_id: PlayerId,
    starting_credits: i64,
}

impl Default for PlayerRegistry {
    fn default() -> Self {
        Self::new(STARTING_CREDITS)
    }
}

impl PlayerRegistry {
    pub fn new(starting_credits: i64) -> Self {
        Self {
            all: BTreeMap::new(),
            name_to_id: HashMap::new(),
            next_id: 1,
            starting_credits,
        }
    }

    /// Logs a player in by name, creating the record on first login.
    pub fn login(&mut self, name: &str) -> Result<PlayerId, GameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::InvalidArgument(
                "player name must not be empty".to_string(),
            ));
        }
        let id = match self.name_to_id.get(name) {
            Some(&id) => id,
            None => {
                let id = self.next_id;
                self.next_id += 1;
                self.all.insert(
                    id,
                    Player {
                        id,
                        name: name.to_string(),
                        credits: self.starting_credits,
                        table_id: None,
                        online: false,
                    },
                );
                self.name_to_id.insert(name.to_string(), id);
                tracing::debug!(player_id = id, name, "created player");
                id
            }
        };
        if let Some(player) = self.all.get_mut(&id) {
            player.online = true;
        }
        Ok(id)
    }

    /// Marks the player offline and returns their credits.
    pub fn logout(&mut self, id: PlayerId) -> Result<i64, GameError> {
        let player = self.get_mut(id)?;
        if !player.online {
            return Err(GameError::PreconditionFailed(format!(
                "player {} is not logged in",
                id
            )));
        }
        player.online = false;
        Ok(player.credits)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Player> {
        self.name_to_id.get(name).and_then(|id| self.all.get(id))
    }

    pub fn online(&self) -> impl Iterator<Item = &Player> {
        self.all.values().filter(|p| p.online)
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    fn get_mut(&mut self, id: PlayerId) -> Result<&mut Player, GameError> {
        self.all.get_mut(&id).ok_or(GameError::PlayerNotFound(id))
    }
}

impl PlayerDirectory for PlayerRegistry {
    fn get(&self, id: PlayerId) -> Result<&Player, GameError> {
        self.all.get(&id).ok_or(GameError::PlayerNotFound(id))
    }

    fn adjust_credits(&mut self, id: PlayerId, delta: i64) -> Result<i64, GameError> {
        let player = self.get_mut(id)?;
        player.credits += delta;
        Ok(player.credits)
    }

    fn set_table(&mut self, id: PlayerId, table: Option<TableId>) -> Result<(), GameError> {
        self.get_mut(id)?.table_id = table;
        Ok(())
    }
}
