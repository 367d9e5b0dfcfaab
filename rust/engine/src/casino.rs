//! Request-level entry points over the shared tables and player directory.
//!
//! Lock order is always table first, then players. The player lock is
//! never held while waiting for a table lock.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::config::EngineConfig;
use crate::errors::{CasinoError, GameError};
use crate::player::{Player, PlayerDirectory, PlayerId, PlayerRegistry};
use crate::registry::TableRegistry;
use crate::settlement::RoundSummary;
use crate::table::{Table, TableId, TableView};

#[derive(Debug)]
pub struct Casino {
    tables: TableRegistry,
    players: Mutex<PlayerRegistry>,
    config: EngineConfig,
}

impl Casino {
    pub fn new(config: EngineConfig) -> Result<Self, GameError> {
        let tables = TableRegistry::from_config(&config)?;
        Ok(Self {
            tables,
            players: Mutex::new(PlayerRegistry::new(config.starting_credits)),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn tables(&self) -> &TableRegistry {
        &self.tables
    }

    pub fn login(&self, name: &str) -> Result<PlayerId, CasinoError> {
        let id = self.players()?.login(name)?;
        tracing::info!(player_id = id, name, "player logged in");
        Ok(id)
    }

    /// Leaves the player's table, if any, then logs them out.
    ///
    /// Returns the player's final credits.
    pub fn logout(&self, player_id: PlayerId) -> Result<i64, CasinoError> {
        if self.player(player_id)?.table_id.is_some() {
            self.leave_table(player_id)?;
        }
        let credits = self.players()?.logout(player_id)?;
        tracing::info!(player_id, credits, "player logged out");
        Ok(credits)
    }

    pub fn player(&self, player_id: PlayerId) -> Result<Player, CasinoError> {
        Ok(self.players()?.get(player_id)?.clone())
    }

    pub fn join_table(&self, player_id: PlayerId, table_id: TableId) -> Result<(), CasinoError> {
        let mut table = self.tables.lock(table_id)?;
        let mut players = self.players()?;
        table.add_player(player_id, &mut *players)?;
        Ok(())
    }

    pub fn leave_table(&self, player_id: PlayerId) -> Result<Option<RoundSummary>, CasinoError> {
        self.at_player_table(player_id, |table, players| {
            table.remove_player(player_id, players)
        })
    }

    /// Places a bet after checking it against the player's credits.
    pub fn bet(&self, player_id: PlayerId, amount: u32) -> Result<(), CasinoError> {
        self.at_player_table(player_id, |table, players| {
            let credits = players.get(player_id)?.credits;
            if i64::from(amount) > credits {
                return Err(GameError::PreconditionFailed(format!(
                    "bet {} exceeds available credits {}",
                    amount, credits
                )));
            }
            table.place_bet(player_id, amount)
        })
    }

    pub fn hit(
        &self,
        player_id: PlayerId,
        hand_selector: u8,
    ) -> Result<Option<RoundSummary>, CasinoError> {
        self.at_player_table(player_id, |table, players| {
            table.hit(player_id, hand_selector, players)
        })
    }

    pub fn stand(
        &self,
        player_id: PlayerId,
        hand_selector: u8,
    ) -> Result<Option<RoundSummary>, CasinoError> {
        self.at_player_table(player_id, |table, players| {
            table.stand(player_id, hand_selector, players)
        })
    }

    pub fn view_table(&self, table_id: TableId) -> Result<TableView, CasinoError> {
        self.tables.get_by_id(table_id)
    }

    pub fn view_tables(&self) -> Result<BTreeMap<TableId, TableView>, CasinoError> {
        self.tables.view_all()
    }

    fn players(&self) -> Result<MutexGuard<'_, PlayerRegistry>, CasinoError> {
        self.players.lock().map_err(|_| CasinoError::StoragePoisoned)
    }

    /// Resolves the player's table and runs `f` holding that table's lock and
    /// then the player lock.
    fn at_player_table<T>(
        &self,
        player_id: PlayerId,
        f: impl FnOnce(&mut Table, &mut PlayerRegistry) -> Result<T, GameError>,
    ) -> Result<T, CasinoError> {
        let table_id = self.player(player_id)?.table_id.ok_or_else(|| {
            GameError::PreconditionFailed(format!("player {} is not seated", player_id))
        })?;
        let mut table = self.tables.lock(table_id)?;
        let mut players = self.players()?;
        Ok(f(&mut *table, &mut *players)?)
    }
}
