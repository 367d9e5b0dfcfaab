//! The fixed set of tables a casino runs.
//!
//! Membership never changes after construction, so the map itself is read
//! without synchronization; each table is guarded by its own lock and no
//! operation ever holds two table locks at once.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::config::EngineConfig;
use crate::errors::{CasinoError, GameError};
use crate::table::{Table, TableId, TableView};

#[derive(Debug)]
pub struct TableRegistry {
    tables: BTreeMap<TableId, Mutex<Table>>,
}

impl TableRegistry {
    /// Builds tables `1..=num_tables`, each with its own shoe.
    pub fn new(num_tables: usize, num_decks: usize, seed: Option<u64>) -> Result<Self, GameError> {
        if num_tables == 0 {
            return Err(GameError::InvalidArgument(
                "number of tables must be at least 1".to_string(),
            ));
        }
        let mut tables = BTreeMap::new();
        for id in 1..=num_tables as TableId {
            let table = Table::new(id, num_decks, seed.map(|s| s.wrapping_add(id)))?;
            tables.insert(id, Mutex::new(table));
        }
        tracing::info!(num_tables, num_decks, "tables ready");
        Ok(Self { tables })
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, GameError> {
        config.validate()?;
        Self::new(config.num_tables, config.num_decks_in_shoe, config.seed)
    }

    pub fn ids(&self) -> Vec<TableId> {
        self.tables.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn contains(&self, id: TableId) -> bool {
        self.tables.contains_key(&id)
    }

    /// Locks one table for exclusive use.
    pub fn lock(&self, id: TableId) -> Result<MutexGuard<'_, Table>, CasinoError> {
        self.tables
            .get(&id)
            .ok_or(GameError::TableNotFound(id))?
            .lock()
            .map_err(|_| CasinoError::StoragePoisoned)
    }

    /// Runs `f` with exclusive access to one table.
    pub fn with_table<T>(
        &self,
        id: TableId,
        f: impl FnOnce(&mut Table) -> Result<T, GameError>,
    ) -> Result<T, CasinoError> {
        let mut table = self.lock(id)?;
        Ok(f(&mut *table)?)
    }

    pub fn get_by_id(&self, id: TableId) -> Result<TableView, CasinoError> {
        Ok(self.lock(id)?.view())
    }

    /// Snapshot of every table, each read under its own lock.
    pub fn view_all(&self) -> Result<BTreeMap<TableId, TableView>, CasinoError> {
        self.tables
            .iter()
            .map(|(&id, table)| {
                let table = table.lock().map_err(|_| CasinoError::StoragePoisoned)?;
                Ok((id, table.view()))
            })
            .collect()
    }
}
