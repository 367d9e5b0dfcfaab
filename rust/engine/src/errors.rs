use thiserror::Error;

use crate::player::PlayerId;
use crate::table::{TableId, TableState};

/// Coarse classification of engine failures.
///
/// Every [`GameError`] is a synchronous validation failure; none of them is
/// retried or recovered inside the engine.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ErrorKind {
    InvalidArgument,
    InvalidState,
    NotFound,
    PreconditionFailed,
    InsufficientCards,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Cannot {operation} while table is {state}")]
    InvalidState {
        operation: &'static str,
        state: TableState,
    },
    #[error("Player {0} not found")]
    PlayerNotFound(PlayerId),
    #[error("Table {0} not found")]
    TableNotFound(TableId),
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),
    #[error("Not enough cards in shoe: requested {requested}, remaining {remaining}")]
    InsufficientCards { requested: usize, remaining: usize },
    #[error("Invalid card index: {0} (expected 0-51)")]
    InvalidCardIndex(usize),
    #[error("Cannot score an empty hand")]
    EmptyHand,
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::InvalidArgument(_)
            | GameError::InvalidCardIndex(_)
            | GameError::EmptyHand => ErrorKind::InvalidArgument,
            GameError::InvalidState { .. } => ErrorKind::InvalidState,
            GameError::PlayerNotFound(_) | GameError::TableNotFound(_) => ErrorKind::NotFound,
            GameError::PreconditionFailed(_) => ErrorKind::PreconditionFailed,
            GameError::InsufficientCards { .. } => ErrorKind::InsufficientCards,
        }
    }
}

/// Failures of the shared, lock-protected casino state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CasinoError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("Storage lock poisoned")]
    StoragePoisoned,
}

impl CasinoError {
    /// The engine error behind this failure, if any.
    pub fn game(&self) -> Option<&GameError> {
        match self {
            CasinoError::Game(e) => Some(e),
            CasinoError::StoragePoisoned => None,
        }
    }
}
