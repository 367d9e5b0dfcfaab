//! Precondition checks shared by the table operations.
//!
//! Every check here is side-effect free; a table calls them before it
//! mutates anything so a rejected request leaves the table untouched.

use crate::errors::GameError;
use crate::table::{Seat, TableState};

/// Selector of the primary (and only playable) hand.
pub const PRIMARY_HAND: u8 = 1;
/// Highest selector the protocol recognises (1 = primary, 2/3 = split hands).
pub const MAX_HAND_SELECTOR: u8 = 3;

/// Rejects `operation` unless the table is in `expected`.
pub fn require_state(
    state: TableState,
    expected: TableState,
    operation: &'static str,
) -> Result<(), GameError> {
    if state == expected {
        Ok(())
    } else {
        Err(GameError::InvalidState { operation, state })
    }
}

/// Validates a bet amount.
///
/// # Examples
///
/// ```
/// use blackjack_engine::rules::validate_bet;
/// use blackjack_engine::errors::GameError;
///
/// assert_eq!(validate_bet(25), Ok(25));
/// assert!(matches!(validate_bet(0), Err(GameError::InvalidArgument(_))));
/// ```
pub fn validate_bet(amount: u32) -> Result<u32, GameError> {
    if amount == 0 {
        return Err(GameError::InvalidArgument(
            "bet must be a positive amount".to_string(),
        ));
    }
    Ok(amount)
}

/// Validates a hand selector for hit/stand.
///
/// Split hands are never created, so selectors 2 and 3 name a hand that
/// does not exist.
pub fn validate_hand_selector(selector: u8) -> Result<(), GameError> {
    match selector {
        PRIMARY_HAND => Ok(()),
        s if s > PRIMARY_HAND && s <= MAX_HAND_SELECTOR => Err(GameError::PreconditionFailed(
            format!("hand {} does not exist", s),
        )),
        s => Err(GameError::InvalidArgument(format!(
            "invalid hand selector: {}",
            s
        ))),
    }
}

/// A seat may hit or stand only with an active bet and before it is done.
pub fn require_can_act(seat: &Seat) -> Result<(), GameError> {
    if seat.bet().is_none() {
        return Err(GameError::PreconditionFailed(format!(
            "player {} has no active bet",
            seat.player_id()
        )));
    }
    if seat.is_done() {
        return Err(GameError::PreconditionFailed(format!(
            "player {} is already done this round",
            seat.player_id()
        )));
    }
    Ok(())
}

pub fn validate_deck_count(num_decks: usize) -> Result<(), GameError> {
    if num_decks == 0 {
        return Err(GameError::InvalidArgument(
            "number of decks must be at least 1".to_string(),
        ));
    }
    Ok(())
}
