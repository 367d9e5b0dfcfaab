//! End-of-round payout rules.
//!
//! Outcomes are computed here without touching any balance; the table
//! applies the resulting credit deltas through its player directory once
//! every seat has been resolved.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;
use crate::hand::{Hand, BLACKJACK};
use crate::player::PlayerId;
use crate::table::TableId;

/// Result of one seat's round against the dealer.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    Push,
    Loss,
}

impl Outcome {
    /// Credit change for a bet of `bet` with this outcome (even money).
    pub fn credit_delta(self, bet: u32) -> i64 {
        match self {
            Outcome::Win => bet as i64,
            Outcome::Push => 0,
            Outcome::Loss => -(bet as i64),
        }
    }
}

/// Compact record of one seat's settled round, kept on the seat for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatResult {
    pub player_id: PlayerId,
    pub bet: u32,
    pub hand: Vec<Card>,
    pub score: u32,
    pub busted: bool,
    pub outcome: Outcome,
    pub credit_delta: i64,
}

/// Everything that happened when a round settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub table_id: TableId,
    /// 1-based round counter for the table
    pub round: u64,
    pub dealer_hand: Vec<Card>,
    pub dealer_score: u32,
    pub dealer_busted: bool,
    /// Whether the shoe was replaced after the dealer finished drawing
    pub reshuffled: bool,
    pub results: Vec<SeatResult>,
}

impl RoundSummary {
    pub fn result_for(&self, player_id: PlayerId) -> Option<&SeatResult> {
        self.results.iter().find(|r| r.player_id == player_id)
    }
}

/// Decides a seat's outcome from both final totals.
///
/// A busted dealer pays every surviving seat and pushes with seats that
/// busted themselves. Otherwise a busted seat loses and the higher total
/// wins, with equal totals pushing.
pub fn outcome(dealer_score: u32, player_score: u32) -> Outcome {
    let dealer_busted = dealer_score > BLACKJACK;
    let player_busted = player_score > BLACKJACK;
    match (dealer_busted, player_busted) {
        (true, true) => Outcome::Push,
        (true, false) => Outcome::Win,
        (false, true) => Outcome::Loss,
        (false, false) => match player_score.cmp(&dealer_score) {
            std::cmp::Ordering::Greater => Outcome::Win,
            std::cmp::Ordering::Less => Outcome::Loss,
            std::cmp::Ordering::Equal => Outcome::Push,
        },
    }
}

pub fn settle_seat(
    dealer_score: u32,
    player_id: PlayerId,
    bet: u32,
    hand: &Hand,
) -> Result<SeatResult, GameError> {
    let score = hand.score()?;
    let outcome = outcome(dealer_score, score);
    Ok(SeatResult {
        player_id,
        bet,
        hand: hand.to_cards(),
        score,
        busted: score > BLACKJACK,
        outcome,
        credit_delta: outcome.credit_delta(bet),
    })
}
