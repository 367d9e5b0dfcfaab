//! Blackjack hand scoring.
//!
//! All functions are pure and take the hand as an ordered slice of
//! [`CardId`]s. Every Ace starts at 11 and is demoted to 1, one at a time,
//! while the total exceeds 21.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, CardValue};
use crate::errors::GameError;

/// Highest total that does not bust.
pub const BLACKJACK: u32 = 21;
/// Dealer keeps drawing while below this total.
pub const DEALER_STANDS_ON: u32 = 17;

const ACE_DEMOTION: u32 = (CardValue::ACE_HIGH - CardValue::ACE_LOW) as u32;

/// Ordered cards held by a seat or the dealer during one round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hand {
    cards: Vec<CardId>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, card: CardId) {
        self.cards.push(card);
    }

    pub fn extend(&mut self, cards: impl IntoIterator<Item = CardId>) {
        self.cards.extend(cards);
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn cards(&self) -> &[CardId] {
        &self.cards
    }

    pub fn to_cards(&self) -> Vec<Card> {
        self.cards.iter().map(|id| id.card()).collect()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn score(&self) -> Result<u32, GameError> {
        score(&self.cards)
    }
}

impl From<Vec<CardId>> for Hand {
    fn from(cards: Vec<CardId>) -> Self {
        Self { cards }
    }
}

fn evaluate(hand: &[CardId]) -> Result<(u32, u32), GameError> {
    if hand.is_empty() {
        return Err(GameError::EmptyHand);
    }
    let mut total: u32 = 0;
    let mut aces: u32 = 0;
    for id in hand {
        let value = id.card().value();
        if value == CardValue::Ace {
            aces += 1;
        }
        total += value.high() as u32;
    }
    while total > BLACKJACK && aces > 0 {
        total -= ACE_DEMOTION;
        aces -= 1;
    }
    Ok((total, aces))
}

/// Best total for `hand`.
///
/// # Errors
///
/// Returns [`GameError::EmptyHand`] when `hand` has no cards.
///
/// # Examples
///
/// ```
/// use blackjack_engine::cards::CardId;
/// use blackjack_engine::hand::score;
///
/// // Ace of clubs and six of clubs
/// let hand = [CardId::new(0).unwrap(), CardId::new(5).unwrap()];
/// assert_eq!(score(&hand).unwrap(), 17);
/// ```
pub fn score(hand: &[CardId]) -> Result<u32, GameError> {
    evaluate(hand).map(|(total, _)| total)
}

pub fn is_busted(hand: &[CardId]) -> Result<bool, GameError> {
    Ok(score(hand)? > BLACKJACK)
}

/// Whether the dealer must take another card.
pub fn below_hard_seventeen(hand: &[CardId]) -> Result<bool, GameError> {
    Ok(score(hand)? < DEALER_STANDS_ON)
}

/// True when an Ace is still being counted as 11.
pub fn is_soft(hand: &[CardId]) -> Result<bool, GameError> {
    evaluate(hand).map(|(_, high_aces)| high_aces > 0)
}
