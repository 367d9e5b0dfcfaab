use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::cards::{catalog, CardId, DECK_SIZE};
use crate::errors::GameError;
use crate::rules::validate_deck_count;

/// Percentage of the shoe that must remain; below it the shoe is replaced.
pub const CUT_POINT_PERCENT_LEFT: usize = 25;

/// The working set of shuffled cards a table deals from across rounds.
///
/// Cards leave from the front and never come back; once the shoe is past its
/// cut point the owning table discards it and builds a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shoe {
    cards: VecDeque<CardId>,
    max_size: usize,
    num_decks: usize,
}

impl Shoe {
    /// Builds a shoe of `num_decks` independently shuffled decks.
    ///
    /// Each 52-card block is shuffled on its own and appended, then every
    /// position of the first block is swapped with a random position across
    /// the whole shoe so cards migrate between decks.
    pub fn new<R: Rng + ?Sized>(num_decks: usize, rng: &mut R) -> Result<Self, GameError> {
        validate_deck_count(num_decks)?;

        let mut cards: Vec<CardId> = Vec::with_capacity(num_decks * DECK_SIZE);
        for _ in 0..num_decks {
            let mut deck: Vec<CardId> = catalog().collect();
            deck.shuffle(rng);
            cards.extend(deck);
        }
        for i in 0..DECK_SIZE {
            let target = rng.random_range(0..cards.len());
            cards.swap(i, target);
        }

        let max_size = cards.len();
        Ok(Self {
            cards: cards.into(),
            max_size,
            num_decks,
        })
    }

    /// Builds a stacked shoe that deals `cards` in the given order.
    pub fn from_cards(cards: Vec<CardId>) -> Result<Self, GameError> {
        if cards.is_empty() {
            return Err(GameError::InvalidArgument(
                "stacked shoe needs at least one card".to_string(),
            ));
        }
        let max_size = cards.len();
        Ok(Self {
            cards: cards.into(),
            max_size,
            num_decks: max_size.div_ceil(DECK_SIZE),
        })
    }

    pub fn deal_one(&mut self) -> Result<CardId, GameError> {
        self.cards.pop_front().ok_or(GameError::InsufficientCards {
            requested: 1,
            remaining: 0,
        })
    }

    /// Removes `count` cards from the front, preserving their order.
    pub fn deal(&mut self, count: usize) -> Result<Vec<CardId>, GameError> {
        if count == 0 {
            return Err(GameError::InvalidArgument(
                "deal count must be positive".to_string(),
            ));
        }
        if count > self.cards.len() {
            return Err(GameError::InsufficientCards {
                requested: count,
                remaining: self.cards.len(),
            });
        }
        Ok(self.cards.drain(..count).collect())
    }

    /// True once fewer than 25% of the shoe's cards remain.
    pub fn past_cut_point(&self) -> bool {
        let percent_left = self.cards.len() * 100 / self.max_size;
        percent_left < CUT_POINT_PERCENT_LEFT
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn num_decks(&self) -> usize {
        self.num_decks
    }

    pub fn cards(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().copied()
    }
}
