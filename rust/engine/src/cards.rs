use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// Number of distinct cards in the catalog.
pub const DECK_SIZE: usize = 52;

/// Represents one of the four suits in a standard 52-card deck.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    /// Clubs suit (♣)
    Clubs,
    /// Diamonds suit (♦)
    Diamonds,
    /// Hearts suit (♥)
    Hearts,
    /// Spades suit (♠)
    Spades,
}

/// Represents the rank of a playing card, in catalog order (Ace first).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Ace, worth 1 or 11
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    /// Jack, worth 10
    Jack,
    /// Queen, worth 10
    Queen,
    /// King, worth 10
    King,
}

/// Blackjack value of a single card.
///
/// Aces carry both candidate values; the hand evaluator decides which one
/// applies based on the rest of the hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CardValue {
    Fixed(u8),
    Ace,
}

impl CardValue {
    pub const ACE_LOW: u8 = 1;
    pub const ACE_HIGH: u8 = 11;

    /// Value used when the card is first added to a total (Aces count high).
    pub fn high(self) -> u8 {
        match self {
            CardValue::Fixed(v) => v,
            CardValue::Ace => Self::ACE_HIGH,
        }
    }
}

impl Rank {
    pub fn value(self) -> CardValue {
        match self {
            Rank::Ace => CardValue::Ace,
            Rank::Two => CardValue::Fixed(2),
            Rank::Three => CardValue::Fixed(3),
            Rank::Four => CardValue::Fixed(4),
            Rank::Five => CardValue::Fixed(5),
            Rank::Six => CardValue::Fixed(6),
            Rank::Seven => CardValue::Fixed(7),
            Rank::Eight => CardValue::Fixed(8),
            Rank::Nine => CardValue::Fixed(9),
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => CardValue::Fixed(10),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

impl Suit {
    pub fn symbol(self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        }
    }
}

/// Represents a single playing card with a suit and rank.
/// Cards are immutable values looked up from the catalog by [`CardId`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    /// The suit of the card (Clubs, Diamonds, Hearts, or Spades)
    pub suit: Suit,
    /// The rank of the card (Ace through King)
    pub rank: Rank,
}

impl Card {
    pub fn value(&self) -> CardValue {
        self.rank.value()
    }

    pub fn is_ace(&self) -> bool {
        self.rank == Rank::Ace
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ]
}

/// Stable index of a card in the 52-card catalog.
///
/// Shoes and hands hold `CardId`s rather than cards; the id is validated on
/// construction so [`CardId::card`] never fails.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CardId(u8);

impl CardId {
    pub fn new(index: usize) -> Result<Self, GameError> {
        if index < DECK_SIZE {
            Ok(CardId(index as u8))
        } else {
            Err(GameError::InvalidCardIndex(index))
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn card(self) -> Card {
        let i = self.index();
        Card {
            suit: all_suits()[i / 13],
            rank: all_ranks()[i % 13],
        }
    }
}

impl TryFrom<u8> for CardId {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        CardId::new(value as usize)
    }
}

impl From<CardId> for u8 {
    fn from(id: CardId) -> Self {
        id.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.card().fmt(f)
    }
}

/// Looks up a card by catalog index.
///
/// # Errors
///
/// Returns [`GameError::InvalidCardIndex`] when `index` is outside `0..52`.
pub fn lookup(index: usize) -> Result<Card, GameError> {
    CardId::new(index).map(CardId::card)
}

/// All 52 card ids in catalog order.
pub fn catalog() -> impl Iterator<Item = CardId> {
    (0..DECK_SIZE as u8).map(CardId)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_starts_with_ace_of_clubs_and_ends_with_king_of_spades() {
        assert_eq!(
            lookup(0).unwrap(),
            Card {
                suit: Suit::Clubs,
                rank: Rank::Ace
            }
        );
        assert_eq!(
            lookup(51).unwrap(),
            Card {
                suit: Suit::Spades,
                rank: Rank::King
            }
        );
    }

    #[test]
    fn out_of_range_lookup_fails() {
        assert_eq!(lookup(52), Err(GameError::InvalidCardIndex(52)));
    }

    #[test]
    fn display_uses_rank_and_suit_symbol() {
        assert_eq!(lookup(13 * 3).unwrap().to_string(), "A♠");
        assert_eq!(lookup(13 + 9).unwrap().to_string(), "10♦");
    }

    #[test]
    fn card_id_serializes_as_index() {
        let id = CardId::new(17).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "17");
        assert!(serde_json::from_str::<CardId>("60").is_err());
    }
}
