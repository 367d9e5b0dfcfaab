//! Card, hand and outcome formatters for terminal display.
//!
//! Suits render as ♥ ♦ ♣ ♠ when the terminal supports Unicode and as
//! h d c s otherwise.
//!
//! ## Example
//!
//! ```rust
//! use blackjack_engine::cards::{Card, Rank, Suit};
//! use blackjack_cli::formatters::{format_card, format_hand};
//!
//! let ace_spades = Card { rank: Rank::Ace, suit: Suit::Spades };
//! assert!(format_card(&ace_spades) == "A♠" || format_card(&ace_spades) == "As");
//! assert!(format_hand(&[ace_spades]).starts_with("[A"));
//! ```

use blackjack_engine::cards::{Card, Suit};
use blackjack_engine::settlement::Outcome;
use blackjack_engine::table::CardView;

/// Check if the terminal supports Unicode card symbols.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals
/// (TERM_PROGRAM) or VS Code (VSCODE_INJECTION). Unix-like systems are
/// assumed to support Unicode.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: &Suit) -> String {
    if supports_unicode() {
        suit.symbol().to_string()
    } else {
        match suit {
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Clubs => "c",
            Suit::Spades => "s",
        }
        .to_string()
    }
}

/// Format a Card as rank label plus suit, e.g. "10♥" or "10h".
pub fn format_card(card: &Card) -> String {
    format!("{}{}", card.rank.label(), format_suit(&card.suit))
}

pub fn format_card_view(card: &CardView) -> String {
    match card {
        CardView::Up(card) => format_card(card),
        CardView::FaceDown => "??".to_string(),
    }
}

/// Format a hand in bracket notation, "[]" when empty.
pub fn format_hand(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted.join(" "))
}

/// Format the dealer's visible cards, hole card shown as "??".
pub fn format_dealer(cards: &[CardView]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card_view).collect();
    format!("[{}]", formatted.join(" "))
}

pub fn format_outcome(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Win => "win",
        Outcome::Push => "push",
        Outcome::Loss => "loss",
    }
}

/// Signed credit change, e.g. "+25", "-10" or "0".
pub fn format_delta(delta: i64) -> String {
    if delta > 0 {
        format!("+{}", delta)
    } else {
        delta.to_string()
    }
}
