//! Input parsing and validation for interactive commands.
//!
//! Parsers return a [`ParseResult`] so callers can tell a usable value, a
//! quit request and a message to show the user apart without matching on
//! strings.

use std::collections::HashSet;

/// Outcome of parsing one line of user input.
#[derive(Debug, PartialEq)]
pub enum ParseResult<T> {
    /// Valid input
    Value(T),
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// A player's decision while the round is being dealt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAction {
    Hit,
    Stand,
}

fn is_quit(word: &str) -> bool {
    word == "q" || word == "quit"
}

/// Parse a hit/stand decision (case-insensitive).
///
/// # Example
///
/// ```rust
/// # use blackjack_cli::validation::{parse_turn_action, ParseResult, TurnAction};
/// assert_eq!(parse_turn_action("h"), ParseResult::Value(TurnAction::Hit));
/// assert_eq!(parse_turn_action("Stand"), ParseResult::Value(TurnAction::Stand));
/// assert_eq!(parse_turn_action("q"), ParseResult::Quit);
/// ```
pub fn parse_turn_action(input: &str) -> ParseResult<TurnAction> {
    let input = input.trim().to_lowercase();
    match input.as_str() {
        "" => ParseResult::Invalid("Empty input".to_string()),
        "h" | "hit" => ParseResult::Value(TurnAction::Hit),
        "s" | "stand" => ParseResult::Value(TurnAction::Stand),
        word if is_quit(word) => ParseResult::Quit,
        other => ParseResult::Invalid(format!(
            "Unrecognized action '{}'. Valid actions: h (hit), s (stand), q",
            other
        )),
    }
}

/// Parse a bet amount, checking it against the player's credits.
///
/// Accepts a bare number or `bet <amount>`.
pub fn parse_bet(input: &str, credits: i64) -> ParseResult<u32> {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();
    let amount = match parts.as_slice() {
        [] => return ParseResult::Invalid("Empty input".to_string()),
        [word] if is_quit(word) => return ParseResult::Quit,
        ["bet"] => {
            return ParseResult::Invalid("Bet requires an amount (e.g., 'bet 100')".to_string());
        }
        ["bet", amount] | [amount] => *amount,
        _ => return ParseResult::Invalid(format!("Unrecognized bet '{}'", input)),
    };
    match amount.parse::<u32>() {
        Ok(0) => ParseResult::Invalid("Bet amount must be positive".to_string()),
        Ok(a) if i64::from(a) > credits => ParseResult::Invalid(format!(
            "Bet {} exceeds available credits {}",
            a, credits
        )),
        Ok(a) => ParseResult::Value(a),
        Err(_) => ParseResult::Invalid("Invalid bet amount".to_string()),
    }
}

/// Splits a comma-separated `--players` list into unique, non-empty names.
pub fn parse_player_names(input: &str) -> Result<Vec<String>, String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for name in input.split(',').map(str::trim) {
        if name.is_empty() {
            return Err("player names must not be empty".to_string());
        }
        if !seen.insert(name.to_string()) {
            return Err(format!("duplicate player name '{}'", name));
        }
        names.push(name.to_string());
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_actions() {
        assert_eq!(parse_turn_action(" HIT "), ParseResult::Value(TurnAction::Hit));
        assert_eq!(parse_turn_action("s"), ParseResult::Value(TurnAction::Stand));
        assert_eq!(parse_turn_action("quit"), ParseResult::Quit);
        match parse_turn_action("double") {
            ParseResult::Invalid(msg) => assert!(msg.contains("Unrecognized")),
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn bets() {
        assert_eq!(parse_bet("25", 100), ParseResult::Value(25));
        assert_eq!(parse_bet("bet 100", 100), ParseResult::Value(100));
        assert_eq!(parse_bet("q", 100), ParseResult::Quit);
        assert!(matches!(parse_bet("0", 100), ParseResult::Invalid(_)));
        assert!(matches!(parse_bet("101", 100), ParseResult::Invalid(_)));
        assert!(matches!(parse_bet("-5", 100), ParseResult::Invalid(_)));
        assert!(matches!(parse_bet("bet", 100), ParseResult::Invalid(_)));
        assert!(matches!(parse_bet("", 100), ParseResult::Invalid(_)));
    }

    #[test]
    fn player_names() {
        assert_eq!(
            parse_player_names("ann, bob").unwrap(),
            vec!["ann".to_string(), "bob".to_string()]
        );
        assert!(parse_player_names("ann,,bob").is_err());
        assert!(parse_player_names("ann,ann").is_err());
    }
}
