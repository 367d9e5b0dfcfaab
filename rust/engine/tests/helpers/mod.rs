#![allow(dead_code)]

use blackjack_engine::cards::{CardId, DECK_SIZE};
use blackjack_engine::player::{PlayerId, PlayerRegistry};
use blackjack_engine::shoe::Shoe;
use blackjack_engine::table::Table;

/// Card id for a rank (1 = Ace, 11..13 = J/Q/K) in clubs.
pub fn club(rank: usize) -> CardId {
    CardId::new(rank - 1).expect("valid rank")
}

/// Card id for a rank in hearts.
pub fn heart(rank: usize) -> CardId {
    CardId::new(2 * 13 + rank - 1).expect("valid rank")
}

/// A shoe that deals `cards` first, padded with a full deck so the table
/// never has to rebuild it mid-test.
pub fn stacked(cards: &[CardId]) -> Shoe {
    let mut all = cards.to_vec();
    all.extend((0..DECK_SIZE).map(|i| CardId::new(i).expect("catalog index")));
    Shoe::from_cards(all).expect("non-empty shoe")
}

/// Seats `names` at a fresh single-deck table and installs `shoe`.
pub fn seated_table(
    players: &mut PlayerRegistry,
    names: &[&str],
    shoe: Shoe,
) -> (Table, Vec<PlayerId>) {
    let mut table = Table::new(1, 1, Some(99)).expect("table");
    let ids = names
        .iter()
        .map(|name| {
            let id = players.login(name).expect("login");
            table.add_player(id, players).expect("join");
            id
        })
        .collect();
    table.replace_shoe(shoe).expect("betting table accepts a shoe");
    (table, ids)
}
