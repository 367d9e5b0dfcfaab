mod helpers;

use blackjack_engine::player::{PlayerDirectory, PlayerRegistry, STARTING_CREDITS};
use blackjack_engine::settlement::Outcome;
use blackjack_engine::table::TableState;
use helpers::{club, heart, seated_table, stacked};

#[test]
fn dealer_on_sixteen_draws() {
    let mut players = PlayerRegistry::default();
    // dealer 10+6, ann 10+8, dealer draws a 3
    let shoe = stacked(&[club(10), club(6), heart(10), heart(8), club(3)]);
    let (mut table, ids) = seated_table(&mut players, &["ann"], shoe);
    table.place_bet(ids[0], 10).unwrap();

    let summary = table.stand(ids[0], 1, &mut players).unwrap().unwrap();
    assert_eq!(summary.dealer_hand.len(), 3);
    assert_eq!(summary.dealer_score, 19);
    assert_eq!(summary.results[0].outcome, Outcome::Loss);
    assert_eq!(
        players.get(ids[0]).unwrap().credits,
        STARTING_CREDITS - 10
    );
}

#[test]
fn dealer_stands_on_sixteen_that_already_wins() {
    let mut players = PlayerRegistry::default();
    // dealer 10+6, ann 10+5 stands; a king waits on top
    let shoe = stacked(&[club(10), club(6), heart(10), heart(5), club(13)]);
    let (mut table, ids) = seated_table(&mut players, &["ann"], shoe);
    table.place_bet(ids[0], 10).unwrap();

    let summary = table.stand(ids[0], 1, &mut players).unwrap().unwrap();
    assert_eq!(summary.dealer_hand.len(), 2);
    assert_eq!(summary.dealer_score, 16);
    assert!(!summary.dealer_busted);
    assert_eq!(summary.results[0].outcome, Outcome::Loss);
    assert_eq!(
        players.get(ids[0]).unwrap().credits,
        STARTING_CREDITS - 10
    );
}

#[test]
fn dealer_draws_against_the_best_contender() {
    let mut players = PlayerRegistry::default();
    // dealer 10+4, ann 10+2 stands, bob 10+6 stands, dealer draws a 5
    let shoe = stacked(&[
        club(10),
        club(4),
        heart(10),
        heart(2),
        club(11),
        club(6),
        heart(5),
    ]);
    let (mut table, ids) = seated_table(&mut players, &["ann", "bob"], shoe);
    let (ann, bob) = (ids[0], ids[1]);
    table.place_bet(ann, 10).unwrap();
    table.place_bet(bob, 10).unwrap();
    table.stand(ann, 1, &mut players).unwrap();
    let summary = table.stand(bob, 1, &mut players).unwrap().unwrap();

    assert_eq!(summary.dealer_hand.len(), 3);
    assert_eq!(summary.dealer_score, 19);
    assert_eq!(summary.result_for(ann).unwrap().outcome, Outcome::Loss);
    assert_eq!(summary.result_for(bob).unwrap().outcome, Outcome::Loss);
}

#[test]
fn dealer_bust_pays_survivor_and_pushes_busted_player() {
    let mut players = PlayerRegistry::default();
    // dealer 10+6, ann 10+8, bob 10+5, bob hits a king, dealer draws a queen
    let shoe = stacked(&[
        club(10),
        club(6),
        heart(10),
        heart(8),
        club(13),
        club(5),
        heart(13),
        club(12),
    ]);
    let (mut table, ids) = seated_table(&mut players, &["ann", "bob"], shoe);
    let (ann, bob) = (ids[0], ids[1]);
    table.place_bet(ann, 25).unwrap();
    table.place_bet(bob, 40).unwrap();

    assert!(table.hit(bob, 1, &mut players).unwrap().is_none());
    let summary = table.stand(ann, 1, &mut players).unwrap().unwrap();

    assert!(summary.dealer_busted);
    assert_eq!(summary.dealer_score, 26);
    assert_eq!(summary.result_for(ann).unwrap().outcome, Outcome::Win);
    assert_eq!(summary.result_for(bob).unwrap().outcome, Outcome::Push);
    assert_eq!(players.get(ann).unwrap().credits, STARTING_CREDITS + 25);
    assert_eq!(players.get(bob).unwrap().credits, STARTING_CREDITS);
}

#[test]
fn equal_totals_push() {
    let mut players = PlayerRegistry::default();
    let shoe = stacked(&[club(10), club(9), heart(10), heart(9)]);
    let (mut table, ids) = seated_table(&mut players, &["ann"], shoe);
    table.place_bet(ids[0], 50).unwrap();
    let summary = table.stand(ids[0], 1, &mut players).unwrap().unwrap();

    assert_eq!(summary.dealer_score, 19);
    let result = summary.result_for(ids[0]).unwrap();
    assert_eq!(result.outcome, Outcome::Push);
    assert_eq!(result.credit_delta, 0);
    assert_eq!(players.get(ids[0]).unwrap().credits, STARTING_CREDITS);
}

#[test]
fn dealer_stops_once_every_player_busted() {
    let mut players = PlayerRegistry::default();
    // dealer 10+2 would draw, but ann busts with a king
    let shoe = stacked(&[club(10), club(2), heart(10), heart(6), heart(13)]);
    let (mut table, ids) = seated_table(&mut players, &["ann"], shoe);
    table.place_bet(ids[0], 10).unwrap();
    let summary = table.hit(ids[0], 1, &mut players).unwrap().unwrap();

    assert_eq!(summary.dealer_hand.len(), 2);
    assert_eq!(summary.results[0].outcome, Outcome::Loss);
    assert_eq!(
        players.get(ids[0]).unwrap().credits,
        STARTING_CREDITS - 10
    );
}

#[test]
fn leaving_mid_round_forfeits_bet() {
    let mut players = PlayerRegistry::default();
    let shoe = stacked(&[club(10), club(9), heart(10), heart(8), club(10), club(7)]);
    let (mut table, ids) = seated_table(&mut players, &["ann", "bob"], shoe);
    let (ann, bob) = (ids[0], ids[1]);
    table.place_bet(ann, 30).unwrap();
    table.place_bet(bob, 10).unwrap();

    assert!(table.remove_player(ann, &mut players).unwrap().is_none());
    assert_eq!(players.get(ann).unwrap().credits, STARTING_CREDITS - 30);
    assert_eq!(players.get(ann).unwrap().table_id, None);
    assert_eq!(table.state(), TableState::Dealing);

    let summary = table.stand(bob, 1, &mut players).unwrap().unwrap();
    assert_eq!(summary.results.len(), 1);
    assert!(summary.result_for(ann).is_none());
}

#[test]
fn last_interested_player_leaving_settles_round() {
    let mut players = PlayerRegistry::default();
    let shoe = stacked(&[club(10), club(9), heart(10), heart(8), club(10), club(7)]);
    let (mut table, ids) = seated_table(&mut players, &["ann", "bob"], shoe);
    let (ann, bob) = (ids[0], ids[1]);
    table.place_bet(ann, 30).unwrap();
    table.place_bet(bob, 10).unwrap();
    table.stand(bob, 1, &mut players).unwrap();

    let summary = table.remove_player(ann, &mut players).unwrap().unwrap();
    assert_eq!(summary.result_for(bob).unwrap().outcome, Outcome::Loss);
    assert_eq!(table.state(), TableState::Betting);
    assert_eq!(players.get(bob).unwrap().credits, STARTING_CREDITS - 10);
    assert_eq!(players.get(ann).unwrap().credits, STARTING_CREDITS - 30);
}

#[test]
fn last_player_leaving_returns_table_to_waiting() {
    let mut players = PlayerRegistry::default();
    let (mut table, ids) = seated_table(&mut players, &["ann"], stacked(&[]));
    table.place_bet(ids[0], 10).unwrap();
    table.remove_player(ids[0], &mut players).unwrap();

    assert_eq!(table.state(), TableState::Waiting);
    assert_eq!(table.num_players(), 0);
    assert!(table.view().dealer.is_none());
    assert_eq!(players.get(ids[0]).unwrap().credits, STARTING_CREDITS - 10);
}

#[test]
fn leaving_during_betting_deals_for_remaining_bettors() {
    let mut players = PlayerRegistry::default();
    let (mut table, ids) = seated_table(&mut players, &["ann", "bob"], stacked(&[]));
    table.place_bet(ids[1], 10).unwrap();
    table.remove_player(ids[0], &mut players).unwrap();

    assert_eq!(table.state(), TableState::Dealing);
    assert_eq!(players.get(ids[0]).unwrap().credits, STARTING_CREDITS);
}

#[test]
fn bet_clears_previous_result() {
    let mut players = PlayerRegistry::default();
    let shoe = stacked(&[club(10), club(9), heart(10), heart(9)]);
    let (mut table, ids) = seated_table(&mut players, &["ann"], shoe);
    table.place_bet(ids[0], 10).unwrap();
    table.stand(ids[0], 1, &mut players).unwrap();
    assert!(table.seat(ids[0]).unwrap().result().is_some());

    table.place_bet(ids[0], 10).unwrap();
    assert!(table.seat(ids[0]).unwrap().result().is_none());
}
