//! A single blackjack table and its round state machine.
//!
//! States move `Waiting -> Betting -> Dealing -> Complete -> Betting`.
//! `Waiting` is entered only when the last player leaves, and adding the
//! first player from `Waiting` opens betting. Once every seated player has
//! bet the opening cards are dealt; once no seat can act any more the round
//! settles and betting reopens.

use std::collections::BTreeMap;
use std::fmt;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cards::{Card, CardId};
use crate::errors::GameError;
use crate::hand::{self, Hand, BLACKJACK};
use crate::player::{PlayerDirectory, PlayerId};
use crate::rules;
use crate::settlement::{self, Outcome, RoundSummary, SeatResult};
use crate::shoe::Shoe;

pub type TableId = u64;

/// Cards dealt to each betting seat and to the dealer at the start of a round
const OPENING_CARDS: usize = 2;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableState {
    /// No players seated
    Waiting,
    /// Accepting bets for the next round
    Betting,
    /// Cards are out and players are acting
    Dealing,
    /// Round resolved, about to reopen betting
    Complete,
}

impl TableState {
    pub fn label(self) -> &'static str {
        match self {
            TableState::Waiting => "waiting",
            TableState::Betting => "betting",
            TableState::Dealing => "dealing",
            TableState::Complete => "complete",
        }
    }
}

impl fmt::Display for TableState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A player's per-table round state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    player_id: PlayerId,
    bet: Option<u32>,
    hand: Hand,
    busted: bool,
    done: bool,
    /// Last settled outcome, kept until the next bet
    result: Option<SeatResult>,
}

impl Seat {
    fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            bet: None,
            hand: Hand::new(),
            busted: false,
            done: false,
            result: None,
        }
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }
    pub fn bet(&self) -> Option<u32> {
        self.bet
    }
    pub fn hand(&self) -> &Hand {
        &self.hand
    }
    pub fn is_busted(&self) -> bool {
        self.busted
    }
    pub fn is_done(&self) -> bool {
        self.done
    }
    pub fn result(&self) -> Option<&SeatResult> {
        self.result.as_ref()
    }

    /// Has a bet, has not busted and has not finished acting.
    pub fn is_interested(&self) -> bool {
        self.bet.is_some() && !self.busted && !self.done
    }

    fn start_round(&mut self, bet: u32) {
        self.result = None;
        self.hand.clear();
        self.busted = false;
        self.done = false;
        self.bet = Some(bet);
    }

    fn clear_round(&mut self) {
        self.bet = None;
        self.hand.clear();
        self.busted = false;
        self.done = false;
    }
}

/// Dealer card as shown to players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardView {
    Up(Card),
    FaceDown,
}

impl fmt::Display for CardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardView::Up(card) => card.fmt(f),
            CardView::FaceDown => f.write_str("??"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealerView {
    pub hand: Vec<CardView>,
    /// Hidden while the hole card is face down
    pub score: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatView {
    pub bet: Option<u32>,
    pub hand: Vec<Card>,
    /// Best total, `None` before cards are dealt
    pub score: Option<u32>,
    pub done: bool,
    pub busted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub win: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<SeatResult>,
}

/// Read-only projection of a table for clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    pub id: TableId,
    pub state: TableState,
    pub dealer: Option<DealerView>,
    pub players: BTreeMap<PlayerId, SeatView>,
    pub num_players: usize,
}

/// One blackjack table: its seats, its shoe and the dealer's hand.
#[derive(Debug, Clone)]
pub struct Table {
    id: TableId,
    state: TableState,
    seats: BTreeMap<PlayerId, Seat>,
    shoe: Shoe,
    num_decks: usize,
    dealer_hand: Hand,
    rng: ChaCha20Rng,
    rounds_played: u64,
    last_round: Option<RoundSummary>,
}

impl Table {
    /// Creates an empty table in `Waiting` with a freshly shuffled shoe.
    ///
    /// With a `seed` every shoe the table ever builds is reproducible.
    pub fn new(id: TableId, num_decks: usize, seed: Option<u64>) -> Result<Self, GameError> {
        rules::validate_deck_count(num_decks)?;
        let mut rng = match seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_os_rng(),
        };
        let shoe = Shoe::new(num_decks, &mut rng)?;
        Ok(Self {
            id,
            state: TableState::Waiting,
            seats: BTreeMap::new(),
            shoe,
            num_decks,
            dealer_hand: Hand::new(),
            rng,
            rounds_played: 0,
            last_round: None,
        })
    }

    pub fn id(&self) -> TableId {
        self.id
    }
    pub fn state(&self) -> TableState {
        self.state
    }
    pub fn seat(&self, player_id: PlayerId) -> Option<&Seat> {
        self.seats.get(&player_id)
    }
    pub fn seats(&self) -> impl Iterator<Item = &Seat> {
        self.seats.values()
    }
    pub fn num_players(&self) -> usize {
        self.seats.len()
    }
    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer_hand
    }
    pub fn shoe(&self) -> &Shoe {
        &self.shoe
    }
    pub fn num_decks(&self) -> usize {
        self.num_decks
    }
    pub fn rounds_played(&self) -> u64 {
        self.rounds_played
    }
    pub fn last_round(&self) -> Option<&RoundSummary> {
        self.last_round.as_ref()
    }

    /// Seats that still have a decision to make this round.
    pub fn num_interested(&self) -> usize {
        match self.state {
            TableState::Betting | TableState::Dealing => {
                self.seats.values().filter(|s| s.is_interested()).count()
            }
            _ => 0,
        }
    }

    /// Installs a prepared shoe; not allowed while a round is being dealt.
    pub fn replace_shoe(&mut self, shoe: Shoe) -> Result<(), GameError> {
        if self.state == TableState::Dealing {
            return Err(GameError::InvalidState {
                operation: "replace shoe",
                state: self.state,
            });
        }
        self.shoe = shoe;
        Ok(())
    }

    pub fn add_player(
        &mut self,
        player_id: PlayerId,
        players: &mut dyn PlayerDirectory,
    ) -> Result<(), GameError> {
        let player = players.get(player_id)?;
        if self.seats.contains_key(&player_id) {
            return Err(GameError::PreconditionFailed(format!(
                "player {} is already seated at table {}",
                player_id, self.id
            )));
        }
        if let Some(other) = player.table_id {
            return Err(GameError::PreconditionFailed(format!(
                "player {} is already seated at table {}",
                player_id, other
            )));
        }

        players.set_table(player_id, Some(self.id))?;
        self.seats.insert(player_id, Seat::new(player_id));
        debug!(table_id = self.id, player_id, "player joined");
        if self.state == TableState::Waiting {
            self.transition(TableState::Betting);
        }
        Ok(())
    }

    /// Removes a seated player, forfeiting any unresolved bet.
    ///
    /// Returns the round summary when the departure let the current round
    /// settle.
    pub fn remove_player(
        &mut self,
        player_id: PlayerId,
        players: &mut dyn PlayerDirectory,
    ) -> Result<Option<RoundSummary>, GameError> {
        let forfeit = self
            .seats
            .get(&player_id)
            .ok_or(GameError::PlayerNotFound(player_id))?
            .bet;
        players.get(player_id)?;

        self.transact(|table| {
            table.seats.remove(&player_id);
            let summary = if table.seats.is_empty() {
                table.dealer_hand.clear();
                table.transition(TableState::Waiting);
                None
            } else {
                match table.state {
                    TableState::Betting => {
                        table.deal_if_everyone_has_bet()?;
                        None
                    }
                    TableState::Dealing => table.settle_if_no_one_interested(players)?,
                    _ => None,
                }
            };

            if let Some(bet) = forfeit {
                let credits = players.adjust_credits(player_id, -(bet as i64))?;
                info!(
                    table_id = table.id,
                    player_id, bet, credits, "player left with an open bet, bet forfeited"
                );
            }
            players.set_table(player_id, None)?;
            debug!(table_id = table.id, player_id, "player left");
            Ok(summary)
        })
    }

    /// Records a bet; the last missing bet starts the round.
    pub fn place_bet(&mut self, player_id: PlayerId, amount: u32) -> Result<(), GameError> {
        rules::require_state(self.state, TableState::Betting, "bet")?;
        if !self.seats.contains_key(&player_id) {
            return Err(GameError::PlayerNotFound(player_id));
        }
        let amount = rules::validate_bet(amount)?;

        self.transact(|table| {
            if let Some(seat) = table.seats.get_mut(&player_id) {
                seat.start_round(amount);
            }
            debug!(table_id = table.id, player_id, amount, "bet placed");
            table.deal_if_everyone_has_bet()
        })
    }

    /// Deals one card to the selected hand.
    ///
    /// Returns the round summary when this action finished the round.
    pub fn hit(
        &mut self,
        player_id: PlayerId,
        hand_selector: u8,
        players: &mut dyn PlayerDirectory,
    ) -> Result<Option<RoundSummary>, GameError> {
        self.validate_action(player_id, hand_selector, "hit")?;

        self.transact(|table| {
            let card = table.shoe.deal_one()?;
            if let Some(seat) = table.seats.get_mut(&player_id) {
                seat.hand.push(card);
                if hand::is_busted(seat.hand.cards())? {
                    seat.busted = true;
                    seat.done = true;
                }
                debug!(
                    table_id = table.id,
                    player_id,
                    card = %card,
                    busted = seat.busted,
                    "player hit"
                );
            }
            table.settle_if_no_one_interested(players)
        })
    }

    /// Marks the selected hand as finished.
    pub fn stand(
        &mut self,
        player_id: PlayerId,
        hand_selector: u8,
        players: &mut dyn PlayerDirectory,
    ) -> Result<Option<RoundSummary>, GameError> {
        self.validate_action(player_id, hand_selector, "stand")?;

        self.transact(|table| {
            if let Some(seat) = table.seats.get_mut(&player_id) {
                seat.done = true;
            }
            debug!(table_id = table.id, player_id, "player stood");
            table.settle_if_no_one_interested(players)
        })
    }

    pub fn view(&self) -> TableView {
        let dealing = self.state == TableState::Dealing;

        let dealer = if self.dealer_hand.is_empty() {
            None
        } else if dealing {
            let mut hand: Vec<CardView> = self
                .dealer_hand
                .cards()
                .iter()
                .take(1)
                .map(|id| CardView::Up(id.card()))
                .collect();
            hand.push(CardView::FaceDown);
            Some(DealerView { hand, score: None })
        } else {
            Some(DealerView {
                hand: self
                    .dealer_hand
                    .cards()
                    .iter()
                    .map(|id| CardView::Up(id.card()))
                    .collect(),
                score: self.dealer_hand.score().ok(),
            })
        };

        let players = self
            .seats
            .values()
            .map(|seat| {
                let outcome = seat.result.as_ref().map(|r| r.outcome);
                let win = outcome.map(|o| o == Outcome::Win);
                let push = outcome.and_then(|o| (o == Outcome::Push).then_some(true));
                let view = SeatView {
                    bet: seat.bet,
                    hand: seat.hand.to_cards(),
                    score: seat.hand.score().ok(),
                    done: seat.done,
                    busted: seat.busted,
                    win,
                    push,
                    result: seat.result.clone(),
                };
                (seat.player_id, view)
            })
            .collect();

        TableView {
            id: self.id,
            state: self.state,
            dealer,
            players,
            num_players: self.seats.len(),
        }
    }

    /// Runs `op` against a copy of the table and keeps the copy only if `op`
    /// succeeds.
    fn transact<T>(
        &mut self,
        op: impl FnOnce(&mut Table) -> Result<T, GameError>,
    ) -> Result<T, GameError> {
        let mut staged = self.clone();
        let value = op(&mut staged)?;
        *self = staged;
        Ok(value)
    }

    fn transition(&mut self, next: TableState) {
        debug!(table_id = self.id, from = %self.state, to = %next, "table state change");
        self.state = next;
    }

    fn validate_action(
        &self,
        player_id: PlayerId,
        hand_selector: u8,
        operation: &'static str,
    ) -> Result<(), GameError> {
        rules::require_state(self.state, TableState::Dealing, operation)?;
        let seat = self
            .seats
            .get(&player_id)
            .ok_or(GameError::PlayerNotFound(player_id))?;
        rules::validate_hand_selector(hand_selector)?;
        rules::require_can_act(seat)
    }

    fn deal_if_everyone_has_bet(&mut self) -> Result<(), GameError> {
        let everyone_has_bet =
            !self.seats.is_empty() && self.seats.values().all(|s| s.bet.is_some());
        if everyone_has_bet {
            debug!(table_id = self.id, "everyone has bet");
            self.transition(TableState::Dealing);
            self.deal_opening_cards()?;
        }
        Ok(())
    }

    fn deal_opening_cards(&mut self) -> Result<(), GameError> {
        let bettors: Vec<PlayerId> = self
            .seats
            .values()
            .filter(|s| s.bet.is_some())
            .map(|s| s.player_id)
            .collect();

        let needed = OPENING_CARDS * (bettors.len() + 1);
        if self.shoe.remaining() < needed {
            info!(
                table_id = self.id,
                remaining = self.shoe.remaining(),
                needed,
                "shoe cannot cover the opening deal, replacing shoe"
            );
            self.shoe = Shoe::new(self.num_decks, &mut self.rng)?;
        }

        self.dealer_hand = Hand::from(self.shoe.deal(OPENING_CARDS)?);
        for player_id in bettors {
            let cards = self.shoe.deal(OPENING_CARDS)?;
            if let Some(seat) = self.seats.get_mut(&player_id) {
                seat.hand.extend(cards);
            }
        }
        Ok(())
    }

    fn settle_if_no_one_interested(
        &mut self,
        players: &mut dyn PlayerDirectory,
    ) -> Result<Option<RoundSummary>, GameError> {
        if self.num_interested() > 0 {
            return Ok(None);
        }
        self.settle(players).map(Some)
    }

    /// Best total among betting seats that have not busted, if any.
    fn best_contender_score(&self) -> Result<Option<u32>, GameError> {
        let mut best = None;
        for seat in self.seats.values().filter(|s| s.bet.is_some() && !s.busted) {
            let score = seat.hand.score()?;
            best = best.max(Some(score));
        }
        Ok(best)
    }

    /// The dealer draws below hard 17 while some contender is not already beaten.
    fn dealer_must_draw(&self) -> Result<bool, GameError> {
        if !hand::below_hard_seventeen(self.dealer_hand.cards())? {
            return Ok(false);
        }
        let dealer_score = self.dealer_hand.score()?;
        Ok(self
            .best_contender_score()?
            .is_some_and(|best| best >= dealer_score))
    }

    fn settle(&mut self, players: &mut dyn PlayerDirectory) -> Result<RoundSummary, GameError> {
        self.transition(TableState::Complete);

        while self.dealer_must_draw()? {
            let card: CardId = self.shoe.deal_one()?;
            debug!(table_id = self.id, card = %card, "dealer draws");
            self.dealer_hand.push(card);
        }

        let reshuffled = self.shoe.past_cut_point();
        if reshuffled {
            info!(
                table_id = self.id,
                remaining = self.shoe.remaining(),
                "shoe is past the cut point, replacing shoe"
            );
            self.shoe = Shoe::new(self.num_decks, &mut self.rng)?;
        }

        let dealer_score = self.dealer_hand.score()?;
        let results = self
            .seats
            .values()
            .filter_map(|seat| {
                seat.bet
                    .map(|bet| settlement::settle_seat(dealer_score, seat.player_id, bet, &seat.hand))
            })
            .collect::<Result<Vec<SeatResult>, GameError>>()?;

        for result in &results {
            players.get(result.player_id)?;
        }
        for result in &results {
            let credits = players.adjust_credits(result.player_id, result.credit_delta)?;
            info!(
                table_id = self.id,
                player_id = result.player_id,
                outcome = ?result.outcome,
                score = result.score,
                dealer_score,
                credits,
                "seat settled"
            );
            if let Some(seat) = self.seats.get_mut(&result.player_id) {
                seat.result = Some(result.clone());
            }
        }

        self.rounds_played += 1;
        let summary = RoundSummary {
            table_id: self.id,
            round: self.rounds_played,
            dealer_hand: self.dealer_hand.to_cards(),
            dealer_score,
            dealer_busted: dealer_score > BLACKJACK,
            reshuffled,
            results,
        };

        for seat in self.seats.values_mut() {
            seat.clear_round();
        }
        self.last_round = Some(summary.clone());
        self.transition(TableState::Betting);
        Ok(summary)
    }
}
