//! # Play Command
//!
//! Hot-seat blackjack at a single table. Every seated player is prompted
//! for a bet, then for hit or stand until the round settles. `q` (or EOF)
//! ends the session; anyone still holding an open bet forfeits it when they
//! leave the table.

use crate::config;
use crate::error::CliError;
use crate::formatters::{format_dealer, format_delta, format_hand, format_outcome};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{ParseResult, TurnAction, parse_bet, parse_player_names, parse_turn_action};
use blackjack_engine::casino::Casino;
use blackjack_engine::player::PlayerId;
use blackjack_engine::rules::PRIMARY_HAND;
use blackjack_engine::settlement::RoundSummary;
use blackjack_engine::table::{SeatView, TableId};
use std::io::{BufRead, Write};

const DEFAULT_TABLE: TableId = 1;

/// How one round ended from the command's point of view.
enum RoundEnd {
    Settled(RoundSummary),
    Quit,
}

struct Seated {
    id: PlayerId,
    name: String,
}

/// Handle the play command.
///
/// # Arguments
///
/// * `players` - Comma-separated player names
/// * `table` - Table to sit at (default: 1)
/// * `rounds` - Number of rounds to play (must be >= 1, default: 1)
/// * `seed` - Shoe seed, overriding the configured one (default: random)
/// * `out` - Output stream for game display
/// * `err` - Error stream for warnings and errors
/// * `stdin` - Input stream for bets and actions
pub fn handle_play_command(
    players: &str,
    table: Option<TableId>,
    rounds: Option<u32>,
    seed: Option<u64>,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let names = match parse_player_names(players) {
        Ok(names) => names,
        Err(msg) => {
            ui::write_error(err, &msg)?;
            return Err(CliError::InvalidInput(msg));
        }
    };
    let rounds = rounds.unwrap_or(1);
    if rounds == 0 {
        ui::write_error(err, "rounds must be >= 1")?;
        return Err(CliError::InvalidInput("rounds must be >= 1".to_string()));
    }

    let mut cfg = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    cfg.seed = Some(seed);
    let table_id = table.unwrap_or(DEFAULT_TABLE);

    let casino = Casino::new(cfg)?;
    let mut seated = Vec::with_capacity(names.len());
    for name in names {
        let id = casino.login(&name)?;
        casino.join_table(id, table_id)?;
        seated.push(Seated { id, name });
    }

    writeln!(
        out,
        "play: players={} table={} rounds={} seed={}",
        seated
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(","),
        table_id,
        rounds,
        seed
    )?;

    for round in 1..=rounds {
        leave_if_broke(&casino, &mut seated, out)?;
        if seated.is_empty() {
            writeln!(out, "No players left.")?;
            break;
        }

        writeln!(out, "Round {}", round)?;
        if !take_bets(&casino, &seated, stdin, out, err)? {
            break;
        }
        match play_turns(&casino, table_id, &seated, stdin, out, err)? {
            RoundEnd::Settled(summary) => print_summary(&casino, &summary, &seated, out)?,
            RoundEnd::Quit => break,
        }
    }

    writeln!(out, "Final credits:")?;
    for seat in &seated {
        let credits = casino.logout(seat.id)?;
        writeln!(out, "  {}: {}", seat.name, credits)?;
    }
    Ok(())
}

fn leave_if_broke(
    casino: &Casino,
    seated: &mut Vec<Seated>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let mut kept = Vec::with_capacity(seated.len());
    for seat in seated.drain(..) {
        if casino.player(seat.id)?.credits > 0 {
            kept.push(seat);
        } else {
            writeln!(out, "{} is out of credits and leaves the table.", seat.name)?;
            casino.logout(seat.id)?;
        }
    }
    *seated = kept;
    Ok(())
}

/// Collects one bet per player. Returns `false` when the user quits.
fn take_bets(
    casino: &Casino,
    seated: &[Seated],
    stdin: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<bool, CliError> {
    for seat in seated {
        loop {
            let credits = casino.player(seat.id)?.credits;
            ui::prompt(out, &format!("{} bet (credits {}): ", seat.name, credits))?;
            let Some(line) = read_stdin_line(stdin) else {
                writeln!(out)?;
                return Ok(false);
            };
            match parse_bet(&line, credits) {
                ParseResult::Value(amount) => match casino.bet(seat.id, amount) {
                    Ok(()) => break,
                    Err(e) => ui::write_error(err, &e.to_string())?,
                },
                ParseResult::Quit => return Ok(false),
                ParseResult::Invalid(msg) => ui::write_error(err, &msg)?,
            }
        }
    }
    Ok(true)
}

fn is_interested(seat: &SeatView) -> bool {
    seat.bet.is_some() && !seat.done && !seat.busted
}

fn write_seat(out: &mut dyn Write, name: &str, seat: &SeatView) -> std::io::Result<()> {
    let score = seat.score.map(|s| s.to_string()).unwrap_or_default();
    writeln!(out, "{}: {} ({})", name, format_hand(&seat.hand), score)
}

fn play_turns(
    casino: &Casino,
    table_id: TableId,
    seated: &[Seated],
    stdin: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<RoundEnd, CliError> {
    let view = casino.view_table(table_id)?;
    if let Some(dealer) = &view.dealer {
        writeln!(out, "Dealer: {}", format_dealer(&dealer.hand))?;
    }

    for seat in seated {
        loop {
            let view = casino.view_table(table_id)?;
            let Some(seat_view) = view.players.get(&seat.id) else {
                break;
            };
            write_seat(out, &seat.name, seat_view)?;
            if !is_interested(seat_view) {
                if seat_view.busted {
                    writeln!(out, "{} busts.", seat.name)?;
                }
                break;
            }

            ui::prompt(out, &format!("{} (h)it, (s)tand or (q)uit: ", seat.name))?;
            let Some(line) = read_stdin_line(stdin) else {
                writeln!(out)?;
                return Ok(RoundEnd::Quit);
            };
            let settled = match parse_turn_action(&line) {
                ParseResult::Value(TurnAction::Hit) => casino.hit(seat.id, PRIMARY_HAND)?,
                ParseResult::Value(TurnAction::Stand) => casino.stand(seat.id, PRIMARY_HAND)?,
                ParseResult::Quit => return Ok(RoundEnd::Quit),
                ParseResult::Invalid(msg) => {
                    ui::write_error(err, &msg)?;
                    continue;
                }
            };
            if let Some(summary) = settled {
                return Ok(RoundEnd::Settled(summary));
            }
        }
    }
    Err(CliError::Engine(format!(
        "round at table {} ended without settling",
        table_id
    )))
}

fn print_summary(
    casino: &Casino,
    summary: &RoundSummary,
    seated: &[Seated],
    out: &mut dyn Write,
) -> Result<(), CliError> {
    write!(
        out,
        "Dealer: {} ({})",
        format_hand(&summary.dealer_hand),
        summary.dealer_score
    )?;
    if summary.dealer_busted {
        write!(out, " busts")?;
    }
    writeln!(out)?;

    for result in &summary.results {
        let name = seated
            .iter()
            .find(|s| s.id == result.player_id)
            .map(|s| s.name.as_str())
            .unwrap_or("?");
        let credits = casino.player(result.player_id)?.credits;
        writeln!(
            out,
            "{}: {} ({}) {} {} credits={}",
            name,
            format_hand(&result.hand),
            result.score,
            format_outcome(result.outcome),
            format_delta(result.credit_delta),
            credits
        )?;
    }
    if summary.reshuffled {
        writeln!(out, "Shoe reshuffled.")?;
    }
    Ok(())
}
