//! Bankroll simulation over historical matches
//!
//! Replays an odds-annotated match sequence against a ratings snapshot and
//! the decision rule, compounding a bankroll bet by bet. No real execution:
//! this is the strategy-validation harness the optimizer scores against.


use crate::config::{BankrollConfig, ModelParams};
use crate::error::Result;
use crate::rating::RatingBook;
use crate::strategy::pick_team;
use crate::types::{BetRecord, Match, MatchResult, OddsSource, Side};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Result of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub initial_balance: f64,
    pub final_balance: f64,
    pub bets_won: u32,
    pub bets_lost: u32,
    /// Matches with no odds quote; skipped, never an error
    pub skipped_no_odds: u32,
    pub bets: Vec<BetRecord>,
}

impl SimulationReport {
    pub fn total_profit(&self) -> f64 {
        self.final_balance - self.initial_balance
    }

    pub fn roi(&self) -> f64 {
        if self.initial_balance == 0.0 {
            0.0
        } else {
            self.total_profit() / self.initial_balance
        }
    }

    pub fn win_rate(&self) -> f64 {
        let placed = self.bets_won + self.bets_lost;
        if placed == 0 {
            0.0
        } else {
            f64::from(self.bets_won) / f64::from(placed)
        }
    }
}

/// Replay `matches` in order, betting wherever the decision rule allows
///
/// Strictly sequential: each stake is sized from the balance produced by all
/// earlier matches. A bet is placed when the pick clears the win-rate floor
/// and its expected return falls strictly inside the (floor, ceil) band.
/// Stake is `balance * expected_return / stake_divisor`, capped at the
/// current balance, and deducted up front; a win credits `odds * stake`.
/// A drawn match loses the stake for either side, a two-way pick against a
/// three-way market. Unknown teams abort the run with no report.
pub fn simulate<O: OddsSource>(
    book: &RatingBook,
    matches: &[Match],
    odds: &O,
    params: &ModelParams,
    bankroll: &BankrollConfig,
) -> Result<SimulationReport> {
    let mut balance = bankroll.initial_balance;
    let mut bets_won = 0u32;
    let mut bets_lost = 0u32;
    let mut skipped_no_odds = 0u32;
    let mut bets = Vec::new();

    for m in matches {
        let Some(quote) = odds.find(m.date, &m.visitor) else {
            skipped_no_odds += 1;
            debug!(date = %m.date, home = %m.home, visitor = %m.visitor, "no odds quote, skipping");
            continue;
        };

        let rating_home = book.rating(&m.home)?;
        let rating_visitor = book.rating(&m.visitor)?;
        let pick = pick_team(
            rating_home,
            rating_visitor,
            quote.home_odds,
            quote.visitor_odds,
            params.win_rate_floor,
            params.factor,
        );

        let in_band = pick.expected_return > params.floor && pick.expected_return < params.ceil;
        if !pick.bet_eligible || !in_band {
            continue;
        }

        let stake = (balance * pick.expected_return / bankroll.stake_divisor).min(balance);
        let (side, odds_taken) = if pick.chose_home {
            (Side::Home, quote.home_odds)
        } else {
            (Side::Visitor, quote.visitor_odds)
        };

        let won = match m.result() {
            MatchResult::HomeWin => pick.chose_home,
            MatchResult::VisitorWin => !pick.chose_home,
            MatchResult::Draw => false,
        };

        balance -= stake;
        if won {
            balance += odds_taken * stake;
            bets_won += 1;
        } else {
            bets_lost += 1;
        }

        debug!(
            date = %m.date,
            home = %m.home,
            visitor = %m.visitor,
            ?side,
            stake,
            odds = odds_taken,
            won,
            balance,
            "bet settled"
        );

        bets.push(BetRecord {
            date: m.date,
            home: m.home.clone(),
            visitor: m.visitor.clone(),
            side,
            stake,
            odds: odds_taken,
            expected_return: pick.expected_return,
            win_probability: pick.win_probability,
            won,
            balance_after: balance,
        });
    }

    Ok(SimulationReport {
        initial_balance: bankroll.initial_balance,
        final_balance: balance,
        bets_won,
        bets_lost,
        skipped_no_odds,
        bets,
    })
}
