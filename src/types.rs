//! Core data types: matches, results, odds quotes and bet records

use crate::error::{PuckedgeError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A finished match between two teams
///
/// Matches are immutable once constructed; callers supply them sorted
/// ascending by date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub date: NaiveDate,
    pub home: String,
    pub visitor: String,
    pub home_goals: u32,
    pub visitor_goals: u32,
}

impl Match {
    pub fn new(
        date: NaiveDate,
        home: impl Into<String>,
        visitor: impl Into<String>,
        home_goals: u32,
        visitor_goals: u32,
    ) -> Self {
        Self {
            date,
            home: home.into(),
            visitor: visitor.into(),
            home_goals,
            visitor_goals,
        }
    }

    /// Three-way result from the goal counts, draws scored as 0.5
    pub fn result(&self) -> MatchResult {
        match self.home_goals.cmp(&self.visitor_goals) {
            std::cmp::Ordering::Greater => MatchResult::HomeWin,
            std::cmp::Ordering::Equal => MatchResult::Draw,
            std::cmp::Ordering::Less => MatchResult::VisitorWin,
        }
    }

    /// Strict result for datasets where a level score can only mean bad data
    /// (e.g. hockey results recorded after overtime/shootout)
    pub fn decisive_result(&self) -> Result<MatchResult> {
        match self.result() {
            MatchResult::Draw => Err(PuckedgeError::AmbiguousResult {
                home: self.home.clone(),
                visitor: self.visitor.clone(),
                date: self.date,
            }),
            r => Ok(r),
        }
    }
}

/// Outcome of a match from the home team's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    HomeWin,
    Draw,
    VisitorWin,
}

impl MatchResult {
    /// Score fed to the rating update for the home team: 1, 0.5 or 0
    pub fn home_score(&self) -> f64 {
        match self {
            MatchResult::HomeWin => 1.0,
            MatchResult::Draw => 0.5,
            MatchResult::VisitorWin => 0.0,
        }
    }

    /// Complement of [`home_score`](Self::home_score)
    pub fn visitor_score(&self) -> f64 {
        1.0 - self.home_score()
    }
}

/// How the rating processor treats a level score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawPolicy {
    /// Score a tie as 0.5 for both teams
    #[default]
    ScoreAsHalf,
    /// Abort with [`PuckedgeError::AmbiguousResult`]
    Reject,
}

/// Bookmaker quote for one fixture, decimal odds >= 1.0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OddsQuote {
    pub date: NaiveDate,
    pub home: String,
    pub visitor: String,
    pub home_odds: f64,
    pub draw_odds: f64,
    pub visitor_odds: f64,
}

/// Lookup seam for odds quotes, keyed by (date, visitor team)
///
/// `None` means no quote exists for the fixture; the simulator treats that
/// as "skip the match", never as an error.
#[cfg_attr(test, mockall::automock)]
pub trait OddsSource {
    fn find(&self, date: NaiveDate, visitor: &str) -> Option<OddsQuote>;
}

/// In-memory odds store
///
/// At most one quote per (date, visitor) key; inserting a duplicate key
/// replaces the earlier quote.
#[derive(Debug, Clone, Default)]
pub struct OddsBook {
    quotes: HashMap<(NaiveDate, String), OddsQuote>,
}

impl OddsBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_quotes(quotes: impl IntoIterator<Item = OddsQuote>) -> Self {
        let mut book = Self::new();
        for quote in quotes {
            book.insert(quote);
        }
        book
    }

    pub fn insert(&mut self, quote: OddsQuote) {
        self.quotes
            .insert((quote.date, quote.visitor.clone()), quote);
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

impl OddsSource for OddsBook {
    fn find(&self, date: NaiveDate, visitor: &str) -> Option<OddsQuote> {
        self.quotes.get(&(date, visitor.to_string())).cloned()
    }
}

/// Side of a two-way pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Home,
    Visitor,
}

/// One placed bet in a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetRecord {
    pub date: NaiveDate,
    pub home: String,
    pub visitor: String,
    pub side: Side,
    pub stake: f64,
    pub odds: f64,
    pub expected_return: f64,
    pub win_probability: f64,
    pub won: bool,
    pub balance_after: f64,
}

/// Chronological train/test split: the first `train_fraction` of the slice
/// trains the ratings, the remainder is held out
pub fn split_train_test(matches: &[Match], train_fraction: f64) -> (&[Match], &[Match]) {
    let fraction = train_fraction.clamp(0.0, 1.0);
    let split = (matches.len() as f64 * fraction).floor() as usize;
    matches.split_at(split.min(matches.len()))
}
