//! Pairwise Elo rating model and per-team rating state
//!
//! The model is deliberately tiny: a logistic win-probability curve over a
//! rating gap, and a linear update pulling each rating toward the observed
//! outcome. Everything stateful lives in [`RatingBook`], an explicit owned
//! container passed into and returned from processing calls.

mod processor;

#[cfg(test)]
mod tests;

pub use processor::{evaluate_predictions, process_matches, PredictionStats};

use crate::config::ModelParams;
use crate::error::{PuckedgeError, Result};
use crate::types::{DrawPolicy, Match};
use std::collections::HashMap;

/// Win probabilities for a pair of ratings
///
/// Computed in the numerically stable logistic form, which saturates to
/// 0/1 on extreme rating gaps instead of overflowing the exponential.
/// The two probabilities always sum to 1, and equal ratings give exactly
/// (0.5, 0.5).
pub fn expected_win(rating_a: f64, rating_b: f64, factor: f64) -> (f64, f64) {
    let p_a = 1.0 / (1.0 + ((rating_b - rating_a) / factor).exp());
    (p_a, 1.0 - p_a)
}

/// One Elo step: `rating + k * (actual - expected)`
///
/// `actual` is 1 for a win, 0.5 for a draw, 0 for a loss.
pub fn update_elo(rating: f64, expected: f64, actual: f64, k: f64) -> f64 {
    rating + k * (actual - expected)
}

/// Owned rating state: team -> current rating, team -> rating history
///
/// Histories are append-only, one entry per match the team played, oldest
/// first. A team's rating is default-initialized the first time the
/// processing path references it; reads through [`rating`](Self::rating)
/// never initialize and fail on unseen teams instead.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingBook {
    default_rating: f64,
    ratings: HashMap<String, f64>,
    histories: HashMap<String, Vec<f64>>,
}

impl RatingBook {
    pub fn new(default_rating: f64) -> Self {
        Self {
            default_rating,
            ratings: HashMap::new(),
            histories: HashMap::new(),
        }
    }

    /// Seed a team at a known rating, e.g. when restoring a stored snapshot
    pub fn insert(&mut self, team: impl Into<String>, rating: f64) {
        let team = team.into();
        self.histories.entry(team.clone()).or_default();
        self.ratings.insert(team, rating);
    }

    /// Current rating of a team already present in the book
    pub fn rating(&self, team: &str) -> Result<f64> {
        self.ratings
            .get(team)
            .copied()
            .ok_or_else(|| PuckedgeError::UnknownTeam {
                team: team.to_string(),
            })
    }

    /// Rating after each match the team played, oldest first
    pub fn history(&self, team: &str) -> Option<&[f64]> {
        self.histories.get(team).map(Vec::as_slice)
    }

    pub fn contains(&self, team: &str) -> bool {
        self.ratings.contains_key(team)
    }

    pub fn teams(&self) -> impl Iterator<Item = &str> {
        self.ratings.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    /// Fold one match into the book
    ///
    /// Order matters: a team's rating before a match is exactly its rating
    /// after the most recent prior match it played, so callers must apply
    /// matches in chronological order. The result is derived before any
    /// state changes, so a rejected draw leaves the book untouched.
    pub fn apply(&mut self, m: &Match, params: &ModelParams, policy: DrawPolicy) -> Result<()> {
        let result = match policy {
            DrawPolicy::ScoreAsHalf => m.result(),
            DrawPolicy::Reject => m.decisive_result()?,
        };

        let rating_visitor = self.rating_or_default(&m.visitor);
        let rating_home = self.rating_or_default(&m.home);

        let (expected_visitor, expected_home) =
            expected_win(rating_visitor, rating_home, params.factor);

        self.record(
            &m.visitor,
            update_elo(rating_visitor, expected_visitor, result.visitor_score(), params.k),
        );
        self.record(
            &m.home,
            update_elo(rating_home, expected_home, result.home_score(), params.k),
        );
        Ok(())
    }

    fn rating_or_default(&mut self, team: &str) -> f64 {
        if let Some(&rating) = self.ratings.get(team) {
            return rating;
        }
        self.insert(team.to_string(), self.default_rating);
        self.default_rating
    }

    fn record(&mut self, team: &str, rating: f64) {
        self.ratings.insert(team.to_string(), rating);
        self.histories.entry(team.to_string()).or_default().push(rating);
    }
}
