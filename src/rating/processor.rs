//! Sequential match processing and held-out prediction scoring

use super::{expected_win, RatingBook};
use crate::config::{ModelParams, RatingConfig};
use crate::error::Result;
use crate::types::{Match, MatchResult};
use serde::{Deserialize, Serialize};

/// Fold an ordered match sequence into a fresh [`RatingBook`]
///
/// Matches are processed strictly in the given order; the caller guarantees
/// chronological sorting. On error nothing is returned, so a partially
/// updated book never escapes.
pub fn process_matches(
    matches: &[Match],
    params: &ModelParams,
    config: &RatingConfig,
) -> Result<RatingBook> {
    let mut book = RatingBook::new(config.default_rating);
    for m in matches {
        book.apply(m, params, config.draw_policy)?;
    }
    Ok(book)
}

/// Hit/miss counts for the model's favourite on a held-out split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionStats {
    pub correct: usize,
    pub incorrect: usize,
    /// Drawn matches, which grade neither side
    pub skipped_draws: usize,
}

impl PredictionStats {
    /// Share of graded matches the favourite won
    pub fn accuracy(&self) -> f64 {
        let graded = self.correct + self.incorrect;
        if graded == 0 {
            0.0
        } else {
            self.correct as f64 / graded as f64
        }
    }
}

/// Score the ratings snapshot against matches it was not trained on
///
/// The favourite is the side with the higher modeled win probability (home
/// on an exact tie). Teams missing from the snapshot abort the evaluation:
/// that is a data-join error, not a gradable prediction.
pub fn evaluate_predictions(
    book: &RatingBook,
    matches: &[Match],
    factor: f64,
) -> Result<PredictionStats> {
    let mut stats = PredictionStats {
        correct: 0,
        incorrect: 0,
        skipped_draws: 0,
    };

    for m in matches {
        let rating_home = book.rating(&m.home)?;
        let rating_visitor = book.rating(&m.visitor)?;
        let (p_home, _) = expected_win(rating_home, rating_visitor, factor);

        match m.result() {
            MatchResult::Draw => stats.skipped_draws += 1,
            MatchResult::HomeWin if p_home >= 0.5 => stats.correct += 1,
            MatchResult::VisitorWin if p_home < 0.5 => stats.correct += 1,
            _ => stats.incorrect += 1,
        }
    }
    Ok(stats)
}
