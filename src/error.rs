//! Error types for rating, simulation and search runs

use chrono::NaiveDate;
use thiserror::Error;

/// Main error type for the engine
///
/// Missing odds quotes are deliberately not represented here: the simulator
/// recovers from them locally by skipping the match, so `OddsSource::find`
/// returns an `Option` instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PuckedgeError {
    /// A rating was requested for a team absent from the snapshot.
    ///
    /// Only the match processor may default-initialize ratings; anywhere
    /// else an unseen team means the caller joined the wrong data sets.
    #[error("unknown team: {team} has no rating in this snapshot")]
    UnknownTeam { team: String },

    /// A match ended level while draws are not modeled.
    #[error("ambiguous result: {home} vs {visitor} on {date} ended level and draws are not modeled")]
    AmbiguousResult {
        home: String,
        visitor: String,
        date: NaiveDate,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, PuckedgeError>;
