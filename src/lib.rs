//! Elo Rating and Value Betting Engine
//!
//! Computes dynamic skill ratings for competing teams from chronological
//! match outcomes, compares the modeled win probabilities against bookmaker
//! odds to find positive-expected-value bets, and simulates the compounding
//! effect of acting on that rule over a bankroll. A genetic search tunes the
//! model hyperparameters with the whole pipeline as its fitness function.
//!
//! ## Architecture
//!
//! ```text
//! Matches → Rating (sequential Elo fold) → Strategy (pick_team) → Backtest (bankroll)
//!                                               ↑                       ↑
//!                                       Odds (OddsSource)      Optimizer (genetic search)
//! ```
//!
//! Data acquisition, persistence and presentation are external collaborators:
//! callers hand the engine clean, chronologically sorted records.

pub mod backtest;
pub mod config;
pub mod error;
pub mod optimizer;
pub mod rating;
pub mod strategy;
pub mod types;
