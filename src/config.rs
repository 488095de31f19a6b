//! Configuration for the rating model, betting strategy and search

use crate::types::DrawPolicy;
use serde::{Deserialize, Serialize};

/// Tunable hyperparameters of the rating + betting pipeline
///
/// This is the vector the genetic search optimizes. `k` carries integral
/// values (the search samples it as an integer) but is stored as `f64`
/// because the update rule consumes it as a scalar step size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParams {
    /// Logistic scaling constant: how sharply win probability responds to a
    /// rating gap
    pub factor: f64,
    /// Rating step size per match
    pub k: f64,
    /// Minimum expected return accepted for a bet (exclusive)
    pub floor: f64,
    /// Minimum modeled win probability accepted for a bet (exclusive)
    pub win_rate_floor: f64,
    /// Maximum expected return accepted for a bet (exclusive); anything
    /// larger is distrusted as a mispriced quote or a model artifact
    pub ceil: f64,
}

impl Default for ModelParams {
    fn default() -> Self {
        // Best individual from a full search over the 22-23 and 23-24 seasons
        Self {
            factor: 461.335_785_739_137_1,
            k: 49.0,
            floor: 0.590_822_295_286_597_6,
            win_rate_floor: 0.197_670_748_500_122_34,
            ceil: 1.398_889_540_374_118,
        }
    }
}

/// Configuration of the rating processor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Rating assigned to a team the first time it is referenced
    pub default_rating: f64,
    pub draw_policy: DrawPolicy,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            default_rating: 1000.0,
            draw_policy: DrawPolicy::default(),
        }
    }
}

/// Bankroll handling for the betting simulator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankrollConfig {
    pub initial_balance: f64,
    /// Stake = balance * expected_return / stake_divisor, capped at balance
    pub stake_divisor: f64,
}

impl Default for BankrollConfig {
    fn default() -> Self {
        Self {
            initial_balance: 10_000.0,
            stake_divisor: 20.0,
        }
    }
}

/// Genetic search settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    pub population_size: usize,
    pub generations: usize,
    /// Per-parameter probability of resampling during mutation
    pub mutation_rate: f64,
    /// Individuals sampled (without replacement) per tournament
    pub tournament_size: usize,
    /// Weight of the mean final balance in the fitness
    pub balance_weight: f64,
    /// Weight of the balance standard deviation penalty in the fitness
    pub stability_weight: f64,
    /// Seed for the search's random source; identical seeds reproduce the
    /// search exactly
    pub seed: u64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            generations: 10,
            mutation_rate: 0.1,
            tournament_size: 5,
            balance_weight: 1.0,
            stability_weight: 0.25,
            seed: 0,
        }
    }
}

/// Closed sampling ranges for each tunable parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamRanges {
    pub factor: (f64, f64),
    pub k: (i64, i64),
    pub floor: (f64, f64),
    pub win_rate_floor: (f64, f64),
    pub ceil: (f64, f64),
}

impl Default for ParamRanges {
    fn default() -> Self {
        Self {
            factor: (100.0, 800.0),
            k: (10, 50),
            floor: (0.3, 0.6),
            win_rate_floor: (0.1, 0.5),
            ceil: (0.9, 1.5),
        }
    }
}
