//! Generational genetic search over the model hyperparameters
//!
//! Treats the whole rating + betting pipeline as a black-box fitness
//! function: each individual is a [`ModelParams`] vector, scored by training
//! ratings on each evaluation period and replaying its held-out split
//! through the simulator. Selection, crossover and mutation all draw from
//! one seeded random source, so a fixed seed reproduces the search exactly.
//! Fitness evaluation is pure per individual and runs on the rayon pool.


use crate::backtest::simulate;
use crate::config::{BankrollConfig, ModelParams, OptimizerConfig, ParamRanges, RatingConfig};
use crate::error::{PuckedgeError, Result};
use crate::rating::process_matches;
use crate::types::{split_train_test, Match, OddsSource};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::info;

/// One season's worth of data: matches to train ratings on and a held-out
/// split to bet through
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationPeriod {
    pub training: Vec<Match>,
    pub holdout: Vec<Match>,
}

impl EvaluationPeriod {
    /// Chronological split of one period's matches
    pub fn from_split(matches: &[Match], train_fraction: f64) -> Self {
        let (training, holdout) = split_train_test(matches, train_fraction);
        Self {
            training: training.to_vec(),
            holdout: holdout.to_vec(),
        }
    }
}

/// Run the genetic search and return the fittest individual with its fitness
///
/// Per generation: score the whole population, then breed a full replacement
/// population by tournament selection, uniform per-parameter crossover and
/// per-parameter mutation (no elitism). After the final generation the
/// population is scored once more and the best individual is returned.
///
/// Fitness = `balance_weight * mean(final balances over periods)
/// - stability_weight * stddev(final balances over periods)`.
pub fn optimize<O: OddsSource + Sync>(
    periods: &[EvaluationPeriod],
    odds: &O,
    ranges: &ParamRanges,
    config: &OptimizerConfig,
    rating_config: &RatingConfig,
    bankroll_config: &BankrollConfig,
) -> Result<(ModelParams, f64)> {
    validate(periods, ranges, config)?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut population: Vec<ModelParams> = (0..config.population_size)
        .map(|_| random_individual(&mut rng, ranges))
        .collect();

    for generation in 0..config.generations {
        let fitnesses =
            evaluate_population(&population, periods, odds, config, rating_config, bankroll_config)?;
        log_generation(generation, &fitnesses);

        let mut next = Vec::with_capacity(config.population_size);
        while next.len() < config.population_size {
            let p1 = tournament_select(&mut rng, &fitnesses, config.tournament_size);
            let p2 = tournament_select(&mut rng, &fitnesses, config.tournament_size);
            let (mut c1, mut c2) = crossover(&mut rng, &population[p1], &population[p2]);
            mutate(&mut rng, &mut c1, ranges, config.mutation_rate);
            mutate(&mut rng, &mut c2, ranges, config.mutation_rate);
            next.push(c1);
            if next.len() < config.population_size {
                next.push(c2);
            }
        }
        population = next;
    }

    let fitnesses =
        evaluate_population(&population, periods, odds, config, rating_config, bankroll_config)?;
    let best = fitnesses
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(i, _)| i)
        .unwrap_or(0);

    Ok((population[best], fitnesses[best]))
}

fn validate(
    periods: &[EvaluationPeriod],
    ranges: &ParamRanges,
    config: &OptimizerConfig,
) -> Result<()> {
    if periods.is_empty() {
        return Err(PuckedgeError::InvalidConfig(
            "at least one evaluation period is required".into(),
        ));
    }
    if config.population_size == 0 {
        return Err(PuckedgeError::InvalidConfig(
            "population_size must be positive".into(),
        ));
    }
    if config.tournament_size == 0 {
        return Err(PuckedgeError::InvalidConfig(
            "tournament_size must be positive".into(),
        ));
    }
    let ordered = ranges.factor.0 <= ranges.factor.1
        && ranges.k.0 <= ranges.k.1
        && ranges.floor.0 <= ranges.floor.1
        && ranges.win_rate_floor.0 <= ranges.win_rate_floor.1
        && ranges.ceil.0 <= ranges.ceil.1;
    if !ordered {
        return Err(PuckedgeError::InvalidConfig(
            "every parameter range must satisfy low <= high".into(),
        ));
    }
    Ok(())
}

/// Score every individual; pure per individual, so population members run in
/// parallel and write to distinct slots
fn evaluate_population<O: OddsSource + Sync>(
    population: &[ModelParams],
    periods: &[EvaluationPeriod],
    odds: &O,
    config: &OptimizerConfig,
    rating_config: &RatingConfig,
    bankroll_config: &BankrollConfig,
) -> Result<Vec<f64>> {
    population
        .par_iter()
        .map(|individual| {
            evaluate_individual(individual, periods, odds, config, rating_config, bankroll_config)
        })
        .collect()
}

fn evaluate_individual<O: OddsSource>(
    individual: &ModelParams,
    periods: &[EvaluationPeriod],
    odds: &O,
    config: &OptimizerConfig,
    rating_config: &RatingConfig,
    bankroll_config: &BankrollConfig,
) -> Result<f64> {
    let mut balances = Vec::with_capacity(periods.len());
    for period in periods {
        let book = process_matches(&period.training, individual, rating_config)?;
        let report = simulate(&book, &period.holdout, odds, individual, bankroll_config)?;
        balances.push(report.final_balance);
    }
    Ok(config.balance_weight * mean(&balances) - config.stability_weight * std_dev(&balances))
}

fn random_individual(rng: &mut StdRng, ranges: &ParamRanges) -> ModelParams {
    ModelParams {
        factor: rng.random_range(ranges.factor.0..=ranges.factor.1),
        k: rng.random_range(ranges.k.0..=ranges.k.1) as f64,
        floor: rng.random_range(ranges.floor.0..=ranges.floor.1),
        win_rate_floor: rng.random_range(ranges.win_rate_floor.0..=ranges.win_rate_floor.1),
        ceil: rng.random_range(ranges.ceil.0..=ranges.ceil.1),
    }
}

/// Sample `tournament_size` distinct members and return the fittest index
fn tournament_select(rng: &mut StdRng, fitnesses: &[f64], tournament_size: usize) -> usize {
    let amount = tournament_size.min(fitnesses.len());
    rand::seq::index::sample(rng, fitnesses.len(), amount)
        .into_iter()
        .max_by(|&a, &b| fitnesses[a].total_cmp(&fitnesses[b]))
        .unwrap_or(0)
}

/// Uniform crossover: each parameter independently inherited from one parent
/// or the other with equal probability, children mirrored
fn crossover(rng: &mut StdRng, a: &ModelParams, b: &ModelParams) -> (ModelParams, ModelParams) {
    let mut c1 = *a;
    let mut c2 = *b;
    if rng.random_bool(0.5) {
        c1.factor = b.factor;
        c2.factor = a.factor;
    }
    if rng.random_bool(0.5) {
        c1.k = b.k;
        c2.k = a.k;
    }
    if rng.random_bool(0.5) {
        c1.floor = b.floor;
        c2.floor = a.floor;
    }
    if rng.random_bool(0.5) {
        c1.win_rate_floor = b.win_rate_floor;
        c2.win_rate_floor = a.win_rate_floor;
    }
    if rng.random_bool(0.5) {
        c1.ceil = b.ceil;
        c2.ceil = a.ceil;
    }
    (c1, c2)
}

/// Resample each parameter within its range with probability `mutation_rate`
fn mutate(rng: &mut StdRng, individual: &mut ModelParams, ranges: &ParamRanges, rate: f64) {
    if rng.random::<f64>() < rate {
        individual.factor = rng.random_range(ranges.factor.0..=ranges.factor.1);
    }
    if rng.random::<f64>() < rate {
        individual.k = rng.random_range(ranges.k.0..=ranges.k.1) as f64;
    }
    if rng.random::<f64>() < rate {
        individual.floor = rng.random_range(ranges.floor.0..=ranges.floor.1);
    }
    if rng.random::<f64>() < rate {
        individual.win_rate_floor =
            rng.random_range(ranges.win_rate_floor.0..=ranges.win_rate_floor.1);
    }
    if rng.random::<f64>() < rate {
        individual.ceil = rng.random_range(ranges.ceil.0..=ranges.ceil.1);
    }
}

fn log_generation(generation: usize, fitnesses: &[f64]) {
    let best = fitnesses.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    info!(
        generation,
        best_fitness = best,
        mean_fitness = mean(fitnesses),
        "generation evaluated"
    );
}

fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        0.0
    } else {
        xs.iter().sum::<f64>() / xs.len() as f64
    }
}

/// Population standard deviation
fn std_dev(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    let m = mean(xs);
    let variance = xs.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / xs.len() as f64;
    variance.sqrt()
}
