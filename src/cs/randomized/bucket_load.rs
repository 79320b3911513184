//! # Bucket Load Simulation
//!
//! Monte Carlo estimate of how full a bucketed table gets before buckets start overflowing.
//!
//! Each trial throws elements into `bucket_count` buckets chosen uniformly at random. An
//! insertion into a bucket whose counter equals `bucket_capacity` is an *overflow event*; the
//! element is still counted, so counters may grow past the capacity. Once more than
//! `overflow_threshold` overflow events have happened the trial stops and reports the total
//! number of inserted elements. Dividing by `bucket_count * bucket_capacity` gives the load
//! factor reached, which can exceed `1.0`.
//!
//! Only the insertion that finds a bucket exactly at capacity counts as an overflow, so every
//! bucket contributes at most one event. A trial therefore needs more buckets than the
//! threshold to terminate, which [`BucketLoadConfig::validate`] enforces.
//!
//! ```rust
//! use mersenne_hash::cs::randomized::bucket_load::{load_factor_stats_with_rng, BucketLoadConfig};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let config = BucketLoadConfig::new(100, 16).with_trials(200);
//! let stats = load_factor_stats_with_rng(&config, &mut StdRng::seed_from_u64(1)).unwrap();
//! assert!(stats.min <= stats.mean && stats.mean <= stats.max);
//! ```

use log::{debug, trace};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;

use crate::cs::error::{Error, Result};

/// Overflow events tolerated before a trial stops.
pub const DEFAULT_OVERFLOW_THRESHOLD: usize = 3;

/// Trials aggregated by [`bucket_load_statistics`].
pub const DEFAULT_TRIALS: usize = 10_000;

/// Parameters of a load simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketLoadConfig {
    /// Number of buckets
    pub bucket_count: usize,
    /// Nominal elements per bucket
    pub bucket_capacity: usize,
    /// A trial stops once the overflow count exceeds this value
    pub overflow_threshold: usize,
    /// Independent trials per aggregate
    pub trials: usize,
}

impl BucketLoadConfig {
    /// Configuration with [`DEFAULT_OVERFLOW_THRESHOLD`] and [`DEFAULT_TRIALS`].
    pub fn new(bucket_count: usize, bucket_capacity: usize) -> Self {
        Self {
            bucket_count,
            bucket_capacity,
            overflow_threshold: DEFAULT_OVERFLOW_THRESHOLD,
            trials: DEFAULT_TRIALS,
        }
    }

    pub fn with_overflow_threshold(mut self, overflow_threshold: usize) -> Self {
        self.overflow_threshold = overflow_threshold;
        self
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Total nominal capacity `bucket_count * bucket_capacity`.
    pub fn capacity(&self) -> usize {
        self.bucket_count * self.bucket_capacity
    }

    /// Checks that trials terminate and load factors are defined.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if any count is zero or if
    /// `bucket_count <= overflow_threshold`.
    pub fn validate(&self) -> Result<()> {
        if self.bucket_capacity == 0 {
            return Err(Error::invalid_configuration(
                "bucket_capacity must be positive",
            ));
        }
        if self.trials == 0 {
            return Err(Error::invalid_configuration("trials must be positive"));
        }
        check_termination(self.bucket_count, self.overflow_threshold)
    }
}

/// Aggregate load factor over many trials.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadFactorStats {
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

impl LoadFactorStats {
    fn from_samples(samples: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for x in samples {
            count += 1;
            sum += x;
            min = min.min(x);
            max = max.max(x);
        }
        (count > 0).then(|| Self {
            min,
            mean: sum / count as f64,
            max,
        })
    }

    /// `(min, mean, max)`
    pub fn as_tuple(&self) -> (f64, f64, f64) {
        (self.min, self.mean, self.max)
    }
}

fn check_termination(bucket_count: usize, overflow_threshold: usize) -> Result<()> {
    if bucket_count == 0 {
        return Err(Error::invalid_configuration("bucket_count must be positive"));
    }
    if bucket_count <= overflow_threshold {
        return Err(Error::invalid_configuration(format!(
            "bucket_count = {bucket_count} must exceed overflow_threshold = {overflow_threshold}, \
             each bucket overflows at most once"
        )));
    }
    Ok(())
}

/// Inserts elements into random buckets until more than `overflow_threshold` overflow events
/// occurred, returning the total number of inserted elements.
///
/// A `bucket_capacity` of zero is allowed here, unlike in [`BucketLoadConfig::validate`]: every
/// first insertion into a bucket then overflows. Only load factors need a positive capacity.
///
/// # Errors
///
/// Returns [`Error::InvalidConfiguration`] if `bucket_count` is zero or not greater than
/// `overflow_threshold`.
pub fn run_trial<R: Rng + ?Sized>(
    bucket_count: usize,
    bucket_capacity: usize,
    overflow_threshold: usize,
    rng: &mut R,
) -> Result<usize> {
    check_termination(bucket_count, overflow_threshold)?;
    Ok(simulate(bucket_count, bucket_capacity, overflow_threshold, rng))
}

fn simulate<R: Rng + ?Sized>(
    bucket_count: usize,
    bucket_capacity: usize,
    overflow_threshold: usize,
    rng: &mut R,
) -> usize {
    let mut counters = vec![0usize; bucket_count];
    let mut overflows = 0usize;

    while overflows <= overflow_threshold {
        let index = rng.gen_range(0..bucket_count);
        if counters[index] == bucket_capacity {
            overflows += 1;
        }
        counters[index] += 1;
    }

    let inserted: usize = counters.iter().sum();
    trace!("trial inserted {inserted} elements into {bucket_count} buckets");
    inserted
}

/// Load factor reached by one trial: inserted elements over total nominal capacity.
pub fn load_factor<R: Rng + ?Sized>(config: &BucketLoadConfig, rng: &mut R) -> Result<f64> {
    config.validate()?;
    Ok(trial_load_factor(config, rng))
}

fn trial_load_factor<R: Rng + ?Sized>(config: &BucketLoadConfig, rng: &mut R) -> f64 {
    let inserted = simulate(
        config.bucket_count,
        config.bucket_capacity,
        config.overflow_threshold,
        rng,
    );
    inserted as f64 / config.capacity() as f64
}

/// Runs `config.trials` sequential trials drawing from `rng` and aggregates their load factors.
pub fn load_factor_stats_with_rng<R: Rng + ?Sized>(
    config: &BucketLoadConfig,
    rng: &mut R,
) -> Result<LoadFactorStats> {
    config.validate()?;
    let factors = (0..config.trials).map(|_| trial_load_factor(config, &mut *rng));
    let stats = LoadFactorStats::from_samples(factors)
        .ok_or_else(|| Error::invalid_configuration("trials must be positive"))?;
    debug!(
        "{} trials over {} x {} buckets: {:?}",
        config.trials, config.bucket_count, config.bucket_capacity, stats
    );
    Ok(stats)
}

/// Runs the trials on the rayon thread pool.
///
/// Trial `i` draws from `ChaCha20Rng` seeded with `seed` on stream `i`, so the result depends
/// only on `seed` and `config`, not on how trials are scheduled.
pub fn par_load_factor_stats(config: &BucketLoadConfig, seed: u64) -> Result<LoadFactorStats> {
    config.validate()?;
    let factors: Vec<f64> = (0..config.trials)
        .into_par_iter()
        .map(|trial| {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            rng.set_stream(trial as u64);
            trial_load_factor(config, &mut rng)
        })
        .collect();
    let stats = LoadFactorStats::from_samples(factors)
        .ok_or_else(|| Error::invalid_configuration("trials must be positive"))?;
    debug!(
        "{} parallel trials over {} x {} buckets: {:?}",
        config.trials, config.bucket_count, config.bucket_capacity, stats
    );
    Ok(stats)
}

/// `(min, mean, max)` load factor over [`DEFAULT_TRIALS`] trials with
/// [`DEFAULT_OVERFLOW_THRESHOLD`], using the thread-local generator.
pub fn bucket_load_statistics(
    bucket_count: usize,
    bucket_capacity: usize,
) -> Result<LoadFactorStats> {
    let config = BucketLoadConfig::new(bucket_count, bucket_capacity);
    load_factor_stats_with_rng(&config, &mut rand::thread_rng())
}
