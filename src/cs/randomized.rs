pub mod bucket_load;

pub use bucket_load::{
    bucket_load_statistics, load_factor, load_factor_stats_with_rng, par_load_factor_stats,
    run_trial, BucketLoadConfig, LoadFactorStats,
};
