//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::models::{Nanoseconds, SearchOptionsOverrides};
use crate::infrastructure::config::{ConfigOverrides, GeneratorKind};

#[derive(Parser, Debug)]
#[command(name = "msibench")]
#[command(about = "Find the Maximum Sustainable Interval of a request generator", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to ./msibench.yaml when present)
    #[arg(short, long, global = true, env = "MSIBENCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Human-readable output instead of a JSON line
    #[arg(long, global = true)]
    pub human: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(flatten)]
    pub generator: GeneratorArgs,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search for the Maximum Sustainable Interval
    Measure(MeasureArgs),

    /// Run a single trial at a fixed interval
    Trial(TrialArgs),

    /// Show the effective configuration
    Config,
}

/// Generator selection flags
#[derive(Args, Debug, Default)]
pub struct GeneratorArgs {
    /// Generator to drive
    #[arg(long = "generator", value_enum, global = true)]
    pub kind: Option<GeneratorKind>,

    /// JSON-RPC management endpoint of the ping client
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Capacity of the simulated generator (ns per request)
    #[arg(long, global = true)]
    pub capacity: Option<Nanoseconds>,
}

#[derive(Args, Debug, Default)]
pub struct MeasureArgs {
    #[command(flatten)]
    pub search: SearchArgs,
}

#[derive(Args, Debug, Default)]
pub struct TrialArgs {
    /// TX interval to test (ns)
    #[arg(long)]
    pub interval: Nanoseconds,

    #[command(flatten)]
    pub search: SearchArgs,
}

/// Search option flags; unset flags fall back to config, env and defaults.
#[derive(Args, Debug, Default, Clone)]
pub struct SearchArgs {
    /// Minimum TX interval to test for (ns)
    #[arg(long)]
    pub interval_min: Option<Nanoseconds>,

    /// Maximum TX interval to test for (ns)
    #[arg(long)]
    pub interval_max: Option<Nanoseconds>,

    /// TX interval step (ns)
    #[arg(long)]
    pub interval_step: Option<Nanoseconds>,

    /// Expected number of requests per trial
    #[arg(long)]
    pub tx_count: Option<u64>,

    /// Minimum trial duration (secs)
    #[arg(long)]
    pub tx_duration_min: Option<f64>,

    /// Maximum trial duration (secs)
    #[arg(long)]
    pub tx_duration_max: Option<f64>,

    /// Delay before each generator run (secs)
    #[arg(long)]
    pub before_start_time: Option<f64>,

    /// No early failure during this period after start (secs)
    #[arg(long)]
    pub warmup_time: Option<f64>,

    /// Linger between stopping TX and reading final counters (secs)
    #[arg(long)]
    pub cooldown_time: Option<f64>,

    /// Counter sampling period (secs)
    #[arg(long)]
    pub read_counters_freq: Option<f64>,

    /// Pass if the final satisfy ratio is at least this
    #[arg(long)]
    pub satisfy_threshold: Option<f64>,

    /// Early-fail if a sampled satisfy ratio drops below this
    #[arg(long)]
    pub early_fail_threshold: Option<f64>,
}

impl From<SearchArgs> for SearchOptionsOverrides {
    fn from(args: SearchArgs) -> Self {
        Self {
            interval_min: args.interval_min,
            interval_max: args.interval_max,
            interval_step: args.interval_step,
            tx_count: args.tx_count,
            tx_duration_min: args.tx_duration_min,
            tx_duration_max: args.tx_duration_max,
            before_start_time: args.before_start_time,
            warmup_time: args.warmup_time,
            cooldown_time: args.cooldown_time,
            read_counters_freq: args.read_counters_freq,
            satisfy_threshold: args.satisfy_threshold,
            early_fail_threshold: args.early_fail_threshold,
        }
    }
}

impl Cli {
    /// Config overrides carried by the flags of this invocation.
    pub fn config_overrides(&self) -> ConfigOverrides {
        let search = match self.command {
            Commands::Measure(ref args) => args.search.clone().into(),
            Commands::Trial(ref args) => args.search.clone().into(),
            Commands::Config => SearchOptionsOverrides::default(),
        };
        ConfigOverrides {
            search,
            generator_kind: self.generator.kind,
            endpoint: self.generator.endpoint.clone(),
            capacity: self.generator.capacity,
            log_level: self.log_level.clone(),
        }
    }
}
