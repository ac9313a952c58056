//! Configuration management for the mining tools
//!
//! Built-in defaults reproduce the research constants. A YAML or JSON file
//! can replace any of them, and command-line flags override both.

use crate::core::BlockTemplate;
use crate::error::{Error, Result};
use crate::race::RaceParameters;
use crate::utils::units::{parse_hash_rate, parse_with_unit_prefix};
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(
    name = "ck-mining-tools",
    about = "Block race probabilities and coinbase/header hash reconstruction",
    version,
    author
)]
pub struct Args {
    /// Configuration file path (YAML or JSON)
    #[arg(short, long, value_name = "FILE", env = "CK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log level or filter directive
    #[arg(short, long, env = "CK_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Log format (plain, json)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Result format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Plain, global = true)]
    pub output: OutputFormat,

    /// Print the effective configuration and exit
    #[arg(long, global = true)]
    pub print_config: bool,

    /// Computation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available computations
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Evaluate the ASIC-vs-CPU block race
    Race(RaceArgs),
    /// Rebuild the merkle root and block hash of a mining job
    Header(HeaderArgs),
}

impl Command {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Command::Race(_) => "race",
            Command::Header(_) => "header",
        }
    }
}

/// Race overrides
#[derive(clap::Args, Debug, Clone, Default)]
pub struct RaceArgs {
    /// ASIC hash rate, unit prefixes allowed (e.g. 13T)
    #[arg(long)]
    pub asic_rate: Option<String>,

    /// CPU hash rate, unit prefixes allowed (e.g. 67G)
    #[arg(long)]
    pub cpu_rate: Option<String>,

    /// Per-hash success probability (default: 1 / ASIC rate)
    #[arg(long)]
    pub success_probability: Option<f64>,

    /// Sequential round duration in seconds
    #[arg(long)]
    pub sequential_secs: Option<f64>,

    /// Concurrent window duration in seconds
    #[arg(long)]
    pub concurrent_secs: Option<f64>,

    /// Blocks needed to win a sequential round
    #[arg(long)]
    pub threshold: Option<u64>,

    /// Sequential rounds, and blocks needed in the concurrent window
    #[arg(long)]
    pub rounds: Option<u32>,
}

/// Mining job overrides
#[derive(clap::Args, Debug, Clone, Default)]
pub struct HeaderArgs {
    /// Coinbase transaction up to the extra-nonces (hex)
    #[arg(long)]
    pub coinbase1: Option<String>,

    /// Pool-assigned extra-nonce (hex)
    #[arg(long)]
    pub extranonce1: Option<String>,

    /// Miner-rolled extra-nonce (hex)
    #[arg(long)]
    pub extranonce2: Option<String>,

    /// Coinbase transaction after the extra-nonces (hex)
    #[arg(long)]
    pub coinbase2: Option<String>,

    /// Header nonce (hex, big-endian)
    #[arg(long)]
    pub nonce: Option<String>,

    /// Compact target nBits (hex, big-endian)
    #[arg(long)]
    pub bits: Option<String>,

    /// Header timestamp nTime (hex, big-endian)
    #[arg(long)]
    pub time: Option<String>,

    /// Previous block hash (hex, display order)
    #[arg(long)]
    pub previous_block_hash: Option<String>,

    /// Block version (hex, big-endian)
    #[arg(long)]
    pub block_version: Option<String>,

    /// Merkle branch hash; repeat for each level
    #[arg(long = "merkle-branch", value_name = "HEX")]
    pub merkle_branch: Vec<String>,
}

/// Result rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Bare values, one per line
    Plain,
    /// Pretty-printed JSON report
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Plain => write!(f, "plain"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Race configuration
    #[serde(default)]
    pub race: RaceConfig,

    /// Mining job to reconstruct
    #[serde(default)]
    pub header: BlockTemplate,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Race configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceConfig {
    /// ASIC hash rate with optional unit prefix
    #[serde(default = "default_asic_rate")]
    pub asic_rate: String,

    /// CPU hash rate with optional unit prefix
    #[serde(default = "default_cpu_rate")]
    pub cpu_rate: String,

    /// Per-hash success probability; `1 / asic_rate` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_probability: Option<f64>,

    /// Sequential round duration in seconds
    #[serde(default = "default_sequential_secs")]
    pub sequential_secs: f64,

    /// Concurrent window duration in seconds
    #[serde(default = "default_concurrent_secs")]
    pub concurrent_secs: f64,

    /// Blocks needed to win a sequential round
    #[serde(default = "default_threshold")]
    pub threshold: u64,

    /// Sequential rounds, and blocks needed in the concurrent window
    #[serde(default = "default_rounds")]
    pub rounds: u32,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (plain, json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_asic_rate() -> String {
    "13T".to_string()
}

fn default_cpu_rate() -> String {
    "67G".to_string()
}

fn default_sequential_secs() -> f64 {
    10.0
}

fn default_concurrent_secs() -> f64 {
    62.0
}

fn default_threshold() -> u64 {
    1
}

fn default_rounds() -> u32 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "plain".to_string()
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            asic_rate: default_asic_rate(),
            cpu_rate: default_cpu_rate(),
            success_probability: None,
            sequential_secs: default_sequential_secs(),
            concurrent_secs: default_concurrent_secs(),
            threshold: default_threshold(),
            rounds: default_rounds(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl RaceConfig {
    /// Resolve rates and the success probability into race parameters
    pub fn parameters(&self) -> Result<RaceParameters> {
        let asic_rate = parse_hash_rate(&self.asic_rate)?;
        let cpu_rate = parse_hash_rate(&self.cpu_rate)?;
        if asic_rate <= 0.0 {
            return Err(Error::config("ASIC rate must be greater than 0"));
        }

        let params = RaceParameters {
            asic_rate,
            cpu_rate,
            success_probability: self.success_probability.unwrap_or(1.0 / asic_rate),
            sequential_secs: self.sequential_secs,
            concurrent_secs: self.concurrent_secs,
            threshold: self.threshold,
            rounds: self.rounds,
        };
        params.validate()?;
        Ok(params)
    }

    fn apply(&mut self, args: &RaceArgs) {
        if let Some(rate) = &args.asic_rate {
            self.asic_rate = rate.clone();
        }
        if let Some(rate) = &args.cpu_rate {
            self.cpu_rate = rate.clone();
        }
        if args.success_probability.is_some() {
            self.success_probability = args.success_probability;
        }
        if let Some(secs) = args.sequential_secs {
            self.sequential_secs = secs;
        }
        if let Some(secs) = args.concurrent_secs {
            self.concurrent_secs = secs;
        }
        if let Some(threshold) = args.threshold {
            self.threshold = threshold;
        }
        if let Some(rounds) = args.rounds {
            self.rounds = rounds;
        }
    }
}

fn apply_header_args(template: &mut BlockTemplate, args: &HeaderArgs) {
    let overrides = [
        (&mut template.coinbase1, &args.coinbase1),
        (&mut template.extranonce1, &args.extranonce1),
        (&mut template.extranonce2, &args.extranonce2),
        (&mut template.coinbase2, &args.coinbase2),
        (&mut template.nonce, &args.nonce),
        (&mut template.bits, &args.bits),
        (&mut template.time, &args.time),
        (&mut template.previous_block_hash, &args.previous_block_hash),
        (&mut template.version, &args.block_version),
    ];
    for (field, value) in overrides {
        if let Some(value) = value {
            *field = value.clone();
        }
    }

    if !args.merkle_branch.is_empty() {
        template.merkle_branch = args.merkle_branch.clone();
    }
}

impl Config {
    /// Load configuration from file
    ///
    /// `.json` files are parsed as JSON, everything else as YAML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read config file {:?}: {}", path, e)))?;

        let config: Self = if path.extension().and_then(|s| s.to_str()) == Some("json") {
            serde_json::from_str(&contents)?
        } else {
            serde_yaml::from_str(&contents)?
        };

        Ok(config)
    }

    /// Build the effective configuration: defaults, then file, then flags
    ///
    /// Validation runs once, after the flags are applied, and only covers the
    /// sections the selected command reads.
    pub fn from_args(args: &Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(level) = &args.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &args.log_format {
            config.logging.format = format.clone();
        }

        match &args.command {
            Command::Race(race_args) => config.race.apply(race_args),
            Command::Header(header_args) => apply_header_args(&mut config.header, header_args),
        }

        config.validate(&args.command)?;
        Ok(config)
    }

    /// Validate the sections `command` depends on
    ///
    /// Header fields are checked when they are decoded.
    pub fn validate(&self, command: &Command) -> Result<()> {
        if let Command::Race(_) = command {
            self.validate_race()?;
        }

        match self.logging.format.as_str() {
            "plain" | "json" => Ok(()),
            other => Err(Error::config(format!(
                "Invalid log format: {}. Must be one of: plain, json",
                other
            ))),
        }
    }

    fn validate_race(&self) -> Result<()> {
        for (name, rate) in [
            ("ASIC rate", &self.race.asic_rate),
            ("CPU rate", &self.race.cpu_rate),
        ] {
            parse_with_unit_prefix(rate)
                .map_err(|e| Error::config(format!("Invalid {}: {}", name, e)))?;
        }

        self.race
            .parameters()
            .map(|_| ())
            .map_err(|e| Error::config(e.to_string()))
    }
}
