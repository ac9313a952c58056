//! # CK Mining Tools
//!
//! Two small research tools for solo/pool mining analysis:
//!
//! - **Block race**: binomial tail probabilities of an ASIC and a CPU finding
//!   blocks against the same target, in sequential and concurrent scenarios.
//!   Evaluated in log space so trial counts near 10^17 stay finite.
//! - **Header reconstruction**: rebuild the coinbase, merkle root, 80-byte
//!   header and block hash of a stratum job, and check the hash against the
//!   job's compact target.
//!
//! Both are driven by a layered configuration (defaults, YAML/JSON file,
//! command-line flags) and log through `tracing`.

#![warn(
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications,
    clippy::all
)]
#![forbid(unsafe_code)]

pub mod config;
pub mod core;
pub mod error;
pub mod output;
pub mod race;
pub mod utils;

pub use crate::error::{Error, Result};
pub use config::Config;
pub use core::{reconstruct, BlockTemplate, CompactTarget, Hash256, Reconstruction};
pub use race::{compute_prob, RaceParameters, RaceReport};

/// Application name
pub const APP_NAME: &str = "ck-mining-tools";

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        config::{Config, OutputFormat},
        core::{reconstruct, BlockTemplate, Hash256},
        error::{Error, Result},
        race::{compute_prob, RaceParameters, RaceReport},
    };
}
