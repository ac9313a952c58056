//! ASIC-vs-CPU race scenarios
//!
//! Evaluates the sequential and concurrent race between a specialized
//! searcher (ASIC) and a general-purpose one (CPU) against a target tuned so
//! the ASIC finds one block per second on average.

use super::{compute_prob, repeated_rounds};
use crate::error::{Error, Result};
use crate::utils::format_hashrate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Inputs of a race evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaceParameters {
    /// ASIC hash rate (hashes per second)
    pub asic_rate: f64,
    /// CPU hash rate (hashes per second)
    pub cpu_rate: f64,
    /// Per-hash success probability
    pub success_probability: f64,
    /// Duration of one sequential round in seconds
    pub sequential_secs: f64,
    /// Duration of the concurrent window in seconds
    pub concurrent_secs: f64,
    /// Blocks needed to win a sequential round
    pub threshold: u64,
    /// Sequential rounds, and blocks needed in the concurrent window
    pub rounds: u32,
}

impl Default for RaceParameters {
    fn default() -> Self {
        let asic_rate = 13e12;
        Self {
            asic_rate,
            cpu_rate: 67e6 * 1000.0,
            success_probability: 1.0 / asic_rate,
            sequential_secs: 10.0,
            concurrent_secs: 62.0,
            threshold: 1,
            rounds: 5,
        }
    }
}

impl RaceParameters {
    /// Check the parameters describe a meaningful race
    pub fn validate(&self) -> Result<()> {
        for (name, rate) in [("ASIC rate", self.asic_rate), ("CPU rate", self.cpu_rate)] {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(Error::invalid_parameter(format!(
                    "{} must be positive, got {}",
                    name, rate
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.success_probability) {
            return Err(Error::invalid_parameter(format!(
                "Success probability must be within [0, 1], got {}",
                self.success_probability
            )));
        }

        for (name, secs) in [
            ("Sequential window", self.sequential_secs),
            ("Concurrent window", self.concurrent_secs),
        ] {
            if !secs.is_finite() || secs < 0.0 {
                return Err(Error::invalid_parameter(format!(
                    "{} must be a non-negative number of seconds, got {}",
                    name, secs
                )));
            }
        }

        if self.rounds == 0 {
            return Err(Error::invalid_parameter("Rounds must be greater than 0"));
        }

        Ok(())
    }

    /// Hashes the ASIC performs in one sequential round
    pub fn asic_sequential_trials(&self) -> f64 {
        self.asic_rate * self.sequential_secs
    }

    /// Hashes the CPU performs in one sequential round
    pub fn cpu_sequential_trials(&self) -> f64 {
        self.cpu_rate * self.sequential_secs
    }

    /// Hashes the ASIC performs in the concurrent window
    pub fn asic_concurrent_trials(&self) -> f64 {
        self.asic_rate * self.concurrent_secs
    }

    /// Hashes the CPU performs in the concurrent window
    pub fn cpu_concurrent_trials(&self) -> f64 {
        self.cpu_rate * self.concurrent_secs
    }

    /// Evaluate both race scenarios
    pub fn evaluate(&self) -> Result<RaceReport> {
        self.validate()?;

        info!(
            asic_rate = %format_hashrate(self.asic_rate),
            cpu_rate = %format_hashrate(self.cpu_rate),
            p = self.success_probability,
            "Evaluating block race"
        );

        let p = self.success_probability;
        let sequential_asic = compute_prob(self.asic_sequential_trials(), p, self.threshold);
        let sequential_cpu_round = compute_prob(self.cpu_sequential_trials(), p, self.threshold);
        let sequential_cpu_all_rounds = repeated_rounds(sequential_cpu_round, self.rounds);
        debug!(
            sequential_asic,
            sequential_cpu_round, sequential_cpu_all_rounds, "Sequential race evaluated"
        );

        let concurrent_threshold = u64::from(self.rounds);
        let concurrent_asic = compute_prob(self.asic_concurrent_trials(), p, concurrent_threshold);
        let concurrent_cpu = compute_prob(self.cpu_concurrent_trials(), p, concurrent_threshold);
        debug!(concurrent_asic, concurrent_cpu, "Concurrent race evaluated");

        Ok(RaceReport {
            parameters: *self,
            sequential_asic,
            sequential_cpu_round,
            sequential_cpu_all_rounds,
            concurrent_asic,
            concurrent_cpu,
        })
    }
}

/// Results of both race scenarios
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceReport {
    /// Inputs the report was computed from
    pub parameters: RaceParameters,
    /// ASIC finds at least `threshold` blocks in one sequential round
    pub sequential_asic: f64,
    /// CPU finds at least `threshold` blocks in one sequential round
    pub sequential_cpu_round: f64,
    /// CPU wins every one of `rounds` sequential rounds
    pub sequential_cpu_all_rounds: f64,
    /// ASIC finds at least `rounds` blocks in the concurrent window
    pub concurrent_asic: f64,
    /// CPU finds at least `rounds` blocks in the concurrent window
    pub concurrent_cpu: f64,
}

impl RaceReport {
    /// Sequential block values, in print order
    pub fn sequential(&self) -> [f64; 3] {
        [
            self.sequential_asic,
            self.sequential_cpu_round,
            self.sequential_cpu_all_rounds,
        ]
    }

    /// Concurrent block values, in print order
    pub fn concurrent(&self) -> [f64; 2] {
        [self.concurrent_asic, self.concurrent_cpu]
    }
}
