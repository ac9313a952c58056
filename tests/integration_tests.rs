//! End-to-end checks of both computations through the public API

use ck_mining_tools::config::{Args, Config, OutputFormat};
use ck_mining_tools::output::{render_header, render_race};
use ck_mining_tools::prelude::*;
use clap::Parser;

const MERKLE_ROOT: &str = "e2b6ca3e31334652aea8ad1c65ebc283c1ab9fc9a5c0336f91665bc3f02e12e4";
const BLOCK_HASH: &str = "00000000000ca519334a48cf1aa924e0c8c1ca8944c7075352117671db50737a";

fn relative_eq(actual: f64, expected: f64, tolerance: f64) -> bool {
    (actual - expected).abs() <= tolerance * expected.abs()
}

#[test]
fn test_reference_job_reconstruction() {
    let result = reconstruct(&BlockTemplate::default()).unwrap();

    assert_eq!(result.merkle_root.to_hex(), MERKLE_ROOT);
    assert_eq!(result.block_hash().to_hex(), BLOCK_HASH);
    assert!(result.block_hash().to_hex().starts_with("00000000"));
    assert!(result.meets_target());
}

#[test]
fn test_reference_race() {
    let report = RaceParameters::default().evaluate().unwrap();

    assert!(relative_eq(report.sequential_asic, 0.9999546000702375, 1e-12));
    assert!(relative_eq(report.sequential_cpu_round, 0.050232880244907796, 1e-10));
    assert!(relative_eq(report.sequential_cpu_all_rounds, 3.1984561564602094e-07, 1e-9));
    assert_eq!(report.concurrent_asic, 1.0);
    assert!(relative_eq(report.concurrent_cpu, 2.1293028842239714e-05, 1e-6));
}

#[test]
fn test_headline_probabilities() {
    // one expected block
    let prob = compute_prob(1.3e13, 1.0 / 1.3e13, 1);
    assert!((prob - 0.6321205588285577).abs() < 1e-9);

    // CPU vs the same target for ten seconds
    let prob = compute_prob(6.7e11, 1.0 / 1.3e13, 1);
    assert!((prob - 0.050232880244907796).abs() < 1e-9);
}

#[test]
fn test_cli_flags_drive_header() {
    let args = Args::try_parse_from([
        "ck-mining-tools",
        "header",
        "--nonce",
        "0x02570730",
        "--previous-block-hash",
        "0x000000000002ea8eb35b9df5a5f7d3f7182d5226e4e9ab5399fe7582f0f9a9de",
    ])
    .unwrap();
    let config = Config::from_args(&args).unwrap();

    let rendered = render_header(&reconstruct(&config.header).unwrap(), OutputFormat::Plain).unwrap();
    assert_eq!(rendered, format!("{}\n{}", MERKLE_ROOT, BLOCK_HASH));
}

#[test]
fn test_changing_nonce_changes_hash() {
    let template = BlockTemplate {
        nonce: "02570731".to_string(),
        ..Default::default()
    };
    let result = reconstruct(&template).unwrap();

    assert_eq!(result.merkle_root.to_hex(), MERKLE_ROOT);
    assert_ne!(result.block_hash().to_hex(), BLOCK_HASH);
}

#[test]
fn test_cli_flags_drive_race() {
    let args = Args::try_parse_from([
        "ck-mining-tools",
        "race",
        "--cpu-rate",
        "13T",
        "--rounds",
        "1",
        "--output",
        "json",
    ])
    .unwrap();
    let config = Config::from_args(&args).unwrap();
    let report = config.race.parameters().unwrap().evaluate().unwrap();

    // equal rates, equal odds
    assert_eq!(report.sequential_asic, report.sequential_cpu_round);
    assert_eq!(report.sequential_cpu_all_rounds, report.sequential_cpu_round);

    let rendered = render_race(&report, args.output).unwrap();
    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(value["parameters"]["cpu_rate"], 13e12);
}

#[test]
fn test_malformed_job_is_rejected() {
    let template = BlockTemplate {
        previous_block_hash: "abcd".to_string(),
        ..Default::default()
    };
    assert!(matches!(reconstruct(&template), Err(Error::InvalidField { .. })));
}
