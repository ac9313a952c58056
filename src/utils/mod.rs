//! Utility functions and helpers

pub mod units;

use tracing_subscriber::EnvFilter;

/// Initialize logging based on configuration
///
/// Events go to stderr; stdout is reserved for computed results.
pub fn init_logging(level: &str, format: &str) {
    let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

/// Format hashrate for display
pub fn format_hashrate(hashrate: f64) -> String {
    const UNITS: &[&str] = &["H/s", "KH/s", "MH/s", "GH/s", "TH/s", "PH/s", "EH/s"];
    let mut rate = hashrate;
    let mut unit_index = 0;

    while rate >= 1000.0 && unit_index < UNITS.len() - 1 {
        rate /= 1000.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", rate, UNITS[unit_index])
    } else {
        format!("{:.2} {}", rate, UNITS[unit_index])
    }
}

/// Format a probability the way an interactive interpreter echoes floats:
/// shortest round-trip digits, scientific notation outside `[1e-4, 1e16)`
/// with a signed exponent of at least two digits (`3.2e-07`, `1e+16`).
pub fn format_probability(value: f64) -> String {
    let magnitude = value.abs();
    if value == 0.0 || !value.is_finite() || (1e-4..1e16).contains(&magnitude) {
        return format!("{:?}", value);
    }

    let scientific = format!("{:e}", value);
    match scientific.split_once('e').map(|(m, e)| (m, e.parse::<i32>())) {
        Some((mantissa, Ok(exponent))) => {
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exponent.abs())
        }
        _ => scientific,
    }
}
