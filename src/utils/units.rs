//! Unit prefix parsing for hash rates
//! Supports SI prefixes (K, M, G, T, P, E) and binary prefixes (Ki, Mi, Gi, Ti, Pi, Ei)

use crate::error::{Error, Result};

/// Parse a number with optional unit prefix
/// Supports both SI prefixes (powers of 1000) and binary prefixes (powers of 1024)
pub fn parse_with_unit_prefix(input: &str) -> Result<f64> {
    let input = input.trim();

    if input.is_empty() {
        return Err(Error::config("Empty unit value"));
    }

    // Exponent notation ("1.3e13") is a plain number, not an exa prefix
    if let Ok(number) = input.parse::<f64>() {
        return check_non_negative(number);
    }

    let (number_str, multiplier) = match input.find(|c: char| c.is_ascii_alphabetic()) {
        Some(pos) => {
            let (num, unit) = input.split_at(pos);
            (num, parse_unit_multiplier(unit)?)
        }
        None => (input, 1.0),
    };

    let number: f64 = number_str
        .trim()
        .parse()
        .map_err(|_| Error::config(format!("Invalid number: {}", number_str)))?;

    Ok(check_non_negative(number)? * multiplier)
}

fn check_non_negative(number: f64) -> Result<f64> {
    if number < 0.0 || number.is_nan() {
        return Err(Error::config("Unit values cannot be negative"));
    }
    Ok(number)
}

/// Parse unit multiplier from suffix string
fn parse_unit_multiplier(unit: &str) -> Result<f64> {
    match unit.trim().to_lowercase().as_str() {
        "" => Ok(1.0),

        // SI prefixes (decimal, powers of 1000)
        "k" => Ok(1e3),
        "m" => Ok(1e6),
        "g" => Ok(1e9),
        "t" => Ok(1e12),
        "p" => Ok(1e15),
        "e" => Ok(1e18),

        // Binary prefixes (powers of 1024)
        "ki" => Ok(1_024.0),
        "mi" => Ok(1_048_576.0),
        "gi" => Ok(1_073_741_824.0),
        "ti" => Ok(1_099_511_627_776.0),
        "pi" => Ok(1_125_899_906_842_624.0),
        "ei" => Ok(1_152_921_504_606_846_976.0),

        _ => Err(Error::config(format!("Unknown unit prefix: {}", unit))),
    }
}

/// Parse hash rate with unit prefixes, optionally suffixed with `H/s`
pub fn parse_hash_rate(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    let without_suffix = trimmed
        .strip_suffix("H/s")
        .or_else(|| trimmed.strip_suffix("h/s"))
        .unwrap_or(trimmed);
    parse_with_unit_prefix(without_suffix)
}
