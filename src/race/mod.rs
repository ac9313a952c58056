//! Block race probabilities
//!
//! Tail probabilities of the binomial distribution for the ASIC-vs-CPU race:
//! how likely a searcher performing `n` hash trials, each succeeding with
//! probability `p`, is to find at least `k` blocks.
//!
//! The trial counts of interest are products of a hash rate and a duration
//! (10^10 to 10^17) while `p` sits around 10^-13, so `(1 - p)^(n - i)` and
//! `C(n, i)` are evaluated in log space and only the final term is
//! exponentiated.

mod scenario;

pub use scenario::{RaceParameters, RaceReport};

/// Probability of at least `k` successes in `n` Bernoulli(`p`) trials.
///
/// Computes `1 - P(X < k)`. When `k` lies above the mean of an integer `n`
/// the upper tail is summed directly instead, so values far below `1e-16`
/// keep their precision rather than cancelling against `1.0`. `n` may be
/// non-integer. The result is clamped into `[0, 1]`; `k == 0` yields exactly
/// `1.0`. Inputs are not validated.
pub fn compute_prob(n: f64, p: f64, k: u64) -> f64 {
    if k == 0 {
        return 1.0;
    }

    let tail = if p > 0.0 && p < 1.0 && n.fract() == 0.0 && k as f64 > n * p {
        upper_tail(n, p, k)
    } else {
        1.0 - lower_tail(n, p, k)
    };
    tail.clamp(0.0, 1.0)
}

/// `P(X < k)`: the binomial mass of `0..k` successes.
pub fn lower_tail(n: f64, p: f64, k: u64) -> f64 {
    let count = usize::try_from(k).unwrap_or(usize::MAX);
    if p > 0.0 && p < 1.0 {
        MassTerms::starting_at(n, p, 0).take(count).sum()
    } else {
        (0..k)
            .take_while(|&i| i as f64 <= n)
            .map(|i| binomial_pmf(n, p, i))
            .sum()
    }
}

/// `P(X >= k)` summed term by term, for `0 < p < 1` and `k` above the mean.
///
/// Past the mean the ratio of neighbouring terms is below one and shrinking,
/// so the remainder after each term is bounded by a geometric series.
fn upper_tail(n: f64, p: f64, k: u64) -> f64 {
    let successes = k as f64;
    if successes > n || ln_chernoff_bound(n, p, successes) < MIN_LN_MASS {
        return 0.0;
    }

    let odds = p / (1.0 - p);
    let mut total = 0.0;
    for (i, term) in (k..).zip(MassTerms::starting_at(n, p, k)) {
        total += term;
        let i = i as f64;
        let ratio = (n - i) / (i + 1.0) * odds;
        if term == 0.0 || (ratio < 1.0 && term * ratio / (1.0 - ratio) <= total * f64::EPSILON) {
            break;
        }
    }
    total
}

/// Below this the upper tail is zero in `f64`
const MIN_LN_MASS: f64 = -750.0;

/// `ln` of the Chernoff bound `P(X >= a n) <= exp(-n D(a || p))`, `a > p`
fn ln_chernoff_bound(n: f64, p: f64, successes: f64) -> f64 {
    let a = (successes / n).min(1.0);
    let divergence = if a >= 1.0 {
        -p.ln()
    } else {
        a * (a / p).ln() + (1.0 - a) * ((-a).ln_1p() - (-p).ln_1p())
    };
    -n * divergence
}

/// Successive mass terms `pmf(i), pmf(i + 1), ...` of the support `i <= n`
///
/// Carries `ln C(n, i)` from one index to the next. Inside the support every
/// falling factor is positive, so no sign tracking is needed.
struct MassTerms {
    n: f64,
    ln_p: f64,
    ln_q: f64,
    next: u64,
    ln_coefficient: f64,
}

impl MassTerms {
    /// `0 < p < 1`
    fn starting_at(n: f64, p: f64, start: u64) -> Self {
        let ln_coefficient = if start as f64 <= n {
            ln_binomial_coefficient(n, start).1
        } else {
            f64::NEG_INFINITY
        };

        Self {
            n,
            ln_p: p.ln(),
            ln_q: (-p).ln_1p(),
            next: start,
            ln_coefficient,
        }
    }
}

impl Iterator for MassTerms {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let successes = self.next as f64;
        if successes > self.n {
            return None;
        }

        let term = (self.ln_coefficient
            + successes * self.ln_p
            + (self.n - successes) * self.ln_q)
            .exp();

        // C(n, i + 1) = C(n, i) (n - i) / (i + 1)
        self.ln_coefficient += (self.n - successes).ln() - (successes + 1.0).ln();
        self.next += 1;
        Some(term)
    }
}

/// Binomial probability mass `C(n, i) p^i (1 - p)^(n - i)` for real `n`.
///
/// The support is `0..=n`; indices past `n` carry no mass.
pub fn binomial_pmf(n: f64, p: f64, i: u64) -> f64 {
    let successes = i as f64;
    if successes > n {
        return 0.0;
    }

    // 0^0 == 1 at both ends of the support
    if p == 0.0 {
        return if i == 0 { 1.0 } else { 0.0 };
    }
    if p == 1.0 {
        return if successes == n { 1.0 } else { 0.0 };
    }

    let (sign, ln_coefficient) = ln_binomial_coefficient(n, i);
    if sign == 0.0 {
        return 0.0;
    }

    let ln_mass = ln_coefficient + successes * p.ln() + (n - successes) * (-p).ln_1p();
    sign * ln_mass.exp()
}

/// Generalized binomial coefficient `C(n, i) = n (n-1) ... (n-i+1) / i!` in
/// log space.
///
/// Returns `(sign, ln |C(n, i)|)`. The sign is `0.0` when one of the falling
/// factors is zero, which happens for integer `n < i`; it is negative when an
/// odd number of factors is negative (non-integer `n < i - 1`).
pub fn ln_binomial_coefficient(n: f64, i: u64) -> (f64, f64) {
    let mut sign = 1.0;
    let mut ln_abs = 0.0;

    for j in 0..i {
        let factor = n - j as f64;
        if factor == 0.0 {
            return (0.0, f64::NEG_INFINITY);
        }
        if factor < 0.0 {
            sign = -sign;
        }
        ln_abs += factor.abs().ln() - ((j + 1) as f64).ln();
    }

    (sign, ln_abs)
}

/// Probability of winning every one of `rounds` independent rounds, each won
/// with probability `single_round`.
pub fn repeated_rounds(single_round: f64, rounds: u32) -> f64 {
    match i32::try_from(rounds) {
        Ok(exponent) => single_round.powi(exponent),
        Err(_) => single_round.powf(f64::from(rounds)),
    }
}


#[cfg(test)]
mod tests_property;
