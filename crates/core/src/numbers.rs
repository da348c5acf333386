//! Per-number classification: parity, primality, perfection and sign.
//!
//! Every function here is a pure function of its single integer argument.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Parity {
    Even,
    Odd,
}

/// Sign category. Zero counts as `Positive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Sign {
    Positive,
    Negative,
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parity::Even => f.write_str("Even"),
            Parity::Odd => f.write_str("Odd"),
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sign::Positive => f.write_str("Positive"),
            Sign::Negative => f.write_str("Negative"),
        }
    }
}

/// Classification of one integer.
///
/// Serialised with the field names clients already use (`"Even/Odd"`, `"Positive/Negative"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NumberRecord {
    #[serde(rename = "Number")]
    pub value: i64,
    #[serde(rename = "Even/Odd")]
    pub parity: Parity,
    #[serde(rename = "Prime")]
    pub is_prime: bool,
    #[serde(rename = "Perfect")]
    pub is_perfect: bool,
    #[serde(rename = "Positive/Negative")]
    pub sign: Sign,
}

impl NumberRecord {
    /// Classifies a single integer.
    ///
    /// # Arguments
    /// * `n` - the number to classify; any `i64` is accepted
    ///
    /// # Returns
    /// A record carrying `n` with its parity, primality, perfection and sign.
    ///
    /// The perfect-number check is linear in `n`, so callers handling untrusted input should
    /// bound magnitudes first (see [`crate::AnalysisService`]).
    pub fn classify(n: i64) -> Self {
        Self {
            value: n,
            parity: parity(n),
            is_prime: is_prime(n),
            is_perfect: is_perfect(n),
            sign: sign(n),
        }
    }

    pub fn is_even(&self) -> bool {
        self.parity == Parity::Even
    }
}

/// Even or odd, correct for negative numbers.
///
/// # Arguments
/// * `n` - any integer
///
/// # Returns
/// `Parity::Even` when `n` is divisible by two, otherwise `Parity::Odd`.
pub fn parity(n: i64) -> Parity {
    // rem_euclid keeps the remainder non-negative for negative inputs.
    if n.rem_euclid(2) == 0 {
        Parity::Even
    } else {
        Parity::Odd
    }
}

/// Trial division up to `floor(sqrt(n))`. Anything below 2 is not prime.
pub fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }

    let mut i = 2;
    // i <= n / i is i * i <= n without overflow.
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }
    true
}

/// True when `n` equals the sum of its divisors in `[1, n - 1]`.
///
/// Scans every candidate divisor, so cost is linear in `n`. Callers bound the input.
pub fn is_perfect(n: i64) -> bool {
    if n < 2 {
        return false;
    }

    let divisor_sum: i128 = (1..n).filter(|i| n % i == 0).map(i128::from).sum();
    divisor_sum == i128::from(n)
}

/// Sign of `n`. Zero counts as `Sign::Positive`; there is no separate zero category.
pub fn sign(n: i64) -> Sign {
    if n >= 0 {
        Sign::Positive
    } else {
        Sign::Negative
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parity_matches_remainder_for_all_signs() {
        for n in -25i64..=25 {
            assert_eq!(NumberRecord::classify(n).is_even(), n % 2 == 0, "n = {n}");
        }
        assert_eq!(parity(i64::MIN), Parity::Even);
        assert_eq!(parity(i64::MAX), Parity::Odd);
    }

    #[test]
    fn primality_small_values() {
        assert!(is_prime(2));
        assert!(is_prime(3));
        assert!(is_prime(17));
        assert!(!is_prime(18));
        assert!(!is_prime(1));
        assert!(!is_prime(0));
        assert!(!is_prime(-7));
        assert!(!is_prime(25));
        assert!(is_prime(7919));
    }

    #[test]
    fn primality_near_square_boundaries() {
        assert!(!is_prime(49));
        assert!(!is_prime(121));
        assert!(is_prime(2_147_483_647));
    }

    #[test]
    fn perfect_numbers() {
        assert!(is_perfect(6));
        assert!(is_perfect(28));
        assert!(is_perfect(496));
        assert!(is_perfect(8128));
        assert!(!is_perfect(12));
        assert!(!is_perfect(1));
        assert!(!is_perfect(0));
        assert!(!is_perfect(-6));
    }

    #[test]
    fn zero_is_positive() {
        assert_eq!(sign(0), Sign::Positive);
        assert_eq!(sign(5), Sign::Positive);
        assert_eq!(sign(-1), Sign::Negative);
    }

    #[test]
    fn classify_combines_every_property() {
        let record = NumberRecord::classify(28);
        assert_eq!(
            record,
            NumberRecord {
                value: 28,
                parity: Parity::Even,
                is_prime: false,
                is_perfect: true,
                sign: Sign::Positive,
            }
        );
    }

    #[test]
    fn record_serialises_with_display_keys() {
        let json = serde_json::to_value(NumberRecord::classify(-3)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "Number": -3,
                "Even/Odd": "Odd",
                "Prime": false,
                "Perfect": false,
                "Positive/Negative": "Negative"
            })
        );
    }
}
