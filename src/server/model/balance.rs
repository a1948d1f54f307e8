//! Raw token amounts, balance readings and their display formatting.
//!
//! All amounts are arbitrary-precision unsigned integers in the token's smallest unit.

use num_bigint::BigUint;
use num_traits::Zero;
use std::str::FromStr;

use crate::server::error::{balance::BalanceError, config::ConfigError};

/// Result of a single balance lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalanceReading {
    /// Total raw balance across every token account the wallet holds for the mint.
    Known(BigUint),
    /// The lookup failed, so the wallet may hold any amount.
    Unknown,
}

/// How eligibility treats a balance that could not be determined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownBalancePolicy {
    /// Leave roles and the stored active flag untouched until a reading succeeds.
    #[default]
    Skip,
    /// Count the wallet as holding zero.
    TreatAsZero,
}

impl FromStr for UnknownBalancePolicy {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "treat-as-zero" | "treat_as_zero" | "zero" => Ok(Self::TreatAsZero),
            other => Err(ConfigError::InvalidEnvVar {
                name: "UNKNOWN_BALANCE_POLICY".to_string(),
                reason: format!("expected 'skip' or 'treat-as-zero', got '{}'", other),
            }),
        }
    }
}

/// Parses a stored raw amount.
///
/// Only plain base-10 digits are accepted: signs, decimal points, exponents and
/// separators are rejected so a misconfigured threshold never silently rounds.
///
/// # Returns
/// - `Ok(BigUint)` - The parsed amount
/// - `Err(BalanceError::EmptyAmount)` - Value is blank
/// - `Err(BalanceError::InvalidAmount)` - Value is negative or not an integer
pub fn parse_raw_amount(value: &str) -> Result<BigUint, BalanceError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(BalanceError::EmptyAmount);
    }

    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BalanceError::InvalidAmount(trimmed.to_string()));
    }

    BigUint::from_str(trimmed).map_err(|_| BalanceError::InvalidAmount(trimmed.to_string()))
}

/// Renders a raw amount as a human readable number.
///
/// The integer part gets comma thousands separators. Up to `decimals` fractional digits
/// are shown with trailing zeros trimmed, so `1_500_000` with 6 decimals renders as `1.5`.
pub fn format_raw_amount(raw: &BigUint, decimals: u32) -> String {
    let digits = raw.to_str_radix(10);
    let decimals = decimals as usize;

    let (integer, fraction) = if decimals == 0 {
        (digits.as_str(), "")
    } else if digits.len() > decimals {
        digits.split_at(digits.len() - decimals)
    } else {
        ("0", digits.as_str())
    };

    let padded_fraction = format!("{:0>width$}", fraction, width = decimals);
    let fraction = padded_fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if fraction.is_empty() {
        grouped
    } else {
        format!("{}.{}", grouped, fraction)
    }
}

/// Formats an amount with the tenant's display metadata, e.g. `1,000 GATE`.
///
/// Falls back to `tokens` when no symbol is configured and to zero decimals when
/// decimals are unknown.
pub fn format_token_amount(raw: &BigUint, decimals: Option<u32>, symbol: Option<&str>) -> String {
    format!(
        "{} {}",
        format_raw_amount(raw, decimals.unwrap_or(0)),
        symbol.unwrap_or("tokens")
    )
}

/// True when a reading proves the wallet holds at least `required`.
///
/// An unknown reading satisfies a zero threshold since every balance is non-negative.
pub fn reading_meets(reading: &BalanceReading, required: &BigUint) -> bool {
    match reading {
        BalanceReading::Known(balance) => balance >= required,
        BalanceReading::Unknown => required.is_zero(),
    }
}
