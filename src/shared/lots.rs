//! Fixed-point codec: decimal strings ↔ integer lots.
//!
//! All amounts and prices on the venue are u64 lot counts scaled by 1e6.
//! Conversion uses `rust_decimal::Decimal` for exact arithmetic — the same
//! lot values must be reproduced by signer and verifier, so floating-point
//! drift is not acceptable here. No async, no network calls.

use std::fmt;

use rust_decimal::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

/// Lot scaling factor (1e6). A quantity of 1.5 is stored as 1_500_000 lots.
pub const LOT_SCALE: u64 = 1_000_000;

/// Fraction digits representable at [`LOT_SCALE`].
pub const LOT_DECIMALS: u32 = 6;

/// Largest lot count accepted by the codec: 2^53 − 1.
///
/// Lots travel as bare JSON numbers and the venue's verifier reads them as
/// doubles; past this bound integers silently lose precision and the signed
/// bytes no longer match the verified bytes.
pub const MAX_SAFE_LOTS: u64 = (1 << 53) - 1;

/// Errors that can occur converting decimal input to lots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LotsError {
    /// Empty input or a lone decimal point.
    Empty,
    /// Input is not a decimal number.
    Invalid(String),
    /// Negative quantities have no lot representation.
    Negative(String),
    /// The lot value exceeds [`MAX_SAFE_LOTS`].
    OutOfRange(String),
}

impl fmt::Display for LotsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LotsError::Empty => write!(f, "empty amount"),
            LotsError::Invalid(v) => write!(f, "'{}' is not a decimal number", v),
            LotsError::Negative(v) => write!(f, "amount must not be negative, got {}", v),
            LotsError::OutOfRange(v) => {
                write!(f, "{} exceeds the maximum representable amount", v)
            }
        }
    }
}

impl std::error::Error for LotsError {}

/// Convert a human-entered decimal string to lots.
///
/// Parses exactly, scales by 1e6 and rounds half-up to the nearest lot.
/// Empty input and a lone `.` are rejected explicitly rather than coerced;
/// the range check is enforced here regardless of any digit-count guard the
/// UI applies upstream.
pub fn decimal_to_lots(text: &str) -> Result<u64, LotsError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "." {
        return Err(LotsError::Empty);
    }

    let value =
        Decimal::from_str(trimmed).map_err(|_| LotsError::Invalid(trimmed.to_string()))?;

    if value.is_sign_negative() && !value.is_zero() {
        return Err(LotsError::Negative(trimmed.to_string()));
    }

    let scaled = value
        .checked_mul(Decimal::from(LOT_SCALE))
        .ok_or_else(|| LotsError::OutOfRange(trimmed.to_string()))?;
    let rounded = scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    let lots = rounded
        .to_u64()
        .ok_or_else(|| LotsError::OutOfRange(trimmed.to_string()))?;

    if lots > MAX_SAFE_LOTS {
        return Err(LotsError::OutOfRange(trimmed.to_string()));
    }

    Ok(lots)
}

/// Format a lot count as a decimal string with up to six fraction digits.
///
/// Trailing zeros are trimmed, so the output is the normalized form:
/// `lots_to_decimal(decimal_to_lots(x)) == x` for any canonical decimal `x`
/// with at most six fraction digits.
pub fn lots_to_decimal(lots: u64) -> String {
    let value = Decimal::from(lots) / Decimal::from(LOT_SCALE);
    value.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_scaling() {
        assert_eq!(decimal_to_lots("1.5").unwrap(), 1_500_000);
        assert_eq!(decimal_to_lots("3245.67").unwrap(), 3_245_670_000);
        assert_eq!(decimal_to_lots("0.000001").unwrap(), 1);
        assert_eq!(decimal_to_lots("0").unwrap(), 0);
        assert_eq!(decimal_to_lots("100").unwrap(), 100_000_000);
    }

    #[test]
    fn test_round_half_up() {
        // 0.0000005 * 1e6 = 0.5 lots — rounds up
        assert_eq!(decimal_to_lots("0.0000005").unwrap(), 1);
        assert_eq!(decimal_to_lots("0.0000004").unwrap(), 0);
        assert_eq!(decimal_to_lots("1.0000015").unwrap(), 1_000_002);
    }

    #[test]
    fn test_whitespace_tolerated() {
        assert_eq!(decimal_to_lots(" 2.25 ").unwrap(), 2_250_000);
    }

    #[test]
    fn test_empty_and_lone_dot_rejected() {
        assert_eq!(decimal_to_lots(""), Err(LotsError::Empty));
        assert_eq!(decimal_to_lots("   "), Err(LotsError::Empty));
        assert_eq!(decimal_to_lots("."), Err(LotsError::Empty));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(decimal_to_lots("abc"), Err(LotsError::Invalid(_))));
        assert!(matches!(decimal_to_lots("1.2.3"), Err(LotsError::Invalid(_))));
        assert!(matches!(decimal_to_lots("1e5x"), Err(LotsError::Invalid(_))));
    }

    #[test]
    fn test_negative_rejected() {
        assert!(matches!(decimal_to_lots("-1"), Err(LotsError::Negative(_))));
        assert!(matches!(
            decimal_to_lots("-0.000001"),
            Err(LotsError::Negative(_))
        ));
    }

    #[test]
    fn test_out_of_range_rejected() {
        // 2^53 lots is one past the safe bound
        assert!(matches!(
            decimal_to_lots("9007199254.740992"),
            Err(LotsError::OutOfRange(_))
        ));
        assert!(matches!(
            decimal_to_lots("99999999999999999999"),
            Err(LotsError::OutOfRange(_))
        ));
        // the bound itself is accepted
        assert_eq!(decimal_to_lots("9007199254.740991").unwrap(), MAX_SAFE_LOTS);
    }

    #[test]
    fn test_lots_to_decimal() {
        assert_eq!(lots_to_decimal(1_500_000), "1.5");
        assert_eq!(lots_to_decimal(3_245_670_000), "3245.67");
        assert_eq!(lots_to_decimal(1), "0.000001");
        assert_eq!(lots_to_decimal(0), "0");
        assert_eq!(lots_to_decimal(100_000_000), "100");
    }

    #[test]
    fn test_round_trip_canonical_decimals() {
        for text in [
            "0.5", "1.5", "3245.67", "0.000001", "123456.654321", "42", "0.1",
        ] {
            let lots = decimal_to_lots(text).unwrap();
            assert_eq!(lots_to_decimal(lots), text, "round-trip failed for {}", text);
        }
    }

    #[test]
    fn test_round_trip_normalizes() {
        // "1.50" is not canonical; the round trip yields the normalized form.
        assert_eq!(lots_to_decimal(decimal_to_lots("1.50").unwrap()), "1.5");
        assert_eq!(lots_to_decimal(decimal_to_lots("07").unwrap()), "7");
    }
}
