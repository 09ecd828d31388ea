//! Conversion between implied probabilities and on-chain fixed-point odds.
//!
//! The exchange stores `percentageOdds` as an integer scaled by 10^20.
//! Encoding goes through `f64` and is lossy for some inputs; decoding is
//! exact up to the final conversion to `f64`. Relayers expect the lossy
//! encoding, so it must not be replaced with exact arithmetic.

use alloy_primitives::U256;
use rust_decimal::Decimal;

use crate::{Error, Result};

/// Number of decimal places in the fixed-point odds representation.
pub const PERCENTAGE_PRECISION_EXPONENT: u32 = 20;

/// 10^20, the fixed-point odds denominator.
pub const FRACTION_DENOMINATOR: U256 = U256::from_limbs([7_766_279_631_452_241_920, 5, 0, 0]);

/// Denominator as an `f64` (exactly representable).
const DENOMINATOR_F64: f64 = 1e20;

/// Convert a decimal probability in `[0, 1]` to fixed-point odds.
///
/// The product `decimal * 1e20` is computed in `f64` and rendered in its
/// shortest round-trip form. A product with a fractional part (tiny
/// probabilities such as `1.5e-20`) has no integer form and is rejected.
pub fn decimal_to_fixed_point(decimal: f64) -> Result<U256> {
    if decimal.is_nan() || !(0.0..=1.0).contains(&decimal) {
        return Err(Error::Range(format!(
            "{} not in valid range. Must be between 0 and 1",
            decimal
        )));
    }

    // `+ 0.0` folds -0.0 into 0.0 so it renders as "0".
    let scaled = decimal * DENOMINATOR_F64 + 0.0;
    let rendered = format!("{}", scaled);

    rendered
        .parse::<U256>()
        .map_err(|e| Error::Range(format!("cannot represent {} as an integer: {}", rendered, e)))
}

/// Convert fixed-point odds (as a decimal integer string) back to a probability.
pub fn fixed_point_to_decimal(fixed: &str) -> Result<f64> {
    let value = fixed
        .trim()
        .parse::<U256>()
        .map_err(|e| Error::Range(format!("{} is not an unsigned integer: {}", fixed, e)))?;
    fixed_point_value_to_decimal(value)
}

/// Convert fixed-point odds back to a probability.
pub fn fixed_point_value_to_decimal(fixed: U256) -> Result<f64> {
    if fixed >= FRACTION_DENOMINATOR {
        return Err(Error::Range(format!(
            "{} must be less than {}",
            fixed, FRACTION_DENOMINATOR
        )));
    }

    // Below 10^20 so it always fits in an i128 and a Decimal mantissa.
    let mantissa = fixed.to::<u128>() as i128;
    let exact = Decimal::from_i128_with_scale(mantissa, PERCENTAGE_PRECISION_EXPONENT).normalize();

    exact
        .to_string()
        .parse::<f64>()
        .map_err(|e| Error::Range(format!("cannot convert {} to f64: {}", exact, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denominator_constant() {
        assert_eq!(FRACTION_DENOMINATOR, U256::from(10u64).pow(U256::from(20u64)));
        assert_eq!(FRACTION_DENOMINATOR.to_string(), "100000000000000000000");
    }

    #[test]
    fn test_half_to_fixed_point() {
        let fixed = decimal_to_fixed_point(0.5).unwrap();
        assert_eq!(fixed.to_string(), "50000000000000000000");
    }

    #[test]
    fn test_bounds_to_fixed_point() {
        assert_eq!(decimal_to_fixed_point(0.0).unwrap(), U256::ZERO);
        assert_eq!(decimal_to_fixed_point(1.0).unwrap(), FRACTION_DENOMINATOR);
    }

    #[test]
    fn test_out_of_range_decimal() {
        assert!(matches!(decimal_to_fixed_point(-0.01), Err(Error::Range(_))));
        assert!(matches!(decimal_to_fixed_point(1.01), Err(Error::Range(_))));
        assert!(matches!(decimal_to_fixed_point(f64::NAN), Err(Error::Range(_))));
    }

    #[test]
    fn test_fractional_fixed_point_rejected() {
        assert!(matches!(decimal_to_fixed_point(1.5e-20), Err(Error::Range(_))));
        assert!(matches!(decimal_to_fixed_point(1e-27), Err(Error::Range(_))));
        assert!(matches!(decimal_to_fixed_point(f64::MIN_POSITIVE), Err(Error::Range(_))));
    }

    #[test]
    fn test_smallest_integral_fixed_point() {
        assert_eq!(decimal_to_fixed_point(1e-20).unwrap(), U256::from(1u64));
        assert_eq!(decimal_to_fixed_point(2e-20).unwrap(), U256::from(2u64));
        assert_eq!(decimal_to_fixed_point(-0.0).unwrap(), U256::ZERO);
    }

    #[test]
    fn test_fixed_point_fixture() {
        let decimal = fixed_point_to_decimal("88985727650227679586").unwrap();
        assert_eq!(decimal, 0.8898572765022768);
    }

    #[test]
    fn test_fixed_point_half() {
        assert_eq!(fixed_point_to_decimal("50000000000000000000").unwrap(), 0.5);
        assert_eq!(fixed_point_to_decimal("0").unwrap(), 0.0);
    }

    #[test]
    fn test_fixed_point_at_denominator_rejected() {
        assert!(matches!(
            fixed_point_to_decimal("100000000000000000000"),
            Err(Error::Range(_))
        ));
        assert!(matches!(
            fixed_point_value_to_decimal(U256::MAX),
            Err(Error::Range(_))
        ));
    }

    #[test]
    fn test_fixed_point_rejects_garbage() {
        assert!(fixed_point_to_decimal("not-a-number").is_err());
        assert!(fixed_point_to_decimal("-5").is_err());
    }

    #[test]
    fn test_round_trip_is_lossy() {
        // Decoding is exact, re-encoding goes through f64 and drops the low digits.
        let original = "88985727650227679586";
        let decimal = fixed_point_to_decimal(original).unwrap();
        let reencoded = decimal_to_fixed_point(decimal).unwrap().to_string();

        assert_ne!(reencoded, original);
        assert_eq!(reencoded.len(), original.len());
        assert!(reencoded.ends_with("000"));

        let decoded_again = fixed_point_to_decimal(&reencoded).unwrap();
        assert!((decoded_again - decimal).abs() < 1e-15);
    }

    #[test]
    fn test_round_trip_exact_for_simple_fractions() {
        for decimal in [0.25, 0.5, 0.75] {
            let fixed = decimal_to_fixed_point(decimal).unwrap();
            assert_eq!(fixed_point_value_to_decimal(fixed).unwrap(), decimal);
        }
    }
}
