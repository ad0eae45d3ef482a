// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Raw token amounts and their conversion out of integer units.
//!
//! Conversions split `amount / 10^decimals` with integer arithmetic first, so the decimal
//! string is exact and floating point only enters at the very last step.

use std::fmt::Display;

use alloy_primitives::U256;
use anyhow::{Context, bail};

/// Maximum decimals such that 10^decimals fits in 256 bits.
const MAX_DECIMALS_FIT: u8 = 77;

/// A pair of raw (decimal-unadjusted) token amounts for the two tokens of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub struct TokenAmounts {
    /// Raw amount of token0.
    pub amount0: U256,
    /// Raw amount of token1.
    pub amount1: U256,
}

impl TokenAmounts {
    /// Amounts of zero for both tokens.
    pub const ZERO: Self = Self::new(U256::ZERO, U256::ZERO);

    /// Creates a new [`TokenAmounts`] instance.
    #[must_use]
    pub const fn new(amount0: U256, amount1: U256) -> Self {
        Self { amount0, amount1 }
    }

    /// Returns whether both amounts are zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount0.is_zero() && self.amount1.is_zero()
    }
}

impl Display for TokenAmounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TokenAmounts(amount0={}, amount1={})", self.amount0, self.amount1)
    }
}

fn pow10_u256(decimals: u8) -> anyhow::Result<U256> {
    if decimals > MAX_DECIMALS_FIT {
        bail!("decimals={decimals} exceeds 10^d capacity for U256");
    }
    Ok(U256::from(10u8).pow(U256::from(decimals)))
}

/// Splits `amount / 10^decimals` into the integer part and a zero-padded fraction of
/// exactly `decimals` digits.
fn split_scaled(amount: U256, decimals: u8) -> anyhow::Result<(U256, String)> {
    if decimals == 0 {
        return Ok((amount, String::new()));
    }
    let denominator = pow10_u256(decimals)?;
    let int_part = amount / denominator;
    let frac = amount % denominator;

    let frac_str = format!("{:0>width$}", frac.to_string(), width = usize::from(decimals));
    Ok((int_part, frac_str))
}

/// Renders `amount / 10^decimals` exactly, without trailing fractional zeros.
///
/// # Errors
///
/// Returns an error if `decimals` exceeds 77.
pub fn u256_to_decimal_string(amount: U256, decimals: u8) -> anyhow::Result<String> {
    let (int_part, frac_str) = split_scaled(amount, decimals)?;
    let frac_str = frac_str.trim_end_matches('0');
    if frac_str.is_empty() {
        Ok(int_part.to_string())
    } else {
        Ok(format!("{int_part}.{frac_str}"))
    }
}

/// Renders `amount / 10^decimals` with at most `precision` fractional digits, truncating
/// the rest and dropping trailing zeros.
///
/// # Errors
///
/// Returns an error if `decimals` exceeds 77.
pub fn format_token_amount(amount: U256, decimals: u8, precision: u8) -> anyhow::Result<String> {
    let (int_part, mut frac_str) = split_scaled(amount, decimals)?;
    frac_str.truncate(usize::from(precision));
    let frac_str = frac_str.trim_end_matches('0');
    if frac_str.is_empty() {
        Ok(int_part.to_string())
    } else {
        Ok(format!("{int_part}.{frac_str}"))
    }
}

/// Converts `amount / 10^decimals` to the nearest `f64`.
///
/// # Errors
///
/// Returns an error if `decimals` exceeds 77.
pub fn convert_u256_to_f64(amount: U256, decimals: u8) -> anyhow::Result<f64> {
    let decimal = u256_to_decimal_string(amount, decimals)?;
    decimal
        .parse::<f64>()
        .with_context(|| format!("Failed to parse '{decimal}' as f64"))
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(U256::from(1_000_000_000_000_000_000u128), 18, "1")]
    #[case(U256::from(12345u32), 6, "0.012345")]
    #[case(U256::from(1_500_000_000_000_000_000u128), 18, "1.5")]
    #[case(U256::from(4_500_000_000u64), 6, "4500")]
    #[case(U256::from(42u8), 0, "42")]
    #[case(U256::ZERO, 18, "0")]
    fn test_u256_to_decimal_string(
        #[case] amount: U256,
        #[case] decimals: u8,
        #[case] expected: &str,
    ) {
        assert_eq!(u256_to_decimal_string(amount, decimals).unwrap(), expected);
    }

    #[rstest]
    fn test_u256_to_decimal_string_max_value() {
        let result = u256_to_decimal_string(U256::MAX, 18).unwrap();
        assert_eq!(
            result,
            "115792089237316195423570985008687907853269984665640564039457.584007913129639935"
        );
    }

    #[rstest]
    fn test_decimals_out_of_range() {
        assert!(u256_to_decimal_string(U256::from(1), 78).is_err());
        assert!(convert_u256_to_f64(U256::from(1), 78).is_err());
    }

    #[rstest]
    #[case(U256::from(1_234_567_890_123_456_789u128), 18, 6, "1.234567")]
    #[case(U256::from(1_000_000_000_000_000_001u128), 18, 6, "1")]
    #[case(U256::from(218_170_367_066u64), 6, 2, "218170.36")]
    #[case(U256::from(5u8), 6, 0, "0")]
    fn test_format_token_amount(
        #[case] amount: U256,
        #[case] decimals: u8,
        #[case] precision: u8,
        #[case] expected: &str,
    ) {
        assert_eq!(
            format_token_amount(amount, decimals, precision).unwrap(),
            expected
        );
    }

    #[rstest]
    fn test_convert_u256_to_f64() {
        let amount = U256::from_str("235729290067176860323").unwrap();
        let value = convert_u256_to_f64(amount, 18).unwrap();
        assert!((value - 235.729_290_067_176_87).abs() < 1e-9);

        assert_eq!(convert_u256_to_f64(U256::from(4_500_000_000u64), 6).unwrap(), 4500.0);
    }

    #[rstest]
    fn test_convert_large_amount_is_lossy_but_finite() {
        let value = convert_u256_to_f64(U256::MAX, 0).unwrap();
        assert!(value.is_finite());
        assert!(value > 1e77);
    }

    #[rstest]
    fn test_token_amounts_zero() {
        assert!(TokenAmounts::ZERO.is_zero());
        assert!(TokenAmounts::default().is_zero());
        assert!(!TokenAmounts::new(U256::from(1), U256::ZERO).is_zero());
    }
}
