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

//! Conversion between liquidity and token amounts across the three price regimes.

use alloy_primitives::{U160, U256};

use super::full_math::{FullMath, FullMathError, Q96};
use crate::defi::amounts::TokenAmounts;

fn sort_sqrt_ratios(sqrt_ratio_ax96: U160, sqrt_ratio_bx96: U160) -> (U256, U256) {
    if sqrt_ratio_ax96 > sqrt_ratio_bx96 {
        (U256::from(sqrt_ratio_bx96), U256::from(sqrt_ratio_ax96))
    } else {
        (U256::from(sqrt_ratio_ax96), U256::from(sqrt_ratio_bx96))
    }
}

/// Calculates the amount of token0 held by `liquidity` between two sqrt price ratios, rounded down.
///
/// Computes `liquidity * 2^96 * (sqrt_b - sqrt_a) / (sqrt_b * sqrt_a)`. The bounds may be
/// passed in either order. Equal bounds yield zero.
///
/// # Errors
///
/// Returns [`FullMathError::DivisionByZero`] if the lower sqrt ratio is zero.
pub fn get_amount0_for_liquidity(
    sqrt_ratio_ax96: U160,
    sqrt_ratio_bx96: U160,
    liquidity: u128,
) -> Result<U256, FullMathError> {
    let (sqrt_ratio_a, sqrt_ratio_b) = sort_sqrt_ratios(sqrt_ratio_ax96, sqrt_ratio_bx96);
    if sqrt_ratio_a == sqrt_ratio_b {
        return Ok(U256::ZERO);
    }

    let numerator1 = U256::from(liquidity) << 96;
    let numerator2 = sqrt_ratio_b - sqrt_ratio_a;

    // floor(floor(x / b) / a) == floor(x / (a * b))
    let result = FullMath::mul_div(numerator1, numerator2, sqrt_ratio_b)?;
    result
        .checked_div(sqrt_ratio_a)
        .ok_or(FullMathError::DivisionByZero)
}

/// Calculates the amount of token1 held by `liquidity` between two sqrt price ratios, rounded down.
///
/// Computes `liquidity * (sqrt_b - sqrt_a) / 2^96`. The bounds may be passed in either order.
///
/// # Errors
///
/// Never fails for 160-bit ratios; the error is propagated from [`FullMath::mul_div`].
pub fn get_amount1_for_liquidity(
    sqrt_ratio_ax96: U160,
    sqrt_ratio_bx96: U160,
    liquidity: u128,
) -> Result<U256, FullMathError> {
    let (sqrt_ratio_a, sqrt_ratio_b) = sort_sqrt_ratios(sqrt_ratio_ax96, sqrt_ratio_bx96);

    // liquidity * delta can reach 288 bits
    FullMath::mul_div(U256::from(liquidity), sqrt_ratio_b - sqrt_ratio_a, Q96)
}

/// Calculates the token amounts held by `liquidity` at the current sqrt price.
///
/// - Current at or below the lower bound: everything is token0.
/// - Current at or above the upper bound: everything is token1.
/// - Strictly inside: token0 for the part above the current price, token1 for the part below.
///
/// # Errors
///
/// Returns [`FullMathError::DivisionByZero`] if a zero sqrt ratio is involved in the token0 leg.
pub fn get_amounts_for_liquidity(
    sqrt_ratio_x96: U160,
    sqrt_ratio_ax96: U160,
    sqrt_ratio_bx96: U160,
    liquidity: u128,
) -> Result<TokenAmounts, FullMathError> {
    let (sqrt_ratio_a, sqrt_ratio_b) = if sqrt_ratio_ax96 > sqrt_ratio_bx96 {
        (sqrt_ratio_bx96, sqrt_ratio_ax96)
    } else {
        (sqrt_ratio_ax96, sqrt_ratio_bx96)
    };

    let amounts = if sqrt_ratio_x96 <= sqrt_ratio_a {
        TokenAmounts::new(
            get_amount0_for_liquidity(sqrt_ratio_a, sqrt_ratio_b, liquidity)?,
            U256::ZERO,
        )
    } else if sqrt_ratio_x96 >= sqrt_ratio_b {
        TokenAmounts::new(
            U256::ZERO,
            get_amount1_for_liquidity(sqrt_ratio_a, sqrt_ratio_b, liquidity)?,
        )
    } else {
        TokenAmounts::new(
            get_amount0_for_liquidity(sqrt_ratio_x96, sqrt_ratio_b, liquidity)?,
            get_amount1_for_liquidity(sqrt_ratio_a, sqrt_ratio_x96, liquidity)?,
        )
    };

    Ok(amounts)
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
