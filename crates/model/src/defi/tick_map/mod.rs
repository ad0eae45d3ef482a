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

//! Concentrated liquidity arithmetic: tick prices, liquidity amounts and fee growth accounting.
//!
//! All fee growth accumulators are Q128.128 values which the protocol lets wrap around the
//! 256-bit modulus, so every subtraction in this module is an explicit `wrapping_sub`.

use alloy_primitives::U256;

use crate::defi::tick_map::{
    full_math::{FullMath, FullMathError, Q128},
    tick::PoolTick,
};

pub mod full_math;
pub mod sqrt_price_math;
pub mod tick;
pub mod tick_math;

/// Calculates the fee growth per unit of liquidity accrued between `tick_lower` and `tick_upper`.
///
/// A current tick equal to `tick_lower` counts as inside the range, while a current tick equal
/// to `tick_upper` counts as above it.
#[must_use]
pub fn get_fee_growth_inside(
    fee_growth_global: U256,
    fee_growth_outside_lower: U256,
    fee_growth_outside_upper: U256,
    tick_lower: i32,
    tick_upper: i32,
    tick_current: i32,
) -> U256 {
    let fee_growth_below = if tick_current >= tick_lower {
        fee_growth_outside_lower
    } else {
        fee_growth_global.wrapping_sub(fee_growth_outside_lower)
    };

    let fee_growth_above = if tick_current < tick_upper {
        fee_growth_outside_upper
    } else {
        fee_growth_global.wrapping_sub(fee_growth_outside_upper)
    };

    fee_growth_global
        .wrapping_sub(fee_growth_below)
        .wrapping_sub(fee_growth_above)
}

/// Calculates the fee growth inside the range bounded by two tick snapshots, for both tokens.
#[must_use]
pub fn get_fee_growth_inside_for_ticks(
    lower: &PoolTick,
    upper: &PoolTick,
    tick_current: i32,
    fee_growth_global_0: U256,
    fee_growth_global_1: U256,
) -> (U256, U256) {
    let fee_growth_inside_0 = get_fee_growth_inside(
        fee_growth_global_0,
        lower.fee_growth_outside_0,
        upper.fee_growth_outside_0,
        lower.value,
        upper.value,
        tick_current,
    );
    let fee_growth_inside_1 = get_fee_growth_inside(
        fee_growth_global_1,
        lower.fee_growth_outside_1,
        upper.fee_growth_outside_1,
        lower.value,
        upper.value,
        tick_current,
    );

    (fee_growth_inside_0, fee_growth_inside_1)
}

/// Calculates the fees owed to `liquidity` since the inside fee growth was last checkpointed.
///
/// A checkpoint ahead of the current inside growth cannot happen on-chain and indicates
/// inconsistent snapshot data, in which case zero is returned.
///
/// # Errors
///
/// Returns an error if the fee amount does not fit in 256 bits.
pub fn get_uncollected_fees(
    liquidity: u128,
    fee_growth_inside: U256,
    fee_growth_inside_last: U256,
) -> Result<U256, FullMathError> {
    if fee_growth_inside < fee_growth_inside_last {
        log::warn!(
            "Fee growth inside {fee_growth_inside} is behind last checkpoint \
             {fee_growth_inside_last}, reporting zero uncollected fees"
        );
        return Ok(U256::ZERO);
    }

    get_uncollected_fees_wrapping(liquidity, fee_growth_inside, fee_growth_inside_last)
}

/// Calculates the fees owed to `liquidity` using the modular fee growth difference as-is.
///
/// # Errors
///
/// Returns an error if the fee amount does not fit in 256 bits.
pub fn get_uncollected_fees_wrapping(
    liquidity: u128,
    fee_growth_inside: U256,
    fee_growth_inside_last: U256,
) -> Result<U256, FullMathError> {
    let fee_growth_delta = fee_growth_inside.wrapping_sub(fee_growth_inside_last);

    // liquidity < 2^128 so the quotient always fits in 256 bits
    FullMath::mul_div(fee_growth_delta, U256::from(liquidity), Q128)
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn fee_growth_global() -> (U256, U256) {
        (U256::from(15), U256::from(15))
    }

    #[rstest]
    fn test_fee_growth_inside_uninitialized_ticks(fee_growth_global: (U256, U256)) {
        let (global_0, global_1) = fee_growth_global;
        let lower = PoolTick::from_tick(-2);
        let upper = PoolTick::from_tick(2);

        // Tick 0 is inside [-2, 2]
        let inside = get_fee_growth_inside_for_ticks(&lower, &upper, 0, global_0, global_1);
        assert_eq!(inside, (U256::from(15), U256::from(15)));

        // Tick 4 is above
        let inside = get_fee_growth_inside_for_ticks(&lower, &upper, 4, global_0, global_1);
        assert_eq!(inside, (U256::ZERO, U256::ZERO));

        // Tick -4 is below
        let inside = get_fee_growth_inside_for_ticks(&lower, &upper, -4, global_0, global_1);
        assert_eq!(inside, (U256::ZERO, U256::ZERO));
    }

    #[rstest]
    fn test_fee_growth_inside_if_upper_tick_is_below(fee_growth_global: (U256, U256)) {
        let (global_0, global_1) = fee_growth_global;
        let lower = PoolTick::from_tick(-2);
        let upper = PoolTick::new(2, U256::from(2), U256::from(3));

        let inside = get_fee_growth_inside_for_ticks(&lower, &upper, 0, global_0, global_1);
        assert_eq!(inside, (U256::from(13), U256::from(12)));
    }

    #[rstest]
    fn test_fee_growth_inside_if_lower_tick_is_above(fee_growth_global: (U256, U256)) {
        let (global_0, global_1) = fee_growth_global;
        let lower = PoolTick::new(-2, U256::from(2), U256::from(3));
        let upper = PoolTick::from_tick(2);

        let inside = get_fee_growth_inside_for_ticks(&lower, &upper, 0, global_0, global_1);
        assert_eq!(inside, (U256::from(13), U256::from(12)));
    }

    #[rstest]
    fn test_fee_growth_inside_both_ticks_initialized(fee_growth_global: (U256, U256)) {
        let (global_0, global_1) = fee_growth_global;
        let lower = PoolTick::new(-2, U256::from(2), U256::from(3));
        let upper = PoolTick::new(2, U256::from(4), U256::from(1));

        let inside = get_fee_growth_inside_for_ticks(&lower, &upper, 0, global_0, global_1);
        assert_eq!(inside, (U256::from(9), U256::from(11)));
    }

    #[rstest]
    fn test_fee_growth_inside_with_overflow(fee_growth_global: (U256, U256)) {
        let (global_0, global_1) = fee_growth_global;
        let lower = PoolTick::new(
            -2,
            U256::MAX - U256::from(3u32),
            U256::MAX - U256::from(2u32),
        );
        let upper = PoolTick::new(2, U256::from(3u32), U256::from(5u32));

        let inside = get_fee_growth_inside_for_ticks(&lower, &upper, 0, global_0, global_1);
        assert_eq!(inside, (U256::from(16u32), U256::from(13u32)));
    }

    #[rstest]
    fn test_fee_growth_inside_zero_outside_equals_global() {
        let global = U256::from_str("340282366920938463463374607431768211456000").unwrap();
        let inside = get_fee_growth_inside(global, U256::ZERO, U256::ZERO, -60, 60, 0);
        assert_eq!(inside, global);
    }

    #[rstest]
    fn test_fee_growth_inside_current_at_lower_is_in_range() {
        let inside =
            get_fee_growth_inside(U256::from(100), U256::from(30), U256::from(20), -10, 10, -10);
        // below = outside_lower, above = outside_upper
        assert_eq!(inside, U256::from(50));
    }

    #[rstest]
    fn test_fee_growth_inside_current_at_upper_is_above_range() {
        let inside =
            get_fee_growth_inside(U256::from(100), U256::from(30), U256::from(20), -10, 10, 10);
        // below = 30, above = 100 - 20 = 80, inside = 100 - 30 - 80 wraps
        assert_eq!(inside, U256::ZERO.wrapping_sub(U256::from(10)));
    }

    #[rstest]
    fn test_fee_growth_inside_below_range_uses_wrapping() {
        // Global has wrapped past zero while the lower tick still holds a large value
        let outside_lower = U256::MAX - U256::from(9);
        let inside = get_fee_growth_inside(U256::from(5), outside_lower, U256::ZERO, 0, 10, -5);
        // below = 5 - (MAX - 9) = 15 mod 2^256, above = 0, inside = 5 - 15 wraps
        assert_eq!(inside, U256::MAX - U256::from(9));
    }

    #[rstest]
    fn test_uncollected_fees_no_growth_is_zero() {
        let growth = U256::from_str("123456789012345678901234567890").unwrap();
        assert_eq!(get_uncollected_fees(u128::MAX, growth, growth), Ok(U256::ZERO));
        assert_eq!(
            get_uncollected_fees_wrapping(u128::MAX, growth, growth),
            Ok(U256::ZERO)
        );
    }

    #[rstest]
    fn test_uncollected_fees_scaled_by_q128() {
        let liquidity = 1_000_000_000_000_000_000u128;
        let last = U256::from(7);
        let inside = last + U256::from(10u128.pow(36));

        let fees = get_uncollected_fees(liquidity, inside, last).unwrap();
        assert_eq!(fees, U256::from(2_938_735_877_055_718u64));
    }

    #[rstest]
    fn test_uncollected_fees_exact_q128_delta() {
        let fees = get_uncollected_fees(42, Q128 * U256::from(3), U256::ZERO).unwrap();
        assert_eq!(fees, U256::from(126));
    }

    #[rstest]
    fn test_uncollected_fees_underflow_is_clamped() {
        let fees = get_uncollected_fees(1_000_000, U256::from(10), U256::from(11)).unwrap();
        assert_eq!(fees, U256::ZERO);
    }

    #[rstest]
    fn test_uncollected_fees_wrapping_keeps_modular_difference() {
        // inside - last = 2^256 - 2^128
        let last = Q128;
        let fees = get_uncollected_fees_wrapping(1, U256::ZERO, last).unwrap();
        assert_eq!(fees, (U256::MAX >> 128));
    }

    #[rstest]
    fn test_uncollected_fees_max_inputs_do_not_overflow() {
        let fees = get_uncollected_fees(u128::MAX, U256::MAX, U256::ZERO).unwrap();
        // floor((2^128 - 1) * (2^256 - 1) / 2^128) == 2^256 - 2^128 - 1
        assert_eq!(fees, U256::MAX - (U256::MAX >> 128) - U256::from(1));

        let wrapped = get_uncollected_fees_wrapping(u128::MAX, U256::ZERO, U256::from(1));
        assert_eq!(wrapped, Ok(U256::MAX - (U256::MAX >> 128) - U256::from(1)));
    }
}
