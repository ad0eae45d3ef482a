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

//! Conversion from a tick index to its Q64.96 square root price.
//!
//! The price at tick `i` is `1.0001^i` (token1 per token0, raw units), so the square root
//! price is `1.0001^(i/2)`. The conversion evaluates this by multiplying together one
//! precomputed Q128 factor per set bit of `|i|`, which reproduces the protocol's
//! `TickMath.getSqrtRatioAtTick` arithmetic bit-for-bit apart from the final narrowing,
//! which truncates rather than rounds up.

use alloy_primitives::{U160, U256};

use crate::defi::tick_map::tick::PoolTick;

/// Minimum sqrt price produced by [`get_sqrt_ratio_at_tick`], at [`PoolTick::MIN_TICK`].
pub const MIN_SQRT_RATIO: U160 = U160::from_limbs([4295128738, 0, 0]);

/// Maximum sqrt price produced by [`get_sqrt_ratio_at_tick`], at [`PoolTick::MAX_TICK`].
pub const MAX_SQRT_RATIO: U160 = U160::from_limbs([
    0x5d951d5263988d25,
    0xefd1fc6a50648849,
    0x00000000fffd8963,
]);

/// Q128 starting ratio when bit 0 of the absolute tick is clear.
const BASE_RATIO: U256 = U256::from_limbs([0, 0, 1, 0]);

/// `1 / sqrt(1.0001)^(2^k)` in Q128 for `k = 0..20`, indexed by bit position.
const TICK_RATIOS: [u128; 20] = [
    0xfffcb933bd6fad37aa2d162d1a594001,
    0xfff97272373d413259a46990580e213a,
    0xfff2e50f5f656932ef12357cf3c7fdcc,
    0xffe5caca7e10e4e61c3624eaa0941cd0,
    0xffcb9843d60f6159c9db58835c926644,
    0xff973b41fa98c081472e6896dfb254c0,
    0xff2ea16466c96a3843ec78b326b52861,
    0xfe5dee046a99a2a811c461f1969c3053,
    0xfcbe86c7900a88aedcffc83b479aa3a4,
    0xf987a7253ac413176f2b074cf7815e54,
    0xf3392b0822b70005940c7a398e4b70f3,
    0xe7159475a2c29b7443b29c7fa6e889d9,
    0xd097f3bdfd2022b8845ad8f792aa5825,
    0xa9f746462d870fdf8a65dc1f90e061e5,
    0x70d869a156d2a1b890bb3df62baf32f7,
    0x31be135f97d08fd981231505542fcfa6,
    0x9aa508b5b7a84e1c677de54f3e99bc9,
    0x5d6af8dedb81196699c329225ee604,
    0x2216e584f5fa1ea926041bedfe98,
    0x48a170391f7dc42444e8fa2,
];

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickMathError {
    #[error(
        "Tick {tick} is outside of the valid range [{}, {}]",
        PoolTick::MIN_TICK,
        PoolTick::MAX_TICK
    )]
    TickOutOfRange { tick: i32 },
}

/// Calculates the sqrt price ratio (Q64.96) at the given tick.
///
/// Strictly increasing in `tick`, and equal to exactly 2^96 at tick zero.
///
/// # Errors
///
/// Returns [`TickMathError::TickOutOfRange`] if `tick` is outside
/// [`PoolTick::MIN_TICK`]..=[`PoolTick::MAX_TICK`].
pub fn get_sqrt_ratio_at_tick(tick: i32) -> Result<U160, TickMathError> {
    let abs_tick = tick.unsigned_abs();
    if abs_tick > PoolTick::MAX_TICK.unsigned_abs() {
        return Err(TickMathError::TickOutOfRange { tick });
    }

    let mut ratio = if abs_tick & 0x1 != 0 {
        U256::from(TICK_RATIOS[0])
    } else {
        BASE_RATIO
    };

    for (bit, tick_ratio) in TICK_RATIOS.iter().enumerate().skip(1) {
        if abs_tick & (1 << bit) != 0 {
            // ratio <= 2^128 and tick_ratio < 2^128, so the product fits in 256 bits
            ratio = (ratio * U256::from(*tick_ratio)) >> 128;
        }
    }

    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128.128 -> Q64.96, always fits in 160 bits inside the tick domain
    Ok(U160::from(ratio >> 32))
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    use super::*;
    use crate::defi::tick_map::full_math::Q96_U160;

    fn u160(value: &str) -> U160 {
        U160::from_str(value).unwrap()
    }

    #[rstest]
    fn test_tick_zero_is_exactly_q96() {
        assert_eq!(get_sqrt_ratio_at_tick(0).unwrap(), Q96_U160);
    }

    #[rstest]
    #[case(1, "79232123823359799118286999567")]
    #[case(-1, "79224201403219477170569942573")]
    #[case(1000, "83290069058676223003182343269")]
    #[case(-1000, "75364347830767020784054125654")]
    #[case(10000, "130621891405341611593710811005")]
    #[case(-10000, "48055510970269007215549348796")]
    #[case(195180, "1370716159584048453782439397814207")]
    #[case(202020, "1929606794264750843784682280939109")]
    #[case(-887271, "4295343489")]
    #[case(887271, "1461373636630004318706518188784493106690254656248")]
    fn test_known_values(#[case] tick: i32, #[case] expected: &str) {
        assert_eq!(get_sqrt_ratio_at_tick(tick).unwrap(), u160(expected));
    }

    #[rstest]
    fn test_domain_bounds() {
        assert_eq!(
            get_sqrt_ratio_at_tick(PoolTick::MIN_TICK).unwrap(),
            MIN_SQRT_RATIO
        );
        assert_eq!(
            get_sqrt_ratio_at_tick(PoolTick::MAX_TICK).unwrap(),
            MAX_SQRT_RATIO
        );
        assert_eq!(MIN_SQRT_RATIO, u160("4295128738"));
        assert_eq!(
            MAX_SQRT_RATIO,
            u160("1461446703485210103287273052203988822378723970341")
        );
    }

    #[rstest]
    fn test_bounds_are_one_unit_below_on_chain_rounding() {
        // TickMath.sol rounds the final shift up, giving 4295128739 and ...970342
        assert_eq!(MIN_SQRT_RATIO + U160::from(1), u160("4295128739"));
        assert_eq!(
            MAX_SQRT_RATIO + U160::from(1),
            u160("1461446703485210103287273052203988822378723970342")
        );
    }

    #[rstest]
    #[case(PoolTick::MAX_TICK + 1)]
    #[case(PoolTick::MIN_TICK - 1)]
    #[case(i32::MAX)]
    #[case(i32::MIN)]
    fn test_out_of_range_ticks_are_rejected(#[case] tick: i32) {
        assert_eq!(
            get_sqrt_ratio_at_tick(tick),
            Err(TickMathError::TickOutOfRange { tick })
        );
    }

    #[rstest]
    fn test_monotonic_across_bit_positions() {
        let mut previous = get_sqrt_ratio_at_tick(0).unwrap();
        for bit in 0..20 {
            let tick = 1 << bit;
            if tick > PoolTick::MAX_TICK {
                break;
            }
            let current = get_sqrt_ratio_at_tick(tick).unwrap();
            assert!(current > previous, "not increasing at tick {tick}");
            previous = current;
        }
    }

    #[rstest]
    fn test_adjacent_ticks_around_multi_bit_value() {
        // 7 sets bits 0x1, 0x2 and 0x4
        let six = get_sqrt_ratio_at_tick(6).unwrap();
        let seven = get_sqrt_ratio_at_tick(7).unwrap();
        let eight = get_sqrt_ratio_at_tick(8).unwrap();
        assert!(six < seven && seven < eight);
    }

    #[rstest]
    #[case(1)]
    #[case(5000)]
    #[case(200000)]
    fn test_opposite_ticks_are_approximate_reciprocals(#[case] tick: i32) {
        let positive = U256::from(get_sqrt_ratio_at_tick(tick).unwrap());
        let negative = U256::from(get_sqrt_ratio_at_tick(-tick).unwrap());
        let q192 = U256::from(1u8) << 192;
        let product = positive * negative;
        let diff = if product > q192 {
            product - q192
        } else {
            q192 - product
        };
        // Within one part in a billion of 2^192
        assert!(diff < q192 / U256::from(1_000_000_000u64));
    }

    #[rstest]
    fn test_price_matches_floating_point_power() {
        let sqrt_price = get_sqrt_ratio_at_tick(10000).unwrap();
        let ratio = f64::from_str(&sqrt_price.to_string()).unwrap() / 2f64.powi(96);
        let expected = 1.0001f64.powi(10000);
        assert!(((ratio * ratio) - expected).abs() / expected < 1e-9);
    }
}
