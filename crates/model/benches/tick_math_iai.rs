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

use alloy_primitives::U256;
use iai::black_box;
use lpwatch_model::defi::tick_map::{
    full_math::FullMathError, get_fee_growth_inside, get_uncollected_fees,
    sqrt_price_math::get_amounts_for_liquidity, tick_math::get_sqrt_ratio_at_tick,
};

fn bench_sqrt_ratio_at_tick_zero() {
    let _ = get_sqrt_ratio_at_tick(black_box(0));
}

fn bench_sqrt_ratio_at_max_tick() {
    // Every bit of the absolute tick is visited
    let _ = get_sqrt_ratio_at_tick(black_box(887_272));
}

fn bench_sqrt_ratio_at_negative_tick() {
    let _ = get_sqrt_ratio_at_tick(black_box(-200_000));
}

fn bench_amounts_for_liquidity_in_range() {
    let current = get_sqrt_ratio_at_tick(black_box(200_000)).unwrap_or_default();
    let lower = get_sqrt_ratio_at_tick(black_box(195_180)).unwrap_or_default();
    let upper = get_sqrt_ratio_at_tick(black_box(202_020)).unwrap_or_default();
    let _ = get_amounts_for_liquidity(current, lower, upper, black_box(50_000_000_000_000_000));
}

fn bench_amounts_for_max_liquidity() {
    let current = get_sqrt_ratio_at_tick(black_box(0)).unwrap_or_default();
    let lower = get_sqrt_ratio_at_tick(black_box(-887_272)).unwrap_or_default();
    let upper = get_sqrt_ratio_at_tick(black_box(887_272)).unwrap_or_default();
    let _ = get_amounts_for_liquidity(current, lower, upper, black_box(u128::MAX));
}

fn bench_fee_growth_inside_with_wrapping() -> U256 {
    get_fee_growth_inside(
        black_box(U256::from(15)),
        black_box(U256::MAX - U256::from(3)),
        black_box(U256::from(3)),
        black_box(-2),
        black_box(2),
        black_box(0),
    )
}

fn bench_uncollected_fees() -> Result<U256, FullMathError> {
    get_uncollected_fees(
        black_box(u128::MAX),
        black_box(U256::MAX),
        black_box(U256::from(1)),
    )
}

iai::main!(
    bench_sqrt_ratio_at_tick_zero,
    bench_sqrt_ratio_at_max_tick,
    bench_sqrt_ratio_at_negative_tick,
    bench_amounts_for_liquidity_in_range,
    bench_amounts_for_max_liquidity,
    bench_fee_growth_inside_with_wrapping,
    bench_uncollected_fees,
);
