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

/// Snapshot of an initialized tick bounding a position, carrying the fee growth
/// accumulated on the far side of the tick relative to the current price.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PoolTick {
    /// The referenced tick.
    pub value: i32,
    /// Fee growth per unit of liquidity for token0 on the other side of this tick (Q128.128).
    pub fee_growth_outside_0: U256,
    /// Fee growth per unit of liquidity for token1 on the other side of this tick (Q128.128).
    pub fee_growth_outside_1: U256,
}

impl PoolTick {
    /// Minimum valid tick value for Uniswap V3 pools.
    pub const MIN_TICK: i32 = -887272;
    /// Maximum valid tick value for Uniswap V3 pools.
    pub const MAX_TICK: i32 = -Self::MIN_TICK;

    /// Creates a new [`PoolTick`] instance.
    #[must_use]
    pub const fn new(value: i32, fee_growth_outside_0: U256, fee_growth_outside_1: U256) -> Self {
        Self {
            value,
            fee_growth_outside_0,
            fee_growth_outside_1,
        }
    }

    /// Creates a tick with zero outside fee growth.
    #[must_use]
    pub const fn from_tick(tick: i32) -> Self {
        Self::new(tick, U256::ZERO, U256::ZERO)
    }

    /// Returns whether `tick` lies within [`Self::MIN_TICK`]..=[`Self::MAX_TICK`].
    #[must_use]
    pub const fn is_valid_tick(tick: i32) -> bool {
        tick >= Self::MIN_TICK && tick <= Self::MAX_TICK
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
