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

use alloy_primitives::{Address, U160, U256};
use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::defi::{
    amounts::TokenAmounts,
    config::FeeUnderflowPolicy,
    tick_map::{
        get_fee_growth_inside_for_ticks, get_uncollected_fees, get_uncollected_fees_wrapping,
        sqrt_price_math::get_amounts_for_liquidity, tick::PoolTick,
        tick_math::get_sqrt_ratio_at_tick,
    },
};

/// Represents a concentrated liquidity position in a DEX pool, as of one snapshot.
///
/// A new value is built for every snapshot; nothing on it changes over time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolPosition {
    /// The owner of the position.
    pub owner: Address,
    /// The lower tick boundary of the position.
    pub tick_lower: i32,
    /// The upper tick boundary of the position.
    pub tick_upper: i32,
    /// The amount of liquidity in the position.
    pub liquidity: u128,
    /// Fee growth per unit of liquidity for token0 as of the last action on the position.
    pub fee_growth_inside_0_last: U256,
    /// Fee growth per unit of liquidity for token1 as of the last action on the position.
    pub fee_growth_inside_1_last: U256,
}

impl PoolPosition {
    /// Creates a [`PoolPosition`] with the specified parameters.
    #[must_use]
    pub fn new(
        owner: Address,
        tick_lower: i32,
        tick_upper: i32,
        liquidity: u128,
        fee_growth_inside_0_last: U256,
        fee_growth_inside_1_last: U256,
    ) -> Self {
        Self {
            owner,
            tick_lower,
            tick_upper,
            liquidity,
            fee_growth_inside_0_last,
            fee_growth_inside_1_last,
        }
    }

    /// Returns whether the position earns fees at `current_tick`.
    ///
    /// The lower tick is inclusive and the upper tick exclusive, matching fee growth accounting.
    #[must_use]
    pub fn is_in_range(&self, current_tick: i32) -> bool {
        (self.tick_lower..self.tick_upper).contains(&current_tick)
    }

    /// Returns whether the position holds no liquidity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.liquidity == 0
    }

    /// Calculates the raw token amounts held by the position at `sqrt_price_x96`.
    ///
    /// # Errors
    ///
    /// Returns an error if either bound tick is outside the valid tick range.
    pub fn token_amounts(&self, sqrt_price_x96: U160) -> anyhow::Result<TokenAmounts> {
        let sqrt_ratio_lower = get_sqrt_ratio_at_tick(self.tick_lower)
            .context("Invalid lower tick for position")?;
        let sqrt_ratio_upper = get_sqrt_ratio_at_tick(self.tick_upper)
            .context("Invalid upper tick for position")?;

        let amounts = get_amounts_for_liquidity(
            sqrt_price_x96,
            sqrt_ratio_lower,
            sqrt_ratio_upper,
            self.liquidity,
        )?;
        Ok(amounts)
    }

    /// Calculates the raw fees owed to the position since its last checkpoint.
    ///
    /// `lower` and `upper` are the snapshots of the position's bound ticks.
    ///
    /// # Errors
    ///
    /// Returns an error if a fee amount does not fit in 256 bits.
    pub fn uncollected_fees(
        &self,
        lower: &PoolTick,
        upper: &PoolTick,
        current_tick: i32,
        fee_growth_global_0: U256,
        fee_growth_global_1: U256,
        policy: FeeUnderflowPolicy,
    ) -> anyhow::Result<TokenAmounts> {
        let (fee_growth_inside_0, fee_growth_inside_1) = get_fee_growth_inside_for_ticks(
            lower,
            upper,
            current_tick,
            fee_growth_global_0,
            fee_growth_global_1,
        );

        let fees = match policy {
            FeeUnderflowPolicy::Clamp => get_uncollected_fees,
            FeeUnderflowPolicy::Wrap => get_uncollected_fees_wrapping,
        };

        let fees_0 = fees(
            self.liquidity,
            fee_growth_inside_0,
            self.fee_growth_inside_0_last,
        )
        .context("Failed to compute token0 fees")?;
        let fees_1 = fees(
            self.liquidity,
            fee_growth_inside_1,
            self.fee_growth_inside_1_last,
        )
        .context("Failed to compute token1 fees")?;

        Ok(TokenAmounts::new(fees_0, fees_1))
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
