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

//! Composition of the pure position math over a single snapshot.

use alloy_primitives::U256;
use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::defi::{
    amounts::{TokenAmounts, convert_u256_to_f64, format_token_amount},
    chain::Blockchain,
    config::PositionAnalysisConfig,
    metrics::format_fee_tier,
    snapshot::PositionSnapshot,
    valuation::{PriceRange, TokenUsdPrices, UsdValuation},
};

/// Decimal-adjusted amounts of both pool tokens, as numbers and as display strings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DecimalAmounts {
    pub amount0: f64,
    pub amount1: f64,
    pub amount0_display: String,
    pub amount1_display: String,
}

impl DecimalAmounts {
    fn from_raw(
        amounts: &TokenAmounts,
        decimals0: u8,
        decimals1: u8,
        precision: u8,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            amount0: convert_u256_to_f64(amounts.amount0, decimals0)?,
            amount1: convert_u256_to_f64(amounts.amount1, decimals1)?,
            amount0_display: format_token_amount(amounts.amount0, decimals0, precision)?,
            amount1_display: format_token_amount(amounts.amount1, decimals1, precision)?,
        })
    }
}

/// Uncollected fees of a position, raw and decimal-adjusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UncollectedFees {
    pub raw: TokenAmounts,
    pub decimal: DecimalAmounts,
}

/// Derived metrics of one position snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionAnalysis {
    pub position_id: String,
    pub chain: Blockchain,
    pub pool_name: String,
    pub fee_tier: u32,
    /// Fee tier as a percentage string, e.g. `"0.30"`.
    pub fee_tier_percent: String,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub current_tick: i32,
    pub in_range: bool,
    pub amounts: TokenAmounts,
    pub decimal_amounts: DecimalAmounts,
    pub prices: TokenUsdPrices,
    pub valuation: UsdValuation,
    /// `None` when the outside fee growth of either bound tick is unknown.
    pub uncollected_fees: Option<UncollectedFees>,
    /// USD value of the uncollected fees, zero when they are unknown.
    pub fees_valuation: UsdValuation,
    pub price_range: Option<PriceRange>,
}

impl PositionAnalysis {
    /// Returns the combined USD value of the position's liquidity and uncollected fees.
    #[must_use]
    pub fn total_value_with_fees_usd(&self) -> f64 {
        self.valuation.total_usd + self.fees_valuation.total_usd
    }
}

/// Derives amounts, USD values, uncollected fees and the price range of a position snapshot.
///
/// # Errors
///
/// Returns an error if a bound tick is outside the valid range, the pool's sqrt price is zero,
/// or a token declares more than 77 decimals.
pub fn analyze_position(
    snapshot: &PositionSnapshot,
    config: &PositionAnalysisConfig,
) -> anyhow::Result<PositionAnalysis> {
    let position = &snapshot.position;
    let pool = &snapshot.pool;
    let (decimals0, decimals1) = (snapshot.token0.decimals, snapshot.token1.decimals);

    let amounts = position
        .token_amounts(pool.price_sqrt_ratio_x96)
        .with_context(|| {
            format!(
                "Failed to compute amounts for position {}",
                snapshot.position_id
            )
        })?;
    let decimal_amounts =
        DecimalAmounts::from_raw(&amounts, decimals0, decimals1, config.display_precision)?;

    let prices = TokenUsdPrices::resolve(
        &snapshot.token0.symbol,
        &snapshot.token1.symbol,
        &pool.prices,
    );
    let valuation = prices.value(decimal_amounts.amount0, decimal_amounts.amount1);

    let uncollected_fees = match snapshot.bound_ticks() {
        Some((lower, upper)) => {
            let raw = position.uncollected_fees(
                lower,
                upper,
                pool.current_tick,
                pool.fee_growth_global_0,
                pool.fee_growth_global_1,
                config.fee_underflow_policy,
            )
            .with_context(|| {
                format!(
                    "Failed to compute uncollected fees for position {}",
                    snapshot.position_id
                )
            })?;
            let decimal =
                DecimalAmounts::from_raw(&raw, decimals0, decimals1, config.display_precision)?;
            Some(UncollectedFees { raw, decimal })
        }
        None if snapshot.chain.indexer_provides_tick_data() => {
            log::warn!(
                "Tick fee growth missing for position {} on {}, skipping uncollected fees",
                snapshot.position_id,
                snapshot.chain
            );
            None
        }
        None => {
            log::debug!(
                "No tick fee growth attached for position {} on {}, skipping uncollected fees",
                snapshot.position_id,
                snapshot.chain
            );
            None
        }
    };

    let fees_valuation = uncollected_fees
        .as_ref()
        .map(|fees| prices.value(fees.decimal.amount0, fees.decimal.amount1))
        .unwrap_or_default();

    let price_range = PriceRange::from_ticks(
        position.tick_lower,
        position.tick_upper,
        pool.current_tick,
        &pool.prices,
        &snapshot.token0.symbol,
        &snapshot.token1.symbol,
    );
    if price_range.is_none() {
        log::warn!(
            "Cannot derive price range for position {}: pool price is not positive",
            snapshot.position_id
        );
    }

    let analysis = PositionAnalysis {
        position_id: snapshot.position_id.clone(),
        chain: snapshot.chain,
        pool_name: snapshot.pool_name(),
        fee_tier: pool.fee_tier,
        fee_tier_percent: format_fee_tier(pool.fee_tier),
        tick_lower: position.tick_lower,
        tick_upper: position.tick_upper,
        current_tick: pool.current_tick,
        in_range: position.is_in_range(pool.current_tick),
        amounts,
        decimal_amounts,
        prices,
        valuation,
        uncollected_fees,
        fees_valuation,
        price_range,
    };

    log::debug!(
        "Analyzed position {} ({}): value=${:.2}, fees=${:.2}, in_range={}",
        analysis.position_id,
        analysis.pool_name,
        analysis.valuation.total_usd,
        analysis.fees_valuation.total_usd,
        analysis.in_range
    );

    Ok(analysis)
}

/// Returns whether any uncollected fee amount is non-zero.
#[must_use]
pub fn has_uncollected_fees(analysis: &PositionAnalysis) -> bool {
    analysis
        .uncollected_fees
        .as_ref()
        .is_some_and(|fees| fees.raw.amount0 > U256::ZERO || fees.raw.amount1 > U256::ZERO)
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
