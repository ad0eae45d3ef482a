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

//! USD valuation of pool token amounts.
//!
//! No external price oracle is consulted. A pool's own exchange rate is turned into USD
//! prices by treating a stablecoin side as worth exactly $1, falling back to token1 as the
//! $1 numeraire when neither side is a stablecoin.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::defi::amounts::{TokenAmounts, convert_u256_to_f64};

/// Price ratio between adjacent ticks.
pub const TICK_BASE: f64 = 1.0001;

/// Tokens treated as a $1 USD proxy.
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    PartialEq,
    Eq,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Stablecoin {
    Usdt,
    Usdc,
    Dai,
    Busd,
    Tusd,
    Usdp,
    Gusd,
}

impl Stablecoin {
    /// Classifies a token symbol, ignoring ASCII case.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        symbol.parse().ok()
    }

    /// Returns whether `symbol` names a stablecoin, ignoring ASCII case.
    #[must_use]
    pub fn is_stablecoin_symbol(symbol: &str) -> bool {
        Self::from_symbol(symbol).is_some()
    }
}

/// Which side of a pool anchors its USD prices.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum PricingBasis {
    /// Token0 is a stablecoin worth $1.
    Token0Stable,
    /// Token1 is a stablecoin worth $1.
    Token1Stable,
    /// Neither token is a stablecoin; token1 is assumed to be worth $1.
    Token1Numeraire,
}

impl PricingBasis {
    /// Selects the pricing basis for a pair of token symbols, token0 taking precedence.
    #[must_use]
    pub fn classify(symbol0: &str, symbol1: &str) -> Self {
        if Stablecoin::is_stablecoin_symbol(symbol0) {
            Self::Token0Stable
        } else if Stablecoin::is_stablecoin_symbol(symbol1) {
            Self::Token1Stable
        } else {
            Self::Token1Numeraire
        }
    }
}

/// The exchange rate of a pool, in decimal-adjusted units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PoolPrices {
    /// Units of token0 per one token1.
    pub token1_price_in_token0: f64,
    /// Units of token1 per one token0.
    pub token0_price_in_token1: f64,
}

impl PoolPrices {
    /// Creates a new [`PoolPrices`] instance.
    #[must_use]
    pub const fn new(token1_price_in_token0: f64, token0_price_in_token1: f64) -> Self {
        Self {
            token1_price_in_token0,
            token0_price_in_token1,
        }
    }
}

/// USD value of one whole unit of each pool token.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TokenUsdPrices {
    pub basis: PricingBasis,
    pub value_per_token0: f64,
    pub value_per_token1: f64,
}

impl TokenUsdPrices {
    /// Resolves the USD price of each token from the pool's exchange rate.
    #[must_use]
    pub fn resolve(symbol0: &str, symbol1: &str, prices: &PoolPrices) -> Self {
        let basis = PricingBasis::classify(symbol0, symbol1);
        let (value_per_token0, value_per_token1) = match basis {
            PricingBasis::Token0Stable => (1.0, prices.token1_price_in_token0),
            PricingBasis::Token1Stable | PricingBasis::Token1Numeraire => {
                (prices.token0_price_in_token1, 1.0)
            }
        };

        Self {
            basis,
            value_per_token0,
            value_per_token1,
        }
    }

    /// Values decimal-adjusted token amounts.
    #[must_use]
    pub fn value(&self, amount0: f64, amount1: f64) -> UsdValuation {
        let token0_usd = amount0 * self.value_per_token0;
        let token1_usd = amount1 * self.value_per_token1;

        UsdValuation {
            value_per_token0: self.value_per_token0,
            value_per_token1: self.value_per_token1,
            token0_usd,
            token1_usd,
            total_usd: token0_usd + token1_usd,
        }
    }

    /// Values raw token amounts, scaling each by `10^decimals` of its token first.
    ///
    /// # Errors
    ///
    /// Returns an error if either decimals value exceeds 77.
    pub fn value_raw(
        &self,
        amounts: &TokenAmounts,
        decimals0: u8,
        decimals1: u8,
    ) -> anyhow::Result<UsdValuation> {
        let amount0 = convert_u256_to_f64(amounts.amount0, decimals0)?;
        let amount1 = convert_u256_to_f64(amounts.amount1, decimals1)?;
        Ok(self.value(amount0, amount1))
    }
}

/// USD value of a pair of token amounts.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UsdValuation {
    pub value_per_token0: f64,
    pub value_per_token1: f64,
    pub token0_usd: f64,
    pub token1_usd: f64,
    pub total_usd: f64,
}

/// A position's price bounds expressed as the price of `base` in units of `currency`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub lower: f64,
    pub upper: f64,
    pub current: f64,
    /// Symbol of the token being priced.
    pub base: String,
    /// Symbol of the token the price is quoted in.
    pub currency: String,
}

impl PriceRange {
    /// Derives the price range of a position from its ticks and the pool's current price.
    ///
    /// With a stable token0 the range is the price of token1 in token0, which falls as the
    /// tick rises, so the tick distances are mirrored. Otherwise it is the price of token0
    /// in token1. Returns `None` when the current price is not a positive finite number, or
    /// the tick distances do not fit in an `i32`.
    #[must_use]
    pub fn from_ticks(
        tick_lower: i32,
        tick_upper: i32,
        tick_current: i32,
        prices: &PoolPrices,
        symbol0: &str,
        symbol1: &str,
    ) -> Option<Self> {
        let ticks_to_lower = tick_current.checked_sub(tick_lower)?;
        let ticks_to_upper = tick_upper.checked_sub(tick_current)?;

        let (current, lower_exponent, upper_exponent, base, currency) =
            match PricingBasis::classify(symbol0, symbol1) {
                PricingBasis::Token0Stable => (
                    prices.token1_price_in_token0,
                    -ticks_to_upper,
                    ticks_to_lower,
                    symbol1,
                    symbol0,
                ),
                PricingBasis::Token1Stable | PricingBasis::Token1Numeraire => (
                    prices.token0_price_in_token1,
                    -ticks_to_lower,
                    ticks_to_upper,
                    symbol0,
                    symbol1,
                ),
            };

        if !current.is_finite() || current <= 0.0 {
            return None;
        }

        let lower = current * TICK_BASE.powi(lower_exponent);
        let upper = current * TICK_BASE.powi(upper_exponent);
        if !lower.is_finite() || !upper.is_finite() {
            return None;
        }

        Some(Self {
            lower,
            upper,
            current,
            base: base.to_string(),
            currency: currency.to_string(),
        })
    }

    /// Returns whether the current price lies within the bounds, inclusive.
    #[must_use]
    pub fn contains_current(&self) -> bool {
        (self.lower..=self.upper).contains(&self.current)
    }
}

impl Display for PriceRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.2} - {:.2} {}/{} (current {:.2})",
            self.lower, self.upper, self.currency, self.base, self.current
        )
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
