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

//! Pool and position snapshots as delivered by a subgraph indexer.
//!
//! The indexer encodes every big integer as a decimal string. [`RawPosition`] mirrors that
//! wire shape and [`PositionSnapshot::try_from_raw`] validates it into typed values.

use std::str::FromStr;

use alloy_primitives::{Address, U160, U256};
use serde::{Deserialize, Serialize};

use crate::defi::{
    chain::Blockchain, position::PoolPosition, tick_map::tick::PoolTick, token::Token,
    valuation::PoolPrices,
};

/// Global state snapshot of a liquidity pool at a specific point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolState {
    /// The pool contract address.
    pub address: Address,
    /// The pool fee in hundredths of a basis point (3000 = 0.30%).
    pub fee_tier: u32,
    /// Current tick position of the pool price.
    pub current_tick: i32,
    /// Current sqrt price ratio as Q64.96 fixed point number.
    pub price_sqrt_ratio_x96: U160,
    /// Global fee growth for token0 as Q128.128 fixed-point number.
    pub fee_growth_global_0: U256,
    /// Global fee growth for token1 as Q128.128 fixed-point number.
    pub fee_growth_global_1: U256,
    /// The pool's exchange rate in decimal-adjusted units.
    pub prices: PoolPrices,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotParseError {
    #[error("Invalid integer for `{field}`: '{value}'")]
    InvalidInteger { field: &'static str, value: String },
    #[error("Invalid decimal for `{field}`: '{value}'")]
    InvalidDecimal { field: &'static str, value: String },
    #[error("Invalid address for `{field}`: '{value}'")]
    InvalidAddress { field: &'static str, value: String },
    #[error("Tick {tick} for `{field}` is outside the valid tick range")]
    TickOutOfRange { field: &'static str, tick: i32 },
    #[error("Lower tick {tick_lower} must be below upper tick {tick_upper}")]
    InvalidTickRange { tick_lower: i32, tick_upper: i32 },
}

fn parse_integer<T: FromStr>(field: &'static str, value: &str) -> Result<T, SnapshotParseError> {
    value
        .trim()
        .parse()
        .map_err(|_| SnapshotParseError::InvalidInteger {
            field,
            value: value.to_string(),
        })
}

fn parse_optional_u256(
    field: &'static str,
    value: Option<&str>,
) -> Result<U256, SnapshotParseError> {
    match value {
        Some(value) if !value.trim().is_empty() => parse_integer(field, value),
        _ => Ok(U256::ZERO),
    }
}

fn parse_decimal(field: &'static str, value: &str) -> Result<f64, SnapshotParseError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
        .ok_or_else(|| SnapshotParseError::InvalidDecimal {
            field,
            value: value.to_string(),
        })
}

fn parse_address(field: &'static str, value: &str) -> Result<Address, SnapshotParseError> {
    Address::from_str(value.trim()).map_err(|_| SnapshotParseError::InvalidAddress {
        field,
        value: value.to_string(),
    })
}

fn parse_tick(field: &'static str, value: &str) -> Result<i32, SnapshotParseError> {
    let tick: i32 = parse_integer(field, value)?;
    if !PoolTick::is_valid_tick(tick) {
        return Err(SnapshotParseError::TickOutOfRange { field, tick });
    }
    Ok(tick)
}

/// A position bound as delivered by the indexer: a bare tick index, or the tick entity with
/// its outside fee growth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTick {
    Index(String),
    Data {
        #[serde(rename = "tickIdx")]
        tick_idx: String,
        #[serde(rename = "feeGrowthOutside0X128")]
        fee_growth_outside_0_x128: String,
        #[serde(rename = "feeGrowthOutside1X128")]
        fee_growth_outside_1_x128: String,
    },
}

impl RawTick {
    fn index(&self) -> &str {
        match self {
            Self::Index(tick_idx) | Self::Data { tick_idx, .. } => tick_idx,
        }
    }

    fn parse(&self, field: &'static str) -> Result<(i32, Option<PoolTick>), SnapshotParseError> {
        let tick = parse_tick(field, self.index())?;
        match self {
            Self::Index(_) => Ok((tick, None)),
            Self::Data {
                fee_growth_outside_0_x128,
                fee_growth_outside_1_x128,
                ..
            } => Ok((
                tick,
                Some(PoolTick::new(
                    tick,
                    parse_integer("feeGrowthOutside0X128", fee_growth_outside_0_x128)?,
                    parse_integer("feeGrowthOutside1X128", fee_growth_outside_1_x128)?,
                )),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawToken {
    pub id: String,
    pub symbol: String,
    pub decimals: String,
    #[serde(default)]
    pub name: String,
}

impl RawToken {
    fn parse(&self, field: &'static str) -> Result<Token, SnapshotParseError> {
        Ok(Token::new(
            parse_address(field, &self.id)?,
            self.name.clone(),
            self.symbol.clone(),
            parse_integer(field, &self.decimals)?,
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPool {
    pub id: String,
    pub fee_tier: String,
    pub sqrt_price: String,
    pub tick: String,
    /// Despite the name, the price of token1 in units of token0.
    pub token0_price: String,
    /// Despite the name, the price of token0 in units of token1.
    pub token1_price: String,
    #[serde(rename = "feeGrowthGlobal0X128", default)]
    pub fee_growth_global_0_x128: Option<String>,
    #[serde(rename = "feeGrowthGlobal1X128", default)]
    pub fee_growth_global_1_x128: Option<String>,
}

impl RawPool {
    fn parse(&self) -> Result<PoolState, SnapshotParseError> {
        Ok(PoolState {
            address: parse_address("pool.id", &self.id)?,
            fee_tier: parse_integer("pool.feeTier", &self.fee_tier)?,
            current_tick: parse_tick("pool.tick", &self.tick)?,
            price_sqrt_ratio_x96: parse_integer("pool.sqrtPrice", &self.sqrt_price)?,
            fee_growth_global_0: parse_optional_u256(
                "pool.feeGrowthGlobal0X128",
                self.fee_growth_global_0_x128.as_deref(),
            )?,
            fee_growth_global_1: parse_optional_u256(
                "pool.feeGrowthGlobal1X128",
                self.fee_growth_global_1_x128.as_deref(),
            )?,
            prices: PoolPrices::new(
                parse_decimal("pool.token0Price", &self.token0_price)?,
                parse_decimal("pool.token1Price", &self.token1_price)?,
            ),
        })
    }
}

/// A liquidity position record as returned by the indexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPosition {
    pub id: String,
    pub owner: String,
    pub liquidity: String,
    pub tick_lower: RawTick,
    pub tick_upper: RawTick,
    pub token0: RawToken,
    pub token1: RawToken,
    pub pool: RawPool,
    #[serde(rename = "feeGrowthInside0LastX128", default)]
    pub fee_growth_inside_0_last_x128: Option<String>,
    #[serde(rename = "feeGrowthInside1LastX128", default)]
    pub fee_growth_inside_1_last_x128: Option<String>,
}

/// Typed snapshot of one position and its pool, ready for analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    /// The indexer's position identifier (the position NFT token ID).
    pub position_id: String,
    pub chain: Blockchain,
    pub token0: Token,
    pub token1: Token,
    pub position: PoolPosition,
    pub pool: PoolState,
    /// Outside fee growth at the position's lower tick, when known.
    pub tick_lower_data: Option<PoolTick>,
    /// Outside fee growth at the position's upper tick, when known.
    pub tick_upper_data: Option<PoolTick>,
}

impl PositionSnapshot {
    /// Validates an indexer record into a typed snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if any numeric, decimal or address field fails to parse, a tick is
    /// outside the valid range, or the lower tick is not below the upper tick.
    pub fn try_from_raw(raw: &RawPosition, chain: Blockchain) -> Result<Self, SnapshotParseError> {
        let (tick_lower, tick_lower_data) = raw.tick_lower.parse("tickLower")?;
        let (tick_upper, tick_upper_data) = raw.tick_upper.parse("tickUpper")?;
        if tick_lower >= tick_upper {
            return Err(SnapshotParseError::InvalidTickRange {
                tick_lower,
                tick_upper,
            });
        }

        let position = PoolPosition::new(
            parse_address("owner", &raw.owner)?,
            tick_lower,
            tick_upper,
            parse_integer("liquidity", &raw.liquidity)?,
            parse_optional_u256(
                "feeGrowthInside0LastX128",
                raw.fee_growth_inside_0_last_x128.as_deref(),
            )?,
            parse_optional_u256(
                "feeGrowthInside1LastX128",
                raw.fee_growth_inside_1_last_x128.as_deref(),
            )?,
        );

        Ok(Self {
            position_id: raw.id.clone(),
            chain,
            token0: raw.token0.parse("token0")?,
            token1: raw.token1.parse("token1")?,
            position,
            pool: raw.pool.parse()?,
            tick_lower_data,
            tick_upper_data,
        })
    }

    /// Attaches separately fetched outside fee growth for the position's bound ticks.
    ///
    /// The attached ticks take the position's own bound indices.
    #[must_use]
    pub fn with_tick_data(mut self, lower: PoolTick, upper: PoolTick) -> Self {
        self.tick_lower_data = Some(PoolTick {
            value: self.position.tick_lower,
            ..lower
        });
        self.tick_upper_data = Some(PoolTick {
            value: self.position.tick_upper,
            ..upper
        });
        self
    }

    /// Returns the bound tick snapshots if both are known.
    #[must_use]
    pub fn bound_ticks(&self) -> Option<(&PoolTick, &PoolTick)> {
        self.tick_lower_data.as_ref().zip(self.tick_upper_data.as_ref())
    }

    /// Returns a display name for the pool, e.g. `WETH/USDC`.
    #[must_use]
    pub fn pool_name(&self) -> String {
        format!("{}/{}", self.token0.symbol, self.token1.symbol)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
