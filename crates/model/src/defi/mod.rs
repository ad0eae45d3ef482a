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

//! DeFi domain model for concentrated liquidity positions.

pub mod amounts;
pub mod analysis;
pub mod chain;
pub mod config;
pub mod metrics;
pub mod position;
pub mod snapshot;
pub mod tick_map;
pub mod token;
pub mod valuation;

// Re-exports
pub use crate::defi::{
    amounts::TokenAmounts,
    analysis::{PositionAnalysis, analyze_position},
    chain::Blockchain,
    config::{FeeUnderflowPolicy, PositionAnalysisConfig},
    position::PoolPosition,
    snapshot::{PoolState, PositionSnapshot, RawPosition, SnapshotParseError},
    tick_map::tick::PoolTick,
    token::Token,
    valuation::{PoolPrices, PriceRange, PricingBasis, Stablecoin, TokenUsdPrices, UsdValuation},
};
