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

//! Concentrated liquidity position model for lpwatch.
//!
//! The `lpwatch-model` crate turns liquidity position snapshots from a Uniswap V3-style
//! subgraph indexer into token amounts, USD values and uncollected fees. Every computation is a
//! pure function over immutable snapshot data, so callers may run them from any thread without
//! synchronization. Fetching, storage, report rendering and notification delivery live outside
//! this crate.
//!
//! The fixed-point core reproduces the protocol's arithmetic:
//!
//! - Tick index to Q64.96 square root price conversion.
//! - Liquidity to token amounts across the below, inside and above range regimes.
//! - Fee growth inside a range and uncollected fees from wrapping Q128.128 accumulators.
//!
//! Around it sit stablecoin-anchored USD valuation, snapshot parsing and history metrics.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod defi;
