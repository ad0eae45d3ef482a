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

//! Configuration for position analysis.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Default number of fractional digits kept when rendering token amounts.
pub const DEFAULT_DISPLAY_PRECISION: u8 = 6;

/// How to treat an inside fee growth that is behind the position's last checkpoint.
#[derive(
    Debug, Clone, Copy, Default, Hash, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FeeUnderflowPolicy {
    /// Report zero uncollected fees.
    #[default]
    Clamp,
    /// Keep the modular difference as the protocol would.
    Wrap,
}

/// Configuration for [`crate::defi::analysis::analyze_position`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionAnalysisConfig {
    /// Treatment of fee growth behind the last checkpoint.
    pub fee_underflow_policy: FeeUnderflowPolicy,
    /// Maximum fractional digits in rendered token amounts.
    pub display_precision: u8,
}

impl PositionAnalysisConfig {
    /// Creates a new [`PositionAnalysisConfig`] instance.
    #[must_use]
    pub fn new(
        fee_underflow_policy: Option<FeeUnderflowPolicy>,
        display_precision: Option<u8>,
    ) -> Self {
        Self {
            fee_underflow_policy: fee_underflow_policy.unwrap_or_default(),
            display_precision: display_precision.unwrap_or(DEFAULT_DISPLAY_PRECISION),
        }
    }

    /// Parses a configuration from JSON, filling absent fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not a valid configuration object.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for PositionAnalysisConfig {
    fn default() -> Self {
        Self::new(None, None)
    }
}
