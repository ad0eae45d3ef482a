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

//! Metrics over a history of analyzed position snapshots.
//!
//! Histories are ordered newest first, as snapshots are appended by a poller and read back
//! in reverse chronological order.

use ahash::AHashMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::defi::analysis::PositionAnalysis;

/// The values of one position at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub position_id: String,
    pub timestamp: DateTime<Utc>,
    pub total_value_usd: f64,
    pub fees_usd: f64,
    /// Current price from the position's price range, when known.
    pub current_price: Option<f64>,
    pub in_range: bool,
}

impl PositionRecord {
    /// Creates a record from an analysis taken at `timestamp`.
    #[must_use]
    pub fn from_analysis(analysis: &PositionAnalysis, timestamp: DateTime<Utc>) -> Self {
        Self {
            position_id: analysis.position_id.clone(),
            timestamp,
            total_value_usd: analysis.valuation.total_usd,
            fees_usd: analysis.fees_valuation.total_usd,
            current_price: analysis.price_range.as_ref().map(|range| range.current),
            in_range: analysis.in_range,
        }
    }
}

/// An absolute and relative change between two values.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Change {
    pub difference: f64,
    /// Change relative to the earlier value, in percent.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionAge {
    pub days: i64,
    pub text: String,
}

/// Returns the change in uncollected fee value between two records of a position.
#[must_use]
pub fn fee_difference(current: &PositionRecord, previous: &PositionRecord) -> f64 {
    current.fees_usd - previous.fees_usd
}

/// Sums the fee differences of every current record that has a previous record with the same id.
#[must_use]
pub fn fees_24h(current: &[PositionRecord], previous: &[PositionRecord]) -> f64 {
    let previous_by_id: AHashMap<&str, &PositionRecord> = previous
        .iter()
        .map(|record| (record.position_id.as_str(), record))
        .collect();

    current
        .iter()
        .filter_map(|record| {
            previous_by_id
                .get(record.position_id.as_str())
                .map(|prev| fee_difference(record, prev))
        })
        .sum()
}

/// Returns the change between two values, or `None` if either is zero.
#[must_use]
pub fn value_change(current: f64, previous: f64) -> Option<Change> {
    if current == 0.0 || previous == 0.0 {
        return None;
    }
    let difference = current - previous;
    Some(Change {
        difference,
        percentage: difference / previous * 100.0,
    })
}

/// Returns the change between two prices; the percentage is zero unless `previous` is positive.
#[must_use]
pub fn price_change(current: f64, previous: f64) -> Change {
    let difference = current - previous;
    let percentage = if previous > 0.0 {
        difference / previous * 100.0
    } else {
        0.0
    };
    Change {
        difference,
        percentage,
    }
}

/// Returns the profit or loss over a position's history: value change plus fees earned,
/// relative to the oldest value.
#[must_use]
pub fn profit_loss(history: &[PositionRecord]) -> Change {
    let (Some(latest), Some(oldest)) = (history.first(), history.last()) else {
        return Change::default();
    };

    let earned_fees = latest.fees_usd - oldest.fees_usd;
    let value_change = latest.total_value_usd - oldest.total_value_usd;
    let difference = value_change + earned_fees;
    let percentage = if oldest.total_value_usd > 0.0 {
        difference / oldest.total_value_usd * 100.0
    } else {
        0.0
    };

    Change {
        difference,
        percentage,
    }
}

/// Returns the mean of the positive fee differences between consecutive records.
#[must_use]
pub fn average_daily_fees(history: &[PositionRecord]) -> f64 {
    let gains: Vec<f64> = history
        .windows(2)
        .map(|pair| fee_difference(&pair[0], &pair[1]))
        .filter(|diff| *diff > 0.0)
        .collect();

    if gains.is_empty() {
        0.0
    } else {
        gains.iter().sum::<f64>() / gains.len() as f64
    }
}

/// Returns the whole days elapsed since `oldest`.
#[must_use]
pub fn position_age(oldest: DateTime<Utc>, now: DateTime<Utc>) -> PositionAge {
    let days = (now - oldest).num_days();
    let text = match days {
        0 => "New position".to_string(),
        1 => "1 day old".to_string(),
        _ => format!("{days} days old"),
    };
    PositionAge { days, text }
}

/// Formats a fee tier in hundredths of a basis point as a percentage, e.g. `3000` -> `"0.30"`.
#[must_use]
pub fn format_fee_tier(fee: u32) -> String {
    format!("{:.2}", f64::from(fee) / 10_000.0)
}

/// Groups records by position id, each history sorted newest first.
#[must_use]
pub fn group_histories(records: &[PositionRecord]) -> AHashMap<String, Vec<PositionRecord>> {
    let mut histories: AHashMap<String, Vec<PositionRecord>> = AHashMap::new();
    for record in records {
        histories
            .entry(record.position_id.clone())
            .or_default()
            .push(record.clone());
    }
    for history in histories.values_mut() {
        history.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    }
    histories
}

/// Aggregate metrics of a portfolio of positions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_value_usd: f64,
    pub total_fees_usd: f64,
    pub total_pnl: f64,
    pub total_pnl_percentage: f64,
    pub fees_24h: f64,
    pub in_range_count: usize,
    pub out_of_range_count: usize,
    pub current_price: Option<f64>,
    pub price_24h_change: Option<Change>,
}

impl PortfolioSummary {
    /// Summarizes `current` records against `previous` ones, with profit and loss taken over
    /// the full history in `all`.
    #[must_use]
    pub fn from_records(
        current: &[PositionRecord],
        previous: &[PositionRecord],
        all: &[PositionRecord],
    ) -> Self {
        let (total_pnl, total_initial_value) = group_histories(all).values().fold(
            (0.0, 0.0),
            |(pnl, initial), history| {
                let oldest_value = history.last().map_or(0.0, |r| r.total_value_usd);
                (pnl + profit_loss(history).difference, initial + oldest_value)
            },
        );
        let total_pnl_percentage = if total_initial_value > 0.0 {
            total_pnl / total_initial_value * 100.0
        } else {
            0.0
        };

        let in_range_count = current.iter().filter(|r| r.in_range).count();

        let current_price = current.iter().find_map(|r| r.current_price);
        let previous_price = previous.iter().find_map(|r| r.current_price);
        let price_24h_change = current_price
            .zip(previous_price)
            .map(|(current, previous)| price_change(current, previous));

        Self {
            total_value_usd: current.iter().map(|r| r.total_value_usd).sum(),
            total_fees_usd: current.iter().map(|r| r.fees_usd).sum(),
            total_pnl,
            total_pnl_percentage,
            fees_24h: fees_24h(current, previous),
            in_range_count,
            out_of_range_count: current.len() - in_range_count,
            current_price,
            price_24h_change,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
