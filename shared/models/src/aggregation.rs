//! Ephemeral shapes used by the monthly aggregation report.
//!
//! None of these are persisted. `NormalizedItem` is the common denominator
//! both historical data shapes (structured `order_items` rows and legacy
//! `items_summary` strings) are reduced to before grouping; the remaining
//! types are the wire shape of the report itself. Wire field names are
//! camelCase to stay compatible with the existing admin dashboard.

use serde::{Deserialize, Serialize};

/// A single order line reduced to the shape the aggregator consumes.
///
/// `product_name` is already canonical here: vendor prefix and region
/// suffix stripped, regardless of which historical shape produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizedItem {
    pub db_type: String,
    pub product_name: String,
    pub region: String,
    pub quantity: i64,
    pub total_price: i64,
}

/// Per-region tally inside one aggregated product group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegionTally {
    pub region_name: String,
    pub quantity: i64,
    pub amount: i64,
}

/// One distinct (vendor type, canonical product) group within the period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedProduct {
    /// Display label: `"<vendor>업체 - <canonical name>"`, or just the
    /// suffixed vendor type when the canonical name is empty.
    pub product_name: String,
    pub regions: Vec<RegionTally>,
    pub total_quantity: i64,
    pub total_amount: i64,
}

/// Resolved reporting window as ISO-8601 UTC strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportPeriod {
    pub start: String,
    pub end: String,
}

/// Grand totals across all aggregated products.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_quantity: i64,
    pub total_amount: i64,
}

/// The full aggregation report returned by the admin endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AggregationReport {
    pub period: ReportPeriod,
    pub aggregated: Vec<AggregatedProduct>,
    pub summary: ReportSummary,
}
