//! Fleet summary display model

use serde::Serialize;
use tabled::Tabled;

use super::common::{EMPTY_CELL, format_rate};
use crate::store::FleetSummary;

/// One metric row of the fleet summary table.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct SummaryDisplay {
    #[tabled(rename = "METRIC")]
    pub metric: String,

    #[tabled(rename = "VALUE")]
    pub value: String,
}

impl SummaryDisplay {
    fn row(metric: &str, value: impl ToString) -> Self {
        Self {
            metric: metric.to_string(),
            value: value.to_string(),
        }
    }

    /// Expand a summary into table rows.
    pub fn rows(summary: &FleetSummary) -> Vec<Self> {
        vec![
            Self::row("Total cars", summary.total),
            Self::row("Available", summary.available),
            Self::row("Rented", summary.rented),
            Self::row("Maintenance", summary.maintenance),
            Self::row("Inactive", summary.inactive),
            Self::row(
                "Average rate/day",
                summary
                    .average_daily_rate
                    .map(format_rate)
                    .unwrap_or_else(|| EMPTY_CELL.to_string()),
            ),
        ]
    }
}
