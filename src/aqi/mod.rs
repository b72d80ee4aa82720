//! Air Quality Index conversions.
//!
//! Includes:
//! - `converter`: the simplified PM2.5 → AQI scale used for customer reports.
//! - `breakpoints`: the full EPA table, used to recover PM2.5 from IQAir's index.
//! - `metrics`: values derived from an AQI score for display.

mod breakpoints;
mod converter;
mod metrics;

pub use breakpoints::*;
pub use converter::*;
pub use metrics::*;

use crate::models::AirQualityReport;

impl AirQualityReport {
    /// Builds the report for a non-negative PM2.5 reading.
    ///
    /// A score of 0 is reported as 1 so that downstream displays never show zero.
    pub fn from_pm25(pm25: f64) -> Self {
        let aqi = pm25_to_aqi(pm25).max(1);
        Self {
            pm25,
            aqi,
            cigars: aqi_to_cigars_per_day(aqi),
            health_label: aqi_to_health_label(aqi),
        }
    }
}
