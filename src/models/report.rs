//! Structures describing the outcome of converting a sensor reading.
//!
//! - `AirQualityReport`: the metrics derived from one PM2.5 concentration.
//! - `SensorDataResponse`: what a caller of the sensor-data operation receives,
//!   either a full customer reading or one of the negative sentinel codes.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Coarse health bucket for an AQI score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthLabel {
    Good,
    Moderate,
    Unhealthy,
}

impl fmt::Display for HealthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HealthLabel::Good => "good",
            HealthLabel::Moderate => "moderate",
            HealthLabel::Unhealthy => "unhealthy",
        };
        f.write_str(label)
    }
}

/// Metrics derived from a single PM2.5 reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirQualityReport {
    /// Concentration in µg/m³ as read from (or estimated for) the sensor.
    pub pm25: f64,
    /// AQI score, never 0 (a zero score is reported as 1).
    pub aqi: u32,
    /// Cigarettes-per-day equivalent of the AQI score.
    pub cigars: f64,
    pub health_label: HealthLabel,
}

/// Negative codes returned in the `aqi` field when no report can be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
    /// The sensor reading could not be determined.
    ReadingFailed,
    /// No customer matches the supplied access key.
    UnknownCustomer,
    /// No access key was supplied.
    MissingKey,
}

impl Sentinel {
    pub fn code(self) -> i32 {
        match self {
            Sentinel::ReadingFailed => -1,
            Sentinel::UnknownCustomer => -2,
            Sentinel::MissingKey => -3,
        }
    }
}

/// A successful reading for a registered customer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerReading {
    pub customer_id: i64,
    pub aqi: u32,
    pub pm25: f64,
    pub sensor_name: String,
    pub cigars: f64,
    pub health_label: HealthLabel,
}

impl CustomerReading {
    pub fn new(customer_id: i64, sensor_name: String, report: AirQualityReport) -> Self {
        Self {
            customer_id,
            aqi: report.aqi,
            pm25: report.pm25,
            sensor_name,
            cigars: report.cigars,
            health_label: report.health_label,
        }
    }
}

/// Response of the sensor-data operation, serialised as flat JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SensorDataResponse {
    Reading(CustomerReading),
    Sentinel { aqi: i32 },
}

impl SensorDataResponse {
    pub fn sentinel(sentinel: Sentinel) -> Self {
        SensorDataResponse::Sentinel {
            aqi: sentinel.code(),
        }
    }

    /// The `aqi` field as a caller sees it; negative for sentinels.
    pub fn aqi(&self) -> i64 {
        match self {
            SensorDataResponse::Reading(reading) => i64::from(reading.aqi),
            SensorDataResponse::Sentinel { aqi } => i64::from(*aqi),
        }
    }
}

/// One row of a poll over every registered customer.
#[derive(Debug, Clone)]
pub struct PollResult {
    pub customer_name: String,
    pub sensor_name: String,
    pub report: Option<AirQualityReport>,
    pub fetched_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sentinel_serialises_as_bare_aqi() {
        let response = SensorDataResponse::sentinel(Sentinel::UnknownCustomer);
        assert_eq!(serde_json::to_value(&response).unwrap(), json!({ "aqi": -2 }));
        assert_eq!(response.aqi(), -2);
    }

    #[test]
    fn test_sentinel_codes() {
        assert_eq!(Sentinel::ReadingFailed.code(), -1);
        assert_eq!(Sentinel::UnknownCustomer.code(), -2);
        assert_eq!(Sentinel::MissingKey.code(), -3);
    }

    #[test]
    fn test_reading_serialises_flat() {
        let report = AirQualityReport {
            pm25: 10.0,
            aqi: 41,
            cigars: 0.82,
            health_label: HealthLabel::Good,
        };
        let response =
            SensorDataResponse::Reading(CustomerReading::new(7, "PurpleAir".to_string(), report));

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "customer_id": 7,
                "aqi": 41,
                "pm25": 10.0,
                "sensor_name": "PurpleAir",
                "cigars": 0.82,
                "health_label": "good",
            })
        );
        assert_eq!(response.aqi(), 41);
    }
}
