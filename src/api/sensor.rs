//! Provides a client for reading PM2.5 concentrations from vendor sensor APIs.
//!
//! A customer's API URL is fetched once per request; the JSON body is parsed
//! according to the vendor the URL belongs to. Every failure is reported as a
//! `ReadingError`; callers that need the legacy numeric contract use
//! [`SensorClient::fetch_pm25`], which collapses failures into `-1`.

use crate::aqi::aqius_to_pm25;
use crate::error::{ReadingError, Result};
use crate::models::Vendor;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

const AIRGRADIENT_PM25: &[&str] = &["pm02"];
const PURPLEAIR_PM25: &[&str] = &["sensor", "pm2.5"];
const IQAIR_AQIUS: &[&str] = &["data", "current", "pollution", "aqius"];

/// An asynchronous client for fetching sensor readings.
pub struct SensorClient {
    client: Client,
}

impl SensorClient {
    /// Creates a new `SensorClient`.
    ///
    /// Without a `timeout` the HTTP client's own defaults apply, so a slow vendor
    /// stalls the reading for as long as the connection stays open.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Fetches `api_url` and extracts a PM2.5 concentration from the response.
    ///
    /// The request is made before the URL is classified, so an unrecognised URL
    /// still costs one round trip and reports transport errors first.
    pub async fn read_pm25(&self, api_url: &str) -> std::result::Result<f64, ReadingError> {
        let response = self
            .client
            .get(api_url)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let data: Value = serde_json::from_str(&body)
            .map_err(|e| ReadingError::MalformedBody(e.to_string()))?;

        let vendor = Vendor::from_url(api_url);
        info!("{} sensor detected, fetching pm2.5 data...", vendor);

        let pm25 = extract_pm25(vendor, &data)?;
        if pm25 < 0.0 {
            return Err(ReadingError::Negative(pm25));
        }

        debug!("Read pm2.5 = {} from {}", pm25, api_url);
        Ok(pm25)
    }

    /// Same as [`read_pm25`](Self::read_pm25) but never fails: any error is logged
    /// and reported as [`ReadingError::SENTINEL`].
    pub async fn fetch_pm25(&self, api_url: &str) -> f64 {
        match self.read_pm25(api_url).await {
            Ok(pm25) => pm25,
            Err(e) => {
                warn!("Could not read sensor at {}: {}", api_url, e);
                ReadingError::SENTINEL
            },
        }
    }
}

/// Extracts the PM2.5 concentration from a vendor response body.
pub fn extract_pm25(vendor: Vendor, data: &Value) -> std::result::Result<f64, ReadingError> {
    match vendor {
        Vendor::AirGradient => lenient_number(data, AIRGRADIENT_PM25),
        Vendor::PurpleAir => lenient_number(data, PURPLEAIR_PM25),
        Vendor::IQAir => {
            let aqius = extract_aqius(data)?;
            aqius_to_pm25(aqius).ok_or(ReadingError::IndexOutOfRange(aqius))
        },
        Vendor::Unknown => Err(ReadingError::UnrecognizedVendor),
    }
}

/// Extracts IQAir's US AQI (`data.current.pollution.aqius`) from a response body.
///
/// The index must be a JSON number; a quoted index is a `WrongType`.
pub fn extract_aqius(data: &Value) -> std::result::Result<f64, ReadingError> {
    value_at(data, IQAIR_AQIUS)?
        .as_f64()
        .ok_or_else(|| ReadingError::WrongType(path_label(IQAIR_AQIUS)))
}

/// Reads a concentration leaf. Numeric strings are accepted for concentrations.
fn lenient_number(root: &Value, path: &[&str]) -> std::result::Result<f64, ReadingError> {
    let number = match value_at(root, path)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.ok_or_else(|| ReadingError::WrongType(path_label(path)))
}

/// Walks `path` through nested objects and returns the leaf.
fn value_at<'a>(root: &'a Value, path: &[&str]) -> std::result::Result<&'a Value, ReadingError> {
    let mut current = root;
    for (depth, key) in path.iter().enumerate() {
        let object = current
            .as_object()
            .ok_or_else(|| ReadingError::WrongType(path_label(&path[..depth])))?;
        current = object
            .get(*key)
            .ok_or_else(|| ReadingError::MissingField(path_label(&path[..=depth])))?;
    }
    Ok(current)
}

fn path_label(path: &[&str]) -> String {
    if path.is_empty() {
        "$".to_string()
    } else {
        path.join(".")
    }
}
