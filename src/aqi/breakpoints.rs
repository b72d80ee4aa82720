//! The US EPA PM2.5 breakpoint table and interpolation over it.
//!
//! IQAir only publishes the US AQI ("aqius") of a station, not its concentration,
//! so readings from that vendor are recovered by walking the table backwards.

/// One segment of a piecewise-linear AQI scale.
///
/// Both ranges are inclusive. Rows of a table are contiguous over integer index
/// values and ordered by index range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakpointRow {
    pub index_low: f64,
    pub index_high: f64,
    pub concentration_low: f64,
    pub concentration_high: f64,
}

impl BreakpointRow {
    const fn new(
        index_low: f64,
        index_high: f64,
        concentration_low: f64,
        concentration_high: f64,
    ) -> Self {
        Self {
            index_low,
            index_high,
            concentration_low,
            concentration_high,
        }
    }

    pub fn contains_index(&self, index: f64) -> bool {
        self.index_low <= index && index <= self.index_high
    }

    pub fn contains_concentration(&self, concentration: f64) -> bool {
        self.concentration_low <= concentration && concentration <= self.concentration_high
    }

    /// Concentration corresponding to `index` within this row.
    pub fn concentration_at(&self, index: f64) -> f64 {
        (index - self.index_low) * (self.concentration_high - self.concentration_low)
            / (self.index_high - self.index_low)
            + self.concentration_low
    }

    /// Index corresponding to `concentration` within this row.
    pub fn index_at(&self, concentration: f64) -> f64 {
        (self.index_high - self.index_low) / (self.concentration_high - self.concentration_low)
            * (concentration - self.concentration_low)
            + self.index_low
    }
}

/// Official EPA PM2.5 breakpoints, AQI 0–500 over 0.0–500.4 µg/m³.
pub const PM25_BREAKPOINTS: [BreakpointRow; 7] = [
    BreakpointRow::new(0.0, 50.0, 0.0, 12.0),
    BreakpointRow::new(51.0, 100.0, 12.1, 35.4),
    BreakpointRow::new(101.0, 150.0, 35.5, 55.4),
    BreakpointRow::new(151.0, 200.0, 55.5, 150.4),
    BreakpointRow::new(201.0, 300.0, 150.5, 250.4),
    BreakpointRow::new(301.0, 400.0, 250.5, 350.4),
    BreakpointRow::new(401.0, 500.0, 350.5, 500.4),
];

/// Estimates the PM2.5 concentration behind an IQAir "aqius" index.
///
/// The result is rounded to two decimal places. Returns `None` when no row
/// contains the index: negative values, values above 500, and fractional values
/// that fall between two rows (e.g. 50.5).
pub fn aqius_to_pm25(aqius: f64) -> Option<f64> {
    PM25_BREAKPOINTS
        .iter()
        .find(|row| row.contains_index(aqius))
        .map(|row| round_to_hundredths(row.concentration_at(aqius)))
}

/// Converts PM2.5 to AQI over the full EPA table.
///
/// The concentration is truncated to one decimal place first, as the EPA
/// does, and the index is truncated like [`super::pm25_to_aqi`]. Returns
/// `None` for negative concentrations and anything above 500.4.
pub fn pm25_to_aqi_epa(pm25: f64) -> Option<u32> {
    let truncated = (pm25 * 10.0).floor() / 10.0;
    PM25_BREAKPOINTS
        .iter()
        .find(|row| row.contains_concentration(truncated))
        .map(|row| row.index_at(truncated) as u32)
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
