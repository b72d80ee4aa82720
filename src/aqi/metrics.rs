use crate::models::HealthLabel;

/// Cigarettes-per-day equivalent of an AQI score: one cigarette per 50 points.
pub fn aqi_to_cigars_per_day(aqi: u32) -> f64 {
    f64::from(aqi) / 50.0
}

/// Buckets an AQI score: up to 50 is good, up to 100 moderate, above that unhealthy.
pub fn aqi_to_health_label(aqi: u32) -> HealthLabel {
    if aqi <= 50 {
        HealthLabel::Good
    } else if aqi <= 100 {
        HealthLabel::Moderate
    } else {
        HealthLabel::Unhealthy
    }
}
