/// Converts a PM2.5 concentration (µg/m³) to an AQI score.
///
/// This is a simplified three-segment scale: everything above 35.4 µg/m³
/// saturates at 100, and negative input maps to 0. Scores are truncated, not
/// rounded. For the full EPA scale see [`super::pm25_to_aqi_epa`].
pub fn pm25_to_aqi(pm25: f64) -> u32 {
    let aqi = if pm25 < 0.0 {
        0.0
    } else if pm25 <= 12.0 {
        (50.0 / 12.0) * pm25
    } else if pm25 <= 35.4 {
        ((100.0 - 51.0) / (35.4 - 12.1)) * (pm25 - 12.1) + 51.0
    } else {
        100.0
    };

    // `as` truncates toward zero.
    aqi as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(-5.0, 0)]
    #[case(0.0, 0)]
    #[case(10.0, 41)]
    #[case(11.9, 49)]
    #[case(12.0, 50)]
    #[case(20.0, 67)]
    #[case(23.51, 74)]
    #[case(35.4, 100)]
    #[case(40.0, 100)]
    #[case(100.0, 100)]
    #[case(1000.0, 100)]
    fn test_pm25_to_aqi(#[case] pm25: f64, #[case] expected: u32) {
        assert_eq!(pm25_to_aqi(pm25), expected);
    }

    #[test]
    fn test_pm25_to_aqi_never_exceeds_100() {
        for tenth in 0..=5000 {
            assert!(pm25_to_aqi(f64::from(tenth) / 10.0) <= 100);
        }
    }
}
