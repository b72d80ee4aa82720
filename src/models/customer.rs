use super::Vendor;
use serde::{Deserialize, Serialize};

/// A registered customer and the sensor their dashboard reads.
///
/// Records are owned by the administrative layer; this application only reads them.
#[allow(dead_code)] // Contact fields are carried for completeness, not displayed
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    /// Access key the customer's display presents when requesting sensor data.
    pub password: String,
    pub api_url: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub sensor_location: Option<String>,
    /// Vendor label cached when the record was saved.
    #[serde(default)]
    pub sensor_name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Customer {
    /// Sensor name to display: the stored one, or the vendor detected from the URL.
    pub fn sensor_label(&self) -> String {
        match self.sensor_name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => Vendor::display_label(&self.api_url).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Customer {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_optional_fields_default_to_none() {
        let customer = parse(json!({
            "id": 4,
            "name": "Bakery",
            "password": "k",
            "api_url": "https://api.airvisual.com/v2/city",
        }));
        assert_eq!(customer.email, None);
        assert_eq!(customer.notes, None);
    }

    #[test]
    fn test_sensor_label() {
        let mut customer = parse(json!({
            "id": 4,
            "name": "Bakery",
            "password": "k",
            "api_url": "https://api.airvisual.com/v2/city",
            "sensor_name": "Window unit",
        }));
        assert_eq!(customer.sensor_label(), "Window unit");

        customer.sensor_name = Some(String::new());
        assert_eq!(customer.sensor_label(), "IQAir");

        customer.sensor_name = None;
        customer.api_url = "https://example.org/sensor".to_string();
        assert_eq!(customer.sensor_label(), "Unknown");
    }
}
