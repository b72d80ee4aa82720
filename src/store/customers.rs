//! A read-only directory of customers backed by a JSON file.
//!
//! The file holds a JSON array of customer records, e.g.
//!
//! ```json
//! [{ "id": 1, "name": "Cafe", "password": "Ab3dE9xQ2z", "api_url": "https://api.purpleair.com/v1/sensors/1" }]
//! ```

use crate::error::{AppError, Result};
use crate::models::Customer;
use std::path::Path;
use tracing::{debug, error, info};

/// In-memory copy of the customer records.
#[derive(Debug, Clone, Default)]
pub struct CustomerDirectory {
    customers: Vec<Customer>,
}

impl CustomerDirectory {
    #[cfg(test)]
    pub fn new(customers: Vec<Customer>) -> Self {
        Self { customers }
    }

    /// Loads the directory from `path`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the file cannot be read and `AppError::JsonParse`
    /// if it is not a JSON array of customer records.
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading customers from {}", path.display());

        let contents = std::fs::read_to_string(path).map_err(|e| {
            error!("Failed to read customer file {}: {}", path.display(), e);
            AppError::from(e)
        })?;

        let customers: Vec<Customer> = serde_json::from_str(&contents).map_err(|e| {
            error!("Failed to parse customer file {}: {}", path.display(), e);
            AppError::from(e)
        })?;

        debug!("Loaded {} customers", customers.len());
        Ok(Self { customers })
    }

    /// Finds the customer whose access key equals `password`.
    ///
    /// When several records share a key the first one wins.
    pub fn find_by_password(&self, password: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.password == password)
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}
