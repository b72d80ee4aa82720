//! Defines the data structures and models used throughout the application.
//!
//! This includes the vendor classification of sensor URLs, the customer record
//! read from the customer directory, and the reports produced for callers.

mod customer;
mod report;
mod vendor;

pub use customer::*;
pub use report::*;
pub use vendor::*;
