//! Provides read access to the customer records.
//!
//! Records are maintained by the administrative layer; this module only loads
//! them from the JSON file it exports (`customers` submodule).

mod customers;

pub use customers::*;
