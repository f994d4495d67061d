//! One-off migration for the rates document database: coerces the numeric
//! fields of the `coins`, `currencies` and `marketcap` collections from their
//! original string form to integers and reals, in place.

pub mod coerce;
pub mod config;
pub mod error;
pub mod pass;
pub mod store;
pub mod types;
