//! Personal card-collection catalog: a SQLite-backed preference store plus
//! derived browse views over a static card dataset.
//!
//! The crate splits into two halves. The write side ([`store`]) persists
//! collector profiles and per-card wanted/owned flags through Diesel. The read
//! side loads the card dataset once ([`dataset`]), publishes it as an immutable
//! snapshot, and renders filtered, fuzzy-searchable, paginated views ([`view`],
//! [`search`]) by joining the snapshot with one profile's stored flags.

#![deny(missing_docs)]

pub mod config;
pub mod dataset;
pub mod db;
pub mod models;
/// Diesel table definitions, generated from the embedded migrations.
#[allow(missing_docs)]
pub mod schema;
pub mod search;
pub mod store;
pub mod view;
