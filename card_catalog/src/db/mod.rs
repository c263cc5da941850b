//! Connection and schema-migration utilities for the preference store.
//!
//! This module provides:
//! - [`connection::connect_sqlite`]: opens a connection with WAL, foreign_keys=ON, and a 5000ms busy_timeout applied.
//! - [`migrate::run_sqlite`]: applies the embedded Diesel migrations; accepts a bare file path or `sqlite://` URL.
//!
//! Example:
//! ```no_run
//! use card_catalog::db::{connection, migrate};
//!
//! // Run embedded migrations, then open a tuned connection for queries.
//! let db_path = std::env::temp_dir().join("card_catalog_example.db");
//! migrate::run_sqlite(db_path.to_str().unwrap()).expect("migrations");
//! let _conn = connection::connect_sqlite(db_path.to_str().unwrap()).expect("connect");
//! ```

pub mod connection;
pub mod migrate;
