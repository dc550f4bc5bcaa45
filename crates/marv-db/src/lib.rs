//! marv-db - DuckDB driver for Marv
//!
//! This crate implements the `marv_core::Driver` capability against a
//! DuckDB database, persisting applied-migration history in a dedicated
//! table.

pub mod duckdb;

pub use duckdb::{DuckDbDriver, DEFAULT_TABLE};
