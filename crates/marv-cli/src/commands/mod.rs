//! Command implementations

pub mod common;
pub mod drop;
pub mod ls;
pub mod migrate;
