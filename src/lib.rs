//! Catalog editor core for CORDATA, the catalog of open government data use cases,
//! plus the tabular cleaning utilities used to prepare its source tables.

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod server;
pub mod session;
pub mod tabular;

pub use error::{CordataError, Result};
