//! Core SHM library (config, file output, errors, logging).

pub mod config;
pub mod error;
pub mod logging;
pub mod output;

pub use error::ShmError;
