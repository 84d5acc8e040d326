//! Shared types for network insight.
//!
//! Holds the connection data model, the rule-based title classifier, the
//! result shapes returned by the analysis engine, error types, time helpers,
//! and CLI settings.

pub mod classifier;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod stats;
pub mod tabular;
pub mod time_utils;

pub use error::{NetworkError, Result};
