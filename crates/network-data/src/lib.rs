//! Data layer for network-insight.
//!
//! Loads a LinkedIn Connections.csv export into a
//! [`ConnectionTable`](network_core::models::ConnectionTable) and computes
//! frequencies, KPIs, timelines and cross-tabulations over it.

pub mod analysis;
pub mod crosstab;
pub mod frequency;
pub mod loader;
pub mod timeline;

pub use network_core as core;
