//! Fetch collaborator: everything between the caller and the e-Stat API.
//!
//! The transform never calls into this module; it receives a fully parsed
//! [`crate::StatsDocument`] and works offline from there.

pub mod cache;
pub mod client;
pub mod urls;

pub use cache::ResponseCache;
pub use client::EstatClient;
pub use urls::{stats_data_url, DataQuery};
