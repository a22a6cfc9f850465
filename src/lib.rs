//! Client and table transform for the e-Stat statistics API (REST 2.1, JSON).
//!
//! The crate splits in two halves:
//!
//! - [`fetch`] downloads `getStatsData` payloads and caches them on disk.
//!   It owns everything network-shaped: credentials, URLs, retries.
//! - [`transform`] reshapes a fetched [`StatsDocument`], a cube indexed by
//!   time × administrative area × category, into a rectangular
//!   [`DataTable`] ready for downstream analysis such as clustering.
//!
//! ```ignore
//! use estat_table::{Config, DataQuery, EstatClient, TableOptions};
//!
//! let config = Config::resolve(None)?.with_cache_dir("cache");
//! let client = EstatClient::new(config);
//! let doc = client
//!     .get_stats_data(&DataQuery::new("0000020201"))
//!     .await?;
//! let table = estat_table::tabulate(&doc, &TableOptions::default())?;
//! for record in &table.records {
//!     println!("{} {} {:?}", record.id, record.name, record.values);
//! }
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod fetch;
pub mod table;
pub mod transform;

pub use config::{configure, Config};
pub use document::StatsDocument;
pub use error::{EstatError, Result};
pub use fetch::{DataQuery, EstatClient, ResponseCache};
pub use table::{DataTable, Record};
pub use transform::cube::TimeRange;
pub use transform::{tabulate, TableOptions};
