//! # SeriesDB
//!
//! A small relational time-series datastore.
//!
//! SeriesDB maps the usual time-series data model — a named metric carrying
//! an unordered set of key/value tags and a sequence of timestamped numeric
//! samples — onto a normalized relational schema, and back:
//!
//! - **Dictionary encoding**: tag pairs and metric identities are stored once
//!   in deduplicated lookup tables and referenced by stable natural keys.
//! - **Atomic write batches**: every write batch is resolved and appended in
//!   exactly one transaction; readers never observe a partial batch.
//! - **Bound dynamic predicates**: tag filters are compiled into
//!   placeholder-bound equality clauses, never interpolated strings.
//!
//! ## Architecture
//!
//! - [`model`]: domain types (`DataPointSet`, `MetricQuery`, `QueryGroup`)
//!   and the canonical metric-key derivation
//! - [`datastore`]: the [`datastore::Datastore`] trait and its SQLite-backed
//!   implementation [`datastore::SqlDatastore`]
//! - [`telemetry`]: tracing bootstrap for embedding binaries

pub mod datastore;
pub mod model;
pub mod telemetry;

mod error;

pub use error::{Error, Result};

/// Re-exports for convenience
pub mod prelude {
    pub use crate::datastore::{Datastore, SqlDatastore, SqlDatastoreConfig};
    pub use crate::model::{
        DataPoint, DataPointSet, DataPointValue, MetricQuery, QueryGroup, TimeRange,
    };
    pub use crate::{Error, Result};
}
