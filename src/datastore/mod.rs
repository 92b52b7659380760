//! Datastore interface for SeriesDB
//!
//! The [`Datastore`] trait is the seam between callers and the storage
//! backend. The crate ships one implementation, [`SqlDatastore`], backed by
//! an embedded SQLite database.

mod sql;

pub use sql::{SqlDatastore, SqlDatastoreConfig};

use crate::model::{DataPointSet, MetricQuery, QueryGroup};
use crate::Result;
use async_trait::async_trait;

/// Datastore interface
///
/// One invocation per write batch or per query; implementations must be safe
/// to call from concurrent tasks.
#[async_trait]
pub trait Datastore: Send + Sync {
    /// Append a batch of samples for one series, atomically.
    ///
    /// Resolves the series identity against the dictionary tables (creating
    /// rows on first use), then appends every sample under the resolved
    /// metric key. The whole batch is one transaction: on any failure nothing
    /// from the batch becomes visible.
    async fn put_data_points(&self, set: &DataPointSet) -> Result<()>;

    /// Query samples by metric name, time range, and exact tag filters.
    ///
    /// Returns a single [`QueryGroup`] carrying the tag set resolved for the
    /// query window and the matching samples in timestamp order. An empty
    /// match yields one empty group, not an error.
    async fn query(&self, query: &MetricQuery) -> Result<Vec<QueryGroup>>;

    /// List every metric name in the dictionary
    async fn metric_names(&self) -> Result<Vec<String>>;

    /// List every tag name in the dictionary
    async fn tag_names(&self) -> Result<Vec<String>>;

    /// List every tag value in the dictionary
    async fn tag_values(&self) -> Result<Vec<String>>;

    /// Release the underlying storage resources
    async fn close(&self) -> Result<()>;
}
