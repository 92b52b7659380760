//! Write path: one transaction per batch
//!
//! Dictionary resolution, association upsert, and sample appends all happen
//! inside a single unit of work. The transaction commits at the end or rolls
//! back when dropped on any early return, so readers never observe a partial
//! batch and the connection is released on every exit path.

use super::dictionary;
use crate::model::{DataPointSet, DataPointValue};
use crate::Result;
use sqlx::SqlitePool;
use tracing::debug;

pub(super) async fn put_data_points(pool: &SqlitePool, set: &DataPointSet) -> Result<()> {
    let key = set.metric_key();

    let mut tx = pool.begin().await?;

    dictionary::find_or_create_metric(&mut tx, &key, set.name()).await?;

    for (tag_name, tag_value) in set.tags() {
        dictionary::find_or_create_tag(&mut tx, tag_name, tag_value).await?;
        dictionary::find_or_create_association(&mut tx, &key, tag_name, tag_value).await?;
    }

    for point in set.points() {
        let (long_value, double_value) = match point.value {
            DataPointValue::Long(v) => (Some(v), None),
            DataPointValue::Double(v) => (None, Some(v)),
        };
        sqlx::query(
            "INSERT INTO data_point (metric_ref, timestamp, long_value, double_value)
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&key)
        .bind(point.timestamp)
        .bind(long_value)
        .bind(double_value)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    debug!(
        metric = set.name(),
        points = set.points().len(),
        "committed write batch"
    );
    Ok(())
}
