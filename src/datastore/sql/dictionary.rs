//! Dictionary and association stores
//!
//! Find-or-create over the deduplicated lookup tables. Every operation is a
//! single conflict-tolerant upsert against the natural-key constraint, so
//! two racing writers that both miss the "find" cannot create duplicate
//! rows; the loser's insert degrades to a no-op. All operations run on the
//! caller's write transaction and commit or roll back with it.

use crate::Result;
use sqlx::{Sqlite, Transaction};

/// Find or create a tag pair.
///
/// Existing rows are left untouched; tag pairs are immutable once created.
pub(super) async fn find_or_create_tag(
    tx: &mut Transaction<'_, Sqlite>,
    name: &str,
    value: &str,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO tag (name, value) VALUES (?1, ?2)
         ON CONFLICT (name, value) DO NOTHING",
    )
    .bind(name)
    .bind(value)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Find or create a metric identity by canonical key.
///
/// Re-writing an existing key idempotently resets the display name; the row
/// itself is never duplicated.
pub(super) async fn find_or_create_metric(
    tx: &mut Transaction<'_, Sqlite>,
    key: &str,
    name: &str,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO metric (key, name) VALUES (?1, ?2)
         ON CONFLICT (key) DO UPDATE SET name = excluded.name",
    )
    .bind(key)
    .bind(name)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Find or create the association linking a metric to one of its tag pairs.
///
/// Created once per distinct (metric, tag) pair, never updated or deleted.
pub(super) async fn find_or_create_association(
    tx: &mut Transaction<'_, Sqlite>,
    metric_key: &str,
    tag_name: &str,
    tag_value: &str,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO metric_tag (metric_key, tag_name, tag_value) VALUES (?1, ?2, ?3)
         ON CONFLICT (metric_key, tag_name, tag_value) DO NOTHING",
    )
    .bind(metric_key)
    .bind(tag_name)
    .bind(tag_value)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
