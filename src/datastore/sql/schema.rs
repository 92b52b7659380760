//! Relational schema for the SQLite datastore
//!
//! Dictionary tables (`metric`, `tag`) and the association table
//! (`metric_tag`) carry uniqueness constraints on their natural keys; the
//! conflict-tolerant upserts in `dictionary` rely on them. `data_point` is
//! the append-only fact table.

/// Idempotent schema bootstrap, executed statement by statement at connect
/// time.
pub(super) const CREATE_SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS metric (
        key  TEXT PRIMARY KEY,
        name TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS tag (
        name  TEXT NOT NULL,
        value TEXT NOT NULL,
        PRIMARY KEY (name, value)
    )",
    "CREATE TABLE IF NOT EXISTS metric_tag (
        metric_key TEXT NOT NULL REFERENCES metric (key),
        tag_name   TEXT NOT NULL,
        tag_value  TEXT NOT NULL,
        PRIMARY KEY (metric_key, tag_name, tag_value),
        FOREIGN KEY (tag_name, tag_value) REFERENCES tag (name, value)
    )",
    "CREATE TABLE IF NOT EXISTS data_point (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        metric_ref   TEXT NOT NULL REFERENCES metric (key),
        timestamp    INTEGER NOT NULL,
        long_value   INTEGER,
        double_value REAL
    )",
    "CREATE INDEX IF NOT EXISTS idx_data_point_metric_time
        ON data_point (metric_ref, timestamp)",
    "CREATE INDEX IF NOT EXISTS idx_metric_name ON metric (name)",
];
