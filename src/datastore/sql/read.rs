//! Read path: bound predicate construction and grouped result assembly
//!
//! Tag filters are compiled into placeholder-bound `EXISTS` clauses via
//! [`sqlx::QueryBuilder`]; filter values never reach the SQL text. The
//! sample scan and the tags-in-window scan share the same predicate so the
//! returned group's tag map describes exactly the rows it carries.

use crate::model::{DataPoint, DataPointValue, MetricQuery, QueryGroup};
use crate::{Error, Result};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

pub(super) async fn query(pool: &SqlitePool, query: &MetricQuery) -> Result<Vec<QueryGroup>> {
    let points = fetch_points(pool, query).await?;
    let tags = fetch_tags_in_window(pool, query).await?;

    debug!(
        metric = query.name.as_str(),
        points = points.len(),
        tags = tags.len(),
        "resolved query window"
    );

    // One group per query: all matching tag combinations are folded into a
    // single tag map, mirroring the single-series assumption of the write
    // side's canonical key.
    Ok(vec![QueryGroup { tags, points }])
}

async fn fetch_points(pool: &SqlitePool, query: &MetricQuery) -> Result<Vec<DataPoint>> {
    let mut builder: QueryBuilder<'_, Sqlite> = QueryBuilder::new(
        "SELECT d.timestamp, d.long_value, d.double_value \
         FROM data_point d JOIN metric m ON m.key = d.metric_ref \
         WHERE m.name = ",
    );
    builder.push_bind(query.name.as_str());
    builder.push(" AND d.timestamp BETWEEN ");
    builder.push_bind(query.range.start);
    builder.push(" AND ");
    builder.push_bind(query.range.end);
    push_tag_predicates(&mut builder, &query.tags);
    builder.push(" ORDER BY d.timestamp");

    let rows: Vec<(i64, Option<i64>, Option<f64>)> =
        builder.build_query_as().fetch_all(pool).await?;

    rows.into_iter()
        .map(|(timestamp, long_value, double_value)| {
            let value = match (long_value, double_value) {
                (Some(v), _) => DataPointValue::Long(v),
                (None, Some(v)) => DataPointValue::Double(v),
                (None, None) => {
                    return Err(Error::Internal(format!(
                        "data point at {} carries no value",
                        timestamp
                    )))
                }
            };
            Ok(DataPoint { timestamp, value })
        })
        .collect()
}

/// Distinct tag pairs attached to metrics matching the query window, folded
/// into one name-to-value map.
async fn fetch_tags_in_window(
    pool: &SqlitePool,
    query: &MetricQuery,
) -> Result<BTreeMap<String, String>> {
    let mut builder: QueryBuilder<'_, Sqlite> = QueryBuilder::new(
        "SELECT DISTINCT mt.tag_name, mt.tag_value \
         FROM metric_tag mt JOIN metric m ON m.key = mt.metric_key \
         WHERE m.name = ",
    );
    builder.push_bind(query.name.as_str());
    builder.push(
        " AND EXISTS (SELECT 1 FROM data_point d \
         WHERE d.metric_ref = m.key AND d.timestamp BETWEEN ",
    );
    builder.push_bind(query.range.start);
    builder.push(" AND ");
    builder.push_bind(query.range.end);
    builder.push(")");
    push_tag_predicates(&mut builder, &query.tags);

    let rows: Vec<(String, String)> = builder.build_query_as().fetch_all(pool).await?;

    Ok(rows.into_iter().collect())
}

/// Append one bound `EXISTS` equality clause per tag filter.
///
/// An empty filter map appends nothing: every tag combination recorded for
/// the metric name matches.
fn push_tag_predicates<'args>(
    builder: &mut QueryBuilder<'args, Sqlite>,
    filters: &'args HashMap<String, String>,
) {
    for (name, value) in filters {
        builder.push(
            " AND EXISTS (SELECT 1 FROM metric_tag f \
             WHERE f.metric_key = m.key AND f.tag_name = ",
        );
        builder.push_bind(name.as_str());
        builder.push(" AND f.tag_value = ");
        builder.push_bind(value.as_str());
        builder.push(")");
    }
}

pub(super) async fn metric_names(pool: &SqlitePool) -> Result<Vec<String>> {
    let names = sqlx::query_scalar("SELECT DISTINCT name FROM metric")
        .fetch_all(pool)
        .await?;
    Ok(names)
}

pub(super) async fn tag_names(pool: &SqlitePool) -> Result<Vec<String>> {
    let names = sqlx::query_scalar("SELECT DISTINCT name FROM tag")
        .fetch_all(pool)
        .await?;
    Ok(names)
}

pub(super) async fn tag_values(pool: &SqlitePool) -> Result<Vec<String>> {
    let values = sqlx::query_scalar("SELECT DISTINCT value FROM tag")
        .fetch_all(pool)
        .await?;
    Ok(values)
}
