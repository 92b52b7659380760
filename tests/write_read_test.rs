//! Integration tests for the write and read paths

use seriesdb::datastore::{Datastore, SqlDatastore, SqlDatastoreConfig};
use seriesdb::model::{DataPoint, DataPointSet, DataPointValue, MetricQuery};

async fn open_store() -> SqlDatastore {
    SqlDatastore::connect(SqlDatastoreConfig::in_memory())
        .await
        .unwrap()
}

fn cpu_load_batch(host: &str, points: &[DataPoint]) -> DataPointSet {
    let mut set = DataPointSet::new("cpu.load");
    set.add_tag("host", host);
    for point in points {
        set.add_point(*point);
    }
    set
}

#[tokio::test]
async fn write_then_read_returns_all_samples() {
    let store = open_store().await;

    let points: Vec<DataPoint> = (0..10).map(|i| DataPoint::long(i * 100, i)).collect();
    store
        .put_data_points(&cpu_load_batch("a", &points))
        .await
        .unwrap();

    let groups = store
        .query(&MetricQuery::new("cpu.load", 0..1000))
        .await
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].points, points);
    assert_eq!(groups[0].tags.get("host").map(String::as_str), Some("a"));
}

#[tokio::test]
async fn value_representation_survives_round_trip() {
    let store = open_store().await;

    let mut set = DataPointSet::new("mixed.series");
    set.add_point(DataPoint::long(1000, 42));
    set.add_point(DataPoint::double(2000, 0.5));
    store.put_data_points(&set).await.unwrap();

    let groups = store
        .query(&MetricQuery::new("mixed.series", 0..3000))
        .await
        .unwrap();

    assert_eq!(groups[0].points.len(), 2);
    assert_eq!(groups[0].points[0].value, DataPointValue::Long(42));
    assert_eq!(groups[0].points[1].value, DataPointValue::Double(0.5));
}

#[tokio::test]
async fn samples_are_returned_in_timestamp_order() {
    let store = open_store().await;

    let mut set = DataPointSet::new("cpu.load");
    set.add_point(DataPoint::long(3000, 3));
    set.add_point(DataPoint::long(1000, 1));
    set.add_point(DataPoint::long(2000, 2));
    store.put_data_points(&set).await.unwrap();

    let groups = store
        .query(&MetricQuery::new("cpu.load", 0..5000))
        .await
        .unwrap();

    let timestamps: Vec<i64> = groups[0].points.iter().map(|p| p.timestamp).collect();
    assert_eq!(timestamps, vec![1000, 2000, 3000]);
}

#[tokio::test]
async fn time_range_bounds_are_inclusive() {
    let store = open_store().await;

    let points = [
        DataPoint::long(999, 0),
        DataPoint::long(1000, 1),
        DataPoint::long(2000, 2),
        DataPoint::long(2001, 3),
    ];
    store
        .put_data_points(&cpu_load_batch("a", &points))
        .await
        .unwrap();

    let groups = store
        .query(&MetricQuery::new("cpu.load", 1000..2000))
        .await
        .unwrap();

    let timestamps: Vec<i64> = groups[0].points.iter().map(|p| p.timestamp).collect();
    assert_eq!(timestamps, vec![1000, 2000]);
}

#[tokio::test]
async fn tag_filter_isolates_matching_series() {
    let store = open_store().await;

    let mut us = DataPointSet::new("requests");
    us.add_tag("region", "us");
    us.add_point(DataPoint::long(1000, 10));
    store.put_data_points(&us).await.unwrap();

    let mut eu = DataPointSet::new("requests");
    eu.add_tag("region", "eu");
    eu.add_point(DataPoint::long(1500, 20));
    store.put_data_points(&eu).await.unwrap();

    let groups = store
        .query(&MetricQuery::new("requests", 0..3000).with_tag("region", "us"))
        .await
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].points, vec![DataPoint::long(1000, 10)]);
    assert_eq!(groups[0].tags.len(), 1);
    assert_eq!(
        groups[0].tags.get("region").map(String::as_str),
        Some("us")
    );
}

#[tokio::test]
async fn filter_values_are_bound_not_interpolated() {
    let store = open_store().await;

    let mut set = DataPointSet::new("requests");
    set.add_tag("region", "us");
    set.add_point(DataPoint::long(1000, 10));
    store.put_data_points(&set).await.unwrap();

    // A hostile filter value must behave as a plain non-matching string.
    let groups = store
        .query(
            &MetricQuery::new("requests", 0..3000)
                .with_tag("region", "us' OR '1'='1"),
        )
        .await
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert!(groups[0].is_empty());
}

#[tokio::test]
async fn empty_window_yields_one_empty_group() {
    let store = open_store().await;

    store
        .put_data_points(&cpu_load_batch("a", &[DataPoint::long(5000, 1)]))
        .await
        .unwrap();

    let groups = store
        .query(&MetricQuery::new("cpu.load", 0..1000))
        .await
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert!(groups[0].points.is_empty());
    assert!(groups[0].tags.is_empty());
}

#[tokio::test]
async fn unfiltered_query_spans_all_tag_combinations() {
    let store = open_store().await;

    store
        .put_data_points(&cpu_load_batch("a", &[DataPoint::long(1000, 1)]))
        .await
        .unwrap();
    store
        .put_data_points(&cpu_load_batch("b", &[DataPoint::long(2000, 2)]))
        .await
        .unwrap();

    let groups = store
        .query(&MetricQuery::new("cpu.load", 0..3000))
        .await
        .unwrap();

    // Both series match; the read path still folds everything into a single
    // group whose tag map keeps one value per tag name.
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].points.len(), 2);
    assert!(groups[0].tags.contains_key("host"));
}

#[tokio::test]
async fn reversed_time_range_yields_empty_group() {
    let store = open_store().await;

    store
        .put_data_points(&cpu_load_batch("a", &[DataPoint::long(1000, 5)]))
        .await
        .unwrap();

    // An inverted window matches nothing; like any empty match it comes back
    // as one empty group, not a failure.
    let groups = store
        .query(&MetricQuery::new("cpu.load", 3000..0))
        .await
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert!(groups[0].is_empty());
}

#[tokio::test]
async fn metadata_scans_list_dictionary_contents() {
    let store = open_store().await;

    let mut set = DataPointSet::new("cpu.load");
    set.add_tag("host", "a").add_tag("region", "us");
    set.add_point(DataPoint::long(1000, 5));
    store.put_data_points(&set).await.unwrap();

    let mut mem = DataPointSet::new("mem.used");
    mem.add_tag("host", "a");
    mem.add_point(DataPoint::double(1000, 0.7));
    store.put_data_points(&mem).await.unwrap();

    let mut metric_names = store.metric_names().await.unwrap();
    metric_names.sort();
    assert_eq!(metric_names, vec!["cpu.load", "mem.used"]);

    let mut tag_names = store.tag_names().await.unwrap();
    tag_names.sort();
    assert_eq!(tag_names, vec!["host", "region"]);

    let mut tag_values = store.tag_values().await.unwrap();
    tag_values.sort();
    assert_eq!(tag_values, vec!["a", "us"]);
}

// The concrete scenario from the design discussion: two samples, full-window
// read, exact values and tag map back out.
#[tokio::test]
async fn cpu_load_scenario() {
    let store = open_store().await;

    let points = [DataPoint::long(1000, 5), DataPoint::long(2000, 7)];
    store
        .put_data_points(&cpu_load_batch("a", &points))
        .await
        .unwrap();

    let groups = store
        .query(&MetricQuery::new("cpu.load", 0..3000))
        .await
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].points, points.to_vec());
    assert_eq!(groups[0].tags.len(), 1);
    assert_eq!(groups[0].tags.get("host").map(String::as_str), Some("a"));
}

#[tokio::test]
async fn file_backed_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let config = SqlDatastoreConfig::file(dir.path().join("series.db"));
    let store = SqlDatastore::connect(config).await.unwrap();

    store
        .put_data_points(&cpu_load_batch("a", &[DataPoint::long(1000, 5)]))
        .await
        .unwrap();

    let groups = store
        .query(&MetricQuery::new("cpu.load", 0..3000))
        .await
        .unwrap();
    assert_eq!(groups[0].points, vec![DataPoint::long(1000, 5)]);

    store.close().await.unwrap();
}
