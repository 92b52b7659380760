//! Domain model for metric series, samples, and query descriptors
//!
//! Identity is decided here: a series is a metric name plus an unordered tag
//! set, and [`metric_key`] derives the canonical key both the write and read
//! paths agree on. Everything else in the crate treats that key as opaque.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::ops::Range;

/// Numeric value of a single sample.
///
/// Exactly one representation is carried per sample; the write path persists
/// it into the matching typed column and the read path restores the same
/// variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DataPointValue {
    /// Integer-valued sample
    Long(i64),
    /// Floating-point-valued sample
    Double(f64),
}

impl DataPointValue {
    /// Returns true if this is an integer-valued sample
    pub fn is_long(&self) -> bool {
        matches!(self, DataPointValue::Long(_))
    }

    /// The value widened to f64, whatever its stored representation
    pub fn as_f64(&self) -> f64 {
        match self {
            DataPointValue::Long(v) => *v as f64,
            DataPointValue::Double(v) => *v,
        }
    }
}

/// A single timestamped sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Sample time in epoch milliseconds
    pub timestamp: i64,
    /// Sample value
    pub value: DataPointValue,
}

impl DataPoint {
    /// Create an integer-valued sample
    pub fn long(timestamp: i64, value: i64) -> Self {
        Self {
            timestamp,
            value: DataPointValue::Long(value),
        }
    }

    /// Create a floating-point-valued sample
    pub fn double(timestamp: i64, value: f64) -> Self {
        Self {
            timestamp,
            value: DataPointValue::Double(value),
        }
    }
}

/// A write batch: one series identity plus the samples to append.
///
/// Tags are held in a `BTreeMap` so iteration is always in tag-name order,
/// which is what makes the derived metric key independent of the order tags
/// were supplied in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPointSet {
    name: String,
    tags: BTreeMap<String, String>,
    points: Vec<DataPoint>,
}

impl DataPointSet {
    /// Create an empty batch for the given metric name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: BTreeMap::new(),
            points: Vec::new(),
        }
    }

    /// Attach a tag to the series identity
    pub fn add_tag(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.tags.insert(name.into(), value.into());
        self
    }

    /// Append a sample to the batch
    pub fn add_point(&mut self, point: DataPoint) -> &mut Self {
        self.points.push(point);
        self
    }

    /// Metric display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tag set, in tag-name order
    pub fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }

    /// Samples in this batch
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    /// Canonical dictionary key for this batch's series identity
    pub fn metric_key(&self) -> String {
        metric_key(&self.name, &self.tags)
    }
}

/// Derive the canonical metric key from a name and tag set.
///
/// The key is the metric name followed by `name=value:` fragments in
/// tag-name order, so set-equal tag maps always resolve to the same key
/// regardless of insertion order.
pub fn metric_key(name: &str, tags: &BTreeMap<String, String>) -> String {
    let mut key = String::with_capacity(name.len() + 16 * tags.len());
    key.push_str(name);
    key.push(':');
    for (tag_name, tag_value) in tags {
        key.push_str(tag_name);
        key.push('=');
        key.push_str(tag_value);
        key.push(':');
    }
    key
}

/// Inclusive time range for queries, in epoch milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: i64,
    pub end: i64,
}

impl TimeRange {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, timestamp: i64) -> bool {
        timestamp >= self.start && timestamp <= self.end
    }

    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start <= other.end && self.end >= other.start
    }
}

impl From<Range<i64>> for TimeRange {
    fn from(range: Range<i64>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// Read-path query descriptor
///
/// `tags` holds exact-equality filters; an empty map means no tag
/// restriction, matching every tag combination recorded for the metric name
/// in range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricQuery {
    /// Metric display name to match
    pub name: String,
    /// Inclusive timestamp window
    pub range: TimeRange,
    /// Exact tag-value equality filters
    pub tags: HashMap<String, String>,
}

impl MetricQuery {
    /// Create a query with no tag filters
    pub fn new(name: impl Into<String>, range: impl Into<TimeRange>) -> Self {
        Self {
            name: name.into(),
            range: range.into(),
            tags: HashMap::new(),
        }
    }

    /// Add an exact tag-value equality filter
    pub fn with_tag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(name.into(), value.into());
        self
    }
}

/// One resolved tag set paired with its matching time-ordered samples.
///
/// Transient read-path view; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryGroup {
    /// Tag set actually present for the query window
    pub tags: BTreeMap<String, String>,
    /// Matching samples in timestamp order
    pub points: Vec<DataPoint>,
}

impl QueryGroup {
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.points.is_empty()
    }
}
