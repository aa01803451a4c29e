use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// A single metric reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Integer(i64),
    Float(f64),
}

impl MetricValue {
    pub fn is_integer(self) -> bool {
        matches!(self, Self::Integer(_))
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for MetricValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

/// Metrics produced by one collection pass, keyed by metric name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricSnapshot {
    values: HashMap<String, MetricValue>,
}

impl MetricSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<K: Into<String>, V: Into<MetricValue>>(&mut self, key: K, value: V) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<MetricValue> {
        self.values.get(key).copied()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Move every value of `other` into this snapshot
    pub fn extend(&mut self, other: MetricSnapshot) {
        self.values.extend(other.values);
    }
}

/// Unit tag understood by the monitoring agent's graphs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphUnit {
    Percentage,
    Integer,
    Float,
}

/// One line of a graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricDefinition {
    pub name: String,
    pub label: String,
    /// Not part of the agent's meta format
    #[serde(skip_serializing, default)]
    pub diff: bool,
    pub stacked: bool,
}

impl MetricDefinition {
    pub fn new<N: Into<String>, L: Into<String>>(name: N, label: L) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            diff: false,
            stacked: false,
        }
    }
}

/// Display metadata for a metric group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDefinition {
    pub label: String,
    pub unit: GraphUnit,
    pub metrics: Vec<MetricDefinition>,
}

impl GraphDefinition {
    pub fn metric_names(&self) -> impl Iterator<Item = &str> {
        self.metrics.iter().map(|m| m.name.as_str())
    }
}

/// Text layout of a sensor file
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorFormat {
    /// `KEY=VALUE` per line, as in a power_supply uevent file
    KeyValue,
    /// A single integer in raw units; `divisor` converts it to physical units
    Scalar { divisor: f64 },
}

/// A virtual file to read and how to read it
#[derive(Debug, Clone, PartialEq)]
pub struct SensorSource {
    path: PathBuf,
    format: SensorFormat,
}

impl SensorSource {
    pub fn key_value<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            format: SensorFormat::KeyValue,
        }
    }

    pub fn scalar<P: Into<PathBuf>>(path: P, divisor: f64) -> Self {
        Self {
            path: path.into(),
            format: SensorFormat::Scalar { divisor },
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> SensorFormat {
        self.format
    }
}

/// What reading a [`SensorSource`] produced, shaped by its format
#[derive(Debug, Clone, PartialEq)]
pub enum Reading {
    /// Scalar value already divided into physical units
    Scalar(f64),
    /// Raw `KEY=VALUE` pairs in file order
    Block(Vec<(String, String)>),
}

/// How battery energy counters are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyUnit {
    /// Raw sysfs counters, integer µWh
    #[default]
    MicroWattHours,
    /// Converted to Wh as floating point
    WattHours,
}

impl EnergyUnit {
    pub fn graph_unit(self) -> GraphUnit {
        match self {
            Self::MicroWattHours => GraphUnit::Integer,
            Self::WattHours => GraphUnit::Float,
        }
    }

    pub fn convert(self, micro_watt_hours: i64) -> MetricValue {
        match self {
            Self::MicroWattHours => MetricValue::Integer(micro_watt_hours),
            Self::WattHours => MetricValue::Float(micro_watt_hours as f64 / 1_000_000.0),
        }
    }
}
