use crate::{
    error::{CollectionError, SensorError},
    model::{EnergyUnit, MetricSnapshot, MetricValue, Reading, SensorSource},
    sensor,
};
use log::trace;

/// How a battery field's integer is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    /// Percentages and counters, always integers
    Plain,
    /// µWh counters, subject to [`EnergyUnit`]
    Energy,
}

/// uevent keys we report, the metric each one lands in, and its kind
const BATTERY_FIELDS: &[(&str, &str, FieldKind)] = &[
    ("POWER_SUPPLY_CAPACITY", "capacity", FieldKind::Plain),
    ("POWER_SUPPLY_CYCLE_COUNT", "cycle_count", FieldKind::Plain),
    ("POWER_SUPPLY_ENERGY_NOW", "energy_now", FieldKind::Energy),
    ("POWER_SUPPLY_ENERGY_FULL", "energy_full", FieldKind::Energy),
    ("POWER_SUPPLY_ENERGY_FULL_DESIGN", "energy_design", FieldKind::Energy),
];

pub struct BatteryCollector {
    source: SensorSource,
    energy_unit: EnergyUnit,
}

impl BatteryCollector {
    /// `source` must be a key-value source, normally the BAT0 uevent file
    pub fn new(source: SensorSource, energy_unit: EnergyUnit) -> Self {
        Self {
            source,
            energy_unit,
        }
    }

    /// Read the uevent file and convert every recognized field
    ///
    /// Fields missing from the file are left out of the snapshot; a
    /// recognized field that does not parse fails the whole read.
    pub fn collect(&self) -> Result<MetricSnapshot, CollectionError> {
        let path = self.source.path();
        let pairs = match sensor::read_source(&self.source) {
            Ok(Reading::Block(pairs)) => pairs,
            Ok(Reading::Scalar(_)) => {
                return Err(CollectionError::Battery {
                    key: None,
                    source: SensorError::format(path, "key-value"),
                })
            }
            Err(source) => return Err(CollectionError::Battery { key: None, source }),
        };

        let mut snapshot = MetricSnapshot::new();
        for (raw_key, raw_value) in &pairs {
            let Some((metric, kind)) = field_for(raw_key) else {
                trace!("skipping battery field {}", raw_key);
                continue;
            };

            let value = sensor::parse_integer(path, raw_value).map_err(|source| {
                CollectionError::Battery {
                    key: Some(raw_key.clone()),
                    source,
                }
            })?;

            snapshot.insert(metric, self.convert(kind, value));
        }

        Ok(snapshot)
    }

    fn convert(&self, kind: FieldKind, value: i64) -> MetricValue {
        match kind {
            FieldKind::Energy => self.energy_unit.convert(value),
            FieldKind::Plain => MetricValue::Integer(value),
        }
    }
}

fn field_for(raw_key: &str) -> Option<(&'static str, FieldKind)> {
    BATTERY_FIELDS
        .iter()
        .find(|(key, _, _)| *key == raw_key)
        .map(|(_, metric, kind)| (*metric, *kind))
}
