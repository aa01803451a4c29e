pub mod battery;
pub mod temperature;

pub use battery::BatteryCollector;
pub use temperature::TemperatureCollector;

use crate::{
    config::{CollectorOptions, Config, SensorPaths},
    error::CollectionError,
    model::{GraphDefinition, MetricSnapshot, SensorSource},
    schema,
};
use std::collections::BTreeMap;

/// Main metrics collector that coordinates the battery and temperature passes
pub struct MetricsCollector {
    options: CollectorOptions,
    battery: Option<BatteryCollector>,
    temperature: Option<TemperatureCollector>,
}

impl MetricsCollector {
    pub fn new(paths: &SensorPaths, options: CollectorOptions) -> Self {
        let battery = options.battery.then(|| {
            BatteryCollector::new(SensorSource::key_value(&paths.battery), options.energy_unit)
        });
        let temperature = options.temperature.then(|| TemperatureCollector::new(paths));

        Self {
            options,
            battery,
            temperature,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.paths, config.collectors)
    }

    /// Graph definitions for the groups this collector produces
    pub fn definitions(&self) -> BTreeMap<String, GraphDefinition> {
        schema::definitions_for(&self.options)
    }

    /// Run one collection pass
    ///
    /// Battery is read before temperature. Any failure discards everything
    /// read so far.
    pub fn collect(&self) -> Result<MetricSnapshot, CollectionError> {
        let mut snapshot = MetricSnapshot::new();

        if let Some(battery) = &self.battery {
            snapshot.extend(battery.collect()?);
        }

        if let Some(temperature) = &self.temperature {
            snapshot.extend(temperature.collect()?);
        }

        Ok(snapshot)
    }
}
