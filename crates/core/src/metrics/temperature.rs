use crate::{
    config::SensorPaths,
    error::CollectionError,
    error::SensorError,
    model::{MetricSnapshot, MetricValue, Reading, SensorSource},
    sensor,
};

/// coretemp reports millidegrees Celsius
pub const MILLIDEGREES: f64 = 1000.0;

pub struct TemperatureCollector {
    sensors: Vec<(&'static str, SensorSource)>,
}

impl TemperatureCollector {
    pub fn new(paths: &SensorPaths) -> Self {
        let [core0, core1, core2, core3] = &paths.cores;
        let sensors = vec![
            ("cpu", SensorSource::scalar(&paths.cpu, MILLIDEGREES)),
            ("core0", SensorSource::scalar(core0, MILLIDEGREES)),
            ("core1", SensorSource::scalar(core1, MILLIDEGREES)),
            ("core2", SensorSource::scalar(core2, MILLIDEGREES)),
            ("core3", SensorSource::scalar(core3, MILLIDEGREES)),
        ];

        Self { sensors }
    }

    /// Read every sensor in order, stopping at the first failure
    pub fn collect(&self) -> Result<MetricSnapshot, CollectionError> {
        let mut snapshot = MetricSnapshot::new();

        for (key, source) in &self.sensors {
            let celsius = read_celsius(source).map_err(|e| CollectionError::Temperature {
                path: source.path().to_path_buf(),
                source: e,
            })?;
            snapshot.insert(*key, MetricValue::Float(celsius));
        }

        Ok(snapshot)
    }
}

fn read_celsius(source: &SensorSource) -> Result<f64, SensorError> {
    match sensor::read_source(source)? {
        Reading::Scalar(celsius) => Ok(celsius),
        Reading::Block(_) => Err(SensorError::format(source.path(), "scalar")),
    }
}
