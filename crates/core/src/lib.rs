pub mod config;
pub mod error;
pub mod metrics;
pub mod model;
pub mod schema;
pub mod sensor;

pub use config::{CollectorOptions, Config, SensorPaths};
pub use error::{CollectionError, CoreError, NumberError, Result, SensorError};
pub use metrics::MetricsCollector;
pub use model::*;
pub use schema::{definitions, definitions_for};

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const UEVENT: &str = "POWER_SUPPLY_CAPACITY=87\n\
POWER_SUPPLY_CYCLE_COUNT=412\n\
POWER_SUPPLY_ENERGY_NOW=41000000\n\
POWER_SUPPLY_ENERGY_FULL=50000000\n\
POWER_SUPPLY_ENERGY_FULL_DESIGN=57000000\n";

    fn sysfs_tree(root: &std::path::Path) -> SensorPaths {
        let paths = SensorPaths::under(root);
        fs::create_dir_all(paths.battery.parent().unwrap()).unwrap();
        fs::create_dir_all(paths.cpu.parent().unwrap()).unwrap();
        fs::write(&paths.battery, UEVENT).unwrap();
        fs::write(&paths.cpu, "45000\n").unwrap();
        for (path, raw) in paths.cores.iter().zip(["44000\n", "46000\n", "43000\n", "45500\n"]) {
            fs::write(path, raw).unwrap();
        }
        paths
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.metric_key_prefix, "thinkpad");
        assert!(config.collectors.battery);
        assert!(config.collectors.temperature);
        assert_eq!(config.collectors.energy_unit, EnergyUnit::MicroWattHours);
        assert_eq!(
            config.paths.battery,
            std::path::PathBuf::from("/sys/class/power_supply/BAT0/uevent")
        );
    }

    #[test]
    fn test_snapshot_covers_every_defined_metric() {
        let dir = tempfile::tempdir().unwrap();
        let paths = sysfs_tree(dir.path());
        let collector = MetricsCollector::new(&paths, CollectorOptions::default());

        let snapshot = collector.collect().unwrap();
        for graph in collector.definitions().values() {
            for name in graph.metric_names() {
                assert!(snapshot.contains_key(name), "missing {}", name);
            }
        }
        assert_eq!(snapshot.len(), 10);
    }

    #[test]
    fn test_disabled_temperature_skips_sensors() {
        let dir = tempfile::tempdir().unwrap();
        let paths = sysfs_tree(dir.path());
        fs::remove_file(&paths.cpu).unwrap();

        let options = CollectorOptions {
            temperature: false,
            ..CollectorOptions::default()
        };
        let snapshot = MetricsCollector::new(&paths, options).collect().unwrap();
        assert_eq!(snapshot.len(), 5);
        assert!(!snapshot.contains_key("cpu"));
    }

    #[test]
    fn test_snapshot_serialization() {
        let mut snapshot = MetricSnapshot::new();
        assert!(snapshot.is_empty());
        snapshot.insert("capacity", 87i64);
        snapshot.insert("cpu", 45.5);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json, serde_json::json!({ "capacity": 87, "cpu": 45.5 }));

        let back: MetricSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back.get("capacity"), Some(MetricValue::Integer(87)));
        assert_eq!(back.get("cpu"), Some(MetricValue::Float(45.5)));
    }

    #[test]
    fn test_metric_value_display() {
        assert_eq!(MetricValue::Integer(41_000_000).to_string(), "41000000");
        assert_eq!(MetricValue::Float(45.5).to_string(), "45.5");
        assert_eq!(MetricValue::Float(44.0).to_string(), "44");
    }
}
