use crate::{
    error::{CoreError, Result},
    model::EnergyUnit,
};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_PREFIX: &str = "thinkpad";

const HWMON_DIR: &str = "/sys/devices/platform/coretemp.0/hwmon/hwmon3";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Namespace prepended to every graph and metric name
    pub metric_key_prefix: String,

    /// Sensor file locations
    pub paths: SensorPaths,

    /// Which groups to collect and how to report them
    pub collectors: CollectorOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            metric_key_prefix: DEFAULT_PREFIX.to_string(),
            paths: SensorPaths::default(),
            collectors: CollectorOptions::default(),
        }
    }
}

/// Locations of the battery uevent file and the coretemp inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorPaths {
    pub battery: PathBuf,
    /// Package temperature
    pub cpu: PathBuf,
    /// Per-core temperatures, core0 first
    pub cores: [PathBuf; 4],
}

impl Default for SensorPaths {
    fn default() -> Self {
        let hwmon = Path::new(HWMON_DIR);
        Self {
            battery: PathBuf::from("/sys/class/power_supply/BAT0/uevent"),
            cpu: hwmon.join("temp1_input"),
            cores: [
                hwmon.join("temp2_input"),
                hwmon.join("temp3_input"),
                hwmon.join("temp4_input"),
                hwmon.join("temp5_input"),
            ],
        }
    }
}

impl SensorPaths {
    /// Paths laid out like sysfs under `root`: `power_supply/BAT0/uevent`
    /// and `hwmon/temp1_input` .. `hwmon/temp5_input`
    pub fn under<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        let hwmon = root.join("hwmon");
        Self {
            battery: root.join("power_supply").join("BAT0").join("uevent"),
            cpu: hwmon.join("temp1_input"),
            cores: [
                hwmon.join("temp2_input"),
                hwmon.join("temp3_input"),
                hwmon.join("temp4_input"),
                hwmon.join("temp5_input"),
            ],
        }
    }
}

/// Collector switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorOptions {
    pub battery: bool,
    pub temperature: bool,
    pub energy_unit: EnergyUnit,
}

impl Default for CollectorOptions {
    fn default() -> Self {
        Self {
            battery: true,
            temperature: true,
            energy_unit: EnergyUnit::MicroWattHours,
        }
    }
}

impl Config {
    /// Load configuration from multiple sources in order of preference:
    /// 1. CLI arguments override everything
    /// 2. JSON config file if specified
    /// 3. Default config file locations
    /// 4. Built-in defaults
    ///
    /// Each file only overrides the fields it sets.
    pub fn load(cli_config: Option<&CliConfig>, json_path: Option<&PathBuf>) -> Result<Self> {
        Self::load_layered(&Self::default_config_paths(), cli_config, json_path)
    }

    fn load_layered(
        default_paths: &[PathBuf],
        cli_config: Option<&CliConfig>,
        json_path: Option<&PathBuf>,
    ) -> Result<Self> {
        // Start from built-in defaults
        let mut layered = serde_json::to_value(Self::default())?;

        // First default config file found
        if let Some(defaults) = Self::load_default_config(default_paths) {
            merge_json(&mut layered, defaults);
        }

        // Explicit JSON config file
        if let Some(path) = json_path {
            merge_json(&mut layered, Self::read_json(path)?);
        }

        let mut config: Self = serde_json::from_value(layered)
            .map_err(|e| CoreError::config(format!("Invalid configuration: {}", e)))?;

        // CLI arguments
        if let Some(cli) = cli_config {
            config.apply_cli_overrides(cli);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let value = Self::read_json(path)?;

        serde_json::from_value(value).map_err(|e| {
            CoreError::config(format!("Failed to parse config file {}: {}", path.display(), e))
        })
    }

    fn read_json(path: &Path) -> Result<serde_json::Value> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CoreError::config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let value: serde_json::Value = serde_json::from_str(&contents).map_err(|e| {
            CoreError::config(format!("Failed to parse config file {}: {}", path.display(), e))
        })?;

        if !value.is_object() {
            return Err(CoreError::config(format!(
                "Config file {} must contain a JSON object",
                path.display()
            )));
        }

        debug!("loaded config from {}", path.display());
        Ok(value)
    }

    /// Read the first usable file among the default locations
    fn load_default_config(paths: &[PathBuf]) -> Option<serde_json::Value> {
        for path in paths {
            if path.exists() {
                match Self::read_json(path) {
                    Ok(value) => return Some(value),
                    Err(e) => {
                        warn!("Failed to load config from {}: {}", path.display(), e);
                        continue;
                    }
                }
            }
        }

        None
    }

    /// Get default configuration file search paths
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("tpmon").join("config.json"));
        }

        // Home directory
        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".tpmon.json"));
        }

        // Current directory
        paths.push(PathBuf::from("tpmon.json"));

        paths
    }

    fn apply_cli_overrides(&mut self, cli: &CliConfig) {
        if let Some(prefix) = &cli.metric_key_prefix {
            self.metric_key_prefix = prefix.clone();
        }
        if let Some(unit) = cli.energy_unit {
            self.collectors.energy_unit = unit;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let prefix = &self.metric_key_prefix;
        if prefix.is_empty() {
            return Err(CoreError::config("Metric key prefix must not be empty"));
        }

        if prefix.contains('.') || prefix.chars().any(char::is_whitespace) {
            return Err(CoreError::config(format!(
                "Metric key prefix {:?} must not contain dots or whitespace",
                prefix
            )));
        }

        if !self.collectors.battery && !self.collectors.temperature {
            return Err(CoreError::config("At least one collector must be enabled"));
        }

        Ok(())
    }
}

/// Overlay `overrides` onto `base`; objects merge key by key, anything else replaces
fn merge_json(base: &mut serde_json::Value, overrides: serde_json::Value) {
    match (base, overrides) {
        (serde_json::Value::Object(base), serde_json::Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overrides) => *base = overrides,
    }
}

/// CLI configuration (temporary struct for CLI parsing)
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub metric_key_prefix: Option<String>,
    pub energy_unit: Option<EnergyUnit>,
}
