use crate::output;
use log::{debug, info};
use std::time::{SystemTime, UNIX_EPOCH};
use tpmon_core::{Config, MetricsCollector, Result};

/// One plugin invocation: either print graph definitions or one set of metrics
pub struct Plugin {
    config: Config,
    collector: MetricsCollector,
}

impl Plugin {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let collector = MetricsCollector::from_config(&config);

        Ok(Self { config, collector })
    }

    pub fn prefix(&self) -> &str {
        &self.config.metric_key_prefix
    }

    /// Write meta output when `meta` is set, otherwise collect and write metrics
    pub fn run<W: std::io::Write>(&self, writer: &mut W, meta: bool) -> Result<()> {
        if meta {
            self.write_meta(writer)
        } else {
            let timestamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
            self.write_metrics(writer, timestamp)
        }
    }

    pub fn write_meta<W: std::io::Write>(&self, writer: &mut W) -> Result<()> {
        let definitions = self.collector.definitions();
        debug!("writing {} graph definitions", definitions.len());

        writer.write_all(output::render_meta(self.prefix(), &definitions)?.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    pub fn write_metrics<W: std::io::Write>(&self, writer: &mut W, timestamp: u64) -> Result<()> {
        // Collect before writing anything so a failed pass prints nothing
        let snapshot = self.collector.collect()?;
        info!("collected {} metrics", snapshot.len());

        let definitions = self.collector.definitions();
        let lines = output::render_metrics(self.prefix(), &definitions, &snapshot, timestamp);
        writer.write_all(lines.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}
