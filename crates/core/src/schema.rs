//! Graph definitions published to the monitoring agent.

use crate::config::CollectorOptions;
use crate::model::{GraphDefinition, GraphUnit, MetricDefinition};
use std::collections::BTreeMap;

pub const BATTERY_CAPACITY: &str = "battery.capacity";
pub const BATTERY_ENERGY: &str = "battery.energy";
pub const BATTERY_CYCLE: &str = "battery.cycle";
pub const CPU_TEMP: &str = "cpu.temp";

/// Graph definitions for every metric group
pub fn definitions() -> BTreeMap<String, GraphDefinition> {
    definitions_for(&CollectorOptions::default())
}

/// Graph definitions for the groups enabled in `options`
pub fn definitions_for(options: &CollectorOptions) -> BTreeMap<String, GraphDefinition> {
    let mut graphs = BTreeMap::new();

    if options.battery {
        graphs.insert(
            BATTERY_CAPACITY.to_string(),
            graph(
                "Battery Capacity",
                GraphUnit::Percentage,
                &[("capacity", "Capacity")],
            ),
        );
        graphs.insert(
            BATTERY_ENERGY.to_string(),
            graph(
                "Battery Energy",
                options.energy_unit.graph_unit(),
                &[
                    ("energy_now", "Now"),
                    ("energy_full", "FCC"),
                    ("energy_design", "Design"),
                ],
            ),
        );
        graphs.insert(
            BATTERY_CYCLE.to_string(),
            graph(
                "Battery Cycle Count",
                GraphUnit::Integer,
                &[("cycle_count", "Cycle")],
            ),
        );
    }

    if options.temperature {
        graphs.insert(
            CPU_TEMP.to_string(),
            graph(
                "CPU Temperature",
                GraphUnit::Float,
                &[
                    ("cpu", "CPU"),
                    ("core0", "Core 0"),
                    ("core1", "Core 1"),
                    ("core2", "Core 2"),
                    ("core3", "Core 3"),
                ],
            ),
        );
    }

    graphs
}

fn graph(label: &str, unit: GraphUnit, metrics: &[(&str, &str)]) -> GraphDefinition {
    GraphDefinition {
        label: label.to_string(),
        unit,
        metrics: metrics
            .iter()
            .map(|(name, label)| MetricDefinition::new(*name, *label))
            .collect(),
    }
}
