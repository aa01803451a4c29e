use clap::{Arg, Command};
use log::debug;
use std::{env, ffi::OsStr, io::stdout, path::PathBuf, process};
use tpmon_core::{config::CliConfig, Config, EnergyUnit};
use tpmon_plugin::Plugin;

/// Set by the agent when it wants graph definitions instead of values
const META_ENV: &str = "MACKEREL_AGENT_PLUGIN_META";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    // Parse command line arguments
    let matches = Command::new("tpmon")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Battery and CPU temperature metrics plugin for ThinkPad laptops")
        .arg(
            Arg::new("metric-key-prefix")
                .long("metric-key-prefix")
                .value_name("PREFIX")
                .help("Metric key prefix (default: thinkpad)"),
        )
        .arg(
            Arg::new("energy-unit")
                .long("energy-unit")
                .value_name("UNIT")
                .help("Report battery energy in µWh or Wh")
                .value_parser(["uwh", "wh"]),
        )
        .arg(
            Arg::new("json-config")
                .long("json-config")
                .value_name("PATH")
                .help("Path to JSON configuration file")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("meta")
                .long("meta")
                .help("Print graph definitions instead of metric values")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    // Build CLI configuration
    let cli_config = CliConfig {
        metric_key_prefix: matches.get_one::<String>("metric-key-prefix").cloned(),
        energy_unit: matches
            .get_one::<String>("energy-unit")
            .map(|unit| energy_unit_arg(unit)),
    };

    // Load configuration
    let json_config_path = matches.get_one::<PathBuf>("json-config");
    let config = Config::load(Some(&cli_config), json_config_path)?;
    debug!("using config {:?}", config);

    let meta = meta_requested(matches.get_flag("meta"), env::var_os(META_ENV).as_deref());

    // Run the plugin once
    let plugin = Plugin::new(config)?;
    let mut stdout = stdout().lock();
    plugin.run(&mut stdout, meta)?;
    Ok(())
}

fn energy_unit_arg(unit: &str) -> EnergyUnit {
    match unit {
        "wh" => EnergyUnit::WattHours,
        _ => EnergyUnit::MicroWattHours,
    }
}

/// `--meta`, or the agent's meta variable set to anything non-empty
fn meta_requested(flag: bool, env_value: Option<&OsStr>) -> bool {
    flag || env_value.is_some_and(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_energy_unit_arg() {
        assert_eq!(energy_unit_arg("wh"), EnergyUnit::WattHours);
        assert_eq!(energy_unit_arg("uwh"), EnergyUnit::MicroWattHours);
    }

    #[test]
    fn test_meta_requested() {
        assert!(!meta_requested(false, None));
        assert!(!meta_requested(false, Some(OsStr::new(""))));
        assert!(meta_requested(false, Some(OsStr::new("1"))));
        assert!(meta_requested(true, None));
        assert!(meta_requested(true, Some(OsStr::new(""))));
    }
}
