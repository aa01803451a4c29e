//! Reading sysfs-style virtual files.
//!
//! Every read opens the file, consumes it completely and drops the handle
//! before returning, so callers never observe a half-read sensor.

use crate::error::{NumberError, SensorError};
use crate::model::{Reading, SensorFormat, SensorSource};
use log::debug;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read a file holding one number and return it as `f64`
pub fn read_scalar(path: &Path) -> Result<f64, SensorError> {
    let contents = fs::read_to_string(path).map_err(|e| SensorError::read(path, e))?;
    let raw = contents.trim();

    let value: f64 = raw
        .parse()
        .map_err(|e: std::num::ParseFloatError| SensorError::parse(path, raw, e))?;
    if !value.is_finite() {
        return Err(SensorError::parse(path, raw, NumberError::NotFinite));
    }

    debug!("read {} = {}", path.display(), value);
    Ok(value)
}

/// Read a `KEY=VALUE` block, leaving values unparsed
pub fn read_key_value_block(path: &Path) -> Result<Vec<(String, String)>, SensorError> {
    let file = File::open(path).map_err(|e| SensorError::read(path, e))?;
    let reader = BufReader::new(file);

    let mut pairs = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|e| SensorError::read(path, e))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        // Lines without a separator carry nothing we can use
        if let Some((key, value)) = line.split_once('=') {
            pairs.push((key.to_string(), value.to_string()));
        }
    }

    debug!("read {} pairs from {}", pairs.len(), path.display());
    Ok(pairs)
}

/// Parse a raw value read from `path` as a base-10 integer
pub fn parse_integer(path: &Path, raw: &str) -> Result<i64, SensorError> {
    raw.trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| SensorError::parse(path, raw, e))
}

/// Read a source the way its format describes
///
/// Scalars come back in physical units, key-value blocks as raw pairs.
pub fn read_source(source: &SensorSource) -> Result<Reading, SensorError> {
    match source.format() {
        SensorFormat::Scalar { divisor } => {
            Ok(Reading::Scalar(read_scalar(source.path())? / divisor))
        }
        SensorFormat::KeyValue => Ok(Reading::Block(read_key_value_block(source.path())?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file_with(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_read_scalar_trims_whitespace() {
        let file = file_with("  45000 \n");
        assert_eq!(read_scalar(file.path()).unwrap(), 45000.0);
    }

    #[test]
    fn test_read_scalar_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("temp9_input");

        let err = read_scalar(&path).unwrap_err();
        assert!(err.is_read());
        assert_eq!(err.path(), path.as_path());
    }

    #[test]
    fn test_read_scalar_rejects_garbage() {
        let file = file_with("hot\n");

        let err = read_scalar(file.path()).unwrap_err();
        assert!(err.is_parse());
        assert_eq!(err.raw(), Some("hot"));
    }

    #[test]
    fn test_read_scalar_rejects_empty() {
        let file = file_with("\n");
        assert!(read_scalar(file.path()).unwrap_err().is_parse());
    }

    #[test]
    fn test_read_scalar_rejects_non_finite() {
        let file = file_with("inf\n");

        let err = read_scalar(file.path()).unwrap_err();
        assert!(matches!(
            err,
            SensorError::Parse {
                source: NumberError::NotFinite,
                ..
            }
        ));
    }

    #[test]
    fn test_key_value_block_splits_on_first_separator() {
        let file = file_with("POWER_SUPPLY_NAME=BAT0\nPOWER_SUPPLY_MODEL_NAME=a=b\n");

        let pairs = read_key_value_block(file.path()).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("POWER_SUPPLY_NAME".to_string(), "BAT0".to_string()),
                ("POWER_SUPPLY_MODEL_NAME".to_string(), "a=b".to_string()),
            ]
        );
    }

    #[test]
    fn test_key_value_block_skips_blank_and_unseparated_lines() {
        let file = file_with("\nGARBAGE\nPOWER_SUPPLY_CAPACITY=90\n\n");

        let pairs = read_key_value_block(file.path()).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0, "POWER_SUPPLY_CAPACITY");
    }

    #[test]
    fn test_key_value_block_keeps_bad_values_raw() {
        let file = file_with("POWER_SUPPLY_STATUS=Discharging\n");

        let pairs = read_key_value_block(file.path()).unwrap();
        assert_eq!(pairs[0].1, "Discharging");
    }

    #[test]
    fn test_key_value_block_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_key_value_block(&dir.path().join("uevent")).unwrap_err();
        assert!(err.is_read());
    }

    #[test]
    fn test_parse_integer() {
        let path = Path::new("/sys/class/power_supply/BAT0/uevent");
        assert_eq!(parse_integer(path, "412").unwrap(), 412);

        let err = parse_integer(path, "4.5").unwrap_err();
        assert_eq!(err.raw(), Some("4.5"));
    }

    #[test]
    fn test_read_source_scalar_applies_divisor() {
        let file = file_with("45500\n");
        let source = SensorSource::scalar(file.path(), 1000.0);
        assert_eq!(read_source(&source).unwrap(), Reading::Scalar(45.5));
    }

    #[test]
    fn test_read_source_key_value_returns_pairs() {
        let file = file_with("POWER_SUPPLY_CAPACITY=87\nPOWER_SUPPLY_STATUS=Full\n");
        let source = SensorSource::key_value(file.path());

        let reading = read_source(&source).unwrap();
        assert_eq!(
            reading,
            Reading::Block(vec![
                ("POWER_SUPPLY_CAPACITY".to_string(), "87".to_string()),
                ("POWER_SUPPLY_STATUS".to_string(), "Full".to_string()),
            ])
        );
    }

    #[test]
    fn test_read_source_key_value_is_not_parsed_as_number() {
        // A uevent block read as a scalar would fail to parse
        let file = file_with("POWER_SUPPLY_CAPACITY=87\n");
        assert!(read_scalar(file.path()).unwrap_err().is_parse());

        let source = SensorSource::key_value(file.path());
        assert!(matches!(read_source(&source).unwrap(), Reading::Block(_)));
    }
}
