use std::num::{ParseFloatError, ParseIntError};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a sensor value could not be turned into a number
#[derive(Error, Debug)]
pub enum NumberError {
    #[error(transparent)]
    Int(#[from] ParseIntError),

    #[error(transparent)]
    Float(#[from] ParseFloatError),

    #[error("value is not finite")]
    NotFinite,
}

/// Failure reading a single sensor file
#[derive(Error, Debug)]
pub enum SensorError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {raw:?} from {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        raw: String,
        #[source]
        source: NumberError,
    },

    #[error("{} is not a {expected} sensor", path.display())]
    Format {
        path: PathBuf,
        expected: &'static str,
    },
}

impl SensorError {
    pub fn read<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn parse<P: Into<PathBuf>, S: Into<String>, E: Into<NumberError>>(
        path: P,
        raw: S,
        source: E,
    ) -> Self {
        Self::Parse {
            path: path.into(),
            raw: raw.into(),
            source: source.into(),
        }
    }

    pub fn format<P: Into<PathBuf>>(path: P, expected: &'static str) -> Self {
        Self::Format {
            path: path.into(),
            expected,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::Format { path, .. } => path,
        }
    }

    /// Raw text that failed to parse, if this is a parse failure
    pub fn raw(&self) -> Option<&str> {
        match self {
            Self::Parse { raw, .. } => Some(raw),
            Self::Read { .. } | Self::Format { .. } => None,
        }
    }

    pub fn is_read(&self) -> bool {
        matches!(self, Self::Read { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

/// A collection pass aborted in one of its sub-passes
#[derive(Error, Debug)]
pub enum CollectionError {
    #[error("battery: {source}")]
    Battery {
        /// Raw battery key whose value was malformed
        key: Option<String>,
        #[source]
        source: SensorError,
    },

    #[error("temperature:{}: {source}", path.display())]
    Temperature {
        path: PathBuf,
        #[source]
        source: SensorError,
    },
}

impl CollectionError {
    /// Sub-pass label: `battery` or `temperature:<path>`
    pub fn stage(&self) -> String {
        match self {
            Self::Battery { .. } => "battery".to_string(),
            Self::Temperature { path, .. } => format!("temperature:{}", path.display()),
        }
    }

    pub fn path(&self) -> &Path {
        self.sensor_error().path()
    }

    pub fn sensor_error(&self) -> &SensorError {
        match self {
            Self::Battery { source, .. } | Self::Temperature { source, .. } => source,
        }
    }
}

/// Core errors outside of a single collection pass
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Collection failed: {0}")]
    Collection(#[from] CollectionError),

    #[error("System clock error: {0}")]
    Clock(#[from] std::time::SystemTimeError),
}

pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }
}
