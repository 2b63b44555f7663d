//! Severity levels and level thresholds.

use logbridge_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log call, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Finest-grained diagnostics.
    Trace,
    /// Debugging detail.
    Debug,
    /// Normal operational messages.
    Info,
    /// Something unexpected that the program recovered from.
    #[serde(alias = "warning")]
    Warn,
    /// A failure the caller should act on.
    Error,
}

impl Level {
    /// Every level, least severe first.
    pub const ALL: [Self; 5] = [Self::Trace, Self::Debug, Self::Info, Self::Warn, Self::Error];

    /// Integer rank used by facades that compare levels numerically.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Trace => 0,
            Self::Debug => 10,
            Self::Info => 20,
            Self::Warn => 30,
            Self::Error => 40,
        }
    }

    /// Lowercase identifier (`"warn"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Uppercase label (`"WARN"`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LevelParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(LevelParseError {
                input: input.to_owned(),
            }),
        }
    }
}

/// Minimum level a logger lets through, or [`LevelFilter::Off`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelFilter {
    /// Everything passes.
    Trace,
    /// `Debug` and above.
    Debug,
    /// `Info` and above.
    #[default]
    Info,
    /// `Warn` and above.
    #[serde(alias = "warning")]
    Warn,
    /// Only `Error`.
    Error,
    /// Nothing passes.
    Off,
}

impl LevelFilter {
    /// Threshold level, `None` for `Off`.
    #[must_use]
    pub const fn threshold(self) -> Option<Level> {
        match self {
            Self::Trace => Some(Level::Trace),
            Self::Debug => Some(Level::Debug),
            Self::Info => Some(Level::Info),
            Self::Warn => Some(Level::Warn),
            Self::Error => Some(Level::Error),
            Self::Off => None,
        }
    }

    /// Returns true when `level` is at or above the threshold.
    #[must_use]
    pub fn allows(self, level: Level) -> bool {
        self.threshold().is_some_and(|threshold| level >= threshold)
    }

    /// Lowercase identifier (`"off"` for `Off`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self.threshold() {
            Some(level) => level.as_str(),
            None => "off",
        }
    }
}

impl From<Level> for LevelFilter {
    fn from(level: Level) -> Self {
        match level {
            Level::Trace => Self::Trace,
            Level::Debug => Self::Debug,
            Level::Info => Self::Info,
            Level::Warn => Self::Warn,
            Level::Error => Self::Error,
        }
    }
}

impl fmt::Display for LevelFilter {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for LevelFilter {
    type Err = LevelParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.trim().eq_ignore_ascii_case("off") {
            return Ok(Self::Off);
        }
        input.parse::<Level>().map(Self::from)
    }
}

/// A level name did not match any known level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelParseError {
    /// Raw input that failed to parse.
    pub input: String,
}

impl fmt::Display for LevelParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "unknown level `{}` (expected trace, debug, info, warn, error, or off)",
            self.input
        )
    }
}

impl std::error::Error for LevelParseError {}

impl From<LevelParseError> for ErrorEnvelope {
    fn from(error: LevelParseError) -> Self {
        let message = error.to_string();
        Self::expected(ErrorCode::new("domain", "invalid_level"), message)
            .with_metadata("input", error.input)
    }
}
