// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Report preferences: an optional JSON file overlaid by command-line flags.

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Deserialize;
use thiserror::Error;

/// When to emit ANSI colours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Colour when stdout is a terminal.
    #[default]
    Auto,
    /// Always colour.
    Always,
    /// Never colour.
    Never,
}

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Human-readable sections.
    #[default]
    Text,
    /// Machine-readable JSON document.
    Json,
}

/// Preferences controlling how the report is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportPrefs {
    /// Colour policy for text reports.
    pub color: ColorChoice,
    /// Decimal places for percentages in text reports.
    pub precision: usize,
    /// Output format.
    pub format: Format,
}

impl Default for ReportPrefs {
    fn default() -> Self {
        Self { color: ColorChoice::Auto, precision: 2, format: Format::Text }
    }
}

/// Flag values that override the preferences file when given.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    /// `--color`.
    pub color: Option<ColorChoice>,
    /// `--precision`.
    pub precision: Option<usize>,
    /// `--format`.
    pub format: Option<Format>,
}

impl ReportPrefs {
    /// Applies flag values on top of these preferences.
    pub fn overlay(self, overrides: Overrides) -> Self {
        Self {
            color: overrides.color.unwrap_or(self.color),
            precision: overrides.precision.unwrap_or(self.precision),
            format: overrides.format.unwrap_or(self.format),
        }
    }
}

/// Error type for config operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error while reading the preferences file.
    #[error("cannot read config {}: {source}", .path.display())]
    Io {
        /// Preferences file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The file is not a valid preferences document.
    #[error("invalid config {}: {source}", .path.display())]
    Serde {
        /// Preferences file.
        path: PathBuf,
        /// Deserialization failure.
        source: serde_json::Error,
    },
}

/// Loads preferences from `path`, or the defaults when no path is given.
///
/// An explicitly named file that is missing is an error.
pub fn load(path: Option<&Path>) -> Result<ReportPrefs, ConfigError> {
    let Some(path) = path else {
        return Ok(ReportPrefs::default());
    };
    let bytes = fs::read(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(ReportPrefs::default());
    }
    serde_json::from_slice(&bytes).map_err(|source| ConfigError::Serde {
        path: path.to_path_buf(),
        source,
    })
}
