// Copyright (C) 2026  ACAI Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading configuration file {}: {source}", .path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file {}: {reason}", .path.display())]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration file not found at path: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("No section [{0}] in any configuration file")]
    UnknownProfile(String),

    #[error("Missing {0} in config")]
    MissingRequired(String),

    #[error("Invalid configuration value for field '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ConfigError {
    /// A present but unusable value
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// A file that is not valid INI
    pub fn parse(path: &Path, reason: impl Into<String>) -> Self {
        ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// A required key that is absent or blank
    pub fn missing(field: impl Into<String>) -> Self {
        ConfigError::MissingRequired(field.into())
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
