// Copyright (C) 2013-2020 Blockstack PBC, a public benefit corporation
// Copyright (C) 2020-2026 Stacks Open Internet Foundation
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use std::fs;
use std::path::PathBuf;

use clarinet_common::util::log::{parse_loglevel, set_loglevel};
use slog::{slog_info, Level};

use crate::errors::ExpectError;

const DEFAULT_COLOR: bool = true;
const DEFAULT_LOG_LEVEL: Level = Level::Info;

#[derive(thiserror::Error, Debug)]
/// An error occurred parsing the provided configuration
pub enum ConfigError {
    /// Error occurred reading config file
    #[error("{0}")]
    InvalidConfig(String),
    /// An error occurred parsing the TOML data
    #[error("{0}")]
    ParseError(String),
    /// A field was malformed
    #[error("identifier={0}, value={1}")]
    BadField(String, String),
}

/// Settings for reporting assertion failures
#[derive(Clone, Debug, PartialEq)]
pub struct ExpectConfig {
    /// Highlight expected (green) and actual (red) text in failure reports
    pub color: bool,
    /// Level applied to the shared logger by [`ExpectConfig::apply`]
    pub log_level: Level,
}

impl Default for ExpectConfig {
    fn default() -> Self {
        ExpectConfig {
            color: DEFAULT_COLOR,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

/// The parsed configuration file
#[derive(Deserialize, Debug, Default)]
struct RawConfigFile {
    pub color: Option<bool>,
    /// One of "trace", "debug", "info", "warn", "error"
    pub log_level: Option<String>,
}

impl RawConfigFile {
    /// load the config from a string
    pub fn load_from_str(data: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(data).map_err(|e| ConfigError::ParseError(format!("{e:?}")))?;
        Ok(config)
    }
}

impl TryFrom<&PathBuf> for RawConfigFile {
    type Error = ConfigError;

    fn try_from(path: &PathBuf) -> Result<Self, Self::Error> {
        Self::load_from_str(&fs::read_to_string(path).map_err(|e| {
            ConfigError::InvalidConfig(format!("failed to read config file: {e:?}"))
        })?)
    }
}

impl TryFrom<RawConfigFile> for ExpectConfig {
    type Error = ConfigError;

    fn try_from(raw_data: RawConfigFile) -> Result<Self, Self::Error> {
        let log_level = match raw_data.log_level {
            Some(name) => parse_loglevel(&name)
                .ok_or_else(|| ConfigError::BadField("log_level".to_string(), name.clone()))?,
            None => DEFAULT_LOG_LEVEL,
        };
        Ok(ExpectConfig {
            color: raw_data.color.unwrap_or(DEFAULT_COLOR),
            log_level,
        })
    }
}

impl TryFrom<&PathBuf> for ExpectConfig {
    type Error = ConfigError;
    fn try_from(path: &PathBuf) -> Result<Self, ConfigError> {
        let config_file = RawConfigFile::try_from(path)?;
        Self::try_from(config_file)
    }
}

impl std::str::FromStr for ExpectConfig {
    type Err = ConfigError;
    fn from_str(data: &str) -> Result<Self, ConfigError> {
        Self::load_from_str(data)
    }
}

impl ExpectConfig {
    /// load the config from a string and parse it
    pub fn load_from_str(data: &str) -> Result<Self, ConfigError> {
        RawConfigFile::load_from_str(data)?.try_into()
    }

    /// load the config from a file and parse it
    pub fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        Self::try_from(&PathBuf::from(path))
    }

    /// Push the configured log level to the shared logger.
    pub fn apply(&self) {
        set_loglevel(self.log_level);
        info!("Applied assertion config"; "color" => self.color, "log_level" => self.log_level.as_str());
    }

    /// Failure text for a test report.
    pub fn render(&self, error: &ExpectError) -> String {
        if self.color {
            error.colorized()
        } else {
            error.to_string()
        }
    }
}
