// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Configuration layout.
//!
//! Specify the layout of the optional installer configuration file. The
//! configuration file allows the user to point the installer at a different
//! set of bundled tracks, or at a different MRSIM track directory, without
//! passing flags every time.
//!
//! # General Layout
//!
//! ```toml
//! source = "~/games/mrsim-extra/tracks"
//! destination = "$HOME/Documents/MRSIM/Tracks"
//! ```
//!
//! Both keys are optional. Missing keys fall back to the defaults provided by
//! the [`path`](crate::path) module. Values undergo shell expansion when
//! parsed.

use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Error as FmtError, Formatter, Result as FmtResult},
    fs::read_to_string,
    io::ErrorKind,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::debug;

/// Installer configuration layout.
#[derive(Default, Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub struct InstallerConfig {
    /// Directory to read bundled track files from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,

    /// Directory that MRSIM reads track files from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<PathBuf>,
}

impl InstallerConfig {
    /// Load configuration from target file.
    ///
    /// # Errors
    ///
    /// - Return [`ConfigError::Read`] if file cannot be read.
    /// - Return [`ConfigError::Deserialize`] if file contents are invalid.
    /// - Return [`ConfigError::ShellExpansion`] if expansion fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        debug!("load configuration: {:?}", path.as_ref().display());
        read_to_string(path.as_ref())
            .map_err(|error| ConfigError::Read(path.as_ref().to_path_buf(), error))?
            .parse()
    }

    /// Load configuration from target file if it exists.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// - Return [`ConfigError::Read`] if file exists but cannot be read.
    /// - Return [`ConfigError::Deserialize`] if file contents are invalid.
    /// - Return [`ConfigError::ShellExpansion`] if expansion fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        match read_to_string(path.as_ref()) {
            Ok(data) => data.parse(),
            Err(error) if error.kind() == ErrorKind::NotFound => {
                debug!("no configuration at {:?}", path.as_ref().display());
                Ok(Self::default())
            }
            Err(error) => Err(ConfigError::Read(path.as_ref().to_path_buf(), error)),
        }
    }
}

impl FromStr for InstallerConfig {
    type Err = ConfigError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let mut config: InstallerConfig =
            toml::de::from_str(data).map_err(ConfigError::Deserialize)?;

        // INVARIANT: Perform shell expansion on every path field.
        config.source = config.source.map(expand_path).transpose()?;
        config.destination = config.destination.map(expand_path).transpose()?;

        Ok(config)
    }
}

impl Display for InstallerConfig {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        fmt.write_str(
            toml::ser::to_string_pretty(self)
                .map_err(ConfigError::Serialize)?
                .as_str(),
        )
    }
}

fn expand_path(path: PathBuf) -> Result<PathBuf> {
    let expanded = shellexpand::full(path.to_string_lossy().as_ref())
        .map_err(ConfigError::ShellExpansion)?
        .into_owned();
    Ok(PathBuf::from(expanded))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("cannot read configuration file {0:?}")]
    Read(PathBuf, #[source] std::io::Error),

    /// Failed to deserialize configuration.
    #[error(transparent)]
    Deserialize(#[from] toml::de::Error),

    /// Failed to serialize configuration.
    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),

    /// Failed to perform shell expansion on configuration.
    #[error(transparent)]
    ShellExpansion(#[from] shellexpand::LookupError<std::env::VarError>),
}

impl From<ConfigError> for FmtError {
    fn from(_: ConfigError) -> Self {
        FmtError
    }
}

/// Friendly result alias :3
type Result<T, E = ConfigError> = std::result::Result<T, E>;
