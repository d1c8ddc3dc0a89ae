// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Path resolution utilities.
//!
//! Determine where track files come from, and where MRSIM expects them to be
//! placed. None of the functions here check if the paths they return actually
//! exist. That is left to the [`TrackInstaller`](crate::install::TrackInstaller).
//!
//! # Destination Layout
//!
//! MRSIM reads track files from `<home>/Documents/MRSIM/Tracks`. The same
//! suffix is used on every platform, so no platform specific document folder
//! lookup is performed. Only the user's home directory is resolved through
//! the host's conventions.

use std::path::{Path, PathBuf};

/// Name of the directory that ships track files alongside the installer.
pub const TRACKS_SOURCE_DIR_NAME: &str = "tracks";

/// Determine absolute path to user's home directory.
///
/// Does not check if the path returned actually exists.
///
/// # Errors
///
/// - Return [`PathError::NoWayHome`] if home directory path cannot be
///   determined.
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or(PathError::NoWayHome)
}

/// Determine default absolute path to MRSIM's track directory.
///
/// Always `<home>/Documents/MRSIM/Tracks`. Does not check if the path returned
/// actually exists.
///
/// # Errors
///
/// - Return [`PathError::NoWayHome`] if home directory path cannot be
///   determined.
pub fn default_tracks_dest_dir() -> Result<PathBuf> {
    home_dir().map(tracks_dest_dir_for)
}

/// Build MRSIM's track directory relative to given home directory.
pub fn tracks_dest_dir_for(home: impl AsRef<Path>) -> PathBuf {
    home.as_ref().join("Documents").join("MRSIM").join("Tracks")
}

/// Determine default absolute path to bundled track files.
///
/// Bundled tracks live in a `tracks` directory that sits next to the
/// directory holding the running executable, e.g., an executable at
/// `<root>/bin/install-tracks` reads from `<root>/tracks`.
///
/// # Errors
///
/// - Return [`PathError::CurrentExe`] if path to running executable cannot be
///   determined.
/// - Return [`PathError::NoParent`] if executable path is too shallow.
pub fn default_tracks_source_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().map_err(PathError::CurrentExe)?;
    tracks_source_dir_for(exe)
}

/// Build bundled track directory relative to given executable path.
///
/// # Errors
///
/// - Return [`PathError::NoParent`] if executable path does not have a
///   grandparent directory.
pub fn tracks_source_dir_for(exe: impl AsRef<Path>) -> Result<PathBuf> {
    exe.as_ref()
        .parent()
        .and_then(Path::parent)
        .map(|root| root.join(TRACKS_SOURCE_DIR_NAME))
        .ok_or_else(|| PathError::NoParent(exe.as_ref().to_path_buf()))
}

/// Determine default absolute path to installer configuration file.
///
/// Uses `$XDG_CONFIG_HOME/mrsim/install-tracks.toml` on Linux, and the
/// platform equivalent elsewhere. Does not check if the path returned actually
/// exists.
///
/// # Errors
///
/// - Return [`PathError::NoWayHome`] if configuration directory cannot be
///   determined.
pub fn default_config_file() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|path| path.join("mrsim").join("install-tracks.toml"))
        .ok_or(PathError::NoWayHome)
}

/// Path resolution error types.
#[derive(Debug, thiserror::Error)]
pub enum PathError {
    /// No way to determine user's home directory.
    ///
    /// # See Also
    ///
    /// - [`dirs::home_dir`](https://docs.rs/dirs/latest/dirs/fn.home_dir.html)
    #[error("cannot determine absolute path to user's home directory")]
    NoWayHome,

    /// Path to running executable cannot be determined.
    #[error("cannot determine path to running executable")]
    CurrentExe(#[source] std::io::Error),

    /// Executable path has no directory above the one holding it.
    #[error("cannot locate bundled tracks relative to {0:?}")]
    NoParent(PathBuf),
}

/// Friendly result alias :3
pub type Result<T, E = PathError> = std::result::Result<T, E>;
