// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Track installation logic.
//!
//! MRSIM loads track definitions from a track directory in the user's
//! documents folder. Track files that ship alongside this installer are
//! copied into that directory so MRSIM can pick them up.
//!
//! # Installation Rules
//!
//! Only top-level entries of the source directory whose name matches `*.xml`
//! are considered. Matching is case-sensitive.
//! A track file is identified by its file name alone. Thus, a track file that
//! already exists in the destination directory is skipped, and is never
//! overwritten, no matter what its contents are.
//!
//! The destination directory belongs to MRSIM. It is never created here. If it
//! does not exist, then MRSIM is most likely not installed.

use glob::{MatchOptions, Pattern};
use std::{
    ffi::{OsStr, OsString},
    fmt::{Display, Formatter, Result as FmtResult},
    fs::{read_dir, File, FileTimes, OpenOptions},
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};
use tracing::{debug, info, instrument, warn};

/// Pattern that bundled track file names must match.
pub const TRACK_PATTERN: &str = "*.xml";

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Result of copying a single track file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Track file was copied to destination.
    Copied,

    /// Track file would have been copied, but nothing was written.
    Planned,

    /// Destination already had a file with the same name.
    AlreadyExists,
}

/// Strategy used to place a track file into the destination directory.
pub trait TrackCopy {
    /// Copy track file at `from` to `to`.
    ///
    /// Implementations must never overwrite an existing file at `to`, and
    /// must report [`CopyOutcome::AlreadyExists`] instead.
    fn copy_track(&self, from: &Path, to: &Path) -> io::Result<CopyOutcome>;
}

/// Copy track files while preserving their metadata.
///
/// The destination file is opened with create-new semantics, so a file that
/// shows up between the existence check and the copy is left alone.
/// Permissions, access time, and modification time are carried over to the
/// copy.
#[derive(Debug, Default, Clone, Copy)]
pub struct PreservingCopy;

impl TrackCopy for PreservingCopy {
    fn copy_track(&self, from: &Path, to: &Path) -> io::Result<CopyOutcome> {
        let mut reader = File::open(from)?;
        let metadata = reader.metadata()?;
        let mut writer = match OpenOptions::new().write(true).create_new(true).open(to) {
            Ok(file) => file,
            Err(error) if error.kind() == ErrorKind::AlreadyExists => {
                return Ok(CopyOutcome::AlreadyExists)
            }
            Err(error) => return Err(error),
        };

        io::copy(&mut reader, &mut writer)?;

        // INVARIANT: Set times before permissions, read-only copies cannot be touched afterwards.
        let mut times = FileTimes::new().set_modified(metadata.modified()?);
        if let Ok(accessed) = metadata.accessed() {
            times = times.set_accessed(accessed);
        }
        writer.set_times(times)?;
        writer.set_permissions(metadata.permissions())?;

        Ok(CopyOutcome::Copied)
    }
}

/// Report track files that would be copied without writing anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRun;

impl TrackCopy for DryRun {
    fn copy_track(&self, _from: &Path, to: &Path) -> io::Result<CopyOutcome> {
        if to.exists() {
            return Ok(CopyOutcome::AlreadyExists);
        }

        Ok(CopyOutcome::Planned)
    }
}

/// Name filter for bundled track files.
#[derive(Debug, Clone)]
pub(crate) struct TrackFilter {
    pattern: Pattern,
}

impl Default for TrackFilter {
    fn default() -> Self {
        Self {
            pattern: Pattern::new(TRACK_PATTERN).expect("track pattern is a valid glob"),
        }
    }
}

impl TrackFilter {
    /// Check if file name matches filter.
    ///
    /// File names that are not valid UTF-8 never match.
    pub(crate) fn matches(&self, name: impl AsRef<OsStr>) -> bool {
        name.as_ref()
            .to_str()
            .is_some_and(|name| self.pattern.matches_with(name, MATCH_OPTIONS))
    }
}

/// Bundled track file that is a candidate for installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackFile {
    path: PathBuf,
    name: OsString,
}

impl TrackFile {
    /// Full path to track file in source directory.
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// File name of track file.
    pub fn name(&self) -> &OsStr {
        self.name.as_os_str()
    }
}

/// Tally of a single installation run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InstallSummary {
    /// Number of track files copied, or planned to be copied.
    pub copied: usize,

    /// Number of track files skipped, because they already exist.
    pub skipped: usize,
}

impl Display for InstallSummary {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        write!(
            fmt,
            "Copied {} file(s), skipped {} file(s)",
            self.copied, self.skipped
        )
    }
}

/// Installer of bundled track files.
///
/// Copies every track file of a source directory into a destination
/// directory, skipping files the destination already has.
#[derive(Debug)]
pub struct TrackInstaller<C = PreservingCopy>
where
    C: TrackCopy,
{
    source: PathBuf,
    destination: PathBuf,
    filter: TrackFilter,
    copier: C,
}

impl TrackInstaller<PreservingCopy> {
    /// Construct new installer that copies track files for real.
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self::with_copier(source, destination, PreservingCopy)
    }
}

impl<C> TrackInstaller<C>
where
    C: TrackCopy,
{
    /// Construct new installer with target copy strategy.
    pub fn with_copier(
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
        copier: C,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            filter: TrackFilter::default(),
            copier,
        }
    }

    /// Directory to read track files from.
    pub fn source(&self) -> &Path {
        self.source.as_path()
    }

    /// Directory to place track files in.
    pub fn destination(&self) -> &Path {
        self.destination.as_path()
    }

    /// Verify that source and destination directories exist.
    ///
    /// Source directory is checked first.
    ///
    /// # Errors
    ///
    /// - Return [`InstallError::MissingSource`] if source directory is absent.
    /// - Return [`InstallError::MissingDestination`] if destination directory
    ///   is absent.
    pub fn check(&self) -> Result<()> {
        if !self.source.exists() {
            return Err(InstallError::MissingSource(self.source.clone()));
        }

        if !self.destination.exists() {
            return Err(InstallError::MissingDestination(self.destination.clone()));
        }

        Ok(())
    }

    /// List track files of source directory.
    ///
    /// Entries are returned in the order the platform lists them. Entries
    /// that are not regular files are ignored even if their name matches.
    ///
    /// # Errors
    ///
    /// - Return [`InstallError::ReadSource`] if source directory cannot be
    ///   listed.
    #[instrument(skip(self), level = "debug")]
    pub fn scan(&self) -> Result<Vec<TrackFile>> {
        let read_error = |error: io::Error| InstallError::ReadSource(self.source.clone(), error);
        let mut tracks = Vec::new();

        for entry in read_dir(&self.source).map_err(read_error)? {
            let entry = entry.map_err(read_error)?;
            let name = entry.file_name();
            if !self.filter.matches(&name) {
                debug!("ignore {:?}", name);
                continue;
            }

            // INVARIANT: Follow symlinks, a link to a track file is a track file.
            let path = entry.path();
            if !path.is_file() {
                debug!("ignore non-file entry {:?}", name);
                continue;
            }

            tracks.push(TrackFile { path, name });
        }

        Ok(tracks)
    }

    /// Install every track file into destination directory.
    ///
    /// Checks both directories, lists track files, then copies them one at a
    /// time. Each action is reported as it happens. Having no track files to
    /// install is not an error.
    ///
    /// # Errors
    ///
    /// - Return [`InstallError::MissingSource`] if source directory is absent.
    /// - Return [`InstallError::MissingDestination`] if destination directory
    ///   is absent.
    /// - Return [`InstallError::ReadSource`] if source directory cannot be
    ///   listed.
    /// - Return [`InstallError::Copy`] if any track file fails to copy. The
    ///   remaining track files are not attempted.
    #[instrument(skip(self), level = "debug")]
    pub fn install(&self) -> Result<InstallSummary> {
        self.check()?;

        let tracks = self.scan()?;
        let mut summary = InstallSummary::default();
        if tracks.is_empty() {
            info!("No XML files found in '{}'", self.source.display());
            return Ok(summary);
        }

        info!("Destination: {}", self.destination.display());
        for track in &tracks {
            let name = track.name().to_string_lossy();
            let target = self.destination.join(track.name());

            if target.exists() {
                info!("  Skipping {name} (already exists)");
                summary.skipped += 1;
                continue;
            }

            let outcome = self
                .copier
                .copy_track(track.path(), &target)
                .map_err(|source| InstallError::Copy {
                    name: track.name().to_os_string(),
                    destination: self.destination.clone(),
                    source,
                })?;

            match outcome {
                CopyOutcome::Copied => {
                    info!("  Copied {name}");
                    summary.copied += 1;
                }
                CopyOutcome::Planned => {
                    info!("  Would copy {name}");
                    summary.copied += 1;
                }
                CopyOutcome::AlreadyExists => {
                    warn!("  Skipping {name} (appeared during install)");
                    summary.skipped += 1;
                }
            }
        }

        info!("Done! {summary}");
        info!("Tracks are now available at: {}", self.destination.display());

        Ok(summary)
    }
}

/// Track installation error types.
#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    /// Source directory of bundled track files does not exist.
    #[error("source folder {0:?} not found")]
    MissingSource(PathBuf),

    /// MRSIM's track directory does not exist.
    #[error(
        "destination folder {0:?} not found, please make sure MRSIM is installed and the \
         Tracks folder exists"
    )]
    MissingDestination(PathBuf),

    /// Source directory cannot be listed.
    #[error("cannot read source folder {0:?}")]
    ReadSource(PathBuf, #[source] io::Error),

    /// Single track file failed to copy.
    #[error("failed to copy {name:?} into {destination:?}")]
    Copy {
        name: OsString,
        destination: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Friendly result alias :3
type Result<T, E = InstallError> = std::result::Result<T, E>;
