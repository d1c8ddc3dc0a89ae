// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Install bundled MRSIM track files.
//!
//! MRSIM expects track definitions to live in `<home>/Documents/MRSIM/Tracks`.
//! This crate copies the XML track files that ship in a `tracks` directory
//! next to the installer into that location, never touching track files that
//! are already there.

pub mod config;
pub mod install;
pub mod path;

pub use config::InstallerConfig;
pub use install::{
    CopyOutcome, DryRun, InstallError, InstallSummary, PreservingCopy, TrackCopy, TrackFile,
    TrackInstaller,
};
