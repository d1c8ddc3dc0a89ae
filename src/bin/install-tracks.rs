// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use mrsim_tracks::{
    config::InstallerConfig,
    install::{DryRun, TrackInstaller},
    path::{default_config_file, default_tracks_dest_dir, default_tracks_source_dir},
};

use anyhow::Result;
use clap::Parser;
use std::{path::PathBuf, process::exit};
use tracing::{debug, error};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Copy bundled track files into MRSIM's track directory.
///
/// Track files that MRSIM already has are skipped, never overwritten.
#[derive(Debug, Clone, Parser)]
#[command(about, long_about, version)]
struct Cli {
    /// Directory to copy track files from.
    #[arg(short, long, value_name = "path")]
    pub source: Option<PathBuf>,

    /// MRSIM track directory to copy track files into.
    #[arg(short, long, value_name = "path")]
    pub destination: Option<PathBuf>,

    /// Configuration file to use instead of the default one.
    #[arg(short, long, value_name = "path")]
    pub config: Option<PathBuf>,

    /// Report what would be copied without copying anything.
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

impl Cli {
    fn run(self) -> Result<()> {
        let config = match &self.config {
            Some(path) => InstallerConfig::load(path)?,
            None => InstallerConfig::load_or_default(default_config_file()?)?,
        };

        let source = match self.source.or(config.source) {
            Some(source) => source,
            None => default_tracks_source_dir()?,
        };
        let destination = match self.destination.or(config.destination) {
            Some(destination) => destination,
            None => default_tracks_dest_dir()?,
        };
        let resolved = InstallerConfig {
            source: Some(source.clone()),
            destination: Some(destination.clone()),
        };
        debug!("resolved configuration:\n{resolved}");

        if self.dry_run {
            TrackInstaller::with_copier(source, destination, DryRun).install()?;
        } else {
            TrackInstaller::new(source, destination).install()?;
        }

        Ok(())
    }
}

fn main() {
    let layer = fmt::layer()
        .compact()
        .with_target(false)
        .without_time();
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .init();

    if let Err(error) = run() {
        error!("{error:?}");
        exit(1);
    }

    exit(0)
}

fn run() -> Result<()> {
    Cli::parse().run()
}
