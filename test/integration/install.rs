// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use crate::TrackFixture;

use anyhow::Result;
use mrsim_tracks::{DryRun, InstallError, InstallSummary, TrackInstaller};
use pretty_assertions::assert_eq;
use sealed_test::prelude::*;
use std::fs;

#[sealed_test]
fn install_requires_source() -> Result<()> {
    let fixture = TrackFixture::new()?.with_destination()?;
    let installer = TrackInstaller::new(fixture.source(), fixture.destination());

    let result = installer.install();
    assert!(matches!(result, Err(InstallError::MissingSource(path)) if path == fixture.source()));
    assert!(fixture.destination_listing()?.is_empty());

    Ok(())
}

#[sealed_test]
fn install_requires_destination() -> Result<()> {
    let fixture = TrackFixture::new()?.with_source()?;
    fixture.add_source_file("oval.xml", "<track name=\"oval\"/>")?;
    let installer = TrackInstaller::new(fixture.source(), fixture.destination());

    let result = installer.install();
    assert!(matches!(
        result,
        Err(InstallError::MissingDestination(path)) if path == fixture.destination()
    ));
    // INVARIANT: Destination is never created on behalf of MRSIM.
    assert!(!fixture.destination().exists());

    Ok(())
}

#[sealed_test]
fn install_checks_source_first() -> Result<()> {
    let fixture = TrackFixture::new()?;
    let installer = TrackInstaller::new(fixture.source(), fixture.destination());

    let result = installer.check();
    assert!(matches!(result, Err(InstallError::MissingSource(_))));

    Ok(())
}

#[sealed_test]
fn install_without_tracks() -> Result<()> {
    let fixture = TrackFixture::new()?.with_source()?.with_destination()?;
    fixture.add_source_file("notes.txt", "pit stop at lap 12")?;
    let installer = TrackInstaller::new(fixture.source(), fixture.destination());

    let result = installer.install()?;
    assert_eq!(result, InstallSummary::default());
    assert!(fixture.destination_listing()?.is_empty());

    Ok(())
}

#[sealed_test]
fn install_skips_existing_tracks() -> Result<()> {
    let fixture = TrackFixture::new()?.with_source()?.with_destination()?;
    fixture.add_source_file("a.xml", "<track name=\"a\"/>")?;
    fixture.add_source_file("b.xml", "<track name=\"b\" version=\"2\"/>")?;
    fixture.add_destination_file("b.xml", "<track name=\"b\" version=\"1\"/>")?;
    let installer = TrackInstaller::new(fixture.source(), fixture.destination());

    let result = installer.install()?;
    let expect = InstallSummary {
        copied: 1,
        skipped: 1,
    };
    assert_eq!(result, expect);
    assert_eq!(fixture.read_destination_file("a.xml")?, "<track name=\"a\"/>");
    assert_eq!(
        fixture.read_destination_file("b.xml")?,
        "<track name=\"b\" version=\"1\"/>"
    );

    Ok(())
}

#[sealed_test]
fn install_ignores_other_files() -> Result<()> {
    let fixture = TrackFixture::new()?.with_source()?.with_destination()?;
    fixture.add_source_file("oval.xml", "<track name=\"oval\"/>")?;
    fixture.add_source_file("notes.txt", "pit stop at lap 12")?;
    fixture.add_source_file("LOUD.XML", "<track name=\"loud\"/>")?;
    fixture.add_source_file(".draft.xml", "<track name=\"draft\"/>")?;
    let installer = TrackInstaller::new(fixture.source(), fixture.destination());

    let result = installer.install()?;
    let expect = InstallSummary {
        copied: 2,
        skipped: 0,
    };
    assert_eq!(result, expect);
    assert_eq!(
        fixture.destination_listing()?,
        vec![".draft.xml".to_string(), "oval.xml".to_string()]
    );

    Ok(())
}

#[sealed_test]
fn install_copies_dot_prefixed_tracks() -> Result<()> {
    let fixture = TrackFixture::new()?.with_source()?.with_destination()?;
    fixture.add_source_file(".draft.xml", "<track name=\"draft\"/>")?;
    let installer = TrackInstaller::new(fixture.source(), fixture.destination());

    let result = installer.install()?;
    let expect = InstallSummary {
        copied: 1,
        skipped: 0,
    };
    assert_eq!(result, expect);
    assert_eq!(
        fixture.read_destination_file(".draft.xml")?,
        "<track name=\"draft\"/>"
    );

    Ok(())
}

#[sealed_test]
fn install_twice_is_idempotent() -> Result<()> {
    let fixture = TrackFixture::new()?.with_source()?.with_destination()?;
    fixture.add_source_file("oval.xml", "<track name=\"oval\"/>")?;
    fixture.add_source_file("ring.xml", "<track name=\"ring\"/>")?;
    let installer = TrackInstaller::new(fixture.source(), fixture.destination());

    let first = installer.install()?;
    let listing = fixture.destination_listing()?;
    let contents = fixture.read_destination_file("ring.xml")?;

    let second = installer.install()?;
    assert_eq!(
        first,
        InstallSummary {
            copied: 2,
            skipped: 0
        }
    );
    assert_eq!(
        second,
        InstallSummary {
            copied: 0,
            skipped: 2
        }
    );
    assert_eq!(fixture.destination_listing()?, listing);
    assert_eq!(fixture.read_destination_file("ring.xml")?, contents);

    Ok(())
}

#[sealed_test]
fn install_preserves_modified_time() -> Result<()> {
    let fixture = TrackFixture::new()?.with_source()?.with_destination()?;
    fixture.add_source_file("oval.xml", "<track name=\"oval\"/>")?;

    let source = fixture.source().join("oval.xml");
    let mtime = std::time::SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(1_000_000_000);
    fs::File::options()
        .write(true)
        .open(&source)?
        .set_modified(mtime)?;

    TrackInstaller::new(fixture.source(), fixture.destination()).install()?;

    let copied = fs::metadata(fixture.destination().join("oval.xml"))?.modified()?;
    assert_eq!(copied, mtime);

    Ok(())
}

#[sealed_test]
fn dry_run_copies_nothing() -> Result<()> {
    let fixture = TrackFixture::new()?.with_source()?.with_destination()?;
    fixture.add_source_file("a.xml", "<track name=\"a\"/>")?;
    fixture.add_source_file("b.xml", "<track name=\"b\"/>")?;
    fixture.add_destination_file("b.xml", "<track name=\"b\"/>")?;
    let installer = TrackInstaller::with_copier(fixture.source(), fixture.destination(), DryRun);

    let result = installer.install()?;
    let expect = InstallSummary {
        copied: 1,
        skipped: 1,
    };
    assert_eq!(result, expect);
    assert_eq!(fixture.destination_listing()?, vec!["b.xml".to_string()]);

    Ok(())
}
