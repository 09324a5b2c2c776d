//! Version management for releases.
//!
//! This module provides semantic version bumping and in-place editing of the
//! `version` property of JSON manifests.

mod bumper;
pub mod manifest;

pub use bumper::VersionBump;

use crate::error::Result;
use semver::Version;
use std::path::Path;

/// Result of rewriting one manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestUpdate {
    /// The version was rewritten
    Updated,
    /// The manifest already carries the requested version
    AlreadyCurrent,
    /// No string `"version"` property to rewrite
    NoVersion,
}

/// Rewrite the version of a single manifest file.
///
/// The file is only written for [`ManifestUpdate::Updated`].
pub async fn update_manifest(
    manifest_path: &Path,
    new_version: &Version,
) -> Result<ManifestUpdate> {
    let content = manifest::read_file(manifest_path).await?;
    let updated = manifest::replace_json_version_property(&content, &new_version.to_string());

    if updated != content {
        manifest::write_file(manifest_path, &updated).await?;
        return Ok(ManifestUpdate::Updated);
    }

    match manifest::read_version(&content, manifest_path) {
        Ok(current) if current == *new_version => Ok(ManifestUpdate::AlreadyCurrent),
        _ => {
            log::debug!("{} left unchanged", manifest_path.display());
            Ok(ManifestUpdate::NoVersion)
        }
    }
}

/// Read the current version from a manifest file
pub async fn current_version(manifest_path: &Path) -> Result<Version> {
    let content = manifest::read_file(manifest_path).await?;
    manifest::read_version(&content, manifest_path)
}
