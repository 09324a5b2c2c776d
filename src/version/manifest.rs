//! JSON manifest version editing (package.json, bower.json, ...).
//!
//! Edits are textual so indentation, key order and trailing newlines survive.

use crate::error::{Result, VersionError};
use semver::Version;
use std::path::Path;

/// Replace the string value of the first `"name"` property in `content`.
///
/// Occurrences of `"name"` not followed by `:` are skipped. When the first property
/// found has a non-string value, or there is none, `content` is returned unchanged.
pub fn replace_json_property(content: &str, name: &str, value: &str) -> String {
    let key = format!("\"{}\"", name);
    let property_value = content.match_indices(&key).find_map(|(index, _)| {
        content[index + key.len()..]
            .trim_start()
            .strip_prefix(':')
            .map(str::trim_start)
    });

    let Some(after_colon) = property_value.filter(|rest| rest.starts_with('"')) else {
        return content.to_string();
    };

    let open = content.len() - after_colon.len();
    let Some(close) = content[open + 1..].find('"').map(|i| open + 1 + i) else {
        return content.to_string();
    };

    format!("{}{}{}", &content[..=open], value, &content[close..])
}

/// Replace the `"version"` property value in `content`
pub fn replace_json_version_property(content: &str, value: &str) -> String {
    replace_json_property(content, "version", value)
}

/// Parse the top-level `version` of a JSON manifest
pub fn read_version(content: &str, path: &Path) -> Result<Version> {
    let manifest: serde_json::Value = serde_json::from_str(content)?;
    let raw = manifest
        .get("version")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| VersionError::MissingVersion {
            path: path.to_path_buf(),
        })?;

    Version::parse(raw).map_err(|source| {
        VersionError::ParseFailed {
            version: raw.to_string(),
            source,
        }
        .into()
    })
}

/// Read a manifest file
pub async fn read_file(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path).await.map_err(|e| {
        VersionError::ManifestReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Write a manifest file
pub async fn write_file(path: &Path, content: &str) -> Result<()> {
    tokio::fs::write(path, content).await.map_err(|e| {
        VersionError::ManifestWriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
        .into()
    })
}
