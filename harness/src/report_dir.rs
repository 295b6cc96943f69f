//! Report directory persistence: write/read/verify a `SearchReportV1` on disk.
//!
//! # Directory layout
//!
//! ```text
//! <dir>/
//!   report_manifest.json       canonical JSON, full artifact listing
//!   report_digest_basis.json   canonical JSON, normative projection only
//!   report_digest.txt          ASCII digest string ("sha256:...")
//!   map_snapshot.json          normative
//!   policy_snapshot.json       normative
//!   search_graph.json          normative
//!   path.json                  normative
//!   run_summary.json           normative
//!   rendered_map.txt           observational
//! ```
//!
//! The directory path is never part of any hash surface. The manifest's
//! declared list is the source of truth, and reading is fail-closed: missing
//! declared files, extra undeclared files, and digest mismatches are errors.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use gridwalk_kernel::proof::hash::{canonical_hash, ContentHash};
use tracing::debug;

use crate::report::{
    verify_report, ReportArtifact, ReportVerifyError, SearchReportV1, DOMAIN_REPORT_DIGEST,
    MANIFEST_SCHEMA_VERSION,
};

const MANIFEST_FILENAME: &str = "report_manifest.json";
const DIGEST_BASIS_FILENAME: &str = "report_digest_basis.json";
const DIGEST_FILENAME: &str = "report_digest.txt";

const METADATA_FILENAMES: &[&str] = &[MANIFEST_FILENAME, DIGEST_BASIS_FILENAME, DIGEST_FILENAME];

/// Error writing a report directory.
#[derive(Debug)]
pub enum ReportDirWriteError {
    Io { detail: String },
    /// An artifact name would escape the directory or collide with a
    /// metadata file.
    InvalidArtifactName { name: String },
}

impl std::fmt::Display for ReportDirWriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
            Self::InvalidArtifactName { name } => write!(f, "invalid artifact name: {name}"),
        }
    }
}

impl std::error::Error for ReportDirWriteError {}

/// Error reading a report directory.
#[derive(Debug)]
pub enum ReportDirReadError {
    Io { detail: String },
    MissingMetadata { filename: String },
    MissingArtifact { name: String },
    ExtraFile { name: String },
    ManifestParseError { detail: String },
    ManifestVersionMismatch { found: String },
    ManifestEntryInvalid { detail: String },
    /// `report_digest.txt` does not match the digest recomputed from the
    /// stored digest basis.
    DigestMismatch { stored: String, recomputed: String },
    /// The loaded report failed [`verify_report`].
    Verify(ReportVerifyError),
}

impl std::fmt::Display for ReportDirReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
            Self::MissingMetadata { filename } => {
                write!(f, "missing metadata file: {filename}")
            }
            Self::MissingArtifact { name } => write!(f, "missing artifact: {name}"),
            Self::ExtraFile { name } => write!(f, "undeclared extra file: {name}"),
            Self::ManifestParseError { detail } => {
                write!(f, "manifest parse error: {detail}")
            }
            Self::ManifestVersionMismatch { found } => {
                write!(f, "manifest version mismatch: {found}")
            }
            Self::ManifestEntryInvalid { detail } => {
                write!(f, "manifest entry invalid: {detail}")
            }
            Self::DigestMismatch { stored, recomputed } => {
                write!(f, "digest mismatch: stored={stored}, recomputed={recomputed}")
            }
            Self::Verify(e) => write!(f, "report verification failed: {e}"),
        }
    }
}

impl std::error::Error for ReportDirReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Verify(e) => Some(e),
            _ => None,
        }
    }
}

/// Write a report into `dir`, creating it if needed.
///
/// # Errors
///
/// Returns [`ReportDirWriteError`] on I/O failure or an artifact name that
/// is not a plain file name.
pub fn write_report_dir(report: &SearchReportV1, dir: &Path) -> Result<(), ReportDirWriteError> {
    std::fs::create_dir_all(dir).map_err(|e| ReportDirWriteError::Io {
        detail: format!("create_dir_all: {e}"),
    })?;

    for artifact in report.artifacts.values() {
        if !is_plain_file_name(&artifact.name) || METADATA_FILENAMES.contains(&artifact.name.as_str())
        {
            return Err(ReportDirWriteError::InvalidArtifactName {
                name: artifact.name.clone(),
            });
        }
        write_atomic(&dir.join(&artifact.name), &artifact.content)?;
    }

    write_atomic(&dir.join(MANIFEST_FILENAME), &report.manifest)?;
    write_atomic(&dir.join(DIGEST_BASIS_FILENAME), &report.digest_basis)?;
    write_atomic(&dir.join(DIGEST_FILENAME), report.digest.as_str().as_bytes())?;

    debug!(
        dir = %dir.display(),
        artifacts = report.artifacts.len(),
        digest = report.digest.as_str(),
        "report written"
    );
    Ok(())
}

/// Read a report directory and re-verify it.
///
/// The stored digest is checked against the stored digest basis, then the
/// whole report goes through [`verify_report`], so a tampered artifact is
/// caught even if the metadata files were left alone.
///
/// # Errors
///
/// Returns [`ReportDirReadError`] on any validation failure.
pub fn read_report_dir(dir: &Path) -> Result<SearchReportV1, ReportDirReadError> {
    let manifest_bytes = read_required(dir, MANIFEST_FILENAME)?;
    let digest_basis_bytes = read_required(dir, DIGEST_BASIS_FILENAME)?;
    let digest_bytes = read_required(dir, DIGEST_FILENAME)?;

    let manifest_value: serde_json::Value =
        serde_json::from_slice(&manifest_bytes).map_err(|e| {
            ReportDirReadError::ManifestParseError {
                detail: e.to_string(),
            }
        })?;

    let schema_version = manifest_value["schema_version"].as_str().unwrap_or("");
    if schema_version != MANIFEST_SCHEMA_VERSION {
        return Err(ReportDirReadError::ManifestVersionMismatch {
            found: schema_version.to_string(),
        });
    }

    let entries = manifest_value["artifacts"].as_array().ok_or_else(|| {
        ReportDirReadError::ManifestParseError {
            detail: "\"artifacts\" is not an array".into(),
        }
    })?;

    let mut artifacts = BTreeMap::new();
    for entry in entries {
        let artifact = read_declared_artifact(dir, entry)?;
        artifacts.insert(artifact.name.clone(), artifact);
    }

    for filename in list_files(dir)? {
        if !artifacts.contains_key(&filename) && !METADATA_FILENAMES.contains(&filename.as_str()) {
            return Err(ReportDirReadError::ExtraFile { name: filename });
        }
    }

    let recomputed = canonical_hash(DOMAIN_REPORT_DIGEST, &digest_basis_bytes);
    let stored = String::from_utf8_lossy(&digest_bytes).trim().to_string();
    if recomputed.as_str() != stored {
        return Err(ReportDirReadError::DigestMismatch {
            stored,
            recomputed: recomputed.as_str().to_string(),
        });
    }

    let report = SearchReportV1 {
        artifacts,
        manifest: manifest_bytes,
        digest_basis: digest_basis_bytes,
        digest: recomputed,
    };
    verify_report(&report).map_err(ReportDirReadError::Verify)?;
    Ok(report)
}

fn read_declared_artifact(
    dir: &Path,
    entry: &serde_json::Value,
) -> Result<ReportArtifact, ReportDirReadError> {
    let name = entry["name"]
        .as_str()
        .filter(|n| is_plain_file_name(n))
        .ok_or_else(|| ReportDirReadError::ManifestEntryInvalid {
            detail: "missing or invalid \"name\" field".into(),
        })?
        .to_string();

    let hash_str = entry["content_hash"].as_str().ok_or_else(|| {
        ReportDirReadError::ManifestEntryInvalid {
            detail: format!("missing \"content_hash\" for {name}"),
        }
    })?;
    let content_hash =
        ContentHash::parse(hash_str).ok_or_else(|| ReportDirReadError::ManifestEntryInvalid {
            detail: format!("invalid content_hash for {name}: {hash_str}"),
        })?;

    let normative = entry["normative"].as_bool().ok_or_else(|| {
        ReportDirReadError::ManifestEntryInvalid {
            detail: format!("missing \"normative\" for {name}"),
        }
    })?;

    let content = std::fs::read(dir.join(&name))
        .map_err(|_| ReportDirReadError::MissingArtifact { name: name.clone() })?;

    Ok(ReportArtifact {
        name,
        content,
        content_hash,
        normative,
    })
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\'])
}

/// Write via temp file + rename in the same directory.
fn write_atomic(path: &Path, content: &[u8]) -> Result<(), ReportDirWriteError> {
    let dir = path.parent().ok_or_else(|| ReportDirWriteError::Io {
        detail: "no parent directory".into(),
    })?;
    let temp_path = dir.join(format!(
        ".tmp_{}",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    std::fs::write(&temp_path, content).map_err(|e| ReportDirWriteError::Io {
        detail: format!("write {}: {e}", temp_path.display()),
    })?;
    std::fs::rename(&temp_path, path).map_err(|e| ReportDirWriteError::Io {
        detail: format!("rename {} -> {}: {e}", temp_path.display(), path.display()),
    })
}

fn read_required(dir: &Path, filename: &str) -> Result<Vec<u8>, ReportDirReadError> {
    std::fs::read(dir.join(filename)).map_err(|_| ReportDirReadError::MissingMetadata {
        filename: filename.to_string(),
    })
}

/// Regular files in `dir`, excluding leftover `.tmp_` files.
fn list_files(dir: &Path) -> Result<BTreeSet<String>, ReportDirReadError> {
    let io = |e: std::io::Error| ReportDirReadError::Io {
        detail: e.to_string(),
    };
    let mut files = BTreeSet::new();
    for entry in std::fs::read_dir(dir).map_err(io)? {
        let entry = entry.map_err(io)?;
        if !entry.file_type().map_err(io)?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if !name.starts_with(".tmp_") {
                files.insert(name.to_string());
            }
        }
    }
    Ok(files)
}
