//! In-memory search report: the packaged output of one harness run.
//!
//! No file I/O in this module.
//!
//! # Normative vs observational artifacts
//!
//! Each artifact is tagged `normative` (participates in the report digest)
//! or observational (listed in the manifest but excluded from the digest).
//! `rendered_map.txt` is observational: it is a display of the map, and the
//! information it carries is already bound by `path.json` and
//! `map_snapshot.json`.
//!
//! The report digest is computed over the **digest basis**: a canonical
//! JSON projection of normative artifact hashes only.

use std::collections::BTreeMap;

use gridwalk_kernel::proof::canon::canonical_json_bytes;
use gridwalk_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

/// Domain for per-artifact content hashes.
pub const DOMAIN_REPORT_ARTIFACT: HashDomain = HashDomain::ReportArtifact;

/// Domain for the report digest.
pub const DOMAIN_REPORT_DIGEST: HashDomain = HashDomain::ReportDigest;

pub const MANIFEST_SCHEMA_VERSION: &str = "search_report.v1";
pub const DIGEST_BASIS_SCHEMA_VERSION: &str = "search_report_digest_basis.v1";

/// A single artifact in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifact {
    /// Logical filename (e.g. `"search_graph.json"`).
    pub name: String,
    pub content: Vec<u8>,
    /// `canonical_hash(DOMAIN_REPORT_ARTIFACT, content)`.
    pub content_hash: ContentHash,
    pub normative: bool,
}

/// The complete report from a harness run.
#[derive(Debug, Clone)]
pub struct SearchReportV1 {
    /// Artifacts by logical name, sorted.
    pub artifacts: BTreeMap<String, ReportArtifact>,
    /// Canonical JSON listing all artifacts with normative flags.
    pub manifest: Vec<u8>,
    /// Canonical JSON listing normative artifact hashes only.
    pub digest_basis: Vec<u8>,
    /// `canonical_hash(DOMAIN_REPORT_DIGEST, digest_basis)`.
    pub digest: ContentHash,
}

impl SearchReportV1 {
    #[must_use]
    pub fn artifact(&self, name: &str) -> Option<&ReportArtifact> {
        self.artifacts.get(name)
    }
}

/// Error building a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportBuildError {
    CanonError { detail: String },
    /// Two inputs share a name.
    DuplicateArtifact { name: String },
}

impl std::fmt::Display for ReportBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CanonError { detail } => write!(f, "canonical JSON error: {detail}"),
            Self::DuplicateArtifact { name } => write!(f, "duplicate artifact: {name}"),
        }
    }
}

impl std::error::Error for ReportBuildError {}

/// Assemble a report from `(name, content, normative)` triples.
///
/// # Errors
///
/// Returns [`ReportBuildError`] if a name repeats or canonical JSON
/// serialization fails.
pub fn build_report(
    artifacts: Vec<(String, Vec<u8>, bool)>,
) -> Result<SearchReportV1, ReportBuildError> {
    let mut artifact_map = BTreeMap::new();

    for (name, content, normative) in artifacts {
        if artifact_map.contains_key(&name) {
            return Err(ReportBuildError::DuplicateArtifact { name });
        }
        let content_hash = canonical_hash(DOMAIN_REPORT_ARTIFACT, &content);
        artifact_map.insert(
            name.clone(),
            ReportArtifact {
                name,
                content,
                content_hash,
                normative,
            },
        );
    }

    let manifest = compute_manifest_bytes(&artifact_map)
        .map_err(|detail| ReportBuildError::CanonError { detail })?;
    let digest_basis = compute_digest_basis_bytes(&artifact_map)
        .map_err(|detail| ReportBuildError::CanonError { detail })?;
    let digest = canonical_hash(DOMAIN_REPORT_DIGEST, &digest_basis);

    Ok(SearchReportV1 {
        artifacts: artifact_map,
        manifest,
        digest_basis,
        digest,
    })
}

/// Error from report integrity verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportVerifyError {
    ContentHashMismatch {
        artifact: String,
        expected: String,
        actual: String,
    },
    ManifestMismatch,
    DigestBasisMismatch,
    DigestMismatch { expected: String, actual: String },
    /// A normative `.json` artifact is not in canonical form.
    ArtifactNotCanonical { artifact: String },
    /// `run_summary.json` declares a digest that does not match the artifact
    /// it names.
    SummaryBindingMismatch {
        field: String,
        declared: String,
        recomputed: String,
    },
    CanonError { detail: String },
}

impl std::fmt::Display for ReportVerifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ContentHashMismatch {
                artifact,
                expected,
                actual,
            } => write!(
                f,
                "content hash mismatch for {artifact}: expected {expected}, got {actual}"
            ),
            Self::ManifestMismatch => write!(f, "manifest does not match artifacts"),
            Self::DigestBasisMismatch => write!(f, "digest basis does not match artifacts"),
            Self::DigestMismatch { expected, actual } => {
                write!(f, "digest mismatch: expected {expected}, got {actual}")
            }
            Self::ArtifactNotCanonical { artifact } => {
                write!(f, "artifact {artifact} is not canonical JSON")
            }
            Self::SummaryBindingMismatch {
                field,
                declared,
                recomputed,
            } => write!(
                f,
                "run summary {field} declares {declared}, recomputed {recomputed}"
            ),
            Self::CanonError { detail } => write!(f, "canonical JSON error: {detail}"),
        }
    }
}

impl std::error::Error for ReportVerifyError {}

/// Summary fields that bind another artifact under its own hash domain.
pub const SUMMARY_BINDINGS: &[(&str, &str, HashDomain)] = &[
    (
        "search_graph_digest",
        "search_graph.json",
        HashDomain::SearchGraph,
    ),
    ("path_digest", "path.json", HashDomain::SearchPath),
    (
        "map_snapshot_digest",
        "map_snapshot.json",
        HashDomain::MapSnapshot,
    ),
    (
        "policy_digest",
        "policy_snapshot.json",
        HashDomain::PolicySnapshot,
    ),
];

/// Verify the internal consistency of a report.
///
/// Pure integrity check. It proves:
///
/// 1. Each artifact's `content_hash` matches its content.
/// 2. `manifest` and `digest_basis` match the projections recomputed from
///    the artifacts.
/// 3. `digest` matches `canonical_hash(DOMAIN_REPORT_DIGEST, digest_basis)`.
/// 4. Normative `.json` artifacts are canonical.
/// 5. If `run_summary.json` is present, each digest it declares matches the
///    named artifact hashed under that artifact's own domain.
///
/// # Errors
///
/// Returns the first [`ReportVerifyError`] encountered.
pub fn verify_report(report: &SearchReportV1) -> Result<(), ReportVerifyError> {
    for artifact in report.artifacts.values() {
        let recomputed = canonical_hash(DOMAIN_REPORT_ARTIFACT, &artifact.content);
        if recomputed != artifact.content_hash {
            return Err(ReportVerifyError::ContentHashMismatch {
                artifact: artifact.name.clone(),
                expected: artifact.content_hash.as_str().to_string(),
                actual: recomputed.as_str().to_string(),
            });
        }
    }

    let manifest = compute_manifest_bytes(&report.artifacts)
        .map_err(|detail| ReportVerifyError::CanonError { detail })?;
    if manifest != report.manifest {
        return Err(ReportVerifyError::ManifestMismatch);
    }

    let digest_basis = compute_digest_basis_bytes(&report.artifacts)
        .map_err(|detail| ReportVerifyError::CanonError { detail })?;
    if digest_basis != report.digest_basis {
        return Err(ReportVerifyError::DigestBasisMismatch);
    }

    let digest = canonical_hash(DOMAIN_REPORT_DIGEST, &report.digest_basis);
    if digest != report.digest {
        return Err(ReportVerifyError::DigestMismatch {
            expected: report.digest.as_str().to_string(),
            actual: digest.as_str().to_string(),
        });
    }

    for artifact in report.artifacts.values() {
        if artifact.normative
            && std::path::Path::new(&artifact.name)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
            && !is_canonical_json(&artifact.content)
        {
            return Err(ReportVerifyError::ArtifactNotCanonical {
                artifact: artifact.name.clone(),
            });
        }
    }

    verify_summary_bindings(report)
}

fn verify_summary_bindings(report: &SearchReportV1) -> Result<(), ReportVerifyError> {
    let Some(summary) = report.artifact("run_summary.json") else {
        return Ok(());
    };
    let summary: serde_json::Value = serde_json::from_slice(&summary.content).map_err(|e| {
        ReportVerifyError::CanonError {
            detail: format!("run_summary.json: {e}"),
        }
    })?;

    for &(field, artifact_name, domain) in SUMMARY_BINDINGS {
        let Some(declared) = summary[field].as_str() else {
            continue;
        };
        let recomputed = report.artifact(artifact_name).map_or_else(
            || "<missing>".to_string(),
            |a| canonical_hash(domain, &a.content).as_str().to_string(),
        );
        if declared != recomputed {
            return Err(ReportVerifyError::SummaryBindingMismatch {
                field: field.to_string(),
                declared: declared.to_string(),
                recomputed,
            });
        }
    }
    Ok(())
}

fn compute_manifest_bytes(
    artifacts: &BTreeMap<String, ReportArtifact>,
) -> Result<Vec<u8>, String> {
    let manifest_artifacts: Vec<serde_json::Value> = artifacts
        .values()
        .map(|a| {
            serde_json::json!({
                "content_hash": a.content_hash.as_str(),
                "name": a.name,
                "normative": a.normative,
            })
        })
        .collect();

    let manifest_value = serde_json::json!({
        "artifacts": manifest_artifacts,
        "schema_version": MANIFEST_SCHEMA_VERSION,
    });

    canonical_json_bytes(&manifest_value).map_err(|e| e.to_string())
}

fn compute_digest_basis_bytes(
    artifacts: &BTreeMap<String, ReportArtifact>,
) -> Result<Vec<u8>, String> {
    let normative_artifacts: Vec<serde_json::Value> = artifacts
        .values()
        .filter(|a| a.normative)
        .map(|a| {
            serde_json::json!({
                "content_hash": a.content_hash.as_str(),
                "name": a.name,
            })
        })
        .collect();

    let digest_basis_value = serde_json::json!({
        "artifacts": normative_artifacts,
        "schema_version": DIGEST_BASIS_SCHEMA_VERSION,
    });

    canonical_json_bytes(&digest_basis_value).map_err(|e| e.to_string())
}

/// Parse, re-canonicalize, compare.
fn is_canonical_json(bytes: &[u8]) -> bool {
    serde_json::from_slice::<serde_json::Value>(bytes)
        .ok()
        .and_then(|value| canonical_json_bytes(&value).ok())
        .is_some_and(|recanonized| recanonized == bytes)
}
