//! Hash domain lock tests.
//!
//! Proves:
//! 1. The domain set has the expected size
//! 2. Domain byte strings are unique and null-terminated
//! 3. Domains follow the `GRIDWALK::*::V1\0` convention
//! 4. No raw `GRIDWALK::` byte literals appear in production source outside
//!    `hash_domain.rs`

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use gridwalk_kernel::proof::hash::HashDomain;

#[test]
fn hash_domain_set_count() {
    assert_eq!(
        HashDomain::ALL.len(),
        6,
        "expected 6 domain variants; if you added a domain, update this count"
    );
}

#[test]
fn hash_domain_bytes_unique_and_terminated() {
    let mut seen = BTreeSet::new();
    for domain in HashDomain::ALL {
        assert!(
            seen.insert(domain.as_bytes()),
            "duplicate domain bytes: {domain}"
        );
        assert!(
            domain.as_bytes().ends_with(&[0]),
            "{domain} is not null-terminated"
        );
    }
}

#[test]
fn hash_domain_naming_convention() {
    for domain in HashDomain::ALL {
        let bytes = domain.as_bytes();
        assert!(
            bytes.starts_with(b"GRIDWALK::"),
            "{domain} does not start with GRIDWALK::"
        );
        assert!(bytes.ends_with(b"::V1\0"), "{domain} does not end with ::V1\\0");
    }
}

#[test]
fn no_raw_domain_literals_outside_authority() {
    let production_dirs = [
        concat!(env!("CARGO_MANIFEST_DIR"), "/../../kernel/src"),
        concat!(env!("CARGO_MANIFEST_DIR"), "/../../search/src"),
        concat!(env!("CARGO_MANIFEST_DIR"), "/../../harness/src"),
    ];
    let pattern = "b\"GRIDWALK::";
    let authority_file = "hash_domain.rs";

    let mut scanned = 0;
    let mut violations = Vec::new();
    for dir in production_dirs {
        for path in rust_files(Path::new(dir)) {
            if path.file_name().and_then(|n| n.to_str()) == Some(authority_file) {
                continue;
            }
            let Ok(content) = std::fs::read_to_string(&path) else {
                continue;
            };
            scanned += 1;
            for (i, line) in content.lines().enumerate() {
                let trimmed = line.trim();
                if !trimmed.starts_with("//") && trimmed.contains(pattern) {
                    violations.push(format!("  {}:{}: {trimmed}", path.display(), i + 1));
                }
            }
        }
    }

    assert!(scanned > 0, "no production sources found to scan");
    assert!(
        violations.is_empty(),
        "raw GRIDWALK:: domain literals found outside {authority_file}:\n{}",
        violations.join("\n")
    );
}

fn rust_files(dir: &Path) -> Vec<PathBuf> {
    let mut results = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                results.extend(rust_files(&path));
            } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
                results.push(path);
            }
        }
    }
    results
}
