//! Build-graph and ownership locks.
//!
//! 1. Crate direction is one-way: kernel ← search ← harness.
//! 2. Outside `cost.rs`, production code in the search crate never assigns
//!    `g_cost`, `h_cost` or `parent_id`.

use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

fn workspace_root() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests/ exists")
        .parent()
        .expect("workspace root exists")
}

fn rust_files(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            rust_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            out.push(path);
        }
    }
}

/// Non-comment lines outside `#[cfg(test)]` blocks, with 1-based numbers.
fn production_lines(content: &str) -> Vec<(usize, &str)> {
    let mut lines = Vec::new();
    let mut brace_depth: usize = 0;
    let mut skip_depth: Option<usize> = None;
    let mut cfg_test_pending = false;

    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.contains("#[cfg(test)]") {
            cfg_test_pending = true;
            continue;
        }

        let opens = line.chars().filter(|&c| c == '{').count();
        let closes = line.chars().filter(|&c| c == '}').count();
        if cfg_test_pending && (opens > 0 || trimmed.ends_with(';')) {
            cfg_test_pending = false;
            if opens > 0 {
                skip_depth = Some(brace_depth);
            } else {
                continue;
            }
        }
        brace_depth = brace_depth.saturating_add(opens).saturating_sub(closes);

        if let Some(depth) = skip_depth {
            if brace_depth <= depth {
                skip_depth = None;
            }
            continue;
        }
        if trimmed.starts_with("//") {
            continue;
        }
        lines.push((i + 1, line));
    }
    lines
}

fn scan(dir: &Path, skip_file: Option<&str>, forbidden: &[&str]) -> Vec<String> {
    let mut files = Vec::new();
    rust_files(dir, &mut files);
    assert!(!files.is_empty(), "no sources under {}", dir.display());

    let mut violations = Vec::new();
    for path in files {
        if skip_file.is_some_and(|s| path.file_name().and_then(|n| n.to_str()) == Some(s)) {
            continue;
        }
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };
        for (line_no, line) in production_lines(&content) {
            if forbidden.iter().any(|p| line.contains(p)) {
                violations.push(format!("  {}:{line_no}: {}", path.display(), line.trim()));
            }
        }
    }
    violations
}

fn assert_clean(what: &str, violations: &[String]) {
    if !violations.is_empty() {
        let mut msg = format!("{what}:\n");
        for v in violations {
            let _ = writeln!(msg, "{v}");
        }
        panic!("{msg}");
    }
}

#[test]
fn kernel_does_not_reference_upper_crates() {
    let violations = scan(
        &workspace_root().join("kernel").join("src"),
        None,
        &["gridwalk_search", "gridwalk_harness"],
    );
    assert_clean("kernel references search/harness", &violations);
}

#[test]
fn search_does_not_reference_harness() {
    let violations = scan(
        &workspace_root().join("search").join("src"),
        None,
        &["gridwalk_harness"],
    );
    assert_clean("search references harness", &violations);
}

#[test]
fn manifests_follow_crate_direction() {
    let read = |krate: &str| {
        fs::read_to_string(workspace_root().join(krate).join("Cargo.toml"))
            .unwrap_or_else(|e| panic!("read {krate}/Cargo.toml: {e}"))
    };
    let kernel = read("kernel");
    assert!(!kernel.contains("gridwalk-search") && !kernel.contains("gridwalk-harness"));
    assert!(!read("search").contains("gridwalk-harness"));
}

#[test]
fn cost_fields_are_written_only_by_cost_module() {
    let violations = scan(
        &workspace_root().join("search").join("src"),
        Some("cost.rs"),
        &[".g_cost =", ".g_cost +=", ".h_cost =", ".parent_id ="],
    );
    assert_clean("cost fields assigned outside cost.rs", &violations);
}
