//! Source hygiene checks, run with the normal test suite.
//!
//! Every library file under `src/` (sibling `_test.rs` files excluded) is
//! scanned for forbidden patterns. Budgets are ceilings; lower them when
//! occurrences are removed, never raise them.

use std::fs;
use std::path::PathBuf;

struct Budget {
    label: &'static str,
    patterns: &'static [&'static str],
    max: usize,
}

/// The engine runs inside a browser tab, where a panic takes the page down.
const PANICS: &[Budget] = &[
    Budget { label: "unwrap", patterns: &[".unwrap()"], max: 0 },
    Budget { label: "expect", patterns: &[".expect("], max: 0 },
    Budget { label: "panic", patterns: &["panic!("], max: 0 },
    Budget { label: "unreachable", patterns: &["unreachable!("], max: 0 },
    Budget { label: "todo", patterns: &["todo!(", "unimplemented!("], max: 0 },
];

/// Errors dropped without being looked at.
const SILENT_LOSS: &[Budget] = &[
    Budget { label: "let _ =", patterns: &["let _ ="], max: 0 },
    Budget { label: ".ok()", patterns: &[".ok()"], max: 0 },
];

/// Diagnostics go through `tracing`.
const OUTPUT: &[Budget] = &[
    Budget { label: "print", patterns: &["println!(", "eprintln!(", "print!("], max: 0 },
    Budget { label: "dbg", patterns: &["dbg!("], max: 0 },
];

const DEAD_CODE: &[Budget] = &[Budget { label: "allow(dead_code)", patterns: &["allow(dead_code)"], max: 0 }];

/// `(path, contents)` for every library source file.
fn library_sources() -> Vec<(PathBuf, String)> {
    let mut pending = vec![PathBuf::from("src")];
    let mut sources = Vec::new();
    while let Some(dir) = pending.pop() {
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };
        for path in entries.flatten().map(|e| e.path()) {
            if path.is_dir() {
                pending.push(path);
            } else if is_library_file(&path) {
                if let Ok(text) = fs::read_to_string(&path) {
                    sources.push((path, text));
                }
            }
        }
    }
    sources.sort_by(|a, b| a.0.cmp(&b.0));
    sources
}

fn is_library_file(path: &std::path::Path) -> bool {
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    name.ends_with(".rs") && !name.ends_with("_test.rs")
}

fn check(budgets: &[Budget]) {
    let sources = library_sources();
    let mut failures = Vec::new();
    for budget in budgets {
        let offenders: Vec<String> = sources
            .iter()
            .flat_map(|(path, text)| {
                text.lines().enumerate().filter_map(move |(n, line)| {
                    budget
                        .patterns
                        .iter()
                        .any(|p| line.contains(p))
                        .then(|| format!("    {}:{}", path.display(), n + 1))
                })
            })
            .collect();
        if offenders.len() > budget.max {
            failures.push(format!(
                "{}: {} found, budget {}\n{}",
                budget.label,
                offenders.len(),
                budget.max,
                offenders.join("\n")
            ));
        }
    }
    assert!(failures.is_empty(), "hygiene budgets exceeded:\n{}", failures.join("\n"));
}

#[test]
fn scan_covers_library_only() {
    let sources = library_sources();
    assert!(sources.iter().any(|(p, _)| p.ends_with("engine.rs")), "engine.rs not found under src/");
    assert!(sources.iter().all(|(p, _)| is_library_file(p)));
}

#[test]
fn no_panicking_calls() {
    check(PANICS);
}

#[test]
fn no_silently_dropped_results() {
    check(SILENT_LOSS);
}

#[test]
fn no_direct_output() {
    check(OUTPUT);
}

#[test]
fn no_dead_code_allowances() {
    check(DEAD_CODE);
}
