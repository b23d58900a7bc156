//! Hygiene: scans the client sources for constructs that may panic, silently
//! swallow errors, or drift from the crate's formatting.
//!
//! Production code under `src/` (sibling `*_test.rs` files excluded) keeps each
//! pattern at its budget. Budgets only ever go down.

use std::fs;
use std::path::Path;

struct Budget {
    pattern: &'static str,
    max: usize,
}

const BUDGETS: &[Budget] = &[
    // Panics.
    Budget { pattern: ".unwrap()", max: 0 },
    Budget { pattern: ".expect(", max: 0 },
    Budget { pattern: "panic!(", max: 0 },
    Budget { pattern: "unreachable!(", max: 0 },
    Budget { pattern: "todo!(", max: 0 },
    // Silent loss.
    Budget { pattern: "let _ =", max: 0 },
    Budget { pattern: ".ok()", max: 0 },
    // Leftovers.
    Budget { pattern: "dbg!(", max: 0 },
    Budget { pattern: "println!(", max: 0 },
    Budget { pattern: "#[allow(dead_code)]", max: 0 },
];

/// Width rustfmt wraps at in this workspace.
const MAX_WIDTH: usize = 120;

fn production_sources(dir: &Path, out: &mut Vec<(String, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            production_sources(&path, out);
            continue;
        }
        let name = path.to_string_lossy().to_string();
        if !name.ends_with(".rs") || name.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push((name, content));
        }
    }
}

fn sources() -> Vec<(String, String)> {
    let mut files = Vec::new();
    production_sources(Path::new("src"), &mut files);
    files
}

#[test]
fn sources_are_found() {
    let files = sources();
    assert!(files.iter().any(|(path, _)| path.ends_with("api.rs")), "no sources under src/");
}

#[test]
fn budgets_hold() {
    let files = sources();
    let mut failures = Vec::new();
    for budget in BUDGETS {
        let found: Vec<(&str, usize)> = files
            .iter()
            .map(|(path, content)| (path.as_str(), content.lines().filter(|l| l.contains(budget.pattern)).count()))
            .filter(|(_, count)| *count > 0)
            .collect();
        let total: usize = found.iter().map(|(_, c)| c).sum();
        if total > budget.max {
            let detail = found.iter().map(|(p, c)| format!("    {p}: {c}")).collect::<Vec<_>>().join("\n");
            failures.push(format!("`{}`: found {total}, max {}\n{detail}", budget.pattern, budget.max));
        }
    }
    assert!(failures.is_empty(), "hygiene budgets exceeded:\n{}", failures.join("\n"));
}

/// An `.await` wrapped onto its own line is only allowed when the joined call
/// would overflow the line width.
#[test]
fn awaits_are_not_wrapped_needlessly() {
    let mut failures = Vec::new();
    for (path, content) in sources() {
        let lines: Vec<&str> = content.lines().collect();
        for (i, line) in lines.iter().enumerate().skip(1) {
            let trimmed = line.trim_start();
            if !trimmed.starts_with(".await") {
                continue;
            }
            let joined = lines[i - 1].trim_end().len() + trimmed.len();
            if joined <= MAX_WIDTH {
                failures.push(format!("    {path}:{}", i + 1));
            }
        }
    }
    assert!(failures.is_empty(), "`.await` wrapped although the call fits:\n{}", failures.join("\n"));
}
