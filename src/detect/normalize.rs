// src/detect/normalize.rs

/// Reduce requirements text to the form used for comparison.
///
/// Every line is trimmed, blank lines and `#` comment lines are dropped and
/// the rest is sorted and joined with `\n`. Reordering lines or editing
/// comments therefore never changes the result.
///
/// This is line-level only: `Foo == 1.0` and `foo==1.0` stay different.
pub fn normalize(content: &str) -> String {
    let mut lines: Vec<&str> = content
        .split(['\n', '\r'])
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();
    lines.sort_unstable();
    lines.join("\n")
}
