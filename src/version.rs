//! Release version parsing for labels such as `v1.32 stable`.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"v?(\d+)\.(\d+)").unwrap());

/// Extract the first `major.minor` token from free text.
///
/// `"v1.32"` and `"1.32.1"` both yield `"1.32"`; text without a version
/// yields `None`.
pub fn extract_version(text: &str) -> Option<String> {
    VERSION_PATTERN
        .captures(text)
        .map(|caps| format!("{}.{}", &caps[1], &caps[2]))
}

/// Compare dotted versions segment by segment.
///
/// Missing or non-numeric segments count as zero, so `"1.5"` equals `"1.5.0"`.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let left: Vec<&str> = a.split('.').collect();
    let right: Vec<&str> = b.split('.').collect();

    for i in 0..left.len().max(right.len()) {
        let l = segment(&left, i);
        let r = segment(&right, i);
        match l.cmp(&r) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    Ordering::Equal
}

fn segment(parts: &[&str], index: usize) -> u64 {
    parts
        .get(index)
        .and_then(|p| p.parse().ok())
        .unwrap_or(0)
}
