use crate::ignore::IgnoreRules;
use crate::scanner::metrics::FileRecord;
use std::path::Path;

/// Extensions that mark a file as transient.
pub const TEMP_EXTENSIONS: &[&str] = &["tmp", "log", "cache", "bak"];

/// Minimum age and unused-duration a file must meet to qualify as a
/// candidate. `None` disables that predicate entirely; it is not equivalent
/// to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Thresholds {
    pub min_unused_hours: Option<f64>,
    pub min_age_days: Option<f64>,
}

/// True iff the file extension marks it transient (case-insensitive).
pub fn has_transient_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .map(|ext| TEMP_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Apply ignore rules and thresholds to scanned files.
///
/// Pure function: identical input yields identical output, in input order.
/// Predicates short-circuit in a fixed order (ignore, extension, unused
/// hours, age days); boundary values pass (`>=`). Accepted records carry
/// display-rounded metrics (hours to 2 decimals, days to 1), so re-filtering
/// the output reproduces it bit-for-bit.
pub fn filter_candidates(
    files: impl IntoIterator<Item = FileRecord>,
    thresholds: &Thresholds,
    ignore: &IgnoreRules,
) -> Vec<FileRecord> {
    files
        .into_iter()
        .filter(|file| !ignore.matches(&file.path))
        .filter(|file| has_transient_extension(&file.path))
        .filter(|file| match thresholds.min_unused_hours {
            Some(min) => file.last_used_hours >= min,
            None => true,
        })
        .filter(|file| match thresholds.min_age_days {
            Some(min) => file.age_days >= min,
            None => true,
        })
        .map(|file| FileRecord {
            last_used_hours: round2(file.last_used_hours),
            age_days: round1(file.age_days),
            ..file
        })
        .collect()
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_extension_detection() {
        assert!(has_transient_extension(Path::new("/tmp/a.tmp")));
        assert!(has_transient_extension(Path::new("/tmp/b.LOG")));
        assert!(has_transient_extension(Path::new("/tmp/c.Cache")));
        assert!(has_transient_extension(Path::new("/tmp/d.bak")));
        assert!(!has_transient_extension(Path::new("/tmp/e.txt")));
        assert!(!has_transient_extension(Path::new("/tmp/no_extension")));
        assert!(!has_transient_extension(Path::new("/tmp/tmp")));
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round2(100.123456), 100.12);
        assert_eq!(round2(0.005), 0.01);
        assert_eq!(round1(10.16), 10.2);
        assert_eq!(round1(0.04), 0.0);
    }
}
