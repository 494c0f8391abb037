use std::fs;
use std::path::Path;
use tracing::debug;

/// Case-insensitive substring patterns that exclude paths from candidacy.
///
/// Loaded from a plain-text file, one pattern per line, blank lines skipped.
/// A missing file is a normal, unconfigured state and yields an empty set.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    patterns: Vec<String>,
}

impl IgnoreRules {
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_lines(contents.lines()),
            Err(err) => {
                debug!("no ignore list at {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let patterns = lines
            .into_iter()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_lowercase)
            .collect();
        Self { patterns }
    }

    /// True iff any pattern is a case-insensitive substring of `path`.
    /// Matching is exactly substring, not glob or regex.
    pub fn matches(&self, path: &Path) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        let haystack = path.to_string_lossy().to_lowercase();
        self.patterns.iter().any(|pattern| haystack.contains(pattern))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_yields_empty_set() {
        let rules = IgnoreRules::load(Path::new("/nonexistent/ignore_list.txt"));
        assert!(rules.is_empty());
        assert!(!rules.matches(Path::new("/tmp/anything.tmp")));
    }

    #[test]
    fn test_matching_is_case_insensitive_substring() {
        let rules = IgnoreRules::from_lines(["System32", "  keepme  ", ""]);
        assert_eq!(rules.len(), 2);
        assert!(rules.matches(Path::new("C:/Windows/SYSTEM32/d.tmp")));
        assert!(rules.matches(Path::new("/home/user/KeepMe/scratch.log")));
        assert!(!rules.matches(Path::new("/tmp/plain.tmp")));
    }

    #[test]
    fn test_load_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let list = dir.path().join("ignore_list.txt");
        let mut file = fs::File::create(&list).unwrap();
        writeln!(file, "cache").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  backups  ").unwrap();

        let rules = IgnoreRules::load(&list);
        assert_eq!(rules.len(), 2);
        assert!(rules.matches(Path::new("/home/user/Backups/a.tmp")));
    }
}
