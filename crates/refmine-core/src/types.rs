//! Value types shared across the refactoring catalog.
//!
//! This module contains the two leaf value types that every other module
//! builds on:
//! - [`CodeRange`]: a file span attached to refactorings as evidence
//! - [`RenamePattern`]: an `(original, moved)` path pair used as a grouping key

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// CodeRange Type
// ============================================================================

/// Span of source text in one snapshot.
///
/// Lines and columns are 1-indexed as reported by the model layer. No ordering
/// invariant is enforced; degenerate ranges produced upstream are carried as-is.
///
/// The optional `description` and `code_element` fields label the range when it
/// is reported as part of a refactoring's left or right side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CodeRange {
    /// File path (repository-relative).
    pub file_path: String,
    /// First line of the span.
    pub start_line: u32,
    /// Last line of the span.
    pub end_line: u32,
    /// Column on the first line.
    pub start_column: u32,
    /// Column on the last line.
    pub end_column: u32,
    /// Role of this range in a refactoring (e.g. "original method declaration").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Textual form of the code element the range covers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_element: Option<String>,
}

impl CodeRange {
    /// Create a new unlabeled range.
    pub fn new(
        file_path: impl Into<String>,
        start_line: u32,
        end_line: u32,
        start_column: u32,
        end_column: u32,
    ) -> Self {
        CodeRange {
            file_path: file_path.into(),
            start_line,
            end_line,
            start_column,
            end_column,
            description: None,
            code_element: None,
        }
    }

    /// Return a copy labeled with the given description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Return a copy labeled with the given code element text.
    pub fn with_code_element(mut self, code_element: impl Into<String>) -> Self {
        self.code_element = Some(code_element.into());
        self
    }

    /// Smallest range covering all given ranges.
    ///
    /// The start position is taken from the range with the lowest start line and
    /// the end position from the range with the highest end line. The file path is
    /// taken from the last range. Returns `None` for an empty input.
    pub fn compute_range<'a>(ranges: impl IntoIterator<Item = &'a CodeRange>) -> Option<CodeRange> {
        let mut result: Option<CodeRange> = None;
        for range in ranges {
            match result.as_mut() {
                None => {
                    result = Some(CodeRange::new(
                        range.file_path.clone(),
                        range.start_line,
                        range.end_line,
                        range.start_column,
                        range.end_column,
                    ));
                }
                Some(acc) => {
                    acc.file_path.clone_from(&range.file_path);
                    if range.start_line < acc.start_line {
                        acc.start_line = range.start_line;
                        acc.start_column = range.start_column;
                    }
                    if range.end_line > acc.end_line {
                        acc.end_line = range.end_line;
                        acc.end_column = range.end_column;
                    }
                }
            }
        }
        result
    }

    /// Check whether this range fully contains `other` in the same file.
    pub fn subsumes(&self, other: &CodeRange) -> bool {
        self.file_path == other.file_path
            && (self.start_line, self.start_column) <= (other.start_line, other.start_column)
            && (self.end_line, self.end_column) >= (other.end_line, other.end_column)
    }
}

impl fmt::Display for CodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}-{}:{}",
            self.file_path, self.start_line, self.start_column, self.end_line, self.end_column
        )
    }
}

// ============================================================================
// RenamePattern Type
// ============================================================================

/// An `(original, moved)` path pair.
///
/// Used as the deduplication key when grouping class moves into package
/// renames or source-folder moves: every move that shares a pattern belongs to
/// the same aggregate. Equality and hashing are structural over both paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RenamePattern {
    /// Path (package prefix or folder) before the change.
    pub original_path: String,
    /// Path after the change.
    pub moved_path: String,
}

impl RenamePattern {
    /// Create a pattern from two paths.
    pub fn new(original_path: impl Into<String>, moved_path: impl Into<String>) -> Self {
        RenamePattern {
            original_path: original_path.into(),
            moved_path: moved_path.into(),
        }
    }

    /// Derive the pattern between two qualified names by stripping their longest
    /// common `.`-separated suffix.
    ///
    /// The separator itself is kept on both sides, so `a.b.Foo` moved to
    /// `a.c.Foo` yields `("a.b.", "a.c.")`. Names that share no dotted suffix
    /// produce a pattern over the full names.
    pub fn from_qualified_names(original: &str, moved: &str) -> Self {
        match separator_pos_of_common_suffix(b'.', original, moved) {
            Some(pos) => RenamePattern::new(
                &original[..original.len() - pos],
                &moved[..moved.len() - pos],
            ),
            None => RenamePattern::new(original, moved),
        }
    }

    /// The same pattern with both sides swapped.
    pub fn reverse(&self) -> Self {
        RenamePattern::new(self.moved_path.clone(), self.original_path.clone())
    }

    /// Check whether either side contains the other.
    ///
    /// Moves into a sub-package or out to a parent package have this shape and
    /// are never treated as package renames.
    pub fn is_nested(&self) -> bool {
        self.original_path.contains(&self.moved_path) || self.moved_path.contains(&self.original_path)
    }
}

impl fmt::Display for RenamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.original_path, self.moved_path)
    }
}

/// Distance from the end of the strings to the last separator inside their
/// common suffix, counted in bytes.
fn separator_pos_of_common_suffix(separator: u8, s1: &str, s2: &str) -> Option<usize> {
    let mut pos = None;
    for (i, (c1, c2)) in s1.bytes().rev().zip(s2.bytes().rev()).enumerate() {
        if c1 != c2 {
            break;
        }
        if c1 == separator {
            pos = Some(i);
        }
    }
    pos
}

/// Directory part of a slash-separated path, or the empty string.
pub fn path_prefix(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;
    use std::hash::{Hash, Hasher};

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    mod code_range_tests {
        use super::*;

        #[test]
        fn unlabeled_range_serializes_without_labels() {
            let range = CodeRange::new("src/Foo.java", 10, 20, 5, 6);
            let json = serde_json::to_string(&range).unwrap();
            assert!(!json.contains("description"));
            assert!(!json.contains("code_element"));
            assert!(json.contains("\"start_line\":10"));
        }

        #[test]
        fn labels_are_attached_by_builder() {
            let range = CodeRange::new("src/Foo.java", 1, 2, 1, 2)
                .with_description("original method declaration")
                .with_code_element("public foo() : void");
            assert_eq!(range.description.as_deref(), Some("original method declaration"));
            assert_eq!(range.code_element.as_deref(), Some("public foo() : void"));
        }

        #[test]
        fn degenerate_ranges_are_accepted() {
            let range = CodeRange::new("a.java", 9, 3, 7, 1);
            assert_eq!(range.start_line, 9);
            assert_eq!(range.end_line, 3);
        }

        #[test]
        fn compute_range_covers_all_inputs() {
            let ranges = vec![
                CodeRange::new("a.java", 12, 13, 9, 20),
                CodeRange::new("a.java", 10, 11, 5, 30),
                CodeRange::new("a.java", 14, 18, 9, 2),
            ];
            let covering = CodeRange::compute_range(&ranges).unwrap();
            assert_eq!(covering.start_line, 10);
            assert_eq!(covering.start_column, 5);
            assert_eq!(covering.end_line, 18);
            assert_eq!(covering.end_column, 2);
        }

        #[test]
        fn compute_range_of_nothing_is_none() {
            let ranges: Vec<CodeRange> = Vec::new();
            assert!(CodeRange::compute_range(&ranges).is_none());
        }

        #[test]
        fn subsumes_requires_same_file() {
            let outer = CodeRange::new("a.java", 1, 50, 1, 1);
            let inner = CodeRange::new("a.java", 10, 12, 4, 8);
            let elsewhere = CodeRange::new("b.java", 10, 12, 4, 8);
            assert!(outer.subsumes(&inner));
            assert!(!inner.subsumes(&outer));
            assert!(!outer.subsumes(&elsewhere));
        }

        #[test]
        fn display_is_path_and_positions() {
            let range = CodeRange::new("a.java", 3, 4, 5, 6);
            assert_eq!(range.to_string(), "a.java:3:5-4:6");
        }
    }

    mod rename_pattern_tests {
        use super::*;

        #[test]
        fn equal_paths_are_equal_and_hash_equal() {
            let a = RenamePattern::new("a/A.java", "b/B.java");
            let b = RenamePattern::new("a/A.java", "b/B.java");
            assert_eq!(a, b);
            assert_eq!(hash_of(&a), hash_of(&b));
        }

        #[test]
        fn changing_either_path_breaks_equality() {
            let base = RenamePattern::new("a/A.java", "b/B.java");
            assert_ne!(base, RenamePattern::new("a/X.java", "b/B.java"));
            assert_ne!(base, RenamePattern::new("a/A.java", "b/X.java"));
        }

        #[test]
        fn works_as_set_key() {
            let mut set = HashSet::new();
            set.insert(RenamePattern::new("a.", "b."));
            set.insert(RenamePattern::new("a.", "b."));
            set.insert(RenamePattern::new("a.", "c."));
            assert_eq!(set.len(), 2);
        }

        #[test]
        fn reverse_swaps_sides() {
            let pattern = RenamePattern::new("old", "new");
            assert_eq!(pattern.reverse(), RenamePattern::new("new", "old"));
            assert_eq!(pattern.reverse().reverse(), pattern);
        }

        #[test]
        fn qualified_names_strip_common_suffix() {
            let pattern = RenamePattern::from_qualified_names("org.a.util.Foo", "org.b.util.Foo");
            assert_eq!(pattern, RenamePattern::new("org.a.", "org.b."));
        }

        #[test]
        fn qualified_names_without_common_segment_keep_full_names() {
            let pattern = RenamePattern::from_qualified_names("org.a.Foo", "org.a.Bar");
            assert_eq!(pattern, RenamePattern::new("org.a.Foo", "org.a.Bar"));
        }

        #[test]
        fn nested_patterns_are_detected() {
            assert!(RenamePattern::new("org.a.", "org.a.impl.").is_nested());
            assert!(!RenamePattern::new("org.a.", "org.b.").is_nested());
        }

        #[test]
        fn path_prefix_is_directory_part() {
            assert_eq!(path_prefix("src/main/java/Foo.java"), "src/main/java");
            assert_eq!(path_prefix("Foo.java"), "");
        }
    }
}
