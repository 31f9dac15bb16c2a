//! Error types for refmine.
//!
//! This module provides the unified error type (`MinerError`) returned by the
//! fallible lookups and aggregate constructors of the core crate.
//!
//! ## Design
//!
//! Detection logic itself is total over well-formed model objects. Errors only
//! arise from caller input that cannot be interpreted:
//! - **Lookups**: unknown display names, descriptions that match no tag
//! - **Aggregates**: empty merge groups, strict package validation
//! - **Call trees**: node indices that do not belong to the tree
//!
//! Structural preconditions that Rust can encode (a call tree always has a
//! root) are made unrepresentable instead of being checked here.

use std::fmt;

use thiserror::Error;

// ============================================================================
// Error Codes
// ============================================================================

/// Error codes for JSON output.
///
/// These codes map to CLI exit codes and appear in JSON error responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OutputErrorCode {
    /// Invalid arguments from caller (bad input, malformed document).
    InvalidArguments = 2,
    /// Lookup errors (unknown type, description matching no pattern).
    ResolutionError = 3,
    /// A report failed validation.
    ValidationFailed = 5,
    /// Internal errors (misuse of aggregates or call trees).
    InternalError = 10,
}

impl OutputErrorCode {
    /// Get the numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for OutputErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// Unified error type for the refactoring-evidence core.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MinerError {
    /// No refactoring type has the given display name (or description prefix).
    #[error("unknown refactoring type: {name}")]
    UnknownRefactoringType { name: String },

    /// A description does not match the validation pattern of its type.
    #[error("description does not match the {refactoring_type} pattern: {description}")]
    PatternMismatch {
        refactoring_type: String,
        description: String,
    },

    /// A requested capture group does not exist in the pattern.
    #[error("pattern for {refactoring_type} has no group {group}")]
    MissingGroup {
        refactoring_type: String,
        group: usize,
    },

    /// A class merge aggregate was built from zero rename diffs.
    #[error("class merge group must contain at least one rename diff")]
    EmptyMergeGroup,

    /// Members of a class merge aggregate disagree on package placement.
    #[error("merge group members disagree on package placement: {first_class} vs {conflicting_class}")]
    PackageDisagreement {
        first_class: String,
        conflicting_class: String,
    },

    /// A call tree node index does not belong to the tree.
    #[error("call tree has no node {index}")]
    InvalidNode { index: usize },

    /// Options document could not be parsed.
    #[error("invalid options: {message}")]
    InvalidOptions { message: String },

    /// Caller input outside the options document could not be used.
    #[error("invalid arguments: {message}")]
    InvalidArguments { message: String },

    /// Records in a report do not match their type's pattern.
    #[error("{count} refactoring record(s) failed validation")]
    ValidationFailed { count: usize },
}

/// Result type for refmine operations.
pub type MinerResult<T> = Result<T, MinerError>;

// ============================================================================
// Convenience Constructors
// ============================================================================

impl MinerError {
    /// Create an unknown refactoring type error.
    pub fn unknown_type(name: impl Into<String>) -> Self {
        MinerError::UnknownRefactoringType { name: name.into() }
    }

    /// Create a pattern mismatch error.
    pub fn pattern_mismatch(
        refactoring_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        MinerError::PatternMismatch {
            refactoring_type: refactoring_type.into(),
            description: description.into(),
        }
    }
}

impl From<&MinerError> for OutputErrorCode {
    fn from(err: &MinerError) -> Self {
        match err {
            MinerError::InvalidOptions { .. } | MinerError::InvalidArguments { .. } => {
                OutputErrorCode::InvalidArguments
            }
            MinerError::UnknownRefactoringType { .. }
            | MinerError::PatternMismatch { .. }
            | MinerError::MissingGroup { .. } => OutputErrorCode::ResolutionError,
            MinerError::ValidationFailed { .. } => OutputErrorCode::ValidationFailed,
            MinerError::EmptyMergeGroup
            | MinerError::PackageDisagreement { .. }
            | MinerError::InvalidNode { .. } => OutputErrorCode::InternalError,
        }
    }
}

impl From<serde_json::Error> for MinerError {
    fn from(err: serde_json::Error) -> Self {
        MinerError::InvalidOptions {
            message: err.to_string(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod display {
        use super::*;

        #[test]
        fn unknown_type_message_names_the_input() {
            let err = MinerError::unknown_type("Teleport Method");
            assert_eq!(err.to_string(), "unknown refactoring type: Teleport Method");
        }

        #[test]
        fn package_disagreement_lists_both_packages() {
            let err = MinerError::PackageDisagreement {
                first_class: "com.a.Foo".to_string(),
                conflicting_class: "com.b.Bar".to_string(),
            };
            let msg = err.to_string();
            assert!(msg.contains("com.a.Foo"));
            assert!(msg.contains("com.b.Bar"));
        }

        #[test]
        fn json_errors_become_invalid_options() {
            let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
            let err = MinerError::from(json_err);
            assert!(matches!(err, MinerError::InvalidOptions { .. }));
        }
    }

    mod codes {
        use super::*;

        #[test]
        fn lookups_are_resolution_errors() {
            let code = OutputErrorCode::from(&MinerError::unknown_type("X"));
            assert_eq!(code, OutputErrorCode::ResolutionError);
            assert_eq!(code.code(), 3);
        }

        #[test]
        fn aggregate_misuse_is_internal() {
            let code = OutputErrorCode::from(&MinerError::EmptyMergeGroup);
            assert_eq!(code.to_string(), "10");
        }

        #[test]
        fn validation_failures_have_their_own_code() {
            let code = OutputErrorCode::from(&MinerError::ValidationFailed { count: 2 });
            assert_eq!(code, OutputErrorCode::ValidationFailed);
        }
    }
}
