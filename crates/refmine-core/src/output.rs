//! JSON records for detected refactorings.
//!
//! ## Design Principles
//!
//! 1. **Status first:** every report starts with `status`, then `schema_version`
//! 2. **Deterministic:** the same refactorings in the same order produce
//!    identical bytes
//! 3. **Absent means not applicable:** optional fields are skipped, not `null`
//! 4. **Self-describing:** each record carries its type's display name and
//!    canonical description, so consumers can re-validate it with
//!    [`RefactoringType::matches`]

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::capability::Refactoring;
use crate::error::{MinerError, MinerResult, OutputErrorCode};
use crate::refactoring::DetectedRefactoring;
use crate::refactoring_type::RefactoringType;
use crate::types::CodeRange;

/// Current schema version for all reports.
pub const SCHEMA_VERSION: &str = "1";

// ============================================================================
// Records
// ============================================================================

/// One refactoring as serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefactoringRecord {
    /// Display name of the refactoring type.
    #[serde(rename = "type")]
    pub refactoring_type: RefactoringType,
    /// Canonical `<Display>\t<detail>` description.
    pub description: String,
    /// Before-side evidence.
    pub left_side_locations: Vec<CodeRange>,
    /// After-side evidence.
    pub right_side_locations: Vec<CodeRange>,
}

impl RefactoringRecord {
    pub fn from_refactoring(refactoring: &dyn Refactoring) -> Self {
        RefactoringRecord {
            refactoring_type: refactoring.refactoring_type(),
            description: refactoring.description(),
            left_side_locations: refactoring.left_side(),
            right_side_locations: refactoring.right_side(),
        }
    }
}

impl From<&DetectedRefactoring> for RefactoringRecord {
    fn from(refactoring: &DetectedRefactoring) -> Self {
        RefactoringRecord::from_refactoring(refactoring)
    }
}

/// All refactorings found between two snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefactoringReport {
    /// Status: "ok".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// Identifier of the after snapshot, such as a commit id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<String>,
    /// Refactorings in detection order.
    pub refactorings: Vec<RefactoringRecord>,
}

impl RefactoringReport {
    pub fn new(refactorings: &[DetectedRefactoring]) -> Self {
        RefactoringReport {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            snapshot: None,
            refactorings: refactorings.iter().map(RefactoringRecord::from).collect(),
        }
    }

    pub fn with_snapshot(mut self, snapshot: impl Into<String>) -> Self {
        self.snapshot = Some(snapshot.into());
        self
    }

    /// Records whose description no longer matches their type's pattern.
    ///
    /// Empty for any report built from this crate's refactorings; useful on
    /// reports read back from elsewhere.
    pub fn invalid_records(&self) -> Vec<&RefactoringRecord> {
        self.refactorings
            .iter()
            .filter(|r| !r.refactoring_type.matches(&r.description))
            .collect()
    }
}

// ============================================================================
// Catalog and Lookup Responses
// ============================================================================

/// One entry of the type catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeInfo {
    pub name: String,
    pub abbreviation: String,
    /// Full validation pattern, display name included.
    pub pattern: String,
}

impl From<RefactoringType> for TypeInfo {
    fn from(refactoring_type: RefactoringType) -> Self {
        TypeInfo {
            name: refactoring_type.display_name().to_string(),
            abbreviation: refactoring_type.abbreviation(),
            pattern: refactoring_type.regex().as_str().to_string(),
        }
    }
}

/// Response listing every refactoring type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogResponse {
    /// Status: "ok".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    pub types: Vec<TypeInfo>,
}

impl CatalogResponse {
    pub fn new() -> Self {
        CatalogResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            types: RefactoringType::ALL.iter().copied().map(TypeInfo::from).collect(),
        }
    }
}

impl Default for CatalogResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Response classifying a single description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescribeResponse {
    /// Status: "ok".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    #[serde(rename = "type")]
    pub refactoring_type: RefactoringType,
    /// Description with the type's aggregate groups replaced by `*`.
    pub aggregate: String,
}

impl DescribeResponse {
    /// Classify `description` by its longest display-name prefix.
    pub fn from_description(description: &str) -> MinerResult<Self> {
        let refactoring_type = RefactoringType::extract_from_description(description)?;
        let aggregate = refactoring_type.aggregate(description)?;
        Ok(DescribeResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            refactoring_type,
            aggregate,
        })
    }
}

/// Response for a report that passed validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResponse {
    /// Status: "ok".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// Number of records checked.
    pub checked: usize,
}

impl CheckResponse {
    /// Validate every record of `report`.
    ///
    /// Fails with `ValidationFailed` when any description does not match its
    /// type's pattern.
    pub fn validate(report: &RefactoringReport) -> MinerResult<Self> {
        let invalid = report.invalid_records();
        if !invalid.is_empty() {
            for record in &invalid {
                tracing::warn!(
                    refactoring_type = %record.refactoring_type,
                    description = %record.description,
                    "record does not match its pattern"
                );
            }
            return Err(MinerError::ValidationFailed {
                count: invalid.len(),
            });
        }
        Ok(CheckResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            checked: report.refactorings.len(),
        })
    }
}

// ============================================================================
// Error Response
// ============================================================================

/// Error details for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Numeric error code.
    pub code: u8,
    /// Human-readable message.
    pub message: String,
}

impl ErrorInfo {
    pub fn from_error(err: &MinerError) -> Self {
        ErrorInfo {
            code: OutputErrorCode::from(err).code(),
            message: err.to_string(),
        }
    }
}

/// Response for any failed command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Status: "error".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    pub error: ErrorInfo,
}

impl ErrorResponse {
    pub fn from_error(err: &MinerError) -> Self {
        ErrorResponse {
            status: "error".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            error: ErrorInfo::from_error(err),
        }
    }
}

// ============================================================================
// Emitters
// ============================================================================

/// Emit a report as pretty-printed JSON to a writer.
pub fn emit_response<T: Serialize>(response: &T, writer: &mut impl Write) -> io::Result<()> {
    let json = serde_json::to_string_pretty(response)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{}", json)
}

/// Emit a report as compact JSON (single line) to a writer.
pub fn emit_response_compact<T: Serialize>(
    response: &T,
    writer: &mut impl Write,
) -> io::Result<()> {
    let json = serde_json::to_string(response)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{}", json)
}

// ============================================================================
// Tests
// ============================================================================
