//! Refactoring evidence model for refmine.
//!
//! This crate holds everything between "the model diff found these pairings"
//! and "these refactorings happened":
//! - Structural model value types and the seams to external engines
//! - The refactoring type catalog with description patterns
//! - Capability traits and the concrete refactoring variants
//! - Invocation call trees for extract/inline detection
//! - Ranking of rename hypotheses and extract/merge candidate handling
//! - Grouping of class moves into package and source-folder aggregates
//! - Options, error types and JSON records

pub mod call_tree;
pub mod candidate;
pub mod capability;
pub mod error;
pub mod grouping;
pub mod model;
pub mod options;
pub mod output;
pub mod ranking;
pub mod refactoring;
pub mod refactoring_type;
pub mod types;

pub use capability::Refactoring;
pub use error::{MinerError, MinerResult};
pub use refactoring::DetectedRefactoring;
pub use refactoring_type::RefactoringType;
