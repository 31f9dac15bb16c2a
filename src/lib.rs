//! refmine: refactoring evidence for object-oriented model diffs.
//!
//! Given the pairings a model diff found between two snapshots, refmine
//! decides which refactorings they amount to and reports them as typed,
//! self-validating records.

// Core model - re-exported from refmine-core
pub use refmine_core::call_tree;
pub use refmine_core::candidate;
pub use refmine_core::capability;
pub use refmine_core::error;
pub use refmine_core::grouping;
pub use refmine_core::model;
pub use refmine_core::options;
pub use refmine_core::output;
pub use refmine_core::ranking;
pub use refmine_core::refactoring;
pub use refmine_core::refactoring_type;
pub use refmine_core::types;

pub use refmine_core::{DetectedRefactoring, MinerError, MinerResult, Refactoring, RefactoringType};

// Subscriber setup for binaries and tests
pub mod logging;
