//! Tuning knobs for candidate selection.
//!
//! Options are plain data. They can be built in code with the `with_*`
//! setters or loaded from a JSON document; fields missing from the document
//! keep their defaults.

use serde::{Deserialize, Serialize};

use crate::error::MinerResult;

/// How a merge aggregate answers "do all merged classes share the new
/// class's package?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePackagePolicy {
    /// Ask the first member only. Callers are expected to have grouped
    /// consistent diffs before aggregating.
    #[default]
    TrustFirst,
    /// Check every member and report the first disagreement as an error.
    ValidateAll,
}

/// Options consulted by ranking and candidate selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinerOptions {
    /// If true, class-rename ties on both distances are broken by the renamed
    /// and original class names so results do not depend on input order.
    /// Default: true
    pub deterministic_ties: bool,

    /// Package-agreement policy for merge aggregates.
    /// Default: `TrustFirst`
    pub merge_package_policy: MergePackagePolicy,
}

impl Default for MinerOptions {
    fn default() -> Self {
        Self {
            deterministic_ties: true,
            merge_package_policy: MergePackagePolicy::TrustFirst,
        }
    }
}

impl MinerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deterministic_ties(mut self, deterministic_ties: bool) -> Self {
        self.deterministic_ties = deterministic_ties;
        self
    }

    pub fn with_merge_package_policy(mut self, policy: MergePackagePolicy) -> Self {
        self.merge_package_policy = policy;
        self
    }

    /// Parse options from JSON.
    ///
    /// Returns `MinerError::InvalidOptions` when the document is malformed or
    /// names an unknown policy.
    pub fn from_json(json: &str) -> MinerResult<Self> {
        let options = serde_json::from_str(json)?;
        Ok(options)
    }
}
