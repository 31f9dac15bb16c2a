//! Candidate wrappers and multi-diff aggregates.
//!
//! - [`CandidateExtractClass`]: a tentative Extract Class found while
//!   comparing one class-level diff against an added class. Several diffs can
//!   propose the same added class; [`select_extract_class_candidates`] decides
//!   which proposals survive.
//! - [`ClassMergeDiff`]: several rename hypotheses that share one renamed
//!   class, read together as an N-to-1 merge.
//!
//! Both borrow or share the diffs they wrap and never modify them.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::capability::ClassLevelRefactoring;
use crate::error::{MinerError, MinerResult};
use crate::model::UmlClass;
use crate::options::MergePackagePolicy;
use crate::ranking::{ClassLevelDiff, ClassRenameDiff};
use crate::refactoring::{ExtractClass, MergeClass};

// ============================================================================
// Extract Class Candidates
// ============================================================================

/// A class-level diff paired with the Extract Class it suggests.
#[derive(Debug)]
pub struct CandidateExtractClass<'a, D: ClassLevelDiff> {
    diff: &'a D,
    refactoring: ExtractClass,
}

impl<'a, D: ClassLevelDiff> CandidateExtractClass<'a, D> {
    pub fn new(diff: &'a D, refactoring: ExtractClass) -> Self {
        CandidateExtractClass { diff, refactoring }
    }

    pub fn diff(&self) -> &'a D {
        self.diff
    }

    pub fn refactoring(&self) -> &ExtractClass {
        &self.refactoring
    }

    pub fn into_refactoring(self) -> ExtractClass {
        self.refactoring
    }

    /// True when the extracted class is nested in the diff's original class.
    ///
    /// This is a name test only: `com.foo.Bar.Helper` is nested in
    /// `com.foo.Bar`, `com.foo.BarHelper` is not.
    pub fn is_inner_class_extraction(&self) -> bool {
        let original = &self.diff.original_class().name;
        self.refactoring
            .extracted_class()
            .name
            .strip_prefix(original.as_str())
            .is_some_and(|rest| rest.starts_with('.'))
    }

    /// True when the extracted class extends or implements the original class.
    pub fn is_subclass_extraction(&self) -> bool {
        self.refactoring
            .extracted_class()
            .is_sub_type_of(self.refactoring.original_class())
    }

    /// Stronger candidates first: more extracted members, then class name.
    pub fn compare(&self, other: &Self) -> Ordering {
        other
            .refactoring
            .extracted_member_count()
            .cmp(&self.refactoring.extracted_member_count())
            .then_with(|| {
                self.refactoring
                    .extracted_class()
                    .name
                    .cmp(&other.refactoring.extracted_class().name)
            })
            .then_with(|| self.diff.original_class().name.cmp(&other.diff.original_class().name))
    }
}

/// Decide which candidates for one added class to report.
///
/// Candidates are ranked with [`CandidateExtractClass::compare`]. When the
/// best-ranked candidate extracts an inner class or a subclass of its
/// original, it alone is kept: such a class has exactly one origin. Otherwise
/// every candidate is kept, best first. Lower-ranked inner or subclass
/// candidates do not displace a better plain one.
pub fn select_extract_class_candidates<'a, D: ClassLevelDiff>(
    mut candidates: Vec<CandidateExtractClass<'a, D>>,
) -> Vec<CandidateExtractClass<'a, D>> {
    candidates.sort_by(|a, b| a.compare(b));
    let exclusive = candidates
        .first()
        .is_some_and(|best| best.is_inner_class_extraction() || best.is_subclass_extraction());
    if exclusive {
        candidates.truncate(1);
        if let Some(best) = candidates.first() {
            tracing::debug!(
                extracted = %best.refactoring.extracted_class(),
                original = %best.diff.original_class(),
                inner = best.is_inner_class_extraction(),
                "best extract class candidate is exclusive"
            );
        }
        return candidates;
    }
    tracing::debug!(kept = candidates.len(), "extract class candidates kept");
    candidates
}

// ============================================================================
// Merge Aggregate
// ============================================================================

/// Rename hypotheses that together describe several classes merged into one.
#[derive(Debug, Clone)]
pub struct ClassMergeDiff {
    diffs: Vec<ClassRenameDiff>,
}

impl ClassMergeDiff {
    /// Group `diffs`. An empty group is rejected with `EmptyMergeGroup`.
    pub fn new(diffs: Vec<ClassRenameDiff>) -> MinerResult<Self> {
        if diffs.is_empty() {
            return Err(MinerError::EmptyMergeGroup);
        }
        Ok(ClassMergeDiff { diffs })
    }

    pub fn diffs(&self) -> &[ClassRenameDiff] {
        &self.diffs
    }

    fn first(&self) -> &ClassRenameDiff {
        &self.diffs[0]
    }

    /// The class the group merged into, taken from the first member.
    pub fn new_class(&self) -> &UmlClass {
        self.first().renamed_class()
    }

    /// Package agreement as reported by the first member.
    ///
    /// The other members are not consulted. Groups assembled from unrelated
    /// diffs get an answer that reflects only the first one; use
    /// [`validate_package_agreement`](Self::validate_package_agreement) when
    /// that matters.
    pub fn same_package(&self) -> bool {
        self.first().same_package()
    }

    /// Package agreement checked on every member.
    ///
    /// Returns the common answer, or `PackageDisagreement` naming the first
    /// member whose answer differs from the first member's.
    pub fn validate_package_agreement(&self) -> MinerResult<bool> {
        let first = self.first();
        let expected = first.same_package();
        for diff in &self.diffs[1..] {
            if diff.same_package() != expected {
                tracing::warn!(
                    first = %first.original_class(),
                    conflicting = %diff.original_class(),
                    "merge group disagrees on package"
                );
                return Err(MinerError::PackageDisagreement {
                    first_class: first.original_class().name.clone(),
                    conflicting_class: diff.original_class().name.clone(),
                });
            }
        }
        Ok(expected)
    }

    /// Package agreement under `policy`.
    pub fn same_package_with(&self, policy: MergePackagePolicy) -> MinerResult<bool> {
        match policy {
            MergePackagePolicy::TrustFirst => Ok(self.same_package()),
            MergePackagePolicy::ValidateAll => self.validate_package_agreement(),
        }
    }
}

impl MergeClass {
    /// Merge Class for a merge aggregate: each member's original class merged
    /// into the first member's renamed class.
    pub fn from_merge_diff(merge: &ClassMergeDiff) -> Self {
        let merged = merge
            .diffs
            .iter()
            .map(|diff| Arc::clone(diff.original_class_arc()))
            .collect();
        MergeClass::new(merged, Arc::clone(merge.first().renamed_class_arc()))
    }
}

// ============================================================================
// Tests
// ============================================================================
