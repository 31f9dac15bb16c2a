//! Ranking of competing class-rename hypotheses.
//!
//! A removed class often matches several added classes well enough to be a
//! rename. The hypotheses are ordered by how far the renamed class drifted:
//! first by normalized name distance, then by normalized package distance.
//! The best hypothesis is the minimum under that order.
//!
//! Distances are computed once, when a [`ClassRenameDiff`] is built, through
//! the [`ClassDistance`] seam. Comparison never calls back into the metric.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::model::{ClassDistance, UmlClass};
use crate::options::MinerOptions;

// ============================================================================
// Diff Types
// ============================================================================

/// A pairing of a before-side class with an after-side class.
///
/// Implemented by every class-level diff the candidate wrappers accept.
pub trait ClassLevelDiff {
    fn original_class(&self) -> &UmlClass;
    fn next_class(&self) -> &UmlClass;

    /// Whether both classes live in the same package.
    fn same_package(&self) -> bool {
        self.original_class().package_name == self.next_class().package_name
    }
}

/// Member overlap between two classes, as reported by the class matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchResult {
    pub matched_operations: usize,
    pub matched_attributes: usize,
    pub total_operations: usize,
    pub total_attributes: usize,
    /// Both files start with the same package declaration.
    pub identical_package_header: bool,
    /// The matcher accepted the pairing.
    pub is_match: bool,
}

impl MatchResult {
    pub fn new(
        matched_operations: usize,
        matched_attributes: usize,
        total_operations: usize,
        total_attributes: usize,
    ) -> Self {
        MatchResult {
            matched_operations,
            matched_attributes,
            total_operations,
            total_attributes,
            identical_package_header: false,
            is_match: false,
        }
    }

    pub fn with_identical_package_header(mut self, identical: bool) -> Self {
        self.identical_package_header = identical;
        self
    }

    pub fn accepted(mut self) -> Self {
        self.is_match = true;
        self
    }

    /// Matched members of either kind.
    pub fn matched_members(&self) -> usize {
        self.matched_operations + self.matched_attributes
    }
}

/// One hypothesis that `original_class` was renamed to `renamed_class`.
#[derive(Debug, Clone)]
pub struct ClassRenameDiff {
    original_class: Arc<UmlClass>,
    renamed_class: Arc<UmlClass>,
    match_result: MatchResult,
    name_distance: f64,
    package_distance: f64,
}

impl ClassRenameDiff {
    /// Build a hypothesis, capturing both distances from `distance`.
    pub fn new(
        original_class: Arc<UmlClass>,
        renamed_class: Arc<UmlClass>,
        match_result: MatchResult,
        distance: &dyn ClassDistance,
    ) -> Self {
        let name_distance = distance.normalized_name_distance(&original_class, &renamed_class);
        let package_distance = distance.normalized_package_distance(&original_class, &renamed_class);
        ClassRenameDiff {
            original_class,
            renamed_class,
            match_result,
            name_distance,
            package_distance,
        }
    }

    pub fn renamed_class(&self) -> &UmlClass {
        &self.renamed_class
    }

    pub fn match_result(&self) -> &MatchResult {
        &self.match_result
    }

    pub fn name_distance(&self) -> f64 {
        self.name_distance
    }

    pub fn package_distance(&self) -> f64 {
        self.package_distance
    }

    pub(crate) fn original_class_arc(&self) -> &Arc<UmlClass> {
        &self.original_class
    }

    pub(crate) fn renamed_class_arc(&self) -> &Arc<UmlClass> {
        &self.renamed_class
    }
}

impl ClassLevelDiff for ClassRenameDiff {
    fn original_class(&self) -> &UmlClass {
        &self.original_class
    }

    fn next_class(&self) -> &UmlClass {
        &self.renamed_class
    }
}

// ============================================================================
// Comparators
// ============================================================================

/// Order by name distance, then package distance. Exact ties are `Equal`.
pub fn compare_class_renames(a: &ClassRenameDiff, b: &ClassRenameDiff) -> Ordering {
    a.name_distance
        .total_cmp(&b.name_distance)
        .then_with(|| a.package_distance.total_cmp(&b.package_distance))
}

/// [`compare_class_renames`], with exact ties broken by renamed class name
/// and then original class name.
pub fn compare_class_renames_deterministic(a: &ClassRenameDiff, b: &ClassRenameDiff) -> Ordering {
    compare_class_renames(a, b)
        .then_with(|| a.renamed_class.name.cmp(&b.renamed_class.name))
        .then_with(|| a.original_class.name.cmp(&b.original_class.name))
}

fn comparator(options: &MinerOptions) -> fn(&ClassRenameDiff, &ClassRenameDiff) -> Ordering {
    if options.deterministic_ties {
        compare_class_renames_deterministic
    } else {
        compare_class_renames
    }
}

/// Sort hypotheses best first.
pub fn sort_class_renames(candidates: &mut [ClassRenameDiff], options: &MinerOptions) {
    candidates.sort_by(comparator(options));
}

/// The best hypothesis, or `None` when there are none.
///
/// Without deterministic ties, the earliest of several equal minima wins.
pub fn best_class_rename<'a>(
    candidates: &'a [ClassRenameDiff],
    options: &MinerOptions,
) -> Option<&'a ClassRenameDiff> {
    let best = candidates.iter().min_by(|a, b| comparator(options)(a, b))?;
    tracing::debug!(
        original = %best.original_class,
        renamed = %best.renamed_class,
        name_distance = best.name_distance,
        package_distance = best.package_distance,
        candidates = candidates.len(),
        "selected class rename"
    );
    Some(best)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Distances looked up by renamed class simple name.
    struct Fixed(Vec<(&'static str, f64, f64)>);

    impl Fixed {
        fn lookup(&self, renamed: &UmlClass) -> (f64, f64) {
            self.0
                .iter()
                .find(|(name, _, _)| *name == renamed.non_qualified_name())
                .map(|(_, n, p)| (*n, *p))
                .unwrap_or((1.0, 1.0))
        }
    }

    impl ClassDistance for Fixed {
        fn normalized_name_distance(&self, _: &UmlClass, renamed: &UmlClass) -> f64 {
            self.lookup(renamed).0
        }

        fn normalized_package_distance(&self, _: &UmlClass, renamed: &UmlClass) -> f64 {
            self.lookup(renamed).1
        }
    }

    fn diff(distance: &Fixed, pkg: &str, renamed: &str) -> ClassRenameDiff {
        ClassRenameDiff::new(
            Arc::new(UmlClass::new("a", "Old", "a/Old.java")),
            Arc::new(UmlClass::new(pkg, renamed, &format!("{}.java", renamed))),
            MatchResult::new(3, 1, 4, 2).accepted(),
            distance,
        )
    }

    mod comparator {
        use super::*;

        #[test]
        fn package_distance_breaks_name_tie() {
            let d = Fixed(vec![("X", 0.2, 0.9), ("Y", 0.2, 0.1)]);
            let x = diff(&d, "a", "X");
            let y = diff(&d, "a", "Y");
            assert_eq!(compare_class_renames(&y, &x), Ordering::Less);
            assert_eq!(compare_class_renames(&x, &y), Ordering::Greater);
        }

        #[test]
        fn name_distance_dominates() {
            let d = Fixed(vec![("X", 0.1, 1.0), ("Y", 0.3, 0.0)]);
            let x = diff(&d, "a", "X");
            let y = diff(&d, "a", "Y");
            assert_eq!(compare_class_renames(&x, &y), Ordering::Less);
        }

        #[test]
        fn exact_tie_is_equal_unless_deterministic() {
            let d = Fixed(vec![("X", 0.5, 0.5), ("Y", 0.5, 0.5)]);
            let x = diff(&d, "a", "X");
            let y = diff(&d, "a", "Y");
            assert_eq!(compare_class_renames(&x, &y), Ordering::Equal);
            assert_eq!(compare_class_renames_deterministic(&x, &y), Ordering::Less);
            assert_eq!(compare_class_renames_deterministic(&y, &x), Ordering::Greater);
        }
    }

    mod selection {
        use super::*;

        #[test]
        fn best_is_minimum() {
            let d = Fixed(vec![("X", 0.4, 0.0), ("Y", 0.2, 0.9), ("Z", 0.2, 0.1)]);
            let candidates = vec![diff(&d, "a", "X"), diff(&d, "a", "Y"), diff(&d, "b", "Z")];
            let best = best_class_rename(&candidates, &MinerOptions::default()).unwrap();
            assert_eq!(best.renamed_class().name, "b.Z");
            assert!(!best.same_package());
        }

        #[test]
        fn tie_follows_input_order_without_determinism() {
            let d = Fixed(vec![("X", 0.5, 0.5), ("Y", 0.5, 0.5)]);
            let candidates = vec![diff(&d, "a", "Y"), diff(&d, "a", "X")];
            let loose = MinerOptions::default().with_deterministic_ties(false);
            assert_eq!(best_class_rename(&candidates, &loose).unwrap().renamed_class().name, "a.Y");
            let strict = MinerOptions::default();
            assert_eq!(best_class_rename(&candidates, &strict).unwrap().renamed_class().name, "a.X");
        }

        #[test]
        fn empty_has_no_best() {
            assert!(best_class_rename(&[], &MinerOptions::default()).is_none());
        }

        #[test]
        fn sort_puts_best_first() {
            let d = Fixed(vec![("X", 0.9, 0.0), ("Y", 0.1, 0.0)]);
            let mut candidates = vec![diff(&d, "a", "X"), diff(&d, "a", "Y")];
            sort_class_renames(&mut candidates, &MinerOptions::default());
            assert_eq!(candidates[0].renamed_class().name, "a.Y");
        }
    }

    #[test]
    fn match_result_counts() {
        let result = MatchResult::new(3, 1, 4, 2).with_identical_package_header(true);
        assert_eq!(result.matched_members(), 4);
        assert!(result.identical_package_header);
        assert!(!result.is_match);
    }
}
