//! Grouping of class-level changes into package and source-folder aggregates.
//!
//! Matched class pairs come in from the model diff in three stages, each fed
//! to a [`ClassMoveGrouper`]:
//!
//! 1. **Moves** (`(original, moved)` pairs). Each pair turns into one of:
//!    - a plain **Move Class**, when the change is a move into a sub-package
//!      or out to a parent package, or either class is nested;
//!    - a **Move Class** grouped under a **Rename Package** keyed by the
//!      pair's [`RenamePattern`]. The member moves are always reported. The
//!      aggregate itself is reported only when the original package's folder
//!      was deleted;
//!    - a **Move Source Folder** entry, when the qualified name is unchanged
//!      but the declaring file's directory changed.
//! 2. **Renames** ([`ClassRenameDiff`]s). Same-package renames are **Rename
//!    Class**; the others are **Move And Rename Class**, grouped by pattern.
//! 3. **Merges** ([`ClassMergeDiff`]s). Every merge is a **Merge Class**; a
//!    merge that leaves the package is grouped by its pattern as well.
//!
//! Later stages first join aggregates already reported by earlier stages,
//! so a reported Rename Package lists every member that shares its pattern.
//! New aggregates follow the same deleted-folder rule.
//!
//! Pairs with the same name and the same directory are not moves and yield
//! nothing.

use std::sync::Arc;

use crate::candidate::ClassMergeDiff;
use crate::capability::{ModelLevelRefactoring, PackageLevelRefactoring};
use crate::error::MinerResult;
use crate::model::UmlClass;
use crate::options::MergePackagePolicy;
use crate::ranking::{ClassLevelDiff, ClassRenameDiff};
use crate::refactoring::{
    DetectedRefactoring, MergeClass, MoveAndRenameClass, MoveClass, MoveSourceFolder, PackageMove,
    RenameClass, RenamePackage,
};
use crate::types::{path_prefix, RenamePattern};

// ============================================================================
// Grouper
// ============================================================================

/// Output position: a finished refactoring, or a reported package aggregate
/// that later stages may still extend.
#[derive(Debug)]
enum Slot {
    Refactoring(DetectedRefactoring),
    Package(usize),
}

/// Accumulates class moves, renames and merges, and groups them by package.
///
/// Output keeps stage order. Within the moves stage: ungrouped moves as
/// encountered; then, per new package pattern in first-seen order, the
/// aggregate (when its folder was deleted) followed by its moves; then the
/// source-folder aggregates. Within the rename and merge stages: each
/// refactoring as encountered, then the new aggregates whose folder was
/// deleted.
#[derive(Debug)]
pub struct ClassMoveGrouper<'f> {
    deleted_folders: &'f [String],
    slots: Vec<Slot>,
    /// Reported aggregates, indexed by `Slot::Package`.
    packages: Vec<RenamePackage>,
}

impl<'f> ClassMoveGrouper<'f> {
    pub fn new(deleted_folders: &'f [String]) -> Self {
        ClassMoveGrouper {
            deleted_folders,
            slots: Vec::new(),
            packages: Vec::new(),
        }
    }

    /// Group `(original, moved)` class pairs.
    pub fn add_class_moves(&mut self, moves: &[(Arc<UmlClass>, Arc<UmlClass>)]) {
        let mut fresh: Vec<RenamePackage> = Vec::new();
        let mut folders: Vec<MoveSourceFolder> = Vec::new();

        for (original, moved) in moves {
            if original.name != moved.name {
                let class_move = MoveClass::new(Arc::clone(original), Arc::clone(moved));
                let pattern = class_move.rename_pattern();
                if pattern.is_nested() || !original.is_top_level || !moved.is_top_level {
                    self.push(class_move);
                    continue;
                }
                if self.join_reported(&pattern, class_move.clone()) {
                    self.push(class_move);
                } else {
                    join_fresh(&mut fresh, pattern, class_move);
                }
                continue;
            }

            let original_folder = path_prefix(&original.source_file);
            let moved_folder = path_prefix(&moved.source_file);
            if original_folder != moved_folder {
                let pattern = RenamePattern::new(original_folder, moved_folder);
                match folders.iter_mut().find(|f| f.pattern() == &pattern) {
                    Some(folder) => folder.add_moved_class(Arc::clone(original), Arc::clone(moved)),
                    None => folders.push(
                        MoveSourceFolder::new(pattern)
                            .with_moved_class(Arc::clone(original), Arc::clone(moved)),
                    ),
                }
            }
        }

        for package in fresh {
            let members = package.moves().to_vec();
            self.report_if_deleted(package);
            for member in members {
                self.push(member);
            }
        }
        for folder in folders {
            self.push(folder);
        }
    }

    /// Group class rename hypotheses.
    pub fn add_class_renames(&mut self, renames: &[ClassRenameDiff]) {
        let mut fresh: Vec<RenamePackage> = Vec::new();
        for diff in renames {
            let original = Arc::clone(diff.original_class_arc());
            let renamed = Arc::clone(diff.renamed_class_arc());
            if diff.same_package() {
                self.push(RenameClass::new(original, renamed));
                continue;
            }
            let refactoring = MoveAndRenameClass::new(original, renamed);
            self.group(&mut fresh, refactoring.clone());
            self.push(refactoring);
        }
        self.report_deleted(fresh);
    }

    /// Group class merges, deciding package agreement under `policy`.
    ///
    /// Fails without grouping anything when a merge violates `policy`.
    pub fn add_class_merges(
        &mut self,
        merges: &[ClassMergeDiff],
        policy: MergePackagePolicy,
    ) -> MinerResult<()> {
        let same_package = merges
            .iter()
            .map(|merge| merge.same_package_with(policy))
            .collect::<MinerResult<Vec<bool>>>()?;

        let mut fresh: Vec<RenamePackage> = Vec::new();
        for (merge, same_package) in merges.iter().zip(same_package) {
            let refactoring = MergeClass::from_merge_diff(merge);
            if !same_package {
                self.group(&mut fresh, refactoring.clone());
            }
            self.push(refactoring);
        }
        self.report_deleted(fresh);
        Ok(())
    }

    /// All refactorings in output order.
    pub fn finish(self) -> Vec<DetectedRefactoring> {
        let mut packages: Vec<Option<RenamePackage>> = self.packages.into_iter().map(Some).collect();
        self.slots
            .into_iter()
            .filter_map(|slot| match slot {
                Slot::Refactoring(refactoring) => Some(refactoring),
                Slot::Package(index) => packages
                    .get_mut(index)
                    .and_then(Option::take)
                    .map(DetectedRefactoring::from),
            })
            .collect()
    }

    fn push(&mut self, refactoring: impl Into<DetectedRefactoring>) {
        self.slots.push(Slot::Refactoring(refactoring.into()));
    }

    /// Add `member` to a reported aggregate with `pattern`, if there is one.
    fn join_reported(&mut self, pattern: &RenamePattern, member: impl Into<PackageMove>) -> bool {
        match self.packages.iter_mut().find(|p| p.pattern() == pattern) {
            Some(package) => {
                package.add_move(member);
                true
            }
            None => false,
        }
    }

    fn group(&mut self, fresh: &mut Vec<RenamePackage>, member: impl Into<PackageMove>) {
        let member = member.into();
        let pattern = member.as_package_level().rename_pattern();
        if !self.join_reported(&pattern, member.clone()) {
            join_fresh(fresh, pattern, member);
        }
    }

    fn report_deleted(&mut self, fresh: Vec<RenamePackage>) {
        for package in fresh {
            self.report_if_deleted(package);
        }
    }

    fn report_if_deleted(&mut self, package: RenamePackage) {
        let deleted = is_source_package_deleted(package.pattern(), self.deleted_folders);
        tracing::debug!(
            pattern = %package.pattern(),
            moves = package.moves().len(),
            deleted,
            "package move group"
        );
        if deleted {
            self.slots.push(Slot::Package(self.packages.len()));
            self.packages.push(package);
        }
    }
}

fn join_fresh(fresh: &mut Vec<RenamePackage>, pattern: RenamePattern, member: impl Into<PackageMove>) {
    match fresh.iter_mut().find(|p| p.pattern() == &pattern) {
        Some(package) => package.add_move(member),
        None => fresh.push(RenamePackage::new(pattern).with_move(member)),
    }
}

/// Whether a deleted folder path ends with the original package as a path.
fn is_source_package_deleted(pattern: &RenamePattern, deleted_folders: &[String]) -> bool {
    let package_path = pattern.original_path.trim_end_matches('.').replace('.', "/");
    deleted_folders
        .iter()
        .any(|folder| folder.ends_with(&package_path))
}

// ============================================================================
// Single-stage Shortcuts
// ============================================================================

/// Group matched class pairs into move refactorings.
pub fn group_class_moves(
    moves: &[(Arc<UmlClass>, Arc<UmlClass>)],
    deleted_folders: &[String],
) -> Vec<DetectedRefactoring> {
    let mut grouper = ClassMoveGrouper::new(deleted_folders);
    grouper.add_class_moves(moves);
    grouper.finish()
}

/// Group class rename hypotheses into rename and move-and-rename
/// refactorings.
pub fn group_class_renames(
    renames: &[ClassRenameDiff],
    deleted_folders: &[String],
) -> Vec<DetectedRefactoring> {
    let mut grouper = ClassMoveGrouper::new(deleted_folders);
    grouper.add_class_renames(renames);
    grouper.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::Refactoring;
    use crate::error::MinerError;
    use crate::model::ClassDistance;
    use crate::ranking::MatchResult;
    use crate::refactoring_type::RefactoringType;

    fn class(pkg: &str, name: &str, dir: &str) -> Arc<UmlClass> {
        Arc::new(UmlClass::new(pkg, name, &format!("{}/{}.java", dir, name)))
    }

    fn types(refactorings: &[DetectedRefactoring]) -> Vec<RefactoringType> {
        refactorings.iter().map(|r| r.refactoring_type()).collect()
    }

    mod packages {
        use super::*;

        fn renamed_package() -> Vec<(Arc<UmlClass>, Arc<UmlClass>)> {
            vec![
                (class("a.b", "Foo", "src/a/b"), class("a.c", "Foo", "src/a/c")),
                (class("a.b", "Bar", "src/a/b"), class("a.c", "Bar", "src/a/c")),
            ]
        }

        #[test]
        fn aggregate_when_folder_deleted() {
            let found = group_class_moves(&renamed_package(), &["src/a/b".to_string()]);
            assert_eq!(
                types(&found),
                vec![
                    RefactoringType::RenamePackage,
                    RefactoringType::MoveClass,
                    RefactoringType::MoveClass,
                ]
            );
            let aggregate = found[0].as_model_level().unwrap();
            assert_eq!(aggregate.pattern(), &RenamePattern::new("a.b.", "a.c."));
            assert_eq!(aggregate.moved_class_pairs().len(), 2);
            assert_eq!(found[0].to_string(), "Rename Package\ta.b to a.c");
        }

        #[test]
        fn moves_only_when_folder_survives() {
            let found = group_class_moves(&renamed_package(), &[]);
            assert_eq!(types(&found), vec![RefactoringType::MoveClass, RefactoringType::MoveClass]);
        }

        #[test]
        fn sub_package_moves_are_not_grouped() {
            let moves = vec![(class("a.b", "Foo", "src/a/b"), class("a.b.util", "Foo", "src/a/b/util"))];
            let found = group_class_moves(&moves, &["src/a/b".to_string()]);
            assert_eq!(types(&found), vec![RefactoringType::MoveClass]);
        }

        #[test]
        fn nested_classes_are_not_grouped() {
            let outer1 = UmlClass::new("a.b", "Outer", "src/a/b/Outer.java");
            let outer2 = UmlClass::new("a.c", "Outer", "src/a/c/Outer.java");
            let moves = vec![(
                Arc::new(UmlClass::nested_in(&outer1, "In")),
                Arc::new(UmlClass::nested_in(&outer2, "In")),
            )];
            let found = group_class_moves(&moves, &["src/a/b".to_string()]);
            assert_eq!(types(&found), vec![RefactoringType::MoveClass]);
        }

        #[test]
        fn pattern_stops_at_common_suffix() {
            let moves = vec![(class("a.util", "Foo", "src/a/util"), class("b.util", "Foo", "src/b/util"))];
            let found = group_class_moves(&moves, &["src/a".to_string()]);
            assert_eq!(found[0].refactoring_type(), RefactoringType::RenamePackage);
            assert_eq!(found[0].to_string(), "Rename Package\ta to b");
        }
    }

    struct Zero;

    impl ClassDistance for Zero {
        fn normalized_name_distance(&self, _: &UmlClass, _: &UmlClass) -> f64 {
            0.0
        }

        fn normalized_package_distance(&self, _: &UmlClass, _: &UmlClass) -> f64 {
            0.0
        }
    }

    fn rename(original: &Arc<UmlClass>, renamed: &Arc<UmlClass>) -> ClassRenameDiff {
        ClassRenameDiff::new(Arc::clone(original), Arc::clone(renamed), MatchResult::default(), &Zero)
    }

    mod renames {
        use super::*;

        #[test]
        fn same_package_is_rename_class() {
            let renames = vec![rename(&class("a", "Foo", "src/a"), &class("a", "Bar", "src/a"))];
            let found = group_class_renames(&renames, &["src/a".to_string()]);
            assert_eq!(types(&found), vec![RefactoringType::RenameClass]);
        }

        #[test]
        fn cross_package_without_deleted_folder_is_not_aggregated() {
            let renames = vec![rename(&class("a.b", "Foo", "src/a/b"), &class("a.c", "Bar", "src/a/c"))];
            let found = group_class_renames(&renames, &[]);
            assert_eq!(types(&found), vec![RefactoringType::MoveRenameClass]);
        }

        #[test]
        fn renamed_outer_class_groups_its_nested_classes() {
            let before = UmlClass::new("a.b", "Outer", "src/a/b/Outer.java");
            let after = UmlClass::new("a.c", "Shell", "src/a/c/Shell.java");
            let nested = |outer: &UmlClass, name: &str| Arc::new(UmlClass::nested_in(outer, name));
            let renames = vec![
                rename(&nested(&before, "In1"), &nested(&after, "In1")),
                rename(&nested(&before, "In2"), &nested(&after, "In2")),
            ];

            let found = group_class_renames(&renames, &["src/a/b/Outer".to_string()]);
            assert_eq!(
                types(&found),
                vec![
                    RefactoringType::MoveRenameClass,
                    RefactoringType::MoveRenameClass,
                    RefactoringType::RenamePackage,
                ]
            );
            assert_eq!(found[2].to_string(), "Rename Package\ta.b.Outer to a.c.Shell");
            assert_eq!(found[2].as_model_level().unwrap().moved_class_pairs().len(), 2);
        }

        #[test]
        fn renames_join_package_reported_for_moves() {
            let moves = vec![(class("a.b", "Foo", "src/a/b"), class("a.c", "Foo", "src/a/c"))];
            let renames = vec![rename(&class("a.b", "Old", "src/a/b"), &class("a.c", "New", "src/a/c"))];
            let deleted = vec!["src/a/b".to_string()];

            let mut grouper = ClassMoveGrouper::new(&deleted);
            grouper.add_class_moves(&moves);
            grouper.add_class_renames(&renames);
            let found = grouper.finish();

            assert_eq!(
                types(&found),
                vec![
                    RefactoringType::RenamePackage,
                    RefactoringType::MoveClass,
                    RefactoringType::MoveRenameClass,
                ]
            );
            let pairs = found[0].as_model_level().unwrap().moved_class_pairs();
            let moved: Vec<&str> = pairs.iter().map(|(_, moved)| moved.name.as_str()).collect();
            assert_eq!(moved, vec!["a.c.Foo", "a.c.New"]);
        }
    }

    mod merges {
        use super::*;

        fn merge_into(target: &Arc<UmlClass>, sources: &[Arc<UmlClass>]) -> ClassMergeDiff {
            ClassMergeDiff::new(sources.iter().map(|source| rename(source, target)).collect()).unwrap()
        }

        #[test]
        fn merge_joins_package_reported_for_moves() {
            let moves = vec![(class("a.b", "Baz", "src/a/b"), class("a.c", "Baz", "src/a/c"))];
            let merged = class("a.c", "Foo", "src/a/c");
            let merges = vec![merge_into(&merged, &[class("a.b", "Foo", "src/a/b"), class("a.b", "Bar", "src/a/b")])];
            let deleted = vec!["src/a/b".to_string()];

            let mut grouper = ClassMoveGrouper::new(&deleted);
            grouper.add_class_moves(&moves);
            grouper.add_class_merges(&merges, MergePackagePolicy::TrustFirst).unwrap();
            let found = grouper.finish();

            assert_eq!(
                types(&found),
                vec![
                    RefactoringType::RenamePackage,
                    RefactoringType::MoveClass,
                    RefactoringType::MergeClass,
                ]
            );
            assert_eq!(found[0].as_model_level().unwrap().moved_class_pairs().len(), 3);
        }

        #[test]
        fn same_package_merge_is_not_grouped() {
            let merged = class("a", "AB", "src/a");
            let merges = vec![merge_into(&merged, &[class("a", "A", "src/a"), class("a", "B", "src/a")])];
            let deleted = vec!["src/a".to_string()];

            let mut grouper = ClassMoveGrouper::new(&deleted);
            grouper.add_class_merges(&merges, MergePackagePolicy::TrustFirst).unwrap();
            assert_eq!(types(&grouper.finish()), vec![RefactoringType::MergeClass]);
        }

        #[test]
        fn disagreement_under_validate_all_leaves_grouper_unchanged() {
            let moves = vec![(class("a.b", "Baz", "src/a/b"), class("a.c", "Baz", "src/a/c"))];
            let merged = class("a.c", "Foo", "src/a/c");
            let merges = vec![merge_into(&merged, &[class("a.b", "Foo", "src/a/b"), class("a.c", "Bar", "src/a/c")])];
            let deleted = vec!["src/a/b".to_string()];

            let mut grouper = ClassMoveGrouper::new(&deleted);
            grouper.add_class_moves(&moves);
            let err = grouper
                .add_class_merges(&merges, MergePackagePolicy::ValidateAll)
                .unwrap_err();
            assert!(matches!(err, MinerError::PackageDisagreement { .. }));

            let found = grouper.finish();
            assert_eq!(types(&found), vec![RefactoringType::RenamePackage, RefactoringType::MoveClass]);
            assert_eq!(found[0].as_model_level().unwrap().moved_class_pairs().len(), 1);
        }
    }

    mod folders {
        use super::*;

        #[test]
        fn same_name_new_folder() {
            let moves = vec![
                (class("a", "Foo", "src/a"), class("a", "Foo", "lib/src/a")),
                (class("a", "Bar", "src/a"), class("a", "Bar", "lib/src/a")),
            ];
            let found = group_class_moves(&moves, &[]);
            assert_eq!(types(&found), vec![RefactoringType::MoveSourceFolder]);
            assert_eq!(found[0].to_string(), "Move Source Folder\tsrc/a to lib/src/a");
            assert_eq!(found[0].as_model_level().unwrap().moved_class_pairs().len(), 2);
        }

        #[test]
        fn unchanged_pair_yields_nothing() {
            let moves = vec![(class("a", "Foo", "src/a"), class("a", "Foo", "src/a"))];
            assert!(group_class_moves(&moves, &[]).is_empty());
        }
    }
}
