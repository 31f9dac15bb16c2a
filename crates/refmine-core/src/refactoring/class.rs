//! Class-structure refactorings: renames, moves, extractions, merges, splits,
//! and the package and source-folder aggregates built from class moves.

use std::sync::Arc;

use crate::capability::{
    ClassLevelRefactoring, ModelLevelRefactoring, MultiClassRefactoring, PackageLevelRefactoring,
    Refactoring,
};
use crate::model::{UmlAttribute, UmlClass, UmlOperation};
use crate::refactoring::{bracketed, labeled};
use crate::refactoring_type::RefactoringType;
use crate::types::{CodeRange, RenamePattern};

// ============================================================================
// Rename / Move
// ============================================================================

/// A class kept in place under a new name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameClass {
    original_class: Arc<UmlClass>,
    renamed_class: Arc<UmlClass>,
}

impl RenameClass {
    pub fn new(original_class: Arc<UmlClass>, renamed_class: Arc<UmlClass>) -> Self {
        RenameClass {
            original_class,
            renamed_class,
        }
    }

    pub fn renamed_class(&self) -> &UmlClass {
        &self.renamed_class
    }
}

impl Refactoring for RenameClass {
    fn refactoring_type(&self) -> RefactoringType {
        RefactoringType::RenameClass
    }

    fn detail(&self) -> String {
        format!("{} renamed to {}", self.original_class, self.renamed_class)
    }

    fn class_name(&self) -> String {
        self.renamed_class.name.clone()
    }

    fn left_side(&self) -> Vec<CodeRange> {
        vec![labeled(
            &self.original_class.location,
            "original type declaration",
            &self.original_class,
        )]
    }

    fn right_side(&self) -> Vec<CodeRange> {
        vec![labeled(
            &self.renamed_class.location,
            "renamed type declaration",
            &self.renamed_class,
        )]
    }
}

impl ClassLevelRefactoring for RenameClass {
    fn original_class(&self) -> &UmlClass {
        &self.original_class
    }

    fn next_class(&self) -> &UmlClass {
        &self.renamed_class
    }
}

/// A class relocated to another package or outer class, name unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveClass {
    original_class: Arc<UmlClass>,
    moved_class: Arc<UmlClass>,
}

impl MoveClass {
    pub fn new(original_class: Arc<UmlClass>, moved_class: Arc<UmlClass>) -> Self {
        MoveClass {
            original_class,
            moved_class,
        }
    }

    /// True when the declaring file changed directory as well as package.
    pub fn is_move_to_another_source_folder(&self) -> bool {
        crate::types::path_prefix(&self.original_class.source_file)
            != crate::types::path_prefix(&self.moved_class.source_file)
    }
}

impl Refactoring for MoveClass {
    fn refactoring_type(&self) -> RefactoringType {
        RefactoringType::MoveClass
    }

    fn detail(&self) -> String {
        format!("{} moved to {}", self.original_class, self.moved_class)
    }

    fn class_name(&self) -> String {
        self.moved_class.name.clone()
    }

    fn left_side(&self) -> Vec<CodeRange> {
        vec![labeled(
            &self.original_class.location,
            "original type declaration",
            &self.original_class,
        )]
    }

    fn right_side(&self) -> Vec<CodeRange> {
        vec![labeled(
            &self.moved_class.location,
            "moved type declaration",
            &self.moved_class,
        )]
    }
}

impl ClassLevelRefactoring for MoveClass {
    fn original_class(&self) -> &UmlClass {
        &self.original_class
    }

    fn next_class(&self) -> &UmlClass {
        &self.moved_class
    }
}

impl PackageLevelRefactoring for MoveClass {
    fn original_class(&self) -> &UmlClass {
        &self.original_class
    }

    fn moved_class(&self) -> &UmlClass {
        &self.moved_class
    }
}

/// A class relocated and renamed in the same change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveAndRenameClass {
    original_class: Arc<UmlClass>,
    renamed_class: Arc<UmlClass>,
}

impl MoveAndRenameClass {
    pub fn new(original_class: Arc<UmlClass>, renamed_class: Arc<UmlClass>) -> Self {
        MoveAndRenameClass {
            original_class,
            renamed_class,
        }
    }
}

impl Refactoring for MoveAndRenameClass {
    fn refactoring_type(&self) -> RefactoringType {
        RefactoringType::MoveRenameClass
    }

    fn detail(&self) -> String {
        format!(
            "{} moved and renamed to {}",
            self.original_class, self.renamed_class
        )
    }

    fn class_name(&self) -> String {
        self.renamed_class.name.clone()
    }

    fn left_side(&self) -> Vec<CodeRange> {
        vec![labeled(
            &self.original_class.location,
            "original type declaration",
            &self.original_class,
        )]
    }

    fn right_side(&self) -> Vec<CodeRange> {
        vec![labeled(
            &self.renamed_class.location,
            "moved and renamed type declaration",
            &self.renamed_class,
        )]
    }
}

impl ClassLevelRefactoring for MoveAndRenameClass {
    fn original_class(&self) -> &UmlClass {
        &self.original_class
    }

    fn next_class(&self) -> &UmlClass {
        &self.renamed_class
    }
}

impl PackageLevelRefactoring for MoveAndRenameClass {
    fn original_class(&self) -> &UmlClass {
        &self.original_class
    }

    fn moved_class(&self) -> &UmlClass {
        &self.renamed_class
    }
}

// ============================================================================
// Extract / Collapse
// ============================================================================

/// Members of one class moved into a newly added class.
///
/// Reported as Extract Subclass when the added class declares the original
/// as its supertype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractClass {
    original_class: Arc<UmlClass>,
    extracted_class: Arc<UmlClass>,
    extracted_operations: Vec<Arc<UmlOperation>>,
    extracted_attributes: Vec<Arc<UmlAttribute>>,
}

impl ExtractClass {
    pub fn new(original_class: Arc<UmlClass>, extracted_class: Arc<UmlClass>) -> Self {
        ExtractClass {
            original_class,
            extracted_class,
            extracted_operations: Vec::new(),
            extracted_attributes: Vec::new(),
        }
    }

    pub fn with_operation(mut self, operation: Arc<UmlOperation>) -> Self {
        self.extracted_operations.push(operation);
        self
    }

    pub fn with_attribute(mut self, attribute: Arc<UmlAttribute>) -> Self {
        self.extracted_attributes.push(attribute);
        self
    }

    pub fn extracted_class(&self) -> &UmlClass {
        &self.extracted_class
    }

    pub fn extracted_operations(&self) -> &[Arc<UmlOperation>] {
        &self.extracted_operations
    }

    pub fn extracted_attributes(&self) -> &[Arc<UmlAttribute>] {
        &self.extracted_attributes
    }

    pub fn extracted_member_count(&self) -> usize {
        self.extracted_operations.len() + self.extracted_attributes.len()
    }
}

impl Refactoring for ExtractClass {
    fn refactoring_type(&self) -> RefactoringType {
        if self.extracted_class.is_sub_type_of(&self.original_class) {
            RefactoringType::ExtractSubclass
        } else {
            RefactoringType::ExtractClass
        }
    }

    fn detail(&self) -> String {
        format!(
            "{} from class {}",
            self.extracted_class, self.original_class
        )
    }

    fn class_name(&self) -> String {
        self.original_class.name.clone()
    }

    fn left_side(&self) -> Vec<CodeRange> {
        let mut ranges = vec![labeled(
            &self.original_class.location,
            "original type declaration",
            &self.original_class,
        )];
        for operation in &self.extracted_operations {
            ranges.push(labeled(
                &operation.location,
                "extracted method declaration",
                operation,
            ));
        }
        for attribute in &self.extracted_attributes {
            ranges.push(labeled(
                &attribute.location,
                "extracted attribute declaration",
                attribute,
            ));
        }
        ranges
    }

    fn right_side(&self) -> Vec<CodeRange> {
        vec![labeled(
            &self.extracted_class.location,
            "extracted type declaration",
            &self.extracted_class,
        )]
    }
}

impl ClassLevelRefactoring for ExtractClass {
    fn original_class(&self) -> &UmlClass {
        &self.original_class
    }

    fn next_class(&self) -> &UmlClass {
        &self.extracted_class
    }
}

/// A new supertype extracted from one or more classes.
///
/// Reported as Extract Interface when the new type is an interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractSuperclass {
    extracted_class: Arc<UmlClass>,
    sub_classes_before: Vec<Arc<UmlClass>>,
    sub_classes_after: Vec<Arc<UmlClass>>,
}

impl ExtractSuperclass {
    pub fn new(
        extracted_class: Arc<UmlClass>,
        sub_classes_before: Vec<Arc<UmlClass>>,
        sub_classes_after: Vec<Arc<UmlClass>>,
    ) -> Self {
        ExtractSuperclass {
            extracted_class,
            sub_classes_before,
            sub_classes_after,
        }
    }

    pub fn extracted_class(&self) -> &UmlClass {
        &self.extracted_class
    }
}

impl Refactoring for ExtractSuperclass {
    fn refactoring_type(&self) -> RefactoringType {
        if self.extracted_class.is_interface {
            RefactoringType::ExtractInterface
        } else {
            RefactoringType::ExtractSuperclass
        }
    }

    fn detail(&self) -> String {
        format!(
            "{} from classes {}",
            self.extracted_class,
            bracketed(&self.sub_classes_before)
        )
    }

    fn class_name(&self) -> String {
        self.extracted_class.name.clone()
    }

    fn left_side(&self) -> Vec<CodeRange> {
        self.sub_classes_before
            .iter()
            .map(|c| labeled(&c.location, "original sub-type declaration", c))
            .collect()
    }

    fn right_side(&self) -> Vec<CodeRange> {
        let mut ranges = vec![labeled(
            &self.extracted_class.location,
            "extracted super-type declaration",
            &self.extracted_class,
        )];
        ranges.extend(
            self.sub_classes_after
                .iter()
                .map(|c| labeled(&c.location, "sub-type declaration after extraction", c)),
        );
        ranges
    }
}

impl MultiClassRefactoring for ExtractSuperclass {
    fn original_classes(&self) -> Vec<&UmlClass> {
        self.sub_classes_before.iter().map(|c| c.as_ref()).collect()
    }

    fn next_classes(&self) -> Vec<&UmlClass> {
        std::iter::once(self.extracted_class.as_ref())
            .chain(self.sub_classes_after.iter().map(|c| c.as_ref()))
            .collect()
    }
}

/// A superclass and subclass folded into one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollapseHierarchy {
    collapsed_class: Arc<UmlClass>,
    target_class: Arc<UmlClass>,
}

impl CollapseHierarchy {
    pub fn new(collapsed_class: Arc<UmlClass>, target_class: Arc<UmlClass>) -> Self {
        CollapseHierarchy {
            collapsed_class,
            target_class,
        }
    }
}

impl Refactoring for CollapseHierarchy {
    fn refactoring_type(&self) -> RefactoringType {
        RefactoringType::CollapseHierarchy
    }

    fn detail(&self) -> String {
        format!("{} to {}", self.collapsed_class, self.target_class)
    }

    fn class_name(&self) -> String {
        self.target_class.name.clone()
    }

    fn left_side(&self) -> Vec<CodeRange> {
        vec![labeled(
            &self.collapsed_class.location,
            "collapsed type declaration",
            &self.collapsed_class,
        )]
    }

    fn right_side(&self) -> Vec<CodeRange> {
        vec![labeled(
            &self.target_class.location,
            "target type declaration",
            &self.target_class,
        )]
    }
}

impl ClassLevelRefactoring for CollapseHierarchy {
    fn original_class(&self) -> &UmlClass {
        &self.collapsed_class
    }

    fn next_class(&self) -> &UmlClass {
        &self.target_class
    }
}

// ============================================================================
// Merge / Split
// ============================================================================

/// Several classes merged into one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeClass {
    merged_classes: Vec<Arc<UmlClass>>,
    new_class: Arc<UmlClass>,
}

impl MergeClass {
    pub fn new(merged_classes: Vec<Arc<UmlClass>>, new_class: Arc<UmlClass>) -> Self {
        MergeClass {
            merged_classes,
            new_class,
        }
    }

    pub fn new_class(&self) -> &UmlClass {
        &self.new_class
    }
}

impl Refactoring for MergeClass {
    fn refactoring_type(&self) -> RefactoringType {
        RefactoringType::MergeClass
    }

    fn detail(&self) -> String {
        format!("{} to {}", bracketed(&self.merged_classes), self.new_class)
    }

    fn class_name(&self) -> String {
        self.new_class.name.clone()
    }

    fn left_side(&self) -> Vec<CodeRange> {
        self.merged_classes
            .iter()
            .map(|c| labeled(&c.location, "merged type declaration", c))
            .collect()
    }

    fn right_side(&self) -> Vec<CodeRange> {
        vec![labeled(
            &self.new_class.location,
            "new type declaration",
            &self.new_class,
        )]
    }
}

impl MultiClassRefactoring for MergeClass {
    fn original_classes(&self) -> Vec<&UmlClass> {
        self.merged_classes.iter().map(|c| c.as_ref()).collect()
    }

    fn next_classes(&self) -> Vec<&UmlClass> {
        vec![self.new_class.as_ref()]
    }
}

/// Read as a move of the first merged class. A merge without merged classes
/// reads as the new class staying where it is.
impl PackageLevelRefactoring for MergeClass {
    fn original_class(&self) -> &UmlClass {
        self.merged_classes.first().unwrap_or(&self.new_class)
    }

    fn moved_class(&self) -> &UmlClass {
        &self.new_class
    }
}

/// One class split into several.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitClass {
    original_class: Arc<UmlClass>,
    split_classes: Vec<Arc<UmlClass>>,
}

impl SplitClass {
    pub fn new(original_class: Arc<UmlClass>, split_classes: Vec<Arc<UmlClass>>) -> Self {
        SplitClass {
            original_class,
            split_classes,
        }
    }
}

impl Refactoring for SplitClass {
    fn refactoring_type(&self) -> RefactoringType {
        RefactoringType::SplitClass
    }

    fn detail(&self) -> String {
        format!("{} to {}", self.original_class, bracketed(&self.split_classes))
    }

    fn class_name(&self) -> String {
        self.original_class.name.clone()
    }

    fn left_side(&self) -> Vec<CodeRange> {
        vec![labeled(
            &self.original_class.location,
            "original type declaration",
            &self.original_class,
        )]
    }

    fn right_side(&self) -> Vec<CodeRange> {
        self.split_classes
            .iter()
            .map(|c| labeled(&c.location, "split type declaration", c))
            .collect()
    }
}

impl MultiClassRefactoring for SplitClass {
    fn original_classes(&self) -> Vec<&UmlClass> {
        vec![self.original_class.as_ref()]
    }

    fn next_classes(&self) -> Vec<&UmlClass> {
        self.split_classes.iter().map(|c| c.as_ref()).collect()
    }
}

/// An anonymous class promoted to a named class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceAnonymousWithClass {
    base_class: Arc<UmlClass>,
    anonymous_class: Arc<UmlClass>,
    added_class: Arc<UmlClass>,
}

impl ReplaceAnonymousWithClass {
    pub fn new(
        base_class: Arc<UmlClass>,
        anonymous_class: Arc<UmlClass>,
        added_class: Arc<UmlClass>,
    ) -> Self {
        ReplaceAnonymousWithClass {
            base_class,
            anonymous_class,
            added_class,
        }
    }

    /// Class that declared the anonymous class.
    pub fn base_class(&self) -> &UmlClass {
        &self.base_class
    }
}

impl Refactoring for ReplaceAnonymousWithClass {
    fn refactoring_type(&self) -> RefactoringType {
        RefactoringType::ReplaceAnonymousWithClass
    }

    fn detail(&self) -> String {
        format!("{} with {}", self.anonymous_class, self.added_class)
    }

    fn class_name(&self) -> String {
        self.base_class.name.clone()
    }

    fn left_side(&self) -> Vec<CodeRange> {
        vec![labeled(
            &self.anonymous_class.location,
            "anonymous type declaration",
            &self.anonymous_class,
        )]
    }

    fn right_side(&self) -> Vec<CodeRange> {
        vec![labeled(
            &self.added_class.location,
            "added type declaration",
            &self.added_class,
        )]
    }
}

impl ClassLevelRefactoring for ReplaceAnonymousWithClass {
    fn original_class(&self) -> &UmlClass {
        &self.anonymous_class
    }

    fn next_class(&self) -> &UmlClass {
        &self.added_class
    }
}

// ============================================================================
// Package / Source Folder Aggregates
// ============================================================================

/// A class-level change that can be part of a package rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageMove {
    MoveClass(MoveClass),
    MoveAndRenameClass(MoveAndRenameClass),
    MergeClass(MergeClass),
}

impl PackageMove {
    pub fn as_package_level(&self) -> &dyn PackageLevelRefactoring {
        match self {
            PackageMove::MoveClass(r) => r,
            PackageMove::MoveAndRenameClass(r) => r,
            PackageMove::MergeClass(r) => r,
        }
    }

    /// Every `(before, after)` class pair; a merge yields one pair per merged
    /// class.
    pub fn class_pairs(&self) -> Vec<(&UmlClass, &UmlClass)> {
        match self {
            PackageMove::MergeClass(merge) => merge
                .merged_classes
                .iter()
                .map(|c| (c.as_ref(), merge.new_class.as_ref()))
                .collect(),
            other => {
                let r = other.as_package_level();
                vec![(r.original_class(), r.moved_class())]
            }
        }
    }
}

impl From<MoveClass> for PackageMove {
    fn from(r: MoveClass) -> Self {
        PackageMove::MoveClass(r)
    }
}

impl From<MoveAndRenameClass> for PackageMove {
    fn from(r: MoveAndRenameClass) -> Self {
        PackageMove::MoveAndRenameClass(r)
    }
}

impl From<MergeClass> for PackageMove {
    fn from(r: MergeClass) -> Self {
        PackageMove::MergeClass(r)
    }
}

/// All class moves sharing one package rename pattern.
///
/// Reported as Move Package when the last package segment is unchanged
/// (`a.b.util` to `a.c.util`), otherwise as Rename Package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePackage {
    pattern: RenamePattern,
    moves: Vec<PackageMove>,
}

impl RenamePackage {
    pub fn new(pattern: RenamePattern) -> Self {
        RenamePackage {
            pattern,
            moves: Vec::new(),
        }
    }

    pub fn with_move(mut self, member: impl Into<PackageMove>) -> Self {
        self.moves.push(member.into());
        self
    }

    pub(crate) fn add_move(&mut self, member: impl Into<PackageMove>) {
        self.moves.push(member.into());
    }

    pub fn moves(&self) -> &[PackageMove] {
        &self.moves
    }

    fn original_package(&self) -> &str {
        self.pattern.original_path.trim_end_matches('.')
    }

    fn moved_package(&self) -> &str {
        self.pattern.moved_path.trim_end_matches('.')
    }
}

fn last_segment(package: &str) -> &str {
    package.rsplit('.').next().unwrap_or(package)
}

impl Refactoring for RenamePackage {
    fn refactoring_type(&self) -> RefactoringType {
        if last_segment(self.original_package()) == last_segment(self.moved_package()) {
            RefactoringType::MovePackage
        } else {
            RefactoringType::RenamePackage
        }
    }

    fn detail(&self) -> String {
        format!("{} to {}", self.original_package(), self.moved_package())
    }

    fn class_name(&self) -> String {
        self.moved_package().to_string()
    }

    fn left_side(&self) -> Vec<CodeRange> {
        self.moves
            .iter()
            .flat_map(|m| m.as_package_level().left_side())
            .collect()
    }

    fn right_side(&self) -> Vec<CodeRange> {
        self.moves
            .iter()
            .flat_map(|m| m.as_package_level().right_side())
            .collect()
    }
}

impl ModelLevelRefactoring for RenamePackage {
    fn pattern(&self) -> &RenamePattern {
        &self.pattern
    }

    fn moved_class_pairs(&self) -> Vec<(&UmlClass, &UmlClass)> {
        self.moves.iter().flat_map(|m| m.class_pairs()).collect()
    }
}

/// All classes whose files moved between the same pair of source folders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveSourceFolder {
    pattern: RenamePattern,
    moved_classes: Vec<(Arc<UmlClass>, Arc<UmlClass>)>,
}

impl MoveSourceFolder {
    pub fn new(pattern: RenamePattern) -> Self {
        MoveSourceFolder {
            pattern,
            moved_classes: Vec::new(),
        }
    }

    pub fn with_moved_class(mut self, original: Arc<UmlClass>, moved: Arc<UmlClass>) -> Self {
        self.moved_classes.push((original, moved));
        self
    }

    pub(crate) fn add_moved_class(&mut self, original: Arc<UmlClass>, moved: Arc<UmlClass>) {
        self.moved_classes.push((original, moved));
    }
}

impl Refactoring for MoveSourceFolder {
    fn refactoring_type(&self) -> RefactoringType {
        RefactoringType::MoveSourceFolder
    }

    fn detail(&self) -> String {
        format!("{} to {}", self.pattern.original_path, self.pattern.moved_path)
    }

    fn class_name(&self) -> String {
        self.moved_classes
            .first()
            .map(|(_, moved)| moved.name.clone())
            .unwrap_or_default()
    }

    fn left_side(&self) -> Vec<CodeRange> {
        self.moved_classes
            .iter()
            .map(|(original, _)| labeled(&original.location, "original type declaration", original))
            .collect()
    }

    fn right_side(&self) -> Vec<CodeRange> {
        self.moved_classes
            .iter()
            .map(|(_, moved)| labeled(&moved.location, "moved type declaration", moved))
            .collect()
    }
}

impl ModelLevelRefactoring for MoveSourceFolder {
    fn pattern(&self) -> &RenamePattern {
        &self.pattern
    }

    fn moved_class_pairs(&self) -> Vec<(&UmlClass, &UmlClass)> {
        self.moved_classes
            .iter()
            .map(|(original, moved)| (original.as_ref(), moved.as_ref()))
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn class(package: &str, name: &str) -> Arc<UmlClass> {
        Arc::new(UmlClass::new(
            package,
            name,
            &format!("src/{}/{}.java", package.replace('.', "/"), name),
        ))
    }

    fn assert_valid(refactoring: &dyn Refactoring) {
        let description = refactoring.description();
        assert!(
            refactoring.refactoring_type().matches(&description),
            "{} does not match its pattern",
            description
        );
    }

    mod descriptions {
        use super::*;

        #[test]
        fn rename_class() {
            let r = RenameClass::new(class("a", "Foo"), class("a", "Bar"));
            assert_eq!(r.description(), "Rename Class\ta.Foo renamed to a.Bar");
            assert_eq!(r.class_name(), "a.Bar");
            assert_valid(&r);
        }

        #[test]
        fn move_and_move_rename_class() {
            let m = MoveClass::new(class("a", "Foo"), class("b", "Foo"));
            assert_eq!(m.description(), "Move Class\ta.Foo moved to b.Foo");
            assert_valid(&m);
            let mr = MoveAndRenameClass::new(class("a", "Foo"), class("b", "Bar"));
            assert_eq!(
                mr.description(),
                "Move And Rename Class\ta.Foo moved and renamed to b.Bar"
            );
            assert_valid(&mr);
        }

        #[test]
        fn extract_superclass_lists_sources() {
            let r = ExtractSuperclass::new(
                class("a", "Base"),
                vec![class("a", "A"), class("a", "B")],
                vec![class("a", "A"), class("a", "B")],
            );
            assert_eq!(r.description(), "Extract Superclass\ta.Base from classes [a.A, a.B]");
            assert_valid(&r);
        }

        #[test]
        fn merge_and_split_class() {
            let merge = MergeClass::new(vec![class("a", "A"), class("a", "B")], class("a", "C"));
            assert_eq!(merge.description(), "Merge Class\t[a.A, a.B] to a.C");
            assert_valid(&merge);
            let split = SplitClass::new(class("a", "A"), vec![class("a", "B"), class("a", "C")]);
            assert_eq!(split.description(), "Split Class\ta.A to [a.B, a.C]");
            assert_valid(&split);
        }

        #[test]
        fn collapse_and_anonymous() {
            let collapse = CollapseHierarchy::new(class("a", "Sub"), class("a", "Base"));
            assert_eq!(collapse.description(), "Collapse Hierarchy\ta.Sub to a.Base");
            assert_valid(&collapse);

            let base = class("a", "Host");
            let anon = Arc::new(UmlClass::nested_in(&base, "1"));
            let added = class("a", "Listener");
            let r = ReplaceAnonymousWithClass::new(base, anon, added);
            assert_eq!(
                r.description(),
                "Replace Anonymous With Class\ta.Host.1 with a.Listener"
            );
            assert_eq!(r.class_name(), "a.Host");
            assert_valid(&r);
        }
    }

    mod specializations {
        use super::*;

        #[test]
        fn extract_subclass_when_extracted_extends_original() {
            let original = class("a", "Shape");
            let plain = ExtractClass::new(original.clone(), class("a", "Helper"));
            assert_eq!(plain.refactoring_type(), RefactoringType::ExtractClass);
            assert_valid(&plain);

            let sub = Arc::new(UmlClass::new("a", "Circle", "Circle.java").with_superclass("Shape"));
            let subclass = ExtractClass::new(original, sub);
            assert_eq!(subclass.refactoring_type(), RefactoringType::ExtractSubclass);
            assert!(subclass.description().starts_with("Extract Subclass\t"));
            assert_valid(&subclass);
        }

        #[test]
        fn extract_interface_when_extracted_is_interface() {
            let iface = Arc::new(UmlClass::new("a", "Drawable", "Drawable.java").as_interface());
            let r = ExtractSuperclass::new(iface, vec![class("a", "A")], vec![class("a", "A")]);
            assert_eq!(r.refactoring_type(), RefactoringType::ExtractInterface);
            assert_valid(&r);
        }

        #[test]
        fn package_rename_versus_move() {
            let rename = RenamePackage::new(RenamePattern::new("org.old.", "org.fresh."));
            assert_eq!(rename.refactoring_type(), RefactoringType::RenamePackage);
            assert_eq!(rename.description(), "Rename Package\torg.old to org.fresh");
            assert_valid(&rename);

            let moved = RenamePackage::new(RenamePattern::new("org.a.util.", "org.b.util."));
            assert_eq!(moved.refactoring_type(), RefactoringType::MovePackage);
            assert_eq!(moved.description(), "Move Package\torg.a.util to org.b.util");
            assert_valid(&moved);
        }
    }

    mod capabilities {
        use super::*;

        #[test]
        fn singleton_views_follow_single_accessors() {
            let r = RenameClass::new(class("a", "Foo"), class("a", "Bar"));
            assert_eq!(r.classes_before(), vec![r.original_class()]);
            assert_eq!(r.classes_after(), vec![r.next_class()]);

            let e = ExtractClass::new(class("a", "Foo"), class("a", "Helper"));
            assert_eq!(e.classes_before(), vec![e.original_class()]);
            assert_eq!(e.classes_after(), vec![e.next_class()]);
        }

        #[test]
        fn move_class_exposes_rename_pattern() {
            let m = MoveClass::new(class("org.a.util", "Foo"), class("org.b.util", "Foo"));
            assert_eq!(m.rename_pattern(), RenamePattern::new("org.a.", "org.b."));
            assert_eq!(m.original_class_name(), "org.a.util.Foo");
            assert_eq!(m.moved_class_name(), "org.b.util.Foo");
            assert!(m.is_move_to_another_source_folder());
        }

        #[test]
        fn package_aggregate_collects_member_moves() {
            let aggregate = RenamePackage::new(RenamePattern::new("a.", "b."))
                .with_move(MoveClass::new(class("a", "X"), class("b", "X")))
                .with_move(MoveClass::new(class("a", "Y"), class("b", "Y")));
            let pairs = aggregate.moved_class_pairs();
            assert_eq!(pairs.len(), 2);
            assert_eq!(pairs[1].0.name, "a.Y");
            assert_eq!(aggregate.left_side().len(), 2);
        }

        #[test]
        fn package_aggregate_accepts_renames_and_merges() {
            let aggregate = RenamePackage::new(RenamePattern::new("a.", "b."))
                .with_move(MoveAndRenameClass::new(class("a", "X"), class("b", "Y")))
                .with_move(MergeClass::new(
                    vec![class("a", "P"), class("a", "Q")],
                    class("b", "P"),
                ));
            assert!(matches!(aggregate.moves()[0], PackageMove::MoveAndRenameClass(_)));
            let pairs: Vec<(&str, &str)> = aggregate
                .moved_class_pairs()
                .into_iter()
                .map(|(before, after)| (before.name.as_str(), after.name.as_str()))
                .collect();
            assert_eq!(pairs, vec![("a.X", "b.Y"), ("a.P", "b.P"), ("a.Q", "b.P")]);
            assert_eq!(aggregate.left_side().len(), 3);
            assert_eq!(aggregate.right_side().len(), 2);
        }

        #[test]
        fn merge_reads_as_move_of_first_merged_class() {
            let merge = MergeClass::new(vec![class("a.b", "Catalog"), class("x", "Prices")], class("a.c", "Catalog"));
            assert_eq!(PackageLevelRefactoring::original_class(&merge).name, "a.b.Catalog");
            assert_eq!(merge.rename_pattern(), RenamePattern::new("a.b.", "a.c."));

            let empty = MergeClass::new(Vec::new(), class("a", "C"));
            assert_eq!(PackageLevelRefactoring::original_class(&empty).name, "a.C");
        }

        #[test]
        fn source_folder_builder_collects_pairs() {
            let folder = MoveSourceFolder::new(RenamePattern::new("src", "lib/src"))
                .with_moved_class(class("a", "X"), class("a", "X"));
            assert_eq!(folder.moved_class_pairs().len(), 1);
            assert_eq!(folder.class_name(), "a.X");
        }

        #[test]
        fn extract_class_left_side_lists_members() {
            let original = class("a", "Foo");
            let op = Arc::new(UmlOperation::new("a.Foo", "helper"));
            let attr = Arc::new(UmlAttribute::new("a.Foo", "cache", "Map"));
            let e = ExtractClass::new(original, class("a", "Helper"))
                .with_operation(op)
                .with_attribute(attr);
            assert_eq!(e.extracted_member_count(), 2);
            let left = e.left_side();
            assert_eq!(left.len(), 3);
            assert_eq!(left[1].description.as_deref(), Some("extracted method declaration"));
        }
    }
}
