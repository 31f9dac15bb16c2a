//! Concrete refactoring variants and the [`DetectedRefactoring`] sum type.
//!
//! Variants are grouped by the level they operate on:
//! - [`class`]: class renames, moves, extractions, merges, splits, package
//!   and source-folder aggregates
//! - [`operation`]: method renames, moves, extract/inline, merges, splits
//! - [`attribute`]: attribute moves, renames, replacements, extract, merge
//! - [`statement`]: variable refactorings, conditionals, polymorphism
//!
//! Every variant implements [`Refactoring`] plus the capability traits that
//! apply to it. [`DetectedRefactoring`] wraps all of them in one exhaustive
//! enum for reporting; its `as_*` projections give uniform access to the
//! capabilities without matching on variants.
//!
//! Specializations (Extract Interface versus Extract Superclass, Pull Up
//! versus Move, Rename Parameter versus Rename Variable, ...) are decided in
//! `refactoring_type()` from the after-side elements and never stored.

pub mod attribute;
pub mod class;
pub mod operation;
pub mod statement;

use std::fmt;

pub use attribute::{
    CandidateAttributeRename, ExtractAttribute, MergeAttribute, MoveAndRenameAttribute,
    MoveAttribute, MovedMember, RenameAttribute, ReplaceAttribute,
};
pub use class::{
    CollapseHierarchy, ExtractClass, ExtractSuperclass, MergeClass, MoveAndRenameClass, MoveClass,
    MoveSourceFolder, PackageMove, RenameClass, RenamePackage, ReplaceAnonymousWithClass,
    SplitClass,
};
pub use operation::{
    ExtractOperation, InlineOperation, MergeOperation, MoveOperation, RenameOperation,
    SplitOperation,
};
pub use statement::{
    ExtractVariable, InlineVariable, IntroducePolymorphism, MergeConditional, RenameVariable,
    SplitConditional,
};

use crate::capability::{
    ClassLevelRefactoring, LeafMappingProvider, MemberLevelRefactoring, ModelLevelRefactoring,
    MoveBasedRefactoring, MultiClassRefactoring, MultiMemberRefactoring,
    MultiStatementRefactoring, PackageLevelRefactoring, Refactoring,
};
use crate::model::{UmlAttribute, UmlOperation};
use crate::refactoring_type::RefactoringType;
use crate::types::CodeRange;

// ============================================================================
// Helpers
// ============================================================================

/// Copy of `range` labeled with its role and the element it covers.
pub(crate) fn labeled(range: &CodeRange, description: &str, element: &dyn fmt::Display) -> CodeRange {
    range
        .clone()
        .with_description(description)
        .with_code_element(element.to_string())
}

/// `[a, b, c]` rendering used by multi-element descriptions.
pub(crate) fn bracketed<T: fmt::Display>(items: &[T]) -> String {
    let parts: Vec<String> = items.iter().map(|item| item.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

// ============================================================================
// DetectedRefactoring
// ============================================================================

macro_rules! detected_refactorings {
    ($( $variant:ident ),* $(,)?) => {
        /// Any confirmed refactoring.
        #[derive(Debug, Clone)]
        pub enum DetectedRefactoring {
            $( $variant($variant), )*
        }

        $(
            impl From<$variant> for DetectedRefactoring {
                fn from(refactoring: $variant) -> Self {
                    DetectedRefactoring::$variant(refactoring)
                }
            }
        )*

        impl DetectedRefactoring {
            fn inner(&self) -> &dyn Refactoring {
                match self {
                    $( DetectedRefactoring::$variant(r) => r, )*
                }
            }
        }
    };
}

detected_refactorings! {
    RenameClass,
    MoveClass,
    MoveAndRenameClass,
    ExtractClass,
    ExtractSuperclass,
    CollapseHierarchy,
    MergeClass,
    SplitClass,
    ReplaceAnonymousWithClass,
    RenamePackage,
    MoveSourceFolder,
    RenameOperation,
    MoveOperation,
    ExtractOperation,
    InlineOperation,
    MergeOperation,
    SplitOperation,
    MoveAttribute,
    MoveAndRenameAttribute,
    ReplaceAttribute,
    RenameAttribute,
    ExtractAttribute,
    MergeAttribute,
    ExtractVariable,
    InlineVariable,
    RenameVariable,
    SplitConditional,
    MergeConditional,
    IntroducePolymorphism,
}

impl From<PackageMove> for DetectedRefactoring {
    fn from(member: PackageMove) -> Self {
        match member {
            PackageMove::MoveClass(r) => r.into(),
            PackageMove::MoveAndRenameClass(r) => r.into(),
            PackageMove::MergeClass(r) => r.into(),
        }
    }
}

impl Refactoring for DetectedRefactoring {
    fn refactoring_type(&self) -> RefactoringType {
        self.inner().refactoring_type()
    }

    fn detail(&self) -> String {
        self.inner().detail()
    }

    fn class_name(&self) -> String {
        self.inner().class_name()
    }

    fn left_side(&self) -> Vec<CodeRange> {
        self.inner().left_side()
    }

    fn right_side(&self) -> Vec<CodeRange> {
        self.inner().right_side()
    }
}

impl fmt::Display for DetectedRefactoring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Operation-to-operation member projection.
pub type OperationLevel<'a> =
    &'a dyn MemberLevelRefactoring<Before = UmlOperation, After = UmlOperation>;

/// Attribute-to-attribute member projection.
pub type AttributeLevel<'a> =
    &'a dyn MemberLevelRefactoring<Before = UmlAttribute, After = UmlAttribute>;

/// Operation relocated between classes.
pub type OperationMove<'a> =
    &'a dyn MoveBasedRefactoring<Before = UmlOperation, After = UmlOperation>;

/// Attribute relocated between classes.
pub type AttributeMove<'a> =
    &'a dyn MoveBasedRefactoring<Before = UmlAttribute, After = UmlAttribute>;

/// Several operations on at least one side.
pub type MultiOperation<'a> = &'a dyn MultiMemberRefactoring<Member = UmlOperation>;

/// Several attributes on at least one side.
pub type MultiAttribute<'a> = &'a dyn MultiMemberRefactoring<Member = UmlAttribute>;

impl DetectedRefactoring {
    pub fn as_class_level(&self) -> Option<&dyn ClassLevelRefactoring> {
        match self {
            DetectedRefactoring::RenameClass(r) => Some(r),
            DetectedRefactoring::MoveClass(r) => Some(r),
            DetectedRefactoring::MoveAndRenameClass(r) => Some(r),
            DetectedRefactoring::ExtractClass(r) => Some(r),
            DetectedRefactoring::CollapseHierarchy(r) => Some(r),
            DetectedRefactoring::ReplaceAnonymousWithClass(r) => Some(r),
            DetectedRefactoring::ExtractAttribute(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_package_level(&self) -> Option<&dyn PackageLevelRefactoring> {
        match self {
            DetectedRefactoring::MoveClass(r) => Some(r),
            DetectedRefactoring::MoveAndRenameClass(r) => Some(r),
            DetectedRefactoring::MergeClass(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_model_level(&self) -> Option<&dyn ModelLevelRefactoring> {
        match self {
            DetectedRefactoring::RenamePackage(r) => Some(r),
            DetectedRefactoring::MoveSourceFolder(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_multi_class(&self) -> Option<&dyn MultiClassRefactoring> {
        match self {
            DetectedRefactoring::ExtractSuperclass(r) => Some(r),
            DetectedRefactoring::MergeClass(r) => Some(r),
            DetectedRefactoring::SplitClass(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_operation_level(&self) -> Option<OperationLevel<'_>> {
        match self {
            DetectedRefactoring::RenameOperation(r) => Some(r),
            DetectedRefactoring::MoveOperation(r) => Some(r),
            DetectedRefactoring::ExtractOperation(r) => Some(r),
            DetectedRefactoring::InlineOperation(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_attribute_level(&self) -> Option<AttributeLevel<'_>> {
        match self {
            DetectedRefactoring::MoveAttribute(r) => Some(r),
            DetectedRefactoring::MoveAndRenameAttribute(r) => Some(r),
            DetectedRefactoring::ReplaceAttribute(r) => Some(r),
            DetectedRefactoring::RenameAttribute(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_operation_move(&self) -> Option<OperationMove<'_>> {
        match self {
            DetectedRefactoring::MoveOperation(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_attribute_move(&self) -> Option<AttributeMove<'_>> {
        match self {
            DetectedRefactoring::MoveAttribute(r) => Some(r),
            DetectedRefactoring::MoveAndRenameAttribute(r) => Some(r),
            DetectedRefactoring::ReplaceAttribute(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_multi_operation(&self) -> Option<MultiOperation<'_>> {
        match self {
            DetectedRefactoring::MergeOperation(r) => Some(r),
            DetectedRefactoring::SplitOperation(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_multi_attribute(&self) -> Option<MultiAttribute<'_>> {
        match self {
            DetectedRefactoring::MergeAttribute(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_multi_statement(&self) -> Option<&dyn MultiStatementRefactoring> {
        match self {
            DetectedRefactoring::SplitConditional(r) => Some(r),
            DetectedRefactoring::MergeConditional(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_leaf_mapping_provider(&self) -> Option<&dyn LeafMappingProvider> {
        match self {
            DetectedRefactoring::ExtractOperation(r) => Some(r),
            DetectedRefactoring::ExtractAttribute(r) => Some(r),
            DetectedRefactoring::ExtractVariable(r) => Some(r),
            DetectedRefactoring::InlineVariable(r) => Some(r),
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SimpleBodyMapping, UmlClass};
    use std::sync::Arc;

    fn class(name: &str) -> Arc<UmlClass> {
        Arc::new(UmlClass::new("a", name, &format!("{}.java", name)))
    }

    #[test]
    fn display_is_canonical_description() {
        let r: DetectedRefactoring = RenameClass::new(class("Foo"), class("Bar")).into();
        assert_eq!(r.to_string(), "Rename Class\ta.Foo renamed to a.Bar");
        assert_eq!(r.name(), "Rename Class");
        assert_eq!(r.class_name(), "a.Bar");
    }

    #[test]
    fn projections_match_capabilities() {
        let move_class: DetectedRefactoring = MoveClass::new(class("Foo"), class("Foo")).into();
        assert!(move_class.as_class_level().is_some());
        assert!(move_class.as_package_level().is_some());
        assert!(move_class.as_operation_level().is_none());

        let op1 = UmlOperation::new("a.C", "f");
        let op2 = UmlOperation::new("a.C", "g");
        let rename: DetectedRefactoring =
            RenameOperation::new(Arc::new(SimpleBodyMapping::new(op1, op2))).into();
        let projected = rename.as_operation_level().unwrap();
        assert_eq!(projected.members_before(), vec![projected.member_before()]);
        assert_eq!(projected.member_after().name, "g");
        assert!(rename.as_class_level().is_none());
        assert!(rename.as_operation_move().is_none());
    }

    #[test]
    fn move_projections_expose_source_and_target() {
        let before = UmlOperation::new("a.Source", "f");
        let after = UmlOperation::new("a.Target", "f");
        let moved: DetectedRefactoring = MoveOperation::new(
            Arc::new(SimpleBodyMapping::new(before, after)),
            class("Source"),
            class("Target"),
        )
        .into();
        let projected = moved.as_operation_move().unwrap();
        assert_eq!(projected.source_class_name(), "a.Source");
        assert_eq!(projected.target_class_name(), "a.Target");
        assert!(moved.as_attribute_move().is_none());

        let attribute = MovedMember::new(
            Arc::new(UmlAttribute::new("a.Source", "x", "int")),
            Arc::new(UmlAttribute::new("a.Target", "x", "int")),
        );
        let moved: DetectedRefactoring =
            MoveAttribute::new(attribute, class("Source"), class("Target")).into();
        let projected = moved.as_attribute_move().unwrap();
        assert_eq!(projected.source_class_name(), "a.Source");
        assert_eq!(projected.member_after().name, "x");
        assert!(moved.as_operation_move().is_none());
    }

    #[test]
    fn multi_member_projections_expose_both_sides() {
        let merged: DetectedRefactoring = MergeOperation::new(
            vec![Arc::new(UmlOperation::new("a.C", "f")), Arc::new(UmlOperation::new("a.C", "g"))],
            Arc::new(UmlOperation::new("a.C", "fg")),
        )
        .into();
        let projected = merged.as_multi_operation().unwrap();
        assert_eq!(projected.original_members().len(), 2);
        assert_eq!(projected.next_members()[0].name, "fg");
        assert!(merged.as_multi_attribute().is_none());

        let split: DetectedRefactoring = SplitOperation::new(
            Arc::new(UmlOperation::new("a.C", "fg")),
            vec![Arc::new(UmlOperation::new("a.C", "f")), Arc::new(UmlOperation::new("a.C", "g"))],
        )
        .into();
        assert_eq!(split.as_multi_operation().unwrap().next_members().len(), 2);

        let merged: DetectedRefactoring = MergeAttribute::new(
            vec![
                Arc::new(UmlAttribute::new("a.C", "x", "int")),
                Arc::new(UmlAttribute::new("a.C", "y", "int")),
            ],
            Arc::new(UmlAttribute::new("a.C", "xy", "int")),
        )
        .into();
        let projected = merged.as_multi_attribute().unwrap();
        assert_eq!(projected.original_members()[1].name, "y");
        assert!(merged.as_multi_operation().is_none());
    }

    #[test]
    fn merge_class_is_package_level() {
        let merge: DetectedRefactoring = MergeClass::new(vec![class("A"), class("B")], class("C")).into();
        let projected = merge.as_package_level().unwrap();
        assert_eq!(projected.original_class_name(), "a.A");
        assert_eq!(projected.moved_class_name(), "a.C");
        assert!(merge.as_multi_class().is_some());
    }

    #[test]
    fn helpers_render_labels_and_lists() {
        let range = CodeRange::new("A.java", 1, 2, 3, 4);
        let labeled = labeled(&range, "original type declaration", &"a.A");
        assert_eq!(labeled.description.as_deref(), Some("original type declaration"));
        assert_eq!(labeled.code_element.as_deref(), Some("a.A"));
        assert_eq!(bracketed(&["x", "y"]), "[x, y]");
        assert_eq!(bracketed::<String>(&[]), "[]");
    }
}
