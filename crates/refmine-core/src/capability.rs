//! Capability projections over detected refactorings.
//!
//! A refactoring variant declares which of these narrow traits it satisfies.
//! Grouping and correlation code is written against the traits, not against
//! concrete variants:
//! - [`Refactoring`]: type, description, reported class, evidence ranges
//! - [`ClassLevelRefactoring`] / [`MultiClassRefactoring`]: classes before/after
//! - [`MemberLevelRefactoring`] / [`MultiMemberRefactoring`]: members before/after
//! - [`MoveBasedRefactoring`]: source and target class of a moved member
//! - [`PackageLevelRefactoring`] / [`ModelLevelRefactoring`]: package and folder moves
//! - [`MultiStatementRefactoring`] / [`LeafMappingProvider`]: statement evidence
//!
//! Single-element traits provide their collection views as default methods
//! computed from the single-element accessor, so the two views cannot diverge.

use std::fmt;

use crate::model::{CodeFragment, Declaration, LeafMapping, UmlClass};
use crate::refactoring_type::RefactoringType;
use crate::types::{CodeRange, RenamePattern};

/// A confirmed, typed refactoring.
pub trait Refactoring: fmt::Debug {
    /// The single type this refactoring reports in its current state.
    fn refactoring_type(&self) -> RefactoringType;

    /// Descriptive part of the canonical description (after the tab).
    fn detail(&self) -> String;

    /// Qualified name of the class the refactoring is reported against.
    fn class_name(&self) -> String;

    /// Evidence locations in the before snapshot.
    fn left_side(&self) -> Vec<CodeRange>;

    /// Evidence locations in the after snapshot.
    fn right_side(&self) -> Vec<CodeRange>;

    /// Display name of the reported type.
    fn name(&self) -> &'static str {
        self.refactoring_type().display_name()
    }

    /// Canonical `<DisplayName>\t<detail>` description.
    fn description(&self) -> String {
        format!("{}\t{}", self.name(), self.detail())
    }
}

/// Refactoring between one class before and one class after.
pub trait ClassLevelRefactoring: Refactoring {
    fn original_class(&self) -> &UmlClass;
    fn next_class(&self) -> &UmlClass;

    fn classes_before(&self) -> Vec<&UmlClass> {
        vec![self.original_class()]
    }

    fn classes_after(&self) -> Vec<&UmlClass> {
        vec![self.next_class()]
    }
}

/// Refactoring between one member before and one member after.
///
/// Before and after element types are independent associated types.
pub trait MemberLevelRefactoring: Refactoring {
    type Before: Declaration;
    type After: Declaration;

    fn member_before(&self) -> &Self::Before;
    fn member_after(&self) -> &Self::After;

    fn members_before(&self) -> Vec<&Self::Before> {
        vec![self.member_before()]
    }

    fn members_after(&self) -> Vec<&Self::After> {
        vec![self.member_after()]
    }
}

/// Member-level refactoring that relocates a member between classes.
pub trait MoveBasedRefactoring: MemberLevelRefactoring {
    fn source_class_name(&self) -> &str {
        self.member_before().class_name()
    }

    fn target_class_name(&self) -> &str {
        self.member_after().class_name()
    }
}

/// Class move whose package change can be grouped into a package rename.
pub trait PackageLevelRefactoring: Refactoring {
    fn original_class(&self) -> &UmlClass;
    fn moved_class(&self) -> &UmlClass;

    /// Package prefixes before and after, with the shared suffix stripped.
    fn rename_pattern(&self) -> RenamePattern {
        RenamePattern::from_qualified_names(&self.original_class().name, &self.moved_class().name)
    }

    fn original_class_name(&self) -> &str {
        &self.original_class().name
    }

    fn moved_class_name(&self) -> &str {
        &self.moved_class().name
    }
}

/// Aggregate over many class moves sharing one rename pattern.
pub trait ModelLevelRefactoring: Refactoring {
    fn pattern(&self) -> &RenamePattern;
    fn moved_class_pairs(&self) -> Vec<(&UmlClass, &UmlClass)>;
}

/// Refactoring between several classes before and/or after.
pub trait MultiClassRefactoring: Refactoring {
    fn original_classes(&self) -> Vec<&UmlClass>;
    fn next_classes(&self) -> Vec<&UmlClass>;
}

/// Refactoring between several members before and/or after.
pub trait MultiMemberRefactoring: Refactoring {
    type Member: Declaration;

    fn original_members(&self) -> Vec<&Self::Member>;
    fn next_members(&self) -> Vec<&Self::Member>;
}

/// Refactoring between several statements before and/or after.
pub trait MultiStatementRefactoring: Refactoring {
    fn fragments_before(&self) -> &[CodeFragment];
    fn fragments_after(&self) -> &[CodeFragment];
}

/// Exposes the statement mappings that justify a refactoring.
pub trait LeafMappingProvider {
    fn leaf_mappings(&self) -> &[LeafMapping];
}
