//! Attribute-level refactorings.
//!
//! Move-based attribute refactorings share [`MovedMember`], the
//! `(original, moved)` pair. Replace and move-and-rename also carry the
//! variable renames that justified pairing two differently named attributes.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::capability::{
    ClassLevelRefactoring, LeafMappingProvider, MemberLevelRefactoring, MoveBasedRefactoring,
    MultiMemberRefactoring, Refactoring,
};
use crate::model::{Declaration, LeafMapping, UmlAttribute, UmlClass};
use crate::refactoring::{bracketed, labeled};
use crate::refactoring_type::RefactoringType;
use crate::types::CodeRange;

// ============================================================================
// Shared Pieces
// ============================================================================

/// A member and its counterpart in another class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MovedMember<E: Declaration> {
    original: Arc<E>,
    moved: Arc<E>,
}

impl<E: Declaration> MovedMember<E> {
    pub fn new(original: Arc<E>, moved: Arc<E>) -> Self {
        MovedMember { original, moved }
    }

    pub fn original(&self) -> &E {
        &self.original
    }

    pub fn moved(&self) -> &E {
        &self.moved
    }

    pub fn source_class_name(&self) -> &str {
        self.original.class_name()
    }

    pub fn target_class_name(&self) -> &str {
        self.moved.class_name()
    }
}

/// A local rename observed in a method body that links an attribute to its
/// replacement.
///
/// Ordered so that evidence sets iterate deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidateAttributeRename {
    /// Name referenced before the change.
    pub original_name: String,
    /// Name referenced after the change.
    pub renamed_name: String,
    /// Operation containing the reference before.
    pub operation_before: String,
    /// Operation containing the reference after.
    pub operation_after: String,
}

impl CandidateAttributeRename {
    pub fn new(
        original_name: &str,
        renamed_name: &str,
        operation_before: &str,
        operation_after: &str,
    ) -> Self {
        CandidateAttributeRename {
            original_name: original_name.to_string(),
            renamed_name: renamed_name.to_string(),
            operation_before: operation_before.to_string(),
            operation_after: operation_after.to_string(),
        }
    }
}

impl fmt::Display for CandidateAttributeRename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} renamed to {} in {}",
            self.original_name, self.renamed_name, self.operation_after
        )
    }
}

fn attribute_side(attribute: &UmlAttribute, description: &str) -> Vec<CodeRange> {
    vec![labeled(&attribute.location, description, attribute)]
}

// ============================================================================
// Move / Pull Up / Push Down
// ============================================================================

/// An attribute moved to another class.
///
/// A move into a supertype is Pull Up Attribute, into a subtype Push Down
/// Attribute, otherwise Move Attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveAttribute {
    member: MovedMember<UmlAttribute>,
    source_class: Arc<UmlClass>,
    target_class: Arc<UmlClass>,
}

impl MoveAttribute {
    pub fn new(
        member: MovedMember<UmlAttribute>,
        source_class: Arc<UmlClass>,
        target_class: Arc<UmlClass>,
    ) -> Self {
        MoveAttribute {
            member,
            source_class,
            target_class,
        }
    }
}

impl Refactoring for MoveAttribute {
    fn refactoring_type(&self) -> RefactoringType {
        if self.source_class.is_sub_type_of(&self.target_class) {
            RefactoringType::PullUpAttribute
        } else if self.target_class.is_sub_type_of(&self.source_class) {
            RefactoringType::PushDownAttribute
        } else {
            RefactoringType::MoveAttribute
        }
    }

    fn detail(&self) -> String {
        format!(
            "{} from class {} to {} from class {}",
            self.member.original(),
            self.member.source_class_name(),
            self.member.moved(),
            self.member.target_class_name()
        )
    }

    fn class_name(&self) -> String {
        self.member.target_class_name().to_string()
    }

    fn left_side(&self) -> Vec<CodeRange> {
        attribute_side(self.member.original(), "original attribute declaration")
    }

    fn right_side(&self) -> Vec<CodeRange> {
        attribute_side(self.member.moved(), "moved attribute declaration")
    }
}

impl MemberLevelRefactoring for MoveAttribute {
    type Before = UmlAttribute;
    type After = UmlAttribute;

    fn member_before(&self) -> &UmlAttribute {
        self.member.original()
    }

    fn member_after(&self) -> &UmlAttribute {
        self.member.moved()
    }
}

impl MoveBasedRefactoring for MoveAttribute {}

// ============================================================================
// Move And Rename / Replace
// ============================================================================

/// An attribute moved to another class under a new name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveAndRenameAttribute {
    member: MovedMember<UmlAttribute>,
    attribute_renames: BTreeSet<CandidateAttributeRename>,
}

impl MoveAndRenameAttribute {
    pub fn new(
        member: MovedMember<UmlAttribute>,
        attribute_renames: BTreeSet<CandidateAttributeRename>,
    ) -> Self {
        MoveAndRenameAttribute {
            member,
            attribute_renames,
        }
    }

    pub fn attribute_renames(&self) -> &BTreeSet<CandidateAttributeRename> {
        &self.attribute_renames
    }
}

impl Refactoring for MoveAndRenameAttribute {
    fn refactoring_type(&self) -> RefactoringType {
        RefactoringType::MoveRenameAttribute
    }

    fn detail(&self) -> String {
        format!(
            "{} renamed to {} and moved from class {} to class {}",
            self.member.original(),
            self.member.moved(),
            self.member.source_class_name(),
            self.member.target_class_name()
        )
    }

    fn class_name(&self) -> String {
        self.member.target_class_name().to_string()
    }

    fn left_side(&self) -> Vec<CodeRange> {
        attribute_side(self.member.original(), "original attribute declaration")
    }

    fn right_side(&self) -> Vec<CodeRange> {
        attribute_side(self.member.moved(), "moved and renamed attribute declaration")
    }
}

impl MemberLevelRefactoring for MoveAndRenameAttribute {
    type Before = UmlAttribute;
    type After = UmlAttribute;

    fn member_before(&self) -> &UmlAttribute {
        self.member.original()
    }

    fn member_after(&self) -> &UmlAttribute {
        self.member.moved()
    }
}

impl MoveBasedRefactoring for MoveAndRenameAttribute {}

/// An attribute replaced by an existing attribute of another class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceAttribute {
    member: MovedMember<UmlAttribute>,
    attribute_renames: BTreeSet<CandidateAttributeRename>,
}

impl ReplaceAttribute {
    pub fn new(
        member: MovedMember<UmlAttribute>,
        attribute_renames: BTreeSet<CandidateAttributeRename>,
    ) -> Self {
        ReplaceAttribute {
            member,
            attribute_renames,
        }
    }

    pub fn attribute_renames(&self) -> &BTreeSet<CandidateAttributeRename> {
        &self.attribute_renames
    }
}

impl Refactoring for ReplaceAttribute {
    fn refactoring_type(&self) -> RefactoringType {
        RefactoringType::ReplaceAttribute
    }

    fn detail(&self) -> String {
        format!(
            "{} from class {} with {} from class {}",
            self.member.original(),
            self.member.source_class_name(),
            self.member.moved(),
            self.member.target_class_name()
        )
    }

    fn class_name(&self) -> String {
        self.member.target_class_name().to_string()
    }

    fn left_side(&self) -> Vec<CodeRange> {
        attribute_side(self.member.original(), "original attribute declaration")
    }

    fn right_side(&self) -> Vec<CodeRange> {
        attribute_side(self.member.moved(), "replaced attribute declaration")
    }
}

impl MemberLevelRefactoring for ReplaceAttribute {
    type Before = UmlAttribute;
    type After = UmlAttribute;

    fn member_before(&self) -> &UmlAttribute {
        self.member.original()
    }

    fn member_after(&self) -> &UmlAttribute {
        self.member.moved()
    }
}

impl MoveBasedRefactoring for ReplaceAttribute {}

// ============================================================================
// Rename / Extract / Merge
// ============================================================================

/// An attribute renamed within its class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameAttribute {
    original_attribute: Arc<UmlAttribute>,
    renamed_attribute: Arc<UmlAttribute>,
}

impl RenameAttribute {
    pub fn new(original_attribute: Arc<UmlAttribute>, renamed_attribute: Arc<UmlAttribute>) -> Self {
        RenameAttribute {
            original_attribute,
            renamed_attribute,
        }
    }
}

impl Refactoring for RenameAttribute {
    fn refactoring_type(&self) -> RefactoringType {
        RefactoringType::RenameAttribute
    }

    fn detail(&self) -> String {
        format!(
            "{} to {} in class {}",
            self.original_attribute, self.renamed_attribute, self.renamed_attribute.class_name
        )
    }

    fn class_name(&self) -> String {
        self.renamed_attribute.class_name.clone()
    }

    fn left_side(&self) -> Vec<CodeRange> {
        attribute_side(&self.original_attribute, "original attribute declaration")
    }

    fn right_side(&self) -> Vec<CodeRange> {
        attribute_side(&self.renamed_attribute, "renamed attribute declaration")
    }
}

impl MemberLevelRefactoring for RenameAttribute {
    type Before = UmlAttribute;
    type After = UmlAttribute;

    fn member_before(&self) -> &UmlAttribute {
        &self.original_attribute
    }

    fn member_after(&self) -> &UmlAttribute {
        &self.renamed_attribute
    }
}

/// An expression hoisted into a new attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractAttribute {
    attribute: Arc<UmlAttribute>,
    original_class: Arc<UmlClass>,
    next_class: Arc<UmlClass>,
    mappings: Vec<LeafMapping>,
}

impl ExtractAttribute {
    pub fn new(
        attribute: Arc<UmlAttribute>,
        original_class: Arc<UmlClass>,
        next_class: Arc<UmlClass>,
    ) -> Self {
        ExtractAttribute {
            attribute,
            original_class,
            next_class,
            mappings: Vec::new(),
        }
    }

    /// Record a replaced occurrence of the extracted expression.
    pub fn with_mapping(mut self, mapping: LeafMapping) -> Self {
        self.mappings.push(mapping);
        self
    }

    pub fn attribute(&self) -> &UmlAttribute {
        &self.attribute
    }
}

impl Refactoring for ExtractAttribute {
    fn refactoring_type(&self) -> RefactoringType {
        RefactoringType::ExtractAttribute
    }

    fn detail(&self) -> String {
        format!("{} in class {}", self.attribute, self.attribute.class_name)
    }

    fn class_name(&self) -> String {
        self.attribute.class_name.clone()
    }

    fn left_side(&self) -> Vec<CodeRange> {
        self.mappings
            .iter()
            .map(|m| {
                m.fragment1
                    .location
                    .clone()
                    .with_description("statement with the initializer of the extracted attribute")
            })
            .collect()
    }

    fn right_side(&self) -> Vec<CodeRange> {
        let mut ranges = attribute_side(&self.attribute, "extracted attribute declaration");
        ranges.extend(self.mappings.iter().map(|m| {
            m.fragment2
                .location
                .clone()
                .with_description("statement with the name of the extracted attribute")
        }));
        ranges
    }
}

impl ClassLevelRefactoring for ExtractAttribute {
    fn original_class(&self) -> &UmlClass {
        &self.original_class
    }

    fn next_class(&self) -> &UmlClass {
        &self.next_class
    }
}

impl LeafMappingProvider for ExtractAttribute {
    fn leaf_mappings(&self) -> &[LeafMapping] {
        &self.mappings
    }
}

/// Several attributes merged into one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeAttribute {
    merged_attributes: Vec<Arc<UmlAttribute>>,
    new_attribute: Arc<UmlAttribute>,
}

impl MergeAttribute {
    pub fn new(merged_attributes: Vec<Arc<UmlAttribute>>, new_attribute: Arc<UmlAttribute>) -> Self {
        MergeAttribute {
            merged_attributes,
            new_attribute,
        }
    }
}

impl Refactoring for MergeAttribute {
    fn refactoring_type(&self) -> RefactoringType {
        RefactoringType::MergeAttribute
    }

    fn detail(&self) -> String {
        format!(
            "{} to {} in class {}",
            bracketed(&self.merged_attributes),
            self.new_attribute,
            self.new_attribute.class_name
        )
    }

    fn class_name(&self) -> String {
        self.new_attribute.class_name.clone()
    }

    fn left_side(&self) -> Vec<CodeRange> {
        self.merged_attributes
            .iter()
            .map(|a| labeled(&a.location, "merged attribute declaration", a))
            .collect()
    }

    fn right_side(&self) -> Vec<CodeRange> {
        attribute_side(&self.new_attribute, "new attribute declaration")
    }
}

impl MultiMemberRefactoring for MergeAttribute {
    type Member = UmlAttribute;

    fn original_members(&self) -> Vec<&UmlAttribute> {
        self.merged_attributes.iter().map(|a| a.as_ref()).collect()
    }

    fn next_members(&self) -> Vec<&UmlAttribute> {
        vec![self.new_attribute.as_ref()]
    }
}

// ============================================================================
// Tests
// ============================================================================
