//! Method-level refactorings.
//!
//! Rename, move, extract and inline are confirmed from a statement-level
//! [`BodyMapping`]. They keep the mapping and read their endpoint operations
//! and class names from it, so there is a single source for that state.

use std::sync::Arc;

use crate::capability::{
    LeafMappingProvider, MemberLevelRefactoring, MoveBasedRefactoring, MultiMemberRefactoring,
    Refactoring,
};
use crate::model::{BodyMapping, LeafMapping, OperationInvocation, UmlClass, UmlOperation};
use crate::refactoring::{bracketed, labeled};
use crate::refactoring_type::RefactoringType;
use crate::types::CodeRange;

// ============================================================================
// Rename / Move
// ============================================================================

/// An operation renamed within its class.
#[derive(Debug, Clone)]
pub struct RenameOperation {
    mapping: Arc<dyn BodyMapping>,
}

impl RenameOperation {
    pub fn new(mapping: Arc<dyn BodyMapping>) -> Self {
        RenameOperation { mapping }
    }

    pub fn body_mapping(&self) -> &dyn BodyMapping {
        self.mapping.as_ref()
    }
}

impl Refactoring for RenameOperation {
    fn refactoring_type(&self) -> RefactoringType {
        RefactoringType::RenameMethod
    }

    fn detail(&self) -> String {
        format!(
            "{} renamed to {} in class {}",
            self.mapping.operation1(),
            self.mapping.operation2(),
            self.mapping.class_name2()
        )
    }

    fn class_name(&self) -> String {
        self.mapping.class_name2().to_string()
    }

    fn left_side(&self) -> Vec<CodeRange> {
        let original = self.mapping.operation1();
        vec![labeled(&original.location, "original method declaration", original)]
    }

    fn right_side(&self) -> Vec<CodeRange> {
        let renamed = self.mapping.operation2();
        vec![labeled(&renamed.location, "renamed method declaration", renamed)]
    }
}

impl MemberLevelRefactoring for RenameOperation {
    type Before = UmlOperation;
    type After = UmlOperation;

    fn member_before(&self) -> &UmlOperation {
        self.mapping.operation1()
    }

    fn member_after(&self) -> &UmlOperation {
        self.mapping.operation2()
    }
}

/// An operation moved to another class.
///
/// The reported type follows the class relation: a move into a supertype is
/// Pull Up Method, a move into a subtype is Push Down Method, and an
/// unrelated move is Move Method or Move And Rename Method depending on
/// whether the name changed.
#[derive(Debug, Clone)]
pub struct MoveOperation {
    mapping: Arc<dyn BodyMapping>,
    source_class: Arc<UmlClass>,
    target_class: Arc<UmlClass>,
}

impl MoveOperation {
    pub fn new(
        mapping: Arc<dyn BodyMapping>,
        source_class: Arc<UmlClass>,
        target_class: Arc<UmlClass>,
    ) -> Self {
        MoveOperation {
            mapping,
            source_class,
            target_class,
        }
    }

    pub fn body_mapping(&self) -> &dyn BodyMapping {
        self.mapping.as_ref()
    }
}

impl Refactoring for MoveOperation {
    fn refactoring_type(&self) -> RefactoringType {
        if self.source_class.is_sub_type_of(&self.target_class) {
            RefactoringType::PullUpOperation
        } else if self.target_class.is_sub_type_of(&self.source_class) {
            RefactoringType::PushDownOperation
        } else if self.mapping.operation1().name != self.mapping.operation2().name {
            RefactoringType::MoveAndRenameOperation
        } else {
            RefactoringType::MoveOperation
        }
    }

    fn detail(&self) -> String {
        format!(
            "{} from class {} to {} from class {}",
            self.mapping.operation1(),
            self.mapping.class_name1(),
            self.mapping.operation2(),
            self.mapping.class_name2()
        )
    }

    fn class_name(&self) -> String {
        self.mapping.class_name2().to_string()
    }

    fn left_side(&self) -> Vec<CodeRange> {
        let original = self.mapping.operation1();
        vec![labeled(&original.location, "original method declaration", original)]
    }

    fn right_side(&self) -> Vec<CodeRange> {
        let moved = self.mapping.operation2();
        vec![labeled(&moved.location, "moved method declaration", moved)]
    }
}

impl MemberLevelRefactoring for MoveOperation {
    type Before = UmlOperation;
    type After = UmlOperation;

    fn member_before(&self) -> &UmlOperation {
        self.mapping.operation1()
    }

    fn member_after(&self) -> &UmlOperation {
        self.mapping.operation2()
    }
}

impl MoveBasedRefactoring for MoveOperation {}

// ============================================================================
// Extract / Inline
// ============================================================================

/// Statements of a source operation extracted into a new operation.
///
/// The mapping relates the source operation before extraction (side 1) to
/// the extracted operation (side 2). When the extracted operation lives in a
/// different class than the source operation after extraction, the
/// refactoring is reported as Extract And Move Method.
#[derive(Debug, Clone)]
pub struct ExtractOperation {
    mapping: Arc<dyn BodyMapping>,
    source_operation_after: Arc<UmlOperation>,
    invocations: Vec<OperationInvocation>,
}

impl ExtractOperation {
    pub fn new(
        mapping: Arc<dyn BodyMapping>,
        source_operation_after: Arc<UmlOperation>,
        invocations: Vec<OperationInvocation>,
    ) -> Self {
        ExtractOperation {
            mapping,
            source_operation_after,
            invocations,
        }
    }

    pub fn source_operation_before(&self) -> &UmlOperation {
        self.mapping.operation1()
    }

    pub fn source_operation_after(&self) -> &UmlOperation {
        &self.source_operation_after
    }

    pub fn extracted_operation(&self) -> &UmlOperation {
        self.mapping.operation2()
    }

    /// Calls to the extracted operation inside the source operation.
    pub fn invocations(&self) -> &[OperationInvocation] {
        &self.invocations
    }

    /// Range covering every extracted statement in the source operation.
    pub fn extracted_code_range_from_source(&self) -> Option<CodeRange> {
        CodeRange::compute_range(self.mapping.mappings().iter().map(|m| &m.fragment1.location))
    }

    fn is_moved(&self) -> bool {
        self.source_operation_after.class_name != self.extracted_operation().class_name
    }
}

impl Refactoring for ExtractOperation {
    fn refactoring_type(&self) -> RefactoringType {
        if self.is_moved() {
            RefactoringType::ExtractAndMoveOperation
        } else {
            RefactoringType::ExtractOperation
        }
    }

    fn detail(&self) -> String {
        let mut detail = format!(
            "{} extracted from {} in class {}",
            self.extracted_operation(),
            self.source_operation_before(),
            self.class_name()
        );
        if self.is_moved() {
            detail.push_str(" & moved to class ");
            detail.push_str(&self.extracted_operation().class_name);
        }
        detail
    }

    fn class_name(&self) -> String {
        if self.is_moved() {
            self.source_operation_before().class_name.clone()
        } else {
            self.source_operation_after.class_name.clone()
        }
    }

    fn left_side(&self) -> Vec<CodeRange> {
        let source = self.source_operation_before();
        let mut ranges = vec![labeled(
            &source.location,
            "source method declaration before extraction",
            source,
        )];
        for mapping in self.mapping.mappings() {
            ranges.push(
                mapping
                    .fragment1
                    .location
                    .clone()
                    .with_description("extracted code from source method declaration"),
            );
        }
        ranges
    }

    fn right_side(&self) -> Vec<CodeRange> {
        let extracted = self.extracted_operation();
        let mut ranges = vec![labeled(
            &extracted.location,
            "extracted method declaration",
            extracted,
        )];
        for mapping in self.mapping.mappings() {
            ranges.push(
                mapping
                    .fragment2
                    .location
                    .clone()
                    .with_description("extracted code to extracted method declaration"),
            );
        }
        ranges.push(labeled(
            &self.source_operation_after.location,
            "source method declaration after extraction",
            &self.source_operation_after,
        ));
        for invocation in &self.invocations {
            ranges.push(labeled(
                &invocation.location,
                "extracted method invocation",
                invocation,
            ));
        }
        for fragment in self.mapping.non_mapped_fragments2() {
            ranges.push(
                fragment
                    .location
                    .clone()
                    .with_description("added statement in extracted method declaration"),
            );
        }
        ranges
    }
}

impl MemberLevelRefactoring for ExtractOperation {
    type Before = UmlOperation;
    type After = UmlOperation;

    fn member_before(&self) -> &UmlOperation {
        self.source_operation_before()
    }

    fn member_after(&self) -> &UmlOperation {
        self.extracted_operation()
    }
}

impl LeafMappingProvider for ExtractOperation {
    fn leaf_mappings(&self) -> &[LeafMapping] {
        self.mapping.mappings()
    }
}

/// An operation whose body was inlined into a caller.
///
/// The mapping relates the inlined operation (side 1) to the target
/// operation after inlining (side 2).
#[derive(Debug, Clone)]
pub struct InlineOperation {
    mapping: Arc<dyn BodyMapping>,
    target_operation_before: Arc<UmlOperation>,
    invocations: Vec<OperationInvocation>,
}

impl InlineOperation {
    pub fn new(
        mapping: Arc<dyn BodyMapping>,
        target_operation_before: Arc<UmlOperation>,
        invocations: Vec<OperationInvocation>,
    ) -> Self {
        InlineOperation {
            mapping,
            target_operation_before,
            invocations,
        }
    }

    pub fn inlined_operation(&self) -> &UmlOperation {
        self.mapping.operation1()
    }

    pub fn target_operation_before(&self) -> &UmlOperation {
        &self.target_operation_before
    }

    pub fn target_operation_after(&self) -> &UmlOperation {
        self.mapping.operation2()
    }

    fn is_moved(&self) -> bool {
        self.target_operation_before.class_name != self.inlined_operation().class_name
    }
}

impl Refactoring for InlineOperation {
    fn refactoring_type(&self) -> RefactoringType {
        if self.is_moved() {
            RefactoringType::MoveAndInlineOperation
        } else {
            RefactoringType::InlineOperation
        }
    }

    fn detail(&self) -> String {
        let inlined = self.inlined_operation();
        let target = self.target_operation_after();
        if self.is_moved() {
            format!(
                "{} moved from class {} to class {} & inlined to {}",
                inlined, inlined.class_name, target.class_name, target
            )
        } else {
            format!("{} inlined to {} in class {}", inlined, target, target.class_name)
        }
    }

    fn class_name(&self) -> String {
        self.target_operation_after().class_name.clone()
    }

    fn left_side(&self) -> Vec<CodeRange> {
        let inlined = self.inlined_operation();
        let mut ranges = vec![labeled(&inlined.location, "inlined method declaration", inlined)];
        for mapping in self.mapping.mappings() {
            ranges.push(
                mapping
                    .fragment1
                    .location
                    .clone()
                    .with_description("inlined code from inlined method declaration"),
            );
        }
        ranges.push(labeled(
            &self.target_operation_before.location,
            "target method declaration before inline",
            &self.target_operation_before,
        ));
        for invocation in &self.invocations {
            ranges.push(labeled(&invocation.location, "inlined method invocation", invocation));
        }
        ranges
    }

    fn right_side(&self) -> Vec<CodeRange> {
        let target = self.target_operation_after();
        let mut ranges = vec![labeled(
            &target.location,
            "target method declaration after inline",
            target,
        )];
        for mapping in self.mapping.mappings() {
            ranges.push(
                mapping
                    .fragment2
                    .location
                    .clone()
                    .with_description("inlined code in target method declaration"),
            );
        }
        ranges
    }
}

impl MemberLevelRefactoring for InlineOperation {
    type Before = UmlOperation;
    type After = UmlOperation;

    fn member_before(&self) -> &UmlOperation {
        self.inlined_operation()
    }

    fn member_after(&self) -> &UmlOperation {
        self.target_operation_after()
    }
}

// ============================================================================
// Merge / Split
// ============================================================================

/// Several operations merged into one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOperation {
    merged_operations: Vec<Arc<UmlOperation>>,
    new_operation: Arc<UmlOperation>,
}

impl MergeOperation {
    pub fn new(merged_operations: Vec<Arc<UmlOperation>>, new_operation: Arc<UmlOperation>) -> Self {
        MergeOperation {
            merged_operations,
            new_operation,
        }
    }
}

impl Refactoring for MergeOperation {
    fn refactoring_type(&self) -> RefactoringType {
        RefactoringType::MergeOperation
    }

    fn detail(&self) -> String {
        format!(
            "{} to {} in class {}",
            bracketed(&self.merged_operations),
            self.new_operation,
            self.new_operation.class_name
        )
    }

    fn class_name(&self) -> String {
        self.new_operation.class_name.clone()
    }

    fn left_side(&self) -> Vec<CodeRange> {
        self.merged_operations
            .iter()
            .map(|op| labeled(&op.location, "merged method declaration", op))
            .collect()
    }

    fn right_side(&self) -> Vec<CodeRange> {
        vec![labeled(
            &self.new_operation.location,
            "new method declaration",
            &self.new_operation,
        )]
    }
}

impl MultiMemberRefactoring for MergeOperation {
    type Member = UmlOperation;

    fn original_members(&self) -> Vec<&UmlOperation> {
        self.merged_operations.iter().map(|op| op.as_ref()).collect()
    }

    fn next_members(&self) -> Vec<&UmlOperation> {
        vec![self.new_operation.as_ref()]
    }
}

/// One operation split into several.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOperation {
    original_operation: Arc<UmlOperation>,
    split_operations: Vec<Arc<UmlOperation>>,
}

impl SplitOperation {
    pub fn new(original_operation: Arc<UmlOperation>, split_operations: Vec<Arc<UmlOperation>>) -> Self {
        SplitOperation {
            original_operation,
            split_operations,
        }
    }
}

impl Refactoring for SplitOperation {
    fn refactoring_type(&self) -> RefactoringType {
        RefactoringType::SplitOperation
    }

    fn detail(&self) -> String {
        format!(
            "{} to {} in class {}",
            self.original_operation,
            bracketed(&self.split_operations),
            self.original_operation.class_name
        )
    }

    fn class_name(&self) -> String {
        self.original_operation.class_name.clone()
    }

    fn left_side(&self) -> Vec<CodeRange> {
        vec![labeled(
            &self.original_operation.location,
            "original method declaration",
            &self.original_operation,
        )]
    }

    fn right_side(&self) -> Vec<CodeRange> {
        self.split_operations
            .iter()
            .map(|op| labeled(&op.location, "split method declaration", op))
            .collect()
    }
}

impl MultiMemberRefactoring for SplitOperation {
    type Member = UmlOperation;

    fn original_members(&self) -> Vec<&UmlOperation> {
        vec![self.original_operation.as_ref()]
    }

    fn next_members(&self) -> Vec<&UmlOperation> {
        self.split_operations.iter().map(|op| op.as_ref()).collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
