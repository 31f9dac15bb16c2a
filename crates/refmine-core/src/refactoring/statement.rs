//! Refactorings inside method bodies: variables, conditionals and
//! polymorphic dispatch.

use std::sync::Arc;

use crate::capability::{LeafMappingProvider, MultiStatementRefactoring, Refactoring};
use crate::model::{
    CodeFragment, LeafMapping, OperationInvocation, UmlClass, UmlOperation, VariableDeclaration,
};
use crate::refactoring::{bracketed, labeled};
use crate::refactoring_type::RefactoringType;
use crate::types::CodeRange;

// ============================================================================
// Variables
// ============================================================================

/// An expression extracted into a new local variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractVariable {
    variable: VariableDeclaration,
    operation_before: Arc<UmlOperation>,
    operation_after: Arc<UmlOperation>,
    mappings: Vec<LeafMapping>,
}

impl ExtractVariable {
    pub fn new(
        variable: VariableDeclaration,
        operation_before: Arc<UmlOperation>,
        operation_after: Arc<UmlOperation>,
    ) -> Self {
        ExtractVariable {
            variable,
            operation_before,
            operation_after,
            mappings: Vec::new(),
        }
    }

    /// Record a replaced occurrence of the extracted expression.
    pub fn with_mapping(mut self, mapping: LeafMapping) -> Self {
        self.mappings.push(mapping);
        self
    }

    pub fn variable(&self) -> &VariableDeclaration {
        &self.variable
    }
}

impl Refactoring for ExtractVariable {
    fn refactoring_type(&self) -> RefactoringType {
        RefactoringType::ExtractVariable
    }

    fn detail(&self) -> String {
        format!(
            "{} in method {} from class {}",
            self.variable, self.operation_after, self.operation_after.class_name
        )
    }

    fn class_name(&self) -> String {
        self.operation_after.class_name.clone()
    }

    fn left_side(&self) -> Vec<CodeRange> {
        let mut ranges: Vec<CodeRange> = self
            .mappings
            .iter()
            .map(|m| {
                m.fragment1
                    .location
                    .clone()
                    .with_description("statement with the initializer of the extracted variable")
            })
            .collect();
        ranges.push(labeled(
            &self.operation_before.location,
            "original method declaration",
            &self.operation_before,
        ));
        ranges
    }

    fn right_side(&self) -> Vec<CodeRange> {
        let mut ranges = vec![labeled(
            &self.variable.location,
            "extracted variable declaration",
            &self.variable,
        )];
        ranges.extend(self.mappings.iter().map(|m| {
            m.fragment2
                .location
                .clone()
                .with_description("statement with the name of the extracted variable")
        }));
        ranges.push(labeled(
            &self.operation_after.location,
            "method declaration with extracted variable",
            &self.operation_after,
        ));
        ranges
    }
}

impl LeafMappingProvider for ExtractVariable {
    fn leaf_mappings(&self) -> &[LeafMapping] {
        &self.mappings
    }
}

/// A local variable replaced by its initializer at each use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineVariable {
    variable: VariableDeclaration,
    operation_before: Arc<UmlOperation>,
    operation_after: Arc<UmlOperation>,
    mappings: Vec<LeafMapping>,
}

impl InlineVariable {
    pub fn new(
        variable: VariableDeclaration,
        operation_before: Arc<UmlOperation>,
        operation_after: Arc<UmlOperation>,
    ) -> Self {
        InlineVariable {
            variable,
            operation_before,
            operation_after,
            mappings: Vec::new(),
        }
    }

    /// Record a use site that now holds the inlined expression.
    pub fn with_mapping(mut self, mapping: LeafMapping) -> Self {
        self.mappings.push(mapping);
        self
    }
}

impl Refactoring for InlineVariable {
    fn refactoring_type(&self) -> RefactoringType {
        RefactoringType::InlineVariable
    }

    fn detail(&self) -> String {
        format!(
            "{} in method {} from class {}",
            self.variable, self.operation_before, self.operation_before.class_name
        )
    }

    fn class_name(&self) -> String {
        self.operation_before.class_name.clone()
    }

    fn left_side(&self) -> Vec<CodeRange> {
        let mut ranges = vec![labeled(
            &self.variable.location,
            "inlined variable declaration",
            &self.variable,
        )];
        ranges.extend(self.mappings.iter().map(|m| {
            m.fragment1
                .location
                .clone()
                .with_description("statement with the name of the inlined variable")
        }));
        ranges
    }

    fn right_side(&self) -> Vec<CodeRange> {
        let mut ranges: Vec<CodeRange> = self
            .mappings
            .iter()
            .map(|m| {
                m.fragment2
                    .location
                    .clone()
                    .with_description("statement with the initializer of the inlined variable")
            })
            .collect();
        ranges.push(labeled(
            &self.operation_after.location,
            "method declaration with inlined variable",
            &self.operation_after,
        ));
        ranges
    }
}

impl LeafMappingProvider for InlineVariable {
    fn leaf_mappings(&self) -> &[LeafMapping] {
        &self.mappings
    }
}

/// A local variable or parameter renamed.
///
/// Reported as Rename Parameter when both declarations are parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameVariable {
    original_variable: VariableDeclaration,
    renamed_variable: VariableDeclaration,
    operation_before: Arc<UmlOperation>,
    operation_after: Arc<UmlOperation>,
}

impl RenameVariable {
    pub fn new(
        original_variable: VariableDeclaration,
        renamed_variable: VariableDeclaration,
        operation_before: Arc<UmlOperation>,
        operation_after: Arc<UmlOperation>,
    ) -> Self {
        RenameVariable {
            original_variable,
            renamed_variable,
            operation_before,
            operation_after,
        }
    }

    pub fn operation_before(&self) -> &UmlOperation {
        &self.operation_before
    }
}

impl Refactoring for RenameVariable {
    fn refactoring_type(&self) -> RefactoringType {
        if self.original_variable.is_parameter && self.renamed_variable.is_parameter {
            RefactoringType::RenameParameter
        } else {
            RefactoringType::RenameVariable
        }
    }

    fn detail(&self) -> String {
        format!(
            "{} to {} in method {} from class {}",
            self.original_variable,
            self.renamed_variable,
            self.operation_after,
            self.operation_after.class_name
        )
    }

    fn class_name(&self) -> String {
        self.operation_after.class_name.clone()
    }

    fn left_side(&self) -> Vec<CodeRange> {
        vec![labeled(
            &self.original_variable.location,
            "original variable declaration",
            &self.original_variable,
        )]
    }

    fn right_side(&self) -> Vec<CodeRange> {
        vec![labeled(
            &self.renamed_variable.location,
            "renamed variable declaration",
            &self.renamed_variable,
        )]
    }
}

// ============================================================================
// Conditionals
// ============================================================================

/// One conditional split into several nested or sequential conditionals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitConditional {
    original_conditional: CodeFragment,
    split_conditionals: Vec<CodeFragment>,
    operation_before: Arc<UmlOperation>,
    operation_after: Arc<UmlOperation>,
}

impl SplitConditional {
    pub fn new(
        original_conditional: CodeFragment,
        split_conditionals: Vec<CodeFragment>,
        operation_before: Arc<UmlOperation>,
        operation_after: Arc<UmlOperation>,
    ) -> Self {
        SplitConditional {
            original_conditional,
            split_conditionals,
            operation_before,
            operation_after,
        }
    }

    pub fn operation_before(&self) -> &UmlOperation {
        &self.operation_before
    }
}

impl Refactoring for SplitConditional {
    fn refactoring_type(&self) -> RefactoringType {
        RefactoringType::SplitConditional
    }

    fn detail(&self) -> String {
        format!(
            "{} to {} in method {} from class {}",
            self.original_conditional,
            bracketed(&self.split_conditionals),
            self.operation_after,
            self.operation_after.class_name
        )
    }

    fn class_name(&self) -> String {
        self.operation_after.class_name.clone()
    }

    fn left_side(&self) -> Vec<CodeRange> {
        vec![self
            .original_conditional
            .location
            .clone()
            .with_description("original conditional")]
    }

    fn right_side(&self) -> Vec<CodeRange> {
        self.split_conditionals
            .iter()
            .map(|c| c.location.clone().with_description("split conditional"))
            .collect()
    }
}

impl MultiStatementRefactoring for SplitConditional {
    fn fragments_before(&self) -> &[CodeFragment] {
        std::slice::from_ref(&self.original_conditional)
    }

    fn fragments_after(&self) -> &[CodeFragment] {
        &self.split_conditionals
    }
}

/// Several conditionals merged into one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeConditional {
    merged_conditionals: Vec<CodeFragment>,
    new_conditional: CodeFragment,
    operation_before: Arc<UmlOperation>,
    operation_after: Arc<UmlOperation>,
}

impl MergeConditional {
    pub fn new(
        merged_conditionals: Vec<CodeFragment>,
        new_conditional: CodeFragment,
        operation_before: Arc<UmlOperation>,
        operation_after: Arc<UmlOperation>,
    ) -> Self {
        MergeConditional {
            merged_conditionals,
            new_conditional,
            operation_before,
            operation_after,
        }
    }

    pub fn operation_before(&self) -> &UmlOperation {
        &self.operation_before
    }
}

impl Refactoring for MergeConditional {
    fn refactoring_type(&self) -> RefactoringType {
        RefactoringType::MergeConditional
    }

    fn detail(&self) -> String {
        format!(
            "{} to {} in method {} from class {}",
            bracketed(&self.merged_conditionals),
            self.new_conditional,
            self.operation_after,
            self.operation_after.class_name
        )
    }

    fn class_name(&self) -> String {
        self.operation_after.class_name.clone()
    }

    fn left_side(&self) -> Vec<CodeRange> {
        self.merged_conditionals
            .iter()
            .map(|c| c.location.clone().with_description("merged conditional"))
            .collect()
    }

    fn right_side(&self) -> Vec<CodeRange> {
        vec![self
            .new_conditional
            .location
            .clone()
            .with_description("new conditional")]
    }
}

impl MultiStatementRefactoring for MergeConditional {
    fn fragments_before(&self) -> &[CodeFragment] {
        &self.merged_conditionals
    }

    fn fragments_after(&self) -> &[CodeFragment] {
        std::slice::from_ref(&self.new_conditional)
    }
}

// ============================================================================
// Polymorphism
// ============================================================================

/// A call in a client class now dispatched through a polymorphic hierarchy.
///
/// Records evidence only; it is independent of any rename or move of the
/// invoked member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntroducePolymorphism {
    client_class: Arc<UmlClass>,
    supplier_class: Arc<UmlClass>,
    invoked_call: OperationInvocation,
    invoking_operation: Arc<UmlOperation>,
}

impl IntroducePolymorphism {
    pub fn new(
        client_class: Arc<UmlClass>,
        supplier_class: Arc<UmlClass>,
        invoked_call: OperationInvocation,
        invoking_operation: Arc<UmlOperation>,
    ) -> Self {
        IntroducePolymorphism {
            client_class,
            supplier_class,
            invoked_call,
            invoking_operation,
        }
    }

    pub fn supplier_class(&self) -> &UmlClass {
        &self.supplier_class
    }

    pub fn invoked_call(&self) -> &OperationInvocation {
        &self.invoked_call
    }
}

impl Refactoring for IntroducePolymorphism {
    fn refactoring_type(&self) -> RefactoringType {
        RefactoringType::IntroducePolymorphism
    }

    fn detail(&self) -> String {
        format!(
            "{} in method {} dispatched to class {} in class {}",
            self.invoked_call, self.invoking_operation, self.supplier_class, self.client_class
        )
    }

    fn class_name(&self) -> String {
        self.client_class.name.clone()
    }

    fn left_side(&self) -> Vec<CodeRange> {
        vec![labeled(
            &self.invoking_operation.location,
            "invoking method declaration",
            &self.invoking_operation,
        )]
    }

    fn right_side(&self) -> Vec<CodeRange> {
        vec![
            labeled(
                &self.invoked_call.location,
                "polymorphic invocation",
                &self.invoked_call,
            ),
            labeled(
                &self.supplier_class.location,
                "supplier type declaration",
                &self.supplier_class,
            ),
        ]
    }
}

// ============================================================================
// Tests
// ============================================================================
