//! Structural model types and the seams to external collaborators.
//!
//! This module defines the value types the model layer fills in for each
//! snapshot (classes, operations, attributes, variables, invocations, code
//! fragments), along with the traits through which the core consumes work it
//! does not perform itself.
//!
//! # Architecture
//!
//! The model layer parses source and produces these types; the core never
//! parses. Model elements are immutable once built and are shared between
//! refactorings through `Arc`, so a single operation can appear as evidence in
//! several refactorings without copying.
//!
//! External seams:
//! - [`BodyMapping`]: opaque statement-level mapping between two method bodies
//! - [`ClassDistance`]: normalized name and package distances between classes
//! - [`Declaration`]: the common accessor set of operations and attributes
//!
//! # Equality
//!
//! Operations and attributes compare by declared signature, not by location.
//! Two `UmlOperation`s with the same owning class, name, visibility,
//! abstractness and parameter types are equal even if they were read from
//! different snapshots. This is what call-tree containment relies on.
//!
//! ## Example
//!
//! ```
//! use refmine_core::model::{UmlClass, UmlOperation};
//!
//! let class = UmlClass::new("com.acme", "Parser", "src/com/acme/Parser.java");
//! let before = UmlOperation::new(&class.name, "parse").with_parameter("input", "String");
//! let after = UmlOperation::new(&class.name, "parse")
//!     .with_parameter("input", "String")
//!     .with_location(refmine_core::types::CodeRange::new("src/com/acme/Parser.java", 40, 52, 5, 6));
//!
//! assert_eq!(before, after);
//! assert_eq!(class.non_qualified_name(), "Parser");
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::types::CodeRange;

// ============================================================================
// Visibility
// ============================================================================

/// Declared access level of a class member.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Package,
    Private,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Protected => write!(f, "protected"),
            Visibility::Package => write!(f, "package"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

// ============================================================================
// Declaration Trait
// ============================================================================

/// Common accessors of declarations that live inside a class.
///
/// Member-level refactorings are generic over this trait so that the same
/// move/rename machinery serves operations and attributes.
pub trait Declaration: fmt::Display + fmt::Debug {
    /// Simple name of the declaration.
    fn name(&self) -> &str;
    /// Qualified name of the owning class.
    fn class_name(&self) -> &str;
    /// Source location of the declaration.
    fn location(&self) -> &CodeRange;
}

// ============================================================================
// Classes
// ============================================================================

/// A class, interface or anonymous class in one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UmlClass {
    /// Qualified name (`com.acme.Outer.Inner` for nested classes).
    pub name: String,
    /// Package the class is declared in.
    pub package_name: String,
    /// Repository-relative path of the declaring file.
    pub source_file: String,
    /// True for interfaces.
    pub is_interface: bool,
    /// True for classes declared directly in a compilation unit.
    pub is_top_level: bool,
    /// Declared superclass type, if any.
    pub superclass: Option<String>,
    /// Declared interface types.
    pub implemented_interfaces: Vec<String>,
    /// Location of the declaration.
    pub location: CodeRange,
}

impl UmlClass {
    /// Create a top-level class `package_name.simple_name`.
    pub fn new(package_name: &str, simple_name: &str, source_file: &str) -> Self {
        let name = if package_name.is_empty() {
            simple_name.to_string()
        } else {
            format!("{}.{}", package_name, simple_name)
        };
        UmlClass {
            name,
            package_name: package_name.to_string(),
            source_file: source_file.to_string(),
            is_interface: false,
            is_top_level: true,
            superclass: None,
            implemented_interfaces: Vec::new(),
            location: CodeRange::new(source_file, 1, 1, 1, 1),
        }
    }

    /// Create a class nested inside `outer`, declared in the same file.
    pub fn nested_in(outer: &UmlClass, simple_name: &str) -> Self {
        UmlClass {
            name: format!("{}.{}", outer.name, simple_name),
            package_name: outer.package_name.clone(),
            source_file: outer.source_file.clone(),
            is_interface: false,
            is_top_level: false,
            superclass: None,
            implemented_interfaces: Vec::new(),
            location: outer.location.clone(),
        }
    }

    /// Mark the class as an interface.
    pub fn as_interface(mut self) -> Self {
        self.is_interface = true;
        self
    }

    /// Set the declared superclass.
    pub fn with_superclass(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    /// Add an implemented interface.
    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.implemented_interfaces.push(interface.into());
        self
    }

    /// Set the declaration location.
    pub fn with_location(mut self, location: CodeRange) -> Self {
        self.location = location;
        self
    }

    /// Name after the last `.`.
    pub fn non_qualified_name(&self) -> &str {
        match self.name.rfind('.') {
            Some(idx) => &self.name[idx + 1..],
            None => &self.name,
        }
    }

    /// Check whether this class names `other` as its superclass or as one of
    /// its interfaces.
    ///
    /// Declared types may be simple or qualified, so a type matches when it is
    /// the full name of `other` or a dotted suffix of it.
    pub fn is_sub_type_of(&self, other: &UmlClass) -> bool {
        let names = |declared: &str| {
            other.name == declared || other.name.ends_with(&format!(".{}", declared))
        };
        self.superclass.as_deref().is_some_and(|s| names(s))
            || self.implemented_interfaces.iter().any(|i| names(i))
    }
}

impl fmt::Display for UmlClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

// ============================================================================
// Operations
// ============================================================================

/// A declared parameter of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UmlParameter {
    /// Parameter name.
    pub name: String,
    /// Declared type, as written.
    pub type_name: String,
}

impl fmt::Display for UmlParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.type_name)
    }
}

/// A method or constructor in one snapshot.
///
/// Equality, hashing and ordering use the declared signature only (owning
/// class, name, visibility, abstractness, parameter types); parameter names,
/// return type and location are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UmlOperation {
    /// Simple name.
    pub name: String,
    /// Qualified name of the owning class.
    pub class_name: String,
    /// Declared access level.
    pub visibility: Visibility,
    /// True for abstract operations.
    pub is_abstract: bool,
    /// True for static operations.
    pub is_static: bool,
    /// True for constructors.
    pub is_constructor: bool,
    /// Declared parameters, in order.
    pub parameters: Vec<UmlParameter>,
    /// Declared return type; `None` for constructors and `void`.
    pub return_type: Option<String>,
    /// Location of the declaration.
    pub location: CodeRange,
}

impl UmlOperation {
    /// Create a public, parameterless operation.
    pub fn new(class_name: &str, name: &str) -> Self {
        UmlOperation {
            name: name.to_string(),
            class_name: class_name.to_string(),
            visibility: Visibility::Public,
            is_abstract: false,
            is_static: false,
            is_constructor: false,
            parameters: Vec::new(),
            return_type: None,
            location: CodeRange::new("", 0, 0, 0, 0),
        }
    }

    /// Append a parameter.
    pub fn with_parameter(mut self, name: &str, type_name: &str) -> Self {
        self.parameters.push(UmlParameter {
            name: name.to_string(),
            type_name: type_name.to_string(),
        });
        self
    }

    /// Set the return type.
    pub fn returning(mut self, type_name: &str) -> Self {
        self.return_type = Some(type_name.to_string());
        self
    }

    /// Set the visibility.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Mark the operation abstract.
    pub fn as_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Set the declaration location.
    pub fn with_location(mut self, location: CodeRange) -> Self {
        self.location = location;
        self
    }

    /// Declared parameter types, in order.
    pub fn parameter_types(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(|p| p.type_name.as_str())
    }

    fn signature_key(&self) -> (&str, &str, Visibility, bool) {
        (&self.class_name, &self.name, self.visibility, self.is_abstract)
    }

    /// Check whether two operations share name and parameter types, ignoring
    /// the owning class.
    pub fn equal_signature(&self, other: &UmlOperation) -> bool {
        self.name == other.name && self.parameter_types().eq(other.parameter_types())
    }
}

impl PartialEq for UmlOperation {
    fn eq(&self, other: &Self) -> bool {
        self.signature_key() == other.signature_key()
            && self.parameter_types().eq(other.parameter_types())
    }
}

impl Eq for UmlOperation {}

impl Hash for UmlOperation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.signature_key().hash(state);
        for type_name in self.parameter_types() {
            type_name.hash(state);
        }
    }
}

impl PartialOrd for UmlOperation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UmlOperation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.signature_key()
            .cmp(&other.signature_key())
            .then_with(|| self.parameter_types().cmp(other.parameter_types()))
    }
}

impl fmt::Display for UmlOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.visibility)?;
        if self.is_abstract {
            write!(f, "abstract ")?;
        }
        write!(f, "{}(", self.name)?;
        for (i, param) in self.parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", param)?;
        }
        write!(f, ")")?;
        if let Some(ret) = &self.return_type {
            write!(f, " : {}", ret)?;
        }
        Ok(())
    }
}

impl Declaration for UmlOperation {
    fn name(&self) -> &str {
        &self.name
    }

    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn location(&self) -> &CodeRange {
        &self.location
    }
}

// ============================================================================
// Attributes
// ============================================================================

/// A field in one snapshot.
///
/// Equality and hashing use owning class, name, type and visibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UmlAttribute {
    /// Field name.
    pub name: String,
    /// Declared type.
    pub type_name: String,
    /// Qualified name of the owning class.
    pub class_name: String,
    /// Declared access level.
    pub visibility: Visibility,
    /// True for static fields.
    pub is_static: bool,
    /// Location of the declaration.
    pub location: CodeRange,
}

impl UmlAttribute {
    /// Create a private field.
    pub fn new(class_name: &str, name: &str, type_name: &str) -> Self {
        UmlAttribute {
            name: name.to_string(),
            type_name: type_name.to_string(),
            class_name: class_name.to_string(),
            visibility: Visibility::Private,
            is_static: false,
            location: CodeRange::new("", 0, 0, 0, 0),
        }
    }

    /// Set the visibility.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Set the declaration location.
    pub fn with_location(mut self, location: CodeRange) -> Self {
        self.location = location;
        self
    }

    fn key(&self) -> (&str, &str, &str, Visibility) {
        (&self.class_name, &self.name, &self.type_name, self.visibility)
    }
}

impl PartialEq for UmlAttribute {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for UmlAttribute {}

impl Hash for UmlAttribute {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for UmlAttribute {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UmlAttribute {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for UmlAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} : {}", self.visibility, self.name, self.type_name)
    }
}

impl Declaration for UmlAttribute {
    fn name(&self) -> &str {
        &self.name
    }

    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn location(&self) -> &CodeRange {
        &self.location
    }
}

// ============================================================================
// Statement-Level Elements
// ============================================================================

/// A local variable or parameter declaration inside an operation body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariableDeclaration {
    /// Variable name.
    pub name: String,
    /// Declared type.
    pub type_name: String,
    /// True when the declaration is a method parameter.
    pub is_parameter: bool,
    /// Location of the declaration.
    pub location: CodeRange,
}

impl VariableDeclaration {
    /// Create a local variable declaration.
    pub fn local(name: &str, type_name: &str, location: CodeRange) -> Self {
        VariableDeclaration {
            name: name.to_string(),
            type_name: type_name.to_string(),
            is_parameter: false,
            location,
        }
    }

    /// Create a parameter declaration.
    pub fn parameter(name: &str, type_name: &str, location: CodeRange) -> Self {
        VariableDeclaration {
            is_parameter: true,
            ..VariableDeclaration::local(name, type_name, location)
        }
    }
}

impl fmt::Display for VariableDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.name, self.type_name)
    }
}

/// A call expression found in an operation body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationInvocation {
    /// Name of the invoked method.
    pub method_name: String,
    /// Receiver expression, if any.
    pub expression: Option<String>,
    /// Argument expressions, as written.
    pub arguments: Vec<String>,
    /// Location of the call.
    pub location: CodeRange,
}

impl OperationInvocation {
    /// Create an invocation without a receiver.
    pub fn new(method_name: &str, arguments: &[&str], location: CodeRange) -> Self {
        OperationInvocation {
            method_name: method_name.to_string(),
            expression: None,
            arguments: arguments.iter().map(|a| a.to_string()).collect(),
            location,
        }
    }

    /// Set the receiver expression.
    pub fn on(mut self, expression: &str) -> Self {
        self.expression = Some(expression.to_string());
        self
    }
}

impl fmt::Display for OperationInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(expr) = &self.expression {
            write!(f, "{}.", expr)?;
        }
        write!(f, "{}({})", self.method_name, self.arguments.join(", "))
    }
}

/// A statement or expression of an operation body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodeFragment {
    /// Source text of the fragment.
    pub text: String,
    /// Location of the fragment.
    pub location: CodeRange,
}

impl CodeFragment {
    /// Create a fragment.
    pub fn new(text: &str, location: CodeRange) -> Self {
        CodeFragment {
            text: text.to_string(),
            location,
        }
    }
}

impl fmt::Display for CodeFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A matched pair of fragments, before and after.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeafMapping {
    pub fragment1: CodeFragment,
    pub fragment2: CodeFragment,
}

impl LeafMapping {
    /// Create a mapping.
    pub fn new(fragment1: CodeFragment, fragment2: CodeFragment) -> Self {
        LeafMapping {
            fragment1,
            fragment2,
        }
    }

    /// True when both sides have identical text.
    pub fn is_exact(&self) -> bool {
        self.fragment1.text == self.fragment2.text
    }
}

// ============================================================================
// External Seams
// ============================================================================

/// Statement-level mapping between two operation bodies.
///
/// Produced by the body-mapping algorithm, which lives outside this crate.
/// Refactorings built from a mapping read their before/after operations and
/// class names from it instead of storing copies.
pub trait BodyMapping: fmt::Debug + Send + Sync {
    /// Operation on the before side.
    fn operation1(&self) -> &UmlOperation;

    /// Operation on the after side.
    fn operation2(&self) -> &UmlOperation;

    /// Class owning the before-side operation.
    fn class_name1(&self) -> &str {
        &self.operation1().class_name
    }

    /// Class owning the after-side operation.
    fn class_name2(&self) -> &str {
        &self.operation2().class_name
    }

    /// Matched statements.
    fn mappings(&self) -> &[LeafMapping] {
        &[]
    }

    /// Statements of the after-side body with no counterpart.
    fn non_mapped_fragments2(&self) -> &[CodeFragment] {
        &[]
    }

    /// Number of mapped statements with identical text.
    fn exact_matches(&self) -> usize {
        self.mappings().iter().filter(|m| m.is_exact()).count()
    }
}

/// Normalized distance metrics between two class-like elements.
///
/// Both metrics return a value in `[0, 1]` where `0` means identical.
pub trait ClassDistance {
    /// Distance between the simple names.
    fn normalized_name_distance(&self, original: &UmlClass, renamed: &UmlClass) -> f64;

    /// Distance between the package names.
    fn normalized_package_distance(&self, original: &UmlClass, renamed: &UmlClass) -> f64;
}

/// A ready-made [`BodyMapping`] holding its endpoints and mapped fragments.
///
/// Mapping engines may return this directly when they have no richer state to
/// expose.
#[derive(Debug, Clone)]
pub struct SimpleBodyMapping {
    pub operation1: UmlOperation,
    pub operation2: UmlOperation,
    pub mappings: Vec<LeafMapping>,
    pub non_mapped_fragments2: Vec<CodeFragment>,
}

impl SimpleBodyMapping {
    /// Create a mapping with no statement pairs.
    pub fn new(operation1: UmlOperation, operation2: UmlOperation) -> Self {
        SimpleBodyMapping {
            operation1,
            operation2,
            mappings: Vec::new(),
            non_mapped_fragments2: Vec::new(),
        }
    }

    /// Add a statement pair.
    pub fn with_mapping(mut self, mapping: LeafMapping) -> Self {
        self.mappings.push(mapping);
        self
    }
}

impl BodyMapping for SimpleBodyMapping {
    fn operation1(&self) -> &UmlOperation {
        &self.operation1
    }

    fn operation2(&self) -> &UmlOperation {
        &self.operation2
    }

    fn mappings(&self) -> &[LeafMapping] {
        &self.mappings
    }

    fn non_mapped_fragments2(&self) -> &[CodeFragment] {
        &self.non_mapped_fragments2
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    mod class_tests {
        use super::*;

        #[test]
        fn top_level_name_joins_package() {
            let class = UmlClass::new("com.foo", "Bar", "src/com/foo/Bar.java");
            assert_eq!(class.name, "com.foo.Bar");
            assert_eq!(class.non_qualified_name(), "Bar");
            assert!(class.is_top_level);
        }

        #[test]
        fn default_package_has_bare_name() {
            let class = UmlClass::new("", "Main", "Main.java");
            assert_eq!(class.name, "Main");
            assert_eq!(class.non_qualified_name(), "Main");
        }

        #[test]
        fn nested_class_extends_outer_name() {
            let outer = UmlClass::new("com.foo", "Bar", "src/com/foo/Bar.java");
            let inner = UmlClass::nested_in(&outer, "Helper");
            assert_eq!(inner.name, "com.foo.Bar.Helper");
            assert_eq!(inner.package_name, "com.foo");
            assert!(!inner.is_top_level);
        }

        #[test]
        fn subtype_by_simple_or_qualified_superclass() {
            let base = UmlClass::new("com.foo", "Shape", "Shape.java");
            let by_simple = UmlClass::new("com.foo", "Circle", "Circle.java").with_superclass("Shape");
            let by_qualified =
                UmlClass::new("com.bar", "Square", "Square.java").with_superclass("com.foo.Shape");
            let unrelated = UmlClass::new("com.foo", "Line", "Line.java").with_superclass("Object");
            assert!(by_simple.is_sub_type_of(&base));
            assert!(by_qualified.is_sub_type_of(&base));
            assert!(!unrelated.is_sub_type_of(&base));
        }

        #[test]
        fn subtype_by_interface() {
            let iface = UmlClass::new("com.foo", "Drawable", "Drawable.java").as_interface();
            let class = UmlClass::new("com.foo", "Circle", "Circle.java").with_interface("Drawable");
            assert!(class.is_sub_type_of(&iface));
        }

        #[test]
        fn suffix_match_requires_dot_boundary() {
            let base = UmlClass::new("com.foo", "Shape", "Shape.java");
            let class = UmlClass::new("com.foo", "Circle", "Circle.java").with_superclass("ape");
            assert!(!class.is_sub_type_of(&base));
        }
    }

    mod operation_tests {
        use super::*;

        #[test]
        fn display_matches_signature_format() {
            let op = UmlOperation::new("com.foo.Bar", "compute")
                .with_parameter("x", "int")
                .with_parameter("name", "String")
                .returning("boolean");
            assert_eq!(op.to_string(), "public compute(x int, name String) : boolean");
        }

        #[test]
        fn abstract_and_void_display() {
            let op = UmlOperation::new("com.foo.Bar", "run")
                .with_visibility(Visibility::Protected)
                .as_abstract();
            assert_eq!(op.to_string(), "protected abstract run()");
        }

        #[test]
        fn equality_ignores_location_and_parameter_names() {
            let a = UmlOperation::new("C", "m").with_parameter("a", "int");
            let b = UmlOperation::new("C", "m")
                .with_parameter("renamed", "int")
                .with_location(CodeRange::new("C.java", 5, 9, 1, 2));
            assert_eq!(a, b);
            let mut set = HashSet::new();
            set.insert(a);
            assert!(set.contains(&b));
        }

        #[test]
        fn equality_respects_class_and_types() {
            let a = UmlOperation::new("C", "m").with_parameter("a", "int");
            assert_ne!(a, UmlOperation::new("D", "m").with_parameter("a", "int"));
            assert_ne!(a, UmlOperation::new("C", "m").with_parameter("a", "long"));
            assert!(a.equal_signature(&UmlOperation::new("D", "m").with_parameter("b", "int")));
        }

        #[test]
        fn ordering_is_consistent_with_equality() {
            let a = UmlOperation::new("C", "m").with_parameter("a", "int");
            let b = UmlOperation::new("C", "m").with_parameter("z", "int");
            assert_eq!(a.cmp(&b), Ordering::Equal);
            let c = UmlOperation::new("C", "n");
            assert_eq!(a.cmp(&c), Ordering::Less);
        }
    }

    mod attribute_tests {
        use super::*;

        #[test]
        fn display_is_visibility_name_type() {
            let attr = UmlAttribute::new("C", "count", "int");
            assert_eq!(attr.to_string(), "private count : int");
        }

        #[test]
        fn equality_ignores_location() {
            let a = UmlAttribute::new("C", "count", "int");
            let b = UmlAttribute::new("C", "count", "int")
                .with_location(CodeRange::new("C.java", 3, 3, 5, 20));
            assert_eq!(a, b);
            assert_ne!(a, UmlAttribute::new("D", "count", "int"));
        }
    }

    mod statement_tests {
        use super::*;

        #[test]
        fn invocation_display_includes_receiver() {
            let loc = CodeRange::new("C.java", 1, 1, 1, 1);
            let call = OperationInvocation::new("draw", &["canvas", "0"], loc).on("shape");
            assert_eq!(call.to_string(), "shape.draw(canvas, 0)");
        }

        #[test]
        fn variable_display_is_name_and_type() {
            let var = VariableDeclaration::local("total", "int", CodeRange::new("C.java", 1, 1, 1, 1));
            assert_eq!(var.to_string(), "total : int");
            assert!(!var.is_parameter);
        }

        #[test]
        fn exact_mappings_are_counted() {
            let loc = CodeRange::new("C.java", 1, 1, 1, 1);
            let mapping = SimpleBodyMapping::new(UmlOperation::new("C", "a"), UmlOperation::new("C", "b"))
                .with_mapping(LeafMapping::new(
                    CodeFragment::new("x++;", loc.clone()),
                    CodeFragment::new("x++;", loc.clone()),
                ))
                .with_mapping(LeafMapping::new(
                    CodeFragment::new("y = 1;", loc.clone()),
                    CodeFragment::new("y = 2;", loc),
                ));
            assert_eq!(mapping.exact_matches(), 1);
            assert_eq!(mapping.class_name1(), "C");
        }
    }
}
