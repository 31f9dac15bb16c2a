//! The closed taxonomy of refactoring kinds.
//!
//! Every detected refactoring reports exactly one [`RefactoringType`]. A type
//! carries three pieces of static data:
//! - a unique display name (`"Extract Method"`), which is also the prefix of
//!   every description of that type and its serialized form
//! - a validation pattern for the descriptive part that follows the name
//! - the capture groups replaced by `*` when descriptions are aggregated
//!
//! Descriptions have the shape `<display name>\t<detail>`. The compiled
//! patterns accept any whitespace after the display name so that
//! hand-written descriptions with a single space also validate.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{MinerError, MinerResult};

macro_rules! refactoring_types {
    ($( $variant:ident => $display:literal, $detail:literal $(, [$($group:literal),*])? ; )*) => {
        /// Kind of a detected refactoring.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum RefactoringType {
            $( $variant, )*
        }

        impl RefactoringType {
            /// Every refactoring type, in declaration order.
            pub const ALL: &'static [RefactoringType] = &[ $( RefactoringType::$variant, )* ];

            /// Human-readable name, unique per type.
            pub fn display_name(self) -> &'static str {
                match self {
                    $( RefactoringType::$variant => $display, )*
                }
            }

            fn detail_pattern(self) -> &'static str {
                match self {
                    $( RefactoringType::$variant => $detail, )*
                }
            }

            /// Capture groups (1-based) replaced by `*` in [`aggregate`](Self::aggregate).
            pub fn aggregate_groups(self) -> &'static [usize] {
                match self {
                    $( RefactoringType::$variant => &[ $( $( $group ),* )? ], )*
                }
            }
        }
    };
}

refactoring_types! {
    ExtractOperation => "Extract Method", r"(.+) extracted from (.+) in class (.+)", [2];
    RenameClass => "Rename Class", r"(.+) renamed to (.+)";
    MoveAttribute => "Move Attribute", r"(.+) from class (.+) to (.+) from class (.+)";
    MoveRenameAttribute => "Move And Rename Attribute", r"(.+) renamed to (.+) and moved from class (.+) to class (.+)";
    ReplaceAttribute => "Replace Attribute", r"(.+) from class (.+) with (.+) from class (.+)";
    RenameMethod => "Rename Method", r"(.+) renamed to (.+) in class (.+)";
    InlineOperation => "Inline Method", r"(.+) inlined to (.+) in class (.+)", [2];
    MoveOperation => "Move Method", r"(.+) from class (.+) to (.+) from class (.+)";
    MoveAndRenameOperation => "Move And Rename Method", r"(.+) from class (.+) to (.+) from class (.+)";
    PullUpOperation => "Pull Up Method", r"(.+) from class (.+) to (.+) from class (.+)", [1, 2];
    MoveClass => "Move Class", r"(.+) moved to (.+)";
    MoveRenameClass => "Move And Rename Class", r"(.+) moved and renamed to (.+)";
    MoveSourceFolder => "Move Source Folder", r"(.+) to (.+)";
    PullUpAttribute => "Pull Up Attribute", r"(.+) from class (.+) to (.+) from class (.+)", [2];
    PushDownAttribute => "Push Down Attribute", r"(.+) from class (.+) to (.+) from class (.+)", [3];
    PushDownOperation => "Push Down Method", r"(.+) from class (.+) to (.+) from class (.+)", [3, 4];
    ExtractInterface => "Extract Interface", r"(.+) from classes \[(.+)\]", [2];
    ExtractSuperclass => "Extract Superclass", r"(.+) from classes \[(.+)\]", [2];
    ExtractSubclass => "Extract Subclass", r"(.+) from class (.+)";
    ExtractClass => "Extract Class", r"(.+) from class (.+)";
    ExtractAndMoveOperation => "Extract And Move Method", r"(.+) extracted from (.+) in class (.+) & moved to class (.+)";
    MoveAndInlineOperation => "Move And Inline Method", r"(.+) moved from class (.+) to class (.+) & inlined to (.+)";
    ReplaceAnonymousWithClass => "Replace Anonymous With Class", r"(.+) with (.+)";
    IntroducePolymorphism => "Introduce Polymorphism", r"(.+) in method (.+) dispatched to class (.+) in class (.+)";
    RenamePackage => "Rename Package", r"(.+) to (.+)";
    MovePackage => "Move Package", r"(.+) to (.+)";
    ExtractVariable => "Extract Variable", r"(.+) in method (.+) from class (.+)";
    ExtractAttribute => "Extract Attribute", r"(.+) in class (.+)";
    InlineVariable => "Inline Variable", r"(.+) in method (.+) from class (.+)";
    InlineAttribute => "Inline Attribute", r"(.+) in class (.+)";
    RenameVariable => "Rename Variable", r"(.+) to (.+) in method (.+) from class (.+)";
    RenameParameter => "Rename Parameter", r"(.+) to (.+) in method (.+) from class (.+)";
    RenameAttribute => "Rename Attribute", r"(.+) to (.+) in class (.+)";
    MergeVariable => "Merge Variable", r"\[(.+)\] to (.+) in method (.+) from class (.+)";
    MergeParameter => "Merge Parameter", r"\[(.+)\] to (.+) in method (.+) from class (.+)";
    MergeAttribute => "Merge Attribute", r"\[(.+)\] to (.+) in class (.+)";
    SplitVariable => "Split Variable", r"(.+) to \[(.+)\] in method (.+) from class (.+)";
    SplitParameter => "Split Parameter", r"(.+) to \[(.+)\] in method (.+) from class (.+)";
    SplitAttribute => "Split Attribute", r"(.+) to \[(.+)\] in class (.+)";
    ReplaceVariableWithAttribute => "Replace Variable With Attribute", r"(.+) to (.+) in method (.+) from class (.+)";
    ReplaceAttributeWithVariable => "Replace Attribute With Variable", r"(.+) to (.+) in method (.+) from class (.+)";
    ParameterizeVariable => "Parameterize Variable", r"(.+) to (.+) in method (.+) from class (.+)";
    LocalizeParameter => "Localize Parameter", r"(.+) to (.+) in method (.+) from class (.+)";
    ParameterizeAttribute => "Parameterize Attribute", r"(.+) to (.+) in method (.+) from class (.+)";
    ChangeReturnType => "Change Return Type", r"(.+) to (.+) in method (.+) from class (.+)";
    ChangeVariableType => "Change Variable Type", r"(.+) to (.+) in method (.+) from class (.+)";
    ChangeParameterType => "Change Parameter Type", r"(.+) to (.+) in method (.+) from class (.+)";
    ChangeAttributeType => "Change Attribute Type", r"(.+) to (.+) in class (.+)";
    AddMethodAnnotation => "Add Method Annotation", r"(.+) in method (.+) from class (.+)";
    RemoveMethodAnnotation => "Remove Method Annotation", r"(.+) in method (.+) from class (.+)";
    ModifyMethodAnnotation => "Modify Method Annotation", r"(.+) to (.+) in method (.+) from class (.+)";
    AddAttributeAnnotation => "Add Attribute Annotation", r"(.+) in attribute (.+) from class (.+)";
    RemoveAttributeAnnotation => "Remove Attribute Annotation", r"(.+) in attribute (.+) from class (.+)";
    ModifyAttributeAnnotation => "Modify Attribute Annotation", r"(.+) to (.+) in attribute (.+) from class (.+)";
    AddClassAnnotation => "Add Class Annotation", r"(.+) in class (.+)";
    RemoveClassAnnotation => "Remove Class Annotation", r"(.+) in class (.+)";
    ModifyClassAnnotation => "Modify Class Annotation", r"(.+) to (.+) in class (.+)";
    AddParameterAnnotation => "Add Parameter Annotation", r"(.+) in parameter (.+) in method (.+) from class (.+)";
    RemoveParameterAnnotation => "Remove Parameter Annotation", r"(.+) in parameter (.+) in method (.+) from class (.+)";
    ModifyParameterAnnotation => "Modify Parameter Annotation", r"(.+) to (.+) in parameter (.+) in method (.+) from class (.+)";
    AddParameter => "Add Parameter", r"(.+) in method (.+) from class (.+)";
    RemoveParameter => "Remove Parameter", r"(.+) in method (.+) from class (.+)";
    ReorderParameter => "Reorder Parameter", r"\[(.+)\] to \[(.+)\] in method (.+) from class (.+)";
    AddVariableAnnotation => "Add Variable Annotation", r"(.+) in variable (.+) in method (.+) from class (.+)";
    RemoveVariableAnnotation => "Remove Variable Annotation", r"(.+) in variable (.+) in method (.+) from class (.+)";
    ModifyVariableAnnotation => "Modify Variable Annotation", r"(.+) to (.+) in variable (.+) in method (.+) from class (.+)";
    AddThrownExceptionType => "Add Thrown Exception Type", r"(.+) in method (.+) from class (.+)";
    RemoveThrownExceptionType => "Remove Thrown Exception Type", r"(.+) in method (.+) from class (.+)";
    ChangeThrownExceptionType => "Change Thrown Exception Type", r"(.+) to (.+) in method (.+) from class (.+)";
    ChangeOperationAccessModifier => "Change Method Access Modifier", r"(.+) to (.+) in method (.+) from class (.+)";
    ChangeAttributeAccessModifier => "Change Attribute Access Modifier", r"(.+) to (.+) in attribute (.+) from class (.+)";
    EncapsulateAttribute => "Encapsulate Attribute", r"(.+) from class (.+)";
    AddMethodModifier => "Add Method Modifier", r"(.+) in method (.+) from class (.+)";
    RemoveMethodModifier => "Remove Method Modifier", r"(.+) in method (.+) from class (.+)";
    AddAttributeModifier => "Add Attribute Modifier", r"(.+) in attribute (.+) from class (.+)";
    RemoveAttributeModifier => "Remove Attribute Modifier", r"(.+) in attribute (.+) from class (.+)";
    AddVariableModifier => "Add Variable Modifier", r"(.+) in variable (.+) in method (.+) from class (.+)";
    AddParameterModifier => "Add Parameter Modifier", r"(.+) in parameter (.+) in method (.+) from class (.+)";
    RemoveVariableModifier => "Remove Variable Modifier", r"(.+) in variable (.+) in method (.+) from class (.+)";
    RemoveParameterModifier => "Remove Parameter Modifier", r"(.+) in parameter (.+) in method (.+) from class (.+)";
    ChangeClassAccessModifier => "Change Class Access Modifier", r"(.+) to (.+) in class (.+)";
    AddClassModifier => "Add Class Modifier", r"(.+) in class (.+)";
    RemoveClassModifier => "Remove Class Modifier", r"(.+) in class (.+)";
    SplitPackage => "Split Package", r"(.+) to \[(.+)\]";
    MergePackage => "Merge Package", r"\[(.+)\] to (.+)";
    ChangeTypeDeclarationKind => "Change Type Declaration Kind", r"(.+) to (.+) in type (.+)";
    CollapseHierarchy => "Collapse Hierarchy", r"(.+) to (.+)";
    ReplaceLoopWithPipeline => "Replace Loop With Pipeline", r"(.+) with (.+) in method (.+) from class (.+)";
    ReplacePipelineWithLoop => "Replace Pipeline With Loop", r"(.+) with (.+) in method (.+) from class (.+)";
    ReplaceAnonymousWithLambda => "Replace Anonymous With Lambda", r"(.+) with (.+) in method (.+) from class (.+)";
    MergeClass => "Merge Class", r"\[(.+)\] to (.+)";
    SplitClass => "Split Class", r"(.+) to \[(.+)\]";
    SplitConditional => "Split Conditional", r"(.+) to \[(.+)\] in method (.+) from class (.+)";
    InvertCondition => "Invert Condition", r"(.+) to (.+) in method (.+) from class (.+)";
    MergeConditional => "Merge Conditional", r"\[(.+)\] to (.+) in method (.+) from class (.+)";
    MergeCatch => "Merge Catch", r"\[(.+)\] to (.+) in method (.+) from class (.+)";
    MergeOperation => "Merge Method", r"\[(.+)\] to (.+) in class (.+)";
    SplitOperation => "Split Method", r"(.+) to \[(.+)\] in class (.+)";
    MoveCode => "Move Code", r"from (.+) to (.+) in class (.+)";
    ParameterizeTest => "Parameterize Test", r"(.+) to (.+) in class (.+)";
    AssertThrows => "Assert Throws", r"(.+) in method (.+) from class (.+)";
    TryWithResources => "Try With Resources", r"(.+) in method (.+) from class (.+)";
    ReplaceGenericWithDiamond => "Replace Generic With Diamond", r"(.+) with (.+) in method (.+) from class (.+)";
    ReplaceConditionalWithTernary => "Replace Conditional With Ternary", r"(.+) to (.+) in method (.+) from class (.+)";
}

// Indexed by discriminant; `ALL` is in declaration order.
static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    RefactoringType::ALL
        .iter()
        .map(|rt| {
            let source = format!(
                r"(?s)^{}\s+{}$",
                regex::escape(rt.display_name()),
                rt.detail_pattern()
            );
            Regex::new(&source).expect("refactoring patterns are valid")
        })
        .collect()
});

impl RefactoringType {
    /// Upper-case letters of the display name (`"Extract Method"` → `"EM"`).
    pub fn abbreviation(self) -> String {
        self.display_name()
            .chars()
            .filter(|c| c.is_alphabetic() && c.is_uppercase())
            .collect()
    }

    /// Compiled validation pattern for full descriptions of this type.
    pub fn regex(self) -> &'static Regex {
        &PATTERNS[self as usize]
    }

    /// Check whether a description is well-formed for this type.
    pub fn matches(self, description: &str) -> bool {
        self.regex().is_match(description)
    }

    /// Look up a type by display name, ignoring case.
    pub fn from_name(name: &str) -> MinerResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|rt| rt.display_name().eq_ignore_ascii_case(name))
            .ok_or_else(|| MinerError::unknown_type(name))
    }

    /// Find the type whose display name is the longest prefix of
    /// `description`.
    ///
    /// Several names can prefix the same description (`"Move Attribute"` and
    /// `"Move And Rename Attribute"` both start with `"Move A"`), so only the
    /// longest match is a correct answer.
    pub fn extract_from_description(description: &str) -> MinerResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .filter(|rt| description.starts_with(rt.display_name()))
            .max_by_key(|rt| rt.display_name().len())
            .ok_or_else(|| MinerError::unknown_type(description))
    }

    /// Text of capture group `group` when `description` matches this type.
    pub fn group<'d>(self, description: &'d str, group: usize) -> MinerResult<&'d str> {
        let captures = self
            .regex()
            .captures(description)
            .ok_or_else(|| MinerError::pattern_mismatch(self.display_name(), description))?;
        captures
            .get(group)
            .map(|m| m.as_str())
            .ok_or_else(|| MinerError::MissingGroup {
                refactoring_type: self.display_name().to_string(),
                group,
            })
    }

    /// Replace the aggregate groups of `description` with `*`.
    ///
    /// Aggregated descriptions collapse refactorings that differ only in the
    /// replaced parts (e.g. every Pull Up Method into the same target).
    pub fn aggregate(self, description: &str) -> MinerResult<String> {
        let captures = self
            .regex()
            .captures(description)
            .ok_or_else(|| MinerError::pattern_mismatch(self.display_name(), description))?;

        let replaced = self.aggregate_groups();
        let mut result = String::with_capacity(description.len());
        let mut current = 0;
        for g in 1..captures.len() {
            // Unmatched optional groups and groups nested in an earlier one
            // leave the text as is.
            let Some(m) = captures.get(g).filter(|m| m.start() >= current) else {
                continue;
            };
            result.push_str(&description[current..m.start()]);
            if replaced.contains(&g) {
                result.push('*');
            } else {
                result.push_str(m.as_str());
            }
            current = m.end();
        }
        result.push_str(&description[current..]);
        Ok(result)
    }
}

impl fmt::Display for RefactoringType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for RefactoringType {
    type Err = MinerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl Serialize for RefactoringType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.display_name())
    }
}

impl<'de> Deserialize<'de> for RefactoringType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Self::from_name(&name).map_err(de::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    mod catalog {
        use super::*;

        #[test]
        fn all_is_in_declaration_order() {
            for (i, rt) in RefactoringType::ALL.iter().enumerate() {
                assert_eq!(*rt as usize, i, "{} out of order", rt);
            }
        }

        #[test]
        fn display_names_are_non_empty_and_unique() {
            let mut seen = HashSet::new();
            for rt in RefactoringType::ALL {
                assert!(!rt.display_name().is_empty());
                assert!(seen.insert(rt.display_name()), "duplicate {}", rt);
            }
            assert_eq!(seen.len(), RefactoringType::ALL.len());
        }

        #[test]
        fn every_pattern_compiles() {
            for rt in RefactoringType::ALL {
                assert!(rt.regex().as_str().contains(rt.display_name()));
            }
        }

        #[test]
        fn aggregate_groups_exist_in_pattern() {
            for rt in RefactoringType::ALL {
                let groups = rt.regex().captures_len() - 1;
                for g in rt.aggregate_groups() {
                    assert!(*g <= groups, "{} has no group {}", rt, g);
                }
            }
        }

        #[test]
        fn abbreviation_keeps_upper_case_letters() {
            assert_eq!(RefactoringType::ExtractOperation.abbreviation(), "EM");
            assert_eq!(RefactoringType::MoveAndRenameOperation.abbreviation(), "MARM");
        }
    }

    mod lookup {
        use super::*;

        #[test]
        fn from_name_round_trips_every_type() {
            for rt in RefactoringType::ALL {
                assert_eq!(RefactoringType::from_name(rt.display_name()), Ok(*rt));
            }
        }

        #[test]
        fn from_name_ignores_case() {
            assert_eq!(
                RefactoringType::from_name("extract method"),
                Ok(RefactoringType::ExtractOperation)
            );
        }

        #[test]
        fn from_name_rejects_unknown() {
            let err = RefactoringType::from_name("Teleport Method").unwrap_err();
            assert!(matches!(err, MinerError::UnknownRefactoringType { .. }));
        }

        #[test]
        fn longest_prefix_wins() {
            let desc = "Move And Rename Attribute\ta : int renamed to b : int and moved from class A to class B";
            assert_eq!(
                RefactoringType::extract_from_description(desc),
                Ok(RefactoringType::MoveRenameAttribute)
            );
            let desc = "Extract And Move Method\tpublic e() extracted from public s() in class A & moved to class B";
            assert_eq!(
                RefactoringType::extract_from_description(desc),
                Ok(RefactoringType::ExtractAndMoveOperation)
            );
        }

        #[test]
        fn description_with_no_known_prefix_is_an_error() {
            assert!(RefactoringType::extract_from_description("Refactor Everything\tx").is_err());
        }

        #[test]
        fn serializes_as_display_name() {
            let json = serde_json::to_string(&RefactoringType::PullUpOperation).unwrap();
            assert_eq!(json, "\"Pull Up Method\"");
            let back: RefactoringType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, RefactoringType::PullUpOperation);
        }
    }

    mod patterns {
        use super::*;

        const PULL_UP: &str =
            "Pull Up Method\tpublic m() : void from class a.Sub to public m() : void from class a.Base";

        #[test]
        fn tab_and_space_separators_match() {
            assert!(RefactoringType::RenameClass.matches("Rename Class\ta.Foo renamed to a.Bar"));
            assert!(RefactoringType::RenameClass.matches("Rename Class a.Foo renamed to a.Bar"));
            assert!(!RefactoringType::RenameClass.matches("Rename Class\ta.Foo moved to a.Bar"));
        }

        #[test]
        fn group_returns_capture() {
            assert_eq!(RefactoringType::PullUpOperation.group(PULL_UP, 2), Ok("a.Sub"));
            assert_eq!(RefactoringType::PullUpOperation.group(PULL_UP, 4), Ok("a.Base"));
        }

        #[test]
        fn group_past_the_end_is_missing() {
            let err = RefactoringType::PullUpOperation.group(PULL_UP, 9).unwrap_err();
            assert!(matches!(err, MinerError::MissingGroup { group: 9, .. }));
        }

        #[test]
        fn group_on_mismatch_is_an_error() {
            let err = RefactoringType::MoveClass.group(PULL_UP, 1).unwrap_err();
            assert!(matches!(err, MinerError::PatternMismatch { .. }));
        }

        #[test]
        fn aggregate_replaces_configured_groups() {
            assert_eq!(
                RefactoringType::PullUpOperation.aggregate(PULL_UP).unwrap(),
                "Pull Up Method\t* from class * to public m() : void from class a.Base"
            );
        }

        #[test]
        fn aggregate_without_groups_is_identity() {
            let desc = "Rename Class\ta.Foo renamed to a.Bar";
            assert_eq!(RefactoringType::RenameClass.aggregate(desc).unwrap(), desc);
        }

        #[test]
        fn aggregate_on_mismatch_is_an_error() {
            assert!(RefactoringType::RenameClass.aggregate("Rename Class\tnothing").is_err());
        }

        #[test]
        fn bracketed_lists_match() {
            let desc = "Extract Superclass\ta.Base from classes [a.A, a.B]";
            assert_eq!(RefactoringType::ExtractSuperclass.group(desc, 2), Ok("a.A, a.B"));
            assert_eq!(
                RefactoringType::ExtractSuperclass.aggregate(desc).unwrap(),
                "Extract Superclass\ta.Base from classes [*]"
            );
        }
    }
}
