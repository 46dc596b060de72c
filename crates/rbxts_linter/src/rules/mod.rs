//! Built-in lint rules

mod rbx001_no_null;
mod rbx002_no_any;
mod rbx003_no_value_typeof;
mod rbx004_no_for_in;
mod rbx005_no_function_expression_name;
mod rbx006_no_get_set;
mod rbx007_no_private_identifier;
mod rbx008_no_implicit_self;
mod rbx009_no_invalid_identifier;
mod rbx010_no_unsupported_syntax;
mod rbx011_no_post_fix_new;
mod rbx012_no_preceding_spread_element;
mod rbx013_no_export_assignment_let;
mod rbx014_015_declaration_merging;
mod rbx016_no_user_defined_lua_tuple;
mod rbx017_prefer_task_library;
mod rbx018_prefer_get_players;
mod rbx019_size_method;
mod rbx020_no_object_math;
mod rbx021_datatype_math_methods;
mod rbx022_lua_truthiness;
mod rbx023_misleading_lua_tuple_checks;
mod rbx024_no_array_pairs;
mod rbx025_no_undeclared_scope;

use crate::{Rule, RuleSettings};

pub use rbx001_no_null::NoNull;
pub use rbx002_no_any::NoAny;
pub use rbx003_no_value_typeof::NoValueTypeof;
pub use rbx004_no_for_in::NoForIn;
pub use rbx005_no_function_expression_name::NoFunctionExpressionName;
pub use rbx006_no_get_set::NoGetSet;
pub use rbx007_no_private_identifier::NoPrivateIdentifier;
pub use rbx008_no_implicit_self::NoImplicitSelf;
pub use rbx009_no_invalid_identifier::NoInvalidIdentifier;
pub use rbx010_no_unsupported_syntax::NoUnsupportedSyntax;
pub use rbx011_no_post_fix_new::NoPostFixNew;
pub use rbx012_no_preceding_spread_element::NoPrecedingSpreadElement;
pub use rbx013_no_export_assignment_let::NoExportAssignmentLet;
pub use rbx014_015_declaration_merging::{NoEnumMerging, NoNamespaceMerging};
pub use rbx016_no_user_defined_lua_tuple::NoUserDefinedLuaTuple;
pub use rbx017_prefer_task_library::PreferTaskLibrary;
pub use rbx018_prefer_get_players::PreferGetPlayers;
pub use rbx019_size_method::SizeMethod;
pub use rbx020_no_object_math::NoObjectMath;
pub use rbx021_datatype_math_methods::DatatypeMathMethods;
pub use rbx022_lua_truthiness::LuaTruthiness;
pub use rbx023_misleading_lua_tuple_checks::MisleadingLuaTupleChecks;
pub use rbx024_no_array_pairs::NoArrayPairs;
pub use rbx025_no_undeclared_scope::NoUndeclaredScope;

/// All built-in rules with default options
pub fn all_rules() -> Vec<Box<dyn Rule>> {
    all_rules_with(&RuleSettings::default())
}

/// All built-in rules, configured. Settings are validated before this is
/// called; a bad options document never reaches rule construction.
pub fn all_rules_with(settings: &RuleSettings) -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(NoNull),
        Box::new(NoAny::new(settings.no_any.clone())),
        Box::new(NoValueTypeof),
        Box::new(NoForIn),
        Box::new(NoFunctionExpressionName),
        Box::new(NoGetSet),
        Box::new(NoPrivateIdentifier),
        Box::new(NoImplicitSelf),
        Box::new(NoInvalidIdentifier),
        Box::new(NoUnsupportedSyntax),
        Box::new(NoPostFixNew),
        Box::new(NoPrecedingSpreadElement),
        Box::new(NoExportAssignmentLet),
        Box::new(NoEnumMerging),
        Box::new(NoNamespaceMerging),
        Box::new(NoUserDefinedLuaTuple),
        Box::new(PreferTaskLibrary),
        Box::new(PreferGetPlayers::new(settings.prefer_get_players.clone())),
        Box::new(SizeMethod),
        Box::new(NoObjectMath),
        Box::new(DatatypeMathMethods),
        Box::new(LuaTruthiness),
        Box::new(MisleadingLuaTupleChecks),
        Box::new(NoArrayPairs),
        Box::new(NoUndeclaredScope),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn rule_codes_are_unique() {
        let rules = all_rules();
        let codes: FxHashSet<&str> = rules.iter().map(|r| r.code().as_str()).collect();
        assert_eq!(codes.len(), rules.len());
    }

    #[test]
    fn rule_names_are_kebab_case() {
        for rule in all_rules() {
            let name = rule.name();
            assert!(
                name.chars().all(|c| c.is_ascii_lowercase() || c == '-'),
                "rule name not kebab-case: {name}"
            );
        }
    }
}
