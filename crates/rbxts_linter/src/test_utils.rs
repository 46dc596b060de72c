use crate::checker::Checker;
use crate::fixer::apply_edits;
use crate::{DefaultHostInfo, Diagnostic, LintContext, Rule};
use rbxts_parser::Parser;
use rbxts_semantic::Database;

fn lint_with(rules: &[Box<dyn Rule>], source: &str) -> Vec<Diagnostic> {
    let parser = Parser::new(source);
    let program = match parser.parse() {
        Ok(p) => p,
        Err(e) => panic!("Parse errors in test source {source:?}: {e:?}"),
    };

    let host = DefaultHostInfo::new();
    let db = Database::new();
    let ctx = LintContext::new(source, "test.ts", &program, &host, &db);
    let checker = Checker::new(&ctx, rules);
    let (_, diagnostics) = checker.check(&program);
    diagnostics
}

/// Assert that the rule reports (at least) one diagnostic with its code.
/// An empty `expected_code` asserts the source is clean.
pub fn assert_lint(rule: Box<dyn Rule>, source: &str, expected_code: &str) {
    let rules = vec![rule];
    let diagnostics = lint_with(&rules, source);

    if expected_code.is_empty() {
        if !diagnostics.is_empty() {
            let codes: Vec<_> = diagnostics.iter().map(|d| d.code.clone()).collect();
            panic!("Expected no diagnostics, but found: {codes:?}");
        }
    } else {
        let found = diagnostics.iter().any(|d| d.code == expected_code);
        if !found {
            let found_codes: Vec<_> = diagnostics
                .iter()
                .map(|d| format!("[{}] {}", d.code, d.message))
                .collect();
            panic!("Expected diagnostic code '{expected_code}', but found: {found_codes:?}");
        }
    }
}

/// Assert the exact number of diagnostics the rule reports
pub fn assert_lint_count(rule: Box<dyn Rule>, source: &str, expected: usize) {
    let rules = vec![rule];
    let diagnostics = lint_with(&rules, source);
    if diagnostics.len() != expected {
        let found: Vec<_> = diagnostics
            .iter()
            .map(|d| format!("[{}] {} @{}", d.code, d.message, d.location.start))
            .collect();
        panic!(
            "Expected {expected} diagnostic(s), found {}: {found:?}",
            diagnostics.len()
        );
    }
}

/// Collect the diagnostics one rule produces for a source snippet
pub fn lint_one(rule: Box<dyn Rule>, source: &str) -> Vec<Diagnostic> {
    let rules = vec![rule];
    lint_with(&rules, source)
}

/// Assert that applying all produced fixes yields the expected source.
/// When no fixes are produced, the source must already equal the
/// expectation (the rule either does not fire or offers no fix).
///
/// Also checks the round-trip property: the fixed text reparses and a
/// second pass of the same rule finds nothing left to fix.
pub fn assert_lint_fix(rule: Box<dyn Rule>, source: &str, expected_fixed: &str) {
    let rules = vec![rule];
    let diagnostics = lint_with(&rules, source);

    let mut fix_edits = Vec::new();
    for diag in diagnostics {
        if let Some(fix) = diag.fix {
            fix_edits.extend(fix.edits);
        }
    }

    if fix_edits.is_empty() {
        if source != expected_fixed {
            panic!(
                "No fixes found, but source doesn't match expected_fixed.\nSource: {source:?}\nExpected: {expected_fixed:?}"
            );
        }
        return;
    }

    let content = apply_edits(source, fix_edits);
    assert_eq!(
        content, expected_fixed,
        "Fixed source doesn't match expected output"
    );

    if let Err(errors) = Parser::new(&content).parse() {
        panic!("Fixed source does not reparse: {content:?} -> {errors:?}");
    }
    let second_pass = lint_with(&rules, &content);
    let still_fixable = second_pass.iter().filter(|d| d.fix.is_some()).count();
    assert_eq!(
        still_fixable, 0,
        "Fixed source still produces fixable diagnostics: {content:?}"
    );
}
