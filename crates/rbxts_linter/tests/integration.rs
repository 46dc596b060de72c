//! End-to-end checks over the full rule set

use rbxts_linter::lint_source;

#[test]
fn clean_file_produces_no_diagnostics() {
    let source = r#"
import { Workspace } from "@rbxts/services";

const Players = game.GetService("Players");

function greet(player: string): string {
    return "hello " + player;
}

for (const child of Workspace.GetChildren()) {
    print(child);
}

if (true) {
    print(greet("friend"));
}
"#;
    let diagnostics = lint_source(source, "clean.ts");
    assert!(
        diagnostics.is_empty(),
        "expected clean file, got: {:?}",
        diagnostics
            .iter()
            .map(|d| format!("[{}] {}", d.code, d.message))
            .collect::<Vec<_>>()
    );
}

#[test]
fn violations_come_back_in_document_order() {
    let source = "const a = null; wait(1); const b = null;";
    let diagnostics = lint_source(source, "ordered.ts");

    let offsets: Vec<u32> = diagnostics.iter().map(|d| d.location.start).collect();
    let mut sorted = offsets.clone();
    sorted.sort_unstable();
    assert_eq!(offsets, sorted);
    assert_eq!(diagnostics.len(), 3);
}

#[test]
fn one_node_can_carry_violations_from_multiple_rules() {
    // The labeled call form trips both the label ban and the implicit-self rule
    let source = "obj:method();";
    let diagnostics = lint_source(source, "multi.ts");
    let codes: Vec<&str> = diagnostics.iter().map(|d| d.code.as_str()).collect();
    assert!(codes.contains(&"RBX008"), "codes: {codes:?}");
    assert!(codes.contains(&"RBX010"), "codes: {codes:?}");
}

#[test]
fn parse_errors_surface_as_diagnostics() {
    let diagnostics = lint_source("const = ;", "broken.ts");
    assert!(!diagnostics.is_empty());
    assert!(diagnostics.iter().all(|d| d.code == "E001"));
}

#[test]
fn fixes_from_a_full_run_apply_cleanly() {
    use rbxts_linter::fixer::apply_edits;

    let source = "const x = null; wait(1);";
    let diagnostics = lint_source(source, "fixable.ts");
    let edits: Vec<_> = diagnostics
        .into_iter()
        .filter_map(|d| d.fix)
        .flat_map(|f| f.edits)
        .collect();
    let fixed = apply_edits(source, edits);
    assert_eq!(fixed, "const x = undefined; task.wait(1);");

    // Fixed point: the corrected file lints clean
    let second = lint_source(&fixed, "fixable.ts");
    assert!(second.is_empty(), "second pass: {second:?}");
}

#[test]
fn spec_scenarios() {
    // `if (!0) {}` -> exactly one lua-truthiness violation, no fix
    let diagnostics = lint_source("if (!0) {}", "truthy.ts");
    let truthiness: Vec<_> = diagnostics.iter().filter(|d| d.code == "RBX022").collect();
    assert_eq!(truthiness.len(), 1);
    assert!(truthiness[0].fix.is_none());

    // pairs() over an array-like -> one violation, no fix
    let diagnostics = lint_source(
        "const arr = [1, 2, 3]; for (const i of pairs(arr)) {}",
        "pairs.ts",
    );
    let pairs: Vec<_> = diagnostics.iter().filter(|d| d.code == "RBX024").collect();
    assert_eq!(pairs.len(), 1);
    assert!(pairs[0].fix.is_none());

    // Three same-name enums in one scope -> three violations
    let diagnostics = lint_source(
        "enum E { A } enum E { B } enum E { C }",
        "enums.ts",
    );
    let merges: Vec<_> = diagnostics.iter().filter(|d| d.code == "RBX014").collect();
    assert_eq!(merges.len(), 3);
}
