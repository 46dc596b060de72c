//! Fix synthesis - range-based edits against the original source
//!
//! Every function here produces ordered, non-overlapping edits computed
//! from the original text. Operand text is relocated, never re-derived
//! from the AST, so user formatting survives the rewrite.

use rbxts_diagnostics::Edit;
use rbxts_lexer::Span;

/// Replace a node's exact source span
pub fn replace_node(span: Span, text: impl Into<String>) -> Vec<Edit> {
    vec![Edit::new(span.start, span.end, text)]
}

/// Result of scanning the text between two operands for the operator
struct OperatorContext<'a> {
    before_op: &'a str,
    after_op: &'a str,
    has_parentheses: bool,
}

/// Scan the raw text between the operands. If the gap carries a closing
/// parenthesis around the left operand (the user wrote `(a) * b`), the
/// rewrite must splice inside it rather than overwrite it.
fn extract_operator_context<'a>(text_between: &'a str, operator: &str) -> OperatorContext<'a> {
    let has_parentheses = text_between.contains(')') && text_between.contains(operator);
    if !has_parentheses {
        return OperatorContext {
            before_op: "",
            after_op: "",
            has_parentheses: false,
        };
    }

    let operator_index = text_between.find(operator).unwrap_or(0);
    let before_op = text_between[..operator_index].trim_end();
    let after_op = text_between[operator_index + operator.len()..].trim_start();
    OperatorContext {
        before_op,
        after_op,
        has_parentheses: true,
    }
}

/// Rewrite `left OP right` into `left.method(right)`.
///
/// Two edits: the operator gap becomes `.method(` and a `)` lands after
/// the right operand. Parenthesization detected in the gap is preserved.
pub fn method_call_fix(
    source: &str,
    left: Span,
    operator: &str,
    right: Span,
    method: &str,
) -> Vec<Edit> {
    let text_between = &source[left.end as usize..right.start as usize];
    let op_ctx = extract_operator_context(text_between, operator);

    if op_ctx.has_parentheses {
        return vec![
            Edit::new(
                left.end + op_ctx.before_op.len() as u32,
                right.start - op_ctx.after_op.len() as u32,
                format!(".{method}("),
            ),
            Edit::insert(right.end, ")"),
        ];
    }

    vec![
        Edit::new(left.end, right.start, format!(".{method}(")),
        Edit::insert(right.end, ")"),
    ]
}

/// Rewrite `2 * vector` into `vector.mul(2)`, relocating both operand
/// texts so each keeps its original formatting.
pub fn swapped_method_call_fix(source: &str, left: Span, right: Span, method: &str) -> Vec<Edit> {
    let left_text = &source[left.start as usize..left.end as usize];
    let right_text = &source[right.start as usize..right.end as usize];
    vec![Edit::new(
        left.start,
        right.end,
        format!("{right_text}.{method}({left_text})"),
    )]
}

/// Rewrite `-v` into `v.mul(-1)`
pub fn unary_negation_fix(source: &str, node: Span, argument: Span) -> Vec<Edit> {
    let argument_text = &source[argument.start as usize..argument.end as usize];
    vec![Edit::new(
        node.start,
        node.end,
        format!("{argument_text}.mul(-1)"),
    )]
}

/// Wrap a single bound identifier in array-destructuring brackets:
/// `const x: T = e` -> `const [x]: T = e`. The annotation text after the
/// name is untouched, so it is preserved verbatim.
pub fn destructure_identifier_fix(name_span: Span) -> Vec<Edit> {
    vec![
        Edit::insert(name_span.start, "["),
        Edit::insert(name_span.end, "]"),
    ]
}

/// Apply edits to source text. Overlapping edits are dropped (first one
/// wins after sorting), matching the host's conflict policy.
pub fn apply_edits(source: &str, mut edits: Vec<Edit>) -> String {
    let mut content = source.to_string();
    edits.sort_by(|a, b| b.start.cmp(&a.start).then(b.end.cmp(&a.end)));

    let mut last_start = content.len();
    for edit in edits {
        let start = edit.start as usize;
        let end = edit.end as usize;
        if start <= end && end <= last_start && end <= content.len() {
            content.replace_range(start..end, &edit.replacement);
            last_start = start;
        }
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span_of(source: &str, needle: &str) -> Span {
        let start = source.find(needle).expect("needle") as u32;
        Span::new(start, start + needle.len() as u32)
    }

    #[test]
    fn plain_operator_to_method() {
        let source = "const r = v1 + v2;";
        let edits = method_call_fix(source, span_of(source, "v1"), "+", span_of(source, "v2"), "add");
        assert_eq!(apply_edits(source, edits), "const r = v1.add(v2);");
    }

    #[test]
    fn swapped_operands_preserve_text() {
        let source = "const r = 2 * vector;";
        let edits =
            swapped_method_call_fix(source, span_of(source, "2"), span_of(source, "vector"), "mul");
        assert_eq!(apply_edits(source, edits), "const r = vector.mul(2);");
    }

    #[test]
    fn unary_negation() {
        let source = "const r = -vec;";
        let node = span_of(source, "-vec");
        let edits = unary_negation_fix(source, node, span_of(source, "vec"));
        assert_eq!(apply_edits(source, edits), "const r = vec.mul(-1);");
    }

    #[test]
    fn destructure_keeps_annotation() {
        let source = "const player: LuaTuple<[Player]> = wait();";
        let edits = destructure_identifier_fix(span_of(source, "player"));
        assert_eq!(
            apply_edits(source, edits),
            "const [player]: LuaTuple<[Player]> = wait();"
        );
    }

    #[test]
    fn overlapping_edits_drop_conflicts() {
        let source = "abcdef";
        let edits = vec![Edit::new(0, 4, "X"), Edit::new(2, 6, "Y")];
        let applied = apply_edits(source, edits);
        // Applied right-to-left; an edit overlapping one already applied is dropped
        assert_eq!(applied, "abY");
    }
}
