//! Rule trait and utilities

use crate::semantic_model::SemanticModel;
use crate::LintContext;
use rbxts_diagnostics::{Category, Diagnostic};
use rbxts_parser::{Expr, Stmt, TypeAnn};
use rbxts_semantic::TypeEnv;

/// A rule code identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleCode(pub &'static str);

impl RuleCode {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for RuleCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A lint rule
///
/// Rules can implement checks in three ways:
/// 1. Override `check_stmt()`/`check_expr()`/`check_type()` for per-node
///    analysis (called during the single-pass traversal)
/// 2. Override `check_post()` for post-processing after the full traversal
///    (e.g., declaration merging, unreferenced function expression names)
///
/// Handlers never mutate the tree; their only effect is pushing
/// diagnostics. A handler that cannot prove a safe rewrite reports
/// without a fix.
pub trait Rule: Send + Sync {
    /// The rule code (e.g., "RBX001")
    fn code(&self) -> RuleCode;

    /// The rule category
    fn category(&self) -> Category;

    /// Kebab-case rule name
    fn name(&self) -> &'static str;

    /// Description of what this rule checks
    fn description(&self) -> &'static str;

    /// Check a single statement during single-pass traversal.
    #[allow(unused_variables)]
    fn check_stmt<'a>(
        &self,
        ctx: &LintContext<'a>,
        model: &SemanticModel<'a>,
        env: &TypeEnv,
        stmt: &Stmt<'a>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
    }

    /// Check a single expression during single-pass traversal.
    /// `parent` is the immediately enclosing expression, when any.
    #[allow(unused_variables)]
    fn check_expr<'a>(
        &self,
        ctx: &LintContext<'a>,
        model: &SemanticModel<'a>,
        env: &TypeEnv,
        expr: &Expr<'a>,
        parent: Option<&Expr<'a>>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
    }

    /// Check a single type annotation during single-pass traversal.
    /// `parent` is the immediately enclosing annotation, when any.
    #[allow(unused_variables)]
    fn check_type<'a>(
        &self,
        ctx: &LintContext<'a>,
        ty: &TypeAnn<'a>,
        parent: Option<&TypeAnn<'a>>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
    }

    /// Run post-processing after the full AST traversal and semantic
    /// model building.
    #[allow(unused_variables)]
    fn check_post<'a>(
        &self,
        ctx: &LintContext<'a>,
        model: &SemanticModel<'a>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
    }
}
