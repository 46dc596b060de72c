//! rbxts-linter - Core linting logic and rules
//!
//! This crate provides the linting infrastructure and built-in rules.
//!
//! Architecture (single pass):
//! 1. Parse source into an AST
//! 2. Run the unified Checker which does everything in one traversal:
//!    - Builds the SemanticModel (scopes/bindings/references)
//!    - Maintains the TypeEnv (annotations + structural inference)
//!    - Runs all check_stmt/check_expr/check_type rules
//!    - Runs check_post rules over the finished model
//! 3. Return diagnostics sorted by source position

pub use rbxts_diagnostics as diagnostics;
pub use rbxts_lexer as lexer;
pub use rbxts_parser as parser;
pub use rbxts_semantic as semantic;

mod checker;
mod config;
mod context;
pub mod fixer;
pub mod keywords;
mod rule;
pub mod rules;
pub mod semantic_model;
#[cfg(test)]
pub mod test_utils;

pub use checker::{check_program, Checker};
pub use config::{ConfigError, NoAnyOptions, PreferGetPlayersOptions, RuleSettings};
pub use context::{DefaultHostInfo, HostInfo, LintContext};
pub use diagnostics::{Category, Diagnostic, Edit, Fix, Location, Severity, Suggestion};
pub use rule::{Rule, RuleCode};
pub use semantic_model::SemanticModel;

use rbxts_semantic::Database;
use std::sync::atomic::{AtomicU64, Ordering};

// Global statistics for profiling
pub static CUMULATIVE_PARSE_TIME_NS: AtomicU64 = AtomicU64::new(0);
pub static CUMULATIVE_LINT_TIME_NS: AtomicU64 = AtomicU64::new(0);

/// Get the current profiling statistics in milliseconds
pub fn get_statistics_ms() -> (f64, f64) {
    let parse = CUMULATIVE_PARSE_TIME_NS.load(Ordering::Relaxed) as f64 / 1_000_000.0;
    let lint = CUMULATIVE_LINT_TIME_NS.load(Ordering::Relaxed) as f64 / 1_000_000.0;
    (parse, lint)
}

/// Reset the profiling statistics
pub fn reset_statistics() {
    CUMULATIVE_PARSE_TIME_NS.store(0, Ordering::Relaxed);
    CUMULATIVE_LINT_TIME_NS.store(0, Ordering::Relaxed);
}

/// Lint a source file with the default rule set
pub fn lint_source(source: &str, file_path: &str) -> Vec<Diagnostic> {
    let all_rules = rules::all_rules();
    let host = DefaultHostInfo::new();
    lint_source_with_rules(source, file_path, &all_rules, &host)
}

/// Lint a source file with a pre-allocated set of rules
pub fn lint_source_with_rules(
    source: &str,
    file_path: &str,
    rules: &[Box<dyn Rule>],
    host: &dyn HostInfo,
) -> Vec<Diagnostic> {
    let start_parse = std::time::Instant::now();
    let parser = parser::Parser::new(source);
    let program = match parser.parse() {
        Ok(program) => program,
        Err(errors) => {
            let db = Database::new();
            let dummy = parser::Program {
                statements: Vec::new(),
                span: lexer::Span::new(0, 0),
            };
            let ctx = LintContext::new(source, file_path, &dummy, host, &db);
            return errors
                .into_iter()
                .map(|e| {
                    Diagnostic::error("E001", e.message, ctx.location(e.span))
                })
                .collect();
        }
    };
    let parse_time = start_parse.elapsed();

    let start_lint = std::time::Instant::now();
    let db = Database::new();
    let ctx = LintContext::new(source, file_path, &program, host, &db);
    let diags = check_program(&ctx, &program, rules);
    let lint_time = start_lint.elapsed();

    CUMULATIVE_PARSE_TIME_NS.fetch_add(parse_time.as_nanos() as u64, Ordering::Relaxed);
    CUMULATIVE_LINT_TIME_NS.fetch_add(lint_time.as_nanos() as u64, Ordering::Relaxed);

    diags
}

/// Lint a file from disk
pub fn lint_file(path: &str) -> Result<Vec<Diagnostic>, std::io::Error> {
    let source = std::fs::read_to_string(path)?;
    Ok(lint_source(&source, path))
}
