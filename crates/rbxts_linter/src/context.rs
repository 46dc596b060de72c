//! Lint context - provides information to rules during checking

use memchr::memchr_iter;
use rbxts_diagnostics::Location;
use rbxts_lexer::Span;
use rbxts_parser::Program;
use rbxts_semantic::Database;

/// Trait for providing project-level information to rules
pub trait HostInfo {
    /// npm scopes allowed by the project's tsconfig typeRoots (e.g. "@rbxts")
    fn allowed_scopes(&self) -> &[String];
}

/// Host used when no project configuration is available: the standard
/// roblox-ts layout with a single `node_modules/@rbxts` type root.
pub struct DefaultHostInfo {
    scopes: Vec<String>,
}

impl Default for DefaultHostInfo {
    fn default() -> Self {
        Self {
            scopes: vec!["@rbxts".to_string()],
        }
    }
}

impl DefaultHostInfo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HostInfo for DefaultHostInfo {
    fn allowed_scopes(&self) -> &[String] {
        &self.scopes
    }
}

/// Context provided to rules during linting
pub struct LintContext<'a> {
    /// The source code being linted
    source: &'a str,
    /// The file path
    file_path: &'a str,
    /// The parsed program
    program: &'a Program<'a>,
    /// Line starts (byte offsets)
    line_starts: Vec<usize>,
    /// Host/project information
    host: &'a dyn HostInfo,
    /// Semantic database (type shapes and signatures)
    db: &'a Database,
}

impl<'a> LintContext<'a> {
    pub fn new(
        source: &'a str,
        file_path: &'a str,
        program: &'a Program<'a>,
        host: &'a dyn HostInfo,
        db: &'a Database,
    ) -> Self {
        // Pre-compute line starts for offset -> line/column conversion
        let mut line_starts = Vec::with_capacity(source.len() / 40 + 1);
        line_starts.push(0);
        for pos in memchr_iter(b'\n', source.as_bytes()) {
            line_starts.push(pos + 1);
        }

        Self {
            source,
            file_path,
            program,
            line_starts,
            host,
            db,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn file_path(&self) -> &'a str {
        self.file_path
    }

    pub fn program(&self) -> &Program<'a> {
        self.program
    }

    pub fn host(&self) -> &dyn HostInfo {
        self.host
    }

    pub fn db(&self) -> &'a Database {
        self.db
    }

    /// Raw source text for a span
    pub fn text(&self, span: Span) -> &'a str {
        &self.source[span.start as usize..span.end as usize]
    }

    /// Convert a byte offset to line and column (1-indexed)
    pub fn offset_to_line_col(&self, offset: u32) -> (u32, u32) {
        let offset = offset as usize;

        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        };

        let line_start = self.line_starts[line];
        let column = offset - line_start + 1;

        ((line + 1) as u32, column as u32)
    }

    /// Build a diagnostic location for a span
    pub fn location(&self, span: Span) -> Location {
        let (line, column) = self.offset_to_line_col(span.start);
        Location::new(self.file_path, line, column, span.start, span.end)
    }
}
