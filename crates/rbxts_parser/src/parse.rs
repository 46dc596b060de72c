//! TypeScript parser implementation
//!
//! A hand-written recursive descent parser. It is tolerant by design:
//! unsupported constructs produce a `ParseError` for the enclosing
//! statement and the parser resynchronizes at the next statement start.

use crate::ast::*;
use rbxts_lexer::{Lexer, Span, Token, TokenKind};

/// Parse error
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// The TypeScript parser
pub struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    current: usize,
    errors: Vec<ParseError>,
    /// `in` parses as a relational operator only outside for-in heads
    in_allowed: bool,
}

type PResult<T> = Result<T, ParseError>;

impl<'a> Parser<'a> {
    /// Create a new parser from source code
    pub fn new(source: &'a str) -> Self {
        let lexer = Lexer::new(source);
        let tokens = lexer.tokenize();
        Self {
            source,
            tokens,
            current: 0,
            errors: Vec::new(),
            in_allowed: true,
        }
    }

    /// Parse the source into a program
    pub fn parse(mut self) -> Result<Program<'a>, Vec<ParseError>> {
        let start = self.current_span();
        let mut statements = Vec::with_capacity(self.tokens.len() / 10);

        while !self.is_at_end() {
            match self.parse_statement() {
                Ok(stmt) => statements.push(stmt),
                Err(e) => {
                    self.errors.push(e);
                    self.synchronize();
                }
            }
        }

        if !self.errors.is_empty() {
            return Err(self.errors);
        }

        let end = statements.last().map(|s| s.span()).unwrap_or(start);
        Ok(Program {
            statements,
            span: start.to(end),
        })
    }

    // ============================= statements =============================

    fn parse_statement(&mut self) -> PResult<Stmt<'a>> {
        match self.peek_kind() {
            TokenKind::LeftBrace => {
                let block = self.parse_block()?;
                Ok(Stmt::Block(block))
            }
            TokenKind::Semicolon => {
                let span = self.advance().span;
                Ok(Stmt::Empty { span })
            }
            TokenKind::Var | TokenKind::Let => self.parse_var_decl(false),
            TokenKind::Const => {
                if self.peek_kind_at(1) == TokenKind::Enum {
                    let start = self.advance().span;
                    self.parse_enum_decl(true, start)
                } else {
                    self.parse_var_decl(false)
                }
            }
            TokenKind::Function => self.parse_function_decl(false),
            TokenKind::Class => self.parse_class_decl(),
            TokenKind::Enum => {
                let start = self.current_span();
                self.parse_enum_decl(false, start)
            }
            TokenKind::If => self.parse_if(),
            TokenKind::For => self.parse_for(),
            TokenKind::While => self.parse_while(),
            TokenKind::Do => self.parse_do_while(),
            TokenKind::Switch => self.parse_switch(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Break => self.parse_break_continue(true),
            TokenKind::Continue => self.parse_break_continue(false),
            TokenKind::Throw => self.parse_throw(),
            TokenKind::Try => self.parse_try(),
            TokenKind::Import => {
                if self.peek_kind_at(1) == TokenKind::LeftParen {
                    self.parse_expression_statement()
                } else {
                    self.parse_import_decl()
                }
            }
            TokenKind::Export => self.parse_export_decl(),
            TokenKind::Identifier => self.parse_identifier_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    /// Statements that start with an identifier: contextual keywords and labels
    fn parse_identifier_statement(&mut self) -> PResult<Stmt<'a>> {
        let text = self.peek_text();
        let next = self.peek_kind_at(1);

        match text {
            "type" if next == TokenKind::Identifier => self.parse_type_alias(),
            "interface" if next == TokenKind::Identifier => self.parse_interface_decl(),
            "namespace" | "module"
                if matches!(next, TokenKind::Identifier | TokenKind::String) =>
            {
                self.parse_module_decl(false)
            }
            "declare"
                if matches!(
                    next,
                    TokenKind::Function
                        | TokenKind::Var
                        | TokenKind::Let
                        | TokenKind::Const
                        | TokenKind::Class
                        | TokenKind::Enum
                ) || matches!(
                    self.token_text_at(1),
                    "global" | "namespace" | "module" | "interface" | "type" | "abstract"
                ) =>
            {
                self.parse_declare_statement()
            }
            "abstract" if next == TokenKind::Class => {
                self.advance();
                self.parse_class_decl()
            }
            _ if next == TokenKind::Colon => {
                // `label: stmt` (also the `obj:method()` Lua-ism)
                let label_token = self.advance();
                let label = label_token.text(self.source);
                self.advance(); // `:`
                let body = self.parse_statement()?;
                let span = label_token.span.to(body.span());
                Ok(Stmt::Labeled {
                    label,
                    label_span: label_token.span,
                    body: Box::new(body),
                    span,
                })
            }
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_declare_statement(&mut self) -> PResult<Stmt<'a>> {
        let declare_span = self.advance().span; // `declare`

        match self.peek_kind() {
            TokenKind::Function => {
                let mut stmt = self.parse_function_decl(true)?;
                if let Stmt::FunctionDecl { declare, span, .. } = &mut stmt {
                    *declare = true;
                    *span = declare_span.to(*span);
                }
                Ok(stmt)
            }
            TokenKind::Var | TokenKind::Let | TokenKind::Const => {
                let mut stmt = self.parse_var_decl(true)?;
                if let Stmt::VarDecl { declare, span, .. } = &mut stmt {
                    *declare = true;
                    *span = declare_span.to(*span);
                }
                Ok(stmt)
            }
            TokenKind::Class => self.parse_class_decl(),
            TokenKind::Enum => self.parse_enum_decl(false, declare_span),
            TokenKind::Identifier => match self.peek_text() {
                "global" => {
                    let name_token = self.advance();
                    let body = self.parse_module_body()?;
                    let span = declare_span.to(self.prev_span());
                    Ok(Stmt::ModuleDecl {
                        name: ModuleName::Global,
                        name_span: name_token.span,
                        body: Some(body),
                        declare: true,
                        span,
                    })
                }
                "namespace" | "module" => {
                    let mut stmt = self.parse_module_decl(true)?;
                    if let Stmt::ModuleDecl { span, .. } = &mut stmt {
                        *span = declare_span.to(*span);
                    }
                    Ok(stmt)
                }
                "interface" => self.parse_interface_decl(),
                "type" => self.parse_type_alias(),
                "abstract" if self.peek_kind_at(1) == TokenKind::Class => {
                    self.advance();
                    self.parse_class_decl()
                }
                _ => Err(ParseError::new(
                    "Unexpected token after `declare`",
                    self.current_span(),
                )),
            },
            _ => Err(ParseError::new(
                "Unexpected token after `declare`",
                self.current_span(),
            )),
        }
    }

    fn parse_var_decl(&mut self, declare: bool) -> PResult<Stmt<'a>> {
        let kind_token = self.advance();
        let kind = match kind_token.kind {
            TokenKind::Var => VarKind::Var,
            TokenKind::Let => VarKind::Let,
            _ => VarKind::Const,
        };

        let mut declarations = Vec::new();
        loop {
            // A declarator-level `=` is the initializer; defaults only
            // exist inside destructuring elements and parameters.
            let pattern = self.parse_binding_target()?;
            let init = if self.eat(TokenKind::Assign) {
                Some(self.parse_assignment_expr()?)
            } else {
                None
            };
            let span = pattern
                .span()
                .to(init.as_ref().map(|e| e.span()).unwrap_or(pattern.span()));
            declarations.push(VarDeclarator {
                pattern,
                init,
                span,
            });

            if !self.eat(TokenKind::Comma) {
                break;
            }
        }

        let end = self.consume_semicolon();
        Ok(Stmt::VarDecl {
            kind,
            declarations,
            declare,
            span: kind_token.span.to(end),
        })
    }

    fn parse_function_decl(&mut self, declare: bool) -> PResult<Stmt<'a>> {
        let start = self.advance().span; // `function`
        let name_token = self.expect(TokenKind::Identifier, "Expected function name")?;
        let name = name_token.text(self.source);

        let type_params = self.parse_type_params()?;
        let params = self.parse_params()?;
        let return_type = self.parse_optional_return_type()?;

        let body = if self.peek_kind() == TokenKind::LeftBrace {
            Some(self.parse_block()?)
        } else {
            self.consume_semicolon();
            None
        };

        let span = start.to(self.prev_span());
        Ok(Stmt::FunctionDecl {
            name,
            name_span: name_token.span,
            type_params,
            params,
            return_type,
            body,
            declare,
            span,
        })
    }

    fn parse_class_decl(&mut self) -> PResult<Stmt<'a>> {
        let start = self.advance().span; // `class`
        let (name, name_span) = if self.peek_kind() == TokenKind::Identifier {
            let token = self.advance();
            (Some(token.text(self.source)), Some(token.span))
        } else {
            (None, None)
        };

        self.skip_class_heritage()?;
        let members = self.parse_class_body()?;
        let span = start.to(self.prev_span());
        Ok(Stmt::ClassDecl {
            name,
            name_span,
            members,
            span,
        })
    }

    fn skip_class_heritage(&mut self) -> PResult<()> {
        let _ = self.parse_type_params()?;
        if self.eat(TokenKind::Extends) {
            self.parse_left_hand_side()?;
            let _ = self.try_parse_type_args();
        }
        if self.peek_kind() == TokenKind::Identifier && self.peek_text() == "implements" {
            self.advance();
            loop {
                self.parse_type()?;
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        Ok(())
    }

    fn parse_class_body(&mut self) -> PResult<Vec<ClassMember<'a>>> {
        self.expect(TokenKind::LeftBrace, "Expected `{` to start class body")?;
        let mut members = Vec::new();

        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            if self.eat(TokenKind::Semicolon) {
                continue;
            }
            members.push(self.parse_class_member()?);
        }

        self.expect(TokenKind::RightBrace, "Expected `}` to close class body")?;
        Ok(members)
    }

    fn parse_class_member(&mut self) -> PResult<ClassMember<'a>> {
        let start = self.current_span();
        let mut accessibility = None;
        let mut is_static = false;
        let mut readonly = false;

        // Modifier run; a modifier word followed by `(`/`=`/`:` is a key.
        loop {
            if self.peek_kind() != TokenKind::Identifier {
                break;
            }
            let text = self.peek_text();
            let next = self.peek_kind_at(1);
            let is_key_position = matches!(
                next,
                TokenKind::LeftParen
                    | TokenKind::Assign
                    | TokenKind::Colon
                    | TokenKind::Semicolon
                    | TokenKind::Question
                    | TokenKind::Less
                    | TokenKind::RightBrace
            );
            if is_key_position {
                break;
            }
            match text {
                "public" => accessibility = Some(Accessibility::Public),
                "private" => accessibility = Some(Accessibility::Private),
                "protected" => accessibility = Some(Accessibility::Protected),
                "static" => is_static = true,
                "readonly" => readonly = true,
                "abstract" | "override" | "declare" | "async" => {}
                _ => break,
            }
            self.advance();
        }

        // Accessor kind
        let mut kind = MethodKind::Method;
        if self.peek_kind() == TokenKind::Identifier
            && matches!(self.peek_text(), "get" | "set")
            && self.starts_property_key(1)
        {
            kind = if self.peek_text() == "get" {
                MethodKind::Get
            } else {
                MethodKind::Set
            };
            self.advance();
        }

        // Index signature: `[key: string]: T`
        if self.peek_kind() == TokenKind::LeftBracket
            && self.peek_kind_at(1) == TokenKind::Identifier
            && self.peek_kind_at(2) == TokenKind::Colon
        {
            let bracket = self.advance().span;
            self.advance(); // key name
            self.advance(); // `:`
            self.parse_type()?;
            self.expect(TokenKind::RightBracket, "Expected `]` in index signature")?;
            let type_ann = if self.eat(TokenKind::Colon) {
                Some(self.parse_type()?)
            } else {
                None
            };
            let end = self.consume_semicolon();
            return Ok(ClassMember::Property {
                key: PropertyKey::Identifier {
                    name: "[index]",
                    span: bracket,
                },
                value: None,
                type_ann,
                is_static,
                readonly,
                accessibility,
                span: start.to(end),
            });
        }

        let key = self.parse_property_key()?;
        if key.name() == Some("constructor") && self.peek_kind() == TokenKind::LeftParen {
            kind = MethodKind::Constructor;
        }

        self.eat(TokenKind::Question); // optional member marker

        if self.peek_kind() == TokenKind::Less || self.peek_kind() == TokenKind::LeftParen {
            let _ = self.parse_type_params()?;
            let params = self.parse_params()?;
            let return_type = self.parse_optional_return_type()?;
            let body = if self.peek_kind() == TokenKind::LeftBrace {
                Some(self.parse_block()?)
            } else {
                self.consume_semicolon();
                None
            };
            let span = start.to(self.prev_span());
            Ok(ClassMember::Method {
                key,
                kind,
                params,
                return_type,
                body,
                is_static,
                accessibility,
                span,
            })
        } else {
            let type_ann = if self.eat(TokenKind::Colon) {
                Some(self.parse_type()?)
            } else {
                None
            };
            let value = if self.eat(TokenKind::Assign) {
                Some(self.parse_assignment_expr()?)
            } else {
                None
            };
            let end = self.consume_semicolon();
            Ok(ClassMember::Property {
                key,
                value,
                type_ann,
                is_static,
                readonly,
                accessibility,
                span: start.to(end),
            })
        }
    }

    /// Does the token at `offset` from current start a property key?
    fn starts_property_key(&self, offset: usize) -> bool {
        matches!(
            self.peek_kind_at(offset),
            TokenKind::Identifier
                | TokenKind::PrivateIdentifier
                | TokenKind::String
                | TokenKind::Number
                | TokenKind::LeftBracket
        ) || is_keyword(self.peek_kind_at(offset))
    }

    fn parse_property_key(&mut self) -> PResult<PropertyKey<'a>> {
        let token = self.advance();
        match token.kind {
            TokenKind::Identifier => Ok(PropertyKey::Identifier {
                name: token.text(self.source),
                span: token.span,
            }),
            TokenKind::PrivateIdentifier => Ok(PropertyKey::Private {
                name: &token.text(self.source)[1..],
                span: token.span,
            }),
            TokenKind::String => Ok(PropertyKey::String {
                raw: token.text(self.source),
                span: token.span,
            }),
            TokenKind::Number => Ok(PropertyKey::Number {
                raw: token.text(self.source),
                span: token.span,
            }),
            TokenKind::LeftBracket => {
                let expr = self.parse_assignment_expr()?;
                let end = self
                    .expect(TokenKind::RightBracket, "Expected `]` after computed key")?
                    .span;
                Ok(PropertyKey::Computed {
                    expr: Box::new(expr),
                    span: token.span.to(end),
                })
            }
            kind if is_keyword(kind) => Ok(PropertyKey::Identifier {
                name: token.text(self.source),
                span: token.span,
            }),
            _ => Err(ParseError::new("Expected property key", token.span)),
        }
    }

    fn parse_interface_decl(&mut self) -> PResult<Stmt<'a>> {
        let start = self.advance().span; // `interface`
        let name_token = self.expect(TokenKind::Identifier, "Expected interface name")?;
        let _ = self.parse_type_params()?;
        if self.eat(TokenKind::Extends) {
            loop {
                self.parse_type()?;
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        let members = self.parse_type_member_block()?;
        let span = start.to(self.prev_span());
        Ok(Stmt::InterfaceDecl {
            name: name_token.text(self.source),
            name_span: name_token.span,
            members,
            span,
        })
    }

    fn parse_type_alias(&mut self) -> PResult<Stmt<'a>> {
        let start = self.advance().span; // `type`
        let name_token = self.expect(TokenKind::Identifier, "Expected type alias name")?;
        let _ = self.parse_type_params()?;
        self.expect(TokenKind::Assign, "Expected `=` in type alias")?;
        let ty = self.parse_type()?;
        let end = self.consume_semicolon();
        Ok(Stmt::TypeAliasDecl {
            name: name_token.text(self.source),
            name_span: name_token.span,
            ty,
            span: start.to(end),
        })
    }

    fn parse_enum_decl(&mut self, is_const: bool, start: Span) -> PResult<Stmt<'a>> {
        self.expect(TokenKind::Enum, "Expected `enum`")?;
        let name_token = self.expect(TokenKind::Identifier, "Expected enum name")?;
        self.expect(TokenKind::LeftBrace, "Expected `{` to start enum body")?;

        let mut members = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            let member_token = self.advance();
            let member_name = match member_token.kind {
                TokenKind::Identifier | TokenKind::String => member_token.text(self.source),
                _ => {
                    return Err(ParseError::new(
                        "Expected enum member name",
                        member_token.span,
                    ))
                }
            };
            let value = if self.eat(TokenKind::Assign) {
                Some(self.parse_assignment_expr()?)
            } else {
                None
            };
            let span = member_token
                .span
                .to(value.as_ref().map(|v| v.span()).unwrap_or(member_token.span));
            members.push(EnumMember {
                name: member_name,
                value,
                span,
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }

        let end = self
            .expect(TokenKind::RightBrace, "Expected `}` to close enum body")?
            .span;
        Ok(Stmt::EnumDecl {
            name: name_token.text(self.source),
            name_span: name_token.span,
            members,
            is_const,
            span: start.to(end),
        })
    }

    fn parse_module_decl(&mut self, declare: bool) -> PResult<Stmt<'a>> {
        let start = self.advance().span; // `namespace` / `module`
        let name_token = self.advance();
        let name = match name_token.kind {
            TokenKind::Identifier => ModuleName::Identifier(name_token.text(self.source)),
            TokenKind::String => ModuleName::StringLiteral(name_token.text(self.source)),
            _ => {
                return Err(ParseError::new(
                    "Expected namespace name",
                    name_token.span,
                ))
            }
        };

        // Nested name: `namespace A.B.C { }` attributes members to the head
        while self.eat(TokenKind::Dot) {
            self.expect(TokenKind::Identifier, "Expected name after `.`")?;
        }

        let body = if self.peek_kind() == TokenKind::LeftBrace {
            Some(self.parse_module_body()?)
        } else {
            self.consume_semicolon();
            None
        };

        let span = start.to(self.prev_span());
        Ok(Stmt::ModuleDecl {
            name,
            name_span: name_token.span,
            body,
            declare,
            span,
        })
    }

    fn parse_module_body(&mut self) -> PResult<Vec<Stmt<'a>>> {
        self.expect(TokenKind::LeftBrace, "Expected `{` to start module body")?;
        let mut statements = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }
        self.expect(TokenKind::RightBrace, "Expected `}` to close module body")?;
        Ok(statements)
    }

    fn parse_import_decl(&mut self) -> PResult<Stmt<'a>> {
        let start = self.advance().span; // `import`

        // Side-effect import: `import "m";`
        if self.peek_kind() == TokenKind::String {
            let source_token = self.advance();
            let end = self.consume_semicolon();
            return Ok(Stmt::ImportDecl {
                specifiers: Vec::new(),
                source: source_token.text(self.source),
                source_span: source_token.span,
                type_only: false,
                span: start.to(end),
            });
        }

        let type_only = self.peek_kind() == TokenKind::Identifier
            && self.peek_text() == "type"
            && matches!(
                self.peek_kind_at(1),
                TokenKind::Identifier | TokenKind::LeftBrace | TokenKind::Star
            );
        if type_only {
            self.advance();
        }

        let mut specifiers = Vec::new();

        if self.peek_kind() == TokenKind::Identifier {
            let token = self.advance();
            specifiers.push(ImportSpecifier::Default {
                local: token.text(self.source),
                span: token.span,
            });
            self.eat(TokenKind::Comma);
        }

        if self.eat(TokenKind::Star) {
            self.expect_identifier_text("as")?;
            let token = self.expect(TokenKind::Identifier, "Expected namespace alias")?;
            specifiers.push(ImportSpecifier::Namespace {
                local: token.text(self.source),
                span: token.span,
            });
        } else if self.eat(TokenKind::LeftBrace) {
            while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
                // Per-specifier `type` marker
                if self.peek_kind() == TokenKind::Identifier
                    && self.peek_text() == "type"
                    && self.peek_kind_at(1) == TokenKind::Identifier
                {
                    self.advance();
                }
                let imported_token = self.advance();
                let imported = imported_token.text(self.source);
                let (local, end) = if self.peek_kind() == TokenKind::Identifier
                    && self.peek_text() == "as"
                {
                    self.advance();
                    let local_token =
                        self.expect(TokenKind::Identifier, "Expected import alias")?;
                    (local_token.text(self.source), local_token.span)
                } else {
                    (imported, imported_token.span)
                };
                specifiers.push(ImportSpecifier::Named {
                    imported,
                    local,
                    span: imported_token.span.to(end),
                });
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::RightBrace, "Expected `}` in import clause")?;
        }

        self.expect_identifier_text("from")?;
        let source_token = self.expect(TokenKind::String, "Expected module source string")?;
        let end = self.consume_semicolon();

        Ok(Stmt::ImportDecl {
            specifiers,
            source: source_token.text(self.source),
            source_span: source_token.span,
            type_only,
            span: start.to(end),
        })
    }

    fn parse_export_decl(&mut self) -> PResult<Stmt<'a>> {
        let start = self.advance().span; // `export`

        match self.peek_kind() {
            TokenKind::Assign => {
                self.advance();
                let expr = self.parse_assignment_expr()?;
                let end = self.consume_semicolon();
                Ok(Stmt::ExportAssignment {
                    expr,
                    span: start.to(end),
                })
            }
            TokenKind::Star => {
                self.advance();
                if self.peek_kind() == TokenKind::Identifier && self.peek_text() == "as" {
                    self.advance();
                    self.advance();
                }
                self.expect_identifier_text("from")?;
                let source_token =
                    self.expect(TokenKind::String, "Expected module source string")?;
                let end = self.consume_semicolon();
                Ok(Stmt::ExportAll {
                    source: source_token.text(self.source),
                    span: start.to(end),
                })
            }
            TokenKind::Default => {
                self.advance();
                let expr = self.parse_assignment_expr()?;
                let end = self.consume_semicolon();
                Ok(Stmt::ExportDefault {
                    expr,
                    span: start.to(end),
                })
            }
            TokenKind::LeftBrace => self.parse_export_specifiers(start),
            TokenKind::Identifier if self.peek_text() == "type" => {
                if self.peek_kind_at(1) == TokenKind::LeftBrace {
                    self.advance();
                    self.parse_export_specifiers(start)
                } else {
                    let declaration = self.parse_statement()?;
                    let span = start.to(declaration.span());
                    Ok(Stmt::ExportNamed {
                        declaration: Some(Box::new(declaration)),
                        specifiers: Vec::new(),
                        source: None,
                        span,
                    })
                }
            }
            _ => {
                let declaration = self.parse_statement()?;
                let span = start.to(declaration.span());
                Ok(Stmt::ExportNamed {
                    declaration: Some(Box::new(declaration)),
                    specifiers: Vec::new(),
                    source: None,
                    span,
                })
            }
        }
    }

    fn parse_export_specifiers(&mut self, start: Span) -> PResult<Stmt<'a>> {
        self.expect(TokenKind::LeftBrace, "Expected `{` in export clause")?;
        let mut specifiers = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            let local_token = self.advance();
            let local = local_token.text(self.source);
            let (exported, end) =
                if self.peek_kind() == TokenKind::Identifier && self.peek_text() == "as" {
                    self.advance();
                    let token = self.advance();
                    (token.text(self.source), token.span)
                } else {
                    (local, local_token.span)
                };
            specifiers.push(ExportSpecifier {
                local,
                exported,
                span: local_token.span.to(end),
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RightBrace, "Expected `}` in export clause")?;

        let source = if self.peek_kind() == TokenKind::Identifier && self.peek_text() == "from" {
            self.advance();
            let token = self.expect(TokenKind::String, "Expected module source string")?;
            Some(token.text(self.source))
        } else {
            None
        };
        let end = self.consume_semicolon();

        Ok(Stmt::ExportNamed {
            declaration: None,
            specifiers,
            source,
            span: start.to(end),
        })
    }

    fn parse_if(&mut self) -> PResult<Stmt<'a>> {
        let start = self.advance().span; // `if`
        self.expect(TokenKind::LeftParen, "Expected `(` after `if`")?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RightParen, "Expected `)` after if condition")?;
        let then_branch = Box::new(self.parse_statement()?);
        let else_branch = if self.eat(TokenKind::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };
        let span = start.to(self.prev_span());
        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
            span,
        })
    }

    fn parse_for(&mut self) -> PResult<Stmt<'a>> {
        let start = self.advance().span; // `for`
        self.expect(TokenKind::LeftParen, "Expected `(` after `for`")?;

        // Fresh binding head: `for (const x ...`
        if matches!(
            self.peek_kind(),
            TokenKind::Var | TokenKind::Let | TokenKind::Const
        ) {
            let kind_token = self.advance();
            let kind = match kind_token.kind {
                TokenKind::Var => VarKind::Var,
                TokenKind::Let => VarKind::Let,
                _ => VarKind::Const,
            };
            // No top-level default here: a `=` after the pattern is the
            // classic-for initializer, not a destructuring default.
            let pattern = self.parse_binding_target()?;

            if self.peek_kind() == TokenKind::In {
                self.advance();
                let right = self.parse_expression()?;
                self.expect(TokenKind::RightParen, "Expected `)` after for-in head")?;
                let body = Box::new(self.parse_statement()?);
                let span = start.to(body.span());
                return Ok(Stmt::ForIn {
                    left: ForHead::VarDecl {
                        kind,
                        span: kind_token.span.to(pattern.span()),
                        pattern,
                    },
                    right,
                    body,
                    span,
                });
            }
            if self.peek_kind() == TokenKind::Identifier && self.peek_text() == "of" {
                self.advance();
                let right = self.parse_expression()?;
                self.expect(TokenKind::RightParen, "Expected `)` after for-of head")?;
                let body = Box::new(self.parse_statement()?);
                let span = start.to(body.span());
                return Ok(Stmt::ForOf {
                    left: ForHead::VarDecl {
                        kind,
                        span: kind_token.span.to(pattern.span()),
                        pattern,
                    },
                    right,
                    body,
                    span,
                });
            }

            // Classic numeric for with declarations
            let mut declarations = Vec::new();
            let init = if self.eat(TokenKind::Assign) {
                Some(self.parse_assignment_expr()?)
            } else {
                None
            };
            let decl_span = pattern
                .span()
                .to(init.as_ref().map(|e| e.span()).unwrap_or(pattern.span()));
            declarations.push(VarDeclarator {
                pattern,
                init,
                span: decl_span,
            });
            while self.eat(TokenKind::Comma) {
                let pattern = self.parse_binding_target()?;
                let init = if self.eat(TokenKind::Assign) {
                    Some(self.parse_assignment_expr()?)
                } else {
                    None
                };
                let span = pattern
                    .span()
                    .to(init.as_ref().map(|e| e.span()).unwrap_or(pattern.span()));
                declarations.push(VarDeclarator {
                    pattern,
                    init,
                    span,
                });
            }
            let init_stmt = Stmt::VarDecl {
                kind,
                declarations,
                declare: false,
                span: kind_token.span.to(self.prev_span()),
            };
            return self.finish_classic_for(start, Some(Box::new(init_stmt)));
        }

        // Empty init: `for (;;)`
        if self.check(TokenKind::Semicolon) {
            return self.finish_classic_for(start, None);
        }

        // Expression head
        self.in_allowed = false;
        let expr = self.parse_expression();
        self.in_allowed = true;
        let expr = expr?;

        if self.peek_kind() == TokenKind::In {
            self.advance();
            let right = self.parse_expression()?;
            self.expect(TokenKind::RightParen, "Expected `)` after for-in head")?;
            let body = Box::new(self.parse_statement()?);
            let span = start.to(body.span());
            return Ok(Stmt::ForIn {
                left: ForHead::Expr(expr),
                right,
                body,
                span,
            });
        }
        if self.peek_kind() == TokenKind::Identifier && self.peek_text() == "of" {
            self.advance();
            let right = self.parse_expression()?;
            self.expect(TokenKind::RightParen, "Expected `)` after for-of head")?;
            let body = Box::new(self.parse_statement()?);
            let span = start.to(body.span());
            return Ok(Stmt::ForOf {
                left: ForHead::Expr(expr),
                right,
                body,
                span,
            });
        }

        let expr_span = expr.span();
        let init_stmt = Stmt::Expr {
            expr,
            span: expr_span,
        };
        self.finish_classic_for(start, Some(Box::new(init_stmt)))
    }

    fn finish_classic_for(
        &mut self,
        start: Span,
        init: Option<Box<Stmt<'a>>>,
    ) -> PResult<Stmt<'a>> {
        self.expect(TokenKind::Semicolon, "Expected `;` after for initializer")?;
        let condition = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::Semicolon, "Expected `;` after for condition")?;
        let update = if self.check(TokenKind::RightParen) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::RightParen, "Expected `)` after for clauses")?;
        let body = Box::new(self.parse_statement()?);
        let span = start.to(body.span());
        Ok(Stmt::For {
            init,
            condition,
            update,
            body,
            span,
        })
    }

    fn parse_while(&mut self) -> PResult<Stmt<'a>> {
        let start = self.advance().span;
        self.expect(TokenKind::LeftParen, "Expected `(` after `while`")?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RightParen, "Expected `)` after while condition")?;
        let body = Box::new(self.parse_statement()?);
        let span = start.to(body.span());
        Ok(Stmt::While {
            condition,
            body,
            span,
        })
    }

    fn parse_do_while(&mut self) -> PResult<Stmt<'a>> {
        let start = self.advance().span;
        let body = Box::new(self.parse_statement()?);
        self.expect(TokenKind::While, "Expected `while` after do body")?;
        self.expect(TokenKind::LeftParen, "Expected `(` after `while`")?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RightParen, "Expected `)` after do-while condition")?;
        let end = self.consume_semicolon();
        Ok(Stmt::DoWhile {
            body,
            condition,
            span: start.to(end),
        })
    }

    fn parse_switch(&mut self) -> PResult<Stmt<'a>> {
        let start = self.advance().span;
        self.expect(TokenKind::LeftParen, "Expected `(` after `switch`")?;
        let discriminant = self.parse_expression()?;
        self.expect(TokenKind::RightParen, "Expected `)` after switch value")?;
        self.expect(TokenKind::LeftBrace, "Expected `{` to start switch body")?;

        let mut cases = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            let case_start = self.current_span();
            let test = if self.eat(TokenKind::Case) {
                let expr = self.parse_expression()?;
                Some(expr)
            } else {
                self.expect(TokenKind::Default, "Expected `case` or `default`")?;
                None
            };
            self.expect(TokenKind::Colon, "Expected `:` after case label")?;

            let mut body = Vec::new();
            while !matches!(
                self.peek_kind(),
                TokenKind::Case | TokenKind::Default | TokenKind::RightBrace | TokenKind::Eof
            ) {
                body.push(self.parse_statement()?);
            }
            cases.push(SwitchCase {
                test,
                body,
                span: case_start.to(self.prev_span()),
            });
        }

        let end = self
            .expect(TokenKind::RightBrace, "Expected `}` to close switch body")?
            .span;
        Ok(Stmt::Switch {
            discriminant,
            cases,
            span: start.to(end),
        })
    }

    fn parse_return(&mut self) -> PResult<Stmt<'a>> {
        let start = self.advance().span;
        let value = if matches!(
            self.peek_kind(),
            TokenKind::Semicolon | TokenKind::RightBrace | TokenKind::Eof
        ) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        let end = self.consume_semicolon();
        Ok(Stmt::Return {
            value,
            span: start.to(end),
        })
    }

    fn parse_break_continue(&mut self, is_break: bool) -> PResult<Stmt<'a>> {
        let start = self.advance().span;
        let label = if self.peek_kind() == TokenKind::Identifier {
            Some(self.advance().text(self.source))
        } else {
            None
        };
        let end = self.consume_semicolon();
        let span = start.to(end);
        if is_break {
            Ok(Stmt::Break { label, span })
        } else {
            Ok(Stmt::Continue { label, span })
        }
    }

    fn parse_throw(&mut self) -> PResult<Stmt<'a>> {
        let start = self.advance().span;
        let value = self.parse_expression()?;
        let end = self.consume_semicolon();
        Ok(Stmt::Throw {
            value,
            span: start.to(end),
        })
    }

    fn parse_try(&mut self) -> PResult<Stmt<'a>> {
        let start = self.advance().span;
        let try_block = self.parse_block()?;

        let mut catch_param = None;
        let mut catch_block = None;
        if self.eat(TokenKind::Catch) {
            if self.eat(TokenKind::LeftParen) {
                catch_param = Some(self.parse_binding_pattern()?);
                self.expect(TokenKind::RightParen, "Expected `)` after catch parameter")?;
            }
            catch_block = Some(self.parse_block()?);
        }

        let finally_block = if self.eat(TokenKind::Finally) {
            Some(self.parse_block()?)
        } else {
            None
        };

        let span = start.to(self.prev_span());
        Ok(Stmt::TryCatch {
            try_block,
            catch_param,
            catch_block,
            finally_block,
            span,
        })
    }

    fn parse_expression_statement(&mut self) -> PResult<Stmt<'a>> {
        let expr = self.parse_expression()?;
        let end = self.consume_semicolon();
        let span = expr.span().to(end);
        Ok(Stmt::Expr { expr, span })
    }

    fn parse_block(&mut self) -> PResult<Block<'a>> {
        let start = self
            .expect(TokenKind::LeftBrace, "Expected `{` to start block")?
            .span;
        let mut statements = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }
        let end = self
            .expect(TokenKind::RightBrace, "Expected `}` to close block")?
            .span;
        Ok(Block {
            statements,
            span: start.to(end),
        })
    }

    // ============================= patterns ==============================

    fn parse_binding_pattern(&mut self) -> PResult<Pattern<'a>> {
        let mut pattern = self.parse_binding_target()?;

        if self.eat(TokenKind::Assign) {
            let default = self.parse_assignment_expr()?;
            let span = pattern.span().to(default.span());
            pattern = Pattern::Assign {
                target: Box::new(pattern),
                default: Box::new(default),
                span,
            };
        }
        Ok(pattern)
    }

    fn parse_binding_target(&mut self) -> PResult<Pattern<'a>> {
        match self.peek_kind() {
            TokenKind::Identifier | TokenKind::This => {
                let token = self.advance();
                let optional = self.eat(TokenKind::Question);
                let type_ann = if self.eat(TokenKind::Colon) {
                    Some(self.parse_type()?)
                } else {
                    None
                };
                let span = token
                    .span
                    .to(type_ann.as_ref().map(|t| t.span()).unwrap_or(token.span));
                Ok(Pattern::Identifier {
                    name: token.text(self.source),
                    type_ann,
                    optional,
                    span,
                })
            }
            TokenKind::LeftBracket => {
                let start = self.advance().span;
                let mut elements = Vec::new();
                while !self.check(TokenKind::RightBracket) && !self.is_at_end() {
                    if self.check(TokenKind::Comma) {
                        // Elision hole
                        self.advance();
                        elements.push(None);
                        continue;
                    }
                    if self.check(TokenKind::DotDotDot) {
                        let rest_start = self.advance().span;
                        let argument = self.parse_binding_target()?;
                        let span = rest_start.to(argument.span());
                        elements.push(Some(Pattern::Rest {
                            argument: Box::new(argument),
                            span,
                        }));
                    } else {
                        elements.push(Some(self.parse_binding_pattern()?));
                    }
                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
                let mut end = self
                    .expect(TokenKind::RightBracket, "Expected `]` in array pattern")?
                    .span;
                let type_ann = if self.eat(TokenKind::Colon) {
                    let ty = self.parse_type()?;
                    end = ty.span();
                    Some(ty)
                } else {
                    None
                };
                Ok(Pattern::Array {
                    elements,
                    type_ann,
                    span: start.to(end),
                })
            }
            TokenKind::LeftBrace => {
                let start = self.advance().span;
                let mut properties = Vec::new();
                while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
                    if self.check(TokenKind::DotDotDot) {
                        let rest_start = self.advance().span;
                        let argument = self.parse_binding_target()?;
                        let span = rest_start.to(argument.span());
                        properties.push(ObjectPatternProp::Rest {
                            argument: Box::new(argument),
                            span,
                        });
                    } else {
                        let key_token = self.advance();
                        let key = key_token.text(self.source);
                        if self.eat(TokenKind::Colon) {
                            let value = self.parse_binding_pattern()?;
                            let span = key_token.span.to(value.span());
                            properties.push(ObjectPatternProp::KeyValue {
                                key,
                                value: Box::new(value),
                                span,
                            });
                        } else {
                            let default = if self.eat(TokenKind::Assign) {
                                Some(Box::new(self.parse_assignment_expr()?))
                            } else {
                                None
                            };
                            let span = key_token.span.to(
                                default
                                    .as_ref()
                                    .map(|d| d.span())
                                    .unwrap_or(key_token.span),
                            );
                            properties.push(ObjectPatternProp::Shorthand {
                                name: key,
                                default,
                                span,
                            });
                        }
                    }
                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
                let mut end = self
                    .expect(TokenKind::RightBrace, "Expected `}` in object pattern")?
                    .span;
                let type_ann = if self.eat(TokenKind::Colon) {
                    let ty = self.parse_type()?;
                    end = ty.span();
                    Some(ty)
                } else {
                    None
                };
                Ok(Pattern::Object {
                    properties,
                    type_ann,
                    span: start.to(end),
                })
            }
            _ => Err(ParseError::new(
                "Expected binding pattern",
                self.current_span(),
            )),
        }
    }

    fn parse_params(&mut self) -> PResult<Vec<Param<'a>>> {
        self.expect(TokenKind::LeftParen, "Expected `(` to start parameter list")?;
        let mut params = Vec::new();
        while !self.check(TokenKind::RightParen) && !self.is_at_end() {
            let start = self.current_span();

            let mut accessibility = None;
            while self.peek_kind() == TokenKind::Identifier
                && matches!(
                    self.peek_text(),
                    "public" | "private" | "protected" | "readonly"
                )
                && matches!(
                    self.peek_kind_at(1),
                    TokenKind::Identifier | TokenKind::This
                )
            {
                match self.peek_text() {
                    "public" => accessibility = Some(Accessibility::Public),
                    "private" => accessibility = Some(Accessibility::Private),
                    "protected" => accessibility = Some(Accessibility::Protected),
                    _ => {}
                }
                self.advance();
            }

            let pattern = if self.check(TokenKind::DotDotDot) {
                let rest_start = self.advance().span;
                let argument = self.parse_binding_target()?;
                let span = rest_start.to(argument.span());
                Pattern::Rest {
                    argument: Box::new(argument),
                    span,
                }
            } else {
                self.parse_binding_pattern()?
            };

            let span = start.to(pattern.span());
            params.push(Param {
                pattern,
                accessibility,
                span,
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RightParen, "Expected `)` to close parameter list")?;
        Ok(params)
    }

    fn parse_optional_return_type(&mut self) -> PResult<Option<TypeAnn<'a>>> {
        if self.eat(TokenKind::Colon) {
            // Type predicates: `x is T`
            if self.peek_kind() == TokenKind::Identifier
                && self.peek_kind_at(1) == TokenKind::Identifier
                && self.token_text_at(1) == "is"
            {
                self.advance(); // param name
                self.advance(); // `is`
                let ty = self.parse_type()?;
                return Ok(Some(TypeAnn::Boolean { span: ty.span() }));
            }
            Ok(Some(self.parse_type()?))
        } else {
            Ok(None)
        }
    }

    // =============================== types ===============================

    fn parse_type_params(&mut self) -> PResult<Vec<TypeParam<'a>>> {
        if !self.check(TokenKind::Less) {
            return Ok(Vec::new());
        }
        self.advance();
        let mut params = Vec::new();
        loop {
            let name_token = self.expect(TokenKind::Identifier, "Expected type parameter name")?;
            let constraint = if self.eat(TokenKind::Extends) {
                Some(self.parse_type()?)
            } else {
                None
            };
            let default = if self.eat(TokenKind::Assign) {
                Some(self.parse_type()?)
            } else {
                None
            };
            let span = name_token.span.to(self.prev_span());
            params.push(TypeParam {
                name: name_token.text(self.source),
                constraint,
                default,
                span,
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect_type_list_end()?;
        Ok(params)
    }

    fn parse_type(&mut self) -> PResult<TypeAnn<'a>> {
        let first = self.parse_intersection_type()?;

        if !self.check(TokenKind::BitOr) {
            return Ok(first);
        }

        let mut constituents = vec![first];
        while self.eat(TokenKind::BitOr) {
            constituents.push(self.parse_intersection_type()?);
        }
        let span = constituents[0]
            .span()
            .to(constituents.last().map(|t| t.span()).unwrap_or_default());
        Ok(TypeAnn::Union { constituents, span })
    }

    fn parse_intersection_type(&mut self) -> PResult<TypeAnn<'a>> {
        let first = self.parse_postfix_type()?;

        if !self.check(TokenKind::BitAnd) {
            return Ok(first);
        }

        let mut constituents = vec![first];
        while self.eat(TokenKind::BitAnd) {
            constituents.push(self.parse_postfix_type()?);
        }
        let span = constituents[0]
            .span()
            .to(constituents.last().map(|t| t.span()).unwrap_or_default());
        Ok(TypeAnn::Intersection { constituents, span })
    }

    fn parse_postfix_type(&mut self) -> PResult<TypeAnn<'a>> {
        let mut ty = self.parse_primary_type()?;

        while self.check(TokenKind::LeftBracket)
            && self.peek_kind_at(1) == TokenKind::RightBracket
        {
            self.advance();
            let end = self.advance().span;
            let span = ty.span().to(end);
            ty = TypeAnn::Array {
                element: Box::new(ty),
                span,
            };
        }
        Ok(ty)
    }

    fn parse_primary_type(&mut self) -> PResult<TypeAnn<'a>> {
        let token = *self.peek();
        match token.kind {
            TokenKind::Identifier => {
                let text = token.text(self.source);
                match text {
                    "any" => {
                        self.advance();
                        Ok(TypeAnn::Any { span: token.span })
                    }
                    "unknown" => {
                        self.advance();
                        Ok(TypeAnn::Unknown { span: token.span })
                    }
                    "never" => {
                        self.advance();
                        Ok(TypeAnn::Never { span: token.span })
                    }
                    "undefined" => {
                        self.advance();
                        Ok(TypeAnn::Undefined { span: token.span })
                    }
                    "string" => {
                        self.advance();
                        Ok(TypeAnn::String { span: token.span })
                    }
                    "number" => {
                        self.advance();
                        Ok(TypeAnn::Number { span: token.span })
                    }
                    "boolean" => {
                        self.advance();
                        Ok(TypeAnn::Boolean { span: token.span })
                    }
                    "object" => {
                        self.advance();
                        Ok(TypeAnn::ObjectLiteral {
                            members: Vec::new(),
                            span: token.span,
                        })
                    }
                    "keyof" => {
                        self.advance();
                        let inner = self.parse_postfix_type()?;
                        let span = token.span.to(inner.span());
                        Ok(TypeAnn::Keyof {
                            ty: Box::new(inner),
                            span,
                        })
                    }
                    "readonly" => {
                        self.advance();
                        self.parse_postfix_type()
                    }
                    _ => self.parse_type_reference(),
                }
            }
            TokenKind::Null => {
                self.advance();
                Ok(TypeAnn::Null { span: token.span })
            }
            TokenKind::Void => {
                self.advance();
                Ok(TypeAnn::Void { span: token.span })
            }
            TokenKind::Typeof => {
                self.advance();
                let name_token = self.expect(TokenKind::Identifier, "Expected name after `typeof`")?;
                let mut end = name_token.span;
                while self.eat(TokenKind::Dot) {
                    end = self
                        .expect(TokenKind::Identifier, "Expected name after `.`")?
                        .span;
                }
                Ok(TypeAnn::TypeofQuery {
                    name: name_token.text(self.source),
                    span: token.span.to(end),
                })
            }
            TokenKind::String => {
                self.advance();
                Ok(TypeAnn::Literal {
                    value: Literal::String(token.text(self.source)),
                    span: token.span,
                })
            }
            TokenKind::Number => {
                self.advance();
                let value = parse_number(token.text(self.source));
                Ok(TypeAnn::Literal {
                    value: Literal::Number(value),
                    span: token.span,
                })
            }
            TokenKind::Minus if self.peek_kind_at(1) == TokenKind::Number => {
                self.advance();
                let num_token = self.advance();
                let value = -parse_number(num_token.text(self.source));
                Ok(TypeAnn::Literal {
                    value: Literal::Number(value),
                    span: token.span.to(num_token.span),
                })
            }
            TokenKind::True | TokenKind::False => {
                self.advance();
                Ok(TypeAnn::Literal {
                    value: Literal::Boolean(token.kind == TokenKind::True),
                    span: token.span,
                })
            }
            TokenKind::LeftBracket => {
                self.advance();
                let mut elements = Vec::new();
                while !self.check(TokenKind::RightBracket) && !self.is_at_end() {
                    // Named tuple member: `name: T`
                    if self.peek_kind() == TokenKind::Identifier
                        && self.peek_kind_at(1) == TokenKind::Colon
                    {
                        self.advance();
                        self.advance();
                    }
                    elements.push(self.parse_type()?);
                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
                let end = self
                    .expect(TokenKind::RightBracket, "Expected `]` in tuple type")?
                    .span;
                Ok(TypeAnn::Tuple {
                    elements,
                    span: token.span.to(end),
                })
            }
            TokenKind::LeftBrace => {
                self.parse_object_type()
            }
            TokenKind::LeftParen => {
                // Function type `(a: A) => R` or parenthesized type
                if self.looks_like_function_type() {
                    self.skip_balanced(TokenKind::LeftParen, TokenKind::RightParen)?;
                    self.expect(TokenKind::Arrow, "Expected `=>` in function type")?;
                    let return_type = self.parse_type()?;
                    let span = token.span.to(return_type.span());
                    Ok(TypeAnn::Function {
                        return_type: Some(Box::new(return_type)),
                        span,
                    })
                } else {
                    self.advance();
                    let inner = self.parse_type()?;
                    let end = self
                        .expect(TokenKind::RightParen, "Expected `)` in type")?
                        .span;
                    Ok(TypeAnn::Parenthesized {
                        ty: Box::new(inner),
                        span: token.span.to(end),
                    })
                }
            }
            TokenKind::New => {
                // Constructor type `new () => T`
                self.advance();
                self.skip_balanced(TokenKind::LeftParen, TokenKind::RightParen)?;
                self.expect(TokenKind::Arrow, "Expected `=>` in constructor type")?;
                let return_type = self.parse_type()?;
                let span = token.span.to(return_type.span());
                Ok(TypeAnn::Function {
                    return_type: Some(Box::new(return_type)),
                    span,
                })
            }
            _ => Err(ParseError::new("Expected type", token.span)),
        }
    }

    fn parse_object_type(&mut self) -> PResult<TypeAnn<'a>> {
        let start = self.current_span();
        let members = self.parse_type_member_block()?;
        let span = start.to(self.prev_span());
        Ok(TypeAnn::ObjectLiteral { members, span })
    }

    fn parse_type_member_block(&mut self) -> PResult<Vec<TypeMember<'a>>> {
        self.expect(TokenKind::LeftBrace, "Expected `{` to start type members")?;
        let mut members = Vec::new();

        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            if self.eat(TokenKind::Semicolon) || self.eat(TokenKind::Comma) {
                continue;
            }

            let start = self.current_span();

            // readonly marker
            if self.peek_kind() == TokenKind::Identifier
                && self.peek_text() == "readonly"
                && self.starts_property_key(1)
            {
                self.advance();
            }

            // Index signature / mapped-type-ish member: skip the bracket group
            if self.check(TokenKind::LeftBracket) {
                self.skip_balanced(TokenKind::LeftBracket, TokenKind::RightBracket)?;
                let ty = if self.eat(TokenKind::Colon) {
                    Some(self.parse_type()?)
                } else {
                    None
                };
                members.push(TypeMember {
                    name: "[index]",
                    ty,
                    is_method: false,
                    span: start.to(self.prev_span()),
                });
                continue;
            }

            let name_token = self.advance();
            let name = match name_token.kind {
                TokenKind::Identifier | TokenKind::String | TokenKind::Number => {
                    name_token.text(self.source)
                }
                kind if is_keyword(kind) => name_token.text(self.source),
                _ => {
                    return Err(ParseError::new(
                        "Expected type member name",
                        name_token.span,
                    ))
                }
            };

            self.eat(TokenKind::Question);

            if self.check(TokenKind::Less) || self.check(TokenKind::LeftParen) {
                // Method signature
                if self.check(TokenKind::Less) {
                    self.skip_balanced_angles()?;
                }
                self.skip_balanced(TokenKind::LeftParen, TokenKind::RightParen)?;
                let ty = if self.eat(TokenKind::Colon) {
                    Some(self.parse_type()?)
                } else {
                    None
                };
                members.push(TypeMember {
                    name,
                    ty,
                    is_method: true,
                    span: start.to(self.prev_span()),
                });
            } else {
                let ty = if self.eat(TokenKind::Colon) {
                    Some(self.parse_type()?)
                } else {
                    None
                };
                members.push(TypeMember {
                    name,
                    ty,
                    is_method: false,
                    span: start.to(self.prev_span()),
                });
            }
        }

        self.expect(TokenKind::RightBrace, "Expected `}` to close type members")?;
        Ok(members)
    }

    fn parse_type_reference(&mut self) -> PResult<TypeAnn<'a>> {
        let name_token = self.advance();
        let mut name_end = name_token.span;
        while self.check(TokenKind::Dot) && self.peek_kind_at(1) == TokenKind::Identifier {
            self.advance();
            name_end = self.advance().span;
        }
        let name_span = name_token.span.to(name_end);
        let name = &self.source[name_span.start as usize..name_span.end as usize];

        let type_args = if self.check(TokenKind::Less) {
            self.advance();
            let mut args = Vec::new();
            loop {
                args.push(self.parse_type()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.expect_type_list_end()?;
            args
        } else {
            Vec::new()
        };

        let span = name_span.to(self.prev_span());
        Ok(TypeAnn::Reference {
            name,
            name_span,
            type_args,
            span,
        })
    }

    /// Consume a `>` closing a type list, splitting `>>` / `>>>` tokens the
    /// lexer produced eagerly.
    fn expect_type_list_end(&mut self) -> PResult<()> {
        match self.peek_kind() {
            TokenKind::Greater => {
                self.advance();
                Ok(())
            }
            TokenKind::ShiftRight => {
                let token = &mut self.tokens[self.current];
                token.kind = TokenKind::Greater;
                token.span.start += 1;
                Ok(())
            }
            TokenKind::UnsignedShiftRight => {
                let token = &mut self.tokens[self.current];
                token.kind = TokenKind::ShiftRight;
                token.span.start += 1;
                Ok(())
            }
            TokenKind::GreaterEqual => {
                let token = &mut self.tokens[self.current];
                token.kind = TokenKind::Assign;
                token.span.start += 1;
                Ok(())
            }
            _ => Err(ParseError::new(
                "Expected `>` to close type arguments",
                self.current_span(),
            )),
        }
    }

    fn looks_like_function_type(&self) -> bool {
        // `(` ... `)` `=>` at the same nesting level
        let mut depth = 0usize;
        let mut index = self.current;
        while let Some(token) = self.tokens.get(index) {
            match token.kind {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => {
                    depth -= 1;
                    if depth == 0 {
                        return self
                            .tokens
                            .get(index + 1)
                            .is_some_and(|t| t.kind == TokenKind::Arrow);
                    }
                }
                TokenKind::Eof => return false,
                _ => {}
            }
            index += 1;
        }
        false
    }

    fn skip_balanced(&mut self, open: TokenKind, close: TokenKind) -> PResult<()> {
        self.expect(open, "Expected opening delimiter")?;
        let mut depth = 1usize;
        while depth > 0 {
            let token = self.advance();
            if token.kind == open {
                depth += 1;
            } else if token.kind == close {
                depth -= 1;
            } else if token.kind == TokenKind::Eof {
                return Err(ParseError::new("Unbalanced delimiters", token.span));
            }
        }
        Ok(())
    }

    fn skip_balanced_angles(&mut self) -> PResult<()> {
        self.expect(TokenKind::Less, "Expected `<`")?;
        let mut depth = 1usize;
        while depth > 0 {
            let token = self.advance();
            match token.kind {
                TokenKind::Less => depth += 1,
                TokenKind::Greater => depth -= 1,
                TokenKind::ShiftRight => depth = depth.saturating_sub(2),
                TokenKind::UnsignedShiftRight => depth = depth.saturating_sub(3),
                TokenKind::Eof => return Err(ParseError::new("Unbalanced `<`", token.span)),
                _ => {}
            }
        }
        Ok(())
    }

    /// Speculatively parse `<TypeArgs>`; restores the cursor on failure.
    fn try_parse_type_args(&mut self) -> Option<Vec<TypeAnn<'a>>> {
        if !self.check(TokenKind::Less) {
            return None;
        }
        let saved = self.current;
        self.advance();
        let mut args = Vec::new();
        loop {
            match self.parse_type() {
                Ok(ty) => args.push(ty),
                Err(_) => {
                    self.current = saved;
                    return None;
                }
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        if self.expect_type_list_end().is_err() {
            self.current = saved;
            return None;
        }
        Some(args)
    }

    // ============================ expressions ============================

    fn parse_expression(&mut self) -> PResult<Expr<'a>> {
        self.parse_assignment_expr()
    }

    fn parse_assignment_expr(&mut self) -> PResult<Expr<'a>> {
        // Arrow functions are committed to by speculation before anything else
        if let Some(arrow) = self.try_parse_arrow_function() {
            return arrow;
        }

        let left = self.parse_ternary()?;

        let op = match self.peek_kind() {
            TokenKind::Assign => Some(AssignOp::Assign),
            TokenKind::PlusAssign => Some(AssignOp::Add),
            TokenKind::MinusAssign => Some(AssignOp::Sub),
            TokenKind::StarAssign => Some(AssignOp::Mul),
            TokenKind::SlashAssign => Some(AssignOp::Div),
            TokenKind::PercentAssign => Some(AssignOp::Mod),
            TokenKind::StarStarAssign => Some(AssignOp::Exp),
            TokenKind::AndAssign => Some(AssignOp::And),
            TokenKind::OrAssign => Some(AssignOp::Or),
            TokenKind::QuestionQuestionAssign => Some(AssignOp::NullishCoalescing),
            TokenKind::BitAndAssign => Some(AssignOp::BitAnd),
            TokenKind::BitOrAssign => Some(AssignOp::BitOr),
            TokenKind::BitXorAssign => Some(AssignOp::BitXor),
            TokenKind::ShiftLeftAssign => Some(AssignOp::ShiftLeft),
            TokenKind::ShiftRightAssign => Some(AssignOp::ShiftRight),
            TokenKind::UnsignedShiftRightAssign => Some(AssignOp::UnsignedShiftRight),
            _ => None,
        };

        if let Some(op) = op {
            self.advance();
            let value = self.parse_assignment_expr()?;
            let span = left.span().to(value.span());
            return Ok(Expr::Assignment {
                target: Box::new(left),
                op,
                value: Box::new(value),
                span,
            });
        }

        Ok(left)
    }

    fn try_parse_arrow_function(&mut self) -> Option<PResult<Expr<'a>>> {
        // `x => ...`
        if self.peek_kind() == TokenKind::Identifier && self.peek_kind_at(1) == TokenKind::Arrow {
            let token = self.advance();
            let param = Param {
                pattern: Pattern::Identifier {
                    name: token.text(self.source),
                    type_ann: None,
                    optional: false,
                    span: token.span,
                },
                accessibility: None,
                span: token.span,
            };
            self.advance(); // `=>`
            return Some(self.finish_arrow(token.span, Vec::new(), vec![param], None));
        }

        // `(params) => ...` / `(params): T => ...`
        if self.peek_kind() != TokenKind::LeftParen {
            return None;
        }
        let saved = self.current;
        let start = self.current_span();
        let params = match self.parse_params() {
            Ok(params) => params,
            Err(_) => {
                self.current = saved;
                return None;
            }
        };
        let return_type = if self.check(TokenKind::Colon) {
            match self.parse_optional_return_type() {
                Ok(ty) => ty,
                Err(_) => {
                    self.current = saved;
                    return None;
                }
            }
        } else {
            None
        };
        if !self.eat(TokenKind::Arrow) {
            self.current = saved;
            return None;
        }
        Some(self.finish_arrow(start, Vec::new(), params, return_type))
    }

    fn finish_arrow(
        &mut self,
        start: Span,
        type_params: Vec<TypeParam<'a>>,
        params: Vec<Param<'a>>,
        return_type: Option<TypeAnn<'a>>,
    ) -> PResult<Expr<'a>> {
        let body = if self.peek_kind() == TokenKind::LeftBrace {
            ArrowBody::Block(self.parse_block()?)
        } else {
            ArrowBody::Expr(Box::new(self.parse_assignment_expr()?))
        };
        let span = start.to(self.prev_span());
        Ok(Expr::ArrowFunction {
            type_params,
            params,
            return_type,
            body,
            span,
        })
    }

    fn parse_ternary(&mut self) -> PResult<Expr<'a>> {
        let condition = self.parse_nullish()?;

        if self.check(TokenKind::Question) {
            self.advance();
            let then_expr = self.parse_assignment_expr()?;
            self.expect(TokenKind::Colon, "Expected `:` in conditional expression")?;
            let else_expr = self.parse_assignment_expr()?;
            let span = condition.span().to(else_expr.span());
            return Ok(Expr::Ternary {
                condition: Box::new(condition),
                then_expr: Box::new(then_expr),
                else_expr: Box::new(else_expr),
                span,
            });
        }

        Ok(condition)
    }

    fn parse_nullish(&mut self) -> PResult<Expr<'a>> {
        let mut left = self.parse_logical_or()?;
        while self.check(TokenKind::QuestionQuestion) {
            self.advance();
            let right = self.parse_logical_or()?;
            let span = left.span().to(right.span());
            left = Expr::Logical {
                left: Box::new(left),
                op: LogicalOp::NullishCoalescing,
                right: Box::new(right),
                span,
            };
        }
        Ok(left)
    }

    fn parse_logical_or(&mut self) -> PResult<Expr<'a>> {
        let mut left = self.parse_logical_and()?;
        while self.check(TokenKind::Or) {
            self.advance();
            let right = self.parse_logical_and()?;
            let span = left.span().to(right.span());
            left = Expr::Logical {
                left: Box::new(left),
                op: LogicalOp::Or,
                right: Box::new(right),
                span,
            };
        }
        Ok(left)
    }

    fn parse_logical_and(&mut self) -> PResult<Expr<'a>> {
        let mut left = self.parse_bit_or()?;
        while self.check(TokenKind::And) {
            self.advance();
            let right = self.parse_bit_or()?;
            let span = left.span().to(right.span());
            left = Expr::Logical {
                left: Box::new(left),
                op: LogicalOp::And,
                right: Box::new(right),
                span,
            };
        }
        Ok(left)
    }

    fn parse_bit_or(&mut self) -> PResult<Expr<'a>> {
        let mut left = self.parse_bit_xor()?;
        while self.check(TokenKind::BitOr) {
            self.advance();
            let right = self.parse_bit_xor()?;
            let span = left.span().to(right.span());
            left = Expr::Binary {
                left: Box::new(left),
                op: BinaryOp::BitOr,
                right: Box::new(right),
                span,
            };
        }
        Ok(left)
    }

    fn parse_bit_xor(&mut self) -> PResult<Expr<'a>> {
        let mut left = self.parse_bit_and()?;
        while self.check(TokenKind::BitXor) {
            self.advance();
            let right = self.parse_bit_and()?;
            let span = left.span().to(right.span());
            left = Expr::Binary {
                left: Box::new(left),
                op: BinaryOp::BitXor,
                right: Box::new(right),
                span,
            };
        }
        Ok(left)
    }

    fn parse_bit_and(&mut self) -> PResult<Expr<'a>> {
        let mut left = self.parse_equality()?;
        while self.check(TokenKind::BitAnd) {
            self.advance();
            let right = self.parse_equality()?;
            let span = left.span().to(right.span());
            left = Expr::Binary {
                left: Box::new(left),
                op: BinaryOp::BitAnd,
                right: Box::new(right),
                span,
            };
        }
        Ok(left)
    }

    fn parse_equality(&mut self) -> PResult<Expr<'a>> {
        let mut left = self.parse_relational()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Equal => BinaryOp::Equal,
                TokenKind::StrictEqual => BinaryOp::StrictEqual,
                TokenKind::NotEqual => BinaryOp::NotEqual,
                TokenKind::StrictNotEqual => BinaryOp::StrictNotEqual,
                _ => break,
            };
            self.advance();
            let right = self.parse_relational()?;
            let span = left.span().to(right.span());
            left = Expr::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
                span,
            };
        }
        Ok(left)
    }

    fn parse_relational(&mut self) -> PResult<Expr<'a>> {
        let mut left = self.parse_shift()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Less => BinaryOp::Less,
                TokenKind::Greater => BinaryOp::Greater,
                TokenKind::LessEqual => BinaryOp::LessEqual,
                TokenKind::GreaterEqual => BinaryOp::GreaterEqual,
                TokenKind::InstanceOf => BinaryOp::InstanceOf,
                TokenKind::In if self.in_allowed => BinaryOp::In,
                _ => break,
            };
            self.advance();
            let right = self.parse_shift()?;
            let span = left.span().to(right.span());
            left = Expr::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
                span,
            };
        }
        Ok(left)
    }

    fn parse_shift(&mut self) -> PResult<Expr<'a>> {
        let mut left = self.parse_additive()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::ShiftLeft => BinaryOp::ShiftLeft,
                TokenKind::ShiftRight => BinaryOp::ShiftRight,
                TokenKind::UnsignedShiftRight => BinaryOp::UnsignedShiftRight,
                _ => break,
            };
            self.advance();
            let right = self.parse_additive()?;
            let span = left.span().to(right.span());
            left = Expr::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
                span,
            };
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> PResult<Expr<'a>> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            let span = left.span().to(right.span());
            left = Expr::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
                span,
            };
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> PResult<Expr<'a>> {
        let mut left = self.parse_exponent()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Mod,
                _ => break,
            };
            self.advance();
            let right = self.parse_exponent()?;
            let span = left.span().to(right.span());
            left = Expr::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
                span,
            };
        }
        Ok(left)
    }

    fn parse_exponent(&mut self) -> PResult<Expr<'a>> {
        let left = self.parse_unary()?;
        if self.check(TokenKind::StarStar) {
            self.advance();
            // Right-associative
            let right = self.parse_exponent()?;
            let span = left.span().to(right.span());
            return Ok(Expr::Binary {
                left: Box::new(left),
                op: BinaryOp::Exp,
                right: Box::new(right),
                span,
            });
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> PResult<Expr<'a>> {
        let token = *self.peek();
        let op = match token.kind {
            TokenKind::Not => Some(UnaryOp::Not),
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Plus => Some(UnaryOp::Pos),
            TokenKind::BitNot => Some(UnaryOp::BitNot),
            TokenKind::Typeof => Some(UnaryOp::Typeof),
            TokenKind::Void => Some(UnaryOp::Void),
            TokenKind::Delete => Some(UnaryOp::Delete),
            TokenKind::Increment | TokenKind::Decrement => {
                self.advance();
                let operand = self.parse_unary()?;
                let span = token.span.to(operand.span());
                return Ok(Expr::Update {
                    op: if token.kind == TokenKind::Increment {
                        UpdateOp::Increment
                    } else {
                        UpdateOp::Decrement
                    },
                    prefix: true,
                    operand: Box::new(operand),
                    span,
                });
            }
            _ => None,
        };

        if let Some(op) = op {
            self.advance();
            let operand = self.parse_unary()?;
            let span = token.span.to(operand.span());
            return Ok(Expr::Unary {
                op,
                operand: Box::new(operand),
                span,
            });
        }

        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> PResult<Expr<'a>> {
        let mut expr = self.parse_left_hand_side()?;

        // `as` casts bind tighter than binary operators for our purposes
        loop {
            match self.peek_kind() {
                TokenKind::Increment | TokenKind::Decrement => {
                    let token = self.advance();
                    let span = expr.span().to(token.span);
                    expr = Expr::Update {
                        op: if token.kind == TokenKind::Increment {
                            UpdateOp::Increment
                        } else {
                            UpdateOp::Decrement
                        },
                        prefix: false,
                        operand: Box::new(expr),
                        span,
                    };
                }
                TokenKind::Identifier if matches!(self.peek_text(), "as" | "satisfies") => {
                    self.advance();
                    let ty = self.parse_type()?;
                    let span = expr.span().to(ty.span());
                    expr = Expr::As {
                        expr: Box::new(expr),
                        ty,
                        span,
                    };
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn parse_left_hand_side(&mut self) -> PResult<Expr<'a>> {
        let mut expr = if self.check(TokenKind::New) {
            self.parse_new_expr()?
        } else {
            self.parse_primary()?
        };

        loop {
            match self.peek_kind() {
                TokenKind::Dot | TokenKind::QuestionDot => {
                    let optional = self.peek_kind() == TokenKind::QuestionDot;
                    self.advance();
                    if optional && self.check(TokenKind::LeftParen) {
                        // `fn?.()`
                        let args = self.parse_call_args()?;
                        let span = expr.span().to(self.prev_span());
                        expr = Expr::Call {
                            callee: Box::new(expr),
                            args,
                            optional: true,
                            span,
                        };
                        continue;
                    }
                    if optional && self.check(TokenKind::LeftBracket) {
                        self.advance();
                        let index = self.parse_expression()?;
                        let end = self
                            .expect(TokenKind::RightBracket, "Expected `]` after index")?
                            .span;
                        let span = expr.span().to(end);
                        expr = Expr::Index {
                            object: Box::new(expr),
                            index: Box::new(index),
                            span,
                        };
                        continue;
                    }
                    let prop_token = self.advance();
                    let valid = matches!(
                        prop_token.kind,
                        TokenKind::Identifier | TokenKind::PrivateIdentifier
                    ) || is_keyword(prop_token.kind);
                    if !valid {
                        return Err(ParseError::new(
                            "Expected property name after `.`",
                            prop_token.span,
                        ));
                    }
                    let span = expr.span().to(prop_token.span);
                    expr = Expr::Member {
                        object: Box::new(expr),
                        property: prop_token.text(self.source),
                        property_span: prop_token.span,
                        optional,
                        span,
                    };
                }
                TokenKind::LeftBracket => {
                    self.advance();
                    let index = self.parse_expression()?;
                    let end = self
                        .expect(TokenKind::RightBracket, "Expected `]` after index")?
                        .span;
                    let span = expr.span().to(end);
                    expr = Expr::Index {
                        object: Box::new(expr),
                        index: Box::new(index),
                        span,
                    };
                }
                TokenKind::LeftParen => {
                    let args = self.parse_call_args()?;
                    let span = expr.span().to(self.prev_span());
                    expr = Expr::Call {
                        callee: Box::new(expr),
                        args,
                        optional: false,
                        span,
                    };
                }
                TokenKind::Not => {
                    // Postfix non-null assertion
                    let token = self.advance();
                    let span = expr.span().to(token.span);
                    expr = Expr::NonNull {
                        expr: Box::new(expr),
                        span,
                    };
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn parse_new_expr(&mut self) -> PResult<Expr<'a>> {
        let start = self.advance().span; // `new`
        let mut callee = self.parse_primary()?;

        // Member chain on the constructor reference
        loop {
            match self.peek_kind() {
                TokenKind::Dot => {
                    self.advance();
                    let prop_token = self.advance();
                    let span = callee.span().to(prop_token.span);
                    callee = Expr::Member {
                        object: Box::new(callee),
                        property: prop_token.text(self.source),
                        property_span: prop_token.span,
                        optional: false,
                        span,
                    };
                }
                TokenKind::LeftBracket => {
                    self.advance();
                    let index = self.parse_expression()?;
                    let end = self
                        .expect(TokenKind::RightBracket, "Expected `]` after index")?
                        .span;
                    let span = callee.span().to(end);
                    callee = Expr::Index {
                        object: Box::new(callee),
                        index: Box::new(index),
                        span,
                    };
                }
                _ => break,
            }
        }

        // `new Array<number>()`
        let type_args = self.try_parse_type_args().unwrap_or_default();

        let args = if self.check(TokenKind::LeftParen) {
            self.parse_call_args()?
        } else {
            Vec::new()
        };
        let span = start.to(self.prev_span());
        Ok(Expr::New {
            callee: Box::new(callee),
            type_args,
            args,
            span,
        })
    }

    fn parse_call_args(&mut self) -> PResult<Vec<Expr<'a>>> {
        self.expect(TokenKind::LeftParen, "Expected `(` to start arguments")?;
        let mut args = Vec::new();
        while !self.check(TokenKind::RightParen) && !self.is_at_end() {
            if self.check(TokenKind::DotDotDot) {
                let start = self.advance().span;
                let argument = self.parse_assignment_expr()?;
                let span = start.to(argument.span());
                args.push(Expr::Spread {
                    argument: Box::new(argument),
                    span,
                });
            } else {
                args.push(self.parse_assignment_expr()?);
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RightParen, "Expected `)` to close arguments")?;
        Ok(args)
    }

    fn parse_primary(&mut self) -> PResult<Expr<'a>> {
        let token = *self.peek();
        match token.kind {
            TokenKind::Identifier => {
                self.advance();
                Ok(Expr::Identifier {
                    name: token.text(self.source),
                    span: token.span,
                })
            }
            TokenKind::This => {
                self.advance();
                Ok(Expr::This { span: token.span })
            }
            TokenKind::Super | TokenKind::Import => {
                self.advance();
                Ok(Expr::Identifier {
                    name: token.text(self.source),
                    span: token.span,
                })
            }
            TokenKind::Number => {
                self.advance();
                Ok(Expr::Literal {
                    value: Literal::Number(parse_number(token.text(self.source))),
                    span: token.span,
                })
            }
            TokenKind::String => {
                self.advance();
                Ok(Expr::Literal {
                    value: Literal::String(token.text(self.source)),
                    span: token.span,
                })
            }
            TokenKind::TemplateString => {
                self.advance();
                Ok(Expr::Literal {
                    value: Literal::Template(token.text(self.source)),
                    span: token.span,
                })
            }
            TokenKind::Regex => {
                self.advance();
                Ok(Expr::Literal {
                    value: Literal::Regex(token.text(self.source)),
                    span: token.span,
                })
            }
            TokenKind::True | TokenKind::False => {
                self.advance();
                Ok(Expr::Literal {
                    value: Literal::Boolean(token.kind == TokenKind::True),
                    span: token.span,
                })
            }
            TokenKind::Null => {
                self.advance();
                Ok(Expr::Literal {
                    value: Literal::Null,
                    span: token.span,
                })
            }
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.parse_expression()?;
                let end = self
                    .expect(TokenKind::RightParen, "Expected `)` after expression")?
                    .span;
                Ok(Expr::Grouping {
                    expr: Box::new(inner),
                    span: token.span.to(end),
                })
            }
            TokenKind::LeftBracket => {
                self.advance();
                let mut elements = Vec::new();
                while !self.check(TokenKind::RightBracket) && !self.is_at_end() {
                    if self.check(TokenKind::DotDotDot) {
                        let start = self.advance().span;
                        let argument = self.parse_assignment_expr()?;
                        let span = start.to(argument.span());
                        elements.push(Expr::Spread {
                            argument: Box::new(argument),
                            span,
                        });
                    } else {
                        elements.push(self.parse_assignment_expr()?);
                    }
                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
                let end = self
                    .expect(TokenKind::RightBracket, "Expected `]` to close array")?
                    .span;
                Ok(Expr::Array {
                    elements,
                    span: token.span.to(end),
                })
            }
            TokenKind::LeftBrace => self.parse_object_literal(),
            TokenKind::Function => self.parse_function_expr(),
            TokenKind::Class => {
                let stmt = self.parse_class_decl()?;
                if let Stmt::ClassDecl {
                    name,
                    name_span,
                    members,
                    span,
                } = stmt
                {
                    Ok(Expr::ClassExpr {
                        name,
                        name_span,
                        members,
                        span,
                    })
                } else {
                    unreachable!("parse_class_decl returns ClassDecl")
                }
            }
            _ => Err(ParseError::new(
                format!("Unexpected token in expression: {:?}", token.kind),
                token.span,
            )),
        }
    }

    fn parse_function_expr(&mut self) -> PResult<Expr<'a>> {
        let start = self.advance().span; // `function`
        let (name, name_span) = if self.peek_kind() == TokenKind::Identifier {
            let token = self.advance();
            (Some(token.text(self.source)), Some(token.span))
        } else {
            (None, None)
        };
        let type_params = self.parse_type_params()?;
        let params = self.parse_params()?;
        let return_type = self.parse_optional_return_type()?;
        let body = self.parse_block()?;
        let span = start.to(self.prev_span());
        Ok(Expr::FunctionExpr {
            name,
            name_span,
            type_params,
            params,
            return_type,
            body,
            span,
        })
    }

    fn parse_object_literal(&mut self) -> PResult<Expr<'a>> {
        let start = self
            .expect(TokenKind::LeftBrace, "Expected `{` to start object")?
            .span;
        let mut properties = Vec::new();

        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            let prop_start = self.current_span();

            if self.check(TokenKind::DotDotDot) {
                self.advance();
                let argument = self.parse_assignment_expr()?;
                let span = prop_start.to(argument.span());
                properties.push(ObjectProperty::Spread { argument, span });
                if !self.eat(TokenKind::Comma) {
                    break;
                }
                continue;
            }

            // Accessor methods: `get key() {}` / `set key(v) {}`
            let mut kind = MethodKind::Method;
            if self.peek_kind() == TokenKind::Identifier
                && matches!(self.peek_text(), "get" | "set")
                && self.starts_property_key(1)
            {
                kind = if self.peek_text() == "get" {
                    MethodKind::Get
                } else {
                    MethodKind::Set
                };
                self.advance();
            }

            let key = self.parse_property_key()?;

            if self.check(TokenKind::LeftParen) || self.check(TokenKind::Less) {
                let _ = self.parse_type_params()?;
                let params = self.parse_params()?;
                let _ = self.parse_optional_return_type()?;
                let body = Some(self.parse_block()?);
                let span = prop_start.to(self.prev_span());
                properties.push(ObjectProperty::Method {
                    key,
                    kind,
                    params,
                    body,
                    span,
                });
            } else if self.eat(TokenKind::Colon) {
                let value = self.parse_assignment_expr()?;
                let span = prop_start.to(value.span());
                properties.push(ObjectProperty::KeyValue { key, value, span });
            } else {
                match key {
                    PropertyKey::Identifier { name, span } => {
                        properties.push(ObjectProperty::Shorthand { name, span });
                    }
                    other => {
                        return Err(ParseError::new(
                            "Expected `:` after property key",
                            other.span(),
                        ))
                    }
                }
            }

            if !self.eat(TokenKind::Comma) {
                break;
            }
        }

        let end = self
            .expect(TokenKind::RightBrace, "Expected `}` to close object")?
            .span;
        Ok(Expr::Object {
            properties,
            span: start.to(end),
        })
    }

    // ============================== helpers ==============================

    fn peek(&self) -> &Token {
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    fn peek_kind_at(&self, offset: usize) -> TokenKind {
        self.tokens
            .get(self.current + offset)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    fn peek_text(&self) -> &'a str {
        self.peek().text(self.source)
    }

    fn token_text_at(&self, offset: usize) -> &'a str {
        self.tokens
            .get(self.current + offset)
            .map(|t| t.text(self.source))
            .unwrap_or("")
    }

    fn current_span(&self) -> Span {
        self.peek().span
    }

    fn prev_span(&self) -> Span {
        if self.current == 0 {
            return self.current_span();
        }
        self.tokens[self.current - 1].span
    }

    fn advance(&mut self) -> Token {
        let token = *self.peek();
        if self.current < self.tokens.len() - 1 {
            self.current += 1;
        }
        token
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, message: &str) -> PResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::new(message, self.current_span()))
        }
    }

    fn expect_identifier_text(&mut self, text: &str) -> PResult<Token> {
        if self.peek_kind() == TokenKind::Identifier && self.peek_text() == text {
            Ok(self.advance())
        } else {
            Err(ParseError::new(
                format!("Expected `{text}`"),
                self.current_span(),
            ))
        }
    }

    fn consume_semicolon(&mut self) -> Span {
        if self.check(TokenKind::Semicolon) {
            self.advance().span
        } else {
            self.prev_span()
        }
    }

    fn is_at_end(&self) -> bool {
        self.peek_kind() == TokenKind::Eof
    }

    /// Skip to the next likely statement boundary after a parse error
    fn synchronize(&mut self) {
        while !self.is_at_end() {
            if self.peek_kind() == TokenKind::Semicolon {
                self.advance();
                return;
            }
            match self.peek_kind() {
                TokenKind::Class
                | TokenKind::Function
                | TokenKind::Var
                | TokenKind::Let
                | TokenKind::Const
                | TokenKind::If
                | TokenKind::For
                | TokenKind::While
                | TokenKind::Return
                | TokenKind::Import
                | TokenKind::Export
                | TokenKind::RightBrace => return,
                _ => {}
            }
            self.advance();
        }
    }
}

fn is_keyword(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Break
            | TokenKind::Case
            | TokenKind::Catch
            | TokenKind::Class
            | TokenKind::Const
            | TokenKind::Continue
            | TokenKind::Default
            | TokenKind::Delete
            | TokenKind::Do
            | TokenKind::Else
            | TokenKind::Enum
            | TokenKind::Export
            | TokenKind::Extends
            | TokenKind::False
            | TokenKind::Finally
            | TokenKind::For
            | TokenKind::Function
            | TokenKind::If
            | TokenKind::Import
            | TokenKind::In
            | TokenKind::InstanceOf
            | TokenKind::Let
            | TokenKind::New
            | TokenKind::Null
            | TokenKind::Return
            | TokenKind::Super
            | TokenKind::Switch
            | TokenKind::This
            | TokenKind::Throw
            | TokenKind::True
            | TokenKind::Try
            | TokenKind::Typeof
            | TokenKind::Var
            | TokenKind::Void
            | TokenKind::While
    )
}

fn parse_number(raw: &str) -> f64 {
    let cleaned: String;
    let text = if raw.contains('_') {
        cleaned = raw.replace('_', "");
        &cleaned
    } else {
        raw
    };

    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return u64::from_str_radix(hex, 16).map(|v| v as f64).unwrap_or(f64::NAN);
    }
    if let Some(bin) = text.strip_prefix("0b").or_else(|| text.strip_prefix("0B")) {
        return u64::from_str_radix(bin, 2).map(|v| v as f64).unwrap_or(f64::NAN);
    }
    if let Some(oct) = text.strip_prefix("0o").or_else(|| text.strip_prefix("0O")) {
        return u64::from_str_radix(oct, 8).map(|v| v as f64).unwrap_or(f64::NAN);
    }
    text.parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(source: &str) -> Program<'_> {
        match Parser::new(source).parse() {
            Ok(program) => program,
            Err(errors) => panic!("Parse errors in {source:?}: {errors:?}"),
        }
    }

    #[test]
    fn parses_variable_declarations() {
        let program = parse_ok("const x: number = 1, y = \"two\";");
        assert_eq!(program.statements.len(), 1);
        let Stmt::VarDecl { kind, declarations, .. } = &program.statements[0] else {
            panic!("expected VarDecl");
        };
        assert_eq!(*kind, VarKind::Const);
        assert_eq!(declarations.len(), 2);
    }

    #[test]
    fn parses_for_of_with_call() {
        let program = parse_ok("for (const i of pairs(arr)) {}");
        let Stmt::ForOf { right, .. } = &program.statements[0] else {
            panic!("expected ForOf");
        };
        assert!(matches!(right, Expr::Call { .. }));
    }

    #[test]
    fn parses_arrow_functions() {
        parse_ok("const f = (a: number, b: number): number => a + b;");
        parse_ok("const g = x => x;");
        parse_ok("items.forEach((item) => { print(item); });");
    }

    #[test]
    fn parses_class_with_accessors() {
        let program = parse_ok("class A { get foo() { return 1; } set foo(v: number) {} #hidden = 1; }");
        let Stmt::ClassDecl { members, .. } = &program.statements[0] else {
            panic!("expected ClassDecl");
        };
        assert_eq!(members.len(), 3);
        assert!(matches!(
            members[0],
            ClassMember::Method { kind: MethodKind::Get, .. }
        ));
        assert!(matches!(
            members[2],
            ClassMember::Property { key: PropertyKey::Private { .. }, .. }
        ));
    }

    #[test]
    fn parses_generic_annotations_with_shift_split() {
        parse_ok("let m: Map<string, Set<number>> = new Map<string, Set<number>>();");
    }

    #[test]
    fn parses_lua_tuple_annotation() {
        let program = parse_ok("declare function w(): LuaTuple<[boolean, number]>;");
        let Stmt::FunctionDecl { return_type, body, .. } = &program.statements[0] else {
            panic!("expected FunctionDecl");
        };
        assert!(body.is_none());
        let Some(TypeAnn::Reference { name, type_args, .. }) = return_type else {
            panic!("expected reference return type");
        };
        assert_eq!(*name, "LuaTuple");
        assert_eq!(type_args.len(), 1);
    }

    #[test]
    fn parses_labeled_statement_colon_call() {
        let program = parse_ok("obj:method();");
        let Stmt::Labeled { label, body, .. } = &program.statements[0] else {
            panic!("expected Labeled");
        };
        assert_eq!(*label, "obj");
        assert!(matches!(
            &**body,
            Stmt::Expr { expr: Expr::Call { .. }, .. }
        ));
    }

    #[test]
    fn parses_export_assignment() {
        let program = parse_ok("let x = 1; export = x;");
        assert!(matches!(program.statements[1], Stmt::ExportAssignment { .. }));
    }

    #[test]
    fn parses_namespace_and_enum() {
        let program = parse_ok("namespace N { export const a = 1; } enum E { A, B = 2 }");
        assert!(matches!(program.statements[0], Stmt::ModuleDecl { .. }));
        assert!(matches!(program.statements[1], Stmt::EnumDecl { .. }));
    }

    #[test]
    fn parses_regex_literal_expression() {
        let program = parse_ok("const re = /ab+c/gi;");
        let Stmt::VarDecl { declarations, .. } = &program.statements[0] else {
            panic!("expected VarDecl");
        };
        assert!(matches!(
            declarations[0].init,
            Some(Expr::Literal { value: Literal::Regex(_), .. })
        ));
    }

    #[test]
    fn parses_spread_arguments() {
        let program = parse_ok("f(...rest, 1);");
        let Stmt::Expr { expr: Expr::Call { args, .. }, .. } = &program.statements[0] else {
            panic!("expected call");
        };
        assert!(matches!(args[0], Expr::Spread { .. }));
    }

    #[test]
    fn recovers_from_errors() {
        let result = Parser::new("const = ;\nlet ok = 1;").parse();
        assert!(result.is_err());
    }

    #[test]
    fn parses_destructured_catch_and_patterns() {
        parse_ok("try { f(); } catch (e) { print(e); } finally {}");
        parse_ok("const [a, , b = 2, ...rest] = list;");
        parse_ok("const { x, y: { z }, ...others } = obj;");
    }

    #[test]
    fn parses_typeof_and_keyof() {
        parse_ok("type K = keyof any; let v: typeof other;");
        parse_ok("const kind = typeof value;");
    }

    #[test]
    fn parses_interface_members() {
        let program = parse_ok("interface Shape { area(): number; name: string; }");
        let Stmt::InterfaceDecl { members, .. } = &program.statements[0] else {
            panic!("expected InterfaceDecl");
        };
        assert_eq!(members.len(), 2);
        assert!(members[0].is_method);
        assert!(!members[1].is_method);
    }
}
