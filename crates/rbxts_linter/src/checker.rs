//! Unified single-pass checker
//!
//! One pre-order traversal does everything: builds the semantic model
//! (scopes, bindings, references, declaration sites), maintains the type
//! environment, and dispatches every registered rule at every node.
//! Diagnostics come back sorted by source position so output is stable.

use crate::semantic_model::{BindingKind, DeclKind, ScopeKind, SemanticModel};
use crate::{LintContext, Rule};
use rbxts_diagnostics::Diagnostic;
use rbxts_lexer::Span;
use rbxts_parser::{
    ArrowBody, Block, ClassMember, Expr, ForHead, ImportSpecifier, ModuleName, ObjectPatternProp,
    ObjectProperty, Param, Pattern, Program, PropertyKey, Stmt, TypeAnn, TypeParam, VarDeclarator,
    VarKind,
};
use rbxts_semantic::{builtins, infer, Db, Type, TypeEnv};

/// Unified checker that does everything in one AST pass
pub struct Checker<'a, 'r> {
    ctx: &'a LintContext<'a>,
    rules: &'r [Box<dyn Rule>],
    model: SemanticModel<'a>,
    type_env: TypeEnv,
    diagnostics: Vec<Diagnostic>,
}

impl<'a, 'r> Checker<'a, 'r> {
    pub fn new(ctx: &'a LintContext<'a>, rules: &'r [Box<dyn Rule>]) -> Self {
        let mut type_env = TypeEnv::new();
        builtins::seed_env(ctx.db(), &mut type_env);
        Self {
            ctx,
            rules,
            model: SemanticModel::new(),
            type_env,
            diagnostics: Vec::with_capacity(16),
        }
    }

    /// Run the unified check on the program
    pub fn check(mut self, program: &Program<'a>) -> (SemanticModel<'a>, Vec<Diagnostic>) {
        for stmt in &program.statements {
            self.visit_stmt(stmt);
        }

        // Post-traversal rules (merge counting, unreferenced names, ...)
        for rule in self.rules {
            rule.check_post(self.ctx, &self.model, &mut self.diagnostics);
        }

        // Document order, then rule code, for stable output
        self.diagnostics
            .sort_by(|a, b| {
                (a.location.start, a.location.end, a.code.as_str())
                    .cmp(&(b.location.start, b.location.end, b.code.as_str()))
            });

        (self.model, self.diagnostics)
    }

    fn visit_stmt(&mut self, stmt: &Stmt<'a>) {
        for rule in self.rules {
            rule.check_stmt(self.ctx, &self.model, &self.type_env, stmt, &mut self.diagnostics);
        }

        match stmt {
            Stmt::VarDecl {
                kind, declarations, ..
            } => {
                for decl in declarations {
                    self.visit_declarator(*kind, decl);
                }
            }

            Stmt::FunctionDecl {
                name,
                name_span,
                type_params,
                params,
                return_type,
                body,
                ..
            } => {
                self.model
                    .add_binding(*name, BindingKind::Function, None, *name_span);

                let fn_id = self.ctx.db().define_function();

                let outer_env = self.type_env.clone();
                self.type_env = self.type_env.fork();
                self.enter_type_params(type_params);

                if let Some(ret) = return_type {
                    let ty = infer::resolve_annotation(self.ctx.db(), &self.type_env, ret);
                    self.ctx.db().set_return_type(fn_id, ty);
                    self.visit_type(ret, None);
                }

                self.model.push_scope(ScopeKind::Function);
                self.bind_params(params);

                if let Some(body) = body {
                    for inner in &body.statements {
                        self.visit_stmt(inner);
                    }
                }

                self.model.pop_scope();
                self.type_env = outer_env;

                // The function itself is visible where it was declared
                self.type_env
                    .insert((*name).to_string(), Type::Function(fn_id));
            }

            Stmt::ClassDecl {
                name,
                name_span,
                members,
                ..
            } => {
                if let (Some(name), Some(name_span)) = (name, name_span) {
                    self.model
                        .add_binding(*name, BindingKind::Class, None, *name_span);
                    self.register_class(name, members);
                }
                self.visit_class_members(members);
            }

            Stmt::InterfaceDecl {
                name,
                name_span,
                members,
                ..
            } => {
                self.model
                    .add_binding(*name, BindingKind::Interface, None, *name_span);

                let shape = self.ctx.db().define_object();
                for member in members {
                    let ty = if member.is_method {
                        let fn_id = self.ctx.db().define_function();
                        if let Some(ret) = &member.ty {
                            let ret_ty =
                                infer::resolve_annotation(self.ctx.db(), &self.type_env, ret);
                            self.ctx.db().set_return_type(fn_id, ret_ty);
                        }
                        Type::Function(fn_id)
                    } else {
                        member
                            .ty
                            .as_ref()
                            .map(|t| infer::resolve_annotation(self.ctx.db(), &self.type_env, t))
                            .unwrap_or(Type::Unknown)
                    };
                    self.ctx.db().add_member(shape, member.name.to_string(), ty);
                }
                self.type_env
                    .insert_type((*name).to_string(), Type::Object(shape));

                for member in members {
                    if let Some(ty) = &member.ty {
                        self.visit_type(ty, None);
                    }
                }
            }

            Stmt::TypeAliasDecl {
                name,
                name_span,
                ty,
                ..
            } => {
                self.model
                    .add_binding(*name, BindingKind::TypeAlias, None, *name_span);
                let resolved = infer::resolve_annotation(self.ctx.db(), &self.type_env, ty);
                self.type_env.insert_type((*name).to_string(), resolved);
                self.visit_type(ty, None);
            }

            Stmt::EnumDecl {
                name,
                name_span,
                members,
                ..
            } => {
                self.model
                    .add_binding(*name, BindingKind::Enum, None, *name_span);
                self.model.add_decl_site(*name, DeclKind::Enum, *name_span);

                let shape = self.ctx.db().define_object();
                for member in members {
                    self.ctx
                        .db()
                        .add_member(shape, member.name.to_string(), Type::Number);
                }
                self.type_env
                    .insert((*name).to_string(), Type::Object(shape));
                self.type_env
                    .insert_type((*name).to_string(), Type::named(*name));

                for member in members {
                    if let Some(value) = &member.value {
                        self.visit_expr(value, None);
                    }
                }
            }

            Stmt::ModuleDecl {
                name,
                name_span,
                body,
                ..
            } => {
                if let ModuleName::Identifier(name) = name {
                    self.model
                        .add_binding(*name, BindingKind::Namespace, None, *name_span);
                    let type_only = body
                        .as_ref()
                        .map(|stmts| stmts.iter().all(is_type_only_statement))
                        .unwrap_or(true);
                    self.model
                        .add_decl_site(*name, DeclKind::Namespace { type_only }, *name_span);
                }

                if let Some(statements) = body {
                    self.model.push_scope(ScopeKind::Namespace);
                    let outer_env = self.type_env.clone();
                    self.type_env = self.type_env.fork();
                    for inner in statements {
                        self.visit_stmt(inner);
                    }
                    self.type_env = outer_env;
                    self.model.pop_scope();
                }
            }

            Stmt::ImportDecl { specifiers, .. } => {
                for specifier in specifiers {
                    let span = specifier.span();
                    let name_span = match specifier {
                        ImportSpecifier::Named { local, .. } => {
                            Span::new(span.end - local.len() as u32, span.end)
                        }
                        _ => span,
                    };
                    self.model.add_binding(
                        specifier.local(),
                        BindingKind::Import,
                        None,
                        name_span,
                    );
                }
            }

            Stmt::ExportNamed { declaration, .. } => {
                if let Some(inner) = declaration {
                    self.visit_stmt(inner);
                }
            }
            Stmt::ExportAll { .. } => {}
            Stmt::ExportAssignment { expr, span } => {
                if let Expr::Identifier { name, .. } = expr.unwrap_grouping() {
                    self.model.add_export_assignment(*name, *span);
                }
                self.visit_expr(expr, None);
            }
            Stmt::ExportDefault { expr, .. } => {
                self.visit_expr(expr, None);
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                self.visit_expr(condition, None);
                self.visit_in_block_scope(then_branch);
                if let Some(else_stmt) = else_branch {
                    self.visit_in_block_scope(else_stmt);
                }
            }

            Stmt::For {
                init,
                condition,
                update,
                body,
                ..
            } => {
                self.model.push_scope(ScopeKind::Block);
                let outer_env = self.type_env.clone();
                self.type_env = self.type_env.fork();

                if let Some(init) = init {
                    self.visit_stmt(init);
                }
                if let Some(condition) = condition {
                    self.visit_expr(condition, None);
                }
                if let Some(update) = update {
                    self.visit_expr(update, None);
                }
                self.visit_stmt(body);

                self.type_env = outer_env;
                self.model.pop_scope();
            }

            Stmt::ForIn {
                left, right, body, ..
            }
            | Stmt::ForOf {
                left, right, body, ..
            } => {
                self.visit_expr(right, None);

                self.model.push_scope(ScopeKind::Block);
                let outer_env = self.type_env.clone();
                self.type_env = self.type_env.fork();

                let element_ty = if matches!(stmt, Stmt::ForIn { .. }) {
                    Type::String
                } else {
                    let right_ty = infer::type_of(self.ctx.db(), &self.type_env, right);
                    iterated_element_type(&right_ty)
                };

                match left {
                    ForHead::VarDecl { kind, pattern, .. } => {
                        self.visit_pattern_metadata(pattern);
                        self.bind_pattern(pattern, element_ty, Some(*kind));
                    }
                    ForHead::Expr(expr) => self.visit_expr(expr, None),
                }

                self.visit_stmt(body);

                self.type_env = outer_env;
                self.model.pop_scope();
            }

            Stmt::While {
                condition, body, ..
            } => {
                self.visit_expr(condition, None);
                self.visit_in_block_scope(body);
            }

            Stmt::DoWhile {
                body, condition, ..
            } => {
                self.visit_in_block_scope(body);
                self.visit_expr(condition, None);
            }

            Stmt::Switch {
                discriminant,
                cases,
                ..
            } => {
                self.visit_expr(discriminant, None);
                for case in cases {
                    if let Some(test) = &case.test {
                        self.visit_expr(test, None);
                    }
                    self.model.push_scope(ScopeKind::Block);
                    let outer_env = self.type_env.clone();
                    self.type_env = self.type_env.fork();
                    for inner in &case.body {
                        self.visit_stmt(inner);
                    }
                    self.type_env = outer_env;
                    self.model.pop_scope();
                }
            }

            Stmt::Return { value, .. } => {
                if let Some(value) = value {
                    self.visit_expr(value, None);
                }
            }

            Stmt::Throw { value, .. } => {
                self.visit_expr(value, None);
            }

            Stmt::TryCatch {
                try_block,
                catch_param,
                catch_block,
                finally_block,
                ..
            } => {
                self.visit_block(try_block);
                if let Some(catch) = catch_block {
                    self.model.push_scope(ScopeKind::Block);
                    let outer_env = self.type_env.clone();
                    self.type_env = self.type_env.fork();
                    if let Some(param) = catch_param {
                        self.visit_pattern_metadata(param);
                        self.bind_pattern_with_kind(param, Type::Unknown, BindingKind::CatchVar, None);
                    }
                    for inner in &catch.statements {
                        self.visit_stmt(inner);
                    }
                    self.type_env = outer_env;
                    self.model.pop_scope();
                }
                if let Some(finally) = finally_block {
                    self.visit_block(finally);
                }
            }

            Stmt::Labeled { body, .. } => {
                self.visit_stmt(body);
            }

            Stmt::Block(block) => {
                self.visit_block(block);
            }

            Stmt::Expr { expr, .. } => {
                self.visit_expr(expr, None);
            }

            Stmt::Break { .. } | Stmt::Continue { .. } | Stmt::Empty { .. } => {}
        }
    }

    fn visit_declarator(&mut self, kind: VarKind, decl: &VarDeclarator<'a>) {
        self.visit_pattern_metadata(&decl.pattern);

        let declared_ty = match decl.pattern.type_ann() {
            Some(ann) => infer::resolve_annotation(self.ctx.db(), &self.type_env, ann),
            None => match &decl.init {
                Some(init) => {
                    let inferred = infer::type_of(self.ctx.db(), &self.type_env, init);
                    if kind == VarKind::Const {
                        inferred
                    } else {
                        inferred.widened()
                    }
                }
                None => Type::Undefined,
            },
        };

        self.bind_pattern(&decl.pattern, declared_ty, Some(kind));

        if let Some(init) = &decl.init {
            self.visit_expr(init, None);
        }
    }

    /// Dispatch type annotations and default-value expressions nested in
    /// a binding pattern (bindings themselves are made separately).
    fn visit_pattern_metadata(&mut self, pattern: &Pattern<'a>) {
        match pattern {
            Pattern::Identifier { type_ann, .. } => {
                if let Some(ann) = type_ann {
                    self.visit_type(ann, None);
                }
            }
            Pattern::Array {
                elements, type_ann, ..
            } => {
                if let Some(ann) = type_ann {
                    self.visit_type(ann, None);
                }
                for element in elements.iter().flatten() {
                    self.visit_pattern_metadata(element);
                }
            }
            Pattern::Object {
                properties,
                type_ann,
                ..
            } => {
                if let Some(ann) = type_ann {
                    self.visit_type(ann, None);
                }
                for prop in properties {
                    match prop {
                        ObjectPatternProp::KeyValue { value, .. } => {
                            self.visit_pattern_metadata(value)
                        }
                        ObjectPatternProp::Shorthand { default, .. } => {
                            if let Some(default) = default {
                                self.visit_expr(default, None);
                            }
                        }
                        ObjectPatternProp::Rest { argument, .. } => {
                            self.visit_pattern_metadata(argument)
                        }
                    }
                }
            }
            Pattern::Rest { argument, .. } => self.visit_pattern_metadata(argument),
            Pattern::Assign {
                target, default, ..
            } => {
                self.visit_pattern_metadata(target);
                self.visit_expr(default, None);
            }
        }
    }

    fn bind_pattern(&mut self, pattern: &Pattern<'a>, ty: Type, var_kind: Option<VarKind>) {
        self.bind_pattern_with_kind(pattern, ty, BindingKind::Variable, var_kind);
    }

    fn bind_pattern_with_kind(
        &mut self,
        pattern: &Pattern<'a>,
        ty: Type,
        kind: BindingKind,
        var_kind: Option<VarKind>,
    ) {
        match pattern {
            Pattern::Identifier { name, span, .. } => {
                let name_span = Span::new(span.start, span.start + name.len() as u32);
                self.model.add_binding(*name, kind, var_kind, name_span);
                self.type_env.insert((*name).to_string(), ty);
            }
            Pattern::Array { elements, .. } => {
                for (index, element) in elements.iter().enumerate() {
                    let Some(element_pattern) = element else {
                        continue;
                    };
                    let element_ty = match &ty {
                        Type::Array(element) => (**element).clone(),
                        Type::Tuple(items) => items.get(index).cloned().unwrap_or(Type::Unknown),
                        _ => Type::Unknown,
                    };
                    self.bind_pattern_with_kind(element_pattern, element_ty, kind, var_kind);
                }
            }
            Pattern::Object { properties, .. } => {
                for prop in properties {
                    match prop {
                        ObjectPatternProp::KeyValue { key, value, .. } => {
                            let member_ty = self.member_type_of(&ty, key);
                            self.bind_pattern_with_kind(value, member_ty, kind, var_kind);
                        }
                        ObjectPatternProp::Shorthand { name, span, .. } => {
                            let member_ty = self.member_type_of(&ty, name);
                            let name_span = Span::new(span.start, span.start + name.len() as u32);
                            self.model.add_binding(*name, kind, var_kind, name_span);
                            self.type_env.insert((*name).to_string(), member_ty);
                        }
                        ObjectPatternProp::Rest { argument, .. } => {
                            self.bind_pattern_with_kind(argument, Type::Unknown, kind, var_kind);
                        }
                    }
                }
            }
            Pattern::Rest { argument, .. } => {
                self.bind_pattern_with_kind(argument, Type::Array(Box::new(Type::Unknown)), kind, var_kind);
            }
            Pattern::Assign {
                target, default, ..
            } => {
                // Fall back to the default value's type when nothing
                // better is known (`(x = 0) => ...`)
                let ty = match ty {
                    Type::Any | Type::Unknown | Type::Undefined => {
                        infer::type_of(self.ctx.db(), &self.type_env, default).widened()
                    }
                    other => other,
                };
                self.bind_pattern_with_kind(target, ty, kind, var_kind);
            }
        }
    }

    fn member_type_of(&self, ty: &Type, member: &str) -> Type {
        match ty {
            Type::Object(id) => self
                .ctx
                .db()
                .lookup_member(*id, member)
                .unwrap_or(Type::Unknown),
            _ => Type::Unknown,
        }
    }

    fn bind_params(&mut self, params: &[Param<'a>]) {
        for param in params {
            self.visit_pattern_metadata(&param.pattern);
            let ty = param
                .pattern
                .type_ann()
                .map(|ann| infer::resolve_annotation(self.ctx.db(), &self.type_env, ann))
                .unwrap_or(Type::Any);
            self.bind_pattern_with_kind(&param.pattern, ty, BindingKind::Parameter, None);
        }
    }

    fn enter_type_params(&mut self, type_params: &[TypeParam<'a>]) {
        for tp in type_params {
            let constraint = tp
                .constraint
                .as_ref()
                .map(|ann| Box::new(infer::resolve_annotation(self.ctx.db(), &self.type_env, ann)));
            if let Some(ann) = &tp.constraint {
                self.visit_type(ann, None);
            }
            self.type_env.insert_type(
                tp.name.to_string(),
                Type::TypeParam {
                    name: tp.name.to_string(),
                    constraint,
                },
            );
        }
    }

    fn register_class(&mut self, name: &str, members: &[ClassMember<'a>]) {
        let db = self.ctx.db();
        let static_shape = db.define_object();
        let instance_shape = db.define_object();

        for member in members {
            let Some(member_name) = member.key().name() else {
                continue;
            };
            let (is_static, ty) = match member {
                ClassMember::Method {
                    is_static,
                    return_type,
                    ..
                } => {
                    let fn_id = db.define_function();
                    if let Some(ret) = return_type {
                        let ret_ty = infer::resolve_annotation(db, &self.type_env, ret);
                        db.set_return_type(fn_id, ret_ty);
                    }
                    (*is_static, Type::Function(fn_id))
                }
                ClassMember::Property {
                    is_static,
                    type_ann,
                    value,
                    ..
                } => {
                    let ty = match type_ann {
                        Some(ann) => infer::resolve_annotation(db, &self.type_env, ann),
                        None => value
                            .as_ref()
                            .map(|v| infer::type_of(db, &self.type_env, v).widened())
                            .unwrap_or(Type::Unknown),
                    };
                    (*is_static, ty)
                }
            };
            let target = if is_static { static_shape } else { instance_shape };
            db.add_member(target, member_name.to_string(), ty);
        }

        self.type_env
            .insert(name.to_string(), Type::Object(static_shape));
        self.type_env.insert_type(name.to_string(), Type::named(name));
    }

    fn visit_class_members(&mut self, members: &[ClassMember<'a>]) {
        for member in members {
            match member {
                ClassMember::Method {
                    key, params, return_type, body, ..
                } => {
                    if let PropertyKey::Computed { expr, .. } = key {
                        self.visit_expr(expr, None);
                    }
                    if let Some(ret) = return_type {
                        self.visit_type(ret, None);
                    }
                    self.model.push_scope(ScopeKind::Function);
                    let outer_env = self.type_env.clone();
                    self.type_env = self.type_env.fork();
                    self.bind_params(params);
                    if let Some(body) = body {
                        for inner in &body.statements {
                            self.visit_stmt(inner);
                        }
                    }
                    self.type_env = outer_env;
                    self.model.pop_scope();
                }
                ClassMember::Property {
                    key, value, type_ann, ..
                } => {
                    if let PropertyKey::Computed { expr, .. } = key {
                        self.visit_expr(expr, None);
                    }
                    if let Some(ann) = type_ann {
                        self.visit_type(ann, None);
                    }
                    if let Some(value) = value {
                        self.visit_expr(value, None);
                    }
                }
            }
        }
    }

    fn visit_in_block_scope(&mut self, stmt: &Stmt<'a>) {
        self.model.push_scope(ScopeKind::Block);
        let outer_env = self.type_env.clone();
        self.type_env = self.type_env.fork();
        self.visit_stmt(stmt);
        self.type_env = outer_env;
        self.model.pop_scope();
    }

    fn visit_block(&mut self, block: &Block<'a>) {
        self.model.push_scope(ScopeKind::Block);
        let outer_env = self.type_env.clone();
        self.type_env = self.type_env.fork();
        for inner in &block.statements {
            self.visit_stmt(inner);
        }
        self.type_env = outer_env;
        self.model.pop_scope();
    }

    fn visit_expr(&mut self, expr: &Expr<'a>, parent: Option<&Expr<'a>>) {
        for rule in self.rules {
            rule.check_expr(
                self.ctx,
                &self.model,
                &self.type_env,
                expr,
                parent,
                &mut self.diagnostics,
            );
        }

        match expr {
            Expr::Identifier { name, .. } => {
                self.model.add_reference(name);
            }

            Expr::Assignment { target, value, .. } => {
                self.visit_expr(target, Some(expr));
                self.visit_expr(value, Some(expr));
                if let Expr::Identifier { name, .. } = target.unwrap_grouping() {
                    let ty = infer::type_of(self.ctx.db(), &self.type_env, value);
                    self.type_env.insert((*name).to_string(), ty.widened());
                }
            }

            Expr::Unary { operand, .. } | Expr::Update { operand, .. } => {
                self.visit_expr(operand, Some(expr));
            }

            Expr::Binary { left, right, .. } | Expr::Logical { left, right, .. } => {
                self.visit_expr(left, Some(expr));
                self.visit_expr(right, Some(expr));
            }

            Expr::Ternary {
                condition,
                then_expr,
                else_expr,
                ..
            } => {
                self.visit_expr(condition, Some(expr));
                self.visit_expr(then_expr, Some(expr));
                self.visit_expr(else_expr, Some(expr));
            }

            Expr::Call { callee, args, .. } => {
                self.visit_expr(callee, Some(expr));
                for arg in args {
                    self.visit_expr(arg, Some(expr));
                }
            }

            Expr::New {
                callee,
                type_args,
                args,
                ..
            } => {
                self.visit_expr(callee, Some(expr));
                for arg_ty in type_args {
                    self.visit_type(arg_ty, None);
                }
                for arg in args {
                    self.visit_expr(arg, Some(expr));
                }
            }

            Expr::Member { object, .. } => {
                self.visit_expr(object, Some(expr));
            }

            Expr::Index { object, index, .. } => {
                self.visit_expr(object, Some(expr));
                self.visit_expr(index, Some(expr));
            }

            Expr::Grouping { expr: inner, .. } => {
                self.visit_expr(inner, Some(expr));
            }

            Expr::As { expr: inner, ty, .. } => {
                self.visit_expr(inner, Some(expr));
                self.visit_type(ty, None);
            }

            Expr::NonNull { expr: inner, .. } => {
                self.visit_expr(inner, Some(expr));
            }

            Expr::Spread { argument, .. } => {
                self.visit_expr(argument, Some(expr));
            }

            Expr::Array { elements, .. } => {
                for element in elements {
                    self.visit_expr(element, Some(expr));
                }
            }

            Expr::Object { properties, .. } => {
                for prop in properties {
                    match prop {
                        ObjectProperty::KeyValue { key, value, .. } => {
                            if let PropertyKey::Computed { expr: key_expr, .. } = key {
                                self.visit_expr(key_expr, Some(expr));
                            }
                            self.visit_expr(value, Some(expr));
                        }
                        ObjectProperty::Shorthand { name, .. } => {
                            self.model.add_reference(name);
                        }
                        ObjectProperty::Method { params, body, .. } => {
                            self.model.push_scope(ScopeKind::Function);
                            let outer_env = self.type_env.clone();
                            self.type_env = self.type_env.fork();
                            self.bind_params(params);
                            if let Some(body) = body {
                                for inner in &body.statements {
                                    self.visit_stmt(inner);
                                }
                            }
                            self.type_env = outer_env;
                            self.model.pop_scope();
                        }
                        ObjectProperty::Spread { argument, .. } => {
                            self.visit_expr(argument, Some(expr));
                        }
                    }
                }
            }

            Expr::FunctionExpr {
                name,
                name_span,
                type_params,
                params,
                return_type,
                body,
                ..
            } => {
                self.model.push_scope(ScopeKind::Function);
                let outer_env = self.type_env.clone();
                self.type_env = self.type_env.fork();

                // A function expression's name binds only inside its body
                if let (Some(name), Some(name_span)) = (name, name_span) {
                    self.model
                        .add_binding(*name, BindingKind::FunctionExprName, None, *name_span);
                }

                self.enter_type_params(type_params);
                if let Some(ret) = return_type {
                    self.visit_type(ret, None);
                }
                self.bind_params(params);
                for inner in &body.statements {
                    self.visit_stmt(inner);
                }

                self.type_env = outer_env;
                self.model.pop_scope();
            }

            Expr::ArrowFunction {
                type_params,
                params,
                return_type,
                body,
                ..
            } => {
                self.model.push_scope(ScopeKind::Function);
                let outer_env = self.type_env.clone();
                self.type_env = self.type_env.fork();

                self.enter_type_params(type_params);
                if let Some(ret) = return_type {
                    self.visit_type(ret, None);
                }
                self.bind_params(params);
                match body {
                    ArrowBody::Block(block) => {
                        for inner in &block.statements {
                            self.visit_stmt(inner);
                        }
                    }
                    ArrowBody::Expr(value) => self.visit_expr(value, Some(expr)),
                }

                self.type_env = outer_env;
                self.model.pop_scope();
            }

            Expr::ClassExpr {
                name,
                name_span,
                members,
                ..
            } => {
                self.model.push_scope(ScopeKind::Class);
                if let (Some(name), Some(name_span)) = (name, name_span) {
                    self.model
                        .add_binding(*name, BindingKind::Class, None, *name_span);
                }
                self.visit_class_members(members);
                self.model.pop_scope();
            }

            Expr::Literal { .. } | Expr::This { .. } => {}
        }
    }

    fn visit_type(&mut self, ty: &TypeAnn<'a>, parent: Option<&TypeAnn<'a>>) {
        for rule in self.rules {
            rule.check_type(self.ctx, ty, parent, &mut self.diagnostics);
        }

        match ty {
            TypeAnn::Reference { type_args, .. } => {
                for arg in type_args {
                    self.visit_type(arg, Some(ty));
                }
            }
            TypeAnn::Array { element, .. } => self.visit_type(element, Some(ty)),
            TypeAnn::Tuple { elements, .. } => {
                for element in elements {
                    self.visit_type(element, Some(ty));
                }
            }
            TypeAnn::Union { constituents, .. } | TypeAnn::Intersection { constituents, .. } => {
                for constituent in constituents {
                    self.visit_type(constituent, Some(ty));
                }
            }
            TypeAnn::Function { return_type, .. } => {
                if let Some(ret) = return_type {
                    self.visit_type(ret, Some(ty));
                }
            }
            TypeAnn::ObjectLiteral { members, .. } => {
                for member in members {
                    if let Some(member_ty) = &member.ty {
                        self.visit_type(member_ty, Some(ty));
                    }
                }
            }
            TypeAnn::Keyof { ty: inner, .. } | TypeAnn::Parenthesized { ty: inner, .. } => {
                self.visit_type(inner, Some(ty));
            }
            _ => {}
        }
    }
}

fn is_type_only_statement(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::InterfaceDecl { .. } | Stmt::TypeAliasDecl { .. } | Stmt::ModuleDecl { .. } => true,
        Stmt::ExportNamed {
            declaration: Some(inner),
            ..
        } => matches!(
            &**inner,
            Stmt::InterfaceDecl { .. } | Stmt::TypeAliasDecl { .. }
        ),
        _ => false,
    }
}

fn iterated_element_type(ty: &Type) -> Type {
    match ty {
        Type::Array(element) => (**element).clone(),
        Type::Tuple(items) => items.first().cloned().unwrap_or(Type::Unknown),
        Type::Named { name, type_args } if name == "Array" || name == "ReadonlyArray" => {
            type_args.first().cloned().unwrap_or(Type::Unknown)
        }
        _ => Type::Unknown,
    }
}

/// Run the unified check on a program
pub fn check_program<'a>(
    ctx: &'a LintContext<'a>,
    program: &Program<'a>,
    rules: &[Box<dyn Rule>],
) -> Vec<Diagnostic> {
    let checker = Checker::new(ctx, rules);
    let (_, diagnostics) = checker.check(program);
    diagnostics
}
