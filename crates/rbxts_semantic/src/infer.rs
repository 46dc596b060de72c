//! Structural type inference over expressions and annotations

use crate::builtins;
use crate::db::Db;
use crate::scope::TypeEnv;
use crate::types::Type;
use rbxts_parser::{ArrowBody, Expr, Literal, LogicalOp, ObjectProperty, TypeAnn, UnaryOp};

/// Resolve the apparent type of an expression at its location.
///
/// This is the facade's `resolveConstrainedType`: annotations win, then
/// literal shapes, then ambient knowledge; anything else is `Unknown`.
pub fn type_of(db: &dyn Db, env: &TypeEnv, expr: &Expr) -> Type {
    match expr {
        Expr::Literal { value, .. } => literal_type(value),
        Expr::Identifier { name, span: _ } => match *name {
            "undefined" => Type::Undefined,
            "NaN" => Type::number_literal(f64::NAN),
            "Infinity" => Type::Number,
            _ => env.lookup(name).unwrap_or(Type::Unknown),
        },
        Expr::This { .. } => Type::Unknown,
        Expr::Grouping { expr, .. } => type_of(db, env, expr),

        Expr::Unary { op, operand, .. } => {
            let inner = type_of(db, env, operand);
            match op {
                UnaryOp::Not => Type::Boolean,
                UnaryOp::Neg => match inner {
                    Type::NumberLiteral(lit) => Type::number_literal(-lit.value()),
                    _ => Type::Number,
                },
                UnaryOp::Pos | UnaryOp::BitNot => Type::Number,
                UnaryOp::Typeof => Type::String,
                UnaryOp::Void => Type::Undefined,
                UnaryOp::Delete => Type::Boolean,
            }
        }
        Expr::Update { .. } => Type::Number,

        Expr::Binary { left, op, right, .. } => {
            use rbxts_parser::BinaryOp::*;
            match op {
                Equal | StrictEqual | NotEqual | StrictNotEqual | Less | Greater | LessEqual
                | GreaterEqual | In | InstanceOf => Type::Boolean,
                Add => {
                    let l = type_of(db, env, left).widened();
                    let r = type_of(db, env, right).widened();
                    match (&l, &r) {
                        (Type::String, _) | (_, Type::String) => Type::String,
                        (Type::Number, Type::Number) => Type::Number,
                        _ => Type::Unknown,
                    }
                }
                _ => Type::Number,
            }
        }

        Expr::Logical { left, op, right, .. } => {
            let l = type_of(db, env, left);
            let r = type_of(db, env, right);
            match op {
                // `a ?? b` strips undefined from the left side
                LogicalOp::NullishCoalescing => union_of(strip_undefined(l), r),
                LogicalOp::And | LogicalOp::Or => union_of(l, r),
            }
        }

        Expr::Ternary {
            then_expr,
            else_expr,
            ..
        } => union_of(type_of(db, env, then_expr), type_of(db, env, else_expr)),

        Expr::Assignment { value, .. } => type_of(db, env, value),

        Expr::Array { elements, .. } => {
            let mut element = None::<Type>;
            for item in elements {
                if matches!(item, Expr::Spread { .. }) {
                    return Type::Array(Box::new(Type::Unknown));
                }
                let ty = type_of(db, env, item).widened();
                element = Some(match element {
                    None => ty,
                    Some(prev) if prev == ty => prev,
                    Some(prev) => union_of(prev, ty),
                });
            }
            Type::Array(Box::new(element.unwrap_or(Type::Unknown)))
        }

        Expr::Object { properties, .. } => {
            let id = db.define_object();
            for prop in properties {
                match prop {
                    ObjectProperty::KeyValue { key, value, .. } => {
                        if let Some(name) = key.name() {
                            db.add_member(id, name.to_string(), type_of(db, env, value));
                        }
                    }
                    ObjectProperty::Shorthand { name, .. } => {
                        let ty = env.lookup(name).unwrap_or(Type::Unknown);
                        db.add_member(id, (*name).to_string(), ty);
                    }
                    ObjectProperty::Method { key, .. } => {
                        if let Some(name) = key.name() {
                            let fn_id = db.define_function();
                            db.add_member(id, name.to_string(), Type::Function(fn_id));
                        }
                    }
                    ObjectProperty::Spread { .. } => {}
                }
            }
            Type::Object(id)
        }

        Expr::Spread { argument, .. } => type_of(db, env, argument),

        Expr::Call { callee, args, .. } => call_return_type(db, env, callee, args),

        Expr::New {
            callee, type_args, ..
        } => {
            let name = trailing_name(callee);
            match name {
                Some(name) => {
                    let resolved: Vec<Type> = type_args
                        .iter()
                        .map(|ann| resolve_annotation(db, env, ann))
                        .collect();
                    Type::named_with(name, resolved)
                }
                None => Type::Unknown,
            }
        }

        Expr::Member {
            object, property, ..
        } => member_type(db, env, object, property),

        Expr::Index { object, index, .. } => {
            let object_ty = type_of(db, env, object);
            let literal_index = match index.unwrap_grouping() {
                Expr::Literal {
                    value: Literal::Number(n),
                    ..
                } => Some(*n as usize),
                _ => None,
            };
            index_type(&object_ty, literal_index)
        }

        Expr::As { ty, .. } => resolve_annotation(db, env, ty),
        Expr::NonNull { expr, .. } => strip_undefined(type_of(db, env, expr)),

        Expr::ArrowFunction {
            return_type, body, ..
        } => {
            let id = db.define_function();
            if let Some(ann) = return_type {
                db.set_return_type(id, resolve_annotation(db, env, ann));
            } else if let ArrowBody::Expr(value) = body {
                db.set_return_type(id, type_of(db, env, value));
            }
            Type::Function(id)
        }
        Expr::FunctionExpr { return_type, .. } => {
            let id = db.define_function();
            if let Some(ann) = return_type {
                db.set_return_type(id, resolve_annotation(db, env, ann));
            }
            Type::Function(id)
        }
        Expr::ClassExpr { name, .. } => match name {
            Some(name) => Type::named(*name),
            None => Type::Unknown,
        },
    }
}

fn call_return_type(db: &dyn Db, env: &TypeEnv, callee: &Expr, args: &[Expr]) -> Type {
    match callee.unwrap_grouping() {
        Expr::Member {
            object, property, ..
        } => {
            let object_ty = type_of(db, env, object);

            // `game.GetService("Players")`
            if *property == "GetService" {
                if let Some(Expr::Literal {
                    value: Literal::String(raw),
                    ..
                }) = args.first().map(|a| a.unwrap_grouping())
                {
                    return builtins::service_type(strip_quotes(raw));
                }
            }

            // `.size()` on containers and strings yields a number
            if *property == "size" {
                if is_sizable(&object_ty) {
                    return Type::Number;
                }
            }

            match &object_ty {
                Type::Named { name, .. } => {
                    builtins::named_method_return(name, property).unwrap_or(Type::Unknown)
                }
                Type::Object(id) => match db.lookup_member(*id, property) {
                    Some(Type::Function(fn_id)) => db.lookup_return_type(fn_id),
                    _ => Type::Unknown,
                },
                Type::Array(_) | Type::Tuple(_) => Type::Unknown,
                _ => Type::Unknown,
            }
        }
        Expr::Identifier { name, .. } => match env.lookup(name) {
            Some(Type::Function(id)) => db.lookup_return_type(id),
            _ => Type::Unknown,
        },
        _ => Type::Unknown,
    }
}

fn member_type(db: &dyn Db, env: &TypeEnv, object: &Expr, property: &str) -> Type {
    let object_ty = type_of(db, env, object);
    match &object_ty {
        Type::Named { name, .. } => builtins::named_member(name, property).unwrap_or(Type::Unknown),
        Type::Object(id) => db.lookup_member(*id, property).unwrap_or(Type::Unknown),
        _ => Type::Unknown,
    }
}

fn index_type(object_ty: &Type, literal_index: Option<usize>) -> Type {
    match object_ty {
        Type::Array(element) => (**element).clone(),
        Type::Tuple(elements) => match literal_index {
            Some(i) => elements.get(i).cloned().unwrap_or(Type::Unknown),
            None => Type::Unknown,
        },
        Type::Named { name, type_args } if name == "LuaTuple" => match type_args.first() {
            Some(Type::Tuple(elements)) => match literal_index {
                Some(i) => elements.get(i).cloned().unwrap_or(Type::Unknown),
                None => Type::Unknown,
            },
            Some(other) => other.clone(),
            None => Type::Unknown,
        },
        Type::Named { name, type_args } if name == "Array" || name == "ReadonlyArray" => {
            type_args.first().cloned().unwrap_or(Type::Unknown)
        }
        _ => Type::Unknown,
    }
}

fn is_sizable(ty: &Type) -> bool {
    matches!(ty, Type::Array(_) | Type::Tuple(_) | Type::String | Type::StringLiteral(_))
        || matches!(
            ty,
            Type::Named { name, .. }
                if builtins::ARRAY_TYPES.contains(&name.as_str())
                    || builtins::MAP_TYPES.contains(&name.as_str())
                    || builtins::SET_TYPES.contains(&name.as_str())
        )
}

/// Resolve a written type annotation to a `Type`.
pub fn resolve_annotation(db: &dyn Db, env: &TypeEnv, ann: &TypeAnn) -> Type {
    match ann {
        TypeAnn::Any { .. } => Type::Any,
        TypeAnn::Unknown { .. } => Type::Unknown,
        TypeAnn::Never { .. } => Type::Never,
        TypeAnn::Void { .. } => Type::Void,
        TypeAnn::Null { .. } => Type::Null,
        TypeAnn::Undefined { .. } => Type::Undefined,
        TypeAnn::String { .. } => Type::String,
        TypeAnn::Number { .. } => Type::Number,
        TypeAnn::Boolean { .. } => Type::Boolean,

        TypeAnn::Reference {
            name, type_args, ..
        } => {
            // Generic parameters and user aliases shadow nominal names
            if !name.contains('.') {
                if let Some(bound) = env.lookup_type(name) {
                    return bound;
                }
            }
            let resolved: Vec<Type> = type_args
                .iter()
                .map(|arg| resolve_annotation(db, env, arg))
                .collect();
            Type::named_with(*name, resolved)
        }

        TypeAnn::Array { element, .. } => {
            Type::Array(Box::new(resolve_annotation(db, env, element)))
        }
        TypeAnn::Tuple { elements, .. } => Type::Tuple(
            elements
                .iter()
                .map(|e| resolve_annotation(db, env, e))
                .collect(),
        ),
        TypeAnn::Union { constituents, .. } => Type::Union(
            constituents
                .iter()
                .map(|c| resolve_annotation(db, env, c))
                .collect(),
        ),
        TypeAnn::Intersection { constituents, .. } => Type::Intersection(
            constituents
                .iter()
                .map(|c| resolve_annotation(db, env, c))
                .collect(),
        ),
        TypeAnn::Literal { value, .. } => literal_type(value),
        TypeAnn::Function { return_type, .. } => {
            let id = db.define_function();
            if let Some(ret) = return_type {
                db.set_return_type(id, resolve_annotation(db, env, ret));
            }
            Type::Function(id)
        }
        TypeAnn::ObjectLiteral { members, .. } => {
            let id = db.define_object();
            for member in members {
                let ty = if member.is_method {
                    let fn_id = db.define_function();
                    if let Some(ret) = &member.ty {
                        db.set_return_type(fn_id, resolve_annotation(db, env, ret));
                    }
                    Type::Function(fn_id)
                } else {
                    member
                        .ty
                        .as_ref()
                        .map(|t| resolve_annotation(db, env, t))
                        .unwrap_or(Type::Unknown)
                };
                db.add_member(id, member.name.to_string(), ty);
            }
            Type::Object(id)
        }
        TypeAnn::Keyof { .. } => Type::String,
        TypeAnn::TypeofQuery { name, .. } => env.lookup(name).unwrap_or(Type::Unknown),
        TypeAnn::Parenthesized { ty, .. } => resolve_annotation(db, env, ty),
    }
}

fn literal_type(value: &Literal) -> Type {
    match value {
        Literal::Number(n) => Type::number_literal(*n),
        Literal::String(raw) => Type::StringLiteral(strip_quotes(raw).to_string()),
        Literal::Boolean(_) => Type::Boolean,
        Literal::Null => Type::Null,
        Literal::Regex(_) => Type::named("RegExp"),
        Literal::Template(raw) => {
            let contents = strip_quotes(raw);
            if contents.contains("${") {
                Type::String
            } else {
                Type::StringLiteral(contents.to_string())
            }
        }
    }
}

fn strip_quotes(raw: &str) -> &str {
    if raw.len() >= 2 {
        &raw[1..raw.len() - 1]
    } else {
        raw
    }
}

fn strip_undefined(ty: Type) -> Type {
    match ty {
        Type::Union(parts) => {
            let mut remaining: Vec<Type> = parts
                .into_iter()
                .filter(|p| !matches!(p, Type::Undefined))
                .collect();
            match remaining.len() {
                0 => Type::Undefined,
                1 => remaining.pop().unwrap_or(Type::Unknown),
                _ => Type::Union(remaining),
            }
        }
        other => other,
    }
}

fn union_of(left: Type, right: Type) -> Type {
    if left == right {
        return left;
    }
    let mut parts = Vec::with_capacity(2);
    match left {
        Type::Union(existing) => parts.extend(existing),
        other => parts.push(other),
    }
    match right {
        Type::Union(existing) => parts.extend(existing),
        other => parts.push(other),
    }
    parts.dedup();
    Type::Union(parts)
}

/// The rightmost name in a constructor reference: `Roact.Component` -> `Component`
fn trailing_name<'a>(expr: &Expr<'a>) -> Option<&'a str> {
    match expr.unwrap_grouping() {
        Expr::Identifier { name, .. } => Some(*name),
        Expr::Member { property, .. } => Some(*property),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use rbxts_parser::Parser;

    fn first_init_type(source: &str) -> Type {
        let program = Parser::new(source).parse().expect("parse");
        let db = Database::new();
        let mut env = TypeEnv::new();
        builtins::seed_env(&db, &mut env);
        let rbxts_parser::Stmt::VarDecl { declarations, .. } = &program.statements[0] else {
            panic!("expected VarDecl");
        };
        let init = declarations[0].init.as_ref().expect("initializer");
        type_of(&db, &env, init)
    }

    #[test]
    fn infers_array_literal() {
        assert_eq!(
            first_init_type("const arr = [1, 2, 3];"),
            Type::Array(Box::new(Type::Number))
        );
    }

    #[test]
    fn infers_service_lookup() {
        assert_eq!(
            first_init_type("const players = game.GetService(\"Players\");"),
            Type::named("Players")
        );
    }

    #[test]
    fn infers_signal_wait_tuple() {
        let ty = first_init_type("const r = game.Loaded.Wait();");
        assert!(matches!(ty, Type::Named { ref name, .. } if name == "LuaTuple"));
    }

    #[test]
    fn infers_new_expression_nominal_type() {
        assert_eq!(
            first_init_type("const v = new Vector3(1, 2, 3);"),
            Type::named("Vector3")
        );
    }

    #[test]
    fn negated_zero_stays_literal() {
        assert_eq!(first_init_type("const z = -0;"), Type::number_literal(-0.0));
    }

    #[test]
    fn empty_object_literal_has_no_members() {
        let program = Parser::new("const o = {};").parse().expect("parse");
        let db = Database::new();
        let env = TypeEnv::new();
        let rbxts_parser::Stmt::VarDecl { declarations, .. } = &program.statements[0] else {
            panic!("expected VarDecl");
        };
        let ty = type_of(&db, &env, declarations[0].init.as_ref().unwrap());
        let Type::Object(id) = ty else {
            panic!("expected object type");
        };
        assert_eq!(db.member_count(id), 0);
    }
}
