//! Union-fold predicates over the type tree
//!
//! These mirror the questions rules ask: "could this value be 0 / NaN /
//! an empty string?", "is this an array-like?", "is this declared as a
//! known container?". Union and intersection types fold recursively.
//!
//! Constituents that are `any`/`unknown`/an unconstrained type parameter
//! or a structurally empty object shape are skipped by `is_possibly`:
//! generic code must never be flagged on what it *might* instantiate to.
//! This is a deliberate false-negative bias; do not tighten it.

use crate::builtins;
use crate::db::Db;
use crate::types::Type;
use smallvec::SmallVec;

/// Does any union/intersection constituent satisfy the predicate, after
/// the permissive exclusions above? Type parameters with a constraint are
/// folded through their constraint.
pub fn is_possibly(db: &dyn Db, ty: &Type, pred: &mut dyn FnMut(&Type) -> bool) -> bool {
    let mut work: SmallVec<[&Type; 4]> = SmallVec::new();
    work.push(ty);

    while let Some(current) = work.pop() {
        match current {
            Type::Union(parts) | Type::Intersection(parts) => work.extend(parts.iter()),
            Type::TypeParam {
                constraint: Some(constraint),
                ..
            } => work.push(constraint),
            _ if is_unconstrained(current) => {}
            Type::Object(id) if db.member_count(*id) == 0 => {}
            _ => {
                if pred(current) {
                    return true;
                }
            }
        }
    }
    false
}

/// `any` / `unknown` / a bare generic parameter
pub fn is_unconstrained(ty: &Type) -> bool {
    matches!(
        ty,
        Type::Any
            | Type::Unknown
            | Type::TypeParam {
                constraint: None,
                ..
            }
    )
}

/// A structurally empty object shape (`{}`, empty interfaces)
pub fn is_empty_object(db: &dyn Db, ty: &Type) -> bool {
    matches!(ty, Type::Object(id) if db.member_count(*id) == 0)
}

/// Could this be the numeric value `0` or `NaN`? A literal matches by
/// value; any non-literal number-like matches outright.
pub fn is_falsy_number(ty: &Type) -> bool {
    match ty {
        Type::NumberLiteral(lit) => lit.value() == 0.0 || lit.value().is_nan(),
        Type::Number => true,
        _ => false,
    }
}

/// Could this be the empty string? A literal matches by value; any
/// non-literal string-like matches outright.
pub fn is_falsy_string(ty: &Type) -> bool {
    match ty {
        Type::StringLiteral(value) => value.is_empty(),
        Type::String => true,
        _ => false,
    }
}

/// Array-like shapes: arrays, tuples, and the Array/ReadonlyArray heads
pub fn is_array_like(ty: &Type) -> bool {
    match ty {
        Type::Array(_) | Type::Tuple(_) => true,
        Type::Named { name, .. } => builtins::ARRAY_TYPES.contains(&name.as_str()),
        _ => false,
    }
}

pub fn is_string_like(ty: &Type) -> bool {
    matches!(ty, Type::String | Type::StringLiteral(_))
}

/// Does the type's declaration head match one of the candidate names,
/// independent of generic arguments?
pub fn is_builtin_like(ty: &Type, candidates: &[&str]) -> bool {
    matches!(ty, Type::Named { name, .. } if candidates.contains(&name.as_str()))
}

pub fn is_map_like(ty: &Type) -> bool {
    is_builtin_like(ty, builtins::MAP_TYPES)
}

pub fn is_set_like(ty: &Type) -> bool {
    is_builtin_like(ty, builtins::SET_TYPES)
}

pub fn is_function_like(ty: &Type) -> bool {
    matches!(ty, Type::Function(_))
}

/// Name of the nominal head, if the type is a direct named reference.
/// Detects sentinel wrappers like `LuaTuple`.
pub fn alias_name(ty: &Type) -> Option<&str> {
    match ty {
        Type::Named { name, .. } => Some(name.as_str()),
        _ => None,
    }
}

pub fn is_lua_tuple(ty: &Type) -> bool {
    alias_name(ty) == Some("LuaTuple")
}

/// The Roblox data type name, searching recursively through unions and
/// intersections.
pub fn roblox_data_type_name(ty: &Type) -> Option<&str> {
    match ty {
        Type::Named { name, .. } if builtins::DATA_TYPES.contains(&name.as_str()) => Some(name.as_str()),
        Type::Union(parts) | Type::Intersection(parts) => {
            parts.iter().find_map(roblox_data_type_name)
        }
        Type::TypeParam {
            constraint: Some(constraint),
            ..
        } => roblox_data_type_name(constraint),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::types::FloatLiteral;

    #[test]
    fn zero_literal_is_falsy_number() {
        assert!(is_falsy_number(&Type::number_literal(0.0)));
        assert!(is_falsy_number(&Type::number_literal(-0.0)));
        assert!(is_falsy_number(&Type::NumberLiteral(FloatLiteral(f64::NAN))));
        assert!(is_falsy_number(&Type::Number));
        assert!(!is_falsy_number(&Type::number_literal(1.0)));
        assert!(!is_falsy_number(&Type::String));
    }

    #[test]
    fn union_with_zero_is_possibly_falsy() {
        let db = Database::new();
        let ty = Type::Union(vec![Type::String, Type::number_literal(0.0)]);
        assert!(is_possibly(&db, &ty, &mut is_falsy_number));
    }

    #[test]
    fn bare_generic_never_matches() {
        let db = Database::new();
        let ty = Type::TypeParam {
            name: "T".to_string(),
            constraint: None,
        };
        assert!(!is_possibly(&db, &ty, &mut is_falsy_number));
        assert!(!is_possibly(&db, &ty, &mut is_falsy_string));
    }

    #[test]
    fn constrained_generic_folds_through_constraint() {
        let db = Database::new();
        let ty = Type::TypeParam {
            name: "T".to_string(),
            constraint: Some(Box::new(Type::Number)),
        };
        assert!(is_possibly(&db, &ty, &mut is_falsy_number));
    }

    #[test]
    fn empty_object_is_skipped() {
        let db = Database::new();
        let id = db.define_object();
        let ty = Type::Object(id);
        assert!(!is_possibly(&db, &ty, &mut |_| true));
        assert!(is_empty_object(&db, &ty));
    }

    #[test]
    fn any_constituent_is_skipped_for_array_check() {
        let db = Database::new();
        assert!(!is_possibly(&db, &Type::Any, &mut is_array_like));
        let arr = Type::Array(Box::new(Type::Number));
        assert!(is_possibly(&db, &arr, &mut is_array_like));
    }

    #[test]
    fn finds_data_type_through_union() {
        let ty = Type::Union(vec![Type::Undefined, Type::named("Vector3")]);
        assert_eq!(roblox_data_type_name(&ty), Some("Vector3"));
        assert_eq!(roblox_data_type_name(&Type::named("Color3")), None);
    }

    #[test]
    fn lua_tuple_alias_detection() {
        let ty = Type::named_with("LuaTuple", vec![Type::Tuple(vec![Type::Boolean])]);
        assert!(is_lua_tuple(&ty));
        assert!(!is_lua_tuple(&Type::named("Vector3")));
    }
}
