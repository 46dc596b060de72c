//! Ambient Roblox declarations
//!
//! A pragmatic slice of the roblox-ts type environment: the globals every
//! script sees and the member/return shapes the rules ask about. Unlisted
//! members resolve to `Unknown`, which rules treat as "do not flag".

use crate::db::Db;
use crate::scope::TypeEnv;
use crate::types::Type;

/// Roblox data types with operator macro methods
pub const DATA_TYPES: &[&str] = &[
    "CFrame",
    "UDim",
    "UDim2",
    "Vector2",
    "Vector2int16",
    "Vector3",
    "Vector3int16",
];

/// Map-like standard container heads
pub const MAP_TYPES: &[&str] = &["Map", "ReadonlyMap", "WeakMap"];

/// Set-like standard container heads
pub const SET_TYPES: &[&str] = &["Set", "ReadonlySet", "WeakSet"];

/// Array-like standard container heads
pub const ARRAY_TYPES: &[&str] = &["Array", "ReadonlyArray"];

/// Seed a fresh per-file environment with the ambient globals.
pub fn seed_env(db: &dyn Db, env: &mut TypeEnv) {
    env.insert("game".to_string(), Type::named("DataModel"));
    env.insert("script".to_string(), Type::named("Script"));
    env.insert("workspace".to_string(), Type::named("Workspace"));
    env.insert("task".to_string(), Type::named("TaskLibrary"));

    // Deprecated scheduler globals (prefer-task-library targets)
    for name in ["wait", "delay", "spawn"] {
        let id = db.define_function();
        db.set_return_type(id, Type::Number);
        env.insert(name.to_string(), Type::Function(id));
    }

    // Lua iteration primitives
    for name in ["pairs", "ipairs"] {
        let id = db.define_function();
        env.insert(name.to_string(), Type::Function(id));
    }

    for name in ["print", "warn", "error", "typeIs", "typeOf", "tostring", "tonumber"] {
        let id = db.define_function();
        env.insert(name.to_string(), Type::Function(id));
    }

    // Data type constructor tables; deliberately without a `new` member,
    // construction goes through `new Vector3(...)` in TypeScript.
    for name in DATA_TYPES {
        let id = db.define_object();
        env.insert((*name).to_string(), Type::Object(id));
    }
}

/// Property type of a member on an ambient nominal type.
pub fn named_member(type_name: &str, member: &str) -> Option<Type> {
    match (type_name, member) {
        // Signals surface wherever instances are touched
        ("DataModel", "Loaded") => Some(Type::named("RBXScriptSignal")),
        ("DataModel", "Workspace") => Some(Type::named("Workspace")),
        ("Players", "PlayerAdded") => Some(Type::named("RBXScriptSignal")),
        ("Players", "PlayerRemoving") => Some(Type::named("RBXScriptSignal")),
        ("Instance", "Changed") => Some(Type::named("RBXScriptSignal")),
        ("Player", "Character") => Some(Type::named("Model")),
        _ => None,
    }
}

/// Return type of a method call on an ambient nominal type.
pub fn named_method_return(type_name: &str, method: &str) -> Option<Type> {
    match (type_name, method) {
        // Signal waits yield a multi-value LuaTuple
        ("RBXScriptSignal", "Wait") => Some(Type::named_with(
            "LuaTuple",
            vec![Type::Tuple(vec![Type::Unknown])],
        )),
        ("Players", "GetPlayers") => Some(Type::Array(Box::new(Type::named("Player")))),
        (_, "GetChildren") => Some(Type::Array(Box::new(Type::named("Instance")))),
        (_, "IsA") => Some(Type::Boolean),
        (_, "FindFirstChild") => Some(Type::Union(vec![
            Type::named("Instance"),
            Type::Undefined,
        ])),
        // Operator macro methods stay within the data type
        (name, "add" | "sub" | "mul" | "div")
            if DATA_TYPES.contains(&name) =>
        {
            Some(Type::named(name))
        }
        _ => None,
    }
}

/// `game.GetService("Players")` resolves to the service's nominal type.
pub fn service_type(service_literal: &str) -> Type {
    Type::named(service_literal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    #[test]
    fn seeds_globals() {
        let db = Database::new();
        let mut env = TypeEnv::new();
        seed_env(&db, &mut env);
        assert_eq!(env.lookup("game"), Some(Type::named("DataModel")));
        assert!(matches!(env.lookup("pairs"), Some(Type::Function(_))));
        assert!(matches!(env.lookup("Vector3"), Some(Type::Object(_))));
    }

    #[test]
    fn signal_wait_is_a_lua_tuple() {
        let ty = named_method_return("RBXScriptSignal", "Wait").unwrap();
        assert!(matches!(ty, Type::Named { ref name, .. } if name == "LuaTuple"));
    }
}
