//! rbxts-semantic - Type model and query facade
//!
//! The linter's view of the type system: a small explicit type tree, a
//! per-file database of object shapes and function signatures, a scoped
//! type environment, structural inference over expressions, and the
//! union-fold predicates rules query.
//!
//! Everything here is total: an unresolvable type is `Type::Unknown`,
//! never an error, and rules treat `Unknown` as "do not flag".

pub mod builtins;
pub mod db;
pub mod infer;
pub mod query;
pub mod scope;
pub mod types;

pub use db::{Database, Db, TypeId};
pub use scope::TypeEnv;
pub use types::{FloatLiteral, Type};
