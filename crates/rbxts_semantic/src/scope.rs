//! Scoped type environment

use crate::types::Type;
use rustc_hash::FxHashMap;
use std::rc::Rc;

/// Tracks value and type bindings within a scope (function or block).
#[derive(Debug, Clone, Default)]
pub struct TypeEnv {
    values: FxHashMap<String, Type>,
    /// Type-level names: aliases, interfaces, generic parameters
    type_names: FxHashMap<String, Type>,
    parent: Option<Rc<TypeEnv>>,
}

impl TypeEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: String, ty: Type) {
        self.values.insert(name, ty);
    }

    pub fn lookup(&self, name: &str) -> Option<Type> {
        if let Some(ty) = self.values.get(name) {
            return Some(ty.clone());
        }
        if let Some(parent) = &self.parent {
            return parent.lookup(name);
        }
        None
    }

    pub fn insert_type(&mut self, name: String, ty: Type) {
        self.type_names.insert(name, ty);
    }

    pub fn lookup_type(&self, name: &str) -> Option<Type> {
        if let Some(ty) = self.type_names.get(name) {
            return Some(ty.clone());
        }
        if let Some(parent) = &self.parent {
            return parent.lookup_type(name);
        }
        None
    }

    /// Create a child scope. Uses Rc for O(1) sharing instead of deep clone.
    pub fn fork(&self) -> Self {
        Self {
            values: FxHashMap::default(),
            type_names: FxHashMap::default(),
            parent: Some(Rc::new(self.shallow_clone())),
        }
    }

    /// Shallow clone - only clones the local maps, not the parent chain
    fn shallow_clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            type_names: self.type_names.clone(),
            parent: self.parent.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fork_sees_parent_bindings() {
        let mut env = TypeEnv::new();
        env.insert("x".to_string(), Type::Number);
        let child = env.fork();
        assert_eq!(child.lookup("x"), Some(Type::Number));
        assert_eq!(child.lookup("y"), None);
    }

    #[test]
    fn child_shadows_parent() {
        let mut env = TypeEnv::new();
        env.insert("x".to_string(), Type::Number);
        let mut child = env.fork();
        child.insert("x".to_string(), Type::String);
        assert_eq!(child.lookup("x"), Some(Type::String));
        assert_eq!(env.lookup("x"), Some(Type::Number));
    }
}
