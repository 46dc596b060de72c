//! Per-file database of object shapes and function signatures

use crate::types::Type;
use rustc_hash::FxHashMap;
use std::cell::RefCell;

/// Read-shared type store. Built while the checker descends, queried by
/// every rule in the same pass; rebuilt per file.
pub trait Db {
    fn define_object(&self) -> TypeId;
    fn add_member(&self, object_id: TypeId, name: String, ty: Type);
    fn lookup_member(&self, object_id: TypeId, name: &str) -> Option<Type>;
    fn member_count(&self, object_id: TypeId) -> usize;

    fn define_function(&self) -> TypeId;
    fn set_return_type(&self, fn_id: TypeId, ty: Type);
    fn lookup_return_type(&self, fn_id: TypeId) -> Type;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeId(pub u32);

#[derive(Default)]
pub struct Database {
    object_members: RefCell<FxHashMap<TypeId, FxHashMap<String, Type>>>,
    function_returns: RefCell<FxHashMap<TypeId, Type>>,
    next_id: RefCell<u32>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&self) -> TypeId {
        let id = TypeId(*self.next_id.borrow());
        *self.next_id.borrow_mut() += 1;
        id
    }
}

impl Db for Database {
    fn define_object(&self) -> TypeId {
        let id = self.alloc();
        self.object_members
            .borrow_mut()
            .insert(id, FxHashMap::default());
        id
    }

    fn add_member(&self, object_id: TypeId, name: String, ty: Type) {
        if let Some(members) = self.object_members.borrow_mut().get_mut(&object_id) {
            members.insert(name, ty);
        }
    }

    fn lookup_member(&self, object_id: TypeId, name: &str) -> Option<Type> {
        self.object_members
            .borrow()
            .get(&object_id)?
            .get(name)
            .cloned()
    }

    fn member_count(&self, object_id: TypeId) -> usize {
        self.object_members
            .borrow()
            .get(&object_id)
            .map(|m| m.len())
            .unwrap_or(0)
    }

    fn define_function(&self) -> TypeId {
        let id = self.alloc();
        self.function_returns.borrow_mut().insert(id, Type::Unknown);
        id
    }

    fn set_return_type(&self, fn_id: TypeId, ty: Type) {
        self.function_returns.borrow_mut().insert(fn_id, ty);
    }

    fn lookup_return_type(&self, fn_id: TypeId) -> Type {
        self.function_returns
            .borrow()
            .get(&fn_id)
            .cloned()
            .unwrap_or(Type::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_members_round_trip() {
        let db = Database::new();
        let id = db.define_object();
        assert_eq!(db.member_count(id), 0);
        db.add_member(id, "x".to_string(), Type::Number);
        assert_eq!(db.lookup_member(id, "x"), Some(Type::Number));
        assert_eq!(db.member_count(id), 1);
        assert_eq!(db.lookup_member(id, "y"), None);
    }

    #[test]
    fn function_returns_default_to_unknown() {
        let db = Database::new();
        let id = db.define_function();
        assert_eq!(db.lookup_return_type(id), Type::Unknown);
        db.set_return_type(id, Type::Boolean);
        assert_eq!(db.lookup_return_type(id), Type::Boolean);
    }
}
