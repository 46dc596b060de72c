//! Semantic model - scopes, bindings and declaration sites
//!
//! Built by the checker in the same pass that runs the rules. Rules read
//! it during traversal (resolution of already-visited names) and in
//! `check_post` (whole-file aggregates like merge counting).

use rbxts_lexer::Span;
use rbxts_parser::VarKind;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Module,
    Function,
    Block,
    Namespace,
    Class,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    Variable,
    Parameter,
    Function,
    /// The name of a named function *expression*, visible only inside it
    FunctionExprName,
    Class,
    Enum,
    Namespace,
    Interface,
    TypeAlias,
    Import,
    CatchVar,
}

/// A named declaration site used for merge counting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Enum,
    Namespace { type_only: bool },
}

#[derive(Debug)]
struct Scope<'a> {
    kind: ScopeKind,
    parent: Option<ScopeId>,
    names: FxHashMap<&'a str, BindingId>,
}

#[derive(Debug)]
pub struct Binding<'a> {
    pub name: &'a str,
    pub kind: BindingKind,
    pub var_kind: Option<VarKind>,
    /// Span of the bound name itself
    pub name_span: Span,
    pub scope: ScopeId,
    pub references: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct DeclSite<'a> {
    pub name: &'a str,
    pub kind: DeclKind,
    pub name_span: Span,
    pub scope: ScopeId,
}

/// An `export = <identifier>` site
#[derive(Debug, Clone, Copy)]
pub struct ExportAssignmentSite<'a> {
    pub name: &'a str,
    pub span: Span,
    pub scope: ScopeId,
}

#[derive(Debug)]
pub struct SemanticModel<'a> {
    scopes: Vec<Scope<'a>>,
    scope_stack: Vec<ScopeId>,
    bindings: Vec<Binding<'a>>,
    decl_sites: Vec<DeclSite<'a>>,
    export_assignments: Vec<ExportAssignmentSite<'a>>,
}

impl<'a> Default for SemanticModel<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> SemanticModel<'a> {
    pub fn new() -> Self {
        let module_scope = Scope {
            kind: ScopeKind::Module,
            parent: None,
            names: FxHashMap::default(),
        };
        Self {
            scopes: vec![module_scope],
            scope_stack: vec![ScopeId(0)],
            bindings: Vec::new(),
            decl_sites: Vec::new(),
            export_assignments: Vec::new(),
        }
    }

    pub fn current_scope(&self) -> ScopeId {
        *self.scope_stack.last().unwrap_or(&ScopeId(0))
    }

    pub fn scope_kind(&self, scope: ScopeId) -> ScopeKind {
        self.scopes[scope.0 as usize].kind
    }

    pub fn push_scope(&mut self, kind: ScopeKind) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            kind,
            parent: Some(self.current_scope()),
            names: FxHashMap::default(),
        });
        self.scope_stack.push(id);
        id
    }

    pub fn pop_scope(&mut self) {
        if self.scope_stack.len() > 1 {
            self.scope_stack.pop();
        }
    }

    pub fn add_binding(
        &mut self,
        name: &'a str,
        kind: BindingKind,
        var_kind: Option<VarKind>,
        name_span: Span,
    ) -> BindingId {
        let scope = self.current_scope();
        let id = BindingId(self.bindings.len() as u32);
        self.bindings.push(Binding {
            name,
            kind,
            var_kind,
            name_span,
            scope,
            references: 0,
        });
        self.scopes[scope.0 as usize].names.insert(name, id);
        id
    }

    /// Resolve a name through the active scope chain
    pub fn resolve(&self, name: &str) -> Option<BindingId> {
        self.resolve_from(self.current_scope(), name)
    }

    pub fn resolve_from(&self, scope: ScopeId, name: &str) -> Option<BindingId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = &self.scopes[id.0 as usize];
            if let Some(binding) = scope.names.get(name) {
                return Some(*binding);
            }
            current = scope.parent;
        }
        None
    }

    pub fn binding(&self, id: BindingId) -> &Binding<'a> {
        &self.bindings[id.0 as usize]
    }

    /// Record a reference to a name from the current scope
    pub fn add_reference(&mut self, name: &str) {
        if let Some(id) = self.resolve(name) {
            self.bindings[id.0 as usize].references += 1;
        }
    }

    pub fn bindings(&self) -> impl Iterator<Item = &Binding<'a>> {
        self.bindings.iter()
    }

    pub fn add_decl_site(&mut self, name: &'a str, kind: DeclKind, name_span: Span) {
        let scope = self.current_scope();
        self.decl_sites.push(DeclSite {
            name,
            kind,
            name_span,
            scope,
        });
    }

    pub fn decl_sites(&self) -> &[DeclSite<'a>] {
        &self.decl_sites
    }

    /// All declaration sites sharing scope and name with `site`
    pub fn merge_group(&self, site: &DeclSite<'a>) -> Vec<&DeclSite<'a>> {
        self.decl_sites
            .iter()
            .filter(|other| {
                other.scope == site.scope
                    && other.name == site.name
                    && std::mem::discriminant(&other.kind) == std::mem::discriminant(&site.kind)
            })
            .collect()
    }

    pub fn add_export_assignment(&mut self, name: &'a str, span: Span) {
        let scope = self.current_scope();
        self.export_assignments.push(ExportAssignmentSite {
            name,
            span,
            scope,
        });
    }

    pub fn export_assignments(&self) -> &[ExportAssignmentSite<'a>] {
        &self.export_assignments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_through_scope_chain() {
        let mut model = SemanticModel::new();
        model.add_binding("outer", BindingKind::Variable, Some(VarKind::Let), Span::new(0, 5));
        model.push_scope(ScopeKind::Function);
        assert!(model.resolve("outer").is_some());
        model.add_binding("inner", BindingKind::Variable, Some(VarKind::Const), Span::new(10, 15));
        assert!(model.resolve("inner").is_some());
        model.pop_scope();
        assert!(model.resolve("inner").is_none());
    }

    #[test]
    fn counts_references() {
        let mut model = SemanticModel::new();
        let id = model.add_binding("f", BindingKind::FunctionExprName, None, Span::new(0, 1));
        model.add_reference("f");
        model.add_reference("f");
        assert_eq!(model.binding(id).references, 2);
    }

    #[test]
    fn merge_groups_are_scope_local() {
        let mut model = SemanticModel::new();
        model.add_decl_site("E", DeclKind::Enum, Span::new(0, 1));
        model.push_scope(ScopeKind::Namespace);
        model.add_decl_site("E", DeclKind::Enum, Span::new(10, 11));
        model.pop_scope();
        let first = model.decl_sites()[0];
        assert_eq!(model.merge_group(&first).len(), 1);
    }
}
