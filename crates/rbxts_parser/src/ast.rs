//! AST node definitions for the TypeScript subset

use rbxts_lexer::Span;

/// A parsed source file
#[derive(Debug, Clone)]
pub struct Program<'a> {
    pub statements: Vec<Stmt<'a>>,
    pub span: Span,
}

/// A block of statements
#[derive(Debug, Clone)]
pub struct Block<'a> {
    pub statements: Vec<Stmt<'a>>,
    pub span: Span,
}

/// `var` / `let` / `const`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    Var,
    Let,
    Const,
}

/// A statement
#[derive(Debug, Clone)]
pub enum Stmt<'a> {
    /// Variable declaration: `const x: T = e, y = f;`
    VarDecl {
        kind: VarKind,
        declarations: Vec<VarDeclarator<'a>>,
        declare: bool,
        span: Span,
    },
    /// Function declaration (body absent for `declare function`)
    FunctionDecl {
        name: &'a str,
        name_span: Span,
        type_params: Vec<TypeParam<'a>>,
        params: Vec<Param<'a>>,
        return_type: Option<TypeAnn<'a>>,
        body: Option<Block<'a>>,
        declare: bool,
        span: Span,
    },
    /// Class declaration
    ClassDecl {
        name: Option<&'a str>,
        name_span: Option<Span>,
        members: Vec<ClassMember<'a>>,
        span: Span,
    },
    /// Interface declaration (member shapes only)
    InterfaceDecl {
        name: &'a str,
        name_span: Span,
        members: Vec<TypeMember<'a>>,
        span: Span,
    },
    /// `type X<T> = ...`
    TypeAliasDecl {
        name: &'a str,
        name_span: Span,
        ty: TypeAnn<'a>,
        span: Span,
    },
    /// `enum E { ... }` / `const enum E { ... }`
    EnumDecl {
        name: &'a str,
        name_span: Span,
        members: Vec<EnumMember<'a>>,
        is_const: bool,
        span: Span,
    },
    /// `namespace N { ... }` / `module "m" { ... }` / `declare global { ... }`
    ModuleDecl {
        name: ModuleName<'a>,
        name_span: Span,
        body: Option<Vec<Stmt<'a>>>,
        declare: bool,
        span: Span,
    },
    /// `import ... from "source"`
    ImportDecl {
        specifiers: Vec<ImportSpecifier<'a>>,
        source: &'a str,
        source_span: Span,
        type_only: bool,
        span: Span,
    },
    /// `export { a, b } from "m"` or `export <declaration>`
    ExportNamed {
        declaration: Option<Box<Stmt<'a>>>,
        specifiers: Vec<ExportSpecifier<'a>>,
        source: Option<&'a str>,
        span: Span,
    },
    /// `export * from "m"`
    ExportAll {
        source: &'a str,
        span: Span,
    },
    /// `export = expr`
    ExportAssignment {
        expr: Expr<'a>,
        span: Span,
    },
    /// `export default expr`
    ExportDefault {
        expr: Expr<'a>,
        span: Span,
    },
    If {
        condition: Expr<'a>,
        then_branch: Box<Stmt<'a>>,
        else_branch: Option<Box<Stmt<'a>>>,
        span: Span,
    },
    For {
        init: Option<Box<Stmt<'a>>>,
        condition: Option<Expr<'a>>,
        update: Option<Expr<'a>>,
        body: Box<Stmt<'a>>,
        span: Span,
    },
    ForIn {
        left: ForHead<'a>,
        right: Expr<'a>,
        body: Box<Stmt<'a>>,
        span: Span,
    },
    ForOf {
        left: ForHead<'a>,
        right: Expr<'a>,
        body: Box<Stmt<'a>>,
        span: Span,
    },
    While {
        condition: Expr<'a>,
        body: Box<Stmt<'a>>,
        span: Span,
    },
    DoWhile {
        body: Box<Stmt<'a>>,
        condition: Expr<'a>,
        span: Span,
    },
    Switch {
        discriminant: Expr<'a>,
        cases: Vec<SwitchCase<'a>>,
        span: Span,
    },
    Return {
        value: Option<Expr<'a>>,
        span: Span,
    },
    Break {
        label: Option<&'a str>,
        span: Span,
    },
    Continue {
        label: Option<&'a str>,
        span: Span,
    },
    Throw {
        value: Expr<'a>,
        span: Span,
    },
    TryCatch {
        try_block: Block<'a>,
        catch_param: Option<Pattern<'a>>,
        catch_block: Option<Block<'a>>,
        finally_block: Option<Block<'a>>,
        span: Span,
    },
    /// `label: stmt` (flagged by no-unsupported-syntax; also the shape
    /// a Lua-style `obj:method()` call parses into)
    Labeled {
        label: &'a str,
        label_span: Span,
        body: Box<Stmt<'a>>,
        span: Span,
    },
    Block(Block<'a>),
    Expr {
        expr: Expr<'a>,
        span: Span,
    },
    Empty {
        span: Span,
    },
}

impl<'a> Stmt<'a> {
    pub fn span(&self) -> Span {
        match self {
            Stmt::VarDecl { span, .. }
            | Stmt::FunctionDecl { span, .. }
            | Stmt::ClassDecl { span, .. }
            | Stmt::InterfaceDecl { span, .. }
            | Stmt::TypeAliasDecl { span, .. }
            | Stmt::EnumDecl { span, .. }
            | Stmt::ModuleDecl { span, .. }
            | Stmt::ImportDecl { span, .. }
            | Stmt::ExportNamed { span, .. }
            | Stmt::ExportAll { span, .. }
            | Stmt::ExportAssignment { span, .. }
            | Stmt::ExportDefault { span, .. }
            | Stmt::If { span, .. }
            | Stmt::For { span, .. }
            | Stmt::ForIn { span, .. }
            | Stmt::ForOf { span, .. }
            | Stmt::While { span, .. }
            | Stmt::DoWhile { span, .. }
            | Stmt::Switch { span, .. }
            | Stmt::Return { span, .. }
            | Stmt::Break { span, .. }
            | Stmt::Continue { span, .. }
            | Stmt::Throw { span, .. }
            | Stmt::TryCatch { span, .. }
            | Stmt::Labeled { span, .. }
            | Stmt::Expr { span, .. }
            | Stmt::Empty { span } => *span,
            Stmt::Block(block) => block.span,
        }
    }
}

/// Head of a `for..in` / `for..of`: either a fresh binding or a bare target
#[derive(Debug, Clone)]
pub enum ForHead<'a> {
    VarDecl {
        kind: VarKind,
        pattern: Pattern<'a>,
        span: Span,
    },
    Expr(Expr<'a>),
}

impl<'a> ForHead<'a> {
    pub fn span(&self) -> Span {
        match self {
            ForHead::VarDecl { span, .. } => *span,
            ForHead::Expr(expr) => expr.span(),
        }
    }
}

/// One `name = init` item inside a declaration statement
#[derive(Debug, Clone)]
pub struct VarDeclarator<'a> {
    pub pattern: Pattern<'a>,
    pub init: Option<Expr<'a>>,
    pub span: Span,
}

/// A binding pattern
#[derive(Debug, Clone)]
pub enum Pattern<'a> {
    Identifier {
        name: &'a str,
        type_ann: Option<TypeAnn<'a>>,
        optional: bool,
        span: Span,
    },
    Array {
        elements: Vec<Option<Pattern<'a>>>,
        type_ann: Option<TypeAnn<'a>>,
        span: Span,
    },
    Object {
        properties: Vec<ObjectPatternProp<'a>>,
        type_ann: Option<TypeAnn<'a>>,
        span: Span,
    },
    /// `...rest` inside an array/object pattern or parameter list
    Rest {
        argument: Box<Pattern<'a>>,
        span: Span,
    },
    /// `pattern = default`
    Assign {
        target: Box<Pattern<'a>>,
        default: Box<Expr<'a>>,
        span: Span,
    },
}

impl<'a> Pattern<'a> {
    pub fn span(&self) -> Span {
        match self {
            Pattern::Identifier { span, .. }
            | Pattern::Array { span, .. }
            | Pattern::Object { span, .. }
            | Pattern::Rest { span, .. }
            | Pattern::Assign { span, .. } => *span,
        }
    }

    /// Collect every identifier bound by this pattern
    pub fn bound_names(&self, out: &mut Vec<(&'a str, Span)>) {
        match self {
            Pattern::Identifier { name, span, .. } => out.push((*name, *span)),
            Pattern::Array { elements, .. } => {
                for element in elements.iter().flatten() {
                    element.bound_names(out);
                }
            }
            Pattern::Object { properties, .. } => {
                for prop in properties {
                    match prop {
                        ObjectPatternProp::KeyValue { value, .. } => value.bound_names(out),
                        ObjectPatternProp::Shorthand { name, span, .. } => out.push((*name, *span)),
                        ObjectPatternProp::Rest { argument, .. } => argument.bound_names(out),
                    }
                }
            }
            Pattern::Rest { argument, .. } => argument.bound_names(out),
            Pattern::Assign { target, .. } => target.bound_names(out),
        }
    }

    pub fn type_ann(&self) -> Option<&TypeAnn<'a>> {
        match self {
            Pattern::Identifier { type_ann, .. }
            | Pattern::Array { type_ann, .. }
            | Pattern::Object { type_ann, .. } => type_ann.as_ref(),
            Pattern::Rest { argument, .. } => argument.type_ann(),
            Pattern::Assign { target, .. } => target.type_ann(),
        }
    }
}

/// A property inside an object destructuring pattern
#[derive(Debug, Clone)]
pub enum ObjectPatternProp<'a> {
    KeyValue {
        key: &'a str,
        value: Box<Pattern<'a>>,
        span: Span,
    },
    Shorthand {
        name: &'a str,
        default: Option<Box<Expr<'a>>>,
        span: Span,
    },
    Rest {
        argument: Box<Pattern<'a>>,
        span: Span,
    },
}

impl<'a> ObjectPatternProp<'a> {
    pub fn span(&self) -> Span {
        match self {
            ObjectPatternProp::KeyValue { span, .. }
            | ObjectPatternProp::Shorthand { span, .. }
            | ObjectPatternProp::Rest { span, .. } => *span,
        }
    }
}

/// A function parameter
#[derive(Debug, Clone)]
pub struct Param<'a> {
    pub pattern: Pattern<'a>,
    pub accessibility: Option<Accessibility>,
    pub span: Span,
}

/// A generic type parameter: `T` / `T extends U`
#[derive(Debug, Clone)]
pub struct TypeParam<'a> {
    pub name: &'a str,
    pub constraint: Option<TypeAnn<'a>>,
    pub default: Option<TypeAnn<'a>>,
    pub span: Span,
}

/// `public` / `private` / `protected`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessibility {
    Public,
    Private,
    Protected,
}

/// A property key in a class or object literal
#[derive(Debug, Clone)]
pub enum PropertyKey<'a> {
    Identifier { name: &'a str, span: Span },
    /// `#name`; the span covers the `#`
    Private { name: &'a str, span: Span },
    String { raw: &'a str, span: Span },
    Number { raw: &'a str, span: Span },
    Computed { expr: Box<Expr<'a>>, span: Span },
}

impl<'a> PropertyKey<'a> {
    pub fn span(&self) -> Span {
        match self {
            PropertyKey::Identifier { span, .. }
            | PropertyKey::Private { span, .. }
            | PropertyKey::String { span, .. }
            | PropertyKey::Number { span, .. }
            | PropertyKey::Computed { span, .. } => *span,
        }
    }

    pub fn name(&self) -> Option<&'a str> {
        match self {
            PropertyKey::Identifier { name, .. } | PropertyKey::Private { name, .. } => Some(*name),
            _ => None,
        }
    }
}

/// `get` / `set` / plain method / constructor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Method,
    Get,
    Set,
    Constructor,
}

/// A member of a class body
#[derive(Debug, Clone)]
pub enum ClassMember<'a> {
    Method {
        key: PropertyKey<'a>,
        kind: MethodKind,
        params: Vec<Param<'a>>,
        return_type: Option<TypeAnn<'a>>,
        body: Option<Block<'a>>,
        is_static: bool,
        accessibility: Option<Accessibility>,
        span: Span,
    },
    Property {
        key: PropertyKey<'a>,
        value: Option<Expr<'a>>,
        type_ann: Option<TypeAnn<'a>>,
        is_static: bool,
        readonly: bool,
        accessibility: Option<Accessibility>,
        span: Span,
    },
}

impl<'a> ClassMember<'a> {
    pub fn span(&self) -> Span {
        match self {
            ClassMember::Method { span, .. } | ClassMember::Property { span, .. } => *span,
        }
    }

    pub fn key(&self) -> &PropertyKey<'a> {
        match self {
            ClassMember::Method { key, .. } | ClassMember::Property { key, .. } => key,
        }
    }
}

/// A member of an interface or object type literal
#[derive(Debug, Clone)]
pub struct TypeMember<'a> {
    pub name: &'a str,
    pub ty: Option<TypeAnn<'a>>,
    pub is_method: bool,
    pub span: Span,
}

/// `enum E { A, B = 2 }`
#[derive(Debug, Clone)]
pub struct EnumMember<'a> {
    pub name: &'a str,
    pub value: Option<Expr<'a>>,
    pub span: Span,
}

/// The name of a `namespace` / `module` declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleName<'a> {
    Identifier(&'a str),
    StringLiteral(&'a str),
    Global,
}

/// One clause of a switch statement
#[derive(Debug, Clone)]
pub struct SwitchCase<'a> {
    pub test: Option<Expr<'a>>,
    pub body: Vec<Stmt<'a>>,
    pub span: Span,
}

/// An import clause entry
#[derive(Debug, Clone)]
pub enum ImportSpecifier<'a> {
    /// `import Default from ...`
    Default { local: &'a str, span: Span },
    /// `import * as ns from ...`
    Namespace { local: &'a str, span: Span },
    /// `import { imported as local } from ...`
    Named {
        imported: &'a str,
        local: &'a str,
        span: Span,
    },
}

impl<'a> ImportSpecifier<'a> {
    pub fn local(&self) -> &'a str {
        match self {
            ImportSpecifier::Default { local, .. }
            | ImportSpecifier::Namespace { local, .. }
            | ImportSpecifier::Named { local, .. } => *local,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            ImportSpecifier::Default { span, .. }
            | ImportSpecifier::Namespace { span, .. }
            | ImportSpecifier::Named { span, .. } => *span,
        }
    }
}

/// `export { local as exported }`
#[derive(Debug, Clone)]
pub struct ExportSpecifier<'a> {
    pub local: &'a str,
    pub exported: &'a str,
    pub span: Span,
}

/// A literal value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal<'a> {
    Number(f64),
    /// Raw text including quotes
    String(&'a str),
    Boolean(bool),
    Null,
    /// Raw `/pattern/flags` text
    Regex(&'a str),
    /// Raw backtick-delimited text
    Template(&'a str),
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
    Pos,
    BitNot,
    Typeof,
    Void,
    Delete,
}

/// `++` / `--`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOp {
    Increment,
    Decrement,
}

/// Binary (non-logical) operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Exp,
    Equal,
    StrictEqual,
    NotEqual,
    StrictNotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    BitAnd,
    BitOr,
    BitXor,
    ShiftLeft,
    ShiftRight,
    UnsignedShiftRight,
    In,
    InstanceOf,
}

impl BinaryOp {
    /// Source text of the operator token
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Exp => "**",
            BinaryOp::Equal => "==",
            BinaryOp::StrictEqual => "===",
            BinaryOp::NotEqual => "!=",
            BinaryOp::StrictNotEqual => "!==",
            BinaryOp::Less => "<",
            BinaryOp::Greater => ">",
            BinaryOp::LessEqual => "<=",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::ShiftLeft => "<<",
            BinaryOp::ShiftRight => ">>",
            BinaryOp::UnsignedShiftRight => ">>>",
            BinaryOp::In => "in",
            BinaryOp::InstanceOf => "instanceof",
        }
    }
}

/// `&&` / `||` / `??`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
    NullishCoalescing,
}

/// Assignment operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Exp,
    And,
    Or,
    NullishCoalescing,
    BitAnd,
    BitOr,
    BitXor,
    ShiftLeft,
    ShiftRight,
    UnsignedShiftRight,
}

/// Body of an arrow function
#[derive(Debug, Clone)]
pub enum ArrowBody<'a> {
    Block(Block<'a>),
    Expr(Box<Expr<'a>>),
}

/// An expression
#[derive(Debug, Clone)]
pub enum Expr<'a> {
    Identifier {
        name: &'a str,
        span: Span,
    },
    /// `#field in obj` style references never appear; private names only
    /// occur as member properties, handled by `Member`.
    Literal {
        value: Literal<'a>,
        span: Span,
    },
    This {
        span: Span,
    },
    Array {
        elements: Vec<Expr<'a>>,
        span: Span,
    },
    Object {
        properties: Vec<ObjectProperty<'a>>,
        span: Span,
    },
    /// `...argument` in call arguments or array literals
    Spread {
        argument: Box<Expr<'a>>,
        span: Span,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr<'a>>,
        span: Span,
    },
    Update {
        op: UpdateOp,
        prefix: bool,
        operand: Box<Expr<'a>>,
        span: Span,
    },
    Binary {
        left: Box<Expr<'a>>,
        op: BinaryOp,
        right: Box<Expr<'a>>,
        span: Span,
    },
    Logical {
        left: Box<Expr<'a>>,
        op: LogicalOp,
        right: Box<Expr<'a>>,
        span: Span,
    },
    Ternary {
        condition: Box<Expr<'a>>,
        then_expr: Box<Expr<'a>>,
        else_expr: Box<Expr<'a>>,
        span: Span,
    },
    Assignment {
        target: Box<Expr<'a>>,
        op: AssignOp,
        value: Box<Expr<'a>>,
        span: Span,
    },
    Call {
        callee: Box<Expr<'a>>,
        args: Vec<Expr<'a>>,
        optional: bool,
        span: Span,
    },
    New {
        callee: Box<Expr<'a>>,
        type_args: Vec<TypeAnn<'a>>,
        args: Vec<Expr<'a>>,
        span: Span,
    },
    /// Dot member access: `obj.prop` (incl. `obj.#prop`)
    Member {
        object: Box<Expr<'a>>,
        property: &'a str,
        property_span: Span,
        optional: bool,
        span: Span,
    },
    /// Computed member access: `obj[index]`
    Index {
        object: Box<Expr<'a>>,
        index: Box<Expr<'a>>,
        span: Span,
    },
    /// `(expr)` — kept explicit so fixes can respect user parentheses
    Grouping {
        expr: Box<Expr<'a>>,
        span: Span,
    },
    /// `expr as T` / `expr satisfies T`
    As {
        expr: Box<Expr<'a>>,
        ty: TypeAnn<'a>,
        span: Span,
    },
    /// `expr!`
    NonNull {
        expr: Box<Expr<'a>>,
        span: Span,
    },
    ArrowFunction {
        type_params: Vec<TypeParam<'a>>,
        params: Vec<Param<'a>>,
        return_type: Option<TypeAnn<'a>>,
        body: ArrowBody<'a>,
        span: Span,
    },
    FunctionExpr {
        name: Option<&'a str>,
        name_span: Option<Span>,
        type_params: Vec<TypeParam<'a>>,
        params: Vec<Param<'a>>,
        return_type: Option<TypeAnn<'a>>,
        body: Block<'a>,
        span: Span,
    },
    ClassExpr {
        name: Option<&'a str>,
        name_span: Option<Span>,
        members: Vec<ClassMember<'a>>,
        span: Span,
    },
}

impl<'a> Expr<'a> {
    pub fn span(&self) -> Span {
        match self {
            Expr::Identifier { span, .. }
            | Expr::Literal { span, .. }
            | Expr::This { span }
            | Expr::Array { span, .. }
            | Expr::Object { span, .. }
            | Expr::Spread { span, .. }
            | Expr::Unary { span, .. }
            | Expr::Update { span, .. }
            | Expr::Binary { span, .. }
            | Expr::Logical { span, .. }
            | Expr::Ternary { span, .. }
            | Expr::Assignment { span, .. }
            | Expr::Call { span, .. }
            | Expr::New { span, .. }
            | Expr::Member { span, .. }
            | Expr::Index { span, .. }
            | Expr::Grouping { span, .. }
            | Expr::As { span, .. }
            | Expr::NonNull { span, .. }
            | Expr::ArrowFunction { span, .. }
            | Expr::FunctionExpr { span, .. }
            | Expr::ClassExpr { span, .. } => *span,
        }
    }

    /// Strip grouping parentheses
    pub fn unwrap_grouping(&self) -> &Expr<'a> {
        let mut current = self;
        while let Expr::Grouping { expr, .. } = current {
            current = expr;
        }
        current
    }
}

/// A property inside an object literal expression
#[derive(Debug, Clone)]
pub enum ObjectProperty<'a> {
    KeyValue {
        key: PropertyKey<'a>,
        value: Expr<'a>,
        span: Span,
    },
    Shorthand {
        name: &'a str,
        span: Span,
    },
    Method {
        key: PropertyKey<'a>,
        kind: MethodKind,
        params: Vec<Param<'a>>,
        body: Option<Block<'a>>,
        span: Span,
    },
    Spread {
        argument: Expr<'a>,
        span: Span,
    },
}

impl<'a> ObjectProperty<'a> {
    pub fn span(&self) -> Span {
        match self {
            ObjectProperty::KeyValue { span, .. }
            | ObjectProperty::Shorthand { span, .. }
            | ObjectProperty::Method { span, .. }
            | ObjectProperty::Spread { span, .. } => *span,
        }
    }
}

/// A type annotation
#[derive(Debug, Clone)]
pub enum TypeAnn<'a> {
    Any { span: Span },
    Unknown { span: Span },
    Never { span: Span },
    Void { span: Span },
    Null { span: Span },
    Undefined { span: Span },
    String { span: Span },
    Number { span: Span },
    Boolean { span: Span },
    /// `Name<Args>` — `name` is the full (possibly dotted) reference text
    Reference {
        name: &'a str,
        name_span: Span,
        type_args: Vec<TypeAnn<'a>>,
        span: Span,
    },
    /// `T[]`
    Array {
        element: Box<TypeAnn<'a>>,
        span: Span,
    },
    /// `[A, B, C]`
    Tuple {
        elements: Vec<TypeAnn<'a>>,
        span: Span,
    },
    Union {
        constituents: Vec<TypeAnn<'a>>,
        span: Span,
    },
    Intersection {
        constituents: Vec<TypeAnn<'a>>,
        span: Span,
    },
    /// `"lit"` / `0` / `true`
    Literal {
        value: Literal<'a>,
        span: Span,
    },
    /// `(a: A) => R` — parameters are not modeled
    Function {
        return_type: Option<Box<TypeAnn<'a>>>,
        span: Span,
    },
    /// `{ a: A; b(): B }`
    ObjectLiteral {
        members: Vec<TypeMember<'a>>,
        span: Span,
    },
    /// `keyof T`
    Keyof {
        ty: Box<TypeAnn<'a>>,
        span: Span,
    },
    /// `typeof name` in type position
    TypeofQuery {
        name: &'a str,
        span: Span,
    },
    /// `(T)`
    Parenthesized {
        ty: Box<TypeAnn<'a>>,
        span: Span,
    },
}

impl<'a> TypeAnn<'a> {
    pub fn span(&self) -> Span {
        match self {
            TypeAnn::Any { span }
            | TypeAnn::Unknown { span }
            | TypeAnn::Never { span }
            | TypeAnn::Void { span }
            | TypeAnn::Null { span }
            | TypeAnn::Undefined { span }
            | TypeAnn::String { span }
            | TypeAnn::Number { span }
            | TypeAnn::Boolean { span }
            | TypeAnn::Reference { span, .. }
            | TypeAnn::Array { span, .. }
            | TypeAnn::Tuple { span, .. }
            | TypeAnn::Union { span, .. }
            | TypeAnn::Intersection { span, .. }
            | TypeAnn::Literal { span, .. }
            | TypeAnn::Function { span, .. }
            | TypeAnn::ObjectLiteral { span, .. }
            | TypeAnn::Keyof { span, .. }
            | TypeAnn::TypeofQuery { span, .. }
            | TypeAnn::Parenthesized { span, .. } => *span,
        }
    }
}
