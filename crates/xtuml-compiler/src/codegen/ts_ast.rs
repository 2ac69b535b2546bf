//! A small TypeScript syntax tree.
//!
//! Generators build these nodes; [`super::printer`] turns them into text.
//! Only the constructs the compiler emits are represented.

/// One generated source file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TsModule {
    /// Lines of the leading block comment.
    pub header: Vec<String>,
    pub imports: Vec<Import>,
    pub items: Vec<Item>,
}

/// `import { a, b } from './module';`
#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    pub names: Vec<String>,
    pub from: String,
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Interface(InterfaceDecl),
    Class(ClassDecl),
    /// `export { a, b } from './module';`
    ExportNamed { names: Vec<String>, from: String },
    /// `export * from './module';`
    ExportAll { from: String },
}

/// A type annotation.
#[derive(Debug, Clone, PartialEq)]
pub enum TsType {
    /// A named type such as `string` or `Date`.
    Named(String),
    /// A union of string literal types: `'A' | 'B'`.
    StringUnion(Vec<String>),
}

impl TsType {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn boolean() -> Self {
        Self::Named("boolean".to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceDecl {
    pub name: String,
    pub extends: Option<String>,
    pub properties: Vec<PropertySignature>,
}

/// `name?: type;` inside an interface.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySignature {
    pub name: String,
    pub optional: bool,
    pub typ: TsType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    /// JSDoc lines placed above the class.
    pub doc: Vec<String>,
    pub name: String,
    pub is_abstract: bool,
    pub extends: Option<String>,
    pub implements: Vec<String>,
    pub properties: Vec<ClassProperty>,
    pub constructor: Constructor,
    /// Methods compiled from a state machine; `None` when the class has none.
    pub state_methods: Option<Vec<MethodDecl>>,
}

/// `public name?: type = initializer;`
#[derive(Debug, Clone, PartialEq)]
pub struct ClassProperty {
    pub name: String,
    pub optional: bool,
    pub typ: TsType,
    pub initializer: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Constructor {
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub typ: TsType,
}

/// A public method.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: TsType,
    pub body: Vec<Stmt>,
}

/// A statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// if (condition) { then_branch }
    If {
        condition: Expr,
        then_branch: Vec<Stmt>,
    },

    /// target = value;
    Assign { target: Expr, value: Expr },

    /// Expression statement
    Expression(Expr),

    /// return value;
    Return(Expr),

    /// A line comment.
    Comment(String),

    /// A statement rendered commented out.
    Disabled(Box<Stmt>),
}

/// An expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Single-quoted string literal; the printer escapes it.
    StringLiteral(String),

    /// Literal emitted verbatim (numbers, `true`, `false`).
    Verbatim(String),

    /// Identifier reference
    Identifier(String),

    /// this.member
    Member(String),

    /// Template literal; the body may contain `${...}` placeholders.
    Template(String),

    /// Template literal with no placeholders; `${` in the body is escaped.
    TemplateText(String),

    /// Operands joined with `+`.
    Concat(Vec<Expr>),

    /// Function call: callee(args)
    Call {
        callee: String,
        arguments: Vec<Expr>,
    },

    /// Binary operation: left op right
    Binary {
        left: Box<Expr>,
        operator: BinaryOp,
        right: Box<Expr>,
    },
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinaryOp {
    StrictEq, // ===
}

impl Expr {
    pub fn string(s: impl Into<String>) -> Self {
        Self::StringLiteral(s.into())
    }

    pub fn member(name: impl Into<String>) -> Self {
        Self::Member(name.into())
    }

    pub fn boolean(value: bool) -> Self {
        Self::Verbatim(value.to_string())
    }

    pub fn strict_eq(left: Expr, right: Expr) -> Self {
        Self::Binary {
            left: Box::new(left),
            operator: BinaryOp::StrictEq,
            right: Box::new(right),
        }
    }
}
