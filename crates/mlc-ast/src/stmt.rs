//! Statement and top-level declaration syntax.

use crate::expr::{Expr, Param};
use crate::ids::NodeId;
use crate::type_expr::TypeExpr;
use mlc_common::Span;

#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub id: NodeId,
    pub span: Span,
    pub kind: StmtKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    Package(PackageDeclaration),
    Import(ImportStatement),
    TypeDecl(TypeDeclaration),
    TraitDecl(TraitDeclaration),
    InstanceDecl(InstanceDeclaration),
    Function(FunctionStatement),
    Constant(ConstantDeclaration),
    Expression(Expr),
}

#[derive(Clone, Debug, PartialEq)]
pub struct PackageDeclaration {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImportItem {
    pub name: String,
    pub alias: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImportStatement {
    pub path: String,
    pub alias: Option<String>,
    /// `import { a, b as c } from path` — `None` means import the whole
    /// module under `alias` (or its own name).
    pub selective: Option<Vec<ImportItem>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VariantDecl {
    pub name: String,
    pub fields: Vec<TypeExpr>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TypeDeclarationKind {
    /// `type Name<params> = underlying` (a structural alias).
    Alias(TypeExpr),
    /// `type Name<params> = V1 T | V2 | ...` (an ADT).
    Adt(Vec<VariantDecl>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypeDeclaration {
    pub name: String,
    pub type_params: Vec<String>,
    pub kind: TypeDeclarationKind,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TraitMethodSig {
    pub name: String,
    pub ty: TypeExpr,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TraitDeclaration {
    pub name: String,
    pub type_params: Vec<String>,
    pub super_traits: Vec<String>,
    pub methods: Vec<TraitMethodSig>,
    /// Operator symbols this trait is the dispatch target for (e.g. `+`),
    /// registered via `RegisterOperatorTrait`.
    pub operators: Vec<String>,
    pub default_methods: Vec<FunctionStatement>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InstanceDeclaration {
    pub trait_name: String,
    /// Extra type parameters scoped to this instance, for HKT instances
    /// that partially apply the trait's argument (spec.md §4.4).
    pub type_params: Vec<String>,
    pub target: TypeExpr,
    pub methods: Vec<FunctionStatement>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionStatement {
    pub name: String,
    pub type_params: Vec<String>,
    pub params: Vec<Param>,
    pub return_ty: Option<TypeExpr>,
    pub body: Expr,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConstantDeclaration {
    pub name: String,
    pub ty: Option<TypeExpr>,
    pub value: Expr,
}
