//! Syntax tree node definitions for the mlc semantic analysis core.
//!
//! Lexing and concrete-syntax parsing are external collaborators (spec.md
//! §1) — this crate only defines the node families the parser is expected
//! to hand the analysis core (spec.md §6), it does not parse anything.
//!
//! Every node carries a [`NodeId`], a stable small integer assigned by the
//! producing parser. The analysis core never allocates its own node arena;
//! it keys its typed-node map and diagnostics off the ids the tree already
//! carries, matching the "stable node identity (arena + index)" guidance in
//! spec.md §9.

pub mod ids;
pub mod type_expr;
pub mod pattern;
pub mod expr;
pub mod stmt;

pub use ids::NodeId;
pub use type_expr::TypeExpr;
pub use pattern::{MatchArm, Pattern, StringPatternPart};
pub use expr::{Expr, ExprKind, Param, StringPart};
pub use stmt::{
    ConstantDeclaration, FunctionStatement, ImportItem, ImportStatement, InstanceDeclaration,
    PackageDeclaration, Program, Stmt, StmtKind, TraitDeclaration, TraitMethodSig, TypeDeclaration,
    TypeDeclarationKind, VariantDecl,
};
