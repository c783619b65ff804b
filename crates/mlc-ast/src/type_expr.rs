//! Type-level syntax — the surface form of types as written by the user
//! (annotations, ADT field types, trait/instance signatures). `BuildType`
//! in `mlc-sema` lowers these into `mlc_types::Ty`.

use crate::ids::NodeId;
use mlc_common::Span;

#[derive(Clone, Debug, PartialEq)]
pub struct TypeExpr {
    pub id: NodeId,
    pub span: Span,
    pub kind: TypeExprKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TypeExprKind {
    /// A bare name: a type variable (lowercase, e.g. `a`) or a nominal
    /// constructor with no arguments (e.g. `Int`, `Option`).
    Name(String),
    /// `Name<arg, ...>`.
    App(String, Vec<TypeExpr>),
    /// `(params) -> ret`, with the last `default_count` params optional and
    /// the last param variadic (`...`) if `variadic` is set.
    Func {
        params: Vec<TypeExpr>,
        ret: Box<TypeExpr>,
        variadic: bool,
        default_count: usize,
    },
    Tuple(Vec<TypeExpr>),
    Record {
        fields: Vec<(String, TypeExpr)>,
        is_open: bool,
    },
    Union(Vec<TypeExpr>),
}
