//! Expression syntax.

use crate::ids::NodeId;
use crate::pattern::{MatchArm, Pattern};
use crate::type_expr::TypeExpr;
use mlc_common::Span;

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub id: NodeId,
    pub span: Span,
    pub kind: ExprKind,
}

/// A function parameter. `ty` is absent for untyped parameters in a lambda
/// whose type is inferred from a contextual function type at the call site.
#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: Option<TypeExpr>,
    pub default: Option<Expr>,
    pub variadic: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StringPart {
    Text(String),
    Interpolated(Expr),
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Identifier(String),
    IntLiteral(i64),
    FloatLiteral(f64),
    BigIntLiteral(String),
    RationalLiteral { numerator: i64, denominator: i64 },
    BoolLiteral(bool),
    CharLiteral(char),
    StringLiteral(String),
    InterpolatedString(Vec<StringPart>),
    BytesLiteral(Vec<u8>),
    BitsLiteral(Vec<bool>),
    NilLiteral,

    ListLiteral(Vec<Expr>),
    MapLiteral(Vec<(Expr, Expr)>),
    TupleLiteral(Vec<Expr>),
    RecordLiteral {
        fields: Vec<(String, Expr)>,
        /// `{ ...base, field: value }` — the spread base record, if any.
        spread_base: Option<Box<Expr>>,
    },

    If {
        condition: Box<Expr>,
        consequence: Box<Expr>,
        alternative: Option<Box<Expr>>,
    },
    /// `for x in iter { body }` when `binding` is `Some`, or
    /// `for cond { body }` (a while-loop) when `binding` is `None`.
    For {
        binding: Option<Pattern>,
        iterable_or_condition: Box<Expr>,
        body: Box<Expr>,
    },
    Match {
        scrutinee: Box<Expr>,
        arms: Vec<MatchArm>,
    },
    Block(Vec<crate::stmt::Stmt>),

    Break(Option<Box<Expr>>),
    Continue,

    Assign {
        target: Box<Expr>,
        value: Box<Expr>,
    },
    PatternAssign {
        pattern: Pattern,
        value: Box<Expr>,
    },
    Annotated {
        expr: Box<Expr>,
        ty: TypeExpr,
    },

    Prefix {
        op: String,
        expr: Box<Expr>,
    },
    Infix {
        op: String,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Postfix {
        op: String,
        expr: Box<Expr>,
    },

    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    TypeApplication {
        callee: Box<Expr>,
        type_args: Vec<TypeExpr>,
    },
    FunctionLiteral {
        type_params: Vec<String>,
        params: Vec<Param>,
        return_ty: Option<TypeExpr>,
        body: Box<Expr>,
    },
    Spread(Box<Expr>),
    Member {
        receiver: Box<Expr>,
        field: String,
        optional: bool,
    },
    Index {
        receiver: Box<Expr>,
        index: Box<Expr>,
    },
    /// `( + )` — an operator used as a first-class function value.
    OperatorAsFunction(String),
}
