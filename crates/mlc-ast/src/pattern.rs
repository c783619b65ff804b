//! Pattern syntax, matched against a scrutinee in `MatchExpression` arms,
//! `for` bindings, and destructuring assignment.

use crate::expr::Expr;
use crate::ids::NodeId;
use crate::type_expr::TypeExpr;
use mlc_common::Span;

#[derive(Clone, Debug, PartialEq)]
pub struct Pattern {
    pub id: NodeId,
    pub span: Span,
    pub kind: PatternKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PatternKind {
    Wildcard,
    Identifier(String),
    /// `^x` — match only if the scrutinee unifies with the existing binding
    /// of `x`; does not introduce a new binding.
    Pin(String),
    /// `x: T` — narrows `x` to `T` (useful against a `Union` scrutinee).
    Type { name: String, ty: TypeExpr },
    Literal(LiteralPattern),
    /// An interpolated string pattern; `parts` alternate fixed text and a
    /// captured binding name.
    StringPattern { parts: Vec<StringPatternPart> },
    Constructor { name: String, args: Vec<Pattern> },
    List { elements: Vec<Pattern>, spread: Option<Box<Pattern>> },
    Tuple { elements: Vec<Pattern>, spread: Option<Box<Pattern>> },
    Record { fields: Vec<(String, Pattern)>, is_open: bool },
    /// A bare `...rest` spread pattern, meaningful only nested inside a
    /// `List`/`Tuple` pattern's `spread` slot.
    Spread(Box<Pattern>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum StringPatternPart {
    Text(String),
    Capture(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum LiteralPattern {
    Int(i64),
    Float(f64),
    Bool(bool),
    Char(char),
    Nil,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MatchArm {
    pub pattern: Pattern,
    pub guard: Option<Expr>,
    pub body: Expr,
}
