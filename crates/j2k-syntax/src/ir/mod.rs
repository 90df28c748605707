//! Kotlin expression IR.
//!
//! The IR is a closed set of expression variants. Nodes are plain owned data:
//! once built they are never mutated, so a tree can be rendered any number of
//! times, from any number of threads.
//!
//! Every node answers [`Expr::may_be_absent`]. The flag is decided upstream
//! (from the resolved declaration) and stored at construction; the writer only
//! reads it off a *receiver* to choose between `.` and `?.`.

mod literal;
mod ops;
mod structure_eq;
mod types;

pub use ops::{AssignOp, BinaryOp, PostfixOp, PrefixOp};
pub use structure_eq::StructureEq;
pub use types::{PrimitiveType, Type, Variance};

use crate::comments::Comments;
use crate::precedence::Precedence;
use serde::{Deserialize, Serialize};
use types::is_false;

/// A Kotlin expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    Identifier(Identifier),
    Literal(Literal),
    This(Label),
    Super(Label),
    Qualified(Box<Qualified>),
    MethodCall(Box<MethodCall>),
    Lambda(Box<Lambda>),
    ArrayAccess(Box<ArrayAccess>),
    Binary(Box<Binary>),
    Prefix(Box<Prefix>),
    Postfix(Box<Postfix>),
    NotNullAssertion(Box<NotNullAssertion>),
    TypeCast(Box<TypeCast>),
    IsCheck(Box<IsCheck>),
    Assignment(Box<Assignment>),
    Elvis(Box<Elvis>),
    Range(Box<Range>),
    If(Box<IfExpr>),
    Parenthesized(Box<Parenthesized>),
    ClassLiteral(ClassLiteral),
    Placeholder(Placeholder),
    Commented(Box<Commented>),
}

/// A bare name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub may_be_absent: bool,
    /// Wrap Kotlin-only keywords (`is`, `in`, `fun`, ...) in backticks.
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub quoting_needed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Literal {
    /// Kotlin source text, already escaped.
    pub text: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub may_be_absent: bool,
}

/// Label of `this@Outer` / `super@Outer`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Label {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// `receiver.selector`, or `receiver?.selector` when the receiver may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Qualified {
    pub receiver: Expr,
    pub selector: Expr,
    #[serde(default, skip_serializing_if = "is_false")]
    pub may_be_absent: bool,
}

/// A call: `target<type_arguments>(arguments) trailing_lambda`.
///
/// Build these through [`crate::build`] so the target and the nullability
/// flag are assembled in one place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub target: Expr,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<Expr>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_arguments: Vec<Type>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub may_be_absent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailing_lambda: Option<Lambda>,
}

impl MethodCall {
    /// Name of the invoked method when the target is an identifier or a
    /// member access ending in one.
    pub fn method_name(&self) -> Option<&str> {
        let mut target = &self.target;
        loop {
            match target {
                Expr::Identifier(ident) => return Some(&ident.name),
                Expr::Qualified(qualified) => target = &qualified.selector,
                Expr::Commented(commented) => target = &commented.expr,
                _ => return None,
            }
        }
    }
}

/// `{ a, b -> body }`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Lambda {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<LambdaParameter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub body: Vec<Expr>,
}

impl Lambda {
    pub fn new(parameters: Vec<LambdaParameter>, body: Vec<Expr>) -> Self {
        Self { parameters, body }
    }

    /// A parameterless lambda with a single-expression body.
    pub fn of(body: Expr) -> Self {
        Self {
            parameters: Vec::new(),
            body: vec![body],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LambdaParameter {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<Type>,
}

impl LambdaParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
        }
    }

    pub fn typed(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty),
        }
    }
}

/// `array[index]`. A read through an array that may be absent is asserted
/// with `!!`; Kotlin has no safe indexing operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayAccess {
    pub array: Expr,
    pub index: Expr,
    /// The access is an assignment target.
    #[serde(default, skip_serializing_if = "is_false")]
    pub lvalue: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub may_be_absent: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binary {
    pub left: Expr,
    pub op: BinaryOp,
    pub right: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prefix {
    pub op: PrefixOp,
    pub operand: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Postfix {
    pub operand: Expr,
    pub op: PostfixOp,
}

/// `operand!!`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotNullAssertion {
    pub operand: Expr,
}

/// `operand as ty` / `operand as? ty`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeCast {
    pub operand: Expr,
    pub ty: Type,
    #[serde(default, skip_serializing_if = "is_false")]
    pub safe: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub may_be_absent: bool,
}

/// `operand is ty` / `operand !is ty`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsCheck {
    pub operand: Expr,
    pub ty: Type,
    #[serde(default, skip_serializing_if = "is_false")]
    pub negated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub target: Expr,
    #[serde(default)]
    pub op: AssignOp,
    pub value: Expr,
}

/// `left ?: right`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Elvis {
    pub left: Expr,
    pub right: Expr,
    #[serde(default, skip_serializing_if = "is_false")]
    pub may_be_absent: bool,
}

/// `start..end`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub start: Expr,
    pub end: Expr,
}

/// `if (condition) then_branch else else_branch`, converted from `?:`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfExpr {
    pub condition: Expr,
    pub then_branch: Expr,
    pub else_branch: Expr,
    #[serde(default, skip_serializing_if = "is_false")]
    pub may_be_absent: bool,
}

/// Parentheses kept from the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parenthesized {
    pub inner: Expr,
    #[serde(default, skip_serializing_if = "is_false")]
    pub may_be_absent: bool,
}

/// `Foo::class.java` (from Java's `Foo.class`) or `Foo::class`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassLiteral {
    pub ty: Type,
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub java: bool,
}

/// Verbatim text standing in for a construct with no faithful Kotlin form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placeholder {
    pub text: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub may_be_absent: bool,
}

/// An expression carrying Java comments that must survive conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commented {
    pub comments: Comments,
    pub expr: Expr,
}

/// One translated program unit: the top-level expressions of a file or
/// declaration, rendered together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub name: String,
    #[serde(default)]
    pub expressions: Vec<Expr>,
}

fn default_true() -> bool {
    true
}

fn is_true(value: &bool) -> bool {
    *value
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Identifier(Identifier {
            name: name.into(),
            may_be_absent: false,
            quoting_needed: true,
        })
    }

    /// An identifier whose value may be absent (a nullable local or field).
    pub fn nullable_ident(name: impl Into<String>) -> Self {
        Expr::Identifier(Identifier {
            name: name.into(),
            may_be_absent: true,
            quoting_needed: true,
        })
    }

    /// Raw literal text, never absent.
    pub fn literal(text: impl Into<String>) -> Self {
        Expr::Literal(Literal {
            text: text.into(),
            may_be_absent: false,
        })
    }

    pub fn this() -> Self {
        Expr::This(Label::default())
    }

    pub fn this_at(label: impl Into<String>) -> Self {
        Expr::This(Label {
            label: Some(label.into()),
        })
    }

    pub fn super_() -> Self {
        Expr::Super(Label::default())
    }

    pub fn super_at(label: impl Into<String>) -> Self {
        Expr::Super(Label {
            label: Some(label.into()),
        })
    }

    /// A member access. The result may be absent when either the receiver
    /// (a safe call short-circuits) or the selected member may be absent.
    pub fn qualified(receiver: Expr, selector: Expr) -> Self {
        let may_be_absent = receiver.may_be_absent() || selector.may_be_absent();
        Expr::Qualified(Box::new(Qualified {
            receiver,
            selector,
            may_be_absent,
        }))
    }

    pub fn call(call: MethodCall) -> Self {
        Expr::MethodCall(Box::new(call))
    }

    pub fn lambda(lambda: Lambda) -> Self {
        Expr::Lambda(Box::new(lambda))
    }

    pub fn index(array: Expr, index: Expr) -> Self {
        Expr::ArrayAccess(Box::new(ArrayAccess {
            array,
            index,
            lvalue: false,
            may_be_absent: false,
        }))
    }

    /// An indexed assignment target, `array[index] = ...`.
    pub fn index_target(array: Expr, index: Expr) -> Self {
        Expr::ArrayAccess(Box::new(ArrayAccess {
            array,
            index,
            lvalue: true,
            may_be_absent: false,
        }))
    }

    pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Self {
        Expr::Binary(Box::new(Binary { left, op, right }))
    }

    pub fn prefix(op: PrefixOp, operand: Expr) -> Self {
        Expr::Prefix(Box::new(Prefix { op, operand }))
    }

    pub fn postfix(operand: Expr, op: PostfixOp) -> Self {
        Expr::Postfix(Box::new(Postfix { operand, op }))
    }

    pub fn not_null(operand: Expr) -> Self {
        Expr::NotNullAssertion(Box::new(NotNullAssertion { operand }))
    }

    pub fn cast(operand: Expr, ty: Type) -> Self {
        let may_be_absent = ty.is_nullable();
        Expr::TypeCast(Box::new(TypeCast {
            operand,
            ty,
            safe: false,
            may_be_absent,
        }))
    }

    pub fn safe_cast(operand: Expr, ty: Type) -> Self {
        Expr::TypeCast(Box::new(TypeCast {
            operand,
            ty,
            safe: true,
            may_be_absent: true,
        }))
    }

    pub fn is_check(operand: Expr, ty: Type) -> Self {
        Expr::IsCheck(Box::new(IsCheck {
            operand,
            ty,
            negated: false,
        }))
    }

    pub fn not_is_check(operand: Expr, ty: Type) -> Self {
        Expr::IsCheck(Box::new(IsCheck {
            operand,
            ty,
            negated: true,
        }))
    }

    pub fn assign(target: Expr, value: Expr) -> Self {
        Expr::compound_assign(target, AssignOp::Assign, value)
    }

    pub fn compound_assign(target: Expr, op: AssignOp, value: Expr) -> Self {
        Expr::Assignment(Box::new(Assignment { target, op, value }))
    }

    pub fn elvis(left: Expr, right: Expr) -> Self {
        let may_be_absent = right.may_be_absent();
        Expr::Elvis(Box::new(Elvis {
            left,
            right,
            may_be_absent,
        }))
    }

    pub fn range(start: Expr, end: Expr) -> Self {
        Expr::Range(Box::new(Range { start, end }))
    }

    pub fn if_expr(condition: Expr, then_branch: Expr, else_branch: Expr) -> Self {
        let may_be_absent = then_branch.may_be_absent() || else_branch.may_be_absent();
        Expr::If(Box::new(IfExpr {
            condition,
            then_branch,
            else_branch,
            may_be_absent,
        }))
    }

    pub fn paren(inner: Expr) -> Self {
        let may_be_absent = inner.may_be_absent();
        Expr::Parenthesized(Box::new(Parenthesized {
            inner,
            may_be_absent,
        }))
    }

    /// `Foo::class.java`
    pub fn class_literal(ty: Type) -> Self {
        Expr::ClassLiteral(ClassLiteral { ty, java: true })
    }

    /// `Foo::class`
    pub fn kclass_literal(ty: Type) -> Self {
        Expr::ClassLiteral(ClassLiteral { ty, java: false })
    }

    pub fn placeholder(text: impl Into<String>) -> Self {
        Expr::Placeholder(Placeholder {
            text: text.into(),
            may_be_absent: false,
        })
    }

    pub fn commented(comments: Comments, expr: Expr) -> Self {
        Expr::Commented(Box::new(Commented { comments, expr }))
    }

    /// Whether evaluating this expression can yield `null`.
    pub fn may_be_absent(&self) -> bool {
        match self {
            Expr::Identifier(ident) => ident.may_be_absent,
            Expr::Literal(lit) => lit.may_be_absent,
            Expr::Qualified(qualified) => qualified.may_be_absent,
            Expr::MethodCall(call) => call.may_be_absent,
            Expr::ArrayAccess(access) => access.may_be_absent,
            Expr::TypeCast(cast) => cast.may_be_absent,
            Expr::Elvis(elvis) => elvis.may_be_absent,
            Expr::If(if_expr) => if_expr.may_be_absent,
            Expr::Parenthesized(paren) => paren.may_be_absent,
            Expr::Placeholder(placeholder) => placeholder.may_be_absent,
            Expr::Commented(commented) => commented.expr.may_be_absent(),
            Expr::This(_)
            | Expr::Super(_)
            | Expr::Lambda(_)
            | Expr::Binary(_)
            | Expr::Prefix(_)
            | Expr::Postfix(_)
            | Expr::NotNullAssertion(_)
            | Expr::IsCheck(_)
            | Expr::Assignment(_)
            | Expr::Range(_)
            | Expr::ClassLiteral(_) => false,
        }
    }

    /// Syntactic precedence of the rendered expression.
    pub fn precedence(&self) -> Precedence {
        match self {
            Expr::Identifier(_)
            | Expr::This(_)
            | Expr::Super(_)
            | Expr::Lambda(_)
            | Expr::Parenthesized(_)
            | Expr::Placeholder(_) => Precedence::Atom,
            Expr::Literal(lit) => {
                if lit.text.starts_with('-') {
                    Precedence::Prefix
                } else {
                    Precedence::Atom
                }
            }
            Expr::Qualified(_)
            | Expr::MethodCall(_)
            | Expr::ArrayAccess(_)
            | Expr::Postfix(_)
            | Expr::NotNullAssertion(_)
            | Expr::ClassLiteral(_) => Precedence::Postfix,
            Expr::Prefix(_) => Precedence::Prefix,
            Expr::TypeCast(_) => Precedence::TypeRhs,
            Expr::Binary(binary) => binary.op.precedence(),
            Expr::IsCheck(_) => Precedence::NamedCheck,
            Expr::Elvis(_) => Precedence::Elvis,
            Expr::Range(_) => Precedence::Range,
            Expr::Assignment(_) | Expr::If(_) => Precedence::Assignment,
            Expr::Commented(commented) => commented.expr.precedence(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_set_at_construction() {
        assert!(!Expr::ident("x").may_be_absent());
        assert!(Expr::nullable_ident("x").may_be_absent());
        assert!(Expr::qualified(Expr::nullable_ident("a"), Expr::ident("b")).may_be_absent());
        assert!(!Expr::qualified(Expr::ident("a"), Expr::ident("b")).may_be_absent());
        assert!(Expr::cast(Expr::ident("x"), Type::class("T").nullable()).may_be_absent());
        assert!(!Expr::cast(Expr::ident("x"), Type::class("T")).may_be_absent());
        assert!(Expr::safe_cast(Expr::ident("x"), Type::class("T")).may_be_absent());
        assert!(!Expr::elvis(Expr::nullable_ident("a"), Expr::ident("b")).may_be_absent());
        assert!(Expr::paren(Expr::null()).may_be_absent());
        assert!(!Expr::not_null(Expr::nullable_ident("a")).may_be_absent());
    }

    #[test]
    fn test_commented_is_transparent() {
        let inner = Expr::nullable_ident("x");
        let commented = Expr::commented(Comments::before("// c"), inner);
        assert!(commented.may_be_absent());
        assert_eq!(commented.precedence(), Precedence::Atom);
    }

    #[test]
    fn test_negative_literal_is_prefix() {
        assert_eq!(Expr::int(-1).precedence(), Precedence::Prefix);
        assert_eq!(Expr::int(1).precedence(), Precedence::Atom);
    }

    #[test]
    fn test_method_name() {
        let call = MethodCall {
            target: Expr::qualified(Expr::ident("a"), Expr::ident("run")),
            arguments: Vec::new(),
            type_arguments: Vec::new(),
            may_be_absent: false,
            trailing_lambda: None,
        };
        assert_eq!(call.method_name(), Some("run"));
    }

    #[test]
    fn test_expr_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Expr>();
        assert_send_sync::<Unit>();
    }
}
