//! Structural equality for IR trees.
//!
//! `structure_eq` compares expression trees ignoring surface hints that do not
//! change what the expression means.
//!
//! # Hint fields (normalized during comparison)
//!
//! - `Expr::Commented` - comments are unwrapped
//! - `Expr::Parenthesized` - grouping is already encoded by tree shape
//! - `Identifier::quoting_needed` - backticks only affect spelling
//!
//! # Core fields (must match exactly)
//!
//! - All names, literal text, operators and types
//! - Every `may_be_absent` flag
//! - Argument, type argument and lambda parameter order

use super::{Expr, Lambda, MethodCall, Unit};

/// Trait for structural equality comparison.
///
/// Unlike `PartialEq`, this ignores surface hint fields.
pub trait StructureEq {
    fn structure_eq(&self, other: &Self) -> bool;
}

impl StructureEq for Unit {
    fn structure_eq(&self, other: &Self) -> bool {
        self.name == other.name && vec_structure_eq(&self.expressions, &other.expressions)
    }
}

impl StructureEq for Expr {
    fn structure_eq(&self, other: &Self) -> bool {
        let (a, b) = (strip_hints(self), strip_hints(other));
        match a {
            Expr::Identifier(x) => {
                let Expr::Identifier(y) = b else { return false };
                x.name == y.name && x.may_be_absent == y.may_be_absent
            }
            Expr::Literal(x) => matches!(b, Expr::Literal(y) if x == y),
            Expr::This(x) => matches!(b, Expr::This(y) if x == y),
            Expr::Super(x) => matches!(b, Expr::Super(y) if x == y),
            Expr::Qualified(x) => {
                let Expr::Qualified(y) = b else { return false };
                x.may_be_absent == y.may_be_absent
                    && x.receiver.structure_eq(&y.receiver)
                    && x.selector.structure_eq(&y.selector)
            }
            Expr::MethodCall(x) => matches!(b, Expr::MethodCall(y) if x.structure_eq(y)),
            Expr::Lambda(x) => matches!(b, Expr::Lambda(y) if x.structure_eq(y)),
            Expr::ArrayAccess(x) => {
                let Expr::ArrayAccess(y) = b else { return false };
                x.lvalue == y.lvalue
                    && x.may_be_absent == y.may_be_absent
                    && x.array.structure_eq(&y.array)
                    && x.index.structure_eq(&y.index)
            }
            Expr::Binary(x) => {
                let Expr::Binary(y) = b else { return false };
                x.op == y.op && x.left.structure_eq(&y.left) && x.right.structure_eq(&y.right)
            }
            Expr::Prefix(x) => {
                let Expr::Prefix(y) = b else { return false };
                x.op == y.op && x.operand.structure_eq(&y.operand)
            }
            Expr::Postfix(x) => {
                let Expr::Postfix(y) = b else { return false };
                x.op == y.op && x.operand.structure_eq(&y.operand)
            }
            Expr::NotNullAssertion(x) => {
                let Expr::NotNullAssertion(y) = b else { return false };
                x.operand.structure_eq(&y.operand)
            }
            Expr::TypeCast(x) => {
                let Expr::TypeCast(y) = b else { return false };
                x.ty == y.ty
                    && x.safe == y.safe
                    && x.may_be_absent == y.may_be_absent
                    && x.operand.structure_eq(&y.operand)
            }
            Expr::IsCheck(x) => {
                let Expr::IsCheck(y) = b else { return false };
                x.ty == y.ty && x.negated == y.negated && x.operand.structure_eq(&y.operand)
            }
            Expr::Assignment(x) => {
                let Expr::Assignment(y) = b else { return false };
                x.op == y.op && x.target.structure_eq(&y.target) && x.value.structure_eq(&y.value)
            }
            Expr::Elvis(x) => {
                let Expr::Elvis(y) = b else { return false };
                x.may_be_absent == y.may_be_absent
                    && x.left.structure_eq(&y.left)
                    && x.right.structure_eq(&y.right)
            }
            Expr::Range(x) => {
                let Expr::Range(y) = b else { return false };
                x.start.structure_eq(&y.start) && x.end.structure_eq(&y.end)
            }
            Expr::If(x) => {
                let Expr::If(y) = b else { return false };
                x.may_be_absent == y.may_be_absent
                    && x.condition.structure_eq(&y.condition)
                    && x.then_branch.structure_eq(&y.then_branch)
                    && x.else_branch.structure_eq(&y.else_branch)
            }
            Expr::ClassLiteral(x) => matches!(b, Expr::ClassLiteral(y) if x == y),
            Expr::Placeholder(x) => matches!(b, Expr::Placeholder(y) if x == y),
            // Peeled by strip_hints.
            Expr::Commented(_) | Expr::Parenthesized(_) => false,
        }
    }
}

impl StructureEq for MethodCall {
    fn structure_eq(&self, other: &Self) -> bool {
        self.may_be_absent == other.may_be_absent
            && self.type_arguments == other.type_arguments
            && self.target.structure_eq(&other.target)
            && vec_structure_eq(&self.arguments, &other.arguments)
            && match (&self.trailing_lambda, &other.trailing_lambda) {
                (None, None) => true,
                (Some(a), Some(b)) => a.structure_eq(b),
                _ => false,
            }
    }
}

impl StructureEq for Lambda {
    fn structure_eq(&self, other: &Self) -> bool {
        self.parameters == other.parameters && vec_structure_eq(&self.body, &other.body)
    }
}

/// Peel comment and parenthesis wrappers.
fn strip_hints(mut expr: &Expr) -> &Expr {
    loop {
        match expr {
            Expr::Commented(commented) => expr = &commented.expr,
            Expr::Parenthesized(paren) => expr = &paren.inner,
            _ => return expr,
        }
    }
}

fn vec_structure_eq<T: StructureEq>(a: &[T], b: &[T]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.structure_eq(y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comments::Comments;
    use crate::ir::BinaryOp;

    #[test]
    fn test_comments_are_ignored() {
        let plain = Expr::ident("x");
        let commented = Expr::commented(Comments::before("// note"), Expr::ident("x"));

        assert!(plain.structure_eq(&commented));
        assert_ne!(plain, commented); // Regular equality still differs
    }

    #[test]
    fn test_parentheses_are_ignored() {
        let sum = Expr::binary(Expr::ident("a"), BinaryOp::Add, Expr::ident("b"));
        let grouped = Expr::paren(sum.clone());

        assert!(sum.structure_eq(&grouped));
        assert_ne!(sum, grouped);
    }

    #[test]
    fn test_quoting_is_ignored() {
        let quoted = Expr::ident("is");
        let Expr::Identifier(mut bare) = Expr::ident("is") else {
            unreachable!()
        };
        bare.quoting_needed = false;

        assert!(quoted.structure_eq(&Expr::Identifier(bare)));
    }

    #[test]
    fn test_nullability_is_compared() {
        assert!(!Expr::ident("x").structure_eq(&Expr::nullable_ident("x")));
    }

    #[test]
    fn test_different_operators_not_equal() {
        let add = Expr::binary(Expr::ident("a"), BinaryOp::Add, Expr::ident("b"));
        let sub = Expr::binary(Expr::ident("a"), BinaryOp::Sub, Expr::ident("b"));

        assert!(!add.structure_eq(&sub));
    }

    #[test]
    fn test_unit_equality() {
        let u1 = Unit {
            name: "A.java".into(),
            expressions: vec![Expr::ident("x")],
        };
        let u2 = Unit {
            name: "A.java".into(),
            expressions: vec![Expr::paren(Expr::ident("x"))],
        };

        assert!(u1.structure_eq(&u2));
    }
}
