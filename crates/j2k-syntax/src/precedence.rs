//! Kotlin operator precedence and the grouping rule for operands.
//!
//! Variants are declared loosest first, so `a < b` means `a` binds less
//! tightly than `b`.

/// Kotlin precedence levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    /// Assignments and `if` expressions: always grouped when used as an operand.
    Assignment,
    Disjunction,
    Conjunction,
    Equality,
    Comparison,
    /// `in`, `!in`, `is`, `!is`.
    NamedCheck,
    Elvis,
    /// `a shl b`, `a and b`, ...
    InfixFunction,
    Range,
    Additive,
    Multiplicative,
    /// `as`, `as?`.
    TypeRhs,
    Prefix,
    /// Member access, calls, indexing, `!!`, postfix `++`/`--`.
    Postfix,
    /// Identifiers, literals, parenthesized and bracketed forms.
    Atom,
}

/// Which side of the enclosing construct an operand sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Whether an operand needs grouping parentheses inside a parent of the given
/// precedence. Kotlin binary operators are left-associative, so a right
/// operand of equal precedence is grouped too.
pub fn needs_parens(parent: Precedence, operand: Precedence, side: Side) -> bool {
    match side {
        Side::Left => operand < parent,
        Side::Right => operand <= parent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(Precedence::Multiplicative > Precedence::Additive);
        assert!(Precedence::Postfix > Precedence::TypeRhs);
        assert!(Precedence::Atom > Precedence::Postfix);
        assert!(Precedence::Elvis > Precedence::NamedCheck);
        assert!(Precedence::Assignment < Precedence::Disjunction);
    }

    #[test]
    fn test_left_operand() {
        assert!(needs_parens(
            Precedence::Postfix,
            Precedence::TypeRhs,
            Side::Left
        ));
        assert!(!needs_parens(
            Precedence::Additive,
            Precedence::Additive,
            Side::Left
        ));
        assert!(!needs_parens(
            Precedence::Additive,
            Precedence::Multiplicative,
            Side::Left
        ));
    }

    #[test]
    fn test_right_operand() {
        assert!(needs_parens(
            Precedence::Additive,
            Precedence::Additive,
            Side::Right
        ));
        assert!(!needs_parens(
            Precedence::Additive,
            Precedence::Multiplicative,
            Side::Right
        ));
    }
}
