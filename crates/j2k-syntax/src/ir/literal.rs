//! Kotlin literal spelling.

use super::{Expr, Literal};

impl Expr {
    pub fn null() -> Self {
        Expr::Literal(Literal {
            text: "null".into(),
            may_be_absent: true,
        })
    }

    pub fn bool(value: bool) -> Self {
        Expr::literal(if value { "true" } else { "false" })
    }

    /// A Kotlin `Int`. Wider values go through [`Expr::long`].
    pub fn int(value: i32) -> Self {
        Expr::literal(value.to_string())
    }

    pub fn long(value: i64) -> Self {
        Expr::literal(format!("{value}L"))
    }

    pub fn float(value: f32) -> Self {
        if value.is_nan() {
            Expr::literal("Float.NaN")
        } else if value.is_infinite() {
            Expr::literal(if value > 0.0 {
                "Float.POSITIVE_INFINITY"
            } else {
                "Float.NEGATIVE_INFINITY"
            })
        } else {
            Expr::literal(format!("{value:?}f"))
        }
    }

    pub fn double(value: f64) -> Self {
        if value.is_nan() {
            Expr::literal("Double.NaN")
        } else if value.is_infinite() {
            Expr::literal(if value > 0.0 {
                "Double.POSITIVE_INFINITY"
            } else {
                "Double.NEGATIVE_INFINITY"
            })
        } else {
            // `{:?}` keeps the `.0` that distinguishes a Double from an Int.
            Expr::literal(format!("{value:?}"))
        }
    }

    pub fn char(value: char) -> Self {
        let mut text = String::from('\'');
        match value {
            '\'' => text.push_str("\\'"),
            '"' => text.push('"'),
            '$' => text.push('$'),
            other => escape_into(&mut text, other),
        }
        text.push('\'');
        Expr::literal(text)
    }

    pub fn string(value: &str) -> Self {
        let mut text = String::with_capacity(value.len() + 2);
        text.push('"');
        for c in value.chars() {
            match c {
                '"' => text.push_str("\\\""),
                '$' => text.push_str("\\$"),
                '\'' => text.push('\''),
                other => escape_into(&mut text, other),
            }
        }
        text.push('"');
        Expr::literal(text)
    }
}

/// Escapes shared by char and string literals.
fn escape_into(out: &mut String, c: char) {
    match c {
        '\\' => out.push_str("\\\\"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\u{8}' => out.push_str("\\b"),
        c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
        c => out.push(c),
    }
}
