//! Joining rendered fragments.

/// How a joined sequence is bracketed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brackets {
    None,
    /// Bracket non-empty sequences; an empty sequence renders as nothing.
    OmitWhenEmpty(&'static str, &'static str),
    /// Bracket even an empty sequence, e.g. an empty argument list `()`.
    Always(&'static str, &'static str),
}

/// Join already-rendered fragments with `separator`, wrapped per `brackets`.
pub fn join<I, S>(fragments: I, separator: &str, brackets: Brackets) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut body = String::new();
    let mut empty = true;
    for fragment in fragments {
        if !empty {
            body.push_str(separator);
        }
        body.push_str(fragment.as_ref());
        empty = false;
    }

    match brackets {
        Brackets::None => body,
        Brackets::OmitWhenEmpty(_, _) if empty => String::new(),
        Brackets::OmitWhenEmpty(open, close) | Brackets::Always(open, close) => {
            let mut out = String::with_capacity(open.len() + body.len() + close.len());
            out.push_str(open);
            out.push_str(&body);
            out.push_str(close);
            out
        }
    }
}
