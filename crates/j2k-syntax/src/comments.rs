//! Comment conversion collaborator.
//!
//! The renderer does not know how to turn Java comment text into Kotlin
//! comment text; it asks a [`CommentConverter`] for every comment attached to
//! the tree. Converters are shared across rendering threads, so they must be
//! pure (or synchronize internally).

use serde::{Deserialize, Serialize};

/// Converts one raw Java comment (including its delimiters) into Kotlin
/// comment text. An empty result drops the comment.
pub trait CommentConverter: Send + Sync {
    fn convert(&self, raw: &str) -> String;
}

impl<F> CommentConverter for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn convert(&self, raw: &str) -> String {
        self(raw)
    }
}

/// Keeps comments as written. `//`, `/* */` and `/** */` are valid Kotlin.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl CommentConverter for Verbatim {
    fn convert(&self, raw: &str) -> String {
        raw.to_string()
    }
}

/// Drops every comment.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl CommentConverter for Discard {
    fn convert(&self, _raw: &str) -> String {
        String::new()
    }
}

/// Raw Java comments attached to an expression.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Comments {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub before: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub after: Vec<String>,
}

impl Comments {
    pub fn before(comment: impl Into<String>) -> Self {
        Self {
            before: vec![comment.into()],
            after: Vec::new(),
        }
    }

    pub fn after(comment: impl Into<String>) -> Self {
        Self {
            before: Vec::new(),
            after: vec![comment.into()],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }
}

/// Whether converted comment text runs to the end of the line.
pub(crate) fn is_line_comment(text: &str) -> bool {
    text.trim_start().starts_with("//")
}
