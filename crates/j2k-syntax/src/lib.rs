//! Kotlin expression IR and source rendering for Java-to-Kotlin conversion.
//!
//! `j2k-syntax` holds the expression half of a converter: an IR of Kotlin
//! expressions, the factory that assembles call expressions, and the writer
//! that turns a finished tree into Kotlin source text.
//!
//! # Architecture
//!
//! ```text
//! Resolver (upstream)       IR                     Output
//! ───────────────────    ─────────────────    ──────────────────
//! Java AST ─> build::* ─> Expr / Unit ─────> KotlinWriter ─> text
//!              (build.rs)  (ir/)       │      (output/kotlin.rs)
//!                                      └───> CommentConverter
//! ```
//!
//! # Example
//!
//! ```
//! use j2k_syntax::build::{CallParts, build_not_null, build_nullable};
//! use j2k_syntax::{Expr, Verbatim, render};
//!
//! let find = build_nullable(Some(Expr::ident("map")), "find", CallParts::default());
//! let length = build_not_null(Some(Expr::call(find)), "length", CallParts::default());
//! assert_eq!(render(&Expr::call(length), &Verbatim), "map.find()?.length()");
//! ```
//!
//! # Nullability
//!
//! Whether an expression may evaluate to `null` is decided by the caller when
//! the node is built and never re-derived. The writer reads the flag off a
//! receiver to pick `?.` over `.`; a node's own flag never changes its own
//! text.

pub mod build;
pub mod check;
pub mod comments;
pub mod ir;
pub mod output;
pub mod precedence;
pub mod pretty;

// Re-exports: IR types
pub use ir::{
    AssignOp, BinaryOp, Expr, Lambda, LambdaParameter, MethodCall, PostfixOp, PrefixOp,
    PrimitiveType, StructureEq, Type, Unit, Variance,
};

// Re-exports: construction
pub use build::{CallParts, array_of, build_not_null, build_nullable};

// Re-exports: comments
pub use comments::{CommentConverter, Comments, Discard, Verbatim};

pub use output::KotlinWriter;

/// Render one expression as Kotlin source.
pub fn render(expr: &Expr, comments: &dyn CommentConverter) -> String {
    KotlinWriter::emit(expr, comments)
}

/// Render every expression of a unit, one per line.
pub fn render_unit(unit: &Unit, comments: &dyn CommentConverter) -> String {
    KotlinWriter::emit_unit(unit, comments)
}

impl Expr {
    /// Render with comments kept verbatim.
    pub fn to_kotlin(&self) -> String {
        KotlinWriter::emit(self, &Verbatim)
    }
}
