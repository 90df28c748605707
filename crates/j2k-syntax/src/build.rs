//! Call construction.
//!
//! Every call expression is assembled here, so the call target and the
//! nullability flag are decided in one place. The flag comes from the
//! caller: these functions do not look at the invoked declaration (see
//! [`crate::check`] for an opt-in cross-check).

use crate::ir::{Expr, Identifier, Lambda, MethodCall, Type};

/// Arguments of a call besides its receiver and name.
///
/// `CallParts::default()` is the explicit "no arguments, no type arguments,
/// no trailing lambda" value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CallParts {
    pub arguments: Vec<Expr>,
    pub type_arguments: Vec<Type>,
    pub trailing_lambda: Option<Lambda>,
}

impl CallParts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_arguments(arguments: Vec<Expr>) -> Self {
        Self {
            arguments,
            ..Self::default()
        }
    }

    pub fn arg(mut self, argument: Expr) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn type_arg(mut self, ty: Type) -> Self {
        self.type_arguments.push(ty);
        self
    }

    pub fn lambda(mut self, lambda: Lambda) -> Self {
        self.trailing_lambda = Some(lambda);
        self
    }
}

/// A call whose result is never `null`.
pub fn build_not_null(receiver: Option<Expr>, name: &str, parts: CallParts) -> MethodCall {
    assemble(receiver, name, parts, false)
}

/// A call whose result may be `null`.
pub fn build_nullable(receiver: Option<Expr>, name: &str, parts: CallParts) -> MethodCall {
    assemble(receiver, name, parts, true)
}

/// `receiver.name<T>(args) { lambda }`, or `name(...)` without a receiver.
pub(crate) fn assemble(
    receiver: Option<Expr>,
    name: &str,
    parts: CallParts,
    may_be_absent: bool,
) -> MethodCall {
    let identifier = Expr::Identifier(Identifier {
        name: name.to_string(),
        may_be_absent: false,
        quoting_needed: true,
    });
    let target = match receiver {
        Some(receiver) => Expr::qualified(receiver, identifier),
        None => identifier,
    };
    let CallParts {
        arguments,
        type_arguments,
        trailing_lambda,
    } = parts;
    MethodCall {
        target,
        arguments,
        type_arguments,
        may_be_absent,
        trailing_lambda,
    }
}

/// Kotlin array creation for a Java array initializer.
///
/// Non-null primitive elements use the specialized factory (`intArrayOf`);
/// other known element types pass it as a type argument (`arrayOf<String>`).
pub fn array_of(element: Option<Type>, items: Vec<Expr>) -> MethodCall {
    match element {
        Some(ty) => match ty.as_non_null_primitive() {
            Some(primitive) => build_not_null(
                None,
                &format!("{}ArrayOf", primitive.array_prefix()),
                CallParts::with_arguments(items),
            ),
            None => build_not_null(
                None,
                "arrayOf",
                CallParts::with_arguments(items).type_arg(ty),
            ),
        },
        None => build_not_null(None, "arrayOf", CallParts::with_arguments(items)),
    }
}
