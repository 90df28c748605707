//! Opt-in nullability cross-check for built calls.
//!
//! [`crate::build::build_not_null`] and [`crate::build::build_nullable`] trust
//! the caller. A wrong choice still renders valid Kotlin, just mistyped. The
//! resolver's tests can use [`check_call`] to compare a built call against the
//! declaration it was resolved to.

use crate::build::{CallParts, assemble};
use crate::ir::{Expr, MethodCall};

/// The parts of a resolved method declaration the check needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub name: String,
    /// Whether the declared return type is nullable in the target model.
    pub returns_nullable: bool,
}

impl MethodSignature {
    pub fn new(name: impl Into<String>, returns_nullable: bool) -> Self {
        Self {
            name: name.into(),
            returns_nullable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NullabilityMismatch {
    #[error("call target {found:?} does not invoke `{expected}`")]
    Name {
        expected: String,
        found: Option<String>,
    },

    #[error("call to `{name}` built as {built} but the declaration returns {declared}")]
    Flag {
        name: String,
        built: &'static str,
        declared: &'static str,
    },
}

fn describe(may_be_absent: bool) -> &'static str {
    if may_be_absent { "nullable" } else { "not-null" }
}

/// Check that `call` invokes `signature` and carries its nullability.
pub fn check_call(
    call: &MethodCall,
    signature: &MethodSignature,
) -> Result<(), NullabilityMismatch> {
    let found = call.method_name();
    if found != Some(signature.name.as_str()) {
        return Err(NullabilityMismatch::Name {
            expected: signature.name.clone(),
            found: found.map(str::to_string),
        });
    }
    if call.may_be_absent != signature.returns_nullable {
        return Err(NullabilityMismatch::Flag {
            name: signature.name.clone(),
            built: describe(call.may_be_absent),
            declared: describe(signature.returns_nullable),
        });
    }
    Ok(())
}

/// Build a call whose nullability is taken from its declaration.
pub fn build_for_signature(
    receiver: Option<Expr>,
    parts: CallParts,
    signature: &MethodSignature,
) -> MethodCall {
    assemble(receiver, &signature.name, parts, signature.returns_nullable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{build_not_null, build_nullable};

    #[test]
    fn test_matching_call_passes() {
        let sig = MethodSignature::new("find", true);
        let call = build_nullable(Some(Expr::ident("map")), "find", CallParts::default());
        assert_eq!(check_call(&call, &sig), Ok(()));
    }

    #[test]
    fn test_wrong_constructor_is_reported() {
        let sig = MethodSignature::new("find", true);
        let call = build_not_null(Some(Expr::ident("map")), "find", CallParts::default());
        let err = check_call(&call, &sig).unwrap_err();
        assert_eq!(
            err,
            NullabilityMismatch::Flag {
                name: "find".into(),
                built: "not-null",
                declared: "nullable",
            }
        );
        assert_eq!(
            err.to_string(),
            "call to `find` built as not-null but the declaration returns nullable"
        );
    }

    #[test]
    fn test_wrong_name_is_reported() {
        let sig = MethodSignature::new("size", false);
        let call = build_not_null(None, "length", CallParts::default());
        assert!(matches!(
            check_call(&call, &sig),
            Err(NullabilityMismatch::Name { found: Some(found), .. }) if found == "length"
        ));
    }

    #[test]
    fn test_build_for_signature_follows_declaration() {
        let sig = MethodSignature::new("get", true);
        let call = build_for_signature(Some(Expr::ident("list")), CallParts::default(), &sig);
        assert!(call.may_be_absent);
        assert_eq!(check_call(&call, &sig), Ok(()));
    }
}
