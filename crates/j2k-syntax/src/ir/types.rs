//! Kotlin type descriptors.

use serde::{Deserialize, Serialize};

/// A Kotlin type as it appears in type arguments, casts and `is` checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Type {
    /// A named class or type parameter, e.g. `List<String>?` or `T`.
    Class {
        name: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        arguments: Vec<Type>,
        #[serde(default, skip_serializing_if = "is_false")]
        nullable: bool,
    },
    Primitive {
        primitive: PrimitiveType,
        #[serde(default, skip_serializing_if = "is_false")]
        nullable: bool,
    },
    Array {
        element: Box<Type>,
        #[serde(default, skip_serializing_if = "is_false")]
        nullable: bool,
    },
    /// `*`
    Star,
    /// `in T` / `out T`, from Java's `? super T` / `? extends T`.
    Projection { variance: Variance, bound: Box<Type> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveType {
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "Boolean",
            PrimitiveType::Byte => "Byte",
            PrimitiveType::Short => "Short",
            PrimitiveType::Char => "Char",
            PrimitiveType::Int => "Int",
            PrimitiveType::Long => "Long",
            PrimitiveType::Float => "Float",
            PrimitiveType::Double => "Double",
        }
    }

    /// Prefix of the specialized array class and factory (`IntArray`, `intArrayOf`).
    pub fn array_prefix(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::Char => "char",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variance {
    In,
    Out,
}

impl Variance {
    pub fn as_str(self) -> &'static str {
        match self {
            Variance::In => "in",
            Variance::Out => "out",
        }
    }
}

impl Type {
    /// A non-null class type without arguments.
    pub fn class(name: impl Into<String>) -> Self {
        Type::Class {
            name: name.into(),
            arguments: Vec::new(),
            nullable: false,
        }
    }

    /// A non-null generic class type.
    pub fn generic(name: impl Into<String>, arguments: Vec<Type>) -> Self {
        Type::Class {
            name: name.into(),
            arguments,
            nullable: false,
        }
    }

    pub fn primitive(primitive: PrimitiveType) -> Self {
        Type::Primitive {
            primitive,
            nullable: false,
        }
    }

    pub fn array(element: Type) -> Self {
        Type::Array {
            element: Box::new(element),
            nullable: false,
        }
    }

    pub fn projection(variance: Variance, bound: Type) -> Self {
        Type::Projection {
            variance,
            bound: Box::new(bound),
        }
    }

    /// The same type with its `?` marker set. Stars and projections carry no
    /// marker of their own and are returned unchanged.
    pub fn nullable(self) -> Self {
        self.with_nullability(true)
    }

    /// The same type with its `?` marker cleared.
    pub fn not_null(self) -> Self {
        self.with_nullability(false)
    }

    fn with_nullability(self, value: bool) -> Self {
        match self {
            Type::Class {
                name, arguments, ..
            } => Type::Class {
                name,
                arguments,
                nullable: value,
            },
            Type::Primitive { primitive, .. } => Type::Primitive {
                primitive,
                nullable: value,
            },
            Type::Array { element, .. } => Type::Array {
                element,
                nullable: value,
            },
            other @ (Type::Star | Type::Projection { .. }) => other,
        }
    }

    pub fn is_nullable(&self) -> bool {
        match self {
            Type::Class { nullable, .. }
            | Type::Primitive { nullable, .. }
            | Type::Array { nullable, .. } => *nullable,
            Type::Star | Type::Projection { .. } => false,
        }
    }

    /// The primitive kind, if this is a non-null primitive.
    pub fn as_non_null_primitive(&self) -> Option<PrimitiveType> {
        match self {
            Type::Primitive {
                primitive,
                nullable: false,
            } => Some(*primitive),
            _ => None,
        }
    }
}

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}
