//! Type signatures as they appear on mutator parameters, supertypes and type parameter bounds
//!
//! Signatures arrive in Eclipse JDT form (`Qjava.util.List<Qtestpkg.Person;>;`, `I`, `TK;`) and
//! are parsed into [`TypeSignature`]. Unresolved (`Q`) names are qualified against the type model
//! by [`resolve_names`] before substitution and classification.

mod collection;
mod parser;
mod resolve;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

pub use self::collection::{
    CollectionElement, CollectionFamily, ElementVariance, collection_element,
};
pub use self::parser::parse_signature;
pub use self::resolve::{parse_and_resolve, resolve_names};
use crate::type_name::TypeName;

/// Java primitive kinds, including `void` for return types
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PrimitiveKind {
    /// `Z`
    Boolean,
    /// `B`
    Byte,
    /// `C`
    Char,
    /// `D`
    Double,
    /// `F`
    Float,
    /// `I`
    Int,
    /// `J`
    Long,
    /// `S`
    Short,
    /// `V`
    Void,
}

impl PrimitiveKind {
    /// Map a JDT base type code to its primitive kind
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'Z' => Some(Self::Boolean),
            'B' => Some(Self::Byte),
            'C' => Some(Self::Char),
            'D' => Some(Self::Double),
            'F' => Some(Self::Float),
            'I' => Some(Self::Int),
            'J' => Some(Self::Long),
            'S' => Some(Self::Short),
            'V' => Some(Self::Void),
            _ => None,
        }
    }

    /// Boxed counterpart used when a primitive has to appear as a type argument
    pub const fn boxed(self) -> &'static str {
        match self {
            Self::Boolean => "java.lang.Boolean",
            Self::Byte => "java.lang.Byte",
            Self::Char => "java.lang.Character",
            Self::Double => "java.lang.Double",
            Self::Float => "java.lang.Float",
            Self::Int => "java.lang.Integer",
            Self::Long => "java.lang.Long",
            Self::Short => "java.lang.Short",
            Self::Void => "java.lang.Void",
        }
    }
}

/// A parsed type signature
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeSignature {
    /// `I`, `Z`, ..
    Primitive(PrimitiveKind),
    /// `[` followed by the component
    Array(Box<Self>),
    /// `TK;`
    TypeVariable(String),
    /// `L..;` or `Q..;`, possibly parameterized
    Class {
        /// Dotted class name
        name:      TypeName,
        /// Type arguments in order
        arguments: Vec<TypeArgument>,
        /// `false` while the name is still as written in source (`Q...;`)
        resolved:  bool,
    },
}

/// One type argument of a parameterized class type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeArgument {
    /// `X`
    Exact(TypeSignature),
    /// `? extends X`
    Extends(TypeSignature),
    /// `? super X`
    Super(TypeSignature),
    /// `?`
    Unbounded,
}

impl TypeSignature {
    /// A resolved class type without type arguments
    pub fn class(name: impl Into<TypeName>) -> Self {
        Self::Class {
            name:      name.into(),
            arguments: Vec::new(),
            resolved:  true,
        }
    }

    /// A resolved class type with exact type arguments
    pub fn parameterized(name: impl Into<TypeName>, arguments: Vec<Self>) -> Self {
        Self::Class {
            name:      name.into(),
            arguments: arguments.into_iter().map(TypeArgument::Exact).collect(),
            resolved:  true,
        }
    }

    /// `java.lang.Object`
    pub fn object() -> Self {
        Self::class(TypeName::object())
    }

    /// The class name if this is a class type
    pub const fn class_name(&self) -> Option<&TypeName> {
        match self {
            Self::Class { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Type arguments of a class type, empty for everything else
    pub fn arguments(&self) -> &[TypeArgument] {
        match self {
            Self::Class { arguments, .. } => arguments,
            _ => &[],
        }
    }

    /// Render as Java source with fully-qualified names
    pub fn java_source(&self) -> String {
        match self {
            Self::Primitive(kind) => kind.to_string(),
            Self::Array(component) => format!("{}[]", component.java_source()),
            Self::TypeVariable(name) => name.clone(),
            Self::Class {
                name, arguments, ..
            } => {
                if arguments.is_empty() {
                    name.to_string()
                } else {
                    format!(
                        "{name}<{}>",
                        arguments.iter().map(TypeArgument::java_source).join(", ")
                    )
                }
            }
        }
    }

    /// Render as a type argument; primitives are boxed
    pub fn java_reference_source(&self) -> String {
        match self {
            Self::Primitive(kind) => kind.boxed().to_string(),
            other => other.java_source(),
        }
    }

    /// The concrete type an instance can be created with: wildcard arguments collapse to their
    /// bound, unbounded ones to `java.lang.Object`
    pub fn instance_signature(&self) -> Self {
        match self {
            Self::Class {
                name,
                arguments,
                resolved,
            } => Self::Class {
                name:      name.clone(),
                arguments: arguments
                    .iter()
                    .map(|argument| TypeArgument::Exact(argument.bound_or_object()))
                    .collect(),
                resolved:  *resolved,
            },
            other => other.clone(),
        }
    }

    /// Raw form with all type arguments dropped
    pub fn erasure(&self) -> Self {
        match self {
            Self::Class { name, resolved, .. } => Self::Class {
                name:      name.clone(),
                arguments: Vec::new(),
                resolved:  *resolved,
            },
            Self::Array(component) => Self::Array(Box::new(component.erasure())),
            Self::TypeVariable(_) => Self::object(),
            Self::Primitive(_) => self.clone(),
        }
    }

    /// Names of the type variables mentioned anywhere in this signature, in order of appearance
    pub fn type_variables(&self) -> Vec<String> {
        let mut found = Vec::new();
        self.collect_type_variables(&mut found);
        found
    }

    fn collect_type_variables(&self, found: &mut Vec<String>) {
        match self {
            Self::TypeVariable(name) => {
                if !found.contains(name) {
                    found.push(name.clone());
                }
            }
            Self::Array(component) => component.collect_type_variables(found),
            Self::Class { arguments, .. } => {
                for argument in arguments {
                    if let Some(bound) = argument.bound() {
                        bound.collect_type_variables(found);
                    }
                }
            }
            Self::Primitive(_) => {}
        }
    }

    /// Name used when deriving generated class names: the simple name of a class type
    pub fn display_name(&self) -> String {
        match self {
            Self::Class { name, .. } => name.simple_name().to_string(),
            Self::Array(component) => format!("{}Array", component.display_name()),
            Self::TypeVariable(name) => name.clone(),
            Self::Primitive(kind) => kind.to_string(),
        }
    }
}

impl TypeArgument {
    /// The signature this argument mentions, if any
    pub const fn bound(&self) -> Option<&TypeSignature> {
        match self {
            Self::Exact(signature) | Self::Extends(signature) | Self::Super(signature) => {
                Some(signature)
            }
            Self::Unbounded => None,
        }
    }

    /// Exact type or wildcard bound, `java.lang.Object` for `?`
    pub fn bound_or_object(&self) -> TypeSignature {
        self.bound().cloned().unwrap_or_else(TypeSignature::object)
    }

    /// Render as a Java type argument
    pub fn java_source(&self) -> String {
        match self {
            Self::Exact(signature) => signature.java_reference_source(),
            Self::Extends(signature) => format!("? extends {}", signature.java_reference_source()),
            Self::Super(signature) => format!("? super {}", signature.java_reference_source()),
            Self::Unbounded => "?".to_string(),
        }
    }
}

impl std::fmt::Display for TypeSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.java_source())
    }
}
