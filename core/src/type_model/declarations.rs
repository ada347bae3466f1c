//! Serializable class and method declarations
//!
//! All type references are JDT signature strings (`Qjava.lang.String;`, `I`, `TK;`), exactly as
//! a Java model reports them.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::constants::{GETTER_PREFIXES, MUTATOR_PREFIX};
use crate::type_name::TypeName;

const VOID_SIGNATURE: &str = "V";

fn void_signature() -> String {
    VOID_SIGNATURE.to_string()
}

const fn default_true() -> bool {
    true
}

/// What kind of declaration a class is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ClassKind {
    /// Concrete class
    #[default]
    Class,
    /// Abstract class; never instantiated by a builder
    AbstractClass,
    /// Interface; never instantiated by a builder
    Interface,
    /// Enum; never instantiated by a builder
    Enum,
}

/// Declared member visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Visibility {
    /// `public`
    #[default]
    Public,
    /// `protected`
    Protected,
    /// No modifier
    Package,
    /// `private`
    Private,
}

/// A formal type parameter with its bounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParameterDecl {
    /// Parameter name, `K`
    pub name:   String,
    /// Bound signatures, first one is the erasure
    #[serde(default)]
    pub bounds: Vec<String>,
}

/// A method as declared on one class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    /// Method name
    pub name:        String,
    /// Parameter signatures
    #[serde(default)]
    pub parameters:  Vec<String>,
    /// Return signature, `V` for `void`
    #[serde(default = "void_signature")]
    pub return_type: String,
    /// Declared checked exceptions
    #[serde(default)]
    pub exceptions:  Vec<String>,
    /// Access modifier
    #[serde(default)]
    pub visibility:  Visibility,
    /// Declared `static`
    #[serde(default)]
    pub is_static:   bool,
}

impl MethodDecl {
    /// A public, non-static method without parameters returning `void`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:        name.into(),
            parameters:  Vec::new(),
            return_type: void_signature(),
            exceptions:  Vec::new(),
            visibility:  Visibility::Public,
            is_static:   false,
        }
    }

    /// Shorthand for a public `void setX(T)` method
    pub fn setter(name: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self::new(name).with_parameter(parameter)
    }

    /// Shorthand for a public getter returning `return_type`
    pub fn getter(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self::new(name).returning(return_type)
    }

    /// Append a parameter signature
    #[must_use]
    pub fn with_parameter(mut self, signature: impl Into<String>) -> Self {
        self.parameters.push(signature.into());
        self
    }

    /// Set the return signature
    #[must_use]
    pub fn returning(mut self, signature: impl Into<String>) -> Self {
        self.return_type = signature.into();
        self
    }

    /// Declare a checked exception
    #[must_use]
    pub fn throwing(mut self, signature: impl Into<String>) -> Self {
        self.exceptions.push(signature.into());
        self
    }

    /// Set the access modifier
    #[must_use]
    pub const fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Mark the method `static`
    #[must_use]
    pub const fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Property name for a `setX` method (`setFirstName` gives `FirstName`)
    pub fn mutator_property(&self) -> Option<&str> {
        let property = self.name.strip_prefix(MUTATOR_PREFIX)?;
        property
            .chars()
            .next()
            .is_some_and(char::is_uppercase)
            .then_some(property)
    }

    /// Public, non-static, single-parameter `setX` method
    pub fn is_mutator_shaped(&self) -> bool {
        self.visibility == Visibility::Public
            && !self.is_static
            && self.parameters.len() == 1
            && self.mutator_property().is_some()
    }

    /// Whether this method reads `property` (`getX` or `isX` without parameters)
    pub fn is_getter_for(&self, property: &str) -> bool {
        self.parameters.is_empty()
            && !self.is_static
            && self.return_type != VOID_SIGNATURE
            && GETTER_PREFIXES
                .iter()
                .any(|prefix| self.name.strip_prefix(prefix) == Some(property))
    }
}

/// A class, interface or enum declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDecl {
    /// Qualified class name
    pub name:                TypeName,
    /// Class, interface, enum
    #[serde(default)]
    pub kind:                ClassKind,
    /// Formal type parameters in declaration order
    #[serde(default)]
    pub type_parameters:     Vec<TypeParameterDecl>,
    /// `extends` clause signature
    #[serde(default)]
    pub superclass:          Option<String>,
    /// `implements` (or interface `extends`) clause signatures
    #[serde(default)]
    pub interfaces:          Vec<String>,
    /// Declared methods, inherited ones excluded
    #[serde(default)]
    pub methods:             Vec<MethodDecl>,
    /// Only available as compiled code; never built through a nested builder
    #[serde(default)]
    pub binary_only:         bool,
    /// Has an accessible no-argument constructor
    #[serde(default = "default_true")]
    pub default_constructor: bool,
}

impl ClassDecl {
    /// A concrete class with a default constructor and nothing else
    pub fn new(name: impl Into<TypeName>) -> Self {
        Self {
            name:                name.into(),
            kind:                ClassKind::Class,
            type_parameters:     Vec::new(),
            superclass:          None,
            interfaces:          Vec::new(),
            methods:             Vec::new(),
            binary_only:         false,
            default_constructor: true,
        }
    }

    /// Set the declaration kind
    #[must_use]
    pub const fn with_kind(mut self, kind: ClassKind) -> Self {
        self.kind = kind;
        self
    }

    /// Append a formal type parameter with its bound signatures
    #[must_use]
    pub fn with_type_parameter<S: Into<String>>(
        mut self,
        name: impl Into<String>,
        bounds: impl IntoIterator<Item = S>,
    ) -> Self {
        self.type_parameters.push(TypeParameterDecl {
            name:   name.into(),
            bounds: bounds.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Set the `extends` clause
    #[must_use]
    pub fn extending(mut self, signature: impl Into<String>) -> Self {
        self.superclass = Some(signature.into());
        self
    }

    /// Append an `implements` clause
    #[must_use]
    pub fn implementing(mut self, signature: impl Into<String>) -> Self {
        self.interfaces.push(signature.into());
        self
    }

    /// Append a declared method
    #[must_use]
    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    /// Mark the class as available in compiled form only
    #[must_use]
    pub const fn binary(mut self) -> Self {
        self.binary_only = true;
        self
    }

    /// Drop the no-argument constructor
    #[must_use]
    pub const fn without_default_constructor(mut self) -> Self {
        self.default_constructor = false;
        self
    }

    /// Formal parameter by name
    pub fn type_parameter(&self, name: &str) -> Option<&TypeParameterDecl> {
        self.type_parameters.iter().find(|p| p.name == name)
    }

    /// Whether `new Name()` compiles
    pub fn is_instantiable(&self) -> bool {
        self.kind == ClassKind::Class && self.default_constructor
    }

    /// Supertype signatures, superclass first
    pub fn supertypes(&self) -> impl Iterator<Item = &str> {
        self.superclass
            .iter()
            .chain(self.interfaces.iter())
            .map(String::as_str)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "test code")]
mod tests {
    use super::*;

    #[test]
    fn test_mutator_shape() {
        assert!(MethodDecl::setter("setName", "QString;").is_mutator_shaped());
        assert!(!MethodDecl::setter("settle", "I").is_mutator_shaped());
        assert!(!MethodDecl::setter("set", "I").is_mutator_shaped());
        assert!(
            !MethodDecl::setter("setName", "QString;")
                .as_static()
                .is_mutator_shaped()
        );
        assert!(
            !MethodDecl::setter("setName", "QString;")
                .with_visibility(Visibility::Protected)
                .is_mutator_shaped()
        );
        assert!(
            !MethodDecl::setter("setRange", "I")
                .with_parameter("I")
                .is_mutator_shaped()
        );
    }

    #[test]
    fn test_getter_detection() {
        assert!(MethodDecl::getter("getName", "QString;").is_getter_for("Name"));
        assert!(MethodDecl::getter("isActive", "Z").is_getter_for("Active"));
        assert!(!MethodDecl::new("getName").is_getter_for("Name"));
        assert!(!MethodDecl::getter("getNames", "QList;").is_getter_for("Name"));
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{
            "name": "testpkg.Person",
            "methods": [{ "name": "setName", "parameters": ["QString;"] }]
        }"#;
        let class: ClassDecl = serde_json::from_str(json).unwrap();
        assert_eq!(class.kind, ClassKind::Class);
        assert!(class.default_constructor);
        assert!(class.is_instantiable());
        assert_eq!(class.methods[0].return_type, "V");
        assert_eq!(class.methods[0].visibility, Visibility::Public);
    }
}
