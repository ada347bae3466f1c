//! A newtype wrapper for Java class names used throughout the system
//!
//! `TypeName` holds a dotted class name (e.g. `testpkg.Company`, `java.util.List`). Inner classes
//! are written with dots as well (`testpkg.Outer.Inner`), matching how they appear in source.

use serde::{Deserialize, Serialize};

use crate::constants::{PLATFORM_PACKAGE_PREFIXES, TYPE_OBJECT};

/// A dotted Java class name used as a lookup key into the type model
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    /// `java.lang.Object`, the erasure of every unbounded type parameter
    pub fn object() -> Self {
        Self(TYPE_OBJECT.to_string())
    }

    /// Get the underlying string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last dotted segment: `testpkg.Outer.Inner` returns `Inner`
    pub fn simple_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// Everything before the last dot, empty for the default package
    pub fn package(&self) -> &str {
        self.0.rfind('.').map_or("", |pos| &self.0[..pos])
    }

    /// Whether the name lives under `java.` or `javax.`
    pub fn is_platform(&self) -> bool {
        PLATFORM_PACKAGE_PREFIXES
            .iter()
            .any(|prefix| self.0.starts_with(prefix))
    }

    /// Whether the name carries a package qualifier
    pub fn is_qualified(&self) -> bool {
        self.0.contains('.')
    }

    /// Qualify a simple name with `package`, leaving it untouched for the default package
    pub fn in_package(package: &str, simple: &str) -> Self {
        if package.is_empty() {
            Self(simple.to_string())
        } else {
            Self(format!("{package}.{simple}"))
        }
    }
}

impl From<&str> for TypeName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TypeName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&String> for TypeName {
    fn from(s: &String) -> Self {
        Self(s.clone())
    }
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_name_and_package() {
        let name = TypeName::from("testpkg.Outer.Inner");
        assert_eq!(name.simple_name(), "Inner");
        assert_eq!(name.package(), "testpkg.Outer");

        let bare = TypeName::from("MyClass");
        assert_eq!(bare.simple_name(), "MyClass");
        assert_eq!(bare.package(), "");
        assert!(!bare.is_qualified());
    }

    #[test]
    fn test_platform_detection() {
        assert!(TypeName::from("java.math.BigDecimal").is_platform());
        assert!(TypeName::from("javax.money.MonetaryAmount").is_platform());
        assert!(!TypeName::from("javaish.Thing").is_platform());
        assert!(!TypeName::from("testpkg.Company").is_platform());
    }

    #[test]
    fn test_in_package() {
        assert_eq!(
            TypeName::in_package("testpkg", "Person"),
            TypeName::from("testpkg.Person")
        );
        assert_eq!(TypeName::in_package("", "Person"), TypeName::from("Person"));
    }
}
