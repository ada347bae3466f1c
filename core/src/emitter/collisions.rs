//! Name bookkeeping for one generated class
//!
//! Java would reject or silently overload clashing members, so every generated method, field and
//! nested class is registered here first and a clash fails the run.

use std::collections::HashMap;

use error_stack::Report;

use crate::error::{Error, Result};

/// Members already claimed in one generated class, with the property that claimed each
#[derive(Debug, Clone)]
pub(super) struct MemberRegistry {
    builder: String,
    methods: HashMap<(String, usize), String>,
    fields:  HashMap<String, String>,
    types:   HashMap<String, String>,
}

impl MemberRegistry {
    pub(super) fn new(builder: impl Into<String>) -> Self {
        Self {
            builder: builder.into(),
            methods: HashMap::new(),
            fields:  HashMap::new(),
            types:   HashMap::new(),
        }
    }

    /// Same members under another class name; used for nested builders inheriting a base
    pub(super) fn inherited_by(&self, builder: impl Into<String>) -> Self {
        Self {
            builder: builder.into(),
            methods: self.methods.clone(),
            fields:  HashMap::new(),
            types:   HashMap::new(),
        }
    }

    /// Claim a method; methods collide on name and arity
    pub(super) fn method(&mut self, name: &str, arity: usize, origin: &str) -> Result<()> {
        let key = (name.to_string(), arity);
        claim(&self.builder, &mut self.methods, key, name, origin)
    }

    pub(super) fn field(&mut self, name: &str, origin: &str) -> Result<()> {
        claim(&self.builder, &mut self.fields, name.to_string(), name, origin)
    }

    /// Claim a nested class name
    pub(super) fn nested_type(&mut self, name: &str, origin: &str) -> Result<()> {
        claim(&self.builder, &mut self.types, name.to_string(), name, origin)
    }
}

fn claim<K: std::hash::Hash + Eq>(
    builder: &str,
    claimed: &mut HashMap<K, String>,
    key: K,
    name: &str,
    origin: &str,
) -> Result<()> {
    if let Some(first) = claimed.get(&key) {
        return Err(Report::new(Error::MethodNameCollision {
            builder: builder.to_string(),
            method:  name.to_string(),
            first:   first.clone(),
            second:  origin.to_string(),
        }));
    }
    claimed.insert(key, origin.to_string());
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic, reason = "test code")]
mod tests {
    use super::*;

    #[test]
    fn test_methods_collide_on_name_and_arity() {
        let mut registry = MemberRegistry::new("MyClassBuilder");
        registry.method("withField", 1, "Field").unwrap();
        registry.method("withField", 0, "Field").unwrap();

        let error = registry.method("withField", 1, "field").unwrap_err();
        let Error::MethodNameCollision {
            builder,
            method,
            first,
            second,
        } = error.current_context()
        else {
            panic!("unexpected error {error:?}");
        };
        assert_eq!(builder, "MyClassBuilder");
        assert_eq!(method, "withField");
        assert_eq!(first, "Field");
        assert_eq!(second, "field");
    }

    #[test]
    fn test_inherited_keeps_methods_only() {
        let mut base = MemberRegistry::new("ABuilderBase");
        base.method("withNext", 0, "Next").unwrap();
        base.nested_type("NextBuilder", "Next").unwrap();

        let mut nested = base.inherited_by("NextBuilder");
        nested.nested_type("NextBuilder", "Next").unwrap();
        assert!(nested.method("withNext", 0, "end").is_err());
    }
}
