//! Type model held entirely in memory, loadable from JSON

use std::collections::HashMap;
use std::sync::Arc;

use error_stack::Report;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ClassDecl, TypeModelProvider};
use crate::error::{Error, Result};
use crate::type_name::TypeName;

/// On-disk layout of a serialized type model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeModelDocument {
    /// Every declaration of the model
    pub classes: Vec<ClassDecl>,
}

/// A [`TypeModelProvider`] over a fixed set of class declarations
///
/// Name lookup tries, in order: the name as a qualified name, the name relative to the context
/// class (nested classes), the name relative to the context package, and finally a unique match
/// on the simple name. Ambiguous simple names resolve to nothing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTypeModel {
    classes: HashMap<TypeName, Arc<ClassDecl>>,
}

impl InMemoryTypeModel {
    /// An empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a model from declarations; later declarations replace earlier ones with the same name
    pub fn from_classes(classes: impl IntoIterator<Item = ClassDecl>) -> Self {
        let mut model = Self::new();
        for class in classes {
            model.insert(class);
        }
        model
    }

    /// Parse a `{ "classes": [...] }` document
    pub fn from_json(text: &str) -> Result<Self> {
        let document: TypeModelDocument = serde_json::from_str(text).map_err(|e| {
            Report::new(Error::provider_failed("parse type model JSON", &e))
                .attach(format!("line {}, column {}", e.line(), e.column()))
        })?;
        Ok(Self::from_classes(document.classes))
    }

    /// Add or replace a declaration
    pub fn insert(&mut self, class: ClassDecl) {
        self.classes.insert(class.name.clone(), Arc::new(class));
    }

    /// Number of declarations held
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the model holds no declarations
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    fn by_simple_name(&self, simple: &str) -> Option<Arc<ClassDecl>> {
        let mut matches = self
            .classes
            .values()
            .filter(|class| class.name.simple_name() == simple);
        let found = matches.next()?;
        if matches.next().is_some() {
            debug!(simple_name = simple, "Ambiguous simple name in type model");
            return None;
        }
        Some(Arc::clone(found))
    }
}

impl TypeModelProvider for InMemoryTypeModel {
    fn resolve_type_by_name(
        &self,
        context: Option<&TypeName>,
        raw_name: &str,
    ) -> Result<Option<Arc<ClassDecl>>> {
        if raw_name.is_empty() {
            return Err(Report::new(Error::invalid("type name", "empty name")));
        }

        if let Some(class) = self.classes.get(&TypeName::from(raw_name)) {
            return Ok(Some(Arc::clone(class)));
        }

        if let Some(context) = context {
            let nested = TypeName::in_package(context.as_str(), raw_name);
            if let Some(class) = self.classes.get(&nested) {
                return Ok(Some(Arc::clone(class)));
            }
            let sibling = TypeName::in_package(context.package(), raw_name);
            if let Some(class) = self.classes.get(&sibling) {
                return Ok(Some(Arc::clone(class)));
            }
        }

        if raw_name.contains('.') {
            return Ok(None);
        }
        Ok(self.by_simple_name(raw_name))
    }
}
