//! The type model the generator inspects
//!
//! The generator never looks at source files itself. Everything it knows about classes, their
//! supertypes and their methods comes through a [`TypeModelProvider`]. [`InMemoryTypeModel`] is the
//! adapter used by the command line front end and the tests.

mod declarations;
mod in_memory;

use std::sync::Arc;

pub use self::declarations::{ClassDecl, ClassKind, MethodDecl, TypeParameterDecl, Visibility};
pub use self::in_memory::{InMemoryTypeModel, TypeModelDocument};
use crate::error::Result;
use crate::signature::CollectionFamily;
use crate::type_name::TypeName;

/// Source of class declarations for one generation run
///
/// Calls happen synchronously on the generating thread. Provider failures should be reported as
/// `Error::ModelProviderFailure`; they abort the run.
pub trait TypeModelProvider {
    /// Look up a class by a name as written in `context` (qualified, same-package or simple)
    fn resolve_type_by_name(
        &self,
        context: Option<&TypeName>,
        raw_name: &str,
    ) -> Result<Option<Arc<ClassDecl>>>;

    /// Methods declared directly on `class`, supertypes excluded
    fn declared_methods(&self, class: &ClassDecl) -> Result<Vec<MethodDecl>> {
        Ok(class.methods.clone())
    }

    /// Whether `name` is one of the recognized collection types
    fn is_collection_family(&self, name: &TypeName) -> bool {
        CollectionFamily::from_type_name(name).is_some()
    }
}
