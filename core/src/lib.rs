//! Fluent builder generation for Java classes
//!
//! A [`TypeModelProvider`] describes classes, their supertypes and methods. From a root class the
//! generator collects the mutators (`setX` methods) of every reachable buildable type, resolves
//! generic parameters along inheritance chains, and emits one Java compilation unit containing a
//! fluent builder with nested builders for object properties and element accumulators for
//! collections.
//!
//! ```no_run
//! use fluent_builder_core::{InMemoryTypeModel, generate_source};
//!
//! # fn run(json: &str) -> fluent_builder_core::Result<()> {
//! let model = InMemoryTypeModel::from_json(json)?;
//! let source = generate_source(
//!     &model,
//!     "testpkg.MyClass",
//!     "builderpkg",
//!     "GeneratedBuilder",
//!     None,
//!     "with",
//!     "withAdded",
//!     "end",
//! )?;
//! println!("{source}");
//! # Ok(())
//! # }
//! ```

/// Names and limits shared by the graph builder and the emitter
pub mod constants;
pub mod emitter;
/// Error kinds of a generation run
pub mod error;
pub mod generate;
pub mod graph;
pub mod signature;
pub mod substitution;
pub mod type_model;
pub mod type_name;

#[cfg(test)]
mod test_fixtures;

pub use crate::emitter::{BuilderNamingConvention, emit};
pub use crate::error::{Error, Result};
pub use crate::generate::{BuilderGenerator, GenerationOutput, GenerationRequest, generate_source};
pub use crate::graph::{
    CancellationSignal, Demotion, DemotionReason, MutatorRef, MutatorSource, TypeGraph,
    TypeGraphBuilder,
};
pub use crate::signature::{TypeSignature, parse_signature};
pub use crate::substitution::{SubstitutionMap, substitution_for_ancestor};
pub use crate::type_model::{ClassDecl, InMemoryTypeModel, MethodDecl, TypeModelProvider};
pub use crate::type_name::TypeName;
