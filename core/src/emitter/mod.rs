//! Java source emission for a [`TypeGraph`]

mod collisions;
mod java;
mod naming;
mod source_writer;


use error_stack::Report;
use tracing::debug;

pub use self::naming::{BuilderNamingConvention, singularize};
use self::java::JavaEmitter;
use crate::constants::is_java_identifier;
use crate::error::{Error, Result};
use crate::graph::TypeGraph;

/// Render the builder compilation unit for `graph`
///
/// The unit declares `target_package` (omitted when empty) and one public class
/// `builder_type_name` holding the factory, the root builder and a builder base per map node.
/// Fails with `MethodNameCollision` when two generated members would share a name; no source is
/// produced in that case.
pub fn emit(
    graph: &TypeGraph,
    target_package: &str,
    builder_type_name: &str,
    naming: &BuilderNamingConvention,
) -> Result<String> {
    validate_package(target_package)?;
    validate_type_name(builder_type_name)?;

    let source = JavaEmitter::new(graph, naming, builder_type_name)?.render(target_package)?;
    debug!(
        builder = builder_type_name,
        package = target_package,
        nodes = graph.len(),
        bytes = source.len(),
        "Builder source emitted"
    );
    Ok(source)
}

/// Dotted Java identifiers, or empty for the default package
pub fn validate_package(package: &str) -> Result<()> {
    if package.is_empty() || package.split('.').all(is_java_identifier) {
        Ok(())
    } else {
        Err(Report::new(Error::invalid("target package", package)))
    }
}

/// A single Java identifier that is not a keyword
pub fn validate_type_name(name: &str) -> Result<()> {
    if is_java_identifier(name) {
        Ok(())
    } else {
        Err(Report::new(Error::invalid("builder type name", name)))
    }
}
