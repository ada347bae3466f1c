//! Generic substitution along inheritance chains
//!
//! When a mutator is declared on a generic ancestor (`class MyBase<K>` with `setField(K)`), its
//! parameter type has to be expressed in terms of the class actually being built. Each
//! `extends` / `implements` edge contributes a positional binding of the supertype's formal
//! parameters to the actual arguments written in the clause; walking up the chain composes these
//! bindings so every ancestor's parameters end up in terms of the starting class.

#[cfg(test)]
mod tests;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use error_stack::Report;
use tracing::debug;

use crate::error::{Error, Result};
use crate::signature::{TypeArgument, TypeSignature, parse_and_resolve};
use crate::type_model::{ClassDecl, TypeModelProvider, TypeParameterDecl};
use crate::type_name::TypeName;

/// Binding of formal type-parameter names to signatures
///
/// Values may themselves be type variables when a subclass passes its own parameter through
/// (`class Sub<T> extends Base<T>`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionMap {
    bindings: HashMap<String, TypeSignature>,
}

impl SubstitutionMap {
    /// An empty map; applying it changes nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Every formal parameter of `class` bound to itself
    pub fn identity(class: &ClassDecl) -> Self {
        let mut map = Self::new();
        for parameter in &class.type_parameters {
            map.bind(
                parameter.name.clone(),
                TypeSignature::TypeVariable(parameter.name.clone()),
            );
        }
        map
    }

    /// Bind `name` to `signature`, replacing any earlier binding
    pub fn bind(&mut self, name: impl Into<String>, signature: TypeSignature) {
        self.bindings.insert(name.into(), signature);
    }

    /// Binding of the formal parameter `name`
    pub fn get(&self, name: &str) -> Option<&TypeSignature> {
        self.bindings.get(name)
    }

    /// Number of bound parameters
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether nothing is bound
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Replace every bound type variable in `signature`
    pub fn apply(&self, signature: &TypeSignature) -> TypeSignature {
        match signature {
            TypeSignature::TypeVariable(name) => self
                .bindings
                .get(name)
                .cloned()
                .unwrap_or_else(|| signature.clone()),
            TypeSignature::Array(component) => {
                TypeSignature::Array(Box::new(self.apply(component)))
            }
            TypeSignature::Class {
                name,
                arguments,
                resolved,
            } => TypeSignature::Class {
                name:      name.clone(),
                arguments: arguments
                    .iter()
                    .map(|argument| self.apply_argument(argument))
                    .collect(),
                resolved:  *resolved,
            },
            TypeSignature::Primitive(_) => signature.clone(),
        }
    }

    fn apply_argument(&self, argument: &TypeArgument) -> TypeArgument {
        match argument {
            TypeArgument::Exact(signature) => TypeArgument::Exact(self.apply(signature)),
            TypeArgument::Extends(signature) => TypeArgument::Extends(self.apply(signature)),
            TypeArgument::Super(signature) => TypeArgument::Super(self.apply(signature)),
            TypeArgument::Unbounded => TypeArgument::Unbounded,
        }
    }

    /// Re-express this map's values through `outer`
    ///
    /// `self` binds a supertype's parameters in terms of a subtype's; `outer` binds the subtype's
    /// parameters in terms of the root. The result binds the supertype's parameters in terms of
    /// the root, so bindings closer to the root win.
    pub fn compose(&self, outer: &Self) -> Self {
        Self {
            bindings: self
                .bindings
                .iter()
                .map(|(name, signature)| (name.clone(), outer.apply(signature)))
                .collect(),
        }
    }

    /// Bind `class`'s formal parameters to the arguments of one usage (`MyBase<String, E>`)
    ///
    /// Arguments match positionally. Wildcards bind to their bound. A raw usage, or a usage
    /// missing trailing arguments, binds the remaining parameters to their erasure.
    pub fn for_usage(
        class: &ClassDecl,
        arguments: &[TypeArgument],
        provider: &dyn TypeModelProvider,
    ) -> Result<Self> {
        if !arguments.is_empty() && arguments.len() != class.type_parameters.len() {
            debug!(
                class = %class.name,
                expected = class.type_parameters.len(),
                found = arguments.len(),
                "Type argument count mismatch, erasing unmatched parameters"
            );
        }

        let mut map = Self::new();
        for (index, parameter) in class.type_parameters.iter().enumerate() {
            let signature = match arguments.get(index) {
                Some(argument) => argument.bound_or_object(),
                None => parameter_erasure(parameter, class, provider)?,
            };
            map.bind(parameter.name.clone(), signature);
        }
        Ok(map)
    }
}

/// Erasure of a formal parameter: its first bound without arguments, else `java.lang.Object`
pub fn parameter_erasure(
    parameter: &TypeParameterDecl,
    class: &ClassDecl,
    provider: &dyn TypeModelProvider,
) -> Result<TypeSignature> {
    match parameter.bounds.first() {
        Some(bound) => Ok(parse_and_resolve(bound, class, provider)?.erasure()),
        None => Ok(TypeSignature::object()),
    }
}

/// One reachable supertype together with the binding of its parameters
#[derive(Debug, Clone)]
pub struct AncestorBinding {
    /// The supertype (or the class itself)
    pub class:        Arc<ClassDecl>,
    /// Its parameters expressed through the starting binding
    pub substitution: SubstitutionMap,
}

/// `class` followed by every supertype reachable from it
///
/// Superclasses are visited before interfaces, depth first. Each entry's substitution expresses
/// its parameters through `binding`, the binding of `class` itself. Supertypes missing from the
/// model end their branch.
pub fn ancestors(
    provider: &dyn TypeModelProvider,
    class: &Arc<ClassDecl>,
    binding: &SubstitutionMap,
) -> Result<Vec<AncestorBinding>> {
    let mut found = Vec::new();
    let mut visited = HashSet::new();
    collect_ancestors(provider, class, binding, &mut visited, &mut found)?;
    Ok(found)
}

fn collect_ancestors(
    provider: &dyn TypeModelProvider,
    class: &Arc<ClassDecl>,
    binding: &SubstitutionMap,
    visited: &mut HashSet<TypeName>,
    found: &mut Vec<AncestorBinding>,
) -> Result<()> {
    if !visited.insert(class.name.clone()) {
        return Ok(());
    }
    found.push(AncestorBinding {
        class:        Arc::clone(class),
        substitution: binding.clone(),
    });

    for supertype in class.supertypes() {
        let signature = parse_and_resolve(supertype, class, provider)
            .map_err(|report| report.attach(format!("Supertype clause of {}", class.name)))?;
        let TypeSignature::Class {
            name, arguments, ..
        } = &signature
        else {
            debug!(class = %class.name, supertype, "Ignoring non-class supertype");
            continue;
        };

        let Some(super_class) = provider.resolve_type_by_name(Some(&class.name), name.as_str())?
        else {
            debug!(
                class = %class.name,
                supertype = %name,
                "Supertype not in type model, ending inheritance walk here"
            );
            continue;
        };

        let edge = SubstitutionMap::for_usage(&super_class, arguments, provider)?;
        collect_ancestors(provider, &super_class, &edge.compose(binding), visited, found)?;
    }
    Ok(())
}

/// Binding of `ancestor`'s formal parameters in terms of `class`'s own parameters
pub fn substitution_for_ancestor(
    provider: &dyn TypeModelProvider,
    class: &Arc<ClassDecl>,
    ancestor: &TypeName,
) -> Result<SubstitutionMap> {
    ancestors(provider, class, &SubstitutionMap::identity(class))?
        .into_iter()
        .find(|entry| entry.class.name == *ancestor)
        .map(|entry| entry.substitution)
        .ok_or_else(|| {
            Report::new(Error::NotAnAncestor {
                class:    class.name.to_string(),
                ancestor: ancestor.to_string(),
            })
        })
}
