//! Mutator discovery and explicit mutator selection

use std::collections::HashSet;
use std::sync::Arc;

use error_stack::Report;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::signature::{TypeSignature, parse_and_resolve};
use crate::substitution::{AncestorBinding, SubstitutionMap, ancestors};
use crate::type_model::{ClassDecl, MethodDecl, TypeModelProvider};
use crate::type_name::TypeName;

/// A caller-chosen mutator: declaring class, method name and parameter signatures
///
/// An empty `parameter_signatures` matches any single-parameter method with that name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutatorRef {
    /// Class declaring the method
    pub owner:                TypeName,
    /// Method name, `setX`
    pub method_name:          String,
    /// JDT parameter signatures; empty matches by name alone
    #[serde(default)]
    pub parameter_signatures: Vec<String>,
}

impl MutatorRef {
    /// Reference `owner.method_name(parameter_signatures)`
    pub fn new(
        owner: impl Into<TypeName>,
        method_name: impl Into<String>,
        parameter_signatures: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            owner:                owner.into(),
            method_name:          method_name.into(),
            parameter_signatures: parameter_signatures.into_iter().map(Into::into).collect(),
        }
    }
}

/// Where a node's mutators come from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MutatorSource {
    /// Every public, non-static, single-parameter `setX` method of the class and its supertypes
    #[default]
    Discover,
    /// Only the listed mutators, in list order
    Explicit(Vec<MutatorRef>),
}

impl MutatorSource {
    /// Check every explicit reference against the model and qualify its owner
    pub fn validated(&self, provider: &dyn TypeModelProvider) -> Result<Self> {
        let Self::Explicit(refs) = self else {
            return Ok(Self::Discover);
        };

        let mut validated = Vec::with_capacity(refs.len());
        for mutator in refs {
            let unknown = || {
                Report::new(Error::UnknownMutator {
                    owner:       mutator.owner.to_string(),
                    method_name: mutator.method_name.clone(),
                })
            };
            let owner = provider
                .resolve_type_by_name(None, mutator.owner.as_str())?
                .ok_or_else(unknown)?;
            if matching_method(provider, &owner, mutator)?.is_none() {
                return Err(unknown().attach(format!(
                    "Parameters: [{}]",
                    mutator.parameter_signatures.join(", ")
                )));
            }
            validated.push(MutatorRef {
                owner: owner.name.clone(),
                ..mutator.clone()
            });
        }
        Ok(Self::Explicit(validated))
    }

    /// Whether any explicit reference is owned by one of `chain`'s classes
    pub fn selects_any(&self, chain: &[AncestorBinding]) -> bool {
        match self {
            Self::Discover => true,
            Self::Explicit(refs) => refs
                .iter()
                .any(|mutator| chain.iter().any(|a| a.class.name == mutator.owner)),
        }
    }
}

/// A mutator chosen for one node, with its parameter already substituted
#[derive(Debug, Clone)]
pub struct SelectedMutator {
    /// Property name, `FirstName` for `setFirstName`
    pub property:     String,
    /// Declaration as found on `declaring`
    pub method:       MethodDecl,
    /// Ancestor (or the class itself) declaring the method
    pub declaring:    Arc<ClassDecl>,
    /// Binding of the declaring class's parameters in terms of the node's signature
    pub substitution: SubstitutionMap,
    /// Parameter type after substitution
    pub parameter:    TypeSignature,
}

/// Mutators of `class` as seen through `binding`, in generation order
///
/// With [`MutatorSource::Discover`] the class's own declarations come first, then each ancestor's;
/// a supertype method with the same name and substituted parameter type as one already found is
/// overridden and skipped.
pub fn find_mutators(
    provider: &dyn TypeModelProvider,
    class: &Arc<ClassDecl>,
    binding: &SubstitutionMap,
    source: &MutatorSource,
    require_getter: bool,
) -> Result<Vec<SelectedMutator>> {
    let chain = ancestors(provider, class, binding)?;
    let declared = chain
        .iter()
        .map(|ancestor| provider.declared_methods(&ancestor.class))
        .collect::<Result<Vec<_>>>()?;

    let mut selected = Vec::new();
    let mut seen = HashSet::new();
    let mut push = |mutator: SelectedMutator, selected: &mut Vec<SelectedMutator>| {
        if seen.insert((mutator.method.name.clone(), mutator.parameter.clone())) {
            selected.push(mutator);
        } else {
            debug!(
                class = %class.name,
                method = %mutator.method.name,
                "Skipping overridden or repeated mutator"
            );
        }
    };

    match source {
        MutatorSource::Discover => {
            for (ancestor, methods) in chain.iter().zip(&declared) {
                for method in methods.iter().filter(|m| m.is_mutator_shaped()) {
                    let mutator = select(provider, ancestor, method)?;
                    if require_getter && !has_getter(&declared, &mutator.property) {
                        debug!(
                            class = %class.name,
                            property = %mutator.property,
                            "Skipping mutator without getter"
                        );
                        continue;
                    }
                    push(mutator, &mut selected);
                }
            }
        }
        MutatorSource::Explicit(refs) => {
            for mutator_ref in refs {
                let Some(ancestor) = chain.iter().find(|a| a.class.name == mutator_ref.owner)
                else {
                    continue;
                };
                if let Some(method) = matching_method(provider, &ancestor.class, mutator_ref)? {
                    let mutator = select(provider, ancestor, &method)?;
                    push(mutator, &mut selected);
                }
            }
        }
    }

    Ok(selected)
}

fn select(
    provider: &dyn TypeModelProvider,
    ancestor: &AncestorBinding,
    method: &MethodDecl,
) -> Result<SelectedMutator> {
    let attach_method =
        |report: Report<Error>| report.attach(format!("Mutator {}.{}", ancestor.class.name, method.name));

    let (Some(property), [parameter]) = (method.mutator_property(), method.parameters.as_slice())
    else {
        return Err(Report::new(Error::invalid(
            "mutator",
            format!(
                "{}.{} is not a single-parameter set method",
                ancestor.class.name, method.name
            ),
        )));
    };

    let parameter = resolve_mutator_target_type(
        provider,
        &ancestor.class,
        parameter,
        &ancestor.substitution,
    )
    .map_err(attach_method)?;

    Ok(SelectedMutator {
        property: property.to_string(),
        method: method.clone(),
        declaring: Arc::clone(&ancestor.class),
        substitution: ancestor.substitution.clone(),
        parameter,
    })
}

/// Parameter type of a mutator declared on `declaring`, expressed in the terms of the class that
/// inherits it through `substitution`
pub fn resolve_mutator_target_type(
    provider: &dyn TypeModelProvider,
    declaring: &ClassDecl,
    parameter: &str,
    substitution: &SubstitutionMap,
) -> Result<TypeSignature> {
    let declared = parse_and_resolve(parameter, declaring, provider)?;
    Ok(substitution.apply(&declared))
}

fn has_getter(declared: &[Vec<MethodDecl>], property: &str) -> bool {
    declared
        .iter()
        .flatten()
        .any(|method| method.is_getter_for(property))
}

/// The method on `owner` an explicit reference points at
fn matching_method(
    provider: &dyn TypeModelProvider,
    owner: &ClassDecl,
    mutator: &MutatorRef,
) -> Result<Option<MethodDecl>> {
    let wanted = mutator
        .parameter_signatures
        .iter()
        .map(|text| parse_and_resolve(text, owner, provider))
        .collect::<Result<Vec<_>>>()?;

    for method in provider.declared_methods(owner)? {
        if method.name != mutator.method_name
            || method.parameters.len() != 1
            || method.mutator_property().is_none()
        {
            continue;
        }
        if wanted.is_empty() {
            return Ok(Some(method));
        }
        let actual = method
            .parameters
            .iter()
            .map(|text| parse_and_resolve(text, owner, provider))
            .collect::<Result<Vec<_>>>()?;
        if actual == wanted {
            return Ok(Some(method));
        }
    }
    Ok(None)
}
