//! Depth-first construction of the type graph
//!
//! Starting at the root type every mutator is classified. Object and collection-element targets
//! that can be built are visited once per type identity; a target seen before only records its
//! key and is connected to the existing node by the resolution pass. The root node is kept out of
//! the identity index, so a self-referencing root gets exactly one extra node for its own type
//! and that node points at itself.

use std::sync::Arc;

use error_stack::Report;
use tracing::debug;

use super::cancellation::CancellationSignal;
use super::demotion_reason::{Demotion, DemotionReason};
use super::mutators::{MutatorSource, SelectedMutator, find_mutators};
use super::traversal_context::TraversalContext;
use super::types::{
    NodeId, OpenParameter, SetterDescriptor, SetterKind, TypeGraph, TypeKey, TypeNode,
};
use crate::constants::MAX_TRAVERSAL_DEPTH;
use crate::error::{Error, Result};
use crate::signature::{TypeArgument, TypeSignature, collection_element, parse_and_resolve};
use crate::substitution::{SubstitutionMap, ancestors};
use crate::type_model::{ClassDecl, TypeModelProvider};
use crate::type_name::TypeName;

/// Tuning knobs for one graph build
#[derive(Debug, Clone)]
pub struct GraphOptions {
    /// Only discover mutators that have a matching `getX` / `isX`
    pub require_getter: bool,
    /// Deepest nesting level that still gets a nested builder
    pub max_depth:      usize,
    /// Checked before every node visit
    pub cancellation:   CancellationSignal,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            require_getter: false,
            max_depth:      MAX_TRAVERSAL_DEPTH,
            cancellation:   CancellationSignal::new(),
        }
    }
}

/// Outcome of trying to give a setter a nested builder
enum NestedTarget {
    Node(TypeKey),
    Demoted(DemotionReason),
}

/// Builds the [`TypeGraph`] for a root type
pub struct TypeGraphBuilder<'a> {
    provider: &'a dyn TypeModelProvider,
    options:  GraphOptions,
}

impl<'a> TypeGraphBuilder<'a> {
    /// Builder over `provider`
    pub const fn new(provider: &'a dyn TypeModelProvider, options: GraphOptions) -> Self {
        Self { provider, options }
    }

    /// Enumerate, classify and link every buildable type reachable from `root`
    pub fn build(&self, root: &TypeName, source: &MutatorSource) -> Result<TypeGraph> {
        let mut context =
            TraversalContext::new(self.options.cancellation.clone(), self.options.max_depth);
        context.check_cancelled()?;

        let root_class = self
            .provider
            .resolve_type_by_name(None, root.as_str())?
            .ok_or_else(|| Report::new(Error::UnknownRootType(root.to_string())))?;
        if !root_class.is_instantiable() {
            return Err(Report::new(Error::invalid(
                "root type",
                format!("{} has no accessible default constructor", root_class.name),
            )));
        }
        let source = source.validated(self.provider)?;

        let root_parameters = self.root_parameters(&root_class)?;
        let root_signature = TypeSignature::Class {
            name:      root_class.name.clone(),
            arguments: root_class
                .type_parameters
                .iter()
                .map(|p| TypeArgument::Exact(TypeSignature::TypeVariable(p.name.clone())))
                .collect(),
            resolved:  true,
        };

        let traversal = Traversal {
            provider: self.provider,
            source: &source,
            require_getter: self.options.require_getter,
            root_parameters: root_parameters.iter().map(|p| p.name.clone()).collect(),
        };
        traversal.visit(
            &mut context,
            &root_class,
            root_signature,
            &SubstitutionMap::identity(&root_class),
            0,
            true,
        )?;

        context.link_targets();
        let graph = context.into_graph(root_parameters);
        debug!(
            root = %root_class.name,
            nodes = graph.len(),
            demotions = graph.demotions().len(),
            "Type graph built"
        );
        Ok(graph)
    }

    fn root_parameters(&self, root: &ClassDecl) -> Result<Vec<OpenParameter>> {
        root.type_parameters
            .iter()
            .map(|parameter| {
                let bounds = parameter
                    .bounds
                    .iter()
                    .map(|bound| parse_and_resolve(bound, root, self.provider))
                    .collect::<Result<Vec<_>>>()?;
                Ok(OpenParameter {
                    name: parameter.name.clone(),
                    bounds,
                })
            })
            .collect()
    }
}

/// Read-only state shared by every visit of one build
struct Traversal<'a> {
    provider:        &'a dyn TypeModelProvider,
    source:          &'a MutatorSource,
    require_getter:  bool,
    root_parameters: Vec<String>,
}

impl Traversal<'_> {
    fn visit(
        &self,
        context: &mut TraversalContext,
        class: &Arc<ClassDecl>,
        signature: TypeSignature,
        binding: &SubstitutionMap,
        depth: usize,
        is_root: bool,
    ) -> Result<()> {
        context.check_cancelled()?;

        let key = TypeKey::from(&signature);
        debug!(type_key = %key, depth, is_root, "Visiting type");

        let open_parameters = self.open_parameters(&signature);
        let id = context.allocate_node(TypeNode {
            id: NodeId::ROOT,
            key,
            class_name: class.name.clone(),
            signature,
            setters: Vec::new(),
            pointed_by: Vec::new(),
            open_parameters,
            is_root,
        });

        let mutators = find_mutators(
            self.provider,
            class,
            binding,
            self.source,
            self.require_getter,
        )?;

        let mut setters = Vec::with_capacity(mutators.len());
        for mutator in &mutators {
            setters.push(self.describe_setter(context, class, mutator, depth)?);
        }
        context.set_setters(id, setters);
        Ok(())
    }

    /// Root parameters mentioned by `signature`, in root declaration order
    fn open_parameters(&self, signature: &TypeSignature) -> Vec<String> {
        let mentioned = signature.type_variables();
        self.root_parameters
            .iter()
            .filter(|name| mentioned.contains(name))
            .cloned()
            .collect()
    }

    fn describe_setter(
        &self,
        context: &mut TraversalContext,
        owner: &ClassDecl,
        mutator: &SelectedMutator,
        depth: usize,
    ) -> Result<SetterDescriptor> {
        let attach_mutator = |report: Report<Error>| {
            report.attach(format!(
                "Mutator {}.{} of {}",
                mutator.declaring.name, mutator.method.name, owner.name
            ))
        };

        let exceptions = mutator
            .method
            .exceptions
            .iter()
            .map(|text| {
                parse_and_resolve(text, &mutator.declaring, self.provider)
                    .map(|signature| mutator.substitution.apply(&signature))
            })
            .collect::<Result<Vec<_>>>()
            .map_err(attach_mutator)?;

        let declared = mutator.parameter.clone();
        let element = collection_element(&declared, self.provider).map_err(attach_mutator)?;

        let mut setter = SetterDescriptor::new(
            mutator.property.clone(),
            mutator.method.name.clone(),
            declared,
            SetterKind::Simple,
            exceptions,
        );

        if let Some(element) = element {
            setter.kind = SetterKind::Collection;
            let nested = element.allows_nested_builder() && is_buildable_candidate(&element.element);
            if nested {
                match self.enter_target(context, owner, &setter.property, &element.element, depth)? {
                    NestedTarget::Node(key) => setter.target_key = Some(key),
                    NestedTarget::Demoted(reason) => setter.demotion = Some(reason),
                }
            }
            setter.element = Some(element);
        } else if is_buildable_candidate(&setter.declared_type) {
            let target = setter.declared_type.clone();
            match self.enter_target(context, owner, &setter.property, &target, depth)? {
                NestedTarget::Node(key) => {
                    setter.kind = SetterKind::Object;
                    setter.target_key = Some(key);
                }
                NestedTarget::Demoted(reason) => setter.demotion = Some(reason),
            }
        }

        Ok(setter)
    }

    /// Decide whether `target` gets a nested builder, visiting it if it is new
    fn enter_target(
        &self,
        context: &mut TraversalContext,
        owner: &ClassDecl,
        property: &str,
        target: &TypeSignature,
        depth: usize,
    ) -> Result<NestedTarget> {
        let Some(name) = target.class_name() else {
            return Ok(demote(context, owner, property, target, DemotionReason::NotFound));
        };

        let Some(class) = self
            .provider
            .resolve_type_by_name(Some(&owner.name), name.as_str())?
        else {
            return Ok(demote(context, owner, property, target, DemotionReason::NotFound));
        };
        if class.binary_only {
            return Ok(demote(context, owner, property, target, DemotionReason::BinaryOnly));
        }
        if !class.is_instantiable() {
            return Ok(demote(
                context,
                owner,
                property,
                target,
                DemotionReason::NotInstantiable,
            ));
        }

        let instance = match target.instance_signature() {
            TypeSignature::Class {
                arguments,
                resolved,
                ..
            } => TypeSignature::Class {
                name: class.name.clone(),
                arguments,
                resolved,
            },
            other => other,
        };
        let key = TypeKey::from(&instance);

        if context.is_visited(&key) {
            debug!(type_key = %key, "Re-entering visited type");
            return Ok(NestedTarget::Node(key));
        }
        if context.exceeds_depth(depth + 1) {
            return Ok(demote(
                context,
                owner,
                property,
                target,
                DemotionReason::RecursionLimitExceeded,
            ));
        }

        let binding = SubstitutionMap::for_usage(&class, instance.arguments(), self.provider)?;
        if let MutatorSource::Explicit(_) = self.source {
            let chain = ancestors(self.provider, &class, &binding)?;
            if !self.source.selects_any(&chain) {
                return Ok(demote(
                    context,
                    owner,
                    property,
                    target,
                    DemotionReason::NoSelectedMutators,
                ));
            }
        }

        context.mark_visited(key.clone());
        self.visit(context, &class, instance, &binding, depth + 1, false)?;
        Ok(NestedTarget::Node(key))
    }
}

fn demote(
    context: &mut TraversalContext,
    owner: &ClassDecl,
    property: &str,
    target: &TypeSignature,
    reason: DemotionReason,
) -> NestedTarget {
    context.record_demotion(Demotion {
        owner: owner.name.clone(),
        property: property.to_string(),
        target: target.java_source(),
        reason,
    });
    NestedTarget::Demoted(reason)
}

/// Class types outside the platform packages are candidates for nested builders
fn is_buildable_candidate(signature: &TypeSignature) -> bool {
    signature
        .class_name()
        .is_some_and(|name| !name.is_platform())
}
