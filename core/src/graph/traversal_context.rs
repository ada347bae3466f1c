//! Mutable state of one graph traversal
//!
//! The visited set, the node arena and the demotion list live here and are threaded through the
//! traversal explicitly, so concurrent generations never share anything.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use super::cancellation::CancellationSignal;
use super::demotion_reason::{Demotion, DemotionReason};
use super::types::{
    NodeId, OpenParameter, PointingSetter, SetterDescriptor, SetterKind, TypeGraph, TypeKey,
    TypeNode,
};
use crate::error::Result;

/// State owned by one graph build
#[derive(Debug)]
pub struct TraversalContext {
    visited:      HashSet<TypeKey>,
    nodes:        Vec<TypeNode>,
    index:        HashMap<TypeKey, NodeId>,
    demotions:    Vec<Demotion>,
    cancellation: CancellationSignal,
    max_depth:    usize,
}

impl TraversalContext {
    /// Empty state for one run
    pub fn new(cancellation: CancellationSignal, max_depth: usize) -> Self {
        Self {
            visited: HashSet::new(),
            nodes: Vec::new(),
            index: HashMap::new(),
            demotions: Vec::new(),
            cancellation,
            max_depth,
        }
    }

    /// Fails with `Cancelled` once the signal fired
    pub fn check_cancelled(&self) -> Result<()> {
        self.cancellation.check()
    }

    /// Whether `key` already has a node or is being built
    pub fn is_visited(&self, key: &TypeKey) -> bool {
        self.visited.contains(key)
    }

    /// Returns false if `key` was already visited
    pub fn mark_visited(&mut self, key: TypeKey) -> bool {
        self.visited.insert(key)
    }

    /// Whether `depth` is past the configured limit
    pub const fn exceeds_depth(&self, depth: usize) -> bool {
        depth > self.max_depth
    }

    /// Push a node into the arena; non-root nodes are registered under their key
    pub fn allocate_node(&mut self, mut node: TypeNode) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        node.id = id;
        if !node.is_root {
            self.index.insert(node.key.clone(), id);
        }
        self.nodes.push(node);
        id
    }

    /// Attach classified setters to an allocated node
    pub fn set_setters(&mut self, id: NodeId, setters: Vec<SetterDescriptor>) {
        if let Some(node) = self.nodes.get_mut(id.index()) {
            node.setters = setters;
        }
    }

    /// Record a demotion and log it
    pub fn record_demotion(&mut self, demotion: Demotion) {
        warn!(
            owner = %demotion.owner,
            property = %demotion.property,
            target = %demotion.target,
            reason = %demotion.reason,
            "Nested builder demoted to value setter"
        );
        self.demotions.push(demotion);
    }

    /// Resolution pass: point every nested-builder setter at its target node and record the
    /// back-link on the target
    pub fn link_targets(&mut self) {
        let mut links = Vec::new();
        let mut unresolved = Vec::new();

        for node in &self.nodes {
            for (setter_index, setter) in node.setters.iter().enumerate() {
                if setter.demotion.is_some() {
                    continue;
                }
                let Some(key) = &setter.target_key else {
                    continue;
                };
                match self.index.get(key) {
                    Some(target) => links.push((node.id, setter_index, *target)),
                    None => unresolved.push((node.id, setter_index)),
                }
            }
        }

        for (owner, setter_index, target) in links {
            self.nodes[owner.index()].setters[setter_index].target = Some(target);
            self.nodes[target.index()].pointed_by.push(PointingSetter {
                node:   owner,
                setter: setter_index,
            });
            debug!(%owner, setter_index, %target, "Linked nested builder");
        }

        for (owner, setter_index) in unresolved {
            let node = &mut self.nodes[owner.index()];
            let setter = &mut node.setters[setter_index];
            setter.demotion = Some(DemotionReason::NotFound);
            if setter.kind == SetterKind::Object {
                setter.kind = SetterKind::Simple;
            }
            let demotion = Demotion {
                owner:    node.class_name.clone(),
                property: setter.property.clone(),
                target:   setter
                    .target_key
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
                reason:   DemotionReason::NotFound,
            };
            self.record_demotion(demotion);
        }
    }

    /// Finish the run, linking setters to their target nodes
    pub fn into_graph(self, root_parameters: Vec<OpenParameter>) -> TypeGraph {
        TypeGraph::new(self.nodes, self.index, self.demotions, root_parameters)
    }
}
