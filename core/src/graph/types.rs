//! Node, setter and graph types produced by the graph builder

use std::collections::HashMap;
use std::fmt::Display;

use strum::{AsRefStr, Display as StrumDisplay};

use super::demotion_reason::{Demotion, DemotionReason};
use crate::signature::{CollectionElement, TypeSignature};
use crate::type_name::TypeName;

/// Index of a node in the graph arena; the root is always `NodeId(0)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The root node
    pub const ROOT: Self = Self(0);

    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position in the arena
    pub const fn index(self) -> usize {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of a buildable type: its instance signature rendered as Java
///
/// `MyData2<String>` and `MyData2<Integer>` are different identities, `List<? extends X>` and
/// `List<X>` are the same.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey(String);

impl TypeKey {
    /// Identity as text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&TypeSignature> for TypeKey {
    fn from(signature: &TypeSignature) -> Self {
        Self(signature.instance_signature().java_source())
    }
}

impl Display for TypeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a mutator is exposed on the generated builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, AsRefStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum SetterKind {
    /// Value setter only
    Simple,
    /// Value setter plus a nested builder
    Object,
    /// Whole-collection setter plus element accumulators
    Collection,
}

/// One mutator of a node after substitution and classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetterDescriptor {
    /// Mutator name without `set`: `setFirstName` gives `FirstName`
    pub property:      String,
    /// Mutator invoked on the instance
    pub method_name:   String,
    /// Parameter type with the owner's generic bindings applied
    pub declared_type: TypeSignature,
    /// Simple, object or collection
    pub kind:          SetterKind,
    /// Element description for `Collection` setters
    pub element:       Option<CollectionElement>,
    /// Checked exceptions of the mutator, substituted like the parameter
    pub exceptions:    Vec<TypeSignature>,
    /// Identity of the type a nested builder would build
    pub target_key:    Option<TypeKey>,
    /// Node of that type, filled by the resolution pass
    pub target:        Option<NodeId>,
    /// Set when a nested builder was dropped for this setter
    pub demotion:      Option<DemotionReason>,
}

impl SetterDescriptor {
    pub(crate) const fn new(
        property: String,
        method_name: String,
        declared_type: TypeSignature,
        kind: SetterKind,
        exceptions: Vec<TypeSignature>,
    ) -> Self {
        Self {
            property,
            method_name,
            declared_type,
            kind,
            element: None,
            exceptions,
            target_key: None,
            target: None,
            demotion: None,
        }
    }

    /// The type a nested builder for this setter builds: the parameter type for `Object`, the
    /// element type for `Collection`
    pub fn nested_type(&self) -> Option<&TypeSignature> {
        match self.kind {
            SetterKind::Object => Some(&self.declared_type),
            SetterKind::Collection => self.element.as_ref().map(|element| &element.element),
            SetterKind::Simple => None,
        }
    }

    /// Whether a nested builder is offered for this setter
    pub const fn has_nested_builder(&self) -> bool {
        self.target.is_some()
    }
}

/// A setter on another node whose nested builder builds this node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointingSetter {
    /// Node owning the setter
    pub node:   NodeId,
    /// Index into that node's `setters`
    pub setter: usize,
}

/// A root type parameter that stays open in the generated builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenParameter {
    /// Parameter name as declared on the root
    pub name:   String,
    /// Declared bounds, resolved
    pub bounds: Vec<TypeSignature>,
}

/// One buildable type of a generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeNode {
    /// Position in the arena
    pub id:              NodeId,
    /// Type identity
    pub key:             TypeKey,
    /// Declaring class
    pub class_name:      TypeName,
    /// Signature instances are created with (`testpkg.Generic<java.lang.String>`)
    pub signature:       TypeSignature,
    /// In mutator order
    pub setters:         Vec<SetterDescriptor>,
    /// Setters whose nested builder builds this node
    pub pointed_by:      Vec<PointingSetter>,
    /// Root type parameters this node's signature mentions, in root declaration order
    pub open_parameters: Vec<String>,
    /// Only node 0
    pub is_root:         bool,
}

/// Arena of the buildable types reachable from one root
#[derive(Debug, Clone)]
pub struct TypeGraph {
    nodes:           Vec<TypeNode>,
    index:           HashMap<TypeKey, NodeId>,
    demotions:       Vec<Demotion>,
    root_parameters: Vec<OpenParameter>,
}

impl TypeGraph {
    pub(crate) const fn new(
        nodes: Vec<TypeNode>,
        index: HashMap<TypeKey, NodeId>,
        demotions: Vec<Demotion>,
        root_parameters: Vec<OpenParameter>,
    ) -> Self {
        Self {
            nodes,
            index,
            demotions,
            root_parameters,
        }
    }

    /// The root node
    pub fn root(&self) -> &TypeNode {
        &self.nodes[NodeId::ROOT.index()]
    }

    /// Node by id
    pub fn node(&self, id: NodeId) -> Option<&TypeNode> {
        self.nodes.get(id.index())
    }

    /// All nodes, root first, then in discovery order
    pub fn nodes(&self) -> &[TypeNode] {
        &self.nodes
    }

    /// Every node except the root
    pub fn map_nodes(&self) -> impl Iterator<Item = &TypeNode> {
        self.nodes.iter().filter(|node| !node.is_root)
    }

    /// Node registered for a type identity; the root is never registered
    pub fn lookup(&self, key: &TypeKey) -> Option<&TypeNode> {
        self.index.get(key).and_then(|id| self.node(*id))
    }

    /// Demoted setters in discovery order
    pub fn demotions(&self) -> &[Demotion] {
        &self.demotions
    }

    /// Open formal parameters of the root type with their resolved bounds
    pub fn root_parameters(&self) -> &[OpenParameter] {
        &self.root_parameters
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false for a built graph
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
