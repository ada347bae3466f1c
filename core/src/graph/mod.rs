//! Type graph of buildable types reachable from a root type

mod builder;
mod cancellation;
mod demotion_reason;
mod mutators;
mod traversal_context;
mod types;


pub use self::builder::{GraphOptions, TypeGraphBuilder};
pub use self::cancellation::CancellationSignal;
pub use self::demotion_reason::{Demotion, DemotionReason};
pub use self::mutators::{
    MutatorRef, MutatorSource, SelectedMutator, find_mutators, resolve_mutator_target_type,
};
pub use self::types::{
    NodeId, OpenParameter, PointingSetter, SetterDescriptor, SetterKind, TypeGraph, TypeKey,
    TypeNode,
};
