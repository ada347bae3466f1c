//! Recovered failures during graph construction
//!
//! A nested type that cannot be built does not fail the run. The setter that would have opened a
//! nested builder is demoted to a value-only setter and the reason is recorded here.

use std::fmt::Display;

use serde::Serialize;
use strum::AsRefStr;

use crate::error::Error;
use crate::type_name::TypeName;

/// Why a nested builder was not offered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, AsRefStr)]
#[serde(rename_all = "snake_case")]
pub enum DemotionReason {
    /// The target class is not in the type model
    NotFound,
    /// The target class is only available in compiled form
    BinaryOnly,
    /// Interface, abstract class, enum, or no default constructor
    NotInstantiable,
    /// Nesting went deeper than the configured traversal limit
    RecursionLimitExceeded,
    /// An explicit mutator list selects nothing on the target class
    NoSelectedMutators,
}

impl Display for DemotionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::NotFound => "type not found in the type model",
            Self::BinaryOnly => "type is binary only",
            Self::NotInstantiable => "type cannot be instantiated with a default constructor",
            Self::RecursionLimitExceeded => "traversal depth limit exceeded",
            Self::NoSelectedMutators => "no mutators selected for type",
        };
        write!(f, "{text}")
    }
}

/// One demoted setter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Demotion {
    /// Class declaring the setter
    pub owner:    TypeName,
    /// Property whose nested builder was dropped
    pub property: String,
    /// Java rendering of the type that could not be built
    pub target:   String,
    /// Why the target could not be built
    pub reason:   DemotionReason,
}

impl Demotion {
    /// The error this demotion stands in for, used when callers refuse partial results
    pub fn to_error(&self) -> Error {
        Error::UnresolvableNestedType {
            owner:    self.owner.to_string(),
            property: self.property.clone(),
            target:   self.target.clone(),
            reason:   self.reason.to_string(),
        }
    }
}

impl Display for Demotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{} -> {}: {}",
            self.owner, self.property, self.target, self.reason
        )
    }
}
