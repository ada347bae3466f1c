use thiserror::Error;

// Error message prefixes
const MSG_INVALID_PREFIX: &str = "Invalid";
const MSG_FAILED_TO_PREFIX: &str = "Failed to";

/// Result type for the `fluent_builder_core` library
pub type Result<T> = std::result::Result<T, error_stack::Report<Error>>;

/// Everything that can stop a generation run
///
/// `UnresolvableNestedType` is the only kind that is normally recovered: the graph builder turns
/// it into a demotion and keeps going. Every other kind aborts the run and no source is produced.
#[derive(Error)]
pub enum Error {
    /// A signature string does not follow the JDT grammar
    #[error("Malformed type signature '{signature}': {reason}")]
    MalformedSignature {
        /// Offending signature text
        signature: String,
        /// Why parsing failed
        reason:    String,
    },

    /// A collection-family type without exactly one type argument
    #[error("Unsupported collection shape for {type_name}: expected 1 type argument, found {found}")]
    UnsupportedCollectionShape {
        /// Collection type name
        type_name: String,
        /// Number of type arguments found
        found:     usize,
    },

    /// Substitution was requested for a type outside the inheritance chain
    #[error("{ancestor} is not an ancestor of {class}")]
    NotAnAncestor {
        /// Class whose chain was searched
        class:    String,
        /// Type that is not in the chain
        ancestor: String,
    },

    /// A nested builder target cannot be built; recovered as a demotion
    #[error("Nested type {target} of {owner}.{property} cannot be built: {reason}")]
    UnresolvableNestedType {
        /// Class declaring the setter
        owner:    String,
        /// Property whose target failed
        property: String,
        /// Type that could not be built
        target:   String,
        /// Human readable cause
        reason:   String,
    },

    /// The type model could not answer a query
    #[error("Type model provider failed: {0}")]
    ModelProviderFailure(String),

    /// The requested root class is not in the type model
    #[error("Root type not found in the type model: {0}")]
    UnknownRootType(String),

    /// An explicit mutator reference matches no method
    #[error("Mutator {owner}.{method_name} not found in the type model")]
    UnknownMutator {
        /// Class expected to declare the mutator
        owner:       String,
        /// Referenced method name
        method_name: String,
    },

    /// Naming prefixes are empty, not identifiers, or not distinct
    #[error("Invalid naming convention: {0}")]
    InvalidNamingConvention(String),

    /// A caller-supplied name or type is unusable
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Two generated members would share one name
    #[error(
        "Generated method '{method}' in {builder} is produced by both '{first}' and '{second}'"
    )]
    MethodNameCollision {
        /// Generated class holding the clash
        builder: String,
        /// Clashing member name
        method:  String,
        /// Origin that claimed the name first
        first:   String,
        /// Origin that claimed it again
        second:  String,
    },

    /// The cancellation signal fired
    #[error("Generation cancelled")]
    Cancelled,
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedSignature { signature, reason } => f
                .debug_struct("MalformedSignature")
                .field("signature", signature)
                .field("reason", reason)
                .finish(),
            Self::UnsupportedCollectionShape { type_name, found } => f
                .debug_struct("UnsupportedCollectionShape")
                .field("type_name", type_name)
                .field("found", found)
                .finish(),
            Self::NotAnAncestor { class, ancestor } => f
                .debug_struct("NotAnAncestor")
                .field("class", class)
                .field("ancestor", ancestor)
                .finish(),
            Self::UnresolvableNestedType {
                owner,
                property,
                target,
                reason,
            } => f
                .debug_struct("UnresolvableNestedType")
                .field("owner", owner)
                .field("property", property)
                .field("target", target)
                .field("reason", reason)
                .finish(),
            Self::ModelProviderFailure(s) => f.debug_tuple("ModelProviderFailure").field(s).finish(),
            Self::UnknownRootType(s) => f.debug_tuple("UnknownRootType").field(s).finish(),
            Self::UnknownMutator { owner, method_name } => f
                .debug_struct("UnknownMutator")
                .field("owner", owner)
                .field("method_name", method_name)
                .finish(),
            Self::InvalidNamingConvention(s) => {
                f.debug_tuple("InvalidNamingConvention").field(s).finish()
            }
            Self::InvalidArgument(s) => f.debug_tuple("InvalidArgument").field(s).finish(),
            Self::MethodNameCollision {
                builder,
                method,
                first,
                second,
            } => f
                .debug_struct("MethodNameCollision")
                .field("builder", builder)
                .field("method", method)
                .field("first", first)
                .field("second", second)
                .finish(),
            Self::Cancelled => f.write_str("Cancelled"),
        }
    }
}

impl Error {
    /// Create a `MalformedSignature` error for the given signature text
    pub fn malformed(signature: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::MalformedSignature {
            signature: signature.into(),
            reason:    reason.to_string(),
        }
    }

    /// Create an "Invalid X" error
    pub fn invalid(what: &str, details: impl std::fmt::Display) -> Self {
        Self::InvalidArgument(format!("{MSG_INVALID_PREFIX} {what}: {details}"))
    }

    /// Create a provider error for a failed model operation
    pub fn provider_failed(action: &str, details: impl std::fmt::Display) -> Self {
        Self::ModelProviderFailure(format!("{MSG_FAILED_TO_PREFIX} {action}: {details}"))
    }
}
