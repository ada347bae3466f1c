//! Generation entry points: type model in, Java source out

use tracing::info;

use crate::constants::{DEFAULT_BUILDER_TYPE_NAME, MAX_TRAVERSAL_DEPTH};
use crate::emitter::{BuilderNamingConvention, emit, validate_package, validate_type_name};
use crate::error::Result;
use crate::graph::{
    CancellationSignal, Demotion, GraphOptions, MutatorRef, MutatorSource, TypeGraphBuilder,
};
use crate::type_model::TypeModelProvider;
use crate::type_name::TypeName;

/// Everything one generation run needs besides the type model
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Class the builder constructs
    pub root:              TypeName,
    /// Package of the generated unit; empty for the default package
    pub target_package:    String,
    /// Simple name of the generated outer class
    pub builder_type_name: String,
    /// Discovered or explicitly listed mutators
    pub mutators:          MutatorSource,
    /// Prefixes of the generated methods
    pub naming:            BuilderNamingConvention,
    /// Skip setters without a matching getter
    pub require_getter:    bool,
    /// Nesting depth after which targets are demoted
    pub max_depth:         usize,
    /// Checked between node visits
    pub cancellation:      CancellationSignal,
}

impl GenerationRequest {
    /// Discover mutators of `root`, default names, default package
    pub fn new(root: impl Into<TypeName>) -> Self {
        Self {
            root:              root.into(),
            target_package:    String::new(),
            builder_type_name: DEFAULT_BUILDER_TYPE_NAME.to_string(),
            mutators:          MutatorSource::Discover,
            naming:            BuilderNamingConvention::default(),
            require_getter:    false,
            max_depth:         MAX_TRAVERSAL_DEPTH,
            cancellation:      CancellationSignal::new(),
        }
    }

    /// Emit into `target_package`
    #[must_use]
    pub fn in_package(mut self, target_package: impl Into<String>) -> Self {
        self.target_package = target_package.into();
        self
    }

    /// Name the generated outer class
    #[must_use]
    pub fn named(mut self, builder_type_name: impl Into<String>) -> Self {
        self.builder_type_name = builder_type_name.into();
        self
    }

    /// Use exactly these mutators instead of discovering them
    #[must_use]
    pub fn with_mutators(mut self, mutators: Vec<MutatorRef>) -> Self {
        self.mutators = MutatorSource::Explicit(mutators);
        self
    }

    /// Replace the default `with` / `withAdded` / `end` naming
    #[must_use]
    pub fn with_naming(mut self, naming: BuilderNamingConvention) -> Self {
        self.naming = naming;
        self
    }

    /// Only treat setters with a getter as mutators
    #[must_use]
    pub const fn requiring_getters(mut self, require_getter: bool) -> Self {
        self.require_getter = require_getter;
        self
    }

    /// Limit nesting depth
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Share a cancellation signal with the caller
    #[must_use]
    pub fn with_cancellation(mut self, cancellation: CancellationSignal) -> Self {
        self.cancellation = cancellation;
        self
    }
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    /// The Java compilation unit
    pub source:    String,
    /// Setters that lost their nested builder, in discovery order
    pub demotions: Vec<Demotion>,
}

/// Runs the graph builder and the emitter against one type model
pub struct BuilderGenerator<'a> {
    provider: &'a dyn TypeModelProvider,
}

impl<'a> BuilderGenerator<'a> {
    /// Generator over `provider`
    pub const fn new(provider: &'a dyn TypeModelProvider) -> Self {
        Self { provider }
    }

    /// Generate the builder source for `request`
    ///
    /// Output names are validated before the type model is touched. Any failure leaves no output
    /// behind; demotions do not fail the run and are returned alongside the source.
    pub fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutput> {
        validate_package(&request.target_package)?;
        validate_type_name(&request.builder_type_name)?;

        info!(
            root = %request.root,
            package = %request.target_package,
            builder = %request.builder_type_name,
            "Generating builder"
        );

        let options = GraphOptions {
            require_getter: request.require_getter,
            max_depth:      request.max_depth,
            cancellation:   request.cancellation.clone(),
        };
        let graph = TypeGraphBuilder::new(self.provider, options)
            .build(&request.root, &request.mutators)
            .map_err(|report| report.attach(format!("Building type graph for {}", request.root)))?;

        request.cancellation.check()?;
        let source = emit(
            &graph,
            &request.target_package,
            &request.builder_type_name,
            &request.naming,
        )
        .map_err(|report| report.attach(format!("Emitting builder for {}", request.root)))?;

        info!(
            root = %request.root,
            types = graph.len(),
            demotions = graph.demotions().len(),
            "Builder generated"
        );
        Ok(GenerationOutput {
            source,
            demotions: graph.demotions().to_vec(),
        })
    }
}

/// Generate builder source in one call
///
/// `mutators` of `None` discovers every mutator of the root and of each nested type; `Some`
/// restricts generation to the listed mutators. The three naming strings are validated first.
pub fn generate_source(
    provider: &dyn TypeModelProvider,
    root_type: &str,
    target_package: &str,
    builder_type_name: &str,
    mutators: Option<&[MutatorRef]>,
    set_prefix: &str,
    add_prefix: &str,
    end_suffix: &str,
) -> Result<String> {
    let naming = BuilderNamingConvention::new(set_prefix, add_prefix, end_suffix)?;
    let mut request = GenerationRequest::new(root_type)
        .in_package(target_package)
        .named(builder_type_name)
        .with_naming(naming);
    if let Some(mutators) = mutators {
        request = request.with_mutators(mutators.to_vec());
    }

    Ok(BuilderGenerator::new(provider).generate(&request)?.source)
}
