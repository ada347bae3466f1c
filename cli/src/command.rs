//! One generation run driven by command line arguments

use std::io::Write;
use std::path::Path;

use error_stack::{Report, ResultExt};
use fluent_builder_core::{
    BuilderGenerator, BuilderNamingConvention, GenerationOutput, GenerationRequest,
    InMemoryTypeModel, MutatorRef,
};
use tracing::{debug, info};

use crate::args::Args;
use crate::config::GeneratorConfig;
use crate::error::{CliError, Result};

/// Load inputs, generate, and write the source to `--output` or stdout
pub fn run(args: &Args) -> Result<()> {
    let output = generate(args)?;

    if let Some(path) = &args.output {
        std::fs::write(path, &output.source)
            .change_context(CliError::FileWrite(path.display().to_string()))?;
        info!(path = %path.display(), bytes = output.source.len(), "Builder written");
    } else {
        std::io::stdout()
            .lock()
            .write_all(output.source.as_bytes())
            .change_context(CliError::FileWrite("stdout".to_string()))?;
    }
    Ok(())
}

/// Everything up to, but not including, writing the output
pub fn generate(args: &Args) -> Result<GenerationOutput> {
    let config = GeneratorConfig::load(args.config.as_deref())?.with_overrides(args);

    let model_text = read_file(&args.model)?;
    let model = InMemoryTypeModel::from_json(&model_text)
        .map_err(|report| {
            report
                .change_context(CliError::Generation)
                .attach(format!("Type model: {}", args.model.display()))
        })?;
    info!(classes = model.len(), path = %args.model.display(), "Type model loaded");

    let naming =
        BuilderNamingConvention::new(&config.set_prefix, &config.add_prefix, &config.end_suffix)
            .change_context(CliError::Generation)?;

    let mut request = GenerationRequest::new(args.root.as_str())
        .in_package(&config.target_package)
        .named(&config.builder_type_name)
        .with_naming(naming)
        .requiring_getters(config.require_getter)
        .with_max_depth(config.max_depth);
    if let Some(path) = &args.mutators {
        request = request.with_mutators(load_mutators(path)?);
    }

    let output = BuilderGenerator::new(&model)
        .generate(&request)
        .change_context(CliError::Generation)?;

    for demotion in &output.demotions {
        debug!(
            owner = %demotion.owner,
            property = %demotion.property,
            target = %demotion.target,
            reason = %demotion.reason,
            "Nested builder replaced by a value setter"
        );
    }

    if args.deny_demotions && !output.demotions.is_empty() {
        let report = output.demotions.iter().fold(
            Report::new(CliError::DemotionsDenied(output.demotions.len())),
            |report, demotion| report.attach(demotion.to_error().to_string()),
        );
        return Err(report);
    }

    Ok(output)
}

/// Read a `[{ "owner": .., "method_name": .., "parameter_signatures": [..] }]` list
fn load_mutators(path: &Path) -> Result<Vec<MutatorRef>> {
    let text = read_file(path)?;
    let mutators: Vec<MutatorRef> = serde_json::from_str(&text)
        .change_context(CliError::MutatorList(path.display().to_string()))?;
    info!(count = mutators.len(), "Explicit mutator list loaded");
    Ok(mutators)
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).change_context(CliError::FileRead(path.display().to_string()))
}
