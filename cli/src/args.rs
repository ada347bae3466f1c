use std::path::PathBuf;

use clap::Parser;

use crate::support::tracing::TracingLevel;

/// Generate a fluent Java builder from a JSON type model
#[derive(Debug, Clone, Parser)]
#[command(name = "fluent-builder", version, about, long_about = None)]
pub struct Args {
    /// JSON type model describing the classes visible to the generator
    #[arg(long, short, value_name = "FILE", env = "FLUENT_BUILDER_MODEL")]
    pub model: PathBuf,

    /// Fully qualified name of the class to build
    #[arg(long, short, value_name = "CLASS")]
    pub root: String,

    /// Package of the generated class; empty for the default package
    #[arg(long, short, value_name = "PACKAGE")]
    pub package: Option<String>,

    /// Simple name of the generated outer class
    #[arg(long, value_name = "NAME")]
    pub builder_name: Option<String>,

    #[arg(long, value_name = "PREFIX")]
    pub set_prefix: Option<String>,

    #[arg(long, value_name = "PREFIX")]
    pub add_prefix: Option<String>,

    #[arg(long, value_name = "PREFIX")]
    pub end_suffix: Option<String>,

    /// JSON list of mutators to generate; every mutator is discovered when omitted
    #[arg(long, value_name = "FILE")]
    pub mutators: Option<PathBuf>,

    /// Write the generated source here instead of stdout
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// JSON file with generator defaults; flags take precedence
    #[arg(long, short, value_name = "FILE", env = "FLUENT_BUILDER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only treat setters with a matching getter as mutators
    #[arg(long)]
    pub require_getter: bool,

    /// Nesting depth at which nested builders are no longer generated
    #[arg(long, value_name = "DEPTH")]
    pub max_depth: Option<usize>,

    /// Fail when any nested builder had to be replaced by a plain setter
    #[arg(long)]
    pub deny_demotions: bool,

    /// error, warn, info, debug or trace
    #[arg(long, value_name = "LEVEL", default_value = "warn", env = "FLUENT_BUILDER_LOG")]
    pub log_level: TracingLevel,

    /// Write diagnostics to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "test code")]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_arguments() {
        let args =
            Args::try_parse_from(["fluent-builder", "--model", "model.json", "-r", "a.B"]).unwrap();

        assert_eq!(args.model, PathBuf::from("model.json"));
        assert_eq!(args.root, "a.B");
        assert_eq!(args.package, None);
        assert_eq!(args.log_level, TracingLevel::Warn);
        assert!(!args.require_getter);
        assert!(!args.deny_demotions);
    }

    #[test]
    fn test_full_arguments() {
        let args = Args::try_parse_from([
            "fluent-builder",
            "-m",
            "model.json",
            "--root",
            "a.B",
            "--package",
            "builders",
            "--builder-name",
            "Builders",
            "--set-prefix",
            "set",
            "--add-prefix",
            "add",
            "--end-suffix",
            "done",
            "--max-depth",
            "4",
            "--require-getter",
            "--deny-demotions",
            "--log-level",
            "DEBUG",
        ])
        .unwrap();

        assert_eq!(args.package.as_deref(), Some("builders"));
        assert_eq!(args.builder_name.as_deref(), Some("Builders"));
        assert_eq!(args.end_suffix.as_deref(), Some("done"));
        assert_eq!(args.max_depth, Some(4));
        assert_eq!(args.log_level, TracingLevel::Debug);
        assert!(args.require_getter);
        assert!(args.deny_demotions);
    }

    #[test]
    fn test_root_is_required() {
        assert!(Args::try_parse_from(["fluent-builder", "--model", "model.json"]).is_err());
    }

    #[test]
    fn test_bad_log_level_is_rejected() {
        assert!(
            Args::try_parse_from([
                "fluent-builder",
                "-m",
                "model.json",
                "-r",
                "a.B",
                "--log-level",
                "loud",
            ])
            .is_err()
        );
    }
}
