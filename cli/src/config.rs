//! Generator defaults loaded from an optional JSON file and overlaid with command line flags

use std::path::Path;

use error_stack::ResultExt;
use fluent_builder_core::constants::{
    DEFAULT_ADD_PREFIX, DEFAULT_BUILDER_TYPE_NAME, DEFAULT_END_SUFFIX, DEFAULT_SET_PREFIX,
    MAX_TRAVERSAL_DEPTH,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::args::Args;
use crate::error::{CliError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub target_package:    String,
    pub builder_type_name: String,
    pub set_prefix:        String,
    pub add_prefix:        String,
    pub end_suffix:        String,
    pub require_getter:    bool,
    pub max_depth:         usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            target_package:    String::new(),
            builder_type_name: DEFAULT_BUILDER_TYPE_NAME.to_string(),
            set_prefix:        DEFAULT_SET_PREFIX.to_string(),
            add_prefix:        DEFAULT_ADD_PREFIX.to_string(),
            end_suffix:        DEFAULT_END_SUFFIX.to_string(),
            require_getter:    false,
            max_depth:         MAX_TRAVERSAL_DEPTH,
        }
    }
}

impl GeneratorConfig {
    /// Read `path`, or fall back to the defaults when no file is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path)
            .change_context(CliError::FileRead(path.display().to_string()))?;
        let config: Self = serde_json::from_str(&text)
            .change_context(CliError::Configuration(path.display().to_string()))?;

        debug!(path = %path.display(), ?config, "Loaded generator config");
        Ok(config)
    }

    /// Flags given on the command line replace file values
    #[must_use]
    pub fn with_overrides(mut self, args: &Args) -> Self {
        if let Some(package) = &args.package {
            self.target_package.clone_from(package);
        }
        if let Some(name) = &args.builder_name {
            self.builder_type_name.clone_from(name);
        }
        if let Some(prefix) = &args.set_prefix {
            self.set_prefix.clone_from(prefix);
        }
        if let Some(prefix) = &args.add_prefix {
            self.add_prefix.clone_from(prefix);
        }
        if let Some(suffix) = &args.end_suffix {
            self.end_suffix.clone_from(suffix);
        }
        if let Some(depth) = args.max_depth {
            self.max_depth = depth;
        }
        self.require_getter |= args.require_getter;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "test code")]
mod tests {
    use std::io::Write;

    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;

    fn config_file(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_path_uses_defaults() {
        let config = GeneratorConfig::load(None).unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.set_prefix, "with");
        assert_eq!(config.add_prefix, "withAdded");
        assert_eq!(config.end_suffix, "end");
    }

    #[test]
    fn test_partial_file_keeps_remaining_defaults() {
        let file = config_file(r#"{ "target_package": "builders", "end_suffix": "done" }"#);
        let config = GeneratorConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.target_package, "builders");
        assert_eq!(config.end_suffix, "done");
        assert_eq!(config.set_prefix, DEFAULT_SET_PREFIX);
        assert_eq!(config.max_depth, MAX_TRAVERSAL_DEPTH);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let file = config_file(r#"{ "prefix": "with" }"#);
        let error = GeneratorConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(
            error.current_context(),
            CliError::Configuration(_)
        ));
    }

    #[test]
    fn test_unreadable_file_is_reported() {
        let directory = tempfile::tempdir().unwrap();
        let missing = directory.path().join("missing.json");
        let error = GeneratorConfig::load(Some(&missing)).unwrap_err();
        assert!(matches!(error.current_context(), CliError::FileRead(_)));
    }

    #[test]
    fn test_flags_override_file_values() {
        let file = config_file(
            r#"{ "target_package": "from.file", "set_prefix": "set", "require_getter": true }"#,
        );
        let args = Args::try_parse_from([
            "fluent-builder",
            "-m",
            "model.json",
            "-r",
            "a.B",
            "--package",
            "from.flag",
            "--max-depth",
            "3",
        ])
        .unwrap();

        let config = GeneratorConfig::load(Some(file.path()))
            .unwrap()
            .with_overrides(&args);

        assert_eq!(config.target_package, "from.flag");
        assert_eq!(config.set_prefix, "set");
        assert_eq!(config.max_depth, 3);
        assert!(config.require_getter);
    }
}
