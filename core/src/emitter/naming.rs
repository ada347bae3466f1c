//! Naming of generated builder methods

use error_stack::Report;

use crate::constants::{
    DEFAULT_ADD_PREFIX, DEFAULT_END_SUFFIX, DEFAULT_SET_PREFIX, is_java_identifier,
};
use crate::error::{Error, Result};

/// Prefixes used to name generated methods
///
/// `{set}{Property}` assigns a value or opens a nested builder, `{add}{Singular}` appends a
/// collection element or opens an element builder, `{end}{Property}` closes a nested builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderNamingConvention {
    set_prefix: String,
    add_prefix: String,
    end_suffix: String,
}

impl BuilderNamingConvention {
    /// Validate and build a convention: non-empty Java identifiers, pairwise distinct
    pub fn new(
        set_prefix: impl Into<String>,
        add_prefix: impl Into<String>,
        end_suffix: impl Into<String>,
    ) -> Result<Self> {
        let convention = Self {
            set_prefix: set_prefix.into(),
            add_prefix: add_prefix.into(),
            end_suffix: end_suffix.into(),
        };

        for (role, value) in [
            ("set prefix", &convention.set_prefix),
            ("add prefix", &convention.add_prefix),
            ("end suffix", &convention.end_suffix),
        ] {
            if value.is_empty() {
                return Err(Report::new(Error::InvalidNamingConvention(format!(
                    "{role} must not be empty"
                ))));
            }
            if !is_java_identifier(value) {
                return Err(Report::new(Error::InvalidNamingConvention(format!(
                    "{role} '{value}' is not a valid Java identifier"
                ))));
            }
        }

        if convention.set_prefix == convention.add_prefix
            || convention.set_prefix == convention.end_suffix
            || convention.add_prefix == convention.end_suffix
        {
            return Err(Report::new(Error::InvalidNamingConvention(format!(
                "prefixes must be distinct: set '{}', add '{}', end '{}'",
                convention.set_prefix, convention.add_prefix, convention.end_suffix
            ))));
        }

        Ok(convention)
    }

    /// Prefix of value setters and nested builder openers
    pub fn set_prefix(&self) -> &str {
        &self.set_prefix
    }

    /// Prefix of collection adders
    pub fn add_prefix(&self) -> &str {
        &self.add_prefix
    }

    /// Prefix of the methods closing a nested builder
    pub fn end_suffix(&self) -> &str {
        &self.end_suffix
    }

    /// `withName` for property `Name`
    pub fn value_setter(&self, property: &str) -> String {
        format!("{}{property}", self.set_prefix)
    }

    /// `withAddedEmployee` for property `Employees`
    pub fn element_adder(&self, property: &str) -> String {
        format!("{}{}", self.add_prefix, singularize(property))
    }

    /// `endName` for property `Name`
    pub fn end_method(&self, property: &str) -> String {
        format!("{}{property}", self.end_suffix)
    }
}

impl Default for BuilderNamingConvention {
    fn default() -> Self {
        Self {
            set_prefix: DEFAULT_SET_PREFIX.to_string(),
            add_prefix: DEFAULT_ADD_PREFIX.to_string(),
            end_suffix: DEFAULT_END_SUFFIX.to_string(),
        }
    }
}

/// English singular of a plural property name
pub fn singularize(word: &str) -> String {
    const DROP_ES: [&str; 5] = ["sses", "xes", "ches", "shes", "zes"];

    if let Some(stem) = word.strip_suffix("ies")
        && !stem.is_empty()
    {
        return format!("{stem}y");
    }
    if DROP_ES.iter().any(|suffix| word.ends_with(suffix)) {
        return word[..word.len() - 2].to_string();
    }
    if word.ends_with("ss") || word.ends_with("us") {
        return word.to_string();
    }
    match word.strip_suffix('s') {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => word.to_string(),
    }
}
