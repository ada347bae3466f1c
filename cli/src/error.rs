use thiserror::Error;

/// Result type for the `fluent-builder` command
pub type Result<T> = std::result::Result<T, error_stack::Report<CliError>>;

/// Failures of the command line front end; generator failures are attached below `Generation`
#[derive(Error)]
pub enum CliError {
    #[error("Failed to read {0}")]
    FileRead(String),

    #[error("Failed to write {0}")]
    FileWrite(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Invalid mutator list: {0}")]
    MutatorList(String),

    #[error("Builder generation failed")]
    Generation,

    #[error("Demotions are not allowed: {0} nested builder(s) could not be generated")]
    DemotionsDenied(usize),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl std::fmt::Debug for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileRead(s) => f.debug_tuple("FileRead").field(s).finish(),
            Self::FileWrite(s) => f.debug_tuple("FileWrite").field(s).finish(),
            Self::Configuration(s) => f.debug_tuple("Configuration").field(s).finish(),
            Self::MutatorList(s) => f.debug_tuple("MutatorList").field(s).finish(),
            Self::Generation => f.write_str("Generation"),
            Self::DemotionsDenied(n) => f.debug_tuple("DemotionsDenied").field(n).finish(),
            Self::Logging(s) => f.debug_tuple("Logging").field(s).finish(),
        }
    }
}
