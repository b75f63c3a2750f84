use thiserror::Error;

/// Why an [`AspirantConfig`](crate::AspirantConfig) could not be produced.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A TOML file or `ASPIRANT_*` variable did not fit the schema.
    #[error("failed to read aspirant config: {0}")]
    Figment(#[from] figment::Error),

    /// The config parsed but a value would only fail later, at request time.
    #[error("{field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
