use thiserror::Error;

/// Unified error type for fingerpick
#[derive(Error, Debug)]
pub enum FingerpickError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type FingerpickResult<T> = Result<T, FingerpickError>;
