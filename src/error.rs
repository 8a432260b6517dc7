
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VersemapError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Rule source error: {0}")]
    Source(String),
    #[error("Parse error: {message}")]
    Parse { message: String, line: Option<usize> },
}

pub type Result<T> = std::result::Result<T, VersemapError>;

// Helper conversions
impl From<std::io::Error> for VersemapError {
    fn from(e: std::io::Error) -> Self { Self::Source(e.to_string()) }
}
impl From<config::ConfigError> for VersemapError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
