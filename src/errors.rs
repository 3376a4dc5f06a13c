use thiserror::Error;

pub type Result<T> = std::result::Result<T, BoonsError>;

/// Errors raised by the crate itself.
///
/// Failures coming out of a wrapped source or a user-supplied stringifier
/// are never converted into this type; adapters hand them back as-is.
#[derive(Error, Debug)]
pub enum BoonsError {
    #[error("Bound must not be negative, got {0}")]
    NegativeBound(i64),
    #[error("Config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for BoonsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}
