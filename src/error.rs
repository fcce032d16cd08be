use thiserror::Error;

/// Errors reported before a clustering run starts.
///
/// Conditions that can occur *during* a run (empty clusters, hitting the iteration cap) are not
/// errors. They are recorded in the returned [`crate::KMeansState`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KMeansError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("point {index} has a non-finite coordinate")]
    NonFinitePoint { index: usize },
}

/// Convenient alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, KMeansError>;

impl KMeansError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        KMeansError::InvalidConfiguration(msg.into())
    }
}
