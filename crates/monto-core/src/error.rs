use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced at the boundaries of the product session.
///
/// Lookups inside the session are total and never fail; these variants only report input that
/// breaks the producer or host contract.
pub enum MontoError {
    #[error("malformed product uri '{0}': expected 'monto:<path>|<name>.<language>'")]
    /// A product document uri lacks the product scheme or the path/name separator.
    MalformedTargetUri(String),

    #[error("invalid settings: {0}")]
    /// The host settings object could not be deserialized.
    InvalidConfig(#[from] serde_json::Error),
}
