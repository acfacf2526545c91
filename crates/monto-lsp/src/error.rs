use monto_core::MontoError;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors raised while handling messages from the product server.
pub enum PublishError {
    #[error("message has no method")]
    /// The message is not a JSON-RPC notification.
    MissingMethod,

    #[error("unexpected method: {0}")]
    /// The notification is not a product publication.
    UnexpectedMethod(String),

    #[error("invalid product: {0}")]
    /// The params do not decode into a product.
    InvalidProduct(#[from] serde_json::Error),

    #[error(transparent)]
    /// A settings payload does not decode into a session configuration.
    InvalidSettings(#[from] MontoError),
}
