//! The `monto/publishProduct` notification.
//!
//! The server pushes every product it derives as a notification whose params are the product
//! itself, in the producer's wire schema. Delivery order matters: products are routed into the
//! session in the order they arrive.

use crate::error::PublishError;
use monto_core::{Product, Session, TargetUri};
use serde_json::Value;

/// JSON-RPC method of the product notification.
pub const PUBLISH_PRODUCT_METHOD: &str = "monto/publishProduct";

/// Decode the params of a product notification.
pub fn decode_publish_product(params: &Value) -> Result<Product, PublishError> {
    Ok(serde_json::from_value(params.clone())?)
}

/// Decode a full JSON-RPC message that must be a product notification.
pub fn decode_publish_notification(msg: &Value) -> Result<Product, PublishError> {
    let method = msg
        .get("method")
        .and_then(Value::as_str)
        .ok_or(PublishError::MissingMethod)?;
    if method != PUBLISH_PRODUCT_METHOD {
        return Err(PublishError::UnexpectedMethod(method.to_string()));
    }
    decode_publish_product(msg.get("params").unwrap_or(&Value::Null))
}

/// Route an inbound server message into `session`.
///
/// Returns `Ok(Some(target))` if the message was a product notification and was stored,
/// `Ok(None)` if the message is not one this crate handles (requests, responses, other
/// notifications). A product notification whose params do not decode is an error.
pub fn route_notification(
    session: &mut Session,
    msg: &Value,
) -> Result<Option<TargetUri>, PublishError> {
    if msg.get("id").is_some() {
        return Ok(None);
    }
    match msg.get("method").and_then(Value::as_str) {
        Some(PUBLISH_PRODUCT_METHOD) => {}
        _ => return Ok(None),
    }

    let product = decode_publish_notification(msg).inspect_err(|err| {
        tracing::warn!(error = %err, "rejected product notification");
    })?;
    Ok(Some(session.save_product(product)))
}
