//! Settings payloads exchanged with the product server.
//!
//! The server receives the whole settings object twice: as initialization options when it
//! starts, and in `workspace/didChangeConfiguration` whenever the user changes it.

use crate::error::PublishError;
use monto_core::SessionConfig;
use serde_json::Value;

/// JSON-RPC method of the configuration change notification.
pub const DID_CHANGE_CONFIGURATION_METHOD: &str = "workspace/didChangeConfiguration";

/// Build a JSON-RPC 2.0 notification.
pub fn json_rpc_notification(method: &str, params: Value) -> Value {
    let mut obj = serde_json::Map::new();
    obj.insert("jsonrpc".to_string(), Value::String("2.0".to_string()));
    obj.insert("method".to_string(), Value::String(method.to_string()));
    obj.insert("params".to_string(), params);
    Value::Object(obj)
}

/// `initializationOptions` for the server's `initialize` request.
pub fn initialization_options(config: &SessionConfig) -> Value {
    config.to_settings()
}

/// `workspace/didChangeConfiguration` notification carrying `config`.
pub fn did_change_configuration(config: &SessionConfig) -> Value {
    let mut params = serde_json::Map::new();
    params.insert("settings".to_string(), config.to_settings());
    json_rpc_notification(DID_CHANGE_CONFIGURATION_METHOD, Value::Object(params))
}

/// Read the settings out of `workspace/didChangeConfiguration` params.
///
/// Missing settings yield the defaults.
pub fn config_from_did_change(params: &Value) -> Result<SessionConfig, PublishError> {
    let settings = params.get("settings").unwrap_or(&Value::Null);
    Ok(SessionConfig::from_settings(settings)?)
}
