#![warn(missing_docs)]
//! `monto-lsp` - language-server glue for `monto-core`.
//!
//! The producer of products is a language server that pushes them with the custom
//! `monto/publishProduct` notification. This crate decodes that notification and routes it
//! into a [`monto_core::Session`], builds the settings payloads the server expects
//! (initialization options and `workspace/didChangeConfiguration`), and carries the helpers
//! behind the "function to verify" picker.

pub mod configuration;
pub mod error;
pub mod publish;
pub mod uri;
pub mod verified;

pub use configuration::{
    DID_CHANGE_CONFIGURATION_METHOD, config_from_did_change, did_change_configuration,
    initialization_options, json_rpc_notification,
};
pub use error::PublishError;
pub use publish::{
    PUBLISH_PRODUCT_METHOD, decode_publish_notification, decode_publish_product,
    route_notification,
};
pub use uri::{path_to_source_uri, source_uri_to_path};
pub use verified::{FUNCTION_SYMBOL_KIND, FunctionChoice, function_choices, set_verified_function};
