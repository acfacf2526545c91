//! The "function to verify" picker.
//!
//! The user picks one function per source file from the document's symbols; the chosen name
//! is stored in the settings and sent to the server.

use monto_core::SessionConfig;
use serde_json::Value;

/// LSP `SymbolKind.Function`.
pub const FUNCTION_SYMBOL_KIND: u64 = 12;

const DECLARATION_MARKER: &str = "(declaration";

/// One entry of the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionChoice {
    /// Symbol name as shown (may include a parameter list).
    pub label: String,
    /// Symbol detail, if the server sent one.
    pub detail: Option<String>,
}

/// Function definitions in a `textDocument/documentSymbol` result.
///
/// Only top-level symbols are considered. Declarations (symbols whose name carries a
/// `(declaration` marker) are skipped.
pub fn function_choices(symbols: &Value) -> Vec<FunctionChoice> {
    let Some(arr) = symbols.as_array() else {
        return Vec::new();
    };

    arr.iter()
        .filter(|symbol| symbol.get("kind").and_then(Value::as_u64) == Some(FUNCTION_SYMBOL_KIND))
        .filter_map(|symbol| {
            let label = symbol.get("name").and_then(Value::as_str)?;
            if label.is_empty() || label.contains(DECLARATION_MARKER) {
                return None;
            }
            Some(FunctionChoice {
                label: label.to_string(),
                detail: symbol
                    .get("detail")
                    .and_then(Value::as_str)
                    .map(|s| s.to_string()),
            })
        })
        .collect()
}

/// Record `label` as the function to verify in `uri` and return the configuration change
/// notification to send to the server.
pub fn set_verified_function(config: &mut SessionConfig, uri: &str, label: &str) -> Value {
    let name = config.set_verified_function(uri, label).to_string();
    tracing::debug!(uri, name = %name, "selected function to verify");
    crate::configuration::did_change_configuration(config)
}
