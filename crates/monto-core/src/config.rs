//! Session settings read from the host's configuration.

use crate::error::MontoError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The function of a source file the producer should verify.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedFunction {
    /// Source document uri.
    pub uri: String,
    /// Function name (without parameter list).
    pub name: String,
}

/// Settings consumed by the session.
///
/// The host owns the settings; the session only reads them. Unknown keys are ignored and
/// missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionConfig {
    /// Drop a document's products as soon as it is edited.
    pub update_on_change: bool,
    /// Per-file function selected for verification.
    pub verified_functions: Vec<VerifiedFunction>,
}

impl SessionConfig {
    /// Read the settings object of the extension section.
    pub fn from_settings(settings: &Value) -> Result<Self, MontoError> {
        if settings.is_null() {
            return Ok(Self::default());
        }
        Ok(Self::deserialize(settings)?)
    }

    /// Settings object suitable for sending back to the host or the producer.
    pub fn to_settings(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Function selected for `uri`, if any.
    pub fn verified_function(&self, uri: &str) -> Option<&str> {
        self.verified_functions
            .iter()
            .find(|entry| entry.uri == uri)
            .map(|entry| entry.name.as_str())
    }

    /// Select the function shown as `label` (e.g. `main(int, char **)`) for `uri`.
    ///
    /// The name is the label up to its first `(`. An existing entry for `uri` is updated.
    pub fn set_verified_function(&mut self, uri: &str, label: &str) -> &str {
        let name = match label.find('(') {
            Some(index) => &label[..index],
            None => label,
        };

        let index = match self.verified_functions.iter().position(|e| e.uri == uri) {
            Some(index) => {
                self.verified_functions[index].name = name.to_string();
                index
            }
            None => {
                self.verified_functions.push(VerifiedFunction {
                    uri: uri.to_string(),
                    name: name.to_string(),
                });
                self.verified_functions.len() - 1
            }
        };
        &self.verified_functions[index].name
    }
}
