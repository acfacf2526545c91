//! Source and target document identities.
//!
//! A product is shown in a document whose uri encodes where it came from:
//!
//! ```text
//! monto:<source path>|<name>.<language>
//! ```
//!
//! The part after the scheme doubles as the product's *name* in the tree index, and stripping
//! everything from the `|` separator onward recovers the source path.

use crate::error::MontoError;
use std::fmt;

/// Uri scheme of documents that display products.
pub const PRODUCT_SCHEME: &str = "monto";

/// Separator between the source path and the product file name.
pub const PRODUCT_SEPARATOR: char = '|';

/// Percent-encode a path for use in a `file://` uri.
///
/// Keeps URI-safe bytes and percent-encodes the rest.
pub fn percent_encode_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for &b in path.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

/// Percent-decode a uri path component. Malformed escapes are kept verbatim.
pub fn percent_decode_path(path: &str) -> String {
    fn hex_val(b: u8) -> Option<u8> {
        match b {
            b'0'..=b'9' => Some(b - b'0'),
            b'a'..=b'f' => Some(b - b'a' + 10),
            b'A'..=b'F' => Some(b - b'A' + 10),
            _ => None,
        }
    }

    let bytes = path.as_bytes();
    let mut out = Vec::<u8>::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%'
            && i + 2 < bytes.len()
            && let (Some(hi), Some(lo)) = (hex_val(bytes[i + 1]), hex_val(bytes[i + 2]))
        {
            out.push((hi << 4) | lo);
            i += 3;
            continue;
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&out).to_string()
}

/// Returns `true` if `uri` names a product document.
pub fn is_product_uri(uri: &str) -> bool {
    uri.strip_prefix(PRODUCT_SCHEME)
        .is_some_and(|rest| rest.starts_with(':'))
}

/// Normalized identity of a source document.
///
/// `file:/a.c`, `file:///a.c`, `file://localhost/a.c` and the plain path `/a.c` all normalize
/// to `file:///a.c`, so identities coming from the producer and from the editor compare equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceUri {
    uri: String,
    path: String,
}

impl SourceUri {
    /// Normalize a `file:` uri or an absolute path.
    pub fn parse(raw: &str) -> Self {
        let path = match raw.strip_prefix("file:") {
            Some(rest) => match rest.strip_prefix("//") {
                Some(after_slashes) => {
                    let path_start = after_slashes.find('/').unwrap_or(after_slashes.len());
                    &after_slashes[path_start..]
                }
                None => rest,
            },
            None => raw,
        };
        Self::from_path(&percent_decode_path(path))
    }

    /// Build the identity of the document at a (decoded) filesystem path.
    pub fn from_path(path: &str) -> Self {
        let path = if path.starts_with('/') || path.is_empty() {
            path.to_string()
        } else {
            format!("/{path}")
        };
        Self {
            uri: format!("file://{}", percent_encode_path(&path)),
            path,
        }
    }

    /// Canonical `file://` uri string.
    pub fn as_str(&self) -> &str {
        &self.uri
    }

    /// Decoded path component.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for SourceUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

/// Identity of one logical product stream: `(source, name, language)`.
///
/// This is the key of the product store; two products with the same target uri are versions
/// of the same artifact.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TargetUri(String);

impl TargetUri {
    /// Target uri of the product `name` in `language` derived from `source`.
    pub fn new(source: &SourceUri, name: &str, language: &str) -> Self {
        Self(format!(
            "{PRODUCT_SCHEME}:{}{PRODUCT_SEPARATOR}{name}.{language}",
            source.path()
        ))
    }

    /// Parse a product document uri.
    ///
    /// Parsing is strict: the producer is trusted, so a uri without the product scheme or
    /// without the separator is reported instead of guessed at.
    pub fn parse(raw: &str) -> Result<Self, MontoError> {
        let Some(name) = raw
            .strip_prefix(PRODUCT_SCHEME)
            .and_then(|rest| rest.strip_prefix(':'))
        else {
            return Err(MontoError::MalformedTargetUri(raw.to_string()));
        };
        if !name.contains(PRODUCT_SEPARATOR) {
            return Err(MontoError::MalformedTargetUri(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    /// Full uri string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Product name: `<source path>|<name>.<language>`.
    pub fn product_name(&self) -> &str {
        &self.0[PRODUCT_SCHEME.len() + 1..]
    }

    /// Path of the originating source document.
    pub fn source_path(&self) -> &str {
        let name = self.product_name();
        match name.find(PRODUCT_SEPARATOR) {
            Some(index) => &name[..index],
            None => name,
        }
    }

    /// Identity of the originating source document.
    pub fn source_uri(&self) -> SourceUri {
        SourceUri::from_path(self.source_path())
    }

    /// Path segments used by the tree index.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.product_name().split(PRODUCT_SEPARATOR)
    }
}

impl fmt::Display for TargetUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
