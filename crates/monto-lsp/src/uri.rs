//! Filesystem paths and source identities.
//!
//! Servers and editors address source files by `file://` uri; tools that drive a session from
//! the command line start from paths.

use monto_core::SourceUri;
use std::fs;
use std::path::{Path, PathBuf};

/// Source identity of the file at `path`.
///
/// The path is canonicalized when it exists, so relative paths and symlinks resolve to the
/// identity the server will use.
pub fn path_to_source_uri(path: &Path) -> SourceUri {
    let abs = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let mut path_str = abs.to_string_lossy().to_string();

    if cfg!(windows) {
        path_str = path_str.replace('\\', "/");
    }
    SourceUri::from_path(&path_str)
}

/// Filesystem path of a source identity.
pub fn source_uri_to_path(source: &SourceUri) -> PathBuf {
    let mut path_str = source.path().to_string();

    // `/C:/...` -> `C:/...`
    if cfg!(windows) {
        if path_str.starts_with('/') && path_str.get(2..3) == Some(":") {
            path_str.remove(0);
        }
        path_str = path_str.replace('/', "\\");
    }

    PathBuf::from(path_str)
}
