//! Conversions between media URIs and local paths

use std::path::{Path, PathBuf};

const FILE_SCHEME: &str = "file://";

/// Local filesystem path for a `file://` URI or plain path
pub fn local_path(uri: &str) -> PathBuf {
    PathBuf::from(uri.strip_prefix(FILE_SCHEME).unwrap_or(uri))
}

/// `file://` URI for a local path
pub fn file_uri(path: &Path) -> String {
    format!("{}{}", FILE_SCHEME, path.to_string_lossy())
}

/// Keys and asset ids may only name a single plain file
pub fn is_safe_file_stem(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}
