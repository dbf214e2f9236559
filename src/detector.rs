use std::path::Path;

/// File name that marks an npm lockfile. Matched exactly, never sniffed.
pub const LOCKFILE_NAME: &str = "package-lock.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    /// `package.json` style: `dependencies` / `devDependencies` name → constraint maps.
    Manifest,
    /// `package-lock.json` with nested resolved `dependencies`.
    Lockfile,
}

/// Decide how to parse a document from its file identifier.
///
/// Only the base name is compared, so `some/dir/package-lock.json` is a lockfile
/// while `package-lock.backup.json` is not.
pub fn detect_kind(file_identifier: &str) -> ManifestKind {
    let base = Path::new(file_identifier)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(file_identifier);

    if base == LOCKFILE_NAME {
        ManifestKind::Lockfile
    } else {
        ManifestKind::Manifest
    }
}
