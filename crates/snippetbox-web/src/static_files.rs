//! Static asset serving from a configured directory

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use snippetbox_core::errors::{ExError, ExErrorKind};

use crate::translator::Outcome;

const OP: &str = "static_asset";

/// Read-only view of a directory of assets
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
}

impl StaticFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load a file by its path relative to the root
    ///
    /// # Errors
    /// * `NotFound` - path escapes the root, names a directory, or does not exist
    /// * `Io` - the file exists but could not be read
    pub fn load(&self, relative: &str) -> Result<Outcome, ExError> {
        let path = self.resolve(relative)?;

        if path.is_dir() {
            return Err(not_found(relative));
        }

        let bytes = fs::read(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => not_found(relative),
            _ => ExError::from(e)
                .with_op(OP)
                .with_entity_id(relative.to_string()),
        })?;

        Ok(Outcome::Asset {
            content_type: content_type_for(&path),
            bytes,
        })
    }

    /// Join a relative path onto the root, refusing anything but plain segments
    fn resolve(&self, relative: &str) -> Result<PathBuf, ExError> {
        if relative.is_empty() || relative.contains('\\') {
            return Err(not_found(relative));
        }

        let mut path = self.root.clone();
        for component in Path::new(relative).components() {
            match component {
                Component::Normal(segment) => path.push(segment),
                _ => return Err(not_found(relative)),
            }
        }
        // `components` silently drops interior `.` segments
        if relative.split('/').any(|s| s == "." || s.is_empty()) {
            return Err(not_found(relative));
        }

        Ok(path)
    }
}

fn not_found(relative: &str) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_op(OP)
        .with_entity_id(relative.to_string())
        .with_message("No such asset")
}

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("html") | Some("htm") => "text/html; charset=utf-8",
        Some("txt") => "text/plain; charset=utf-8",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    }
}
