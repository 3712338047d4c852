use std::path::PathBuf;

use meshport_ffi::ViewError;

/// Errors that can occur during scene import and mesh extraction.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(PathBuf),

    #[error("import failed for '{0}'")]
    ImportFailed(PathBuf),

    #[error("path '{0}' cannot be passed to the importer")]
    InvalidPath(PathBuf),

    #[error("scene '{0}' contains no meshes")]
    NoMeshes(PathBuf),

    #[error("malformed foreign data: {0}")]
    View(#[from] ViewError),
}
