use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use meshport_ffi::{ProcessingFlags, SceneImporter};

use crate::error::AssetError;
use crate::handle::MeshHandle;
use crate::import::import_scene;
use crate::mesh::MeshAsset;

/// Imports model files, extracts their meshes and caches the result.
///
/// Each scene is released as soon as its meshes are copied out; the
/// cache holds only owned vertex data.
pub struct AssetServer<I: SceneImporter> {
    importer: I,
    base_path: PathBuf,
    flags: ProcessingFlags,
    meshes: HashMap<MeshHandle, MeshAsset>,
    loaded: HashMap<(PathBuf, ProcessingFlags), Vec<MeshHandle>>,
}

impl<I: SceneImporter> AssetServer<I> {
    /// Create a server rooted at `base_path` that imports with `flags`.
    pub fn new(importer: I, base_path: impl Into<PathBuf>, flags: ProcessingFlags) -> Self {
        let base_path = base_path.into();
        info!(
            "AssetServer created with base path: {}",
            base_path.display()
        );
        Self {
            importer,
            base_path,
            flags,
            meshes: HashMap::new(),
            loaded: HashMap::new(),
        }
    }

    /// Resolve a relative asset path against the base path.
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_path.join(path)
        }
    }

    /// Load every mesh in a model file. A file with no meshes yields an
    /// empty list. Loading the same path with the same flags again
    /// returns the cached handles.
    pub fn load_meshes(&mut self, path: &Path) -> Result<Vec<MeshHandle>, AssetError> {
        let full_path = self.resolve(path);
        let key = (full_path, self.flags);

        if let Some(handles) = self.loaded.get(&key) {
            debug!("Cache hit for '{}'", key.0.display());
            return Ok(handles.clone());
        }

        if !key.0.exists() {
            return Err(AssetError::NotFound(key.0));
        }

        let assets = import_scene(&self.importer, &key.0, self.flags)?.extract_all()?;

        let handles: Vec<MeshHandle> = assets
            .into_iter()
            .map(|asset| {
                let handle = MeshHandle::next();
                self.meshes.insert(handle, asset);
                handle
            })
            .collect();

        self.loaded.insert(key, handles.clone());
        Ok(handles)
    }

    /// Load the first mesh of a model file.
    pub fn load_mesh(&mut self, path: &Path) -> Result<MeshHandle, AssetError> {
        self.load_meshes(path)?
            .first()
            .copied()
            .ok_or_else(|| AssetError::NoMeshes(self.resolve(path)))
    }

    /// Get a reference to a loaded mesh by its handle.
    pub fn get_mesh(&self, handle: MeshHandle) -> Option<&MeshAsset> {
        self.meshes.get(&handle)
    }

    /// Check if a handle refers to a loaded mesh.
    pub fn is_loaded(&self, handle: MeshHandle) -> bool {
        self.meshes.contains_key(&handle)
    }

    /// Processing steps requested for subsequent imports.
    pub fn flags(&self) -> ProcessingFlags {
        self.flags
    }

    /// Change the processing steps. Already cached meshes are kept and
    /// stay keyed by the flags they were imported with.
    pub fn set_flags(&mut self, flags: ProcessingFlags) {
        self.flags = flags;
    }

    pub fn importer(&self) -> &I {
        &self.importer
    }

    /// The base path this server resolves relative paths against.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}
