//! meshport Assets - Scene import and vertex extraction
//!
//! Imports a model file through a [`SceneImporter`](meshport_ffi::SceneImporter),
//! copies mesh attributes into owned [`VertexBufferData`], and caches the
//! results in an [`AssetServer`].

mod error;
mod extract;
mod handle;
mod import;
mod mesh;
mod server;
mod vertex;

pub use error::AssetError;
pub use extract::extract_vertex_buffer;
pub use handle::MeshHandle;
pub use import::{import_scene, SceneHandle};
pub use mesh::{MeshAsset, VertexBufferData};
pub use server::AssetServer;
pub use vertex::Vertex;
