//! meshport FFI - Binary contract with the native asset importer
//!
//! Mirrors the importer's scene records with `#[repr(C)]` types and
//! provides bounds-checked views for reading them without copying.
//! Nothing in this crate frees foreign memory; that is the importer's job
//! via [`SceneImporter::release`].

mod channel;
mod error;
mod flags;
mod importer;
pub mod layout;
mod scene;
mod view;

#[cfg(any(test, feature = "fixture"))]
pub mod fixture;

pub use channel::first_populated;
pub use error::ViewError;
pub use flags::ProcessingFlags;
#[cfg(feature = "assimp")]
pub use importer::Assimp;
pub use importer::SceneImporter;
pub use layout::{ForeignColor4, ForeignMesh, ForeignScene, ForeignVector3, Real};
pub use scene::{MeshRef, SceneRef, UvChannel};
pub use view::ForeignArrayView;
