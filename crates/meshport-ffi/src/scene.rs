//! Safe, read-only references into an imported scene.
//!
//! The unsafe step is constructing a [`SceneRef`] or [`MeshRef`] from a raw
//! pointer. After that, every array is read through a bounds-checked
//! [`ForeignArrayView`].

use std::borrow::Cow;

use crate::channel::first_populated;
use crate::error::ViewError;
use crate::layout::{ForeignColor4, ForeignMesh, ForeignScene, ForeignVector3};
use crate::view::ForeignArrayView;

/// Borrowed handle to one foreign mesh record.
#[derive(Debug, Clone, Copy)]
pub struct MeshRef<'a> {
    raw: &'a ForeignMesh,
}

/// The texture coordinate channel chosen for extraction.
#[derive(Debug, Clone, Copy)]
pub struct UvChannel<'a> {
    pub index: usize,
    /// Meaningful components per coordinate (1 to 3).
    pub components: u32,
    pub coords: ForeignArrayView<'a, ForeignVector3>,
}

impl<'a> MeshRef<'a> {
    /// # Safety
    /// `ptr` must be null or point to a mesh record whose non-null array
    /// pointers each cover `num_vertices` elements, all valid for `'a`.
    pub unsafe fn from_raw(ptr: *const ForeignMesh) -> Option<Self> {
        ptr.as_ref().map(|raw| Self { raw })
    }

    /// The underlying layout record.
    pub fn raw(&self) -> &'a ForeignMesh {
        self.raw
    }

    pub fn num_vertices(&self) -> usize {
        self.raw.num_vertices as usize
    }

    pub fn name(&self) -> Cow<'a, str> {
        self.raw.name.to_string_lossy()
    }

    /// Vertex positions. A null array with vertices present is an error.
    pub fn positions(&self) -> Result<ForeignArrayView<'a, ForeignVector3>, ViewError> {
        // SAFETY: upheld by `from_raw`.
        unsafe { ForeignArrayView::new(self.raw.vertices, self.num_vertices()) }
    }

    /// Vertex normals, or `None` when the mesh has none.
    pub fn normals(&self) -> Option<ForeignArrayView<'a, ForeignVector3>> {
        // SAFETY: upheld by `from_raw`.
        unsafe { ForeignArrayView::optional(self.raw.normals, self.num_vertices()) }
    }

    /// The lowest-indexed populated texture coordinate channel.
    pub fn uv_channel(&self) -> Option<UvChannel<'a>> {
        let index = first_populated(&self.raw.texture_coords)?;
        // SAFETY: upheld by `from_raw`; the slot is non-null.
        let coords = unsafe {
            ForeignArrayView::optional(self.raw.texture_coords[index], self.num_vertices())
        }?;
        Some(UvChannel {
            index,
            components: self.raw.num_uv_components[index],
            coords,
        })
    }

    /// The lowest-indexed populated vertex color channel.
    pub fn color_channel(&self) -> Option<(usize, ForeignArrayView<'a, ForeignColor4>)> {
        let index = first_populated(&self.raw.colors)?;
        // SAFETY: upheld by `from_raw`; the slot is non-null.
        let colors =
            unsafe { ForeignArrayView::optional(self.raw.colors[index], self.num_vertices()) }?;
        Some((index, colors))
    }
}

/// Borrowed handle to a foreign scene root.
#[derive(Debug, Clone, Copy)]
pub struct SceneRef<'a> {
    raw: &'a ForeignScene,
}

impl<'a> SceneRef<'a> {
    /// # Safety
    /// `ptr` must be null or point to a scene whose mesh pointer array
    /// holds `num_meshes` entries, each satisfying [`MeshRef::from_raw`],
    /// all valid for `'a`.
    pub unsafe fn from_raw(ptr: *const ForeignScene) -> Option<Self> {
        ptr.as_ref().map(|raw| Self { raw })
    }

    pub fn flags(&self) -> u32 {
        self.raw.flags
    }

    pub fn num_meshes(&self) -> usize {
        self.raw.num_meshes as usize
    }

    /// The scene's array of mesh pointers.
    pub fn mesh_ptrs(&self) -> Result<ForeignArrayView<'a, *mut ForeignMesh>, ViewError> {
        // SAFETY: upheld by `from_raw`.
        unsafe { ForeignArrayView::new(self.raw.meshes.cast_const(), self.num_meshes()) }
    }

    /// Mesh `index`, bounds-checked against `num_meshes`.
    pub fn mesh(&self, index: usize) -> Result<MeshRef<'a>, ViewError> {
        let ptr = *self.mesh_ptrs()?.get(index)?;
        // SAFETY: upheld by `from_raw`.
        unsafe { MeshRef::from_raw(ptr) }.ok_or(ViewError::NullElement { index })
    }

    /// Every mesh in order. Stops at the first unreadable entry.
    pub fn meshes(&self) -> Result<Vec<MeshRef<'a>>, ViewError> {
        (0..self.num_meshes()).map(|i| self.mesh(i)).collect()
    }
}
