//! `#[repr(C)]` mirrors of the native importer's scene records.
//!
//! Field order, scalar widths and fixed array capacities must match the
//! compiled library exactly. Nothing here can detect a mismatch at runtime:
//! a library built with a different version or precision setting yields
//! garbage reads, not errors.
//!
//! Fields this crate never reads are still declared so that the offsets of
//! the fields it does read come out right.

use std::borrow::Cow;
use std::ffi::{c_char, c_uint};

/// Scalar type of vector and color components.
#[cfg(not(feature = "single-precision"))]
pub type Real = f64;
#[cfg(feature = "single-precision")]
pub type Real = f32;

/// Maximum number of indices per face.
pub const MAX_FACE_INDICES: u32 = 0x7fff;
/// Maximum number of bone weights.
pub const MAX_BONE_WEIGHTS: u32 = 0x7fff_ffff;
/// Maximum number of vertices per mesh.
pub const MAX_VERTICES: u32 = 0x7fff_ffff;
/// Maximum number of faces per mesh.
pub const MAX_FACES: u32 = 0x7fff_ffff;
/// Capacity of the per-vertex color channel array.
pub const MAX_COLOR_SETS: usize = 0x8;
/// Capacity of the per-vertex texture coordinate channel array.
pub const MAX_TEXTURE_COORDS: usize = 0x8;
/// Byte capacity of an inline foreign string.
pub const MAX_STRING_LEN: usize = 1024;

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ForeignVector3 {
    pub x: Real,
    pub y: Real,
    pub z: Real,
}

impl ForeignVector3 {
    pub const fn new(x: Real, y: Real, z: Real) -> Self {
        Self { x, y, z }
    }

    /// Narrow to single precision.
    pub fn to_f32(self) -> [f32; 3] {
        [self.x as f32, self.y as f32, self.z as f32]
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ForeignColor4 {
    pub r: Real,
    pub g: Real,
    pub b: Real,
    pub a: Real,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ForeignAabb {
    pub min: ForeignVector3,
    pub max: ForeignVector3,
}

/// Length-prefixed inline string.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct ForeignString {
    pub length: u32,
    pub data: [c_char; MAX_STRING_LEN],
}

impl ForeignString {
    /// Decode as UTF-8, replacing invalid sequences. A length past the
    /// buffer capacity is clamped.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        let len = (self.length as usize).min(MAX_STRING_LEN);
        // SAFETY: c_char and u8 have the same size and alignment.
        let bytes = unsafe { std::slice::from_raw_parts(self.data.as_ptr().cast::<u8>(), len) };
        String::from_utf8_lossy(bytes)
    }
}

impl Default for ForeignString {
    fn default() -> Self {
        Self {
            length: 0,
            data: [0; MAX_STRING_LEN],
        }
    }
}

impl std::fmt::Debug for ForeignString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ForeignString")
            .field(&self.to_string_lossy())
            .finish()
    }
}

macro_rules! opaque_records {
    ($($(#[$meta:meta])* $name:ident;)*) => {
        $(
            $(#[$meta])*
            #[repr(C)]
            pub struct $name {
                _private: [u8; 0],
            }
        )*
    };
}

opaque_records! {
    /// Face index list. Only ever handled by pointer.
    ForeignFace;
    ForeignBone;
    ForeignAnimMesh;
    ForeignNode;
    ForeignMaterial;
    ForeignAnimation;
    ForeignTexture;
    ForeignLight;
    ForeignCamera;
    ForeignMetadata;
}

/// One mesh of an imported scene. Owned by the scene; never freed directly.
#[repr(C)]
pub struct ForeignMesh {
    pub primitive_types: c_uint,
    pub num_vertices: c_uint,
    pub num_faces: c_uint,
    pub vertices: *mut ForeignVector3,
    pub normals: *mut ForeignVector3,
    pub tangents: *mut ForeignVector3,
    pub bitangents: *mut ForeignVector3,
    pub colors: [*mut ForeignColor4; MAX_COLOR_SETS],
    pub texture_coords: [*mut ForeignVector3; MAX_TEXTURE_COORDS],
    pub num_uv_components: [c_uint; MAX_TEXTURE_COORDS],
    pub faces: *mut ForeignFace,
    pub num_bones: c_uint,
    pub bones: *mut *mut ForeignBone,
    pub material_index: c_uint,
    pub name: ForeignString,
    pub num_anim_meshes: c_uint,
    pub anim_meshes: *mut *mut ForeignAnimMesh,
    pub method: c_uint,
    pub aabb: ForeignAabb,
}

/// Root of an imported scene. Only `num_meshes`/`meshes` are read.
#[repr(C)]
pub struct ForeignScene {
    pub flags: c_uint,
    pub root_node: *mut ForeignNode,
    pub num_meshes: c_uint,
    pub meshes: *mut *mut ForeignMesh,
    pub num_materials: c_uint,
    pub materials: *mut *mut ForeignMaterial,
    pub num_animations: c_uint,
    pub animations: *mut *mut ForeignAnimation,
    pub num_textures: c_uint,
    pub textures: *mut *mut ForeignTexture,
    pub num_lights: c_uint,
    pub lights: *mut *mut ForeignLight,
    pub num_cameras: c_uint,
    pub cameras: *mut *mut ForeignCamera,
    pub metadata: *mut ForeignMetadata,
}

impl std::fmt::Debug for ForeignMesh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForeignMesh")
            .field("name", &self.name)
            .field("num_vertices", &self.num_vertices)
            .field("num_faces", &self.num_faces)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for ForeignScene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForeignScene")
            .field("flags", &self.flags)
            .field("num_meshes", &self.num_meshes)
            .finish_non_exhaustive()
    }
}
