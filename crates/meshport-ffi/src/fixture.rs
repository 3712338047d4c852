//! Binary-compatible scenes built in Rust memory, plus an importer that
//! serves them. Lets everything above the native call run without
//! libassimp.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::ffi::{c_char, CStr};

use crate::flags::ProcessingFlags;
use crate::importer::SceneImporter;
use crate::layout::{
    ForeignAabb, ForeignColor4, ForeignMesh, ForeignScene, ForeignString, ForeignVector3, Real,
    MAX_COLOR_SETS, MAX_STRING_LEN, MAX_TEXTURE_COORDS,
};
use crate::scene::{MeshRef, SceneRef};

/// Description of one mesh. Array lengths are checked against the vertex
/// count so the built record never over-reports.
#[derive(Debug, Clone, Default)]
pub struct MeshFixture {
    name: String,
    num_vertices: u32,
    positions: Option<Vec<ForeignVector3>>,
    normals: Option<Vec<ForeignVector3>>,
    uv_channels: [Option<Vec<ForeignVector3>>; MAX_TEXTURE_COORDS],
    uv_components: [u32; MAX_TEXTURE_COORDS],
    color_channels: [Option<Vec<ForeignColor4>>; MAX_COLOR_SETS],
}

fn vectors(values: impl IntoIterator<Item = [Real; 3]>) -> Vec<ForeignVector3> {
    values
        .into_iter()
        .map(|[x, y, z]| ForeignVector3::new(x, y, z))
        .collect()
}

impl MeshFixture {
    pub fn new(name: &str, positions: impl IntoIterator<Item = [Real; 3]>) -> Self {
        let positions = vectors(positions);
        Self {
            name: name.to_string(),
            num_vertices: positions.len() as u32,
            positions: Some(positions),
            ..Default::default()
        }
    }

    /// A mesh that reports `num_vertices` but has a null position array.
    pub fn without_positions(name: &str, num_vertices: u32) -> Self {
        Self {
            name: name.to_string(),
            num_vertices,
            ..Default::default()
        }
    }

    pub fn with_normals(mut self, normals: impl IntoIterator<Item = [Real; 3]>) -> Self {
        let normals = vectors(normals);
        assert_eq!(normals.len(), self.num_vertices as usize, "normal count");
        self.normals = Some(normals);
        self
    }

    pub fn with_uv_channel(mut self, index: usize, uvs: impl IntoIterator<Item = [Real; 2]>) -> Self {
        let uvs = vectors(uvs.into_iter().map(|[u, v]| [u, v, 0.0]));
        assert_eq!(uvs.len(), self.num_vertices as usize, "uv count");
        self.uv_channels[index] = Some(uvs);
        self.uv_components[index] = 2;
        self
    }

    pub fn with_color_channel(
        mut self,
        index: usize,
        colors: impl IntoIterator<Item = [Real; 4]>,
    ) -> Self {
        let colors: Vec<ForeignColor4> = colors
            .into_iter()
            .map(|[r, g, b, a]| ForeignColor4 { r, g, b, a })
            .collect();
        assert_eq!(colors.len(), self.num_vertices as usize, "color count");
        self.color_channels[index] = Some(colors);
        self
    }

    fn record(&mut self) -> ForeignMesh {
        fn ptr_of<T>(v: &mut Option<Vec<T>>) -> *mut T {
            v.as_mut()
                .map_or(std::ptr::null_mut(), |v| v.as_mut_ptr())
        }

        let mut name = ForeignString::default();
        let bytes = &self.name.as_bytes()[..self.name.len().min(MAX_STRING_LEN)];
        for (dst, &src) in name.data.iter_mut().zip(bytes) {
            *dst = src as c_char;
        }
        name.length = bytes.len() as u32;

        ForeignMesh {
            primitive_types: 0x4,
            num_vertices: self.num_vertices,
            num_faces: self.num_vertices / 3,
            vertices: ptr_of(&mut self.positions),
            normals: ptr_of(&mut self.normals),
            tangents: std::ptr::null_mut(),
            bitangents: std::ptr::null_mut(),
            colors: std::array::from_fn(|i| ptr_of(&mut self.color_channels[i])),
            texture_coords: std::array::from_fn(|i| ptr_of(&mut self.uv_channels[i])),
            num_uv_components: self.uv_components,
            faces: std::ptr::null_mut(),
            num_bones: 0,
            bones: std::ptr::null_mut(),
            material_index: 0,
            name,
            num_anim_meshes: 0,
            anim_meshes: std::ptr::null_mut(),
            method: 0,
            aabb: ForeignAabb::default(),
        }
    }
}

/// Description of a scene: an ordered list of meshes.
#[derive(Debug, Clone, Default)]
pub struct SceneFixture {
    meshes: Vec<MeshFixture>,
}

impl SceneFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mesh(mut self, mesh: MeshFixture) -> Self {
        self.meshes.push(mesh);
        self
    }

    /// Lay the scene out in memory.
    pub fn build(mut self) -> OwnedScene {
        let mut records: Vec<ForeignMesh> = self.meshes.iter_mut().map(MeshFixture::record).collect();
        let mut mesh_ptrs: Vec<*mut ForeignMesh> = records
            .iter_mut()
            .map(|m| m as *mut ForeignMesh)
            .collect();

        let scene = Box::new(ForeignScene {
            flags: 0,
            root_node: std::ptr::null_mut(),
            num_meshes: mesh_ptrs.len() as u32,
            meshes: if mesh_ptrs.is_empty() {
                std::ptr::null_mut()
            } else {
                mesh_ptrs.as_mut_ptr()
            },
            num_materials: 0,
            materials: std::ptr::null_mut(),
            num_animations: 0,
            animations: std::ptr::null_mut(),
            num_textures: 0,
            textures: std::ptr::null_mut(),
            num_lights: 0,
            lights: std::ptr::null_mut(),
            num_cameras: 0,
            cameras: std::ptr::null_mut(),
            metadata: std::ptr::null_mut(),
        });

        OwnedScene {
            scene: Box::into_raw(scene),
            _mesh_ptrs: mesh_ptrs,
            _records: records,
            _storage: self.meshes,
        }
    }
}

/// A scene laid out in Rust-owned memory. The record pointers stay valid
/// for as long as this value lives.
#[derive(Debug)]
pub struct OwnedScene {
    scene: *mut ForeignScene,
    _mesh_ptrs: Vec<*mut ForeignMesh>,
    _records: Vec<ForeignMesh>,
    _storage: Vec<MeshFixture>,
}

impl OwnedScene {
    pub fn as_ptr(&self) -> *const ForeignScene {
        self.scene
    }

    pub fn scene(&self) -> SceneRef<'_> {
        // SAFETY: every pointer in the layout refers to storage owned by self.
        unsafe { SceneRef::from_raw(self.scene) }.expect("fixture scene is never null")
    }

    pub fn mesh(&self, index: usize) -> MeshRef<'_> {
        self.scene().mesh(index).expect("fixture mesh index")
    }
}

impl Drop for OwnedScene {
    fn drop(&mut self) {
        // SAFETY: allocated with Box::into_raw in `build`.
        drop(unsafe { Box::from_raw(self.scene) });
    }
}

/// Serves [`SceneFixture`]s by path and tracks what was asked of it.
#[derive(Debug, Default)]
pub struct FixtureImporter {
    scenes: HashMap<String, SceneFixture>,
    live: RefCell<HashMap<usize, OwnedScene>>,
    requests: RefCell<Vec<(String, ProcessingFlags)>>,
    released: Cell<usize>,
}

impl FixtureImporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scene to be returned for `path`. Unknown paths import
    /// as null.
    pub fn with_scene(mut self, path: impl Into<String>, scene: SceneFixture) -> Self {
        self.scenes.insert(path.into(), scene);
        self
    }

    /// Every `(path, flags)` pair passed to `import`, in call order.
    pub fn requests(&self) -> Vec<(String, ProcessingFlags)> {
        self.requests.borrow().clone()
    }

    /// Scenes imported and not yet released.
    pub fn live_scenes(&self) -> usize {
        self.live.borrow().len()
    }

    /// Number of successful releases.
    pub fn released(&self) -> usize {
        self.released.get()
    }
}

// SAFETY: returned scenes are owned by `live` until released.
unsafe impl SceneImporter for FixtureImporter {
    fn import(&self, path: &CStr, flags: ProcessingFlags) -> *const ForeignScene {
        let path = path.to_string_lossy().into_owned();
        self.requests.borrow_mut().push((path.clone(), flags));

        match self.scenes.get(&path) {
            Some(fixture) => {
                let owned = fixture.clone().build();
                let ptr = owned.as_ptr();
                self.live.borrow_mut().insert(ptr as usize, owned);
                ptr
            }
            None => std::ptr::null(),
        }
    }

    unsafe fn release(&self, scene: *const ForeignScene) {
        if self.live.borrow_mut().remove(&(scene as usize)).is_some() {
            self.released.set(self.released.get() + 1);
        }
    }
}
