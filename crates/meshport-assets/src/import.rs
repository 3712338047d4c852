//! Running the native importer and holding on to what it returns.

use std::ffi::CString;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use meshport_ffi::{ForeignScene, ProcessingFlags, SceneImporter, SceneRef};

use crate::error::AssetError;
use crate::extract::extract_vertex_buffer;
use crate::mesh::{MeshAsset, VertexBufferData};

/// An imported scene. Released through its importer when dropped.
///
/// Extraction copies data out, so nothing obtained from a handle borrows
/// from it after the call returns.
pub struct SceneHandle<'i, I: SceneImporter + ?Sized> {
    importer: &'i I,
    raw: *const ForeignScene,
    path: PathBuf,
}

/// Import `path`, requesting every step in `flags`.
///
/// A null result from the importer becomes [`AssetError::ImportFailed`].
/// A scene with zero meshes is a success.
pub fn import_scene<'i, I: SceneImporter + ?Sized>(
    importer: &'i I,
    path: &Path,
    flags: ProcessingFlags,
) -> Result<SceneHandle<'i, I>, AssetError> {
    let c_path = path
        .to_str()
        .and_then(|s| CString::new(s).ok())
        .ok_or_else(|| AssetError::InvalidPath(path.to_path_buf()))?;

    let raw = importer.import(&c_path, flags);
    if raw.is_null() {
        warn!("Importer returned no scene for '{}'", path.display());
        return Err(AssetError::ImportFailed(path.to_path_buf()));
    }

    let handle = SceneHandle {
        importer,
        raw,
        path: path.to_path_buf(),
    };
    info!(
        "Imported '{}' (flags {:#x}): {} meshes",
        path.display(),
        flags.bits(),
        handle.num_meshes()
    );
    Ok(handle)
}

impl<'i, I: SceneImporter + ?Sized> SceneHandle<'i, I> {
    fn scene(&self) -> SceneRef<'_> {
        // SAFETY: `raw` is non-null and, per the SceneImporter contract,
        // valid until released in Drop.
        match unsafe { SceneRef::from_raw(self.raw) } {
            Some(scene) => scene,
            None => unreachable!("scene handle holds a null pointer"),
        }
    }

    /// The path this scene was imported from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn num_meshes(&self) -> usize {
        self.scene().num_meshes()
    }

    /// Name of mesh `index`.
    pub fn mesh_name(&self, index: usize) -> Result<String, AssetError> {
        Ok(self.scene().mesh(index)?.name().into_owned())
    }

    /// Extract mesh `index` into an owned vertex buffer.
    pub fn extract_mesh(&self, index: usize) -> Result<VertexBufferData, AssetError> {
        extract_vertex_buffer(self.scene().mesh(index)?)
    }

    /// Extract the first mesh, or `None` if the scene has none.
    pub fn extract_first(&self) -> Result<Option<VertexBufferData>, AssetError> {
        if self.num_meshes() == 0 {
            return Ok(None);
        }
        self.extract_mesh(0).map(Some)
    }

    /// Extract every mesh in scene order. Any failure aborts the batch.
    pub fn extract_all(&self) -> Result<Vec<MeshAsset>, AssetError> {
        self.scene()
            .meshes()?
            .into_iter()
            .map(|mesh| -> Result<MeshAsset, AssetError> {
                Ok(MeshAsset {
                    name: mesh.name().into_owned(),
                    vertices: extract_vertex_buffer(mesh)?,
                })
            })
            .collect()
    }
}

impl<I: SceneImporter + ?Sized> Drop for SceneHandle<'_, I> {
    fn drop(&mut self) {
        // SAFETY: `raw` came from this importer and is released only here.
        unsafe { self.importer.release(self.raw) };
    }
}

impl<I: SceneImporter + ?Sized> std::fmt::Debug for SceneHandle<'_, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneHandle")
            .field("path", &self.path)
            .field("num_meshes", &self.num_meshes())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshport_ffi::fixture::{FixtureImporter, MeshFixture, SceneFixture};
    use meshport_ffi::ViewError;

    fn fixture_model() -> SceneFixture {
        SceneFixture::new()
            .with_mesh(
                MeshFixture::new("body", [[0.0, 2.0, 0.0], [1.0, -3.0, 0.0], [0.0, 0.5, 1.0]])
                    .with_normals([[0.0, 0.0, 1.0]; 3])
                    .with_uv_channel(0, [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]),
            )
            .with_mesh(MeshFixture::new("wheel", [[4.0, 4.0, 4.0]; 3]))
    }

    fn render_flags() -> ProcessingFlags {
        ProcessingFlags::TRIANGULATE
            | ProcessingFlags::PRETRANSFORM_VERTICES
            | ProcessingFlags::FLIP_WINDING_ORDER
    }

    #[test]
    fn null_scene_is_import_failed_with_path() {
        let importer = FixtureImporter::new();
        let err = import_scene(&importer, Path::new("models/nope.fbx"), render_flags())
            .unwrap_err();
        match err {
            AssetError::ImportFailed(path) => assert_eq!(path, PathBuf::from("models/nope.fbx")),
            other => panic!("expected ImportFailed, got: {:?}", other),
        }
    }

    #[test]
    fn flags_are_passed_as_one_bitmask() {
        let importer = FixtureImporter::new().with_scene("car.obj", fixture_model());
        let _scene = import_scene(&importer, Path::new("car.obj"), render_flags()).unwrap();
        let requests = importer.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].1.bits(), 0x8 | 0x100 | 0x1000000);
    }

    #[test]
    fn empty_flag_set_still_imports() {
        let importer = FixtureImporter::new().with_scene("car.obj", fixture_model());
        let scene = import_scene(&importer, Path::new("car.obj"), ProcessingFlags::empty());
        assert!(scene.is_ok());
        assert_eq!(importer.requests()[0].1, ProcessingFlags::empty());
    }

    #[test]
    fn interior_nul_is_rejected_before_import() {
        let importer = FixtureImporter::new();
        let err = import_scene(&importer, Path::new("bad\0name.obj"), render_flags()).unwrap_err();
        assert!(matches!(err, AssetError::InvalidPath(_)));
        assert!(importer.requests().is_empty());
    }

    #[test]
    fn end_to_end_first_mesh_is_y_flipped() {
        let importer = FixtureImporter::new().with_scene("car.obj", fixture_model());
        let scene = import_scene(&importer, Path::new("car.obj"), render_flags()).unwrap();
        let data = scene.extract_first().unwrap().unwrap();

        let source_y = [2.0f32, -3.0, 0.5];
        assert!(!data.positions.is_empty());
        for (position, y) in data.positions.iter().zip(source_y) {
            assert_eq!(position[1], -y);
        }
        assert_eq!(data.normals.len(), 3);
        assert_eq!(data.tex_coords.len(), 3);
    }

    #[test]
    fn zero_mesh_scene_is_success() {
        let importer = FixtureImporter::new().with_scene("empty.obj", SceneFixture::new());
        let scene = import_scene(&importer, Path::new("empty.obj"), render_flags()).unwrap();
        assert_eq!(scene.num_meshes(), 0);
        assert!(scene.extract_first().unwrap().is_none());
        assert!(scene.extract_all().unwrap().is_empty());
    }

    #[test]
    fn mesh_index_past_count_is_out_of_bounds() {
        let importer = FixtureImporter::new().with_scene("car.obj", fixture_model());
        let scene = import_scene(&importer, Path::new("car.obj"), render_flags()).unwrap();
        let err = scene.extract_mesh(2).unwrap_err();
        assert!(matches!(
            err,
            AssetError::View(ViewError::OutOfBounds { index: 2, len: 2 })
        ));
    }

    #[test]
    fn extract_all_keeps_scene_order_and_names() {
        let importer = FixtureImporter::new().with_scene("car.obj", fixture_model());
        let scene = import_scene(&importer, Path::new("car.obj"), render_flags()).unwrap();
        let meshes = scene.extract_all().unwrap();
        let names: Vec<&str> = meshes.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["body", "wheel"]);
        assert_eq!(meshes[1].vertices.positions[0], [4.0, -4.0, 4.0]);
        assert_eq!(scene.mesh_name(1).unwrap(), "wheel");
    }

    #[test]
    fn extracted_data_outlives_the_scene() {
        let importer = FixtureImporter::new().with_scene("car.obj", fixture_model());
        let data = {
            let scene = import_scene(&importer, Path::new("car.obj"), render_flags()).unwrap();
            scene.extract_mesh(0).unwrap()
        };
        assert_eq!(importer.live_scenes(), 0);
        assert_eq!(importer.released(), 1);
        assert_eq!(data.positions[1], [1.0, 3.0, 0.0]);
    }
}

#[cfg(all(test, feature = "assimp"))]
mod native_tests {
    use super::*;
    use meshport_ffi::Assimp;
    use std::io::Write;

    const TRIANGLE_OBJ: &str = "v 0.0 1.0 0.0\nv -1.0 -1.0 0.0\nv 1.0 -1.0 0.0\n\
vn 0.0 0.0 1.0\nvt 0.5 1.0\nvt 0.0 0.0\nvt 1.0 0.0\nf 1/1/1 2/2/1 3/3/1\n";

    #[test]
    fn imports_obj_through_libassimp() {
        // The importer picks the loader by file extension.
        let mut file = tempfile::Builder::new().suffix(".obj").tempfile().unwrap();
        file.write_all(TRIANGLE_OBJ.as_bytes()).unwrap();
        file.flush().unwrap();

        let flags = ProcessingFlags::TRIANGULATE
            | ProcessingFlags::PRETRANSFORM_VERTICES
            | ProcessingFlags::FLIP_WINDING_ORDER;
        let scene = import_scene(&Assimp, file.path(), flags).unwrap();
        let data = scene.extract_first().unwrap().unwrap();
        drop(scene);

        assert_eq!(data.vertex_count(), 3);
        let mut ys: Vec<f32> = data.positions.iter().map(|p| p[1]).collect();
        ys.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(ys, vec![-1.0, 1.0, 1.0]);
    }

    #[test]
    fn missing_file_fails_import() {
        let err = import_scene(&Assimp, Path::new("/nonexistent/model.obj"), ProcessingFlags::empty())
            .unwrap_err();
        assert!(matches!(err, AssetError::ImportFailed(_)));
    }
}
