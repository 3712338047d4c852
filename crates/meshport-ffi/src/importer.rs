//! The seam between meshport and the native import entry point.

use std::ffi::CStr;

use crate::flags::ProcessingFlags;
use crate::layout::ForeignScene;

/// Something that turns a model file into a foreign scene.
///
/// # Safety
/// Implementors guarantee that a non-null pointer returned from
/// [`import`](SceneImporter::import) points to a fully initialized scene
/// that satisfies [`SceneRef::from_raw`](crate::SceneRef::from_raw) and
/// stays valid and unmodified until it is passed to
/// [`release`](SceneImporter::release).
pub unsafe trait SceneImporter {
    /// Import `path` with the given post-processing steps. Null signals
    /// failure; no further detail is available.
    fn import(&self, path: &CStr, flags: ProcessingFlags) -> *const ForeignScene;

    /// Free a scene returned by [`import`](SceneImporter::import).
    ///
    /// # Safety
    /// `scene` must come from this importer and must not have been
    /// released already. No reference into it may outlive this call.
    unsafe fn release(&self, scene: *const ForeignScene);
}

#[cfg(feature = "assimp")]
mod native {
    use std::ffi::{c_char, c_uint};

    use crate::layout::ForeignScene;

    #[link(name = "assimp")]
    extern "C" {
        pub fn aiImportFile(file: *const c_char, flags: c_uint) -> *const ForeignScene;
        pub fn aiReleaseImport(scene: *const ForeignScene);
    }
}

/// The system libassimp, linked at build time.
#[cfg(feature = "assimp")]
#[derive(Debug, Clone, Copy, Default)]
pub struct Assimp;

// SAFETY: aiImportFile returns either null or a scene that lives until
// aiReleaseImport, and the layout module mirrors its record types.
#[cfg(feature = "assimp")]
unsafe impl SceneImporter for Assimp {
    fn import(&self, path: &CStr, flags: ProcessingFlags) -> *const ForeignScene {
        // SAFETY: `path` is a valid NUL-terminated string for the call.
        unsafe { native::aiImportFile(path.as_ptr(), flags.bits()) }
    }

    unsafe fn release(&self, scene: *const ForeignScene) {
        native::aiReleaseImport(scene);
    }
}
