use glam::Vec3;
use tracing::debug;

use meshport_core::to_render_space;
use meshport_ffi::{ForeignVector3, MeshRef};

use crate::error::AssetError;
use crate::mesh::VertexBufferData;

/// Copy one foreign mesh's vertex attributes into an owned buffer.
///
/// Positions are converted to render space; normals and texture
/// coordinates are copied unchanged. Missing normals or UVs yield empty
/// sequences. A malformed array (null positions with vertices present)
/// fails the whole extraction rather than producing a partial buffer.
pub fn extract_vertex_buffer(mesh: MeshRef<'_>) -> Result<VertexBufferData, AssetError> {
    let count = mesh.num_vertices();
    if count == 0 {
        debug!("Mesh '{}' has no vertices", mesh.name());
        return Ok(VertexBufferData::default());
    }

    let positions: Vec<[f32; 3]> = mesh
        .positions()?
        .map(|v| to_render_space(vec3(v)).to_array())
        .collect();

    let normals: Vec<[f32; 3]> = mesh
        .normals()
        .map(|view| view.map(|n| n.to_f32()).collect())
        .unwrap_or_default();

    let uv_channel = mesh.uv_channel();
    let tex_coords: Vec<[f32; 2]> = uv_channel
        .map(|channel| {
            channel
                .coords
                .map(|uv| [uv.x as f32, uv.y as f32])
                .collect()
        })
        .unwrap_or_default();

    if let Some((index, _)) = mesh.color_channel() {
        debug!(
            "Mesh '{}' has vertex colors in channel {}; not extracted",
            mesh.name(),
            index
        );
    }

    debug!(
        "Extracted mesh '{}': {} vertices, normals: {}, uv channel: {:?}",
        mesh.name(),
        positions.len(),
        !normals.is_empty(),
        uv_channel.map(|c| c.index)
    );

    Ok(VertexBufferData {
        positions,
        normals,
        tex_coords,
        colors: None,
    })
}

fn vec3(v: &ForeignVector3) -> Vec3 {
    Vec3::from_array(v.to_f32())
}
