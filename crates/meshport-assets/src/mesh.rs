use meshport_core::Color;

use crate::vertex::Vertex;

/// Per-vertex attributes copied out of one foreign mesh.
///
/// Owns all of its data; nothing here points into the imported scene.
/// Absent channels are empty: `normals` and `tex_coords` are either empty
/// or exactly as long as `positions`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexBufferData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub tex_coords: Vec<[f32; 2]>,
    /// Always `None` for now.
    pub colors: Option<Vec<Color>>,
}

impl VertexBufferData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    pub fn has_tex_coords(&self) -> bool {
        !self.tex_coords.is_empty()
    }

    /// Pack into one record per vertex. Missing normals and UVs become
    /// zero, missing colors become white.
    pub fn interleave(&self) -> Vec<Vertex> {
        self.positions
            .iter()
            .enumerate()
            .map(|(i, &position)| Vertex {
                position,
                normal: self.normals.get(i).copied().unwrap_or([0.0; 3]),
                uv: self.tex_coords.get(i).copied().unwrap_or([0.0; 2]),
                color: self
                    .colors
                    .as_ref()
                    .and_then(|c| c.get(i))
                    .copied()
                    .unwrap_or_default()
                    .to_array(),
            })
            .collect()
    }
}

/// A named mesh extracted from a scene.
#[derive(Debug, Clone)]
pub struct MeshAsset {
    pub name: String,
    pub vertices: VertexBufferData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interleave_fills_missing_channels() {
        let data = VertexBufferData {
            positions: vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]],
            ..Default::default()
        };
        let vertices = data.interleave();
        assert_eq!(vertices.len(), 2);
        assert_eq!(vertices[1].position, [4.0, 5.0, 6.0]);
        assert_eq!(vertices[1].normal, [0.0; 3]);
        assert_eq!(vertices[1].uv, [0.0; 2]);
        assert_eq!(vertices[1].color, [1.0; 4]);
    }

    #[test]
    fn interleave_keeps_present_channels() {
        let data = VertexBufferData {
            positions: vec![[0.0; 3]],
            normals: vec![[0.0, 1.0, 0.0]],
            tex_coords: vec![[0.25, 0.75]],
            colors: None,
        };
        let v = data.interleave()[0];
        assert_eq!(v.normal, [0.0, 1.0, 0.0]);
        assert_eq!(v.uv, [0.25, 0.75]);
        assert!(data.has_normals());
        assert!(data.has_tex_coords());
    }

    #[test]
    fn interleave_uses_vertex_colors_when_present() {
        let data = VertexBufferData {
            positions: vec![[0.0; 3]; 2],
            colors: Some(vec![Color::rgba(1.0, 0.0, 0.0, 0.5)]),
            ..Default::default()
        };
        let vertices = data.interleave();
        assert_eq!(vertices[0].color, [1.0, 0.0, 0.0, 0.5]);
        assert_eq!(vertices[1].color, Color::WHITE.to_array());
    }

    #[test]
    fn empty_buffer() {
        let data = VertexBufferData::default();
        assert!(data.is_empty());
        assert!(!data.has_normals());
        assert!(data.interleave().is_empty());
    }
}
