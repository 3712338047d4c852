//! Interleaved vertex layout for GPU upload

use bytemuck::{Pod, Zeroable};

/// Position, normal, texture coordinate and color, tightly packed.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    /// Size of one vertex in bytes.
    pub const STRIDE: usize = std::mem::size_of::<Self>();

    /// Byte offsets of each attribute, in declaration order.
    pub const OFFSETS: [usize; 4] = [0, 12, 24, 32];

    /// View a slice of vertices as raw bytes for upload.
    pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
        bytemuck::cast_slice(vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::offset_of;

    #[test]
    fn layout_is_tightly_packed() {
        assert_eq!(Vertex::STRIDE, 48);
        assert_eq!(offset_of!(Vertex, position), Vertex::OFFSETS[0]);
        assert_eq!(offset_of!(Vertex, normal), Vertex::OFFSETS[1]);
        assert_eq!(offset_of!(Vertex, uv), Vertex::OFFSETS[2]);
        assert_eq!(offset_of!(Vertex, color), Vertex::OFFSETS[3]);
    }

    #[test]
    fn bytes_cover_every_vertex() {
        let vertices = [Vertex::default(); 3];
        assert_eq!(Vertex::as_bytes(&vertices).len(), 3 * Vertex::STRIDE);
    }
}
