//! Coordinate convention conversion
//!
//! Imported geometry arrives in the importer's convention. The renderer is
//! right-handed with Y pointing down the screen, so positions get their Y
//! axis negated on the way in.

use glam::Vec3;

/// Convert a position from importer space to render space: `(x, y, z) -> (x, -y, z)`.
///
/// Only positions go through this. Normals and texture coordinates are
/// copied as-is.
#[inline]
pub fn to_render_space(v: Vec3) -> Vec3 {
    Vec3::new(v.x, -v.y, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negates_only_y() {
        let v = to_render_space(Vec3::new(1.5, 2.0, -3.25));
        assert_eq!(v, Vec3::new(1.5, -2.0, -3.25));
    }

    #[test]
    fn applying_twice_restores_input() {
        let samples = [
            Vec3::ZERO,
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(-7.5, 0.125, 42.0),
            Vec3::new(f32::MAX, f32::MIN, 0.0),
        ];
        for v in samples {
            let twice = to_render_space(to_render_space(v));
            assert_eq!(twice, v);
            assert_eq!(to_render_space(v).x, v.x);
            assert_eq!(to_render_space(v).z, v.z);
        }
    }
}
