use std::f64::consts::TAU;

use crate::{
    foundation::core::Vec3,
    foundation::error::{ChoreoError, ChoreoResult},
    geometry::curve::ClosedCurve,
};

/// Triangle mesh of a tube swept along a closed curve.
///
/// Vertex rings are laid out segment-major with `radial_segments + 1` vertices
/// per ring (the seam vertex is duplicated), and `tubular_segments + 1` rings
/// (the last ring closes onto the first).
#[derive(Clone, Debug)]
pub struct TubeMesh {
    pub vertices: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub tubular_segments: usize,
    pub radial_segments: usize,
}

impl TubeMesh {
    pub fn build(
        curve: &ClosedCurve,
        tubular_segments: usize,
        radius: f64,
        radial_segments: usize,
    ) -> ChoreoResult<Self> {
        if tubular_segments < 3 || radial_segments < 3 {
            return Err(ChoreoError::validation(
                "tube needs at least 3 tubular and 3 radial segments",
            ));
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ChoreoError::validation("tube radius must be > 0"));
        }

        let path = curve.catmull_rom(tubular_segments);
        let ring_len = radial_segments + 1;

        let mut vertices = Vec::with_capacity(path.len() * ring_len);
        for i in 0..path.len() {
            let prev = path[(i + tubular_segments - 1) % tubular_segments];
            let next = path[(i + 1) % tubular_segments];
            let tangent = (next - prev).normalize();
            let mut normal = tangent.cross(Vec3::UP).normalize();
            if normal == Vec3::ZERO {
                normal = Vec3::new(1.0, 0.0, 0.0);
            }
            let binormal = tangent.cross(normal);

            for j in 0..ring_len {
                let a = TAU * (j as f64) / (radial_segments as f64);
                let offset = normal * a.cos() + binormal * a.sin();
                vertices.push(path[i] + offset * radius);
            }
        }

        let mut indices = Vec::with_capacity(tubular_segments * radial_segments * 6);
        for i in 0..tubular_segments {
            for j in 0..radial_segments {
                let a = (i * ring_len + j) as u32;
                let b = ((i + 1) * ring_len + j) as u32;
                let c = ((i + 1) * ring_len + j + 1) as u32;
                let d = (i * ring_len + j + 1) as u32;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Ok(Self {
            vertices,
            indices,
            tubular_segments,
            radial_segments,
        })
    }

    /// Upper bound of the draw range: the number of indices.
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Index slice visible for a draw range, rounded down to whole triangles.
    pub fn visible_indices(&self, draw_range: usize) -> &[u32] {
        let n = draw_range.min(self.indices.len());
        &self.indices[..n - n % 3]
    }

    /// Fraction of the tube drawn for a draw range.
    pub fn visible_fraction(&self, draw_range: usize) -> f64 {
        if self.indices.is_empty() {
            return 0.0;
        }
        draw_range.min(self.indices.len()) as f64 / self.indices.len() as f64
    }

    /// Centre-line points covered by a draw range, for cheap previews.
    pub fn visible_spine(&self, draw_range: usize) -> impl Iterator<Item = Vec3> + '_ {
        let per_segment = self.radial_segments * 6;
        let segments = draw_range.min(self.indices.len()) / per_segment.max(1);
        let ring_len = self.radial_segments + 1;
        (0..segments).map(move |i| {
            let ring = &self.vertices[i * ring_len..(i + 1) * ring_len];
            let sum = ring[..self.radial_segments]
                .iter()
                .fold(Vec3::ZERO, |acc, v| acc + *v);
            sum * (1.0 / self.radial_segments as f64)
        })
    }
}
