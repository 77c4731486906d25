//! Regular icosahedron, the base solid of every hex-sphere.

use glam::DVec3;

use crate::error::GeometryError;
use crate::mesh::{Mesh, MeshBuilder, Triangle, VertexId};
use crate::winding::orient_outward;

/// Golden ratio `(1 + √5) / 2`.
pub const PHI: f64 = 1.618_033_988_749_895;

/// Number of icosahedron vertices. These keep ids `0..12` through
/// subdivision and become the twelve pentagonal tiles.
pub const ORIGINAL_VERTEX_COUNT: usize = 12;

/// Number of icosahedron faces.
pub const ORIGINAL_FACE_COUNT: usize = 20;

/// Golden-ratio rectangle corners: `(±1, ±φ, 0)` and its cyclic permutations.
const BASE_VERTICES: [[f64; 3]; ORIGINAL_VERTEX_COUNT] = [
    [-1.0, PHI, 0.0],
    [1.0, PHI, 0.0],
    [-1.0, -PHI, 0.0],
    [1.0, -PHI, 0.0],
    [0.0, -1.0, PHI],
    [0.0, 1.0, PHI],
    [0.0, -1.0, -PHI],
    [0.0, 1.0, -PHI],
    [PHI, 0.0, -1.0],
    [PHI, 0.0, 1.0],
    [-PHI, 0.0, -1.0],
    [-PHI, 0.0, 1.0],
];

#[rustfmt::skip]
const BASE_FACES: [[u32; 3]; ORIGINAL_FACE_COUNT] = [
    [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
    [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
    [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
    [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
];

/// Whether `id` is one of the twelve icosahedron vertices.
#[inline]
pub fn is_original_vertex(id: VertexId) -> bool {
    id.index() < ORIGINAL_VERTEX_COUNT
}

/// Build a regular icosahedron with its vertices at distance `radius` from
/// the origin.
///
/// Every face is checked and, if needed, flipped so it winds outward.
///
/// # Errors
///
/// [`GeometryError::WindingUndetermined`] if a face is degenerate. The
/// outward test does not depend on scale, so this only happens for a zero or
/// non-finite radius.
pub fn icosahedron(radius: f64) -> Result<Mesh, GeometryError> {
    let mut builder = MeshBuilder::with_capacity(ORIGINAL_VERTEX_COUNT, ORIGINAL_FACE_COUNT);
    for [x, y, z] in BASE_VERTICES {
        builder.push_vertex(DVec3::new(x, y, z).normalize() * radius);
    }

    for (i, [a, b, c]) in BASE_FACES.into_iter().enumerate() {
        let tri = Triangle::new(VertexId(a), VertexId(b), VertexId(c));
        let positions = tri.vertices.map(|v| builder.position(v));
        builder.push_triangle(orient_outward(tri, positions, i as u32)?);
    }

    Ok(builder.build())
}
