//! Dual of the geodesic mesh: one tile per vertex, one corner per triangle.

use glam::DVec3;

use crate::error::GeometryError;
use crate::icosahedron::is_original_vertex;
use crate::mesh::{Mesh, VertexId};
use crate::projection::{direction, project_point};
use crate::tile::{CornerId, TileId};
use crate::winding::{angle_in_frame, tangent_frame};

/// Boundary of one tile before adjacency is known.
#[derive(Clone, Debug, PartialEq)]
pub struct DualFace {
    /// Tile id (the generating vertex id).
    pub id: TileId,
    /// Unit direction of the generating vertex.
    pub center: DVec3,
    /// Corners sorted counter-clockwise around `center`, seen from outside.
    pub boundary: Vec<CornerId>,
}

/// Output of [`build_dual`]: corner positions and ordered tile boundaries.
#[derive(Clone, Debug, PartialEq)]
pub struct DualMesh {
    radius: f64,
    corners: Vec<DVec3>,
    faces: Vec<DualFace>,
}

impl DualMesh {
    /// Sphere radius the corners were projected to.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Corner positions, indexed by [`CornerId`].
    pub fn corners(&self) -> &[DVec3] {
        &self.corners
    }

    /// Tile boundaries, indexed by [`TileId`].
    pub fn faces(&self) -> &[DualFace] {
        &self.faces
    }

    pub(crate) fn into_parts(self) -> (f64, Vec<DVec3>, Vec<DualFace>) {
        (self.radius, self.corners, self.faces)
    }
}

/// Boundary corner count expected around `v`.
#[inline]
fn expected_degree(v: VertexId) -> usize {
    if is_original_vertex(v) { 5 } else { 6 }
}

/// Build the dual of a projected geodesic mesh.
///
/// Each triangle centroid, projected onto the sphere of `radius`, becomes a
/// corner. For every vertex `v`, the corners of the triangles around `v` are
/// sorted by angle around `v`'s outward direction to form tile `v`.
///
/// # Errors
///
/// - [`GeometryError::DegenerateCorner`] if a triangle centroid sits at the
///   origin.
/// - [`GeometryError::DegenerateVertex`] if a vertex sits at the origin.
/// - [`GeometryError::TileDegree`] if a vertex does not have 5 (original
///   icosahedron vertex) or 6 (any other vertex) surrounding triangles.
/// - [`GeometryError::BoundaryOrder`] if two consecutive sorted corners do not
///   come from triangles sharing an edge at `v`.
pub fn build_dual(mesh: &Mesh, radius: f64) -> Result<DualMesh, GeometryError> {
    let corners = mesh
        .triangles()
        .iter()
        .enumerate()
        .map(|(i, tri)| {
            let [a, b, c] = mesh.triangle_positions(tri);
            project_point((a + b + c) / 3.0, radius)
                .ok_or(GeometryError::DegenerateCorner { triangle: i as u32 })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let incident = mesh.vertex_triangles();
    let mut faces = Vec::with_capacity(mesh.vertex_count());

    for (vertex, fan) in mesh.vertices().iter().zip(incident) {
        let expected = expected_degree(vertex.id);
        if fan.len() != expected {
            return Err(GeometryError::TileDegree {
                tile: vertex.id.0,
                expected,
                actual: fan.len(),
            });
        }

        let origin = vertex.position;
        let normal = direction(origin).ok_or(GeometryError::DegenerateVertex {
            vertex: vertex.id.0,
            magnitude: 0.0,
        })?;
        let frame = tangent_frame(normal);

        let mut ordered: Vec<(f64, u32)> = fan
            .into_iter()
            .map(|t| (angle_in_frame(origin, corners[t as usize], frame), t))
            .collect();
        ordered.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        // Consecutive corners must come from triangles sharing an edge (v, w).
        let n = ordered.len();
        for k in 0..n {
            let t0 = &mesh.triangles()[ordered[k].1 as usize];
            let t1 = &mesh.triangles()[ordered[(k + 1) % n].1 as usize];
            let shared = t0.vertices.iter().filter(|v| t1.contains(**v)).count();
            if shared != 2 {
                return Err(GeometryError::BoundaryOrder {
                    tile: vertex.id.0,
                    index: k,
                });
            }
        }

        faces.push(DualFace {
            id: TileId(vertex.id.0),
            center: normal,
            boundary: ordered.into_iter().map(|(_, t)| CornerId(t)).collect(),
        });
    }

    tracing::debug!(
        tiles = faces.len(),
        corners = corners.len(),
        "built dual mesh"
    );

    Ok(DualMesh {
        radius,
        corners,
        faces,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icosahedron::icosahedron;
    use crate::mesh::{MeshBuilder, Triangle};
    use crate::projection::project_to_sphere;
    use crate::subdivide::subdivide;

    fn sphere(n: u32) -> Mesh {
        let base = icosahedron(1.0).unwrap();
        project_to_sphere(&subdivide(&base, n).unwrap(), 1.0).unwrap()
    }

    #[test]
    fn test_dodecahedron_from_icosahedron() {
        let dual = build_dual(&sphere(1), 1.0).unwrap();
        assert_eq!(dual.faces().len(), 12);
        assert_eq!(dual.corners().len(), 20);
        assert!(dual.faces().iter().all(|f| f.boundary.len() == 5));
    }

    #[test]
    fn test_degrees_at_frequency_three() {
        let dual = build_dual(&sphere(3), 1.0).unwrap();
        assert_eq!(dual.faces().len(), 92);
        let pentagons = dual.faces().iter().filter(|f| f.boundary.len() == 5).count();
        assert_eq!(pentagons, 12);
        for f in dual.faces() {
            let expected = if f.id.index() < 12 { 5 } else { 6 };
            assert_eq!(f.boundary.len(), expected);
        }
    }

    #[test]
    fn test_corners_on_sphere() {
        let dual = build_dual(&sphere(4), 1.0).unwrap();
        for c in dual.corners() {
            assert!((c.length() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_boundaries_wind_counter_clockwise_from_outside() {
        let dual = build_dual(&sphere(4), 1.0).unwrap();
        for f in dual.faces() {
            let n = f.boundary.len();
            let pts: Vec<DVec3> = f.boundary.iter().map(|c| dual.corners()[c.index()]).collect();
            let centroid = pts.iter().copied().sum::<DVec3>() / n as f64;
            for k in 0..n {
                let a = pts[k] - centroid;
                let b = pts[(k + 1) % n] - centroid;
                assert!(
                    a.cross(b).dot(f.center) > 0.0,
                    "tile {} edge {k} winds clockwise",
                    f.id
                );
            }
        }
    }

    #[test]
    fn test_tile_center_is_unit_vertex_direction() {
        let mesh = sphere(2);
        let dual = build_dual(&mesh, 1.0).unwrap();
        for (f, v) in dual.faces().iter().zip(mesh.vertices()) {
            assert_eq!(f.id.0, v.id.0);
            assert!((f.center - v.position.normalize()).length() < 1e-15);
        }
    }

    #[test]
    fn test_malformed_mesh_rejected() {
        // A lone triangle: vertex 0 has one surrounding triangle.
        let mut b = MeshBuilder::with_capacity(3, 1);
        let v0 = b.push_vertex(DVec3::X);
        let v1 = b.push_vertex(DVec3::Y);
        let v2 = b.push_vertex(DVec3::Z);
        b.push_triangle(Triangle::new(v0, v1, v2));
        assert_eq!(
            build_dual(&b.build(), 1.0),
            Err(GeometryError::TileDegree {
                tile: 0,
                expected: 5,
                actual: 1
            })
        );
    }
}
