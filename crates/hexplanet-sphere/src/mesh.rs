//! Indexed triangle mesh shared by the construction stages.

use std::fmt;

use glam::DVec3;
use rustc_hash::FxHashMap;

use crate::error::GeometryError;
use crate::winding::triangle_winds_outward;

/// Identifier of a mesh vertex. Equal to its index in [`Mesh::vertices`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub u32);

impl VertexId {
    /// Index into the vertex array.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A mesh vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    /// Stable id.
    pub id: VertexId,
    /// Position relative to the sphere center.
    pub position: DVec3,
}

/// Three vertex ids, counter-clockwise when seen from outside the sphere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Triangle {
    /// Corner vertices in winding order.
    pub vertices: [VertexId; 3],
}

impl Triangle {
    /// Triangle from three vertex ids in winding order.
    #[inline]
    pub fn new(a: VertexId, b: VertexId, c: VertexId) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// The three directed edges `(a, b)`, `(b, c)`, `(c, a)`.
    #[inline]
    pub fn edges(&self) -> [(VertexId, VertexId); 3] {
        let [a, b, c] = self.vertices;
        [(a, b), (b, c), (c, a)]
    }

    /// Whether `v` is one of the corners.
    #[inline]
    pub fn contains(&self, v: VertexId) -> bool {
        self.vertices.contains(&v)
    }
}

/// Unordered edge key, lower id first.
#[inline]
pub(crate) fn edge_key(a: VertexId, b: VertexId) -> (VertexId, VertexId) {
    if a < b { (a, b) } else { (b, a) }
}

/// Closed triangle mesh.
///
/// Immutable once built: stages produce new meshes instead of editing one in
/// place.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    triangles: Vec<Triangle>,
}

impl Mesh {
    /// All vertices, ordered by id.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// All triangles in generation order.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Position of a vertex.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this mesh.
    #[inline]
    pub fn position(&self, id: VertexId) -> DVec3 {
        self.vertices[id.index()].position
    }

    /// Corner positions of a triangle.
    #[inline]
    pub fn triangle_positions(&self, tri: &Triangle) -> [DVec3; 3] {
        tri.vertices.map(|v| self.position(v))
    }

    /// Count how many triangles reference each unordered edge.
    pub fn edge_counts(&self) -> FxHashMap<(VertexId, VertexId), usize> {
        let mut counts = FxHashMap::default();
        counts.reserve(self.triangles.len() * 3 / 2);
        for tri in &self.triangles {
            for (a, b) in tri.edges() {
                *counts.entry(edge_key(a, b)).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Number of distinct edges.
    pub fn edge_count(&self) -> usize {
        self.edge_counts().len()
    }

    /// `V - E + F`; 2 for any closed genus-0 mesh.
    pub fn euler_characteristic(&self) -> i64 {
        self.vertex_count() as i64 - self.edge_count() as i64 + self.triangle_count() as i64
    }

    /// Verify that every edge is shared by exactly two triangles.
    ///
    /// # Errors
    ///
    /// [`GeometryError::NonManifoldEdge`] for the first offending edge, in
    /// triangle order.
    pub fn validate_manifold(&self) -> Result<(), GeometryError> {
        let counts = self.edge_counts();
        for tri in &self.triangles {
            for (a, b) in tri.edges() {
                let (lo, hi) = edge_key(a, b);
                let count = counts[&(lo, hi)];
                if count != 2 {
                    return Err(GeometryError::NonManifoldEdge {
                        a: lo.0,
                        b: hi.0,
                        count,
                    });
                }
            }
        }
        Ok(())
    }

    /// Verify that every triangle winds outward from the origin.
    ///
    /// # Errors
    ///
    /// [`GeometryError::InwardWinding`] for the first inward triangle.
    pub fn validate_winding(&self) -> Result<(), GeometryError> {
        for (i, tri) in self.triangles.iter().enumerate() {
            let [p0, p1, p2] = self.triangle_positions(tri);
            if !triangle_winds_outward(p0, p1, p2) {
                return Err(GeometryError::InwardWinding { triangle: i as u32 });
            }
        }
        Ok(())
    }

    /// For every vertex, the indices of the triangles touching it.
    pub fn vertex_triangles(&self) -> Vec<Vec<u32>> {
        let mut incident = vec![Vec::with_capacity(6); self.vertices.len()];
        for (i, tri) in self.triangles.iter().enumerate() {
            for v in tri.vertices {
                incident[v.index()].push(i as u32);
            }
        }
        incident
    }

    /// Same topology with every position replaced by `f(id, position)`.
    pub(crate) fn try_map_positions<E>(
        &self,
        mut f: impl FnMut(VertexId, DVec3) -> Result<DVec3, E>,
    ) -> Result<Mesh, E> {
        let vertices = self
            .vertices
            .iter()
            .map(|v| {
                Ok(Vertex {
                    id: v.id,
                    position: f(v.id, v.position)?,
                })
            })
            .collect::<Result<Vec<_>, E>>()?;
        Ok(Mesh {
            vertices,
            triangles: self.triangles.clone(),
        })
    }
}

/// Accumulates vertices and triangles for a new [`Mesh`].
pub(crate) struct MeshBuilder {
    vertices: Vec<Vertex>,
    triangles: Vec<Triangle>,
}

impl MeshBuilder {
    pub(crate) fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            triangles: Vec::with_capacity(triangles),
        }
    }

    /// Start from the vertices of `mesh` (ids preserved), with no triangles.
    pub(crate) fn from_vertices_of(mesh: &Mesh, extra_vertices: usize, triangles: usize) -> Self {
        let mut vertices = Vec::with_capacity(mesh.vertices.len() + extra_vertices);
        vertices.extend_from_slice(&mesh.vertices);
        Self {
            vertices,
            triangles: Vec::with_capacity(triangles),
        }
    }

    pub(crate) fn position(&self, id: VertexId) -> DVec3 {
        self.vertices[id.index()].position
    }

    pub(crate) fn push_vertex(&mut self, position: DVec3) -> VertexId {
        let id = VertexId(self.vertices.len() as u32);
        self.vertices.push(Vertex { id, position });
        id
    }

    pub(crate) fn push_triangle(&mut self, tri: Triangle) {
        self.triangles.push(tri);
    }

    pub(crate) fn build(self) -> Mesh {
        Mesh {
            vertices: self.vertices,
            triangles: self.triangles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Regular tetrahedron, outward winding.
    fn tetrahedron() -> Mesh {
        let mut b = MeshBuilder::with_capacity(4, 4);
        let v0 = b.push_vertex(DVec3::new(1.0, 1.0, 1.0));
        let v1 = b.push_vertex(DVec3::new(1.0, -1.0, -1.0));
        let v2 = b.push_vertex(DVec3::new(-1.0, 1.0, -1.0));
        let v3 = b.push_vertex(DVec3::new(-1.0, -1.0, 1.0));
        b.push_triangle(Triangle::new(v0, v2, v3));
        b.push_triangle(Triangle::new(v0, v3, v1));
        b.push_triangle(Triangle::new(v0, v1, v2));
        b.push_triangle(Triangle::new(v1, v3, v2));
        b.build()
    }

    #[test]
    fn test_tetrahedron_is_closed_manifold() {
        let mesh = tetrahedron();
        assert!(mesh.validate_manifold().is_ok());
        assert_eq!(mesh.edge_count(), 6);
        assert_eq!(mesh.euler_characteristic(), 2);
    }

    #[test]
    fn test_tetrahedron_winds_outward() {
        assert!(tetrahedron().validate_winding().is_ok());
    }

    #[test]
    fn test_open_mesh_reports_boundary_edge() {
        let mut b = MeshBuilder::with_capacity(3, 1);
        let v0 = b.push_vertex(DVec3::X);
        let v1 = b.push_vertex(DVec3::Y);
        let v2 = b.push_vertex(DVec3::Z);
        b.push_triangle(Triangle::new(v0, v1, v2));
        let err = b.build().validate_manifold().unwrap_err();
        assert_eq!(
            err,
            GeometryError::NonManifoldEdge {
                a: 0,
                b: 1,
                count: 1
            }
        );
    }

    #[test]
    fn test_flipped_triangle_detected() {
        let mesh = tetrahedron();
        let mut b = MeshBuilder::from_vertices_of(&mesh, 0, 4);
        for (i, tri) in mesh.triangles().iter().enumerate() {
            let [a, bb, c] = tri.vertices;
            if i == 2 {
                b.push_triangle(Triangle::new(a, c, bb));
            } else {
                b.push_triangle(*tri);
            }
        }
        let err = b.build().validate_winding().unwrap_err();
        assert_eq!(err, GeometryError::InwardWinding { triangle: 2 });
    }

    #[test]
    fn test_vertex_triangles_incidence() {
        let incident = tetrahedron().vertex_triangles();
        assert_eq!(incident.len(), 4);
        assert!(incident.iter().all(|tris| tris.len() == 3));
        assert_eq!(incident[0], vec![0, 1, 2]);
    }

    #[test]
    fn test_edge_key_is_unordered() {
        assert_eq!(
            edge_key(VertexId(7), VertexId(3)),
            edge_key(VertexId(3), VertexId(7))
        );
    }
}
