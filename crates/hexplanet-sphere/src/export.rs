//! Render buffers and per-tile metadata for collaborators.
//!
//! The renderer receives flat [`RenderBuffers`] through the narrow
//! [`MeshSink`] adapter and decides for itself how to wrap them in scene
//! nodes. Simulation layers receive [`TileRecord`]s.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::mesh::Mesh;
use crate::projection::direction;
use crate::tile::TileGraph;

/// Which geometry to put into the render buffers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenderMode {
    /// One fan of triangles per tile.
    #[default]
    Tiles,
    /// The subdivided geodesic mesh itself.
    Triangles,
}

/// Where the shared apex of a tile's triangle fan sits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FanApex {
    /// Mean of the boundary corners. The fan then covers exactly the polygon
    /// area when the corners are coplanar.
    #[default]
    Planar,
    /// Mean direction of the corners, projected onto the sphere.
    Surface,
}

/// Flat vertex and index buffers ready for GPU upload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderBuffers {
    /// Vertex positions relative to the sphere center.
    pub positions: Vec<[f32; 3]>,
    /// Per-vertex unit normal.
    pub normals: Vec<[f32; 3]>,
    /// Per-vertex id of the tile the vertex belongs to.
    pub tile_ids: Vec<u32>,
    /// Triangle list, 3 indices per triangle, counter-clockwise from outside.
    pub indices: Vec<u32>,
}

impl RenderBuffers {
    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// `true` if no vertices were emitted.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Index triples, one per triangle.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    fn push_vertex(&mut self, position: DVec3, normal: DVec3, tile: u32) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position.as_vec3().to_array());
        self.normals.push(normal.as_vec3().to_array());
        self.tile_ids.push(tile);
        index
    }
}

/// Receives render buffers and hands back whatever node handle the rendering
/// side uses.
pub trait MeshSink {
    /// Handle to the submitted mesh.
    type Handle;

    /// Take ownership of a copy of `buffers` and return a handle to it.
    fn submit_mesh(&mut self, buffers: &RenderBuffers) -> Self::Handle;
}

/// Fan-triangulate every tile polygon.
///
/// A tile with `k` corners emits `k + 1` vertices (apex first, then the
/// corners in boundary order) and `k` triangles `[apex, c_i, c_{i+1}]`.
/// Vertices are not shared between tiles, so each tile can be shaded on its
/// own. All vertices of a tile carry the tile's center direction as normal.
pub fn export_tiles(graph: &TileGraph, apex: FanApex) -> RenderBuffers {
    let corner_total: usize = graph.tiles().iter().map(|t| t.len()).sum();
    let mut buffers = RenderBuffers {
        positions: Vec::with_capacity(corner_total + graph.len()),
        normals: Vec::with_capacity(corner_total + graph.len()),
        tile_ids: Vec::with_capacity(corner_total + graph.len()),
        indices: Vec::with_capacity(corner_total * 3),
    };

    for tile in graph.tiles() {
        let centroid = graph.polygon_centroid(tile);
        let apex_position = match apex {
            FanApex::Planar => centroid,
            FanApex::Surface => direction(centroid).unwrap_or(DVec3::ZERO) * graph.radius(),
        };
        let normal = tile.center();
        let id = tile.id().0;

        let base = buffers.push_vertex(apex_position, normal, id);
        for p in graph.boundary_positions(tile) {
            buffers.push_vertex(p, normal, id);
        }

        let k = tile.len() as u32;
        for i in 0..k {
            buffers
                .indices
                .extend_from_slice(&[base, base + 1 + i, base + 1 + (i + 1) % k]);
        }
    }

    tracing::debug!(
        vertices = buffers.vertex_count(),
        triangles = buffers.triangle_count(),
        "exported tile fans"
    );
    buffers
}

/// Export the geodesic mesh with shared vertices.
///
/// Vertex `i` of the buffers is mesh vertex `i`, which is also the center of
/// tile `i`.
pub fn export_triangles(mesh: &Mesh) -> RenderBuffers {
    let mut buffers = RenderBuffers {
        positions: Vec::with_capacity(mesh.vertex_count()),
        normals: Vec::with_capacity(mesh.vertex_count()),
        tile_ids: Vec::with_capacity(mesh.vertex_count()),
        indices: Vec::with_capacity(mesh.triangle_count() * 3),
    };
    for v in mesh.vertices() {
        let normal = direction(v.position).unwrap_or(DVec3::ZERO);
        buffers.push_vertex(v.position, normal, v.id.0);
    }
    for tri in mesh.triangles() {
        buffers.indices.extend(tri.vertices.iter().map(|v| v.0));
    }
    buffers
}

/// Per-tile metadata for simulation layers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileRecord {
    /// Tile id.
    pub id: u32,
    /// Unit direction of the tile center.
    pub centroid: [f64; 3],
    /// Whether the tile is one of the twelve pentagons.
    pub is_pentagon: bool,
    /// Neighbor ids in boundary order.
    pub neighbors: Vec<u32>,
    /// Boundary corner positions in winding order.
    pub boundary: Vec<[f64; 3]>,
}

/// One [`TileRecord`] per tile, ordered by id.
pub fn tile_records(graph: &TileGraph) -> Vec<TileRecord> {
    graph
        .tiles()
        .iter()
        .map(|tile| TileRecord {
            id: tile.id().0,
            centroid: tile.center().to_array(),
            is_pentagon: tile.is_pentagon(),
            neighbors: tile.neighbors().iter().map(|n| n.0).collect(),
            boundary: graph
                .boundary_positions(tile)
                .map(|p| p.to_array())
                .collect(),
        })
        .collect()
}
