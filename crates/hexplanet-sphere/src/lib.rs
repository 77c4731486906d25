//! Hex-sphere geometry: geodesic subdivision of an icosahedron, its dual
//! tiling into hexagons and twelve pentagons, tile adjacency, and render
//! buffer export.

mod adjacency;
mod dual;
mod error;
mod export;
mod icosahedron;
mod mesh;
mod params;
mod pipeline;
mod projection;
mod subdivide;
mod tile;
mod weld;
mod winding;

pub use adjacency::build_tile_graph;
pub use dual::{DualFace, DualMesh, build_dual};
pub use error::{ConfigError, GeometryError, HexSphereError};
pub use export::{
    FanApex, MeshSink, RenderBuffers, RenderMode, TileRecord, export_tiles, export_triangles,
    tile_records,
};
pub use icosahedron::{
    ORIGINAL_FACE_COUNT, ORIGINAL_VERTEX_COUNT, PHI, icosahedron, is_original_vertex,
};
pub use mesh::{Mesh, Triangle, Vertex, VertexId};
pub use params::{DEFAULT_EPSILON_SCALE, GenerationParams, MAX_FREQUENCY};
pub use pipeline::{HexSphere, generate};
pub use projection::{project_point, project_to_sphere};
pub use subdivide::{lattice_split, quarter, subdivide};
pub use tile::{CornerId, Tile, TileGraph, TileId};
pub use weld::{ensure_distinct, find_coincident};
pub use winding::{
    angle_in_frame, emit_triangle, orient_outward, tangent_frame, triangle_winds_outward,
};
