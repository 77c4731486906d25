//! GPU-side representation of hex-sphere render buffers: packed vertices,
//! the matching `wgpu` vertex layout, and a staging pool that accepts
//! submissions from the generator.

pub mod packed;
pub mod staging;
pub mod vertex_format;

pub use packed::{PackedPlanetMesh, TileVertex};
pub use staging::{MeshHandle, StagingPool};
pub use vertex_format::{
    PLANET_INDEX_FORMAT, TILE_VERTEX_ATTRIBUTES, TILE_VERTEX_LAYOUT, tile_vertex_buffer_layout,
};
