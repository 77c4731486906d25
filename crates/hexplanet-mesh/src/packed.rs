//! Interleaved vertex data ready for GPU upload.

use hexplanet_sphere::RenderBuffers;

/// A single vertex of a planet mesh.
///
/// Layout (32 bytes total):
///   - `[0..12]`  position `[f32; 3]`, relative to the planet center
///   - `[12..24]` normal `[f32; 3]`, unit length
///   - `[24..28]` tile_id `u32`
///   - `[28..32]` padding
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TileVertex {
    /// Position relative to the planet center.
    pub position: [f32; 3],
    /// Surface normal.
    pub normal: [f32; 3],
    /// Tile the vertex belongs to. Used for per-tile shading and picking.
    pub tile_id: u32,
    /// Reserved, set to 0.
    pub _pad: u32,
}

static_assertions::assert_eq_size!(TileVertex, [u8; 32]);

impl TileVertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], tile_id: u32) -> Self {
        Self {
            position,
            normal,
            tile_id,
            _pad: 0,
        }
    }
}

/// Vertex and index buffers of one planet mesh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PackedPlanetMesh {
    /// Interleaved vertex buffer.
    pub vertices: Vec<TileVertex>,
    /// Index buffer (triangles, 3 indices per triangle).
    pub indices: Vec<u32>,
}

impl PackedPlanetMesh {
    /// Interleave the separate arrays of `buffers`.
    ///
    /// Missing normals or tile ids (shorter arrays than `positions`) are
    /// filled with zero.
    pub fn from_buffers(buffers: &RenderBuffers) -> Self {
        let vertices = buffers
            .positions
            .iter()
            .enumerate()
            .map(|(i, &position)| {
                TileVertex::new(
                    position,
                    buffers.normals.get(i).copied().unwrap_or_default(),
                    buffers.tile_ids.get(i).copied().unwrap_or_default(),
                )
            })
            .collect();
        Self {
            vertices,
            indices: buffers.indices.clone(),
        }
    }

    /// Returns `true` if the mesh contains no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns the size of the vertex buffer in bytes.
    pub fn vertex_buffer_bytes(&self) -> usize {
        self.vertices.len() * std::mem::size_of::<TileVertex>()
    }

    /// Returns the size of the index buffer in bytes.
    pub fn index_buffer_bytes(&self) -> usize {
        self.indices.len() * std::mem::size_of::<u32>()
    }

    /// Returns the vertex data as a byte slice for GPU upload (zero-copy).
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Returns the index data as a byte slice for GPU upload (zero-copy).
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexplanet_sphere::{FanApex, GenerationParams, RenderMode, generate};

    #[test]
    fn test_vertex_is_32_bytes() {
        assert_eq!(std::mem::size_of::<TileVertex>(), 32);
        assert_eq!(std::mem::align_of::<TileVertex>(), 4);
    }

    #[test]
    fn test_vertex_bytes_round_trip() {
        let v = TileVertex::new([1.0, 2.0, 3.0], [0.0, 0.0, 1.0], 41);
        let bytes = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), 32);
        assert_eq!(&bytes[24..28], &41u32.to_ne_bytes());
        assert_eq!(&bytes[28..32], &[0, 0, 0, 0]);
        let back: TileVertex = *bytemuck::from_bytes(bytes);
        assert_eq!(back, v);
    }

    #[test]
    fn test_from_buffers_interleaves() {
        let sphere = generate(GenerationParams::new(1.0, 2)).unwrap();
        let buffers = sphere.render_buffers(RenderMode::Tiles, FanApex::Planar);
        let packed = PackedPlanetMesh::from_buffers(&buffers);

        assert_eq!(packed.vertices.len(), buffers.vertex_count());
        assert_eq!(packed.triangle_count(), buffers.triangle_count());
        for (i, v) in packed.vertices.iter().enumerate() {
            assert_eq!(v.position, buffers.positions[i]);
            assert_eq!(v.normal, buffers.normals[i]);
            assert_eq!(v.tile_id, buffers.tile_ids[i]);
        }
        assert_eq!(packed.vertex_bytes().len(), packed.vertex_buffer_bytes());
        assert_eq!(packed.index_bytes().len(), packed.index_buffer_bytes());
    }

    #[test]
    fn test_from_buffers_fills_missing_attributes() {
        let buffers = RenderBuffers {
            positions: vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            normals: vec![],
            tile_ids: vec![7],
            indices: vec![0, 1, 2],
        };
        let packed = PackedPlanetMesh::from_buffers(&buffers);
        assert_eq!(packed.vertices[0].tile_id, 7);
        assert_eq!(packed.vertices[1].tile_id, 0);
        assert_eq!(packed.vertices[2].normal, [0.0; 3]);
    }

    #[test]
    fn test_empty_mesh() {
        let packed = PackedPlanetMesh::default();
        assert!(packed.is_empty());
        assert_eq!(packed.triangle_count(), 0);
        assert!(packed.vertex_bytes().is_empty());
    }
}
