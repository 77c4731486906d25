//! CPU-side staging of submitted planet meshes until the renderer uploads
//! them.

use hexplanet_sphere::{MeshSink, RenderBuffers};
use rustc_hash::FxHashMap;

use crate::packed::PackedPlanetMesh;

/// Handle returned for each submitted mesh. Never reused within a pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshHandle(pub u64);

/// Holds packed meshes keyed by handle.
///
/// The renderer takes meshes out with [`StagingPool::remove`] once they are
/// uploaded, or reads them in place with [`StagingPool::get`].
#[derive(Debug, Default)]
pub struct StagingPool {
    meshes: FxHashMap<MeshHandle, PackedPlanetMesh>,
    next_handle: u64,
}

impl StagingPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pack `buffers` and store them under a fresh handle.
    pub fn insert(&mut self, buffers: &RenderBuffers) -> MeshHandle {
        let handle = MeshHandle(self.next_handle);
        self.next_handle += 1;
        let packed = PackedPlanetMesh::from_buffers(buffers);
        tracing::debug!(
            handle = handle.0,
            vertices = packed.vertices.len(),
            triangles = packed.triangle_count(),
            bytes = packed.vertex_buffer_bytes() + packed.index_buffer_bytes(),
            "staged planet mesh"
        );
        self.meshes.insert(handle, packed);
        handle
    }

    /// Staged mesh for `handle`, if still present.
    pub fn get(&self, handle: MeshHandle) -> Option<&PackedPlanetMesh> {
        self.meshes.get(&handle)
    }

    /// Take the mesh for `handle` out of the pool.
    pub fn remove(&mut self, handle: MeshHandle) -> Option<PackedPlanetMesh> {
        self.meshes.remove(&handle)
    }

    /// Number of staged meshes.
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Bytes held by all staged vertex and index buffers.
    pub fn total_bytes(&self) -> usize {
        self.meshes
            .values()
            .map(|m| m.vertex_buffer_bytes() + m.index_buffer_bytes())
            .sum()
    }
}

impl MeshSink for StagingPool {
    type Handle = MeshHandle;

    fn submit_mesh(&mut self, buffers: &RenderBuffers) -> MeshHandle {
        self.insert(buffers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexplanet_sphere::{FanApex, GenerationParams, RenderMode, generate};

    #[test]
    fn test_submit_through_sphere() {
        let sphere = generate(GenerationParams::new(1.0, 2)).unwrap();
        let mut pool = StagingPool::new();

        let tiles = sphere.submit(&mut pool, RenderMode::Tiles, FanApex::Planar);
        let tris = sphere.submit(&mut pool, RenderMode::Triangles, FanApex::Planar);

        assert_ne!(tiles, tris);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.get(tris).unwrap().vertices.len(), 42);
        assert_eq!(pool.get(tiles).unwrap().triangle_count(), 12 * 5 + 30 * 6);
    }

    #[test]
    fn test_total_bytes() {
        let sphere = generate(GenerationParams::new(1.0, 1)).unwrap();
        let mut pool = StagingPool::new();
        assert_eq!(pool.total_bytes(), 0);

        pool.submit_mesh(&sphere.render_buffers(RenderMode::Triangles, FanApex::Planar));
        // 12 vertices × 32 bytes + 60 indices × 4 bytes.
        assert_eq!(pool.total_bytes(), 12 * 32 + 60 * 4);
    }

    #[test]
    fn test_handles_not_reused_after_remove() {
        let mut pool = StagingPool::new();
        let buffers = RenderBuffers::default();
        let a = pool.insert(&buffers);
        assert!(pool.remove(a).is_some());
        assert!(pool.remove(a).is_none());
        let b = pool.insert(&buffers);
        assert_ne!(a, b);
        assert!(pool.get(a).is_none());
        assert_eq!(pool.len(), 1);
    }
}
