//! Tile adjacency derived from shared boundary edges.

use rustc_hash::FxHashMap;

use crate::dual::DualMesh;
use crate::error::GeometryError;
use crate::tile::{CornerId, Tile, TileGraph, TileId};

/// Tiles that list a dual edge.
#[derive(Clone, Copy)]
struct EdgeOwners {
    tiles: [TileId; 2],
    count: usize,
}

#[inline]
fn corner_edge(a: CornerId, b: CornerId) -> (CornerId, CornerId) {
    if a < b { (a, b) } else { (b, a) }
}

/// Attach neighbor lists to the dual faces and produce the final
/// [`TileGraph`].
///
/// Two tiles are neighbors iff their boundaries share exactly one edge.
/// Neighbor `k` of a tile is the tile across its boundary edge
/// `(k, k + 1)`, so neighbor order follows boundary winding.
///
/// # Errors
///
/// - [`GeometryError::DualEdge`] if a boundary edge is not listed by exactly
///   two distinct tiles.
/// - [`GeometryError::DuplicateNeighbor`] if two tiles share more than one
///   edge.
/// - [`GeometryError::AsymmetricAdjacency`] if the resulting relation is not
///   symmetric.
pub fn build_tile_graph(dual: DualMesh) -> Result<TileGraph, GeometryError> {
    let (radius, corners, faces) = dual.into_parts();

    let mut owners: FxHashMap<(CornerId, CornerId), EdgeOwners> = FxHashMap::default();
    owners.reserve(corners.len() * 3 / 2);
    for face in &faces {
        let n = face.boundary.len();
        for k in 0..n {
            let key = corner_edge(face.boundary[k], face.boundary[(k + 1) % n]);
            let entry = owners.entry(key).or_insert(EdgeOwners {
                tiles: [face.id; 2],
                count: 0,
            });
            if entry.count < 2 {
                entry.tiles[entry.count] = face.id;
            }
            entry.count += 1;
        }
    }

    let mut tiles = Vec::with_capacity(faces.len());
    for face in faces {
        let n = face.boundary.len();
        let mut neighbors = Vec::with_capacity(n);
        for k in 0..n {
            let (a, b) = corner_edge(face.boundary[k], face.boundary[(k + 1) % n]);
            let edge = owners[&(a, b)];
            let [t0, t1] = edge.tiles;
            if edge.count != 2 || t0 == t1 {
                return Err(GeometryError::DualEdge {
                    a: a.0,
                    b: b.0,
                    count: edge.count,
                });
            }
            let other = if t0 == face.id { t1 } else { t0 };
            if neighbors.contains(&other) {
                return Err(GeometryError::DuplicateNeighbor {
                    tile: face.id.0,
                    neighbor: other.0,
                });
            }
            neighbors.push(other);
        }
        tiles.push(Tile::new(face.id, face.center, face.boundary, neighbors));
    }

    check_symmetric(&tiles)?;

    tracing::debug!(tiles = tiles.len(), edges = owners.len(), "built tile adjacency");
    Ok(TileGraph::new(radius, corners, tiles))
}

/// Verify `B ∈ neighbors(A) ⇔ A ∈ neighbors(B)` for tiles indexed by id.
pub(crate) fn check_symmetric(tiles: &[Tile]) -> Result<(), GeometryError> {
    for tile in tiles {
        for &n in tile.neighbors() {
            let back = tiles
                .get(n.index())
                .is_some_and(|other| other.is_neighbor(tile.id()));
            if !back {
                return Err(GeometryError::AsymmetricAdjacency {
                    tile: tile.id().0,
                    neighbor: n.0,
                });
            }
        }
    }
    Ok(())
}
