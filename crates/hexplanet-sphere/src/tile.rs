//! Hexagonal and pentagonal tiles of the dual mesh.

use std::fmt;

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Identifier of a tile. Equal to the id of the mesh vertex it was built
/// around, and to its index in [`TileGraph::tiles`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl TileId {
    /// Index into the tile array.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tile {}", self.0)
    }
}

/// Identifier of a tile corner. Equal to the index of the mesh triangle
/// whose projected centroid is the corner; three tiles meet at each corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CornerId(pub u32);

impl CornerId {
    /// Index into the corner array.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One face of the dual mesh.
///
/// Pentagons and hexagons share this type; the only difference is the
/// boundary length.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    id: TileId,
    center: DVec3,
    boundary: Vec<CornerId>,
    is_pentagon: bool,
    neighbors: Vec<TileId>,
}

impl Tile {
    pub(crate) fn new(
        id: TileId,
        center: DVec3,
        boundary: Vec<CornerId>,
        neighbors: Vec<TileId>,
    ) -> Self {
        let is_pentagon = boundary.len() == 5;
        Self {
            id,
            center,
            boundary,
            is_pentagon,
            neighbors,
        }
    }

    /// Tile id.
    pub fn id(&self) -> TileId {
        self.id
    }

    /// Unit direction from the sphere center to the tile center.
    pub fn center(&self) -> DVec3 {
        self.center
    }

    /// Boundary corners, counter-clockwise seen from outside.
    pub fn boundary(&self) -> &[CornerId] {
        &self.boundary
    }

    /// `true` for the twelve tiles around the icosahedron vertices.
    pub fn is_pentagon(&self) -> bool {
        self.is_pentagon
    }

    /// Neighbors in boundary order: neighbor `k` lies across the edge from
    /// corner `k` to corner `k + 1`.
    pub fn neighbors(&self) -> &[TileId] {
        &self.neighbors
    }

    /// Neighbor across boundary edge `k`, if `k` is in range.
    pub fn neighbor_at(&self, k: usize) -> Option<TileId> {
        self.neighbors.get(k).copied()
    }

    /// Number of boundary corners (5 or 6).
    pub fn len(&self) -> usize {
        self.boundary.len()
    }

    /// Always `false` for tiles built by the pipeline.
    pub fn is_empty(&self) -> bool {
        self.boundary.is_empty()
    }

    /// Whether `other` shares an edge with this tile.
    pub fn is_neighbor(&self, other: TileId) -> bool {
        self.neighbors.contains(&other)
    }

    /// Fan area of this tile. Shorthand for [`TileGraph::tile_area`].
    pub fn area(&self, graph: &TileGraph) -> f64 {
        graph.tile_area(self)
    }
}

/// Tiles of a hex-sphere and the corner positions they share.
///
/// Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct TileGraph {
    radius: f64,
    corners: Vec<DVec3>,
    tiles: Vec<Tile>,
}

impl TileGraph {
    pub(crate) fn new(radius: f64, corners: Vec<DVec3>, tiles: Vec<Tile>) -> Self {
        Self {
            radius,
            corners,
            tiles,
        }
    }

    /// Sphere radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// All tiles, ordered by id.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Number of tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// `true` if the graph has no tiles.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Look up a tile by id.
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }

    /// All corner positions, indexed by [`CornerId`]. Every corner lies on
    /// the sphere.
    pub fn corners(&self) -> &[DVec3] {
        &self.corners
    }

    /// Position of a corner.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this graph.
    #[inline]
    pub fn corner(&self, id: CornerId) -> DVec3 {
        self.corners[id.index()]
    }

    /// Boundary positions of `tile`, in winding order.
    pub fn boundary_positions<'a>(&'a self, tile: &'a Tile) -> impl Iterator<Item = DVec3> + 'a {
        tile.boundary.iter().map(|&c| self.corner(c))
    }

    /// Number of pentagonal tiles (always 12).
    pub fn pentagon_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_pentagon).count()
    }

    /// Number of hexagonal tiles.
    pub fn hexagon_count(&self) -> usize {
        self.tiles.len() - self.pentagon_count()
    }

    /// Mean of the boundary positions. Lies inside the polygon, slightly
    /// below the sphere surface.
    pub fn polygon_centroid(&self, tile: &Tile) -> DVec3 {
        let sum: DVec3 = self.boundary_positions(tile).sum();
        sum / tile.len() as f64
    }

    /// Area of `tile` as the sum of its fan triangles around
    /// [`polygon_centroid`](Self::polygon_centroid).
    pub fn tile_area(&self, tile: &Tile) -> f64 {
        let c = self.polygon_centroid(tile);
        let n = tile.len();
        (0..n)
            .map(|k| {
                let a = self.corner(tile.boundary[k]);
                let b = self.corner(tile.boundary[(k + 1) % n]);
                0.5 * (a - c).cross(b - c).length()
            })
            .sum()
    }

    /// Find the tile whose center is closest to `direction`.
    ///
    /// Walks the adjacency graph from `hint` (or tile 0), always moving to the
    /// neighbor whose center is better aligned with `direction`, until no
    /// neighbor improves. Returns `None` for an empty graph or a zero or
    /// non-finite direction.
    pub fn locate(&self, direction: DVec3, hint: Option<TileId>) -> Option<TileId> {
        if self.tiles.is_empty() {
            return None;
        }
        let target = direction.try_normalize()?;

        let mut current = hint
            .filter(|id| id.index() < self.tiles.len())
            .unwrap_or(TileId(0));
        let mut best_dot = self.tiles[current.index()].center.dot(target);

        loop {
            let mut next = current;
            for &n in &self.tiles[current.index()].neighbors {
                let d = self.tiles[n.index()].center.dot(target);
                if d > best_dot {
                    best_dot = d;
                    next = n;
                }
            }
            if next == current {
                return Some(current);
            }
            current = next;
        }
    }
}
