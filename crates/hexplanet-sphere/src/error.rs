//! Error types for hex-sphere generation.
//!
//! [`ConfigError`] is raised before any geometry is built. [`GeometryError`]
//! means an internal invariant was violated and is never recovered from.

use thiserror::Error;

/// Invalid generation parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Subdivision frequency below 1.
    #[error("frequency must be at least 1, got {0}")]
    InvalidFrequency(u32),

    /// Subdivision frequency above [`crate::MAX_FREQUENCY`].
    #[error("frequency {requested} exceeds the supported maximum of {max}")]
    FrequencyTooLarge {
        /// Requested frequency.
        requested: u32,
        /// Largest accepted frequency.
        max: u32,
    },

    /// Radius not strictly positive (or not finite).
    #[error("radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    /// Coincidence tolerance not strictly positive (or not finite).
    #[error("epsilon must be positive and finite, got {0}")]
    InvalidEpsilon(f64),
}

/// A geometric or topological invariant does not hold.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A vertex sits at (or within epsilon of) the origin.
    #[error("vertex {vertex} is degenerate (magnitude {magnitude})")]
    DegenerateVertex {
        /// Offending vertex id.
        vertex: u32,
        /// Its magnitude before projection.
        magnitude: f64,
    },

    /// A triangle centroid cannot be projected onto the sphere.
    #[error("corner of triangle {triangle} is degenerate")]
    DegenerateCorner {
        /// Index of the triangle whose centroid collapsed.
        triangle: u32,
    },

    /// A triangle has a zero normal, so no outward winding exists.
    #[error("cannot establish outward winding for triangle {triangle}")]
    WindingUndetermined {
        /// Triangle index.
        triangle: u32,
    },

    /// A triangle winds towards the sphere center.
    #[error("triangle {triangle} winds inward")]
    InwardWinding {
        /// Triangle index.
        triangle: u32,
    },

    /// An edge is not shared by exactly two triangles.
    #[error("edge ({a}, {b}) is shared by {count} triangles, expected 2")]
    NonManifoldEdge {
        /// Lower vertex id.
        a: u32,
        /// Higher vertex id.
        b: u32,
        /// Number of triangles referencing the edge.
        count: usize,
    },

    /// Two distinct vertex ids occupy the same point.
    #[error("vertices {a} and {b} coincide within {epsilon}")]
    CoincidentVertices {
        /// First vertex id.
        a: u32,
        /// Second vertex id.
        b: u32,
        /// Tolerance used.
        epsilon: f64,
    },

    /// A tile does not have the expected number of boundary corners.
    #[error("tile {tile} has {actual} boundary corners, expected {expected}")]
    TileDegree {
        /// Tile id.
        tile: u32,
        /// 5 for the twelve original vertices, 6 otherwise.
        expected: usize,
        /// Number of triangles found around the vertex.
        actual: usize,
    },

    /// Sorted boundary corners do not form a closed fan around the tile.
    #[error("boundary of tile {tile} is not a closed fan at corner index {index}")]
    BoundaryOrder {
        /// Tile id.
        tile: u32,
        /// Boundary index where consecutive corners do not share an edge.
        index: usize,
    },

    /// A dual edge is not shared by exactly two tiles.
    #[error("dual edge ({a}, {b}) belongs to {count} tiles, expected 2")]
    DualEdge {
        /// Lower corner id.
        a: u32,
        /// Higher corner id.
        b: u32,
        /// Number of tiles listing the edge.
        count: usize,
    },

    /// Two tiles share more than one boundary edge.
    #[error("tile {tile} shares more than one edge with tile {neighbor}")]
    DuplicateNeighbor {
        /// Tile id.
        tile: u32,
        /// Neighbor listed twice.
        neighbor: u32,
    },

    /// Adjacency is not symmetric.
    #[error("tile {tile} lists {neighbor} as neighbor but not vice versa")]
    AsymmetricAdjacency {
        /// Tile whose list contains `neighbor`.
        tile: u32,
        /// Tile missing the back-reference.
        neighbor: u32,
    },
}

/// Any failure of the generation pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HexSphereError {
    /// Rejected parameters.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Internal invariant violation.
    #[error("geometry invariant violated: {0}")]
    Geometry(#[from] GeometryError),
}
