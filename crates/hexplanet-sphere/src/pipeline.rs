//! End-to-end generation: icosahedron → subdivision → projection → dual →
//! adjacency.

use tracing::{debug, info};

use crate::adjacency::build_tile_graph;
use crate::dual::build_dual;
use crate::error::HexSphereError;
use crate::export::{
    FanApex, MeshSink, RenderBuffers, RenderMode, TileRecord, export_tiles, export_triangles,
    tile_records,
};
use crate::icosahedron::icosahedron;
use crate::mesh::Mesh;
use crate::params::GenerationParams;
use crate::projection::project_to_sphere;
use crate::subdivide::subdivide;
use crate::tile::TileGraph;
use crate::weld::ensure_distinct;

/// A generated hex-sphere: the projected geodesic mesh and its tile graph.
///
/// Immutable; generate a new one for different parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct HexSphere {
    params: GenerationParams,
    mesh: Mesh,
    tiles: TileGraph,
}

impl HexSphere {
    /// Run the full pipeline. See [`generate`].
    pub fn generate(params: GenerationParams) -> Result<Self, HexSphereError> {
        generate(params)
    }

    /// Parameters this sphere was generated from.
    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    /// The subdivided mesh, every vertex on the sphere.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// The tile graph.
    pub fn tiles(&self) -> &TileGraph {
        &self.tiles
    }

    /// Render buffers for the chosen mode. `apex` only matters for
    /// [`RenderMode::Tiles`].
    pub fn render_buffers(&self, mode: RenderMode, apex: FanApex) -> RenderBuffers {
        match mode {
            RenderMode::Tiles => export_tiles(&self.tiles, apex),
            RenderMode::Triangles => export_triangles(&self.mesh),
        }
    }

    /// Per-tile metadata, ordered by id.
    pub fn tile_records(&self) -> Vec<TileRecord> {
        tile_records(&self.tiles)
    }

    /// Export render buffers and submit them to `sink`.
    pub fn submit<S: MeshSink>(&self, sink: &mut S, mode: RenderMode, apex: FanApex) -> S::Handle {
        sink.submit_mesh(&self.render_buffers(mode, apex))
    }
}

/// Generate a hex-sphere.
///
/// Parameters are validated before any geometry is built. Between stages the
/// pipeline checks that the subdivided mesh is a closed manifold, that no two
/// vertices coincide within epsilon, and that every triangle winds outward.
///
/// # Errors
///
/// [`HexSphereError::Config`] for invalid parameters,
/// [`HexSphereError::Geometry`] if any invariant check fails.
pub fn generate(params: GenerationParams) -> Result<HexSphere, HexSphereError> {
    params.validate()?;
    let radius = params.radius;
    let epsilon = params.epsilon();

    let base = icosahedron(radius)?;
    let flat = subdivide(&base, params.frequency)?;
    flat.validate_manifold()?;
    debug!(
        vertices = flat.vertex_count(),
        triangles = flat.triangle_count(),
        "subdivided icosahedron"
    );

    let mesh = project_to_sphere(&flat, radius)?;
    ensure_distinct(&mesh, epsilon)?;
    mesh.validate_winding()?;

    let tiles = build_tile_graph(build_dual(&mesh, radius)?)?;

    info!(
        "Hex-sphere generated: radius {}, frequency {}, {} tiles ({} pentagons, {} hexagons)",
        radius,
        params.frequency,
        tiles.len(),
        tiles.pentagon_count(),
        tiles.hexagon_count()
    );

    Ok(HexSphere {
        params,
        mesh,
        tiles,
    })
}
