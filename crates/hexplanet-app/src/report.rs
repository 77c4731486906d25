//! Human-readable summary of a generation run.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use hexplanet_mesh::PackedPlanetMesh;
use hexplanet_sphere::{HexSphere, RenderMode, TileRecord};

use crate::error::AppError;

/// Statistics printed after a run.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub radius: f64,
    pub frequency: u32,
    pub tiles: usize,
    pub pentagons: usize,
    pub hexagons: usize,
    pub mesh_vertices: usize,
    pub mesh_triangles: usize,
    pub mode: RenderMode,
    pub render_vertices: usize,
    pub render_triangles: usize,
    pub render_bytes: usize,
    pub min_tile_area: f64,
    pub max_tile_area: f64,
    pub total_area: f64,
}

impl Report {
    pub fn new(sphere: &HexSphere, mode: RenderMode, packed: &PackedPlanetMesh) -> Self {
        let graph = sphere.tiles();
        let (mut min, mut max, mut total) = (f64::INFINITY, 0.0f64, 0.0);
        for tile in graph.tiles() {
            let a = tile.area(graph);
            min = min.min(a);
            max = max.max(a);
            total += a;
        }
        if graph.is_empty() {
            min = 0.0;
        }

        Self {
            radius: sphere.params().radius,
            frequency: sphere.params().frequency,
            tiles: graph.len(),
            pentagons: graph.pentagon_count(),
            hexagons: graph.hexagon_count(),
            mesh_vertices: sphere.mesh().vertex_count(),
            mesh_triangles: sphere.mesh().triangle_count(),
            mode,
            render_vertices: packed.vertices.len(),
            render_triangles: packed.triangle_count(),
            render_bytes: packed.vertex_buffer_bytes() + packed.index_buffer_bytes(),
            min_tile_area: min,
            max_tile_area: max,
            total_area: total,
        }
    }

    /// Total tile area over the area of the ideal sphere. Below 1 because
    /// tiles are flat.
    pub fn coverage(&self) -> f64 {
        let sphere = 4.0 * std::f64::consts::PI * self.radius * self.radius;
        self.total_area / sphere
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Hex-sphere  radius {}  frequency {}",
            self.radius, self.frequency
        )?;
        writeln!(
            f,
            "  tiles     {} ({} pentagons, {} hexagons)",
            self.tiles, self.pentagons, self.hexagons
        )?;
        writeln!(
            f,
            "  mesh      {} vertices, {} triangles",
            self.mesh_vertices, self.mesh_triangles
        )?;
        writeln!(
            f,
            "  render    {:?}: {} vertices, {} triangles, {} bytes",
            self.mode, self.render_vertices, self.render_triangles, self.render_bytes
        )?;
        write!(
            f,
            "  area      min {:.6e}  max {:.6e}  coverage {:.4}%",
            self.min_tile_area,
            self.max_tile_area,
            self.coverage() * 100.0
        )
    }
}

/// Write `records` to `path` as pretty-printed JSON.
pub fn write_tile_records(path: &Path, records: &[TileRecord]) -> Result<(), AppError> {
    let write_err = |source: std::io::Error| AppError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.flush().map_err(write_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexplanet_sphere::{FanApex, GenerationParams, generate};

    fn report(n: u32, mode: RenderMode) -> Report {
        let sphere = generate(GenerationParams::new(1.0, n)).unwrap();
        let packed = PackedPlanetMesh::from_buffers(&sphere.render_buffers(mode, FanApex::Planar));
        Report::new(&sphere, mode, &packed)
    }

    #[test]
    fn test_report_counts() {
        let r = report(2, RenderMode::Triangles);
        assert_eq!((r.tiles, r.pentagons, r.hexagons), (42, 12, 30));
        assert_eq!((r.mesh_vertices, r.mesh_triangles), (42, 80));
        assert_eq!(r.render_vertices, 42);
        assert_eq!(r.render_bytes, 42 * 32 + 80 * 3 * 4);
    }

    #[test]
    fn test_dodecahedron_tiles_are_equal() {
        let r = report(1, RenderMode::Tiles);
        assert!((r.max_tile_area - r.min_tile_area).abs() < 1e-12);
        assert!(r.coverage() < 1.0 && r.coverage() > 0.5);
    }

    #[test]
    fn test_display_mentions_counts() {
        let text = report(3, RenderMode::Tiles).to_string();
        assert!(text.contains("92 (12 pentagons, 80 hexagons)"));
        assert!(text.contains("Tiles:"));
    }

    #[test]
    fn test_write_tile_records() {
        let sphere = generate(GenerationParams::new(1.0, 2)).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiles.json");

        write_tile_records(&path, &sphere.tile_records()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let back: Vec<TileRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(back.len(), 42);
        assert_eq!(back[0].id, 0);
        assert!(back[0].is_pentagon);
        assert_eq!(back[0].neighbors.len(), 5);
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("tiles.json");
        let err = write_tile_records(&path, &[]).unwrap_err();
        assert!(matches!(err, AppError::Write { .. }));
    }
}
