//! Frequency-`n` subdivision of a triangle mesh.
//!
//! A frequency `n = m · 2^k` (with `m` odd) is applied in two passes:
//!
//! 1. the odd factor `m` splits every face into an `m × m` barycentric
//!    lattice ([`lattice_split`]),
//! 2. the `2^k` factor quarters every triangle `k` times
//!    ([`quarter`]), one worklist round per level.
//!
//! Both passes give each face exactly the flat lattice of step `1/n`, so any
//! frequency yields `n²` triangles per face.
//!
//! Points shared between faces are looked up in a cache keyed on the ids of
//! the vertices they were split from, never on coordinates. This is what
//! keeps each point represented by exactly one vertex id.

use std::collections::VecDeque;

use glam::DVec3;
use rustc_hash::FxHashMap;

use crate::error::ConfigError;
use crate::mesh::{Mesh, MeshBuilder, Triangle, VertexId};
use crate::params::MAX_FREQUENCY;

/// Subdivide every triangle of `mesh` into `frequency²` triangles.
///
/// Vertices of `mesh` keep their ids; new vertices are appended after them.
/// New positions lie on the flat faces; projection is a separate stage.
///
/// # Errors
///
/// [`ConfigError::InvalidFrequency`] if `frequency < 1`, and
/// [`ConfigError::FrequencyTooLarge`] above [`MAX_FREQUENCY`].
pub fn subdivide(mesh: &Mesh, frequency: u32) -> Result<Mesh, ConfigError> {
    if frequency < 1 {
        return Err(ConfigError::InvalidFrequency(frequency));
    }
    if frequency > MAX_FREQUENCY {
        return Err(ConfigError::FrequencyTooLarge {
            requested: frequency,
            max: MAX_FREQUENCY,
        });
    }

    let rounds = frequency.trailing_zeros();
    let odd = frequency >> rounds;
    tracing::debug!(frequency, odd, rounds, "subdividing mesh");

    let lattice = lattice_split(mesh, odd);
    Ok(quarter(&lattice, rounds))
}

/// Cache key of a lattice point on an original edge: lower endpoint id,
/// higher endpoint id, and the step counted from the lower endpoint.
type EdgePointKey = (VertexId, VertexId, u32);

/// Split every face into an `m × m` lattice of triangles.
///
/// With face `(a, b, c)`, the point at lattice coordinates `(i, j)` is
/// `a + (b - a)·i/m + (c - a)·j/m`. Upward triangles are
/// `[(i, j), (i+1, j), (i, j+1)]`, downward ones
/// `[(i+1, j), (i+1, j+1), (i, j+1)]`; both keep the parent winding.
pub fn lattice_split(mesh: &Mesh, m: u32) -> Mesh {
    if m <= 1 {
        return mesh.clone();
    }

    let faces = mesh.triangle_count();
    let mu = m as usize;
    let edge_points = mesh.triangle_count() * 3 / 2 * (mu - 1);
    let interior = faces * (mu - 1) * (mu - 2) / 2;
    let mut builder = MeshBuilder::from_vertices_of(mesh, edge_points + interior, faces * mu * mu);
    let mut cache: FxHashMap<EdgePointKey, VertexId> = FxHashMap::default();

    // Row `i` holds lattice points (i, 0..=m-i).
    let mut grid: Vec<Vec<VertexId>> = Vec::with_capacity(mu + 1);

    for tri in mesh.triangles() {
        let [a, b, c] = tri.vertices;
        let (pa, pb, pc) = (mesh.position(a), mesh.position(b), mesh.position(c));

        grid.clear();
        for i in 0..=m {
            let mut row = Vec::with_capacity((m - i + 1) as usize);
            for j in 0..=(m - i) {
                let k = m - i - j;
                let id = match (i, j, k) {
                    (0, 0, _) => a,
                    (_, 0, 0) => b,
                    (0, _, 0) => c,
                    (_, 0, _) => edge_point(&mut builder, &mut cache, a, b, i, m),
                    (0, _, _) => edge_point(&mut builder, &mut cache, a, c, j, m),
                    (_, _, 0) => edge_point(&mut builder, &mut cache, b, c, j, m),
                    _ => {
                        let s = i as f64 / m as f64;
                        let t = j as f64 / m as f64;
                        builder.push_vertex(pa + (pb - pa) * s + (pc - pa) * t)
                    }
                };
                row.push(id);
            }
            grid.push(row);
        }

        for i in 0..mu {
            for j in 0..(mu - i) {
                builder.push_triangle(Triangle::new(
                    grid[i][j],
                    grid[i + 1][j],
                    grid[i][j + 1],
                ));
                if i + j + 1 < mu {
                    builder.push_triangle(Triangle::new(
                        grid[i + 1][j],
                        grid[i + 1][j + 1],
                        grid[i][j + 1],
                    ));
                }
            }
        }
    }

    builder.build()
}

/// Lattice point `step / m` of the way from `from` to `to`, shared by both
/// faces of the edge.
fn edge_point(
    builder: &mut MeshBuilder,
    cache: &mut FxHashMap<EdgePointKey, VertexId>,
    from: VertexId,
    to: VertexId,
    step: u32,
    m: u32,
) -> VertexId {
    let key = if from < to {
        (from, to, step)
    } else {
        (to, from, m - step)
    };
    if let Some(&id) = cache.get(&key) {
        return id;
    }
    let (lo, hi, s) = key;
    let p_lo = builder.position(lo);
    let p_hi = builder.position(hi);
    let id = builder.push_vertex(p_lo + (p_hi - p_lo) * (s as f64 / m as f64));
    cache.insert(key, id);
    id
}

/// Edge midpoints keyed by unordered vertex-id pair.
///
/// Owned by one [`quarter`] call; every level reuses it because an edge
/// between two ids is only ever split once.
struct MidpointCache {
    midpoints: FxHashMap<(VertexId, VertexId), VertexId>,
}

impl MidpointCache {
    fn with_capacity(capacity: usize) -> Self {
        let mut midpoints = FxHashMap::default();
        midpoints.reserve(capacity);
        Self { midpoints }
    }

    fn get_or_insert(&mut self, builder: &mut MeshBuilder, a: VertexId, b: VertexId) -> VertexId {
        let key = if a < b { (a, b) } else { (b, a) };
        if let Some(&id) = self.midpoints.get(&key) {
            return id;
        }
        let mid: DVec3 = (builder.position(key.0) + builder.position(key.1)) * 0.5;
        let id = builder.push_vertex(mid);
        self.midpoints.insert(key, id);
        id
    }
}

/// Quarter every triangle `rounds` times using a breadth-first worklist.
///
/// ```text
///             a
///            /\
///       ca  /__\  ab
///          /\  /\
///         /__\/__\
///        c   bc   b
/// ```
///
/// `[a, b, c]` becomes `[a, ab, ca]`, `[b, bc, ab]`, `[c, ca, bc]` and
/// `[ab, bc, ca]`, all with the parent winding.
pub fn quarter(mesh: &Mesh, rounds: u32) -> Mesh {
    if rounds == 0 {
        return mesh.clone();
    }

    let factor = 4usize.pow(rounds);
    let final_triangles = mesh.triangle_count() * factor;
    // Closed mesh: V = T/2 + 2.
    let final_vertices = final_triangles / 2 + 2;
    let mut builder = MeshBuilder::from_vertices_of(
        mesh,
        final_vertices.saturating_sub(mesh.vertex_count()),
        final_triangles,
    );
    let mut cache = MidpointCache::with_capacity(final_vertices);

    let mut worklist: VecDeque<(Triangle, u32)> =
        mesh.triangles().iter().map(|tri| (*tri, rounds)).collect();

    while let Some((tri, remaining)) = worklist.pop_front() {
        if remaining == 0 {
            builder.push_triangle(tri);
            continue;
        }
        let [a, b, c] = tri.vertices;
        let ab = cache.get_or_insert(&mut builder, a, b);
        let bc = cache.get_or_insert(&mut builder, b, c);
        let ca = cache.get_or_insert(&mut builder, c, a);

        for child in [
            Triangle::new(a, ab, ca),
            Triangle::new(b, bc, ab),
            Triangle::new(c, ca, bc),
            Triangle::new(ab, bc, ca),
        ] {
            worklist.push_back((child, remaining - 1));
        }
    }

    builder.build()
}
