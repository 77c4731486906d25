//! Coincident-vertex detection.
//!
//! Subdivision never welds by coordinates; this check only confirms that no
//! two distinct ids ended up at the same point. Vertices are bucketed into a
//! spatial hash whose cell edge is at least epsilon, so only the 27
//! surrounding cells need to be scanned per vertex.

use glam::DVec3;
use rustc_hash::FxHashMap;

use crate::error::GeometryError;
use crate::mesh::{Mesh, VertexId};

type CellKey = (i64, i64, i64);

/// Smallest cell edge relative to the mesh extent. Keeps cell coordinates
/// within ±2^40 however small epsilon is.
const MIN_CELL_FRACTION: f64 = 1.0 / (1u64 << 40) as f64;

#[inline]
fn cell_of(position: DVec3, cell: f64) -> CellKey {
    let c = (position / cell).floor();
    (c.x as i64, c.y as i64, c.z as i64)
}

/// The 27 cells around `(cx, cy, cz)`, skipping any whose coordinates would
/// leave the `i64` range.
fn neighborhood((cx, cy, cz): CellKey) -> impl Iterator<Item = CellKey> {
    (-1i64..=1).flat_map(move |dx| {
        (-1i64..=1).flat_map(move |dy| {
            (-1i64..=1).filter_map(move |dz| {
                Some((
                    cx.checked_add(dx)?,
                    cy.checked_add(dy)?,
                    cz.checked_add(dz)?,
                ))
            })
        })
    })
}

/// `|a - b| < epsilon`, measured in units of epsilon so tiny tolerances do not
/// underflow the squared distance.
#[inline]
fn within(a: DVec3, b: DVec3, epsilon: f64) -> bool {
    ((a - b) / epsilon).length() < 1.0
}

/// Find the first pair of distinct vertices closer than `epsilon`.
///
/// Vertices are visited in id order; the returned pair is `(earlier, later)`.
pub fn find_coincident(mesh: &Mesh, epsilon: f64) -> Option<(VertexId, VertexId)> {
    let extent = mesh
        .vertices()
        .iter()
        .map(|v| v.position.abs().max_element())
        .fold(0.0f64, f64::max);
    let cell = epsilon.max(extent * MIN_CELL_FRACTION);

    let mut buckets: FxHashMap<CellKey, Vec<VertexId>> = FxHashMap::default();
    buckets.reserve(mesh.vertex_count());

    for v in mesh.vertices() {
        let key = cell_of(v.position, cell);
        for neighbor in neighborhood(key) {
            let Some(bucket) = buckets.get(&neighbor) else {
                continue;
            };
            for &other in bucket {
                if within(mesh.position(other), v.position, epsilon) {
                    return Some((other, v.id));
                }
            }
        }
        buckets.entry(key).or_default().push(v.id);
    }

    None
}

/// Fail if any two distinct vertices are closer than `epsilon`.
///
/// # Errors
///
/// [`GeometryError::CoincidentVertices`] naming the first offending pair.
pub fn ensure_distinct(mesh: &Mesh, epsilon: f64) -> Result<(), GeometryError> {
    match find_coincident(mesh, epsilon) {
        Some((a, b)) => Err(GeometryError::CoincidentVertices {
            a: a.0,
            b: b.0,
            epsilon,
        }),
        None => Ok(()),
    }
}
