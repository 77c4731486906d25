//! Radial projection onto a sphere.
//!
//! Magnitudes are taken after dividing by the largest component, so radii
//! far from 1 neither underflow nor overflow the squared length.

use glam::DVec3;

use crate::error::GeometryError;
use crate::mesh::Mesh;

/// Unit direction and magnitude of `point`, or `None` at the origin or for
/// non-finite input.
pub(crate) fn direction_and_length(point: DVec3) -> Option<(DVec3, f64)> {
    if !point.is_finite() {
        return None;
    }
    let scale = point.abs().max_element();
    if scale == 0.0 {
        return None;
    }
    let scaled = point / scale;
    let length = scaled.length();
    Some((scaled / length, length * scale))
}

/// Unit direction of `point`, or `None` at the origin.
#[inline]
pub(crate) fn direction(point: DVec3) -> Option<DVec3> {
    direction_and_length(point).map(|(dir, _)| dir)
}

/// Scale `point` along its direction so its magnitude becomes `radius`.
///
/// Returns `None` only if `point` is the origin or not finite. Any other
/// point, however close to the origin, has a direction.
#[inline]
#[must_use]
pub fn project_point(point: DVec3, radius: f64) -> Option<DVec3> {
    direction(point).map(|dir| dir * radius)
}

/// Project every vertex of `mesh` onto the sphere of `radius`.
///
/// Topology and vertex ids are untouched.
///
/// # Errors
///
/// [`GeometryError::DegenerateVertex`] if a vertex sits at the origin, where
/// no direction exists.
pub fn project_to_sphere(mesh: &Mesh, radius: f64) -> Result<Mesh, GeometryError> {
    mesh.try_map_positions(|id, position| {
        project_point(position, radius).ok_or(GeometryError::DegenerateVertex {
            vertex: id.0,
            magnitude: position.length(),
        })
    })
}
