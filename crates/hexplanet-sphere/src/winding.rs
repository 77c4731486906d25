//! Winding order checks and tangent frames for sphere-centered meshes.
//!
//! All triangles and tile boundaries are counter-clockwise when viewed from
//! outside the sphere, so backface culling works on every face.

use glam::DVec3;

use crate::error::GeometryError;
use crate::mesh::{Triangle, VertexId};

/// Check if a triangle has outward-facing winding order.
///
/// Returns `true` if the normal from `(v1 - v0) × (v2 - v0)` has a positive
/// dot product with the triangle centroid, i.e. points away from the sphere
/// center at the origin.
pub fn triangle_winds_outward(v0: DVec3, v1: DVec3, v2: DVec3) -> bool {
    outward_alignment(v0, v1, v2) > 0.0
}

/// Signed alignment between the face normal and the centroid direction.
///
/// The corners are divided by their largest coordinate first; the product is
/// cubic in the scale and would otherwise underflow or overflow for radii far
/// from 1. Returns 0 or NaN for an all-zero or non-finite triangle.
#[inline]
fn outward_alignment(v0: DVec3, v1: DVec3, v2: DVec3) -> f64 {
    let scale = v0
        .abs()
        .max_element()
        .max(v1.abs().max_element())
        .max(v2.abs().max_element());
    if !(scale.is_finite() && scale > 0.0) {
        return if scale == 0.0 { 0.0 } else { f64::NAN };
    }
    let (v0, v1, v2) = (v0 / scale, v1 / scale, v2 / scale);
    let face_normal = (v1 - v0).cross(v2 - v0);
    let centroid = (v0 + v1 + v2) / 3.0;
    face_normal.dot(centroid)
}

/// Emit a triangle, swapping the last two corners if `flip` is set.
#[inline]
pub fn emit_triangle(v0: VertexId, v1: VertexId, v2: VertexId, flip: bool) -> Triangle {
    if flip {
        Triangle::new(v0, v2, v1)
    } else {
        Triangle::new(v0, v1, v2)
    }
}

/// Return `tri` wound outward, flipping it if necessary.
///
/// `positions` are the corner positions of `tri` in its current order and
/// `index` is only used for error reporting.
///
/// # Errors
///
/// [`GeometryError::WindingUndetermined`] if the triangle is degenerate (zero
/// or non-finite normal) or its plane passes through the origin.
pub fn orient_outward(
    tri: Triangle,
    positions: [DVec3; 3],
    index: u32,
) -> Result<Triangle, GeometryError> {
    let [p0, p1, p2] = positions;
    let alignment = outward_alignment(p0, p1, p2);
    if !alignment.is_finite() || alignment == 0.0 {
        return Err(GeometryError::WindingUndetermined { triangle: index });
    }
    let [a, b, c] = tri.vertices;
    Ok(emit_triangle(a, b, c, alignment < 0.0))
}

/// Right-handed tangent basis `(u, w)` for a unit `normal`.
///
/// Angles measured from `u` towards `w` increase counter-clockwise when
/// looking down at the sphere from outside.
pub fn tangent_frame(normal: DVec3) -> (DVec3, DVec3) {
    let helper = if normal.x.abs() < 0.9 {
        DVec3::X
    } else {
        DVec3::Y
    };
    let u = (helper - normal * normal.dot(helper)).normalize();
    let w = normal.cross(u);
    (u, w)
}

/// Angle of `point` around `center` in the tangent frame `(u, w)`.
#[inline]
pub fn angle_in_frame(center: DVec3, point: DVec3, frame: (DVec3, DVec3)) -> f64 {
    let d = point - center;
    d.dot(frame.1).atan2(d.dot(frame.0))
}
