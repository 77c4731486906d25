//! Whole-sphere checks run after generation when `debug.validate` is set.
//!
//! The pipeline already enforces its own invariants between stages; these
//! look at the finished result from the outside.

use hexplanet_sphere::HexSphere;

use crate::error::AppError;

/// Run every check, stopping at the first failure.
pub fn verify(sphere: &HexSphere) -> Result<(), AppError> {
    check_counts(sphere)?;
    check_euler(sphere)?;
    check_on_sphere(sphere)?;
    check_symmetric(sphere)?;
    check_locate(sphere)?;
    tracing::debug!(tiles = sphere.tiles().len(), "sphere checks passed");
    Ok(())
}

fn check_counts(sphere: &HexSphere) -> Result<(), AppError> {
    let n = sphere.params().frequency as usize;
    let expected = 10 * n * n + 2;
    let tiles = sphere.tiles();
    if tiles.len() != expected || tiles.pentagon_count() != 12 {
        return Err(AppError::Check(format!(
            "expected {expected} tiles with 12 pentagons, got {} with {}",
            tiles.len(),
            tiles.pentagon_count()
        )));
    }
    Ok(())
}

fn check_euler(sphere: &HexSphere) -> Result<(), AppError> {
    let chi = sphere.mesh().euler_characteristic();
    if chi != 2 {
        return Err(AppError::Check(format!("Euler characteristic {chi}")));
    }
    Ok(())
}

fn check_on_sphere(sphere: &HexSphere) -> Result<(), AppError> {
    let radius = sphere.params().radius;
    // Relative to the radius so tiny and huge spheres compare in range.
    let tolerance = (sphere.params().epsilon() / radius).max(1e-12);
    let off = sphere
        .mesh()
        .vertices()
        .iter()
        .map(|v| v.position)
        .chain(sphere.tiles().corners().iter().copied())
        .find(|p| ((*p / radius).length() - 1.0).abs() > tolerance);
    match off {
        Some(p) => Err(AppError::Check(format!(
            "point {p} is {} radii from the center",
            (p / radius).length()
        ))),
        None => Ok(()),
    }
}

fn check_symmetric(sphere: &HexSphere) -> Result<(), AppError> {
    let graph = sphere.tiles();
    for tile in graph.tiles() {
        for &n in tile.neighbors() {
            let mirrored = graph.tile(n).is_some_and(|t| t.is_neighbor(tile.id()));
            if !mirrored {
                return Err(AppError::Check(format!(
                    "{} lists {n} as neighbor but not the other way round",
                    tile.id()
                )));
            }
        }
    }
    Ok(())
}

fn check_locate(sphere: &HexSphere) -> Result<(), AppError> {
    let graph = sphere.tiles();
    for tile in graph.tiles() {
        let found = graph.locate(tile.center(), None);
        if found != Some(tile.id()) {
            return Err(AppError::Check(format!(
                "locating the center of {} gave {found:?}",
                tile.id()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexplanet_sphere::{GenerationParams, generate};

    #[test]
    fn test_generated_spheres_pass() {
        for n in [1, 2, 5] {
            let sphere = generate(GenerationParams::new(10.0, n)).unwrap();
            verify(&sphere).unwrap();
        }
    }

    #[test]
    fn test_extreme_spheres_pass() {
        let cases = [
            GenerationParams::new(1e-200, 2),
            GenerationParams::new(1e150, 2),
            GenerationParams::new(1.0, 2).with_epsilon(1e-300),
        ];
        for params in cases {
            let sphere = generate(params).unwrap();
            verify(&sphere).unwrap();
        }
    }
}
