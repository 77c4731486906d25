//! Generation parameters for a hex-sphere.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Largest accepted subdivision frequency.
///
/// At 1024 the exported tile buffers hold roughly 73 million vertices, which
/// still fits `u32` indices.
pub const MAX_FREQUENCY: u32 = 1024;

/// Default coincidence tolerance, relative to the sphere radius.
pub const DEFAULT_EPSILON_SCALE: f64 = 1e-7;

/// Parameters of a single generation request.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Sphere radius. Must be positive.
    pub radius: f64,
    /// Subdivision frequency `n`. The sphere gets `10n² + 2` tiles.
    pub frequency: u32,
    /// Tolerance of the coincident-vertex check. `None` means
    /// `1e-7 × radius`. Projection does not use it.
    pub epsilon: Option<f64>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            frequency: 8,
            epsilon: None,
        }
    }
}

impl GenerationParams {
    /// Parameters with the default epsilon.
    pub fn new(radius: f64, frequency: u32) -> Self {
        Self {
            radius,
            frequency,
            epsilon: None,
        }
    }

    /// Override the coincidence tolerance.
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = Some(epsilon);
        self
    }

    /// Check every parameter before any computation starts.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found, checking frequency, then
    /// radius, then epsilon.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frequency < 1 {
            return Err(ConfigError::InvalidFrequency(self.frequency));
        }
        if self.frequency > MAX_FREQUENCY {
            return Err(ConfigError::FrequencyTooLarge {
                requested: self.frequency,
                max: MAX_FREQUENCY,
            });
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(ConfigError::InvalidRadius(self.radius));
        }
        if let Some(eps) = self.epsilon
            && !(eps.is_finite() && eps > 0.0)
        {
            return Err(ConfigError::InvalidEpsilon(eps));
        }
        Ok(())
    }

    /// Effective tolerance of the coincident-vertex check.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
            .unwrap_or(self.radius * DEFAULT_EPSILON_SCALE)
    }

    /// Number of tiles the request produces (`10n² + 2`).
    pub fn tile_count(&self) -> usize {
        let n = self.frequency as usize;
        10 * n * n + 2
    }

    /// Number of triangles in the subdivided mesh (`20n²`).
    pub fn triangle_count(&self) -> usize {
        let n = self.frequency as usize;
        20 * n * n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_are_valid() {
        assert!(GenerationParams::default().validate().is_ok());
    }

    #[test]
    fn test_zero_frequency_rejected() {
        let params = GenerationParams::new(1.0, 0);
        assert_eq!(params.validate(), Err(ConfigError::InvalidFrequency(0)));
    }

    #[test]
    fn test_frequency_above_max_rejected() {
        let params = GenerationParams::new(1.0, MAX_FREQUENCY + 1);
        assert!(matches!(
            params.validate(),
            Err(ConfigError::FrequencyTooLarge { .. })
        ));
        assert!(GenerationParams::new(1.0, MAX_FREQUENCY).validate().is_ok());
    }

    #[test]
    fn test_non_positive_radius_rejected() {
        for radius in [0.0, -2.5, f64::NAN, f64::INFINITY] {
            let params = GenerationParams::new(radius, 2);
            assert!(
                matches!(params.validate(), Err(ConfigError::InvalidRadius(_))),
                "radius {radius} should be rejected"
            );
        }
    }

    #[test]
    fn test_non_positive_epsilon_rejected() {
        let params = GenerationParams::new(1.0, 2).with_epsilon(0.0);
        assert_eq!(params.validate(), Err(ConfigError::InvalidEpsilon(0.0)));

        let params = GenerationParams::new(1.0, 2).with_epsilon(-1e-9);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_default_epsilon_scales_with_radius() {
        let params = GenerationParams::new(6_371_000.0, 4);
        assert!((params.epsilon() - 0.6371).abs() < 1e-12);

        let params = params.with_epsilon(1e-3);
        assert_eq!(params.epsilon(), 1e-3);
    }

    #[test]
    fn test_expected_counts() {
        let params = GenerationParams::new(1.0, 1);
        assert_eq!(params.tile_count(), 12);
        assert_eq!(params.triangle_count(), 20);

        let params = GenerationParams::new(1.0, 2);
        assert_eq!(params.tile_count(), 42);
        assert_eq!(params.triangle_count(), 80);
    }
}
