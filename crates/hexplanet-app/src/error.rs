use std::path::PathBuf;

use hexplanet_sphere::HexSphereError;

/// Everything that can stop a run.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("generation failed: {0}")]
    Generation(#[from] HexSphereError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode tile records: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("sphere check failed: {0}")]
    Check(String),
}
