//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so binaries can prepare the data root
//! without depending directly on `common`.

use configs::BlogApiJsonSettings;

/// Ensure the configured data root exists before the stores are built.
pub async fn ensure_env(settings: &BlogApiJsonSettings) -> anyhow::Result<()> {
    common::env::ensure_env(&settings.data_path).await
}
