//! Environment/runtime helpers
//!
//! Sanity checks run once at startup.

use tracing::warn;

/// Whether the static front-end directory exists; warns when it does not.
pub async fn static_dir_present(static_dir: &str) -> bool {
    match tokio::fs::metadata(static_dir).await {
        Ok(meta) if meta.is_dir() => true,
        Ok(_) => {
            warn!(%static_dir, "static path is not a directory; front-end assets disabled");
            false
        }
        Err(_) => {
            warn!(%static_dir, "front-end assets directory not found; static assets disabled");
            false
        }
    }
}
