//! Application State
//!
//! Shared server state: the catalog and the static asset root.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::catalog::Catalog;

/// Shared application state that can be safely passed between threads.
pub type SharedState = Arc<AppState>;

pub struct AppState {
    /// In-memory item and coupon storage behind the JSON endpoints.
    pub catalog: Catalog,

    /// Directory the static fallback route serves files from.
    pub assets_dir: PathBuf,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates an AppState with the seeded demo catalog and locates the
    /// assets directory.
    pub fn new() -> Self {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let assets_dir = Self::locate_assets_directory(&current_dir);

        info!(?assets_dir, "using assets directory");

        Self {
            catalog: Catalog::seeded(),
            assets_dir,
        }
    }

    /// Attempts to locate the assets directory using a multi-step strategy:
    /// `./assets`, then `../assets` (when running from a subdir), then the
    /// bare relative path as a fallback.
    fn locate_assets_directory(current_dir: &Path) -> PathBuf {
        if current_dir.join("assets").exists() {
            return current_dir.join("assets");
        }

        if let Some(parent) = current_dir.parent() {
            if parent.join("assets").exists() {
                return parent.join("assets");
            }
        }

        PathBuf::from("assets")
    }
}
