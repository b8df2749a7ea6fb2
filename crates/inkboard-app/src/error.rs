//! Application errors.

use inkboard_core::ExportError;
use inkboard_render::RendererError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
    #[error("Render failed: {0}")]
    Render(#[from] RendererError),
    #[error("Invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },
}
