//! Error types for the viewer scene.
//!
//! [`ViewerError`] covers metadata lookup and scene initialization;
//! [`AssetError`] covers the preload batch. Both are reported through `log`
//! and move the scene into [`ScenePhases::Failed`](crate::resources::scenephase::ScenePhases::Failed).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("animation '{0}' not found in catalog")]
    UnknownAction(String),

    #[error("animation '{action}' is a copy of '{target}', which is not in the catalog")]
    UnknownAlias { action: String, target: String },

    #[error("animation '{action}' aliases '{target}', which aliases '{next}' (only one hop is supported)")]
    AliasChain {
        action: String,
        target: String,
        next: String,
    },

    #[error("animation '{action}' has invalid frame size {width}x{height}")]
    InvalidFrameSize {
        action: String,
        width: u32,
        height: u32,
    },

    #[error("animation '{0}' has no durations")]
    MissingDurations(String),

    #[error("{0}")]
    Catalog(String),
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to load '{key}' from {path}: {reason}")]
    Load {
        key: String,
        path: String,
        reason: String,
    },

    #[error("spritesheet '{key}' ({width}x{height}) holds no {frame_width}x{frame_height} frame")]
    EmptySheet {
        key: String,
        width: u32,
        height: u32,
        frame_width: u32,
        frame_height: u32,
    },
}
