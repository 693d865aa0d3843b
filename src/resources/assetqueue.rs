//! Declared assets and batch loading.
//!
//! The viewer scene declares everything it needs up front as an
//! [`AssetQueue`]. The preload phase then loads the whole queue in one step;
//! the create phase only runs if every request succeeded.
//!
//! Texture creation goes through the [`TextureLoader`] trait so the batch
//! logic can run without a window. [`RaylibLoader`] is the real implementation.

use bevy_ecs::prelude::Resource;
use log::debug;
use raylib::prelude::{RaylibHandle, RaylibThread, Texture2D};

use crate::error::AssetError;
use crate::resources::spritesheets::SheetLayout;

/// One asset to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetRequest {
    /// Plain image, used whole.
    Image { key: String, path: String },
    /// Image sliced into fixed-size frames.
    Spritesheet {
        key: String,
        path: String,
        frame_width: u32,
        frame_height: u32,
    },
}

impl AssetRequest {
    pub fn key(&self) -> &str {
        match self {
            AssetRequest::Image { key, .. } | AssetRequest::Spritesheet { key, .. } => key,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            AssetRequest::Image { path, .. } | AssetRequest::Spritesheet { path, .. } => path,
        }
    }
}

/// Source of textures. Returns the texture plus its pixel size.
pub trait TextureLoader {
    type Texture;

    fn load(&mut self, path: &str) -> Result<(Self::Texture, u32, u32), String>;
}

/// [`TextureLoader`] backed by raylib.
pub struct RaylibLoader<'a> {
    pub rl: &'a mut RaylibHandle,
    pub th: &'a RaylibThread,
}

impl TextureLoader for RaylibLoader<'_> {
    type Texture = Texture2D;

    fn load(&mut self, path: &str) -> Result<(Texture2D, u32, u32), String> {
        let texture = self
            .rl
            .load_texture(self.th, path)
            .map_err(|e| e.to_string())?;
        let (w, h) = (texture.width.max(0) as u32, texture.height.max(0) as u32);
        Ok((texture, w, h))
    }
}

/// A request that was loaded and sliced.
#[derive(Debug)]
pub struct LoadedAsset<T> {
    pub key: String,
    pub texture: T,
    pub layout: SheetLayout,
}

/// Ordered list of assets declared by the scene.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetQueue {
    pub requests: Vec<AssetRequest>,
}

impl AssetQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(&mut self, key: impl Into<String>, path: impl Into<String>) -> &mut Self {
        self.requests.push(AssetRequest::Image {
            key: key.into(),
            path: path.into(),
        });
        self
    }

    pub fn spritesheet(
        &mut self,
        key: impl Into<String>,
        path: impl Into<String>,
        frame_width: u32,
        frame_height: u32,
    ) -> &mut Self {
        self.requests.push(AssetRequest::Spritesheet {
            key: key.into(),
            path: path.into(),
            frame_width,
            frame_height,
        });
        self
    }

    /// Load every request. Stops at the first failure; nothing is returned
    /// unless the whole batch succeeded.
    pub fn load_batch<L: TextureLoader>(
        &self,
        loader: &mut L,
    ) -> Result<Vec<LoadedAsset<L::Texture>>, AssetError> {
        let mut loaded = Vec::with_capacity(self.requests.len());
        for request in &self.requests {
            let (texture, w, h) = loader.load(request.path()).map_err(|reason| AssetError::Load {
                key: request.key().to_string(),
                path: request.path().to_string(),
                reason,
            })?;

            let layout = match request {
                AssetRequest::Image { .. } => SheetLayout::whole(w, h),
                AssetRequest::Spritesheet {
                    frame_width,
                    frame_height,
                    ..
                } => SheetLayout::slice(w, h, *frame_width, *frame_height),
            };
            if layout.frame_count() == 0 {
                return Err(AssetError::EmptySheet {
                    key: request.key().to_string(),
                    width: w,
                    height: h,
                    frame_width: layout.frame_width,
                    frame_height: layout.frame_height,
                });
            }

            debug!(
                "Loaded '{}' from {} ({}x{}, {} frames)",
                request.key(),
                request.path(),
                w,
                h,
                layout.frame_count()
            );
            loaded.push(LoadedAsset {
                key: request.key().to_string(),
                texture,
                layout,
            });
        }
        Ok(loaded)
    }
}
