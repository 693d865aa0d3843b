//! Loaded textures keyed by string IDs.
//!
//! Filled by the preload phase from the scene's
//! [`AssetQueue`](crate::resources::assetqueue::AssetQueue) and read by the
//! render system through [`Sprite::tex_key`](crate::components::sprite::Sprite).
//! The texture type defaults to raylib's [`Texture2D`].

use bevy_ecs::prelude::Resource;
use raylib::prelude::Texture2D;
use rustc_hash::FxHashMap;

#[derive(Resource)]
pub struct TextureStore<T: Send + Sync + 'static = Texture2D> {
    map: FxHashMap<String, T>,
}

impl<T: Send + Sync + 'static> TextureStore<T> {
    pub fn new() -> Self {
        Self {
            map: FxHashMap::default(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, texture: T) {
        self.map.insert(key.into(), texture);
    }

    pub fn get(&self, key: impl AsRef<str>) -> Option<&T> {
        self.map.get(key.as_ref())
    }
}

impl<T: Send + Sync + 'static> Default for TextureStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
