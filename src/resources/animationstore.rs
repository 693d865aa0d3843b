//! Animation resource registry.
//!
//! Registered playback sequences keyed by string IDs. Each sequence is an
//! explicit list of spritesheet frames with a per-frame duration, so frames
//! may be shown for different lengths of time. Entities reference a sequence
//! through their [`Animation`](crate::components::animation::Animation)
//! component.

use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

/// Central registry of playback sequences keyed by string IDs.
#[derive(Resource, Default)]
pub struct AnimationStore {
    pub animations: FxHashMap<String, AnimationResource>,
}

impl AnimationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, animation: AnimationResource) {
        self.animations.insert(key.into(), animation);
    }

    pub fn get(&self, key: impl AsRef<str>) -> Option<&AnimationResource> {
        self.animations.get(key.as_ref())
    }
}

/// One frame of a playback sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimFrame {
    /// Frame number within the spritesheet.
    pub frame: usize,
    /// Display time in milliseconds.
    pub duration_ms: u32,
}

/// Immutable playback sequence over a spritesheet.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationResource {
    /// Texture key in [`crate::resources::texturestore::TextureStore`].
    pub tex_key: Arc<str>,
    pub frame_width: u32,
    pub frame_height: u32,
    /// Columns of the sheet grid, used to locate frames.
    pub columns: u32,
    pub frames: Vec<AnimFrame>,
    /// Whether the sequence restarts after the last frame.
    pub looped: bool,
}

impl AnimationResource {
    /// Sum of all frame durations in milliseconds.
    pub fn total_duration_ms(&self) -> u64 {
        self.frames.iter().map(|f| f.duration_ms as u64).sum()
    }

    pub fn durations(&self) -> Vec<u32> {
        self.frames.iter().map(|f| f.duration_ms).collect()
    }
}
