use bevy_ecs::prelude::Component;

/// Playback state of an entity running a sequence from
/// [`AnimationStore`](crate::resources::animationstore::AnimationStore).
///
/// `frame_index` indexes the sequence's frame list, not the spritesheet.
#[derive(Debug, Clone, Component, PartialEq)]
pub struct Animation {
    pub animation_key: String,
    pub frame_index: usize,
    pub elapsed_ms: f32,
    /// Set once a non-looped sequence has reached its last frame.
    pub finished: bool,
}

impl Animation {
    /// Start playing `animation_key` from its first frame.
    pub fn new(animation_key: impl Into<String>) -> Self {
        Self {
            animation_key: animation_key.into(),
            frame_index: 0,
            elapsed_ms: 0.0,
            finished: false,
        }
    }
}
