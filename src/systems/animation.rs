//! Animation playback system.
//!
//! # Animation Flow
//!
//! 1. Sequences are registered in [`AnimationStore`] by the scene's create phase
//! 2. Entities carry an [`Animation`] component pointing to a sequence key
//! 3. The [`animation`] system advances frames by their individual durations and
//!    updates the [`Sprite`] offset to the current spritesheet frame

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::components::animation::Animation;
use crate::components::sprite::Sprite;
use crate::resources::animationstore::{AnimationResource, AnimationStore};
use crate::resources::worldtime::WorldTime;

/// Advance animation playback and update the sprite frame.
///
/// Contract
/// - Reads [`WorldTime`] for the frame delta.
/// - Looks up sequences in [`AnimationStore`]; unknown keys are left untouched.
/// - Mutates [`Animation`] state and the [`Sprite`] offset.
pub fn animation(
    mut query: Query<(&mut Animation, &mut Sprite)>,
    animation_store: Res<AnimationStore>,
    time: Res<WorldTime>,
) {
    for (mut anim_comp, mut sprite) in query.iter_mut() {
        let Some(sequence) = animation_store.get(&anim_comp.animation_key) else {
            continue;
        };
        if sequence.frames.is_empty() {
            continue;
        }
        advance(&mut anim_comp, sequence, time.delta_ms());
        sprite.offset = frame_offset(sequence, anim_comp.frame_index);
    }
}

/// Move `anim` forward by `delta_ms`.
///
/// A frame is left once the accumulated time reaches its duration. A looped
/// sequence drops whole loops from the carried time first, so the backlog
/// stays below one loop. At most `frames.len()` frames are stepped per call,
/// so a sequence made only of zero-length frames cannot spin.
pub fn advance(anim: &mut Animation, sequence: &AnimationResource, delta_ms: f32) {
    if anim.finished {
        return;
    }
    let len = sequence.frames.len();
    if anim.frame_index >= len {
        anim.frame_index = 0;
    }
    anim.elapsed_ms += delta_ms;
    if sequence.looped {
        let loop_ms = sequence.total_duration_ms() as f32;
        anim.elapsed_ms = if loop_ms > 0.0 {
            anim.elapsed_ms % loop_ms
        } else {
            0.0
        };
    }

    for _ in 0..len {
        let duration = sequence.frames[anim.frame_index].duration_ms as f32;
        if anim.elapsed_ms < duration {
            break;
        }
        if anim.frame_index + 1 < len {
            anim.elapsed_ms -= duration;
            anim.frame_index += 1;
        } else if sequence.looped {
            anim.elapsed_ms -= duration;
            anim.frame_index = 0;
        } else {
            anim.elapsed_ms = 0.0;
            anim.finished = true;
            break;
        }
    }
}

/// Top-left pixel of the sequence frame at `frame_index` in its sheet.
pub fn frame_offset(sequence: &AnimationResource, frame_index: usize) -> Vector2 {
    let frame = sequence.frames[frame_index].frame;
    let columns = sequence.columns.max(1) as usize;
    Vector2 {
        x: ((frame % columns) as u32 * sequence.frame_width) as f32,
        y: ((frame / columns) as u32 * sequence.frame_height) as f32,
    }
}
