//! Color tint component for rendering sprites.
//!
//! The [`Tint`] component changes how an entity's texture is colored:
//! - [`TintMode::Multiply`] modulates texels, replacing `Color::WHITE` in draw calls
//! - [`TintMode::Fill`] paints every visible texel with the tint color, keeping
//!   the texel's alpha (a silhouette)

use bevy_ecs::prelude::Component;
use raylib::prelude::Color;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TintMode {
    #[default]
    Multiply,
    Fill,
}

#[derive(Component, Clone, Debug, Copy)]
pub struct Tint {
    pub color: Color,
    pub mode: TintMode,
}

impl Tint {
    /// Solid fill with `color`.
    pub fn fill(color: Color) -> Self {
        Self {
            color,
            mode: TintMode::Fill,
        }
    }

    pub fn is_fill(&self) -> bool {
        self.mode == TintMode::Fill
    }
}

impl Default for Tint {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            mode: TintMode::Multiply,
        }
    }
}
