//! ECS components for entities.
//!
//! Submodules overview:
//! - [`animation`] – playback state of a registered animation sequence
//! - [`mapposition`] – screen position (pivot) of an entity
//! - [`scale`] – 2D scale factor for sprites
//! - [`sprite`] – 2D sprite rendering component
//! - [`tint`] – color modulation or solid fill applied when drawing
//! - [`zindex`] – rendering order hint for 2D drawing

pub mod animation;
pub mod mapposition;
pub mod scale;
pub mod sprite;
pub mod tint;
pub mod zindex;
