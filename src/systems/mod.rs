//! Viewer systems.
//!
//! Submodules overview
//! - [`animation`] – advance frame sequences by per-frame durations
//! - [`render`] – draw sprites with scale and tint using Raylib
//! - [`scenephase`] – emit pending phase transitions
//! - [`time`] – update simulation time and delta

pub mod animation;
pub mod render;
pub mod scenephase;
pub mod time;
