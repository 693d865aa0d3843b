//! Sprite animation viewer library.
//!
//! This module exposes the viewer's ECS components, resources, systems, events
//! and scene hooks for use in integration tests and by the `animviewer` binary.

pub mod components;
pub mod error;
pub mod events;
pub mod resources;
pub mod scene;
pub mod systems;
