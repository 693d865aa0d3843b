//! ECS resources made available to systems.
//!
//! Overview
//! - `animcatalog` – animation metadata records and one-hop alias resolution
//! - `animationstore` – registered frame sequences with per-frame durations
//! - `assetqueue` – assets declared by the scene and their batch loader
//! - `scenephase` – authoritative and pending scene phase
//! - `shaderstore` – compiled shaders (tint fill)
//! - `spritesheets` – frame grid of every loaded texture
//! - `systemsstore` – phase hooks registered by name
//! - `texturestore` – loaded textures keyed by string IDs
//! - `viewerconfig` – INI-backed settings
//! - `worldtime` – simulation time and delta
pub mod animationstore;
pub mod animcatalog;
pub mod assetqueue;
pub mod scenephase;
pub mod shaderstore;
pub mod spritesheets;
pub mod systemsstore;
pub mod texturestore;
pub mod viewerconfig;
pub mod worldtime;
