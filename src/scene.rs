//! The viewer scene.
//!
//! Shows one sprite animation and its shadow looping over a background map.
//! The scene runs in three phase hooks, each registered in
//! [`SystemsStore`](crate::resources::systemsstore::SystemsStore) and entered
//! through [`ScenePhases`]:
//!
//! 1. [`init`] resolves the requested action in the catalog (following at most
//!    one `CopyOf` hop) and declares the assets to load.
//! 2. [`preload`] loads the declared textures in one batch.
//! 3. [`create`] turns the loaded sheets into timed frame sequences, registers
//!    them and spawns the background, shadow and animation entities.
//!
//! Any fault moves the scene to [`ScenePhases::Failed`]; nothing is played.

use std::path::Path;

use bevy_ecs::prelude::*;
use log::{error, info};

use crate::components::animation::Animation;
use crate::components::mapposition::MapPosition;
use crate::components::scale::Scale;
use crate::components::sprite::Sprite;
use crate::components::tint::Tint;
use crate::components::zindex::ZIndex;
use crate::error::ViewerError;
use crate::resources::animcatalog::{AnimCatalog, ResolvedAnim};
use crate::resources::animationstore::{AnimFrame, AnimationResource, AnimationStore};
use crate::resources::assetqueue::{AssetQueue, RaylibLoader, TextureLoader};
use crate::resources::scenephase::{NextScenePhase, ScenePhases};
use crate::resources::spritesheets::{SheetLayout, SpriteSheets};
use crate::resources::texturestore::TextureStore;
use crate::resources::viewerconfig::ViewerConfig;

/// Texture key of the background map.
pub const BACKGROUND_KEY: &str = "background";

const BACKGROUND_POS: (f32, f32) = (100.0, 100.0);
const SHADOW_POS: (f32, f32) = (100.0, 110.0);
const ANIM_POS: (f32, f32) = (100.0, 105.0);

/// The two sheets shown for an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    Anim,
    Shadow,
}

impl AnimationKind {
    /// Fixed key the playback sequence is registered under.
    pub fn key(&self) -> &'static str {
        match self {
            AnimationKind::Anim => "anim",
            AnimationKind::Shadow => "shadow",
        }
    }

    /// Texture key of this kind's sheet for `action`.
    pub fn texture_key(&self, action: &str) -> String {
        format!("{}-{}", action, self.key())
    }
}

/// The sprite to show: action name and the URLs of its two sheets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteRef {
    pub action: String,
    pub anim_url: String,
    pub shadow_url: String,
}

impl SpriteRef {
    /// Check that `action` resolves in `catalog` and fill in missing sheet
    /// URLs. Defaults follow the SpriteCollab naming next to `anim_data`:
    /// `{effective}-Anim.png` and `{effective}-Shadow.png`.
    pub fn resolve(
        catalog: &AnimCatalog,
        anim_data: &Path,
        action: &str,
        anim_url: Option<String>,
        shadow_url: Option<String>,
    ) -> Result<Self, ViewerError> {
        let effective = catalog.resolve(action)?.action;
        Ok(Self {
            action: action.to_string(),
            anim_url: anim_url.unwrap_or_else(|| sibling_sheet(anim_data, &effective, "Anim")),
            shadow_url: shadow_url
                .unwrap_or_else(|| sibling_sheet(anim_data, &effective, "Shadow")),
        })
    }
}

/// `{dir}/{action}-{suffix}.png`
fn sibling_sheet(anim_data: &Path, action: &str, suffix: &str) -> String {
    anim_data
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(format!("{action}-{suffix}.png"))
        .to_string_lossy()
        .into_owned()
}

/// Everything the scene reads from its host, injected as a resource.
#[derive(Resource, Debug, Clone)]
pub struct ViewerParams {
    pub catalog: AnimCatalog,
    pub sprite: SpriteRef,
    /// Background map identifier.
    pub dungeon: String,
}

/// Scene state fixed at initialization.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct ViewerScene {
    /// Effective action (alias target when the requested action is a copy).
    pub action: String,
    pub anim_url: String,
    pub shadow_url: String,
    pub dungeon: String,
    pub metadata: ResolvedAnim,
}

impl ViewerScene {
    pub fn init(params: &ViewerParams) -> Result<Self, ViewerError> {
        let metadata = params.catalog.resolve(&params.sprite.action)?;
        Ok(Self {
            action: metadata.action.clone(),
            anim_url: params.sprite.anim_url.clone(),
            shadow_url: params.sprite.shadow_url.clone(),
            dungeon: params.dungeon.clone(),
            metadata,
        })
    }

    /// The background image and both sheets, sliced by the resolved frame size.
    pub fn declare_assets(&self, config: &ViewerConfig) -> AssetQueue {
        let (fw, fh) = (self.metadata.frame_width, self.metadata.frame_height);
        let mut queue = AssetQueue::new();
        queue
            .image(BACKGROUND_KEY, config.map_path(&self.dungeon))
            .spritesheet(
                AnimationKind::Anim.texture_key(&self.action),
                &self.anim_url,
                fw,
                fh,
            )
            .spritesheet(
                AnimationKind::Shadow.texture_key(&self.action),
                &self.shadow_url,
                fw,
                fh,
            );
        queue
    }

    /// Looping sequence over every frame of `layout`, timed by the metadata.
    pub fn build_animation(
        &self,
        kind: AnimationKind,
        layout: &SheetLayout,
        unit_ms: u32,
    ) -> AnimationResource {
        let frames = layout.frame_numbers(0, None);
        let durations = frame_durations(frames.len(), &self.metadata.durations, unit_ms);
        AnimationResource {
            tex_key: kind.texture_key(&self.action).into(),
            frame_width: layout.frame_width,
            frame_height: layout.frame_height,
            columns: layout.columns,
            frames: frames
                .into_iter()
                .zip(durations)
                .map(|(frame, duration_ms)| AnimFrame { frame, duration_ms })
                .collect(),
            looped: true,
        }
    }
}

/// Per-frame display time in milliseconds.
///
/// Frame `i` takes `durations[i % durations.len()]`, so a list shorter than
/// the frame count repeats. Explicit zeros are kept. Returns an empty list
/// when `durations` is empty.
pub fn frame_durations(frame_count: usize, durations: &[u32], unit_ms: u32) -> Vec<u32> {
    durations
        .iter()
        .cycle()
        .take(frame_count)
        .map(|d| d.saturating_mul(unit_ms))
        .collect()
}

/// Init hook: resolve metadata and declare assets.
pub fn init(
    mut commands: Commands,
    params: Res<ViewerParams>,
    config: Res<ViewerConfig>,
    mut next_phase: ResMut<NextScenePhase>,
) {
    match ViewerScene::init(&params) {
        Ok(scene) => {
            if scene.action != params.sprite.action {
                info!(
                    "Action '{}' resolved to '{}'",
                    params.sprite.action, scene.action
                );
            }
            commands.insert_resource(scene.declare_assets(&config));
            commands.insert_resource(scene);
            next_phase.set(ScenePhases::Preload);
        }
        Err(e) => {
            error!("Scene init failed: {}", e);
            next_phase.set(ScenePhases::Failed);
        }
    }
}

/// Load `queue` through `loader` and move the batch into the texture and
/// layout stores. Returns the phase to enter next; on failure the stores are
/// left untouched.
pub fn preload_batch<L>(
    loader: &mut L,
    queue: &AssetQueue,
    textures: &mut TextureStore<L::Texture>,
    sheets: &mut SpriteSheets,
) -> ScenePhases
where
    L: TextureLoader,
    L::Texture: Send + Sync + 'static,
{
    match queue.load_batch(loader) {
        Ok(loaded) => {
            info!("Loaded {} assets", loaded.len());
            for asset in loaded {
                sheets.insert(asset.key.clone(), asset.layout);
                textures.insert(asset.key, asset.texture);
            }
            ScenePhases::Create
        }
        Err(e) => {
            error!("Asset preload failed: {}", e);
            ScenePhases::Failed
        }
    }
}

/// Preload hook: load the declared assets in one batch.
pub fn preload(
    mut rl: NonSendMut<raylib::RaylibHandle>,
    th: NonSend<raylib::RaylibThread>,
    queue: Res<AssetQueue>,
    mut textures: ResMut<TextureStore>,
    mut sheets: ResMut<SpriteSheets>,
    mut next_phase: ResMut<NextScenePhase>,
) {
    let mut loader = RaylibLoader {
        rl: &mut rl,
        th: &th,
    };
    next_phase.set(preload_batch(
        &mut loader,
        &queue,
        &mut *textures,
        &mut *sheets,
    ));
}

/// Create hook: register both sequences and start them together.
pub fn create(
    mut commands: Commands,
    scene: Res<ViewerScene>,
    sheets: Res<SpriteSheets>,
    config: Res<ViewerConfig>,
    mut animations: ResMut<AnimationStore>,
    mut next_phase: ResMut<NextScenePhase>,
) {
    let keys = (
        sheets.get(BACKGROUND_KEY),
        sheets.get(AnimationKind::Anim.texture_key(&scene.action)),
        sheets.get(AnimationKind::Shadow.texture_key(&scene.action)),
    );
    let (Some(background), Some(anim_sheet), Some(shadow_sheet)) = keys else {
        error!("Scene create: a declared asset has no loaded layout");
        next_phase.set(ScenePhases::Failed);
        return;
    };

    for (kind, layout) in [
        (AnimationKind::Anim, anim_sheet),
        (AnimationKind::Shadow, shadow_sheet),
    ] {
        let sequence = scene.build_animation(kind, layout, config.duration_unit_ms);
        info!(
            "Registered '{}': {} frames, {} ms per loop",
            kind.key(),
            sequence.frames.len(),
            sequence.total_duration_ms()
        );
        animations.insert(kind.key(), sequence);
    }

    let scale = Scale::uniform(config.scale);

    commands.spawn((
        Sprite::centered(
            BACKGROUND_KEY,
            background.texture_width as f32,
            background.texture_height as f32,
        ),
        MapPosition::new(BACKGROUND_POS.0, BACKGROUND_POS.1),
        scale,
        ZIndex(0),
    ));

    let frame_sprite = |kind: AnimationKind| {
        Sprite::centered(
            kind.texture_key(&scene.action),
            scene.metadata.frame_width as f32,
            scene.metadata.frame_height as f32,
        )
    };

    commands.spawn((
        frame_sprite(AnimationKind::Shadow),
        MapPosition::new(SHADOW_POS.0, SHADOW_POS.1),
        scale,
        Tint::fill(config.shadow_fill_color()),
        ZIndex(1),
        Animation::new(AnimationKind::Shadow.key()),
    ));

    commands.spawn((
        frame_sprite(AnimationKind::Anim),
        MapPosition::new(ANIM_POS.0, ANIM_POS.1),
        scale,
        ZIndex(2),
        Animation::new(AnimationKind::Anim.key()),
    ));

    next_phase.set(ScenePhases::Running);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::animcatalog::{AnimRecord, DurationSpec};
    use crate::resources::assetqueue::AssetRequest;

    fn params(catalog: AnimCatalog, action: &str) -> ViewerParams {
        ViewerParams {
            catalog,
            sprite: SpriteRef {
                action: action.to_string(),
                anim_url: format!("sprites/{action}-Anim.png"),
                shadow_url: format!("sprites/{action}-Shadow.png"),
            },
            dungeon: "small-ba".to_string(),
        }
    }

    fn walk_catalog() -> AnimCatalog {
        AnimCatalog::new(vec![AnimRecord::new(
            "walk",
            32,
            32,
            DurationSpec::PerFrame(vec![5, 5, 10]),
        )])
    }

    #[test]
    fn test_frame_durations_cycle_short_list() {
        assert_eq!(frame_durations(4, &[5, 5, 10], 20), vec![100, 100, 200, 100]);
    }

    #[test]
    fn test_frame_durations_scalar_applies_to_every_frame() {
        assert_eq!(frame_durations(5, &[8], 20), vec![160; 5]);
    }

    #[test]
    fn test_frame_durations_longer_list_is_truncated() {
        assert_eq!(frame_durations(2, &[1, 2, 3], 20), vec![20, 40]);
    }

    #[test]
    fn test_frame_durations_cyclic_index_property() {
        let durations = [3, 7, 11, 2];
        let n = 19;
        let out = frame_durations(n, &durations, 20);
        assert_eq!(out.len(), n);
        for (i, d) in out.iter().enumerate() {
            assert_eq!(*d, durations[i % durations.len()] * 20);
        }
    }

    #[test]
    fn test_frame_durations_keeps_explicit_zero() {
        assert_eq!(frame_durations(3, &[4, 0], 20), vec![80, 0, 80]);
    }

    #[test]
    fn test_frame_durations_empty_list() {
        assert!(frame_durations(3, &[], 20).is_empty());
    }

    #[test]
    fn test_sprite_ref_defaults_to_sibling_sheets() {
        let sprite = SpriteRef::resolve(
            &walk_catalog(),
            Path::new("sprites/0025/AnimData.xml"),
            "walk",
            None,
            Some("custom/shadow.png".to_string()),
        )
        .unwrap();
        assert_eq!(sprite.action, "walk");
        assert_eq!(
            Path::new(&sprite.anim_url),
            Path::new("sprites/0025/walk-Anim.png")
        );
        assert_eq!(sprite.shadow_url, "custom/shadow.png");
    }

    #[test]
    fn test_sprite_ref_alias_names_sheets_after_target() {
        let catalog = AnimCatalog::new(vec![
            AnimRecord::alias("walk", "run"),
            AnimRecord::new("run", 16, 16, DurationSpec::Uniform(8)),
        ]);
        let sprite =
            SpriteRef::resolve(&catalog, Path::new("AnimData.xml"), "walk", None, None).unwrap();
        assert_eq!(sprite.action, "walk");
        assert_eq!(Path::new(&sprite.anim_url), Path::new("run-Anim.png"));
        assert_eq!(Path::new(&sprite.shadow_url), Path::new("run-Shadow.png"));
    }

    #[test]
    fn test_sprite_ref_unknown_action_faults() {
        let err = SpriteRef::resolve(
            &walk_catalog(),
            Path::new("AnimData.xml"),
            "fly",
            Some("a.png".to_string()),
            Some("b.png".to_string()),
        )
        .unwrap_err();
        assert!(matches!(err, ViewerError::UnknownAction(name) if name == "fly"));
    }

    #[test]
    fn test_init_stores_urls_and_dungeon() {
        let scene = ViewerScene::init(&params(walk_catalog(), "walk")).unwrap();
        assert_eq!(scene.action, "walk");
        assert_eq!(scene.anim_url, "sprites/walk-Anim.png");
        assert_eq!(scene.shadow_url, "sprites/walk-Shadow.png");
        assert_eq!(scene.dungeon, "small-ba");
    }

    #[test]
    fn test_init_unknown_action_faults() {
        let err = ViewerScene::init(&params(walk_catalog(), "fly")).unwrap_err();
        assert!(matches!(err, ViewerError::UnknownAction(_)));
    }

    #[test]
    fn test_declare_assets_keys_and_frame_size() {
        let scene = ViewerScene::init(&params(walk_catalog(), "walk")).unwrap();
        let queue = scene.declare_assets(&ViewerConfig::new());
        assert_eq!(
            queue.requests,
            vec![
                AssetRequest::Image {
                    key: "background".into(),
                    path: "./maps/small-ba.png".into(),
                },
                AssetRequest::Spritesheet {
                    key: "walk-anim".into(),
                    path: "sprites/walk-Anim.png".into(),
                    frame_width: 32,
                    frame_height: 32,
                },
                AssetRequest::Spritesheet {
                    key: "walk-shadow".into(),
                    path: "sprites/walk-Shadow.png".into(),
                    frame_width: 32,
                    frame_height: 32,
                },
            ]
        );
    }

    #[test]
    fn test_build_animation_scenario_a() {
        let scene = ViewerScene::init(&params(walk_catalog(), "walk")).unwrap();
        let layout = SheetLayout::slice(128, 32, 32, 32);
        let seq = scene.build_animation(AnimationKind::Anim, &layout, 20);
        assert_eq!(&*seq.tex_key, "walk-anim");
        assert_eq!(seq.durations(), vec![100, 100, 200, 100]);
        assert_eq!(
            seq.frames.iter().map(|f| f.frame).collect::<Vec<_>>(),
            vec![0, 1, 2, 3]
        );
        assert!(seq.looped);
    }

    #[test]
    fn test_kind_keys() {
        assert_eq!(AnimationKind::Anim.key(), "anim");
        assert_eq!(AnimationKind::Shadow.texture_key("run"), "run-shadow");
    }
}
