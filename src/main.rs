//! Sprite animation viewer entry point.
//!
//! Plays one animation of a sprite, plus its shadow, looping over a dungeon
//! map background. Built on:
//! - **raylib** for windowing, textures and drawing
//! - **bevy_ecs** for the scene's resources, entities and phase hooks
//!
//! # Main Loop
//!
//! 1. Load the `AnimData` catalog and the INI configuration
//! 2. Open the window, insert resources and register the phase hooks
//! 3. Enter the `Init` phase; the scene then moves through `Preload` and
//!    `Create` on the following frames
//! 4. Each frame: advance time, run systems, render
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- sprites/0025/AnimData.xml --action Walk --dungeon small-ba
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::PathBuf;

use animviewer::events::scenephase::{
    CREATE_HOOK, INIT_HOOK, PRELOAD_HOOK, ScenePhaseChangedEvent, observe_scenephase_change_event,
};
use animviewer::resources::animationstore::AnimationStore;
use animviewer::resources::animcatalog::AnimCatalog;
use animviewer::resources::scenephase::{NextScenePhase, ScenePhase, ScenePhases};
use animviewer::resources::shaderstore::ShaderStore;
use animviewer::resources::spritesheets::SpriteSheets;
use animviewer::resources::systemsstore::SystemsStore;
use animviewer::resources::texturestore::TextureStore;
use animviewer::resources::viewerconfig::ViewerConfig;
use animviewer::resources::worldtime::WorldTime;
use animviewer::scene::{self, SpriteRef, ViewerParams};
use animviewer::systems::animation::animation;
use animviewer::systems::render::render_system;
use animviewer::systems::scenephase::{check_pending_phase, phase_is_running};
use animviewer::systems::time::update_world_time;
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::Parser;

/// Sprite animation viewer
#[derive(Parser)]
#[command(version, about = "Plays a sprite animation and its shadow over a dungeon map.")]
struct Cli {
    /// Animation metadata (AnimData.xml, or its .json rendition).
    anim_data: PathBuf,

    /// Action to play.
    #[arg(long, default_value = "Walk")]
    action: String,

    /// Animation spritesheet. Defaults to `{action}-Anim.png` next to ANIM_DATA.
    #[arg(long)]
    anim_url: Option<String>,

    /// Shadow spritesheet. Defaults to `{action}-Shadow.png` next to ANIM_DATA.
    #[arg(long)]
    shadow_url: Option<String>,

    /// Background map, loaded from `{public_url}/maps/{dungeon}.png`.
    #[arg(long, default_value = "small-ba")]
    dungeon: String,

    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Print the animation names in ANIM_DATA and exit.
    #[arg(long)]
    list: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let catalog = match AnimCatalog::load(&cli.anim_data) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    // Early-exit: list animations (no window needed)
    if cli.list {
        for name in catalog.names() {
            println!("{name}");
        }
        return;
    }

    let mut config = ViewerConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        log::info!("{}, using defaults", e);
    }

    // Resolve before opening the window so a bad action fails fast
    let sprite = match SpriteRef::resolve(
        &catalog,
        &cli.anim_data,
        &cli.action,
        cli.anim_url.clone(),
        cli.shadow_url.clone(),
    ) {
        Ok(sprite) => sprite,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    // --------------- Raylib window ---------------
    let (mut rl, thread) = raylib::init()
        .size(config.window_width as i32, config.window_height as i32)
        .title("Animation Viewer")
        .build();
    rl.set_target_fps(config.target_fps);

    let shaders = ShaderStore::with_builtin(&mut rl, &thread);

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(config.time_scale));
    world.insert_resource(ViewerParams {
        catalog,
        sprite,
        dungeon: cli.dungeon.clone(),
    });
    world.insert_resource(config);
    world.insert_resource(ScenePhase::new());
    world.insert_resource(NextScenePhase::new());
    world.insert_resource(AnimationStore::new());
    world.insert_resource(TextureStore::<raylib::prelude::Texture2D>::new());
    world.insert_resource(SpriteSheets::new());
    world.insert_non_send_resource(shaders);
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    let mut systems_store = SystemsStore::new();
    systems_store.insert(INIT_HOOK, world.register_system(scene::init));
    systems_store.insert(PRELOAD_HOOK, world.register_system(scene::preload));
    systems_store.insert(CREATE_HOOK, world.register_system(scene::create));
    world.insert_resource(systems_store);

    world.spawn(Observer::new(observe_scenephase_change_event));
    world.flush();

    world.resource_mut::<NextScenePhase>().set(ScenePhases::Init);
    world.trigger(ScenePhaseChangedEvent {});

    let mut update = Schedule::default();
    update.add_systems(check_pending_phase);
    update.add_systems(animation.run_if(phase_is_running));

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
        && *world.resource::<ScenePhase>().get() != ScenePhases::Failed
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);
        render_system(&mut world);

        world.clear_trackers();
    }

    if *world.resource::<ScenePhase>().get() == ScenePhases::Failed {
        std::process::exit(1);
    }
}
