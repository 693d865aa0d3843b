//! Scene phase transition event and observer.
//!
//! Phase hooks request the next [`ScenePhases`] through [`NextScenePhase`].
//! Emitting a [`ScenePhaseChangedEvent`] runs the observer in this module,
//! which applies the transition to [`ScenePhase`] and runs the enter hook
//! stored in [`SystemsStore`] for the new phase.
use crate::resources::scenephase::NextScenePhases::{Pending, Unchanged};
use crate::resources::scenephase::{NextScenePhase, ScenePhase, ScenePhases};
use crate::resources::systemsstore::SystemsStore;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, error, info, warn};

/// Hook keys in [`SystemsStore`].
pub const INIT_HOOK: &str = "init";
pub const PRELOAD_HOOK: &str = "preload";
pub const CREATE_HOOK: &str = "create";

/// Event used to indicate that a pending phase transition should be applied.
#[derive(Event, Debug, Clone, Copy)]
pub struct ScenePhaseChangedEvent {}

/// Observer that applies a pending phase transition.
///
/// Contract
/// - Reads the intention from [`NextScenePhase`].
/// - If pending, copies the new value into [`ScenePhase`], resets the request
///   and runs the enter hook of the new phase.
/// - If any required resource is missing, logs a diagnostic and returns.
pub fn observe_scenephase_change_event(
    _trigger: On<ScenePhaseChangedEvent>,
    mut commands: Commands,
    mut next_phase: Option<ResMut<NextScenePhase>>,
    mut phase: Option<ResMut<ScenePhase>>,
    systems_store: Res<SystemsStore>,
) {
    debug!("ScenePhaseChangedEvent triggered");

    let (Some(next_phase), Some(phase)) = (next_phase.as_deref_mut(), phase.as_deref_mut())
    else {
        warn!("NextScenePhase or ScenePhase missing in observe_scenephase_change_event");
        return;
    };

    match next_phase.get().clone() {
        Pending(new_phase) => {
            info!("Scene phase {:?} -> {:?}", phase.get(), new_phase);
            phase.set(new_phase.clone());
            next_phase.reset();
            on_phase_enter(&new_phase, &mut commands, &systems_store);
        }
        Unchanged => debug!("No phase change pending."),
    }
}

fn on_phase_enter(phase: &ScenePhases, commands: &mut Commands, systems_store: &SystemsStore) {
    let hook = match phase {
        ScenePhases::Init => INIT_HOOK,
        ScenePhases::Preload => PRELOAD_HOOK,
        ScenePhases::Create => CREATE_HOOK,
        ScenePhases::None => return,
        ScenePhases::Running => {
            info!("Scene running");
            return;
        }
        ScenePhases::Failed => {
            error!("Scene failed, nothing will be played");
            return;
        }
    };
    match systems_store.get(hook) {
        Some(id) => commands.run_system(*id),
        None => warn!("No '{}' hook registered in SystemsStore", hook),
    }
}
