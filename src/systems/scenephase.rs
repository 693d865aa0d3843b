use crate::events::scenephase::ScenePhaseChangedEvent;
use crate::resources::scenephase::{NextScenePhase, NextScenePhases, ScenePhase, ScenePhases};
use bevy_ecs::prelude::*;

/// Emit [`ScenePhaseChangedEvent`] while a transition is pending.
pub fn check_pending_phase(mut commands: Commands, next_phase: Res<NextScenePhase>) {
    if let NextScenePhases::Pending(_) = next_phase.get() {
        commands.trigger(ScenePhaseChangedEvent {});
    }
}

pub fn phase_is_running(phase: Res<ScenePhase>) -> bool {
    matches!(phase.get(), ScenePhases::Running)
}
