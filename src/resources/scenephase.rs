//! Viewer scene phase resources.
//!
//! The scene runs through `Init -> Preload -> Create -> Running`, or ends in
//! `Failed` when a phase faults. These resources track the authoritative
//! phase and any pending transition requested by a phase hook. See
//! `crate::events::scenephase::observe_scenephase_change_event` for how a
//! transition is applied.

use bevy_ecs::prelude::Resource;

/// Discrete phases of the viewer scene.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ScenePhases {
    #[default]
    None,
    Init,
    Preload,
    Create,
    Running,
    Failed,
}

/// Representation of a requested next phase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NextScenePhases {
    #[default]
    Unchanged,
    Pending(ScenePhases),
}

/// Authoritative current phase.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ScenePhase {
    current: ScenePhases,
}

impl ScenePhase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> &ScenePhases {
        &self.current
    }

    /// Update the current phase immediately, without running hooks.
    pub fn set(&mut self, phase: ScenePhases) {
        self.current = phase;
    }
}

/// Intent to change to a new phase.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NextScenePhase {
    next: NextScenePhases,
}

impl NextScenePhase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> &NextScenePhases {
        &self.next
    }

    /// Request a transition to `next`. The `check_pending_phase` system
    /// emits the change event.
    pub fn set(&mut self, next: ScenePhases) {
        self.next = NextScenePhases::Pending(next);
    }

    pub fn reset(&mut self) {
        self.next = NextScenePhases::Unchanged;
    }
}
