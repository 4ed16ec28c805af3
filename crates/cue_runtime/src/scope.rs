//! Scopes: lifecycle containers for mounted sections
//!
//! A scope records ownership of the timelines and triggers created while a
//! section mounts, so the whole set can be torn down atomically when the
//! section unmounts. Teardown is explicit and synchronous; nothing relies
//! on drop order or finalizers for correctness.

use cue_animation::TimelineId;
use cue_scroll::TriggerId;

use crate::engine::ScopeId;

/// Ownership record for one mounted section
#[derive(Default)]
pub struct Scope {
    timelines: Vec<TimelineId>,
    triggers: Vec<TriggerId>,
    children: Vec<ScopeId>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn own_timeline(&mut self, id: TimelineId) {
        self.timelines.push(id);
    }

    pub(crate) fn own_trigger(&mut self, id: TriggerId) {
        self.triggers.push(id);
    }

    pub(crate) fn own_child(&mut self, id: ScopeId) {
        self.children.push(id);
    }

    pub fn timelines(&self) -> &[TimelineId] {
        &self.timelines
    }

    pub fn triggers(&self) -> &[TriggerId] {
        &self.triggers
    }

    pub fn children(&self) -> &[ScopeId] {
        &self.children
    }
}
