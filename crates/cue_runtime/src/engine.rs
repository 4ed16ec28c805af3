//! The frame-driven engine
//!
//! One engine per application: it owns every timeline, the shared scroll
//! observer, and the scope registry. The host feeds it scroll/viewport
//! updates and one `tick` per frame; within a tick, trigger evaluation runs
//! before timeline property writes, so a crossing fired this frame is
//! reflected in this frame's render.
//!
//! Single-threaded and cooperative: nothing here blocks, and `kill`/`revert`
//! take effect synchronously before returning.

use slotmap::{new_key_type, SlotMap};

use cue_animation::{Position, Timeline, TimelineId, Tween};
use cue_core::ScrollPosition;
use cue_scroll::{ScrollObserver, Trigger, TriggerId};

use crate::scope::Scope;

new_key_type! {
    /// Key for a scope owned by an engine
    pub struct ScopeId;
}

/// Owns all timelines, triggers, and scopes, and drives them per frame
#[derive(Default)]
pub struct Engine {
    timelines: SlotMap<TimelineId, Timeline>,
    scopes: SlotMap<ScopeId, Scope>,
    observer: ScrollObserver,
    /// Host-reported position, consumed by the next tick's evaluation
    pending: ScrollPosition,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Host environment inputs
    // ========================================================================

    /// Report the current scroll offset (coalesced: read once per tick)
    pub fn set_scroll(&mut self, scroll_y: f32) {
        self.pending.scroll_y = scroll_y;
    }

    /// Report a viewport resize; trigger states re-derive silently
    pub fn set_viewport_height(&mut self, height: f32) {
        self.pending.viewport_height = height;
        self.observer.refresh(height);
    }

    pub fn scroll_position(&self) -> ScrollPosition {
        self.pending
    }

    // ========================================================================
    // Scopes
    // ========================================================================

    /// Create a lifecycle container for a mounting section
    pub fn create_scope(&mut self) -> ScopeId {
        let id = self.scopes.insert(Scope::new());
        tracing::debug!(?id, "scope created");
        id
    }

    /// Add a fully built timeline under a scope
    pub fn add_timeline(&mut self, scope: ScopeId, timeline: Timeline) -> TimelineId {
        let id = self.timelines.insert(timeline);
        match self.scopes.get_mut(scope) {
            Some(scope) => scope.own_timeline(id),
            None => tracing::warn!(?scope, "timeline added under unknown scope"),
        }
        id
    }

    /// Convenience: wrap a single tween in its own timeline
    ///
    /// `delay_ms` is the tween's start offset within the new timeline.
    pub fn add_tween(&mut self, scope: ScopeId, tween: Tween, delay_ms: f32) -> TimelineId {
        let mut timeline = Timeline::new();
        timeline.add(Position::At(delay_ms), tween);
        self.add_timeline(scope, timeline)
    }

    /// Register a trigger under a scope
    pub fn add_trigger(&mut self, scope: ScopeId, trigger: Trigger) -> TriggerId {
        let id = self.observer.register(trigger);
        match self.scopes.get_mut(scope) {
            Some(scope) => scope.own_trigger(id),
            None => tracing::warn!(?scope, "trigger added under unknown scope"),
        }
        id
    }

    /// Make `child` an owned handle of `parent` (composition-only nesting)
    ///
    /// Reverting the parent then reverts the child too.
    pub fn adopt_scope(&mut self, parent: ScopeId, child: ScopeId) {
        match self.scopes.get_mut(parent) {
            Some(scope) => scope.own_child(child),
            None => tracing::warn!(?parent, "adopt_scope on unknown parent"),
        }
    }

    /// Tear down everything a scope owns, synchronously
    ///
    /// Unregisters every owned trigger from the observer and kills every
    /// owned timeline before returning; child scopes revert recursively.
    /// Calling this twice for the same scope is a guaranteed no-op.
    pub fn revert_scope(&mut self, id: ScopeId) {
        let Some(scope) = self.scopes.remove(id) else {
            return;
        };
        tracing::debug!(?id, "scope reverted");
        for trigger in scope.triggers() {
            self.observer.unregister(*trigger);
        }
        for timeline in scope.timelines() {
            if let Some(tl) = self.timelines.get_mut(*timeline) {
                tl.kill();
            }
            self.timelines.remove(*timeline);
        }
        for child in scope.children() {
            self.revert_scope(*child);
        }
    }

    // ========================================================================
    // Timeline access
    // ========================================================================

    pub fn timeline(&self, id: TimelineId) -> Option<&Timeline> {
        self.timelines.get(id)
    }

    pub fn timeline_mut(&mut self, id: TimelineId) -> Option<&mut Timeline> {
        self.timelines.get_mut(id)
    }

    pub fn timeline_count(&self) -> usize {
        self.timelines.len()
    }

    pub fn trigger_count(&self) -> usize {
        self.observer.len()
    }

    /// Whether any timeline wants frame ticks right now
    pub fn has_active_timelines(&self) -> bool {
        self.timelines.values().any(|tl| tl.is_active())
    }

    // ========================================================================
    // Frame ticking
    // ========================================================================

    /// Advance one frame
    ///
    /// Evaluates every trigger against the latest scroll position first
    /// (bounding boxes re-read, every crossed threshold dispatched in
    /// positional order), then ticks every timeline so this tick's writes
    /// already reflect this tick's crossings.
    pub fn tick(&mut self, dt_ms: f32) {
        let dispatches = self.observer.evaluate(self.pending);
        for dispatch in dispatches {
            match self.timelines.get_mut(dispatch.timeline) {
                Some(timeline) => dispatch.action.apply(timeline),
                // Timeline reverted while its trigger lived on: skip
                None => tracing::trace!(?dispatch.timeline, "dispatch to missing timeline"),
            }
        }

        for timeline in self.timelines.values_mut() {
            timeline.tick(dt_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cue_animation::Easing;
    use cue_core::{Rect, StubTarget};

    #[test]
    fn test_trigger_action_lands_same_tick() {
        let target = StubTarget::shared(Rect::new(0.0, 2000.0, 800.0, 600.0));
        let mut engine = Engine::new();
        engine.set_viewport_height(1000.0);

        let scope = engine.create_scope();
        let tween = Tween::builder(target.clone())
            .prop("opacity", 0.0, 1.0)
            .unwrap()
            .ease(Easing::Linear)
            .duration_ms(1000.0)
            .build();
        let timeline = engine.add_tween(scope, tween, 0.0);
        engine.add_trigger(scope, Trigger::builder(target.clone(), timeline).build());

        // Establish state below start (threshold 1200)
        engine.set_scroll(0.0);
        engine.tick(16.0);
        assert_eq!(target.borrow().apply_count, 0);

        // Cross the start line: play starts and writes this very tick
        engine.set_scroll(1300.0);
        engine.tick(16.0);
        assert!(target.borrow().apply_count > 0);
        assert!(target.borrow().props.opacity.unwrap() > 0.0);
    }

    #[test]
    fn test_scroll_between_ticks_is_coalesced() {
        let target = StubTarget::shared(Rect::new(0.0, 2000.0, 800.0, 600.0));
        let mut engine = Engine::new();
        engine.set_viewport_height(1000.0);

        let scope = engine.create_scope();
        let tween = Tween::builder(target.clone())
            .prop("opacity", 0.0, 1.0)
            .unwrap()
            .duration_ms(100.0)
            .build();
        let timeline = engine.add_tween(scope, tween, 0.0);
        engine.add_trigger(scope, Trigger::builder(target.clone(), timeline).build());

        engine.set_scroll(0.0);
        engine.tick(16.0);

        // Many scroll reports between frames: only the last one is seen
        engine.set_scroll(1250.0);
        engine.set_scroll(900.0);
        engine.tick(16.0);
        // Net movement never crossed into range and back; nothing played
        assert_eq!(target.borrow().apply_count, 0);
    }
}
