//! The shared scroll observer
//!
//! One observer per engine evaluates every registered trigger against the
//! scroll position, at most once per frame tick. It is an explicit value
//! injected into whoever needs it, never ambient global state, so tests can
//! stand up isolated instances.
//!
//! Large scroll jumps are not coalesced: every threshold actually crossed
//! produces its own dispatch, and dispatches are ordered by threshold
//! position along the direction of travel.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use cue_animation::TimelineId;
use cue_core::ScrollPosition;

use crate::trigger::{CrossEvent, ToggleAction, Trigger, TriggerState};

new_key_type! {
    /// Key for a trigger registered with an observer
    pub struct TriggerId;
}

/// One crossing to apply to a bound timeline
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dispatch {
    pub trigger: TriggerId,
    pub timeline: TimelineId,
    pub event: CrossEvent,
    pub action: ToggleAction,
    /// Document scroll offset of the crossed threshold, used for ordering
    pub position: f32,
}

/// Evaluates all registered triggers against scroll movement
#[derive(Default)]
pub struct ScrollObserver {
    triggers: SlotMap<TriggerId, Trigger>,
    position: ScrollPosition,
}

impl ScrollObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a trigger; its state is established on the next evaluation
    /// without firing events for thresholds already behind the scroll
    /// position.
    pub fn register(&mut self, trigger: Trigger) -> TriggerId {
        let id = self.triggers.insert(trigger);
        tracing::debug!(?id, "trigger registered");
        id
    }

    /// Remove a trigger; removing an already-removed id is a no-op
    pub fn unregister(&mut self, id: TriggerId) -> bool {
        let removed = self.triggers.remove(id).is_some();
        if removed {
            tracing::debug!(?id, "trigger unregistered");
        }
        removed
    }

    /// Drop every registered trigger
    pub fn clear(&mut self) {
        self.triggers.clear();
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    pub fn position(&self) -> ScrollPosition {
        self.position
    }

    /// Evaluate all triggers against a new scroll position
    ///
    /// Returns the dispatches for every threshold crossed since the last
    /// evaluation, sorted by threshold position along the travel direction.
    /// Triggers whose target is detached are skipped silently.
    pub fn evaluate(&mut self, position: ScrollPosition) -> Vec<Dispatch> {
        let prev_y = self.position.scroll_y;
        let cur_y = position.scroll_y;
        let scrolling_down = cur_y >= prev_y;

        let mut dispatches: Vec<Dispatch> = Vec::new();

        for (id, trigger) in self.triggers.iter_mut() {
            let Some(bounds) = trigger.bounds() else {
                // Unmounted target: go inert, and re-establish from scratch
                // if it ever reattaches
                trigger.set_state(None);
                continue;
            };
            let thresholds = trigger.thresholds(&bounds, position.viewport_height);

            let Some(mut state) = trigger.state() else {
                // First sighting: adopt the current side of the thresholds
                // without replaying history
                trigger.set_state(Some(Trigger::state_for(thresholds, cur_y)));
                continue;
            };

            let mut events: SmallVec<[(CrossEvent, f32); 2]> = SmallVec::new();
            if scrolling_down {
                if state == TriggerState::BelowStart && cur_y >= thresholds.start {
                    events.push((CrossEvent::Enter, thresholds.start));
                    state = TriggerState::InRange;
                }
                if state == TriggerState::InRange && cur_y >= thresholds.end {
                    events.push((CrossEvent::Leave, thresholds.end));
                    state = TriggerState::PastEnd;
                }
            } else {
                if state == TriggerState::PastEnd && cur_y < thresholds.end {
                    events.push((CrossEvent::EnterBack, thresholds.end));
                    state = TriggerState::InRange;
                }
                if state == TriggerState::InRange && cur_y < thresholds.start {
                    events.push((CrossEvent::LeaveBack, thresholds.start));
                    state = TriggerState::BelowStart;
                }
            }
            trigger.set_state(Some(state));

            for (event, threshold) in events {
                let action = trigger.actions().for_event(event);
                tracing::trace!(?id, ?event, ?action, threshold, "trigger crossing");
                dispatches.push(Dispatch {
                    trigger: id,
                    timeline: trigger.timeline(),
                    event,
                    action,
                    position: threshold,
                });
            }
        }

        // Positional order along the direction of travel, across triggers
        if scrolling_down {
            dispatches.sort_by(|a, b| a.position.total_cmp(&b.position));
        } else {
            dispatches.sort_by(|a, b| b.position.total_cmp(&a.position));
        }

        self.position = position;
        dispatches
    }

    /// Re-derive every trigger's state silently (after a resize)
    ///
    /// Bounding-box-dependent thresholds are recomputed and states adopted
    /// without firing any crossing events.
    pub fn refresh(&mut self, viewport_height: f32) {
        self.position.viewport_height = viewport_height;
        let scroll_y = self.position.scroll_y;
        for (_, trigger) in self.triggers.iter_mut() {
            let Some(bounds) = trigger.bounds() else {
                continue;
            };
            let thresholds = trigger.thresholds(&bounds, viewport_height);
            trigger.set_state(Some(Trigger::state_for(thresholds, scroll_y)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trigger::ToggleActions;
    use cue_core::{Rect, StubTarget};
    use slotmap::SlotMap;

    fn timeline_id() -> TimelineId {
        let mut map: SlotMap<TimelineId, ()> = SlotMap::with_key();
        map.insert(())
    }

    fn pos(scroll_y: f32) -> ScrollPosition {
        ScrollPosition::new(scroll_y, 1000.0)
    }

    fn section_trigger(y: f32) -> Trigger {
        // Section 600px tall, enter at "top 80%", leave at "bottom top"
        let target = StubTarget::shared(Rect::new(0.0, y, 800.0, 600.0));
        Trigger::builder(target, timeline_id()).build()
    }

    #[test]
    fn test_enter_fires_crossing_down() {
        let mut observer = ScrollObserver::new();
        let id = observer.register(section_trigger(2000.0));

        // Establish state below the start threshold (1200)
        assert!(observer.evaluate(pos(0.0)).is_empty());
        assert!(observer.evaluate(pos(1199.0)).is_empty());

        let dispatches = observer.evaluate(pos(1250.0));
        assert_eq!(dispatches.len(), 1);
        assert_eq!(dispatches[0].trigger, id);
        assert_eq!(dispatches[0].event, CrossEvent::Enter);
        assert_eq!(dispatches[0].action, ToggleAction::Play);
    }

    #[test]
    fn test_leave_back_fires_crossing_up() {
        let mut observer = ScrollObserver::new();
        observer.register(section_trigger(2000.0));

        observer.evaluate(pos(0.0));
        observer.evaluate(pos(1250.0)); // Enter
        let dispatches = observer.evaluate(pos(1100.0));
        assert_eq!(dispatches.len(), 1);
        assert_eq!(dispatches[0].event, CrossEvent::LeaveBack);
        assert_eq!(dispatches[0].action, ToggleAction::Reverse);
    }

    #[test]
    fn test_registration_mid_page_fires_nothing() {
        let mut observer = ScrollObserver::new();
        observer.register(section_trigger(2000.0));

        // Already past the start when first evaluated: adopt, don't replay
        let dispatches = observer.evaluate(pos(1500.0));
        assert!(dispatches.is_empty());

        // But scrolling back up from here does fire leave-back
        let dispatches = observer.evaluate(pos(1000.0));
        assert_eq!(dispatches.len(), 1);
        assert_eq!(dispatches[0].event, CrossEvent::LeaveBack);
    }

    #[test]
    fn test_large_jump_fires_both_thresholds_in_order() {
        let mut observer = ScrollObserver::new();
        observer.register(section_trigger(2000.0));

        observer.evaluate(pos(0.0));
        // One frame jumps clean past start (1200) and end (2600)
        let dispatches = observer.evaluate(pos(3000.0));
        assert_eq!(dispatches.len(), 2);
        assert_eq!(dispatches[0].event, CrossEvent::Enter);
        assert_eq!(dispatches[1].event, CrossEvent::Leave);
        assert!(dispatches[0].position < dispatches[1].position);
    }

    #[test]
    fn test_scroll_to_top_orders_across_triggers() {
        let mut observer = ScrollObserver::new();
        observer.register(section_trigger(2000.0)); // start 1200
        observer.register(section_trigger(4000.0)); // start 3200

        observer.evaluate(pos(0.0));
        observer.evaluate(pos(5000.0)); // both entered (and left)

        // Fast scroll-to-top: both triggers unwind, nearest threshold first
        let dispatches = observer.evaluate(pos(0.0));
        let positions: Vec<f32> = dispatches.iter().map(|d| d.position).collect();
        let mut sorted = positions.clone();
        sorted.sort_by(|a, b| b.total_cmp(a));
        assert_eq!(positions, sorted);

        // Every unwound crossing is present individually, none coalesced
        assert!(dispatches
            .iter()
            .any(|d| d.event == CrossEvent::LeaveBack && d.position == 1200.0));
        assert!(dispatches
            .iter()
            .any(|d| d.event == CrossEvent::LeaveBack && d.position == 3200.0));
        assert_eq!(dispatches.len(), 4); // 2x EnterBack + 2x LeaveBack
    }

    #[test]
    fn test_detached_target_skipped_silently() {
        let target = StubTarget::shared(Rect::new(0.0, 2000.0, 800.0, 600.0));
        let mut observer = ScrollObserver::new();
        observer.register(Trigger::builder(target.clone(), timeline_id()).build());

        observer.evaluate(pos(0.0));
        target.borrow_mut().detach();

        // Would have fired Enter, but the section unmounted
        assert!(observer.evaluate(pos(1500.0)).is_empty());

        // Reattached: state re-establishes on next evaluation
        target.borrow_mut().reattach();
        assert!(observer.evaluate(pos(1500.1)).is_empty());
    }

    #[test]
    fn test_refresh_recomputes_silently_after_resize() {
        let mut observer = ScrollObserver::new();
        observer.register(section_trigger(2000.0));

        observer.evaluate(pos(1100.0)); // below start at viewport 1000

        // A taller viewport moves the 80% line below us; no event fires
        observer.refresh(2000.0);
        // start threshold is now 2000 - 1600 = 400, so we're in range;
        // scrolling up past it fires leave-back from the new threshold
        let dispatches = observer.evaluate(ScrollPosition::new(300.0, 2000.0));
        assert_eq!(dispatches.len(), 1);
        assert_eq!(dispatches[0].event, CrossEvent::LeaveBack);
        assert_eq!(dispatches[0].position, 400.0);
    }

    #[test]
    fn test_unregister_is_idempotent() {
        let mut observer = ScrollObserver::new();
        let id = observer.register(section_trigger(2000.0));

        assert!(observer.unregister(id));
        assert!(!observer.unregister(id));
        assert!(observer.is_empty());
    }
}
