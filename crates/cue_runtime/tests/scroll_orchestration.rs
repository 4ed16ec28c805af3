//! Integration tests for the engine + scroll trigger + timeline stack
//!
//! These tests verify that:
//! - Scroll crossings drive timeline playback end to end
//! - Entering then scrolling back restores every animated property exactly
//! - Scope teardown is atomic, synchronous, and idempotent
//! - Large scroll jumps unwind multiple sections in positional order

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use cue_animation::{Easing, Position, Stagger, Timeline, Tween};
use cue_core::{Rect, StubTarget};
use cue_runtime::Engine;
use cue_scroll::Trigger;

const VIEWPORT: f32 = 1000.0;

fn engine() -> Engine {
    let mut engine = Engine::new();
    engine.set_viewport_height(VIEWPORT);
    engine.set_scroll(0.0);
    engine
}

fn scroll_to(engine: &mut Engine, y: f32, frames: u32) {
    engine.set_scroll(y);
    for _ in 0..frames {
        engine.tick(16.0);
    }
}

/// The standard section entrance: opacity 0 -> 1 over 1s, triggered when
/// the section top reaches 80% of the viewport, undone on leave-back.
#[test]
fn test_enter_and_leave_back_round_trip() {
    let section = StubTarget::shared(Rect::new(0.0, 2000.0, 800.0, 600.0));
    let mut engine = engine();

    let scope = engine.create_scope();
    let tween = Tween::builder(section.clone())
        .prop("opacity", 0.0, 1.0)
        .unwrap()
        .ease_name("power2.out")
        .unwrap()
        .duration_ms(1000.0)
        .build();
    let timeline = engine.add_tween(scope, tween, 0.0);
    engine.add_trigger(
        scope,
        Trigger::builder(section.clone(), timeline)
            .start("top 80%")
            .unwrap()
            .toggle_actions("play none none reverse")
            .unwrap()
            .build(),
    );

    // Establish state with the section fully below the viewport
    scroll_to(&mut engine, 0.0, 1);
    let pre_enter = section.borrow().props;

    // Cross the 80% line (threshold at 2000 - 800 = 1200) and settle
    scroll_to(&mut engine, 1300.0, 90);
    assert_eq!(section.borrow().props.opacity, Some(1.0));

    // Back above the start threshold: the entrance unwinds completely
    scroll_to(&mut engine, 1100.0, 90);
    assert_eq!(section.borrow().props.opacity, Some(0.0));
    assert_eq!(section.borrow().props.translate_y, pre_enter.translate_y);
}

#[test]
fn test_opacity_stays_in_unit_range_through_both_transitions() {
    let section = StubTarget::shared(Rect::new(0.0, 2000.0, 800.0, 600.0));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();

    let mut engine = engine();
    let scope = engine.create_scope();
    let tween = Tween::builder(section.clone())
        .prop("opacity", 0.0, 1.0)
        .unwrap()
        .ease_name("power2.out")
        .unwrap()
        .duration_ms(1000.0)
        .on_update(move |_, props| {
            seen_clone.lock().unwrap().push(props.opacity.unwrap());
        })
        .build();
    let timeline = engine.add_tween(scope, tween, 0.0);
    engine.add_trigger(scope, Trigger::builder(section, timeline).build());

    scroll_to(&mut engine, 0.0, 1);
    scroll_to(&mut engine, 1300.0, 90); // enter, play to completion
    scroll_to(&mut engine, 1100.0, 90); // leave-back, reverse to zero

    let seen = seen.lock().unwrap();
    assert!(seen.len() > 10);
    assert!(seen.iter().all(|v| (0.0..=1.0).contains(v)));
    assert_eq!(*seen.last().unwrap(), 0.0);
}

#[test]
fn test_no_replay_on_reentry_from_below() {
    let section = StubTarget::shared(Rect::new(0.0, 2000.0, 800.0, 600.0));
    let completions = Arc::new(Mutex::new(0));
    let completions_clone = completions.clone();

    let mut engine = engine();
    let scope = engine.create_scope();

    let mut timeline = Timeline::new();
    timeline.add(
        Position::At(0.0),
        Tween::builder(section.clone())
            .prop("opacity", 0.0, 1.0)
            .unwrap()
            .duration_ms(200.0)
            .build(),
    );
    timeline.on_complete(move || *completions_clone.lock().unwrap() += 1);
    let timeline = engine.add_timeline(scope, timeline);

    engine.add_trigger(
        scope,
        Trigger::builder(section, timeline)
            .end("bottom top")
            .unwrap()
            .build(),
    );

    scroll_to(&mut engine, 0.0, 1);
    scroll_to(&mut engine, 1500.0, 30); // enter -> play
    scroll_to(&mut engine, 3000.0, 5); // leave (action: none)
    scroll_to(&mut engine, 1500.0, 30); // enter-back (action: none)

    // Played exactly once; enter-back replays nothing
    assert_eq!(*completions.lock().unwrap(), 1);
}

#[test]
fn test_staggered_cards_enter_in_registration_order() {
    let cards: Vec<_> = (0..4)
        .map(|i| StubTarget::shared(Rect::new(0.0, 2000.0 + i as f32 * 10.0, 300.0, 200.0)))
        .collect();

    let mut engine = engine();
    let scope = engine.create_scope();

    let mut timeline = Timeline::new();
    let tweens = cards
        .iter()
        .map(|card| {
            Tween::builder(card.clone())
                .prop("opacity", 0.0, 1.0)
                .unwrap()
                .ease(Easing::Linear)
                .duration_ms(300.0)
                .build()
        })
        .collect();
    timeline.add_staggered(Position::At(0.0), tweens, &Stagger::each(200.0));
    let timeline = engine.add_timeline(scope, timeline);
    engine.add_trigger(scope, Trigger::builder(cards[0].clone(), timeline).build());

    scroll_to(&mut engine, 0.0, 1);
    engine.set_scroll(1500.0);

    // 250ms in: card 0 is past its window start, card 3 has not begun
    for _ in 0..16 {
        engine.tick(16.0);
    }
    let o: Vec<Option<f32>> = cards.iter().map(|c| c.borrow().props.opacity).collect();
    assert!(o[0].unwrap() > 0.0);
    assert!(o[1].unwrap() < o[0].unwrap());
    assert_eq!(o[3], None); // still waiting, nothing written

    // Settle: everyone fully in
    for _ in 0..90 {
        engine.tick(16.0);
    }
    for card in &cards {
        assert_eq!(card.borrow().props.opacity, Some(1.0));
    }
}

#[test]
fn test_fast_scroll_to_top_unwinds_every_section() {
    let near = StubTarget::shared(Rect::new(0.0, 2000.0, 800.0, 600.0));
    let far = StubTarget::shared(Rect::new(0.0, 4000.0, 800.0, 600.0));

    let mut engine = engine();
    let scope = engine.create_scope();

    for section in [&near, &far] {
        let tween = Tween::builder(section.clone())
            .prop("opacity", 0.0, 1.0)
            .unwrap()
            .duration_ms(100.0)
            .build();
        let timeline = engine.add_tween(scope, tween, 0.0);
        engine.add_trigger(scope, Trigger::builder(section.clone(), timeline).build());
    }

    scroll_to(&mut engine, 0.0, 1);
    scroll_to(&mut engine, 5000.0, 30); // both entered and completed

    assert_eq!(near.borrow().props.opacity, Some(1.0));
    assert_eq!(far.borrow().props.opacity, Some(1.0));

    // One giant jump back to the top: both leave-backs fire and reverse
    scroll_to(&mut engine, 0.0, 30);
    assert_eq!(near.borrow().props.opacity, Some(0.0));
    assert_eq!(far.borrow().props.opacity, Some(0.0));
}

#[test]
fn test_revert_scope_is_atomic_and_idempotent() {
    let section = StubTarget::shared(Rect::new(0.0, 2000.0, 800.0, 600.0));
    let mut engine = engine();

    let scope = engine.create_scope();
    let tween = Tween::builder(section.clone())
        .prop("opacity", 0.0, 1.0)
        .unwrap()
        .duration_ms(1000.0)
        .build();
    let timeline = engine.add_tween(scope, tween, 0.0);
    engine.add_trigger(scope, Trigger::builder(section.clone(), timeline).build());

    scroll_to(&mut engine, 0.0, 1);
    scroll_to(&mut engine, 1300.0, 10); // mid-entrance

    engine.revert_scope(scope);
    assert_eq!(engine.trigger_count(), 0);
    assert_eq!(engine.timeline_count(), 0);

    // Values freeze where the kill left them; further frames change nothing
    let frozen = section.borrow().props;
    scroll_to(&mut engine, 1100.0, 30);
    assert_eq!(section.borrow().props, frozen);

    // Second revert is a guaranteed no-op
    engine.revert_scope(scope);
    assert_eq!(engine.trigger_count(), 0);
}

#[test]
fn test_nested_scope_reverts_with_parent() {
    let outer = StubTarget::shared(Rect::new(0.0, 2000.0, 800.0, 600.0));
    let inner = StubTarget::shared(Rect::new(0.0, 2100.0, 300.0, 200.0));

    let mut engine = engine();
    let parent = engine.create_scope();
    let child = engine.create_scope();
    engine.adopt_scope(parent, child);

    for (scope, target) in [(parent, &outer), (child, &inner)] {
        let tween = Tween::builder(target.clone())
            .prop("opacity", 0.0, 1.0)
            .unwrap()
            .duration_ms(500.0)
            .build();
        let timeline = engine.add_tween(scope, tween, 0.0);
        engine.add_trigger(scope, Trigger::builder(target.clone(), timeline).build());
    }
    assert_eq!(engine.trigger_count(), 2);

    engine.revert_scope(parent);
    assert_eq!(engine.trigger_count(), 0);
    assert_eq!(engine.timeline_count(), 0);
}

#[test]
fn test_unmounted_sibling_does_not_disturb_others() {
    let staying = StubTarget::shared(Rect::new(0.0, 2000.0, 800.0, 600.0));
    let leaving: Rc<RefCell<StubTarget>> =
        StubTarget::shared(Rect::new(0.0, 2000.0, 800.0, 600.0));

    let mut engine = engine();
    let scope = engine.create_scope();
    for target in [&staying, &leaving] {
        let tween = Tween::builder(target.clone())
            .prop("opacity", 0.0, 1.0)
            .unwrap()
            .duration_ms(100.0)
            .build();
        let timeline = engine.add_tween(scope, tween, 0.0);
        engine.add_trigger(scope, Trigger::builder(target.clone(), timeline).build());
    }

    scroll_to(&mut engine, 0.0, 1);
    leaving.borrow_mut().detach();

    // The detached sibling is skipped silently; the other one still enters
    scroll_to(&mut engine, 1300.0, 30);
    assert_eq!(staying.borrow().props.opacity, Some(1.0));
    assert_eq!(leaving.borrow().props.opacity, None);
}
