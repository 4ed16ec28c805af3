//! Timeline orchestration
//!
//! A timeline is an ordered composition of tweens (and nested timelines)
//! with relative or absolute start offsets and a playback state machine.
//! Sequenced entries may overlap by starting before the previous entry
//! finishes, which is how layered entrances are built.
//!
//! Tick semantics: an entry writes only when its time window intersects the
//! span covered by the current tick, so a tween waiting for its window
//! simply writes nothing that frame. `seek` is different: it recomputes and
//! writes every entry's clamped instantaneous value so no residual state
//! from another progress survives.
//!
//! Timelines can loop: `repeat` grants extra passes (-1 for unbounded) and
//! `yoyo` makes every other pass run backward, the idle floating/pulse
//! idiom. The completion callback fires only after the final pass.

use std::panic::{catch_unwind, AssertUnwindSafe};

use slotmap::new_key_type;

use crate::stagger::Stagger;
use crate::tween::Tween;

new_key_type! {
    /// Key for a timeline stored in an engine's timeline map
    pub struct TimelineId;
}

/// Where a new entry starts within the timeline
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Position {
    /// Absolute offset from the timeline start, in milliseconds
    At(f32),
    /// Right after the previous entry ends
    #[default]
    AfterPrevious,
    /// This many milliseconds before the previous entry ends (the
    /// overlapped-entrance idiom)
    Overlap(f32),
}

/// Playback state machine
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
    Paused,
    Reversing,
    Completed,
    ReversedComplete,
}

/// Direction of the most recent play/reverse, used by `resume`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum LastDirection {
    #[default]
    Forward,
    Backward,
}

/// Completion callback
pub type CompleteFn = Box<dyn FnMut()>;

enum EntryKind {
    Tween(Tween),
    Timeline(Timeline),
}

struct Entry {
    start_ms: f32,
    duration_ms: f32,
    kind: EntryKind,
}

/// An ordered composition of tweens with playback control
#[derive(Default)]
pub struct Timeline {
    entries: Vec<Entry>,
    duration_ms: f32,
    time_ms: f32,
    state: PlaybackState,
    last_direction: LastDirection,
    /// Extra passes after the first; -1 loops forever
    repeat: i32,
    yoyo: bool,
    passes_done: i32,
    /// Currently on the backward leg of a yoyo pass
    yoyo_back: bool,
    killed: bool,
    on_complete: Option<CompleteFn>,
    complete_consumed: bool,
    on_reverse_complete: Option<CompleteFn>,
    reverse_consumed: bool,
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            // Nothing behind progress 0 yet, so a reverse from here is silent
            reverse_consumed: true,
            ..Default::default()
        }
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Add a tween at the given position
    pub fn add(&mut self, position: Position, tween: Tween) -> &mut Self {
        let start_ms = self.resolve_start(position);
        let duration_ms = tween.duration_ms();
        self.push_entry(start_ms, duration_ms, EntryKind::Tween(tween));
        self
    }

    /// Add a nested timeline at the given position
    pub fn add_timeline(&mut self, position: Position, timeline: Timeline) -> &mut Self {
        let start_ms = self.resolve_start(position);
        let duration_ms = timeline.duration_ms();
        self.push_entry(start_ms, duration_ms, EntryKind::Timeline(timeline));
        self
    }

    /// Add one tween per target, fanned out by the stagger's offsets
    ///
    /// The whole group shares the position; each tween starts at the group
    /// start plus its stagger offset, in the order the tweens were given.
    pub fn add_staggered(
        &mut self,
        position: Position,
        tweens: Vec<Tween>,
        stagger: &Stagger,
    ) -> &mut Self {
        let group_start = self.resolve_start(position);
        let offsets = stagger.offsets(tweens.len());
        for (tween, offset) in tweens.into_iter().zip(offsets) {
            let duration_ms = tween.duration_ms();
            self.push_entry(group_start + offset, duration_ms, EntryKind::Tween(tween));
        }
        self
    }

    /// Register the forward-completion callback (fires once per arrival)
    pub fn on_complete<F: FnMut() + 'static>(&mut self, f: F) -> &mut Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    /// Register the reverse-completion callback (fires once per arrival)
    pub fn on_reverse_complete<F: FnMut() + 'static>(&mut self, f: F) -> &mut Self {
        self.on_reverse_complete = Some(Box::new(f));
        self
    }

    /// Grant extra playback passes after the first; -1 loops forever
    ///
    /// The completion callback fires only when the final pass ends, never
    /// on an intermediate wrap.
    pub fn repeat(&mut self, count: i32) -> &mut Self {
        self.repeat = count;
        self
    }

    /// Run every other pass backward instead of snapping back to the start
    ///
    /// A backward leg spends one pass of the repeat budget, so `repeat(1)`
    /// with yoyo plays forward then backward and finishes at the starting
    /// values.
    pub fn yoyo(&mut self, enabled: bool) -> &mut Self {
        self.yoyo = enabled;
        self
    }

    fn resolve_start(&self, position: Position) -> f32 {
        let prev_end = self
            .entries
            .last()
            .map(|e| e.start_ms + e.duration_ms)
            .unwrap_or(0.0);
        match position {
            Position::At(ms) => ms.max(0.0),
            Position::AfterPrevious => prev_end,
            Position::Overlap(ms) => (prev_end - ms).max(0.0),
        }
    }

    fn push_entry(&mut self, start_ms: f32, duration_ms: f32, kind: EntryKind) {
        self.duration_ms = self.duration_ms.max(start_ms + duration_ms);
        self.entries.push(Entry {
            start_ms,
            duration_ms,
            kind,
        });
    }

    // ========================================================================
    // Playback control
    // ========================================================================

    /// Advance progress forward each tick until 1.0
    pub fn play(&mut self) {
        if self.killed {
            return;
        }
        if self.time_ms >= self.duration_ms && self.state == PlaybackState::Completed {
            return;
        }
        self.state = PlaybackState::Playing;
        self.last_direction = LastDirection::Forward;
    }

    /// Decrease progress each tick until 0.0
    pub fn reverse(&mut self) {
        if self.killed {
            return;
        }
        if self.time_ms <= 0.0
            && matches!(
                self.state,
                PlaybackState::Idle | PlaybackState::ReversedComplete
            )
        {
            return;
        }
        self.state = PlaybackState::Reversing;
        self.last_direction = LastDirection::Backward;
        // Explicit reverse overrides any loop in flight
        self.yoyo_back = false;
    }

    /// Freeze progress at the current point
    pub fn pause(&mut self) {
        if matches!(
            self.state,
            PlaybackState::Playing | PlaybackState::Reversing
        ) {
            self.state = PlaybackState::Paused;
        }
    }

    /// Continue from a pause in the last direction
    pub fn resume(&mut self) {
        if self.state != PlaybackState::Paused {
            return;
        }
        match self.last_direction {
            LastDirection::Forward => self.state = PlaybackState::Playing,
            LastDirection::Backward => self.state = PlaybackState::Reversing,
        }
    }

    /// Jump to a progress value and rewrite every entry consistently
    ///
    /// Progress addresses a single pass; loop bookkeeping starts over. No
    /// callbacks fire from a seek; only tick-driven arrival at a boundary
    /// invokes completion callbacks.
    pub fn seek(&mut self, progress: f32) {
        if self.killed {
            return;
        }
        let progress = progress.clamp(0.0, 1.0);
        self.time_ms = progress * self.duration_ms;
        self.passes_done = 0;
        self.yoyo_back = false;
        self.write_all_at(self.time_ms);

        self.complete_consumed = self.time_ms >= self.duration_ms;
        self.reverse_consumed = self.time_ms <= 0.0;
        self.state = if progress <= 0.0 {
            PlaybackState::Idle
        } else if progress >= 1.0 {
            PlaybackState::Completed
        } else {
            PlaybackState::Paused
        };
    }

    /// Seek to 0 and play
    pub fn restart(&mut self) {
        self.seek(0.0);
        self.play();
    }

    /// Detach from the frame clock; targets retain their last written values
    pub fn kill(&mut self) {
        self.killed = true;
    }

    pub fn is_killed(&self) -> bool {
        self.killed
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }

    /// Current progress in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.duration_ms > 0.0 {
            self.time_ms / self.duration_ms
        } else {
            0.0
        }
    }

    /// Whether the timeline wants frame ticks right now
    pub fn is_active(&self) -> bool {
        !self.killed
            && matches!(
                self.state,
                PlaybackState::Playing | PlaybackState::Reversing
            )
    }

    // ========================================================================
    // Frame ticking
    // ========================================================================

    /// Advance by a frame delta, writing every entry the tick touched
    pub fn tick(&mut self, dt_ms: f32) {
        if self.killed {
            return;
        }
        match self.state {
            PlaybackState::Playing if self.yoyo_back => {
                let prev = self.time_ms;
                self.time_ms = (prev - dt_ms).max(0.0);
                self.write_span(prev, self.time_ms);
                if self.time_ms <= 0.0 {
                    if self.passes_remain() {
                        self.passes_done += 1;
                        self.yoyo_back = false;
                    } else {
                        self.state = PlaybackState::Completed;
                        self.fire_complete();
                    }
                }
            }
            PlaybackState::Playing => {
                let prev = self.time_ms;
                self.time_ms = (prev + dt_ms).min(self.duration_ms);
                if self.time_ms > 0.0 {
                    self.reverse_consumed = false;
                }
                self.write_span(prev, self.time_ms);
                if self.time_ms >= self.duration_ms {
                    if self.passes_remain() {
                        self.passes_done += 1;
                        if self.yoyo {
                            self.yoyo_back = true;
                        } else {
                            // Snap back for the next pass; a wrap fires no
                            // callbacks
                            self.time_ms = 0.0;
                        }
                    } else {
                        self.state = PlaybackState::Completed;
                        self.fire_complete();
                    }
                }
            }
            PlaybackState::Reversing => {
                let prev = self.time_ms;
                self.time_ms = (prev - dt_ms).max(0.0);
                if self.time_ms < self.duration_ms {
                    self.complete_consumed = false;
                }
                self.write_span(prev, self.time_ms);
                if self.time_ms <= 0.0 {
                    self.state = PlaybackState::ReversedComplete;
                    self.fire_reverse_complete();
                }
            }
            _ => {}
        }
    }

    /// Write every entry whose window intersects the tick's time span
    fn write_span(&mut self, from_ms: f32, to_ms: f32) {
        let lo = from_ms.min(to_ms);
        let hi = from_ms.max(to_ms);
        for entry in &mut self.entries {
            let start = entry.start_ms;
            let end = start + entry.duration_ms;
            if end < lo || start > hi {
                continue;
            }
            match &mut entry.kind {
                EntryKind::Tween(tween) => {
                    let t = ((to_ms - start) / entry.duration_ms).clamp(0.0, 1.0);
                    tween.apply_at(t);
                }
                EntryKind::Timeline(child) => {
                    let from_local = from_ms - start;
                    let to_local = to_ms - start;
                    child.write_span(from_local, to_local);
                    child.time_ms = to_local.clamp(0.0, child.duration_ms);
                    if to_local >= child.duration_ms && from_local < child.duration_ms {
                        child.fire_complete();
                    } else if to_local <= 0.0 && from_local > 0.0 {
                        child.fire_reverse_complete();
                    }
                    if to_local < child.duration_ms {
                        child.complete_consumed = false;
                    }
                    if to_local > 0.0 {
                        child.reverse_consumed = false;
                    }
                }
            }
        }
    }

    /// Write every entry's clamped value for an arbitrary time (seek path)
    fn write_all_at(&mut self, time_ms: f32) {
        for entry in &mut self.entries {
            match &mut entry.kind {
                EntryKind::Tween(tween) => {
                    let t = ((time_ms - entry.start_ms) / entry.duration_ms).clamp(0.0, 1.0);
                    tween.write_at(t);
                }
                EntryKind::Timeline(child) => {
                    let local = (time_ms - entry.start_ms).clamp(0.0, child.duration_ms);
                    child.write_all_at(local);
                    child.time_ms = local;
                    child.complete_consumed = local >= child.duration_ms;
                    child.reverse_consumed = local <= 0.0;
                }
            }
        }
    }

    fn passes_remain(&self) -> bool {
        self.repeat < 0 || self.passes_done < self.repeat
    }

    fn fire_complete(&mut self) {
        if self.complete_consumed {
            return;
        }
        self.complete_consumed = true;
        if let Some(cb) = self.on_complete.as_mut() {
            if catch_unwind(AssertUnwindSafe(|| cb())).is_err() {
                tracing::warn!("timeline on_complete panicked; disabling it");
                self.on_complete = None;
            }
        }
    }

    fn fire_reverse_complete(&mut self) {
        if self.reverse_consumed {
            return;
        }
        self.reverse_consumed = true;
        if let Some(cb) = self.on_reverse_complete.as_mut() {
            if catch_unwind(AssertUnwindSafe(|| cb())).is_err() {
                tracing::warn!("timeline on_reverse_complete panicked; disabling it");
                self.on_reverse_complete = None;
            }
        }
    }
}
