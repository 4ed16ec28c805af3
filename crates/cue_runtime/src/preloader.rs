//! The boot-sequence preloader
//!
//! A fixed, deterministic timeline that gates first paint of real content:
//! brand mark and progress bar slide in, the bar fills to 100% with a live
//! percentage readout, a short corrective pass pins the readout to exactly
//! 100, everything slides back out, and the completion callback fires only
//! after the exit's final frame has been written. It fires exactly once for
//! the sequencer's lifetime, no matter how often the surrounding UI
//! remounts.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use cue_animation::{Easing, Position, Preset, Stagger, Timeline, Tween};
use cue_core::{TargetHandle, TargetProps};

/// Entrance slide/fade duration (brand mark, progress container)
const ENTRANCE_MS: f32 = 800.0;
/// Stagger between brand mark and progress container
const ENTRANCE_STAGGER_MS: f32 = 200.0;
/// Progress-bar fill duration
const FILL_MS: f32 = 2500.0;
/// Corrective readout pass duration
const CORRECTIVE_MS: f32 = 500.0;
/// Visuals exit duration
const EXIT_MS: f32 = 600.0;
/// Root fade/scale-out duration
const ROOT_EXIT_MS: f32 = 800.0;

/// The four boot-sequence targets the sequencer animates
pub struct PreloaderVisuals {
    /// Brand mark block
    pub brand: TargetHandle,
    /// Progress bar container
    pub progress_container: TargetHandle,
    /// Progress bar fill (drives the percentage readout via its width)
    pub progress_bar: TargetHandle,
    /// Whole-screen root, faded and scaled out last
    pub root: TargetHandle,
}

/// Runs the boot sequence and signals completion exactly once
pub struct PreloaderSequencer {
    timeline: Timeline,
    completed: Rc<Cell<bool>>,
}

impl PreloaderSequencer {
    /// Build the sequence
    ///
    /// `readout` receives the rounded percentage for the counter display
    /// whenever the fill or corrective pass updates it.
    pub fn new(visuals: PreloaderVisuals, readout: impl FnMut(u32) + 'static) -> Self {
        let readout: Rc<RefCell<Box<dyn FnMut(u32)>>> = Rc::new(RefCell::new(Box::new(readout)));

        let mut timeline = Timeline::new();

        // 1. Brand mark and progress container rise in, staggered
        timeline.add_staggered(
            Position::At(0.0),
            vec![
                entrance_tween(visuals.brand.clone()),
                entrance_tween(visuals.progress_container.clone()),
            ],
            &Stagger::each(ENTRANCE_STAGGER_MS),
        );

        // 2. Fill the bar; readout tracks the written width
        let fill_readout = readout.clone();
        timeline.add(
            Position::AfterPrevious,
            Tween::builder(visuals.progress_bar.clone())
                .from(TargetProps::default().with_width(0.0))
                .to(TargetProps::default().with_width(1.0))
                .duration_ms(FILL_MS)
                .ease(ease("power2.out"))
                .on_update(move |_, props| {
                    let fraction = props.width.unwrap_or(0.0);
                    let pct = (fraction * 100.0).round() as u32;
                    (fill_readout.borrow_mut())(pct.min(100));
                })
                .build(),
        );

        // 3. Corrective pass: pin the readout to exactly 100 regardless of
        //    floating-point drift in the fill
        let snap_readout = readout;
        timeline.add(
            Position::AfterPrevious,
            Tween::builder(visuals.progress_bar.clone())
                .from(TargetProps::default().with_width(1.0))
                .to(TargetProps::default().with_width(1.0))
                .duration_ms(CORRECTIVE_MS)
                .ease(Easing::Linear)
                .on_update(move |progress, _| {
                    let pct = (progress * 100.0).round() as u32 + 95;
                    (snap_readout.borrow_mut())(pct.min(100));
                })
                .build(),
        );

        // 4. Visuals drift out together, then the root fades and shrinks
        timeline.add(
            Position::AfterPrevious,
            Preset::fade_out_up(visuals.brand, EXIT_MS).build(),
        );
        timeline.add(
            Position::Overlap(EXIT_MS),
            Preset::fade_out_up(visuals.progress_container, EXIT_MS).build(),
        );
        timeline.add(
            Position::AfterPrevious,
            Tween::builder(visuals.root)
                .from(TargetProps::opacity(1.0).with_scale(1.0))
                .to(TargetProps::opacity(0.0).with_scale(0.95))
                .duration_ms(ROOT_EXIT_MS)
                .ease(ease("power2.inOut"))
                .build(),
        );

        Self {
            timeline,
            completed: Rc::new(Cell::new(false)),
        }
    }

    /// Start (or restart, on remount) the sequence
    ///
    /// The callback fires once, after the exit animation's final frame has
    /// been applied. Running again before completion restarts the sequence
    /// and replaces the pending callback; running after completion does
    /// nothing, since the boot sequence plays once per application lifetime.
    pub fn run(&mut self, on_complete: impl FnOnce() + 'static) {
        if self.completed.get() {
            tracing::debug!("preloader already completed; run ignored");
            return;
        }
        let completed = self.completed.clone();
        let mut callback = Some(on_complete);
        self.timeline.on_complete(move || {
            completed.set(true);
            if let Some(cb) = callback.take() {
                cb();
            }
        });
        self.timeline.restart();
    }

    /// Advance the sequence by a frame delta
    pub fn tick(&mut self, dt_ms: f32) {
        self.timeline.tick(dt_ms);
    }

    pub fn is_complete(&self) -> bool {
        self.completed.get()
    }

    pub fn progress(&self) -> f32 {
        self.timeline.progress()
    }

    pub fn duration_ms(&self) -> f32 {
        self.timeline.duration_ms()
    }
}

fn entrance_tween(target: TargetHandle) -> Tween {
    Tween::builder(target)
        .from(TargetProps::opacity(0.0).with_translate_y(50.0))
        .to(TargetProps::opacity(1.0).with_translate_y(0.0))
        .duration_ms(ENTRANCE_MS)
        .ease(ease("power2.out"))
        .build()
}

fn ease(name: &str) -> Easing {
    Easing::from_name(name).unwrap_or_default()
}
