//! Tweens: single property-change animations
//!
//! A tween pairs one target with a from/to property span, a duration, and
//! an easing curve. Configuration is validated at build time; after that the
//! tween is immutable and all playback state lives in the owning timeline.

use std::panic::{catch_unwind, AssertUnwindSafe};

use cue_core::{ConfigError, PropertyKind, TargetHandle, TargetProps};

use crate::easing::Easing;
use crate::interpolate::interpolate;

/// Minimum tween duration; shorter (or non-positive) requests are clamped
pub const MIN_DURATION_MS: f32 = 1.0;

/// Per-frame update callback, handed the raw local progress (pre-easing)
/// and the properties just written
pub type UpdateFn = Box<dyn FnMut(f32, &TargetProps)>;

/// A single property-change animation bound to one target
pub struct Tween {
    target: TargetHandle,
    from: TargetProps,
    to: TargetProps,
    duration_ms: f32,
    easing: Easing,
    on_update: Option<UpdateFn>,
    /// Set after the callback panics; the callback is dropped from then on
    update_poisoned: bool,
}

impl Tween {
    /// Start building a tween against a target
    pub fn builder(target: TargetHandle) -> TweenBuilder {
        TweenBuilder {
            target,
            from: TargetProps::default(),
            to: TargetProps::default(),
            duration_ms: 300.0,
            easing: Easing::default(),
            on_update: None,
        }
    }

    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }

    /// Pure sample of the property state at local progress `t` (0.0 to 1.0)
    pub fn sample(&self, t: f32) -> TargetProps {
        let eased = self.easing.apply(t.clamp(0.0, 1.0));
        let mut out = TargetProps::default();
        for kind in PropertyKind::ALL {
            match (self.from.get(kind), self.to.get(kind)) {
                (Some(a), Some(b)) => out.set(kind, interpolate(kind, a, b, eased)),
                (Some(a), None) => out.set(kind, a),
                (None, Some(b)) => out.set(kind, b),
                (None, None) => {}
            }
        }
        out
    }

    /// Write the sampled state for local progress `t`, without callbacks
    ///
    /// This is the seek path: values are recomputed consistently but no
    /// user callbacks observe the jump. A detached target (no bounds)
    /// makes this a silent no-op.
    pub fn write_at(&mut self, t: f32) -> Option<TargetProps> {
        if self.target.borrow().bounds().is_none() {
            return None;
        }
        let props = self.sample(t.clamp(0.0, 1.0));
        self.target.borrow_mut().apply(&props);
        Some(props)
    }

    /// Write the sampled state for local progress `t` and notify callbacks
    ///
    /// A panic in the user's update callback is caught, logged, and
    /// disables the callback without touching the shared tick.
    pub fn apply_at(&mut self, t: f32) {
        let t = t.clamp(0.0, 1.0);
        let Some(props) = self.write_at(t) else {
            return;
        };

        if self.update_poisoned {
            return;
        }
        if let Some(cb) = self.on_update.as_mut() {
            if catch_unwind(AssertUnwindSafe(|| cb(t, &props))).is_err() {
                tracing::warn!("tween on_update callback panicked; disabling it");
                self.update_poisoned = true;
            }
        }
    }
}

/// Builder for [`Tween`]
///
/// Property spans can be set typed (`from`/`to` with [`TargetProps`]) or by
/// name (`prop("opacity", 0.0, 1.0)`), which validates against the fixed
/// vocabulary.
pub struct TweenBuilder {
    target: TargetHandle,
    from: TargetProps,
    to: TargetProps,
    duration_ms: f32,
    easing: Easing,
    on_update: Option<UpdateFn>,
}

impl TweenBuilder {
    /// Set the starting property state
    pub fn from(mut self, props: TargetProps) -> Self {
        self.from = props;
        self
    }

    /// Set the ending property state
    pub fn to(mut self, props: TargetProps) -> Self {
        self.to = props;
        self
    }

    /// Set one property span by name
    pub fn prop(mut self, name: &str, from: f32, to: f32) -> Result<Self, ConfigError> {
        let kind = PropertyKind::from_name(name)?;
        self.from.set(kind, from);
        self.to.set(kind, to);
        Ok(self)
    }

    /// Set the duration in milliseconds
    pub fn duration_ms(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Set the easing curve
    pub fn ease(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set the easing curve by name
    pub fn ease_name(mut self, name: &str) -> Result<Self, ConfigError> {
        self.easing = Easing::from_name(name)?;
        Ok(self)
    }

    /// Register a per-frame update callback
    pub fn on_update<F: FnMut(f32, &TargetProps) + 'static>(mut self, cb: F) -> Self {
        self.on_update = Some(Box::new(cb));
        self
    }

    /// Finish the tween
    pub fn build(self) -> Tween {
        let duration_ms = if self.duration_ms < MIN_DURATION_MS {
            tracing::warn!(
                requested = self.duration_ms,
                "tween duration below minimum, clamping to {MIN_DURATION_MS}ms"
            );
            MIN_DURATION_MS
        } else {
            self.duration_ms
        };

        Tween {
            target: self.target,
            from: self.from,
            to: self.to,
            duration_ms,
            easing: self.easing,
            on_update: self.on_update,
            update_poisoned: false,
        }
    }
}
