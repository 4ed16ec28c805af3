//! Preset tweens for common section entrances
//!
//! These are the entrance shapes the presentation sections actually use:
//! content rises out of a blur, side panels slide in, cards pop to scale.

use cue_core::{TargetHandle, TargetProps};

use crate::easing::Easing;
use crate::tween::{Tween, TweenBuilder};

/// Pre-built tweens for common entrance/exit patterns
pub struct Preset;

impl Preset {
    /// Rise from below while fading in and sharpening from a blur
    pub fn fade_in_up(target: TargetHandle, duration_ms: f32) -> TweenBuilder {
        Tween::builder(target)
            .from(
                TargetProps::opacity(0.0)
                    .with_translate_y(50.0)
                    .with_blur(10.0),
            )
            .to(
                TargetProps::opacity(1.0)
                    .with_translate_y(0.0)
                    .with_blur(0.0),
            )
            .duration_ms(duration_ms)
            .ease(ease("power2.out"))
    }

    /// Fade out while drifting upward (boot-sequence exit shape)
    pub fn fade_out_up(target: TargetHandle, duration_ms: f32) -> TweenBuilder {
        Tween::builder(target)
            .from(TargetProps::opacity(1.0).with_translate_y(0.0))
            .to(TargetProps::opacity(0.0).with_translate_y(-30.0))
            .duration_ms(duration_ms)
            .ease(ease("power2.inOut"))
    }

    /// Slide in from the right while settling to full scale
    pub fn slide_in_right(target: TargetHandle, duration_ms: f32, distance: f32) -> TweenBuilder {
        Tween::builder(target)
            .from(
                TargetProps::opacity(0.0)
                    .with_translate_x(distance)
                    .with_scale(0.9),
            )
            .to(
                TargetProps::opacity(1.0)
                    .with_translate_x(0.0)
                    .with_scale(1.0),
            )
            .duration_ms(duration_ms)
            .ease(ease("power2.out"))
    }

    /// Scale up from small with a slight overshoot
    pub fn scale_in(target: TargetHandle, duration_ms: f32) -> TweenBuilder {
        Tween::builder(target)
            .from(TargetProps::opacity(0.0).with_scale(0.8))
            .to(TargetProps::opacity(1.0).with_scale(1.0))
            .duration_ms(duration_ms)
            .ease(ease("back.out"))
    }
}

fn ease(name: &str) -> Easing {
    // Names here are compile-time constants from the supported vocabulary
    Easing::from_name(name).unwrap_or_default()
}
