//! Easing functions for animations
//!
//! The supported vocabulary mirrors the names animation code actually uses:
//! `linear`, the `powerN` polynomial family with `.in` / `.out` / `.inOut`
//! suffixes, and `back` with a configurable overshoot constant. Names are
//! resolved once at tween construction; an unknown name is a
//! [`ConfigError`], never a tick-time failure.

use cue_core::ConfigError;

/// Which end of the curve the easing shapes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EaseDirection {
    In,
    #[default]
    Out,
    InOut,
}

/// Easing function type
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    /// Polynomial curve; `degree` 2 is quadratic (`power1`), 5 quintic (`power4`)
    Power {
        degree: u32,
        direction: EaseDirection,
    },
    /// Overshooting curve; the default constant overshoots ~10% past target
    Back {
        overshoot: f32,
        direction: EaseDirection,
    },
}

/// Standard overshoot constant for `back` easing (~10% past target)
pub const BACK_OVERSHOOT: f32 = 1.70158;

impl Default for Easing {
    fn default() -> Self {
        Easing::Power {
            degree: 3,
            direction: EaseDirection::Out,
        }
    }
}

impl Easing {
    /// Resolve an easing from its name
    ///
    /// `powerN` without a suffix defaults to `.out`; `back` accepts an
    /// optional overshoot argument, e.g. `back.out(1.7)`.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        if name == "linear" || name == "none" {
            return Ok(Easing::Linear);
        }

        let (head, direction) = split_direction(name)?;

        if let Some(n) = head.strip_prefix("power") {
            let n: u32 = n
                .parse()
                .map_err(|_| ConfigError::UnknownEasing(name.to_string()))?;
            if !(1..=4).contains(&n) {
                return Err(ConfigError::UnknownEasing(name.to_string()));
            }
            // power1 is quadratic, power4 quintic
            return Ok(Easing::Power {
                degree: n + 1,
                direction,
            });
        }

        if head == "back" {
            return Ok(Easing::Back {
                overshoot: BACK_OVERSHOOT,
                direction,
            });
        }
        if let Some(arg) = head.strip_prefix("back(").and_then(|s| s.strip_suffix(')')) {
            let overshoot: f32 = arg
                .trim()
                .parse()
                .map_err(|_| ConfigError::UnknownEasing(name.to_string()))?;
            return Ok(Easing::Back {
                overshoot,
                direction,
            });
        }

        Err(ConfigError::UnknownEasing(name.to_string()))
    }

    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        match *self {
            Easing::Linear => t,
            Easing::Power { degree, direction } => power_ease(t, degree as i32, direction),
            Easing::Back {
                overshoot,
                direction,
            } => back_ease(t, overshoot, direction),
        }
    }
}

/// Split an `"name.in"` / `"name.out"` / `"name.inOut"` suffix off an easing
/// name. `back.out(1.7)` keeps the argument on the head: `"back(1.7)"`.
fn split_direction(name: &str) -> Result<(String, EaseDirection), ConfigError> {
    let (head, dir) = match name.find('.') {
        Some(idx) => {
            let (head, rest) = name.split_at(idx);
            let rest = &rest[1..];
            // Peel the parenthesized argument off the suffix, if any
            let (suffix, arg) = match rest.find('(') {
                Some(p) => (&rest[..p], &rest[p..]),
                None => (rest, ""),
            };
            let dir = match suffix {
                "in" => EaseDirection::In,
                "out" => EaseDirection::Out,
                "inOut" => EaseDirection::InOut,
                _ => return Err(ConfigError::UnknownEasing(name.to_string())),
            };
            (format!("{head}{arg}"), dir)
        }
        None => (name.to_string(), EaseDirection::Out),
    };
    Ok((head, dir))
}

fn power_ease(t: f32, degree: i32, direction: EaseDirection) -> f32 {
    match direction {
        EaseDirection::In => t.powi(degree),
        EaseDirection::Out => 1.0 - (1.0 - t).powi(degree),
        EaseDirection::InOut => {
            if t < 0.5 {
                2.0_f32.powi(degree - 1) * t.powi(degree)
            } else {
                1.0 - (-2.0 * t + 2.0).powi(degree) / 2.0
            }
        }
    }
}

fn back_ease(t: f32, c1: f32, direction: EaseDirection) -> f32 {
    let c3 = c1 + 1.0;
    match direction {
        EaseDirection::In => c3 * t * t * t - c1 * t * t,
        EaseDirection::Out => {
            let u = t - 1.0;
            1.0 + c3 * u * u * u + c1 * u * u
        }
        EaseDirection::InOut => {
            let c2 = c1 * 1.525;
            if t < 0.5 {
                let u = 2.0 * t;
                (u * u * ((c2 + 1.0) * u - c2)) / 2.0
            } else {
                let u = 2.0 * t - 2.0;
                (u * u * ((c2 + 1.0) * u + c2) + 2.0) / 2.0
            }
        }
    }
}
