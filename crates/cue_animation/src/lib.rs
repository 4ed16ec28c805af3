//! Cue Animation System
//!
//! Easing, tweens, timeline orchestration, and stagger.
//!
//! # Features
//!
//! - **Easing**: linear, polynomial power curves, and overshooting "back"
//! - **Tweens**: from/to property spans validated at construction
//! - **Timelines**: sequenced, overlapping, and nested composition with a
//!   play/reverse/seek state machine
//! - **Stagger**: per-target fan-out offsets for grouped entrances

pub mod easing;
pub mod interpolate;
pub mod presets;
pub mod stagger;
pub mod timeline;
pub mod tween;

pub use easing::{EaseDirection, Easing};
pub use interpolate::interpolate;
pub use presets::Preset;
pub use stagger::{Stagger, StaggerOrder};
pub use timeline::{PlaybackState, Position, Timeline, TimelineId};
pub use tween::{Tween, TweenBuilder};
