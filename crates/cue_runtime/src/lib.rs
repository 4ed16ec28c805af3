//! Cue Runtime
//!
//! The frame-driven engine tying the animation and scroll systems together,
//! plus scopes (atomic section teardown) and the boot-sequence preloader.
//!
//! # Example
//!
//! A section mounts by creating a scope, registering its timelines and
//! triggers under it, and calling [`Engine::revert_scope`] when it
//! unmounts:
//!
//! ```rust
//! use cue_core::{Rect, StubTarget};
//! use cue_animation::Preset;
//! use cue_scroll::Trigger;
//! use cue_runtime::Engine;
//!
//! let mut engine = Engine::new();
//! engine.set_viewport_height(1000.0);
//!
//! let heading = StubTarget::shared(Rect::new(0.0, 2000.0, 800.0, 120.0));
//! let scope = engine.create_scope();
//! let timeline = engine.add_tween(scope, Preset::fade_in_up(heading.clone(), 1000.0).build(), 0.0);
//! engine.add_trigger(scope, Trigger::builder(heading, timeline).build());
//!
//! // Per frame: engine.set_scroll(y); engine.tick(dt_ms);
//! engine.revert_scope(scope);
//! ```

pub mod engine;
pub mod preloader;
pub mod scope;

pub use engine::{Engine, ScopeId};
pub use preloader::{PreloaderSequencer, PreloaderVisuals};
pub use scope::Scope;
