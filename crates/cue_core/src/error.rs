//! Configuration errors
//!
//! Everything here is raised synchronously at construction or registration
//! time. A failed registration is fatal to that call only; the engine never
//! raises these during a frame tick.

use thiserror::Error;

/// Errors produced while building tweens, timelines, or triggers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An easing name that is not part of the supported vocabulary
    #[error("unknown easing name: {0:?}")]
    UnknownEasing(String),

    /// A property name outside the fixed animatable vocabulary
    #[error("unknown animatable property: {0:?}")]
    UnknownProperty(String),

    /// A threshold anchor string that could not be parsed
    #[error("malformed threshold anchor: {0:?}")]
    MalformedAnchor(String),

    /// A toggle-actions string with the wrong arity or an unknown action
    #[error("malformed toggle actions: {0:?}")]
    MalformedToggleActions(String),
}
