//! Cue Core Primitives
//!
//! This crate provides the foundational types for the Cue animation engine:
//!
//! - **Targets**: the write-sink abstraction the engine animates through
//! - **Property Model**: the fixed vocabulary of animatable properties
//! - **Geometry**: document-space rectangles and scroll state
//! - **Errors**: configuration errors raised at registration time

pub mod error;
pub mod geometry;
pub mod target;

pub use error::ConfigError;
pub use geometry::{Rect, ScrollPosition};
pub use target::{PropertyKind, StubTarget, Target, TargetHandle, TargetProps};
