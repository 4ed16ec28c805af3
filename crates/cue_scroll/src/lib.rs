//! Cue Scroll System
//!
//! Viewport triggers and the shared scroll observer.
//!
//! # Features
//!
//! - **Anchors**: `"top 80%"`-style threshold pairs, re-resolved from live
//!   bounds so resizes are always picked up
//! - **Triggers**: a three-state machine mapping scroll crossings to
//!   toggle actions on a bound timeline
//! - **Observer**: one shared evaluation per frame, dispatching every
//!   crossed threshold individually in positional order

pub mod anchor;
pub mod observer;
pub mod trigger;

pub use anchor::{Anchor, ElementEdge};
pub use observer::{Dispatch, ScrollObserver, TriggerId};
pub use trigger::{CrossEvent, ToggleAction, ToggleActions, Trigger, TriggerState};
