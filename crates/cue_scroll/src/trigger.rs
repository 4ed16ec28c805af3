//! Viewport triggers
//!
//! A trigger binds one timeline to the scroll-position crossing events of a
//! target region. It tracks where the target sits relative to its start and
//! end thresholds (`BelowStart` / `InRange` / `PastEnd`) and maps each of
//! the four crossing events to a toggle action on the bound timeline.

use cue_animation::{Timeline, TimelineId};
use cue_core::{ConfigError, Rect, TargetHandle};

use crate::anchor::{Anchor, ElementEdge};

/// Position of the target relative to the two thresholds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerState {
    /// Target has not reached the start threshold yet
    BelowStart,
    /// Between start and end thresholds
    InRange,
    /// Scrolled past the end threshold
    PastEnd,
}

/// A threshold crossing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrossEvent {
    /// Start threshold crossed scrolling down
    Enter,
    /// End threshold crossed scrolling down
    Leave,
    /// End threshold crossed scrolling back up
    EnterBack,
    /// Start threshold crossed scrolling back up
    LeaveBack,
}

/// Action applied to the bound timeline when a crossing fires
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToggleAction {
    Play,
    Reverse,
    Restart,
    Pause,
    Resume,
    Reset,
    Complete,
    #[default]
    None,
}

impl ToggleAction {
    fn from_word(word: &str) -> Option<Self> {
        match word {
            "play" => Some(Self::Play),
            "reverse" => Some(Self::Reverse),
            "restart" => Some(Self::Restart),
            "pause" => Some(Self::Pause),
            "resume" => Some(Self::Resume),
            "reset" => Some(Self::Reset),
            "complete" => Some(Self::Complete),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    /// Apply this action to a timeline
    pub fn apply(self, timeline: &mut Timeline) {
        match self {
            Self::Play => timeline.play(),
            Self::Reverse => timeline.reverse(),
            Self::Restart => timeline.restart(),
            Self::Pause => timeline.pause(),
            Self::Resume => timeline.resume(),
            Self::Reset => timeline.seek(0.0),
            Self::Complete => timeline.seek(1.0),
            Self::None => {}
        }
    }
}

/// The 4-tuple of actions for enter / leave / enter-back / leave-back
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleActions {
    pub on_enter: ToggleAction,
    pub on_leave: ToggleAction,
    pub on_enter_back: ToggleAction,
    pub on_leave_back: ToggleAction,
}

impl Default for ToggleActions {
    /// The house convention: play on first entry, undo when scrolled back
    /// above the start, no replay on re-entry from below
    fn default() -> Self {
        Self {
            on_enter: ToggleAction::Play,
            on_leave: ToggleAction::None,
            on_enter_back: ToggleAction::None,
            on_leave_back: ToggleAction::Reverse,
        }
    }
}

impl ToggleActions {
    /// Parse the four-word string form, e.g. `"play none none reverse"`
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let words: Vec<&str> = s.split_whitespace().collect();
        let [enter, leave, enter_back, leave_back] = words[..] else {
            return Err(ConfigError::MalformedToggleActions(s.to_string()));
        };
        let parse = |w| {
            ToggleAction::from_word(w)
                .ok_or_else(|| ConfigError::MalformedToggleActions(s.to_string()))
        };
        Ok(Self {
            on_enter: parse(enter)?,
            on_leave: parse(leave)?,
            on_enter_back: parse(enter_back)?,
            on_leave_back: parse(leave_back)?,
        })
    }

    /// Look up the action for a crossing event
    pub fn for_event(&self, event: CrossEvent) -> ToggleAction {
        match event {
            CrossEvent::Enter => self.on_enter,
            CrossEvent::Leave => self.on_leave,
            CrossEvent::EnterBack => self.on_enter_back,
            CrossEvent::LeaveBack => self.on_leave_back,
        }
    }
}

/// Start and end scroll thresholds resolved from current bounds
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thresholds {
    pub start: f32,
    pub end: f32,
}

/// Binds a timeline's playback to scroll crossings of a target region
pub struct Trigger {
    target: TargetHandle,
    start: Anchor,
    end: Anchor,
    actions: ToggleActions,
    timeline: TimelineId,
    /// None until the first evaluation establishes where we already are
    state: Option<TriggerState>,
}

impl Trigger {
    /// Start building a trigger for a target and its bound timeline
    pub fn builder(target: TargetHandle, timeline: TimelineId) -> TriggerBuilder {
        TriggerBuilder {
            target,
            // House defaults: enter when the top reaches 80% down the
            // viewport, leave once the bottom clears the viewport top
            start: Anchor::new(ElementEdge::Top, 0.8),
            end: Anchor::new(ElementEdge::Bottom, 0.0),
            actions: ToggleActions::default(),
            timeline,
        }
    }

    pub fn timeline(&self) -> TimelineId {
        self.timeline
    }

    pub fn actions(&self) -> &ToggleActions {
        &self.actions
    }

    pub fn state(&self) -> Option<TriggerState> {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: Option<TriggerState>) {
        self.state = state;
    }

    /// Current bounds, or `None` while the target is detached
    pub fn bounds(&self) -> Option<Rect> {
        self.target.borrow().bounds()
    }

    /// Resolve both thresholds from current bounds and viewport height
    ///
    /// A degenerate end (before the start) is clamped to the start so the
    /// in-range window never has negative extent.
    pub fn thresholds(&self, bounds: &Rect, viewport_height: f32) -> Thresholds {
        let start = self.start.threshold(bounds, viewport_height);
        let end = self.end.threshold(bounds, viewport_height).max(start);
        Thresholds { start, end }
    }

    /// Which state a scroll offset corresponds to
    pub fn state_for(thresholds: Thresholds, scroll_y: f32) -> TriggerState {
        if scroll_y < thresholds.start {
            TriggerState::BelowStart
        } else if scroll_y < thresholds.end {
            TriggerState::InRange
        } else {
            TriggerState::PastEnd
        }
    }
}

/// Builder for [`Trigger`]
pub struct TriggerBuilder {
    target: TargetHandle,
    start: Anchor,
    end: Anchor,
    actions: ToggleActions,
    timeline: TimelineId,
}

impl TriggerBuilder {
    /// Set the start anchor from its string form
    pub fn start(mut self, anchor: &str) -> Result<Self, ConfigError> {
        self.start = Anchor::parse(anchor)?;
        Ok(self)
    }

    /// Set the end anchor from its string form
    pub fn end(mut self, anchor: &str) -> Result<Self, ConfigError> {
        self.end = Anchor::parse(anchor)?;
        Ok(self)
    }

    /// Set the toggle actions from the four-word string form
    pub fn toggle_actions(mut self, actions: &str) -> Result<Self, ConfigError> {
        self.actions = ToggleActions::parse(actions)?;
        Ok(self)
    }

    /// Set the toggle actions directly
    pub fn actions(mut self, actions: ToggleActions) -> Self {
        self.actions = actions;
        self
    }

    pub fn build(self) -> Trigger {
        Trigger {
            target: self.target,
            start: self.start,
            end: self.end,
            actions: self.actions,
            timeline: self.timeline,
            state: None,
        }
    }
}
