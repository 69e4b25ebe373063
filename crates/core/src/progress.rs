use serde::{Deserialize, Serialize};

/// Points needed to climb one level.
pub const POINTS_PER_LEVEL: u32 = 50;

/// Something the learner did that earns points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Study,
    Answer,
    Ask,
}

impl ActionKind {
    #[must_use]
    pub fn points(self) -> u32 {
        match self {
            ActionKind::Study => 10,
            ActionKind::Answer => 5,
            ActionKind::Ask => 2,
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "study" => Some(Self::Study),
            "answer" => Some(Self::Answer),
            "ask" => Some(Self::Ask),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Study => "study",
            ActionKind::Answer => "answer",
            ActionKind::Ask => "ask",
        }
    }
}

/// Point value of an action given by name. Unknown names are worth nothing.
#[must_use]
pub fn points_for(name: &str) -> u32 {
    ActionKind::from_name(name).map_or(0, ActionKind::points)
}

/// Level reached with `points`: `1 + points / 50`.
#[must_use]
pub fn level_for(points: u32) -> u32 {
    1 + points / POINTS_PER_LEVEL
}

/// Read-only snapshot of the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressState {
    pub points: u32,
    pub level: u32,
}

impl ProgressState {
    #[must_use]
    pub fn points_to_next_level(&self) -> u32 {
        POINTS_PER_LEVEL - self.points % POINTS_PER_LEVEL
    }
}

/// Accumulates points. The level is always derived from them.
#[derive(Debug, Clone, Default)]
pub struct ProgressTracker {
    points: u32,
}

impl ProgressTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the action's points and returns the new state.
    pub fn record_action(&mut self, action: ActionKind) -> ProgressState {
        self.points = self.points.saturating_add(action.points());
        self.current_state()
    }

    /// Like `record_action`, but for free-form action names. Unknown names add 0.
    pub fn record_named(&mut self, name: &str) -> ProgressState {
        self.points = self.points.saturating_add(points_for(name));
        self.current_state()
    }

    #[must_use]
    pub fn current_state(&self) -> ProgressState {
        ProgressState {
            points: self.points,
            level: level_for(self.points),
        }
    }
}
