use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TimerError {
    #[error("work duration must be between 1 and 60 minutes, got {0}")]
    InvalidWorkMinutes(u32),

    #[error("break duration must be between 1 and 30 minutes, got {0}")]
    InvalidBreakMinutes(u32),

    #[error("cycle count must be between 1 and 10, got {0}")]
    InvalidCycles(u32),
}

/// Durations and cycle count for a pomodoro run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PomodoroSettings {
    work_minutes: u32,
    break_minutes: u32,
    cycles: u32,
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            break_minutes: 5,
            cycles: 4,
        }
    }
}

impl PomodoroSettings {
    /// # Errors
    ///
    /// Returns a `TimerError` naming the first field outside its range
    /// (work 1..=60, break 1..=30, cycles 1..=10).
    pub fn new(work_minutes: u32, break_minutes: u32, cycles: u32) -> Result<Self, TimerError> {
        if !(1..=60).contains(&work_minutes) {
            return Err(TimerError::InvalidWorkMinutes(work_minutes));
        }
        if !(1..=30).contains(&break_minutes) {
            return Err(TimerError::InvalidBreakMinutes(break_minutes));
        }
        if !(1..=10).contains(&cycles) {
            return Err(TimerError::InvalidCycles(cycles));
        }
        Ok(Self {
            work_minutes,
            break_minutes,
            cycles,
        })
    }

    #[must_use]
    pub fn work_minutes(&self) -> u32 {
        self.work_minutes
    }

    #[must_use]
    pub fn break_minutes(&self) -> u32 {
        self.break_minutes
    }

    #[must_use]
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.cycle_duration() * i32::try_from(self.cycles).unwrap_or(i32::MAX)
    }

    fn work_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.work_minutes))
    }

    fn cycle_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.work_minutes + self.break_minutes))
    }
}

/// Where a pomodoro run stands at a given instant. Cycles count from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimerPhase {
    Work { cycle: u32 },
    Break { cycle: u32 },
    Done,
    Cancelled,
}

impl TimerPhase {
    #[must_use]
    pub fn is_finished(self) -> bool {
        matches!(self, TimerPhase::Done | TimerPhase::Cancelled)
    }
}

/// Pomodoro run driven by an external clock.
///
/// The timer never sleeps; callers ask for the phase at an instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PomodoroTimer {
    settings: PomodoroSettings,
    started_at: DateTime<Utc>,
    cancelled_at: Option<DateTime<Utc>>,
}

impl PomodoroTimer {
    #[must_use]
    pub fn start(settings: PomodoroSettings, now: DateTime<Utc>) -> Self {
        Self {
            settings,
            started_at: now,
            cancelled_at: None,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &PomodoroSettings {
        &self.settings
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn finishes_at(&self) -> DateTime<Utc> {
        self.started_at + self.settings.total_duration()
    }

    #[must_use]
    pub fn phase_at(&self, now: DateTime<Utc>) -> TimerPhase {
        if let Some(cancelled_at) = self.cancelled_at {
            if now >= cancelled_at {
                return TimerPhase::Cancelled;
            }
        }
        if now >= self.finishes_at() {
            return TimerPhase::Done;
        }

        let elapsed = (now - self.started_at).max(Duration::zero());
        let cycle_secs = self.settings.cycle_duration().num_seconds();
        let index = elapsed.num_seconds() / cycle_secs;
        let offset = elapsed.num_seconds() - index * cycle_secs;
        let cycle = u32::try_from(index + 1).unwrap_or(u32::MAX);

        if offset < self.settings.work_duration().num_seconds() {
            TimerPhase::Work { cycle }
        } else {
            TimerPhase::Break { cycle }
        }
    }

    /// Time left before the current phase ends, or `None` once finished.
    #[must_use]
    pub fn remaining_in_phase(&self, now: DateTime<Utc>) -> Option<Duration> {
        let cycle_start = |cycle: u32| {
            self.started_at + self.settings.cycle_duration() * i32::try_from(cycle - 1).unwrap_or(0)
        };
        let end = match self.phase_at(now) {
            TimerPhase::Work { cycle } => cycle_start(cycle) + self.settings.work_duration(),
            TimerPhase::Break { cycle } => cycle_start(cycle) + self.settings.cycle_duration(),
            TimerPhase::Done | TimerPhase::Cancelled => return None,
        };
        Some(end - now.max(self.started_at))
    }

    /// Stops a running timer. Returns the phase the timer ends up in.
    ///
    /// Cancelling twice keeps the first cancellation; a finished run stays `Done`.
    pub fn cancel(&mut self, now: DateTime<Utc>) -> TimerPhase {
        match self.phase_at(now) {
            TimerPhase::Work { .. } | TimerPhase::Break { .. } => {
                self.cancelled_at = Some(now);
                TimerPhase::Cancelled
            }
            finished => finished,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn minutes(n: i64) -> Duration {
        Duration::minutes(n)
    }

    #[test]
    fn default_settings_match_classic_pomodoro() {
        let settings = PomodoroSettings::default();
        assert_eq!(
            (settings.work_minutes(), settings.break_minutes(), settings.cycles()),
            (25, 5, 4)
        );
        assert_eq!(settings.total_duration(), minutes(120));
    }

    #[test]
    fn settings_reject_out_of_range_fields() {
        assert_eq!(
            PomodoroSettings::new(0, 5, 4),
            Err(TimerError::InvalidWorkMinutes(0))
        );
        assert_eq!(
            PomodoroSettings::new(25, 31, 4),
            Err(TimerError::InvalidBreakMinutes(31))
        );
        assert_eq!(
            PomodoroSettings::new(25, 5, 11),
            Err(TimerError::InvalidCycles(11))
        );
    }

    #[test]
    fn phases_alternate_work_and_break() {
        let start = fixed_now();
        let timer = PomodoroTimer::start(PomodoroSettings::new(10, 2, 2).unwrap(), start);

        assert_eq!(timer.phase_at(start), TimerPhase::Work { cycle: 1 });
        assert_eq!(timer.phase_at(start + minutes(9)), TimerPhase::Work { cycle: 1 });
        assert_eq!(timer.phase_at(start + minutes(10)), TimerPhase::Break { cycle: 1 });
        assert_eq!(timer.phase_at(start + minutes(12)), TimerPhase::Work { cycle: 2 });
        assert_eq!(timer.phase_at(start + minutes(23)), TimerPhase::Break { cycle: 2 });
        assert_eq!(timer.phase_at(start + minutes(24)), TimerPhase::Done);
    }

    #[test]
    fn remaining_counts_down_within_phase() {
        let start = fixed_now();
        let timer = PomodoroTimer::start(PomodoroSettings::new(10, 2, 2).unwrap(), start);

        assert_eq!(timer.remaining_in_phase(start), Some(minutes(10)));
        assert_eq!(timer.remaining_in_phase(start + minutes(11)), Some(minutes(1)));
        assert_eq!(timer.remaining_in_phase(start + minutes(15)), Some(minutes(7)));
        assert_eq!(timer.remaining_in_phase(start + minutes(30)), None);
    }

    #[test]
    fn cancel_stops_a_running_timer() {
        let start = fixed_now();
        let mut timer = PomodoroTimer::start(PomodoroSettings::default(), start);

        assert_eq!(timer.cancel(start + minutes(3)), TimerPhase::Cancelled);
        assert_eq!(timer.phase_at(start + minutes(4)), TimerPhase::Cancelled);
        assert_eq!(timer.phase_at(start + minutes(500)), TimerPhase::Cancelled);
        assert_eq!(timer.remaining_in_phase(start + minutes(4)), None);
    }

    #[test]
    fn cancel_after_completion_keeps_done() {
        let start = fixed_now();
        let mut timer = PomodoroTimer::start(PomodoroSettings::new(1, 1, 1).unwrap(), start);

        assert_eq!(timer.cancel(start + minutes(5)), TimerPhase::Done);
        assert!(timer.phase_at(start + minutes(6)).is_finished());
    }
}
