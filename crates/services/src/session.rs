use chrono::Duration;
use rand::Rng;
use tracing::{debug, info, warn};

use study_core::forum::{Answer, QaForum, Question};
use study_core::model::{Proficiency, QuestionId};
use study_core::planner::{ProficiencyPlanner, Recommendation, StudyPlan};
use study_core::progress::{ActionKind, ProgressState, ProgressTracker};
use study_core::timer::{PomodoroSettings, PomodoroTimer, TimerPhase};

use crate::Clock;
use crate::config::SessionConfig;
use crate::error::{SessionError, ValidationError};

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Everything one learner works with during a session.
///
/// Validates input the way a front end would, forwards it to the planner,
/// forum and timer, and awards progress points for accepted actions.
/// Rejected actions never change any state.
#[derive(Debug)]
pub struct StudySession {
    clock: Clock,
    config: SessionConfig,
    planner: ProficiencyPlanner,
    forum: QaForum,
    tracker: ProgressTracker,
    timer: Option<PomodoroTimer>,
    timer_finish_logged: bool,
}

impl Default for StudySession {
    fn default() -> Self {
        Self::new(Clock::default(), SessionConfig::default())
    }
}

impl StudySession {
    #[must_use]
    pub fn new(clock: Clock, config: SessionConfig) -> Self {
        Self {
            clock,
            config,
            planner: ProficiencyPlanner::new(),
            forum: QaForum::new(),
            tracker: ProgressTracker::new(),
            timer: None,
            timer_finish_logged: false,
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Mutable access to the session clock, e.g. to advance a fixed clock.
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // ─── Planner ───────────────────────────────────────────────────────────────

    #[must_use]
    pub fn learner_name(&self) -> &str {
        self.planner.name()
    }

    /// # Errors
    ///
    /// Returns `ValidationError::EmptyField` if `name` is blank.
    pub fn set_name(&mut self, name: &str) -> Result<(), SessionError> {
        let name = require("name", name)?;
        self.planner.set_name(name);
        debug!(name, "learner name set");
        Ok(())
    }

    /// Adds or re-rates a subject and awards study points.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if no learner name is set or `subject` is blank,
    /// and `SessionError::Proficiency` if `proficiency` is outside 1..=5.
    pub fn add_subject(&mut self, subject: &str, proficiency: i64) -> Result<(), SessionError> {
        if self.planner.name().is_empty() {
            return Err(reject(ValidationError::MissingLearnerName.into()));
        }
        let subject = require("subject", subject)?;
        let proficiency = Proficiency::try_from(proficiency).map_err(|e| reject(e.into()))?;

        let previous = self.planner.add_subject(subject, proficiency);
        debug!(
            subject,
            proficiency = proficiency.value(),
            replaced = previous.is_some(),
            "subject added"
        );
        self.award(ActionKind::Study);
        Ok(())
    }

    #[must_use]
    pub fn study_plan(&self) -> StudyPlan {
        self.planner.generate_study_plan()
    }

    #[must_use]
    pub fn recommendations(&self) -> Vec<Recommendation> {
        self.planner.adaptive_recommendation()
    }

    #[must_use]
    pub fn planner(&self) -> &ProficiencyPlanner {
        &self.planner
    }

    // ─── Forum ─────────────────────────────────────────────────────────────────

    /// # Errors
    ///
    /// Returns `ValidationError::EmptyField` if `author` or `text` is blank.
    pub fn post_question(&mut self, author: &str, text: &str) -> Result<QuestionId, SessionError> {
        let author = require("author", author)?;
        let text = require("question", text)?;
        let id = self
            .forum
            .post_question(author, text)
            .map_err(|e| reject(e.into()))?;
        debug!(question_id = id.value(), author, "question posted");
        self.award(ActionKind::Ask);
        Ok(id)
    }

    /// # Errors
    ///
    /// Returns `ValidationError::EmptyField` if `author` or `text` is blank and
    /// `SessionError::UnknownQuestion` if `id` does not exist. No points are
    /// awarded in either case.
    pub fn answer_question(
        &mut self,
        author: &str,
        id: QuestionId,
        text: &str,
    ) -> Result<(), SessionError> {
        let author = require("author", author)?;
        let text = require("answer", text)?;
        self.forum
            .answer_question(author, id, text)
            .map_err(|e| reject(e.into()))?;
        debug!(question_id = id.value(), author, "answer posted");
        self.award(ActionKind::Answer);
        Ok(())
    }

    pub fn questions(&self) -> impl Iterator<Item = &Question> + '_ {
        self.forum.list_questions()
    }

    /// # Errors
    ///
    /// Returns `SessionError::UnknownQuestion` if `id` does not exist.
    pub fn answers(&self, id: QuestionId) -> Result<&[Answer], SessionError> {
        self.forum.list_answers(id).map_err(|e| reject(e.into()))
    }

    #[must_use]
    pub fn forum(&self) -> &QaForum {
        &self.forum
    }

    // ─── Progress ──────────────────────────────────────────────────────────────

    #[must_use]
    pub fn progress(&self) -> ProgressState {
        self.tracker.current_state()
    }

    fn award(&mut self, action: ActionKind) -> ProgressState {
        let before = self.tracker.current_state();
        let after = self.tracker.record_action(action);
        debug!(action = action.as_str(), points = after.points, "progress updated");
        if after.level > before.level {
            info!(level = after.level, points = after.points, "level up");
        }
        after
    }

    // ─── Pomodoro ──────────────────────────────────────────────────────────────

    /// Starts a new pomodoro run, replacing any previous one.
    ///
    /// `None` uses the session's configured defaults.
    pub fn start_pomodoro(&mut self, settings: Option<PomodoroSettings>) -> &PomodoroTimer {
        let settings = settings.unwrap_or(self.config.pomodoro);
        let now = self.clock.now();
        info!(
            work_minutes = settings.work_minutes(),
            break_minutes = settings.break_minutes(),
            cycles = settings.cycles(),
            "pomodoro started"
        );
        self.timer_finish_logged = false;
        self.timer.insert(PomodoroTimer::start(settings, now))
    }

    /// Current phase of the run. The first poll that sees it `Done` logs the finish.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveTimer` if no run was started.
    pub fn pomodoro_phase(&mut self) -> Result<TimerPhase, SessionError> {
        let timer = self.timer.as_ref().ok_or(SessionError::NoActiveTimer)?;
        let phase = timer.phase_at(self.clock.now());
        self.note_finished(phase);
        Ok(phase)
    }

    /// # Errors
    ///
    /// Returns `SessionError::NoActiveTimer` if no run was started.
    pub fn pomodoro_remaining(&self) -> Result<Option<Duration>, SessionError> {
        let timer = self.timer.as_ref().ok_or(SessionError::NoActiveTimer)?;
        Ok(timer.remaining_in_phase(self.clock.now()))
    }

    /// # Errors
    ///
    /// Returns `SessionError::NoActiveTimer` if no run was started.
    pub fn cancel_pomodoro(&mut self) -> Result<TimerPhase, SessionError> {
        let now = self.clock.now();
        let timer = self.timer.as_mut().ok_or(SessionError::NoActiveTimer)?;
        let phase = timer.cancel(now);
        if phase == TimerPhase::Cancelled {
            info!("pomodoro cancelled");
        }
        self.note_finished(phase);
        Ok(phase)
    }

    fn note_finished(&mut self, phase: TimerPhase) {
        if phase == TimerPhase::Done && !self.timer_finish_logged {
            self.timer_finish_logged = true;
            info!("pomodoro finished");
        }
    }

    // ─── Tips ──────────────────────────────────────────────────────────────────

    #[must_use]
    pub fn study_tip(&self) -> Option<&str> {
        self.study_tip_with(&mut rand::rng())
    }

    pub fn study_tip_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.config.tips.pick(rng)
    }
}

fn require<'a>(field: &'static str, value: &'a str) -> Result<&'a str, SessionError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(reject(ValidationError::EmptyField { field }.into()));
    }
    Ok(trimmed)
}

fn reject(err: SessionError) -> SessionError {
    warn!(error = %err, "request rejected");
    err
}
