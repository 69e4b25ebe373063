//! Shared error types for the services crate.

use thiserror::Error;

use study_core::forum::ForumError;
use study_core::model::{ProficiencyError, QuestionId};
use study_core::timer::TimerError;

/// A required input was missing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },
    #[error("set your name before adding subjects")]
    MissingLearnerName,
}

/// Errors emitted by `StudySession`.
///
/// None of these are fatal: the session is unchanged and the caller can retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("no question with id {0}")]
    UnknownQuestion(QuestionId),
    #[error(transparent)]
    Forum(ForumError),
    #[error(transparent)]
    Proficiency(#[from] ProficiencyError),
    #[error(transparent)]
    Timer(#[from] TimerError),
    #[error("no pomodoro timer has been started")]
    NoActiveTimer,
}

impl SessionError {
    /// Every session error leaves state untouched and can be shown as a warning.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        true
    }

    #[must_use]
    pub fn unknown_question(&self) -> Option<QuestionId> {
        match self {
            SessionError::UnknownQuestion(id) => Some(*id),
            _ => None,
        }
    }
}

impl From<ForumError> for SessionError {
    fn from(err: ForumError) -> Self {
        match err {
            ForumError::EmptyAuthor => ValidationError::EmptyField { field: "author" }.into(),
            ForumError::EmptyQuestion => ValidationError::EmptyField { field: "question" }.into(),
            ForumError::UnknownQuestion(id) => SessionError::UnknownQuestion(id),
            other => SessionError::Forum(other),
        }
    }
}

/// Errors emitted while loading `SessionConfig`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{var} is not a number: {raw:?}")]
    NotANumber { var: &'static str, raw: String },
    #[error("invalid pomodoro settings: {0}")]
    Timer(#[from] TimerError),
}
