use serde::Serialize;
use thiserror::Error;

use crate::model::QuestionId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ForumError {
    #[error("question author cannot be empty")]
    EmptyAuthor,

    #[error("question text cannot be empty")]
    EmptyQuestion,

    #[error("no question with id {0}")]
    UnknownQuestion(QuestionId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    id: QuestionId,
    author: String,
    text: String,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub author: String,
    pub text: String,
}

/// Question board with per-question answer threads.
///
/// Question ids are positions in `questions`, and `answers[i]` belongs to
/// question `i`. Nothing is ever removed, so ids stay dense and are never reused.
#[derive(Debug, Clone, Default)]
pub struct QaForum {
    questions: Vec<Question>,
    answers: Vec<Vec<Answer>>,
}

impl QaForum {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Posts a question and opens an empty answer thread for it.
    ///
    /// # Errors
    ///
    /// Returns `ForumError::EmptyAuthor` or `ForumError::EmptyQuestion` when
    /// either field is blank.
    pub fn post_question(
        &mut self,
        author: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<QuestionId, ForumError> {
        let author = author.into();
        let text = text.into();
        if author.trim().is_empty() {
            return Err(ForumError::EmptyAuthor);
        }
        if text.trim().is_empty() {
            return Err(ForumError::EmptyQuestion);
        }

        let id = QuestionId::new(self.questions.len() as u64);
        self.questions.push(Question { id, author, text });
        self.answers.push(Vec::new());
        Ok(id)
    }

    /// Appends an answer to an existing question.
    ///
    /// Author and text are stored as given.
    ///
    /// # Errors
    ///
    /// Returns `ForumError::UnknownQuestion` if `id` was never issued; the
    /// forum is left untouched.
    pub fn answer_question(
        &mut self,
        author: impl Into<String>,
        id: QuestionId,
        text: impl Into<String>,
    ) -> Result<(), ForumError> {
        let thread = id
            .index()
            .and_then(|i| self.answers.get_mut(i))
            .ok_or(ForumError::UnknownQuestion(id))?;
        thread.push(Answer {
            author: author.into(),
            text: text.into(),
        });
        Ok(())
    }

    /// All questions in posting order. Can be called again to re-read.
    pub fn list_questions(&self) -> impl Iterator<Item = &Question> + '_ {
        self.questions.iter()
    }

    /// Answers for `id` in the order they were posted.
    ///
    /// # Errors
    ///
    /// Returns `ForumError::UnknownQuestion` if `id` was never issued.
    pub fn list_answers(&self, id: QuestionId) -> Result<&[Answer], ForumError> {
        id.index()
            .and_then(|i| self.answers.get(i))
            .map(Vec::as_slice)
            .ok_or(ForumError::UnknownQuestion(id))
    }

    #[must_use]
    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        id.index().and_then(|i| self.questions.get(i))
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn answer_count(&self) -> usize {
        self.answers.iter().map(Vec::len).sum()
    }
}
