mod ids;
mod proficiency;

pub use ids::{ParseIdError, QuestionId};
pub use proficiency::{Proficiency, ProficiencyError};
