use serde::Serialize;

use crate::model::Proficiency;

//
// ─── REPORTS ───────────────────────────────────────────────────────────────────
//

/// Weekly allocation for one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanEntry {
    pub subject: String,
    pub hours: u32,
}

/// Result of `ProficiencyPlanner::generate_study_plan`.
///
/// `Empty` is returned when no subjects were added, so callers can show a hint
/// instead of an empty table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StudyPlan {
    Empty,
    Scheduled(Vec<PlanEntry>),
}

impl StudyPlan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, StudyPlan::Empty)
    }

    #[must_use]
    pub fn entries(&self) -> &[PlanEntry] {
        match self {
            StudyPlan::Empty => &[],
            StudyPlan::Scheduled(entries) => entries,
        }
    }
}

/// How a subject should be treated going forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecommendationKind {
    NeedsMoreTime,
    MaintainConsistency,
}

/// Severity hint for rendering a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MessageKind {
    Warning,
    Info,
}

impl RecommendationKind {
    #[must_use]
    pub fn for_proficiency(proficiency: Proficiency) -> Self {
        if proficiency.needs_more_time() {
            RecommendationKind::NeedsMoreTime
        } else {
            RecommendationKind::MaintainConsistency
        }
    }

    #[must_use]
    pub fn message_kind(self) -> MessageKind {
        match self {
            RecommendationKind::NeedsMoreTime => MessageKind::Warning,
            RecommendationKind::MaintainConsistency => MessageKind::Info,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub subject: String,
    pub kind: RecommendationKind,
    pub message_kind: MessageKind,
}

//
// ─── PLANNER ───────────────────────────────────────────────────────────────────
//

/// A learner's name and self-rated subjects.
///
/// Subjects keep their first-insertion position; re-adding a subject only
/// replaces its proficiency.
#[derive(Debug, Clone, Default)]
pub struct ProficiencyPlanner {
    name: String,
    subjects: Vec<(String, Proficiency)>,
}

impl ProficiencyPlanner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Inserts or overwrites a subject. Returns the previous proficiency, if any.
    pub fn add_subject(
        &mut self,
        subject: impl Into<String>,
        proficiency: Proficiency,
    ) -> Option<Proficiency> {
        let subject = subject.into();
        if let Some((_, existing)) = self.subjects.iter_mut().find(|(name, _)| *name == subject) {
            return Some(std::mem::replace(existing, proficiency));
        }
        self.subjects.push((subject, proficiency));
        None
    }

    #[must_use]
    pub fn proficiency(&self, subject: &str) -> Option<Proficiency> {
        self.subjects
            .iter()
            .find(|(name, _)| name == subject)
            .map(|(_, p)| *p)
    }

    /// Subjects in insertion order.
    pub fn subjects(&self) -> impl Iterator<Item = (&str, Proficiency)> + '_ {
        self.subjects.iter().map(|(name, p)| (name.as_str(), *p))
    }

    #[must_use]
    pub fn subject_count(&self) -> usize {
        self.subjects.len()
    }

    /// Weekly hours per subject, weakest first.
    ///
    /// Subjects with equal proficiency stay in insertion order.
    #[must_use]
    pub fn generate_study_plan(&self) -> StudyPlan {
        if self.subjects.is_empty() {
            return StudyPlan::Empty;
        }

        let mut ordered: Vec<&(String, Proficiency)> = self.subjects.iter().collect();
        ordered.sort_by_key(|(_, p)| *p);

        StudyPlan::Scheduled(
            ordered
                .into_iter()
                .map(|(subject, p)| PlanEntry {
                    subject: subject.clone(),
                    hours: p.weekly_hours(),
                })
                .collect(),
        )
    }

    /// One recommendation per subject, in insertion order.
    #[must_use]
    pub fn adaptive_recommendation(&self) -> Vec<Recommendation> {
        self.subjects
            .iter()
            .map(|(subject, p)| {
                let kind = RecommendationKind::for_proficiency(*p);
                Recommendation {
                    subject: subject.clone(),
                    kind,
                    message_kind: kind.message_kind(),
                }
            })
            .collect()
    }

    /// Sum of all weekly allocations.
    #[must_use]
    pub fn total_weekly_hours(&self) -> u32 {
        self.subjects.iter().map(|(_, p)| p.weekly_hours()).sum()
    }
}
