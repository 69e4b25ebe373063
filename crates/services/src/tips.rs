use rand::Rng;
use rand::seq::IndexedRandom;

const DEFAULT_TIPS: [&str; 5] = [
    "Review notes after each class.",
    "Use active recall and spaced repetition.",
    "Teach someone else to better understand the topic.",
    "Use flashcards for quick revision.",
    "Take regular breaks to avoid burnout.",
];

/// Catalogue of study tips handed out at random.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyTips {
    tips: Vec<String>,
}

impl Default for StudyTips {
    fn default() -> Self {
        Self::new(DEFAULT_TIPS)
    }
}

impl StudyTips {
    #[must_use]
    pub fn new<I, S>(tips: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tips: tips.into_iter().map(Into::into).collect(),
        }
    }

    /// Picks one tip uniformly at random. `None` if the catalogue is empty.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.tips.choose(rng).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tips.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tips.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.tips.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn default_catalogue_has_five_tips() {
        let tips = StudyTips::default();
        assert_eq!(tips.len(), 5);
        assert!(tips.iter().any(|t| t.contains("spaced repetition")));
    }

    #[test]
    fn pick_returns_a_catalogue_entry() {
        let tips = StudyTips::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let tip = tips.pick(&mut rng).unwrap();
            assert!(tips.iter().any(|t| t == tip));
        }
    }

    #[test]
    fn pick_eventually_covers_every_tip() {
        let tips = StudyTips::default();
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(tips.pick(&mut rng).unwrap().to_string());
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn empty_catalogue_yields_none() {
        let tips = StudyTips::new(Vec::<String>::new());
        let mut rng = StdRng::seed_from_u64(1);
        assert!(tips.is_empty());
        assert_eq!(tips.pick(&mut rng), None);
    }
}
