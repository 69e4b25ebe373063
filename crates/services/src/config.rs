//! Session defaults, optionally overridden from the environment.

use study_core::timer::PomodoroSettings;

use crate::error::ConfigError;
use crate::tips::StudyTips;

pub const ENV_WORK_MINUTES: &str = "STUDY_WORK_MINUTES";
pub const ENV_BREAK_MINUTES: &str = "STUDY_BREAK_MINUTES";
pub const ENV_CYCLES: &str = "STUDY_CYCLES";

/// Defaults applied to every new `StudySession`.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub pomodoro: PomodoroSettings,
    pub tips: StudyTips,
}

impl SessionConfig {
    /// Reads pomodoro defaults from `STUDY_WORK_MINUTES`, `STUDY_BREAK_MINUTES`
    /// and `STUDY_CYCLES`. Unset variables keep the 25/5/4 defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is not a number or out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is not a number or out of range.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = PomodoroSettings::default();
        let read = |var: &'static str, fallback: u32| -> Result<u32, ConfigError> {
            match lookup(var) {
                None => Ok(fallback),
                Some(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::NotANumber { var, raw }),
            }
        };

        let pomodoro = PomodoroSettings::new(
            read(ENV_WORK_MINUTES, defaults.work_minutes())?,
            read(ENV_BREAK_MINUTES, defaults.break_minutes())?,
            read(ENV_CYCLES, defaults.cycles())?,
        )?;

        Ok(Self {
            pomodoro,
            tips: StudyTips::default(),
        })
    }

    #[must_use]
    pub fn with_pomodoro(mut self, pomodoro: PomodoroSettings) -> Self {
        self.pomodoro = pomodoro;
        self
    }

    #[must_use]
    pub fn with_tips(mut self, tips: StudyTips) -> Self {
        self.tips = tips;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn missing_variables_use_defaults() {
        let config = SessionConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.pomodoro, PomodoroSettings::default());
        assert_eq!(config.tips.len(), 5);
    }

    #[test]
    fn variables_override_defaults() {
        let config = SessionConfig::from_lookup(lookup(&[
            (ENV_WORK_MINUTES, "50"),
            (ENV_BREAK_MINUTES, " 10 "),
            (ENV_CYCLES, "2"),
        ]))
        .unwrap();
        assert_eq!(config.pomodoro, PomodoroSettings::new(50, 10, 2).unwrap());
    }

    #[test]
    fn garbage_value_names_the_variable() {
        let err = SessionConfig::from_lookup(lookup(&[(ENV_CYCLES, "four")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NotANumber { var: ENV_CYCLES, .. }
        ));
        assert!(err.to_string().contains("STUDY_CYCLES"));
    }

    #[test]
    fn out_of_range_value_is_rejected() {
        let err = SessionConfig::from_lookup(lookup(&[(ENV_WORK_MINUTES, "90")])).unwrap_err();
        assert!(matches!(err, ConfigError::Timer(_)));
    }
}
