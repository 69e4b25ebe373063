use std::io;

use anyhow::Context;
use clap::Parser;
use services::{Clock, SessionConfig, StudySession};
use study_core::timer::PomodoroSettings;
use tracing_subscriber::EnvFilter;

mod command;
mod shell;

#[derive(Parser)]
#[command(
    name = "study",
    version,
    about = "Study planner, Q&A forum, pomodoro timer and progress tracker"
)]
struct Cli {
    /// Learner name to start with
    #[arg(long, env = "STUDY_NAME")]
    name: Option<String>,

    /// Pomodoro work duration in minutes (1-60)
    #[arg(long)]
    work_minutes: Option<u32>,

    /// Pomodoro break duration in minutes (1-30)
    #[arg(long)]
    break_minutes: Option<u32>,

    /// Number of pomodoro cycles (1-10)
    #[arg(long)]
    cycles: Option<u32>,
}

impl Cli {
    fn pomodoro(&self, defaults: PomodoroSettings) -> anyhow::Result<PomodoroSettings> {
        PomodoroSettings::new(
            self.work_minutes.unwrap_or(defaults.work_minutes()),
            self.break_minutes.unwrap_or(defaults.break_minutes()),
            self.cycles.unwrap_or(defaults.cycles()),
        )
        .context("invalid pomodoro arguments")
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = SessionConfig::from_env().context("failed to read configuration")?;
    let pomodoro = cli.pomodoro(config.pomodoro)?;
    let mut session = StudySession::new(Clock::Default, config.with_pomodoro(pomodoro));

    if let Some(name) = cli.name.as_deref() {
        session.set_name(name).context("invalid --name")?;
    }

    tracing::debug!(learner = session.learner_name(), "session ready");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    shell::run(stdin.lock(), &mut stdout, &mut session)?;
    Ok(())
}
