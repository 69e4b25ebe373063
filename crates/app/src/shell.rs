//! Prompt loop: reads commands, drives the session, renders plain text.

use std::io::{self, BufRead, Write};

use services::{SessionError, StudySession};
use study_core::planner::{MessageKind, StudyPlan};
use study_core::timer::{PomodoroSettings, TimerPhase};

use crate::command::{Command, HELP, ParseError};

enum Flow {
    Continue,
    Quit,
}

/// Runs commands from `input` until it ends or `quit` is entered.
///
/// # Errors
///
/// Returns an I/O error if reading input or writing output fails.
pub fn run(
    input: impl BufRead,
    out: &mut impl Write,
    session: &mut StudySession,
) -> io::Result<()> {
    writeln!(out, "Type `help` for commands.")?;
    for line in input.lines() {
        let line = line?;
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(ParseError::Empty) => continue,
            Err(err) => {
                writeln!(out, "! {err}")?;
                continue;
            }
        };
        if let Flow::Quit = execute(command, session, out)? {
            break;
        }
    }
    Ok(())
}

fn execute(
    command: Command,
    session: &mut StudySession,
    out: &mut impl Write,
) -> io::Result<Flow> {
    match command {
        Command::Name(name) => match session.set_name(&name) {
            Ok(()) => writeln!(out, "Hello, {}.", session.learner_name())?,
            Err(err) => warn(out, &err)?,
        },
        Command::Subject {
            proficiency,
            subject,
        } => match session.add_subject(&subject, proficiency) {
            Ok(()) => writeln!(out, "Added {subject} with proficiency {proficiency}")?,
            Err(err) => warn(out, &err)?,
        },
        Command::Plan => render_plan(out, session)?,
        Command::Advice => render_advice(out, session)?,
        Command::Ask { author, question } => match session.post_question(&author, &question) {
            Ok(id) => writeln!(out, "Question posted with ID: {id}")?,
            Err(err) => warn(out, &err)?,
        },
        Command::Answer { id, author, text } => {
            match session.answer_question(&author, id, &text) {
                Ok(()) => writeln!(out, "Answer submitted!")?,
                Err(err) => warn(out, &err)?,
            }
        }
        Command::Questions => {
            let mut any = false;
            for question in session.questions() {
                any = true;
                writeln!(
                    out,
                    "{}. {} (asked by {})",
                    question.id(),
                    question.text(),
                    question.author()
                )?;
            }
            if !any {
                writeln!(out, "No questions yet.")?;
            }
        }
        Command::Answers(id) => match session.answers(id) {
            Ok(answers) => {
                writeln!(out, "Answers for question {id}:")?;
                for answer in answers {
                    writeln!(out, "- {}: {}", answer.author, answer.text)?;
                }
            }
            Err(err) => warn(out, &err)?,
        },
        Command::Pomodoro(values) => {
            let settings = match values
                .map(|(work, brk, cycles)| PomodoroSettings::new(work, brk, cycles))
                .transpose()
            {
                Ok(settings) => settings,
                Err(err) => {
                    warn(out, &err.into())?;
                    return Ok(Flow::Continue);
                }
            };
            let timer = session.start_pomodoro(settings);
            let settings = timer.settings();
            writeln!(
                out,
                "Pomodoro started: {} cycles of {} min work + {} min break",
                settings.cycles(),
                settings.work_minutes(),
                settings.break_minutes()
            )?;
        }
        Command::Timer => match session.pomodoro_phase() {
            Ok(phase) => {
                let remaining = session
                    .pomodoro_remaining()
                    .ok()
                    .flatten()
                    .map(|d| format!(" ({} min left)", (d.num_seconds() + 59) / 60))
                    .unwrap_or_default();
                writeln!(out, "{}{remaining}", describe_phase(phase))?;
            }
            Err(err) => warn(out, &err)?,
        },
        Command::Stop => match session.cancel_pomodoro() {
            Ok(phase) => writeln!(out, "{}", describe_phase(phase))?,
            Err(err) => warn(out, &err)?,
        },
        Command::Tip => match session.study_tip() {
            Some(tip) => writeln!(out, "{tip}")?,
            None => writeln!(out, "No tips configured.")?,
        },
        Command::Progress => {
            let state = session.progress();
            writeln!(out, "Points: {}", state.points)?;
            writeln!(out, "Level: {}", state.level)?;
            writeln!(out, "Next level in {} points", state.points_to_next_level())?;
        }
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn render_plan(out: &mut impl Write, session: &StudySession) -> io::Result<()> {
    let name = session.learner_name();
    writeln!(out, "Study plan for {}", if name.is_empty() { "you" } else { name })?;
    match session.study_plan() {
        StudyPlan::Empty => writeln!(out, "No subjects added yet."),
        StudyPlan::Scheduled(entries) => {
            for entry in entries {
                writeln!(out, "{}: {} hrs/week", entry.subject, entry.hours)?;
            }
            Ok(())
        }
    }
}

fn render_advice(out: &mut impl Write, session: &StudySession) -> io::Result<()> {
    let recommendations = session.recommendations();
    if recommendations.is_empty() {
        return writeln!(out, "No subjects added yet.");
    }
    for rec in recommendations {
        match rec.message_kind {
            MessageKind::Warning => writeln!(
                out,
                "! Spend more time on {}: proficiency is low.",
                rec.subject
            )?,
            MessageKind::Info => writeln!(
                out,
                "{} is in good shape. Maintain consistency.",
                rec.subject
            )?,
        }
    }
    Ok(())
}

fn describe_phase(phase: TimerPhase) -> String {
    match phase {
        TimerPhase::Work { cycle } => format!("Cycle {cycle}: work"),
        TimerPhase::Break { cycle } => format!("Cycle {cycle}: break"),
        TimerPhase::Done => "All pomodoro cycles completed!".to_string(),
        TimerPhase::Cancelled => "Pomodoro cancelled.".to_string(),
    }
}

fn warn(out: &mut impl Write, err: &SessionError) -> io::Result<()> {
    writeln!(out, "! {err}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use services::SessionConfig;
    use study_core::time::fixed_clock;

    fn run_script(script: &str) -> String {
        let mut session = StudySession::new(fixed_clock(), SessionConfig::default());
        let mut out = Vec::new();
        run(script.as_bytes(), &mut out, &mut session).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn planner_script_renders_plan_and_progress() {
        let out = run_script("name Ada\nsubject 1 Math\nsubject 4 History\nplan\nprogress\n");
        assert!(out.contains("Study plan for Ada"));
        let math = out.find("Math: 10 hrs/week").unwrap();
        let history = out.find("History: 4 hrs/week").unwrap();
        assert!(math < history);
        assert!(out.contains("Points: 20"));
        assert!(out.contains("Level: 1"));
    }

    #[test]
    fn empty_plan_prints_hint() {
        let out = run_script("plan\nadvice\n");
        assert_eq!(out.matches("No subjects added yet.").count(), 2);
    }

    #[test]
    fn rejected_actions_print_warnings_and_continue() {
        let out = run_script("subject 3 Math\nanswer 5 bo | hi\nbogus\nname Ada\n");
        assert!(out.contains("! set your name before adding subjects"));
        assert!(out.contains("! no question with id 5"));
        assert!(out.contains("! unknown command: bogus"));
        assert!(out.contains("Hello, Ada."));
    }

    #[test]
    fn forum_script_lists_questions_and_answers() {
        let out = run_script(
            "ask ana | What is Rust?\nanswer 0 bo | A language\nquestions\nanswers 0\n",
        );
        assert!(out.contains("Question posted with ID: 0"));
        assert!(out.contains("0. What is Rust? (asked by ana)"));
        assert!(out.contains("- bo: A language"));
    }

    #[test]
    fn quit_stops_processing() {
        let out = run_script("quit\nname Ada\n");
        assert!(!out.contains("Hello"));
    }

    #[test]
    fn pomodoro_script_reports_phases() {
        let out = run_script("timer\npomodoro 0 5 4\npomodoro 10 2 1\ntimer\nstop\n");
        assert!(out.contains("! no pomodoro timer has been started"));
        assert!(out.contains("! work duration must be between 1 and 60 minutes, got 0"));
        assert!(out.contains("Pomodoro started: 1 cycles of 10 min work + 2 min break"));
        assert!(out.contains("Cycle 1: work (10 min left)"));
        assert!(out.contains("Pomodoro cancelled."));
    }
}
