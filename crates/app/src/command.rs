use std::str::FromStr;

use study_core::model::{ParseIdError, QuestionId};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("{0}")]
    InvalidId(#[from] ParseIdError),
}

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Name(String),
    Subject { proficiency: i64, subject: String },
    Plan,
    Advice,
    Ask { author: String, question: String },
    Answer { id: QuestionId, author: String, text: String },
    Questions,
    Answers(QuestionId),
    Pomodoro(Option<(u32, u32, u32)>),
    Timer,
    Stop,
    Tip,
    Progress,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  name <name>                       set your name
  subject <1-5> <subject>           add or re-rate a subject
  plan                              weekly study plan
  advice                            per-subject recommendations
  ask <author> | <question>         post a question
  answer <id> <author> | <answer>   answer a question
  questions                         list questions
  answers <id>                      list answers for a question
  pomodoro [work break cycles]      start a pomodoro run (minutes)
  timer                             show the current pomodoro phase
  stop                              cancel the pomodoro run
  tip                               random study tip
  progress                          points and level
  help                              this text
  quit                              leave";

const USAGE_NAME: &str = "name <name>";
const USAGE_SUBJECT: &str = "subject <1-5> <subject>";
const USAGE_ASK: &str = "ask <author> | <question>";
const USAGE_ANSWER: &str = "answer <id> <author> | <answer>";
const USAGE_ANSWERS: &str = "answers <id>";
const USAGE_POMODORO: &str = "pomodoro [work break cycles]";

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (head, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(h, r)| (h, r.trim()));

        match head {
            "" => Err(ParseError::Empty),
            "name" => non_empty(rest, USAGE_NAME).map(|n| Command::Name(n.to_string())),
            "subject" => {
                let (level, subject) = rest
                    .split_once(char::is_whitespace)
                    .ok_or(ParseError::Usage(USAGE_SUBJECT))?;
                let proficiency = level
                    .parse()
                    .map_err(|_| ParseError::Usage(USAGE_SUBJECT))?;
                Ok(Command::Subject {
                    proficiency,
                    subject: non_empty(subject, USAGE_SUBJECT)?.to_string(),
                })
            }
            "plan" => Ok(Command::Plan),
            "advice" => Ok(Command::Advice),
            "ask" => {
                let (author, question) = split_pipe(rest, USAGE_ASK)?;
                Ok(Command::Ask { author, question })
            }
            "answer" => {
                let (id, rest) = rest
                    .split_once(char::is_whitespace)
                    .ok_or(ParseError::Usage(USAGE_ANSWER))?;
                let (author, text) = split_pipe(rest, USAGE_ANSWER)?;
                Ok(Command::Answer {
                    id: id.parse()?,
                    author,
                    text,
                })
            }
            "questions" => Ok(Command::Questions),
            "answers" => Ok(Command::Answers(non_empty(rest, USAGE_ANSWERS)?.parse()?)),
            "pomodoro" => parse_pomodoro(rest).map(Command::Pomodoro),
            "timer" => Ok(Command::Timer),
            "stop" => Ok(Command::Stop),
            "tip" => Ok(Command::Tip),
            "progress" => Ok(Command::Progress),
            "help" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(ParseError::Unknown(other.to_string())),
        }
    }
}

fn non_empty<'a>(value: &'a str, usage: &'static str) -> Result<&'a str, ParseError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ParseError::Usage(usage))
    } else {
        Ok(value)
    }
}

// Blank sides are passed through; the session decides whether they are valid.
fn split_pipe(rest: &str, usage: &'static str) -> Result<(String, String), ParseError> {
    let (left, right) = rest.split_once('|').ok_or(ParseError::Usage(usage))?;
    Ok((left.trim().to_string(), right.trim().to_string()))
}

fn parse_pomodoro(rest: &str) -> Result<Option<(u32, u32, u32)>, ParseError> {
    if rest.is_empty() {
        return Ok(None);
    }
    let values = rest
        .split_whitespace()
        .map(str::parse::<u32>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ParseError::Usage(USAGE_POMODORO))?;
    match values.as_slice() {
        [work, brk, cycles] => Ok(Some((*work, *brk, *cycles))),
        _ => Err(ParseError::Usage(USAGE_POMODORO)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Command, ParseError> {
        line.parse()
    }

    #[test]
    fn parses_simple_commands() {
        assert_eq!(parse("plan"), Ok(Command::Plan));
        assert_eq!(parse("  progress  "), Ok(Command::Progress));
        assert_eq!(parse("exit"), Ok(Command::Quit));
        assert_eq!(parse(""), Err(ParseError::Empty));
        assert_eq!(parse("dance"), Err(ParseError::Unknown("dance".into())));
    }

    #[test]
    fn subject_keeps_multi_word_names() {
        assert_eq!(
            parse("subject 2 Linear Algebra"),
            Ok(Command::Subject {
                proficiency: 2,
                subject: "Linear Algebra".into()
            })
        );
        assert_eq!(parse("subject x Math"), Err(ParseError::Usage(USAGE_SUBJECT)));
        assert_eq!(parse("subject 3"), Err(ParseError::Usage(USAGE_SUBJECT)));
    }

    #[test]
    fn subject_passes_out_of_range_levels_through() {
        assert_eq!(
            parse("subject 9 Art"),
            Ok(Command::Subject {
                proficiency: 9,
                subject: "Art".into()
            })
        );
    }

    #[test]
    fn ask_and_answer_split_on_pipe() {
        assert_eq!(
            parse("ask ana | What is a trait?"),
            Ok(Command::Ask {
                author: "ana".into(),
                question: "What is a trait?".into()
            })
        );
        assert_eq!(
            parse("answer 3 bo | An interface | mostly"),
            Ok(Command::Answer {
                id: QuestionId::new(3),
                author: "bo".into(),
                text: "An interface | mostly".into()
            })
        );
        assert_eq!(parse("ask ana"), Err(ParseError::Usage(USAGE_ASK)));
        assert!(matches!(
            parse("answer x bo | hi"),
            Err(ParseError::InvalidId(_))
        ));
    }

    #[test]
    fn pomodoro_takes_zero_or_three_numbers() {
        assert_eq!(parse("pomodoro"), Ok(Command::Pomodoro(None)));
        assert_eq!(parse("pomodoro 50 10 2"), Ok(Command::Pomodoro(Some((50, 10, 2)))));
        assert_eq!(
            parse("pomodoro 50 10"),
            Err(ParseError::Usage(USAGE_POMODORO))
        );
    }

    #[test]
    fn answers_requires_an_id() {
        assert_eq!(parse("answers 0"), Ok(Command::Answers(QuestionId::new(0))));
        assert_eq!(parse("answers"), Err(ParseError::Usage(USAGE_ANSWERS)));
    }
}
