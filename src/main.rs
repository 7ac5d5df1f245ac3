//! Interactive terminal frontend for the UNIVIA survey.
//!
//! Stands in for the browser page: parses typed commands into UI events,
//! hands them to the controller, and re-prints the whole view after every
//! response.

use anyhow::Result;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;
use univia_client::{ApiClient, ClientError, Config, Outcome, Session, SurveyController, UiEvent};

enum Command {
    Event(UiEvent),
    Base(Option<String>),
    Session,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["start", rest @ ..] => Ok(Command::Event(UiEvent::Start {
            student_id: rest.first().map(|s| s.to_string()),
            api_key: rest.get(1).map(|s| s.to_string()),
        })),
        ["comment", uni_id, text @ ..] => Ok(Command::Event(UiEvent::SubmitComment {
            uni_id: uni_id.to_string(),
            text: text.join(" "),
        })),
        ["comment"] => Err("usage: comment <uni_id> <text>".to_string()),
        ["answer", uni_id, slot, value @ ..] => Ok(Command::Event(UiEvent::SubmitAnswer {
            uni_id: uni_id.to_string(),
            slot: slot.to_string(),
            value: value.join(" "),
        })),
        ["answer", ..] => Err("usage: answer <uni_id> <slot> <value>".to_string()),
        ["prefer", uni_id] => Ok(Command::Event(UiEvent::PreferOverFirst {
            uni_id: uni_id.to_string(),
        })),
        ["prefer", ..] => Err("usage: prefer <uni_id>".to_string()),
        ["refresh"] => Ok(Command::Event(UiEvent::Refresh)),
        ["ranking"] => Ok(Command::Event(UiEvent::ShowRanking)),
        ["base", rest @ ..] => Ok(Command::Base(rest.first().map(|s| s.to_string()))),
        ["session"] => Ok(Command::Session),
        ["help"] | ["?"] => Ok(Command::Help),
        ["quit"] | ["exit"] | ["q"] => Ok(Command::Quit),
        _ => Err(format!("unknown command {:?}; try `help`", words[0])),
    }
}

fn print_help() {
    println!("commands:");
    println!("  start [student_id] [api_key]   begin a survey session");
    println!("  comment <uni_id> <text>        comment on a university");
    println!("  answer <uni_id> <slot> <value> answer a pending question");
    println!("  prefer <uni_id>                prefer it over the first column");
    println!("  refresh                        re-fetch the comparison");
    println!("  ranking                        show the current ranking");
    println!("  session                        show session details");
    println!("  base [url]                     show or persist the API base");
    println!("  quit");
}

fn print_session(session: &Session) {
    match session.student_id() {
        Some(id) => {
            let key = if session.has_api_key() { "set" } else { "not set" };
            println!("student: {id} (api key: {key})");
            if let Some(at) = session.started_at() {
                println!("started: {}", at.format("%Y-%m-%d %H:%M:%S UTC"));
            }
            println!(
                "comments: {} · answers: {}",
                session.comment_count(),
                session.answer_count()
            );
        }
        None => println!("no active session; run `start`"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut config = Config::load();
    let client = ApiClient::new(&config)?;

    println!("\n{}", "═".repeat(60));
    println!("UNIVIA survey client");
    println!("{}", "═".repeat(60));
    println!("backend: {}", config.api_base);
    println!("type `help` for commands\n");

    let mut controller = SurveyController::new(Box::new(client));

    let stdin = io::stdin();
    loop {
        print!("univia> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_command(line) {
            Err(message) => println!("{message}"),
            Ok(Command::Quit) => break,
            Ok(Command::Help) => print_help(),
            Ok(Command::Session) => print_session(controller.session()),
            Ok(Command::Base(None)) => println!("API base: {}", config.api_base),
            Ok(Command::Base(Some(url))) => match config.set_api_base(&url) {
                Ok(()) => match config.persist() {
                    Ok(path) => println!(
                        "saved {} to {}; used on next launch",
                        config.api_base,
                        path.display()
                    ),
                    Err(e) => println!("could not persist config: {e}"),
                },
                Err(e) => println!("{e}"),
            },
            Ok(Command::Event(event)) => match controller.dispatch(event).await {
                Ok(Outcome::Triplet(view)) => print!("{view}"),
                Ok(Outcome::Ranking(view)) => print!("{view}"),
                Ok(Outcome::Noop(reason)) => println!("nothing to do: {reason}"),
                // local validation: prompt only, nothing was sent
                Err(ClientError::EmptyInput) => println!("please enter a non-empty value"),
                Err(e) => println!("error: {e}"),
            },
        }
    }

    println!("bye");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_arguments_are_optional() {
        let Ok(Command::Event(UiEvent::Start {
            student_id,
            api_key,
        })) = parse_command("start")
        else {
            panic!("expected start event");
        };
        assert_eq!(student_id, None);
        assert_eq!(api_key, None);

        let Ok(Command::Event(UiEvent::Start { student_id, .. })) = parse_command("start s1 sk-x")
        else {
            panic!("expected start event");
        };
        assert_eq!(student_id.as_deref(), Some("s1"));
    }

    #[test]
    fn comment_text_spans_the_rest_of_the_line() {
        let Ok(Command::Event(UiEvent::SubmitComment { uni_id, text })) =
            parse_command("comment oxford lovely old  town")
        else {
            panic!("expected comment event");
        };
        assert_eq!(uni_id, "oxford");
        assert_eq!(text, "lovely old town");
    }

    #[test]
    fn answer_requires_uni_and_slot() {
        assert!(parse_command("answer oxford").is_err());
        let Ok(Command::Event(UiEvent::SubmitAnswer { slot, value, .. })) =
            parse_command("answer oxford budget_range 20 000 EUR")
        else {
            panic!("expected answer event");
        };
        assert_eq!(slot, "budget_range");
        assert_eq!(value, "20 000 EUR");
    }

    #[test]
    fn unknown_commands_are_reported() {
        assert!(parse_command("sideways").is_err());
        assert!(parse_command("prefer a b").is_err());
    }
}
