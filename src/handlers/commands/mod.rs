//! Command handlers module
//!
//! This module parses text commands and routes them to their handlers.

pub mod help;
pub mod events;
pub mod attendees;

use std::collections::HashMap;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::{Attendee, Event};
use crate::services::ServiceFactory;
use crate::utils::errors::{PlayMateError, Result};
use crate::utils::helpers::{normalize_whitespace, split_quoted};

/// All available commands
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Events { query: String },
    Show { event: String },
    Create { fields: HashMap<String, String> },
    Rsvp { event: String, name: String },
    CheckIn { event: String, attendee: String },
    Remove { event: String, attendee: String },
    Promote { event: String },
    Export { event: String },
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let words = split_quoted(line);
        let Some((name, args)) = words.split_first() else {
            return Ok(None);
        };

        let command = match name.to_lowercase().as_str() {
            "help" | "?" => Command::Help,
            "events" | "list" => Command::Events { query: args.join(" ") },
            "show" => Command::Show { event: one_arg(name, args)? },
            "create" => Command::Create { fields: key_values(args)? },
            "rsvp" => {
                let (event, rest) = args
                    .split_first()
                    .ok_or_else(|| usage("rsvp <event> <name>"))?;
                Command::Rsvp {
                    event: event.clone(),
                    name: normalize_whitespace(&rest.join(" ")),
                }
            }
            "checkin" | "check-in" => {
                let (event, attendee) = two_args(args, "checkin <event> <attendee>")?;
                Command::CheckIn { event, attendee }
            }
            "remove" => {
                let (event, attendee) = two_args(args, "remove <event> <attendee>")?;
                Command::Remove { event, attendee }
            }
            "promote" => Command::Promote { event: one_arg(name, args)? },
            "export" => Command::Export { event: one_arg(name, args)? },
            "quit" | "exit" => Command::Quit,
            other => {
                return Err(PlayMateError::InvalidInput(format!(
                    "Unknown command: {}. Type 'help' for a list of commands.",
                    other
                )))
            }
        };

        Ok(Some(command))
    }
}

fn usage(text: &str) -> PlayMateError {
    PlayMateError::InvalidInput(format!("Usage: {}", text))
}

fn one_arg(name: &str, args: &[String]) -> Result<String> {
    match args {
        [only] => Ok(only.clone()),
        _ => Err(usage(&format!("{} <event>", name))),
    }
}

fn two_args(args: &[String], text: &str) -> Result<(String, String)> {
    match args {
        [first, second] => Ok((first.clone(), second.clone())),
        _ => Err(usage(text)),
    }
}

fn key_values(args: &[String]) -> Result<HashMap<String, String>> {
    args.iter()
        .map(|arg| {
            arg.split_once('=')
                .map(|(k, v)| (k.to_lowercase(), v.to_string()))
                .ok_or_else(|| usage("create key=value ..."))
        })
        .collect()
}

/// Main command dispatcher
pub async fn handle_command(cmd: Command, services: &ServiceFactory) -> Result<String> {
    debug!(command = ?cmd, "Dispatching command");
    match cmd {
        Command::Help => Ok(help::handle_help()),
        Command::Events { query } => events::handle_events_list(services, &query).await,
        Command::Show { event } => events::handle_show(services, &event).await,
        Command::Create { fields } => events::handle_create_event(services, &fields).await,
        Command::Rsvp { event, name } => attendees::handle_rsvp(services, &event, &name).await,
        Command::CheckIn { event, attendee } => attendees::handle_check_in(services, &event, &attendee).await,
        Command::Remove { event, attendee } => attendees::handle_remove(services, &event, &attendee).await,
        Command::Promote { event } => attendees::handle_promote(services, &event).await,
        Command::Export { event } => events::handle_export(services, &event).await,
        Command::Quit => Ok("Bye!".to_string()),
    }
}

/// Parse and run one line; failures become the reply text
pub async fn handle_line(line: &str, services: &ServiceFactory) -> Option<String> {
    let result = match Command::parse(line) {
        Ok(Some(cmd)) => handle_command(cmd, services).await,
        Ok(None) => return None,
        Err(e) => Err(e),
    };

    match result {
        Ok(reply) => Some(reply),
        Err(e) => {
            warn!(error = %e, severity = %e.severity(), "Command failed");
            Some(format!("Error: {}", e))
        }
    }
}

/// Find an event by full id or unambiguous id prefix
pub async fn resolve_event(services: &ServiceFactory, reference: &str) -> Result<Event> {
    if let Ok(event_id) = Uuid::parse_str(reference) {
        return services.events.get_event(event_id).await;
    }

    let events = services.events.list_events().await?;
    pick_unique(events, reference, |e| e.id, "event")
}

/// Find an attendee of an event by full id or unambiguous id prefix
pub async fn resolve_attendee(services: &ServiceFactory, event: &Event, reference: &str) -> Result<Attendee> {
    let attendees = services.admission.attendees(event.id).await?;
    if let Ok(attendee_id) = Uuid::parse_str(reference) {
        return attendees
            .into_iter()
            .find(|a| a.id == attendee_id)
            .ok_or(PlayMateError::AttendeeNotFound { event_id: event.id, attendee_id });
    }

    pick_unique(attendees, reference, |a| a.id, "attendee")
}

fn pick_unique<T>(items: Vec<T>, prefix: &str, id: impl Fn(&T) -> Uuid, kind: &str) -> Result<T> {
    let prefix = prefix.to_lowercase().replace('-', "");
    if prefix.is_empty() {
        return Err(PlayMateError::InvalidInput(format!("An {} id is required", kind)));
    }

    let mut matches: Vec<T> = items
        .into_iter()
        .filter(|item| id(item).simple().to_string().starts_with(&prefix))
        .collect();

    match matches.len() {
        0 => Err(PlayMateError::InvalidInput(format!("No {} matches '{}'", kind, prefix))),
        1 => Ok(matches.remove(0)),
        n => Err(PlayMateError::InvalidInput(format!(
            "'{}' matches {} {}s, use more characters",
            prefix, n, kind
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("  ").unwrap(), None);
        assert_eq!(Command::parse("help").unwrap(), Some(Command::Help));
        assert_eq!(Command::parse("QUIT").unwrap(), Some(Command::Quit));
        assert_eq!(
            Command::parse("events beach night").unwrap(),
            Some(Command::Events { query: "beach night".to_string() })
        );
        assert_eq!(
            Command::parse("promote 67e5").unwrap(),
            Some(Command::Promote { event: "67e5".to_string() })
        );
    }

    #[test]
    fn test_parse_rsvp_joins_name() {
        assert_eq!(
            Command::parse(r#"rsvp 67e5 Ana   "de la" Cruz"#).unwrap(),
            Some(Command::Rsvp {
                event: "67e5".to_string(),
                name: "Ana de la Cruz".to_string()
            })
        );
        assert!(Command::parse("rsvp").is_err());
    }

    #[test]
    fn test_parse_create_fields() {
        let Some(Command::Create { fields }) =
            Command::parse(r#"create title="Friday Smash" Capacity=12"#).unwrap()
        else {
            panic!("expected create");
        };
        assert_eq!(fields.get("title").map(String::as_str), Some("Friday Smash"));
        assert_eq!(fields.get("capacity").map(String::as_str), Some("12"));

        assert!(Command::parse("create title").is_err());
    }

    #[test]
    fn test_parse_errors() {
        assert!(Command::parse("dance").is_err());
        assert!(Command::parse("checkin 67e5").is_err());
        assert!(Command::parse("show").is_err());
    }

    #[test]
    fn test_pick_unique() {
        let a = Uuid::parse_str("aaaa1111-0000-0000-0000-000000000000").unwrap();
        let b = Uuid::parse_str("aaaa2222-0000-0000-0000-000000000000").unwrap();
        let ids = vec![a, b];

        assert_eq!(pick_unique(ids.clone(), "AAAA1", |id| *id, "event").unwrap(), a);
        assert!(pick_unique(ids.clone(), "aaaa", |id| *id, "event").is_err());
        assert!(pick_unique(ids.clone(), "bbbb", |id| *id, "event").is_err());
        assert!(pick_unique(ids, "", |id| *id, "event").is_err());
    }
}
