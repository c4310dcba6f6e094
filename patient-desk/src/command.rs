use std::str::FromStr;

use patient_events::forms::{RegistrationForm, UpdateForm};
use strum::{EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
enum Verb {
    Register,
    Update,
    Roster,
    Help,
    Quit,
}

impl Verb {
    fn usage(self) -> &'static str {
        match self {
            Verb::Register => "register <mrn> <first-name> <last-name>",
            Verb::Update => "update <mrn> <new-last-name>",
            Verb::Roster => "roster",
            Verb::Help => "help",
            Verb::Quit => "quit",
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command {0:?}, try 'help'")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeskCommand {
    Register(RegistrationForm),
    Update(UpdateForm),
    Roster,
    Help,
    Quit,
}

impl DeskCommand {
    pub fn usage() -> String {
        Verb::iter()
            .map(|verb| format!("  {}", verb.usage()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl FromStr for DeskCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let first = words.next().ok_or(CommandError::Empty)?;
        let verb =
            Verb::from_str(first).map_err(|_| CommandError::Unknown(first.to_string()))?;
        let args = words.collect::<Vec<_>>();

        match (verb, args.as_slice()) {
            (Verb::Register, [mrn, first_name, last_name @ ..]) if !last_name.is_empty() => {
                let last_name = last_name.join(" ");
                Ok(DeskCommand::Register(RegistrationForm::new(
                    first_name, &last_name, mrn,
                )))
            }
            (Verb::Update, [mrn, new_last_name @ ..]) if !new_last_name.is_empty() => {
                let new_last_name = new_last_name.join(" ");
                Ok(DeskCommand::Update(UpdateForm::new(mrn, &new_last_name)))
            }
            (Verb::Roster, []) => Ok(DeskCommand::Roster),
            (Verb::Help, _) => Ok(DeskCommand::Help),
            (Verb::Quit, _) => Ok(DeskCommand::Quit),
            (verb, _) => Err(CommandError::Usage(verb.usage())),
        }
    }
}
