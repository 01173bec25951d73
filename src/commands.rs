//! REPL command parsing
//!
//! Input lines are normalised with [`clean_input`] and turned into a [`Command`].
//! Dispatch is an exhaustive match on the enum in `app`.

use thiserror::Error;

/// Errors from malformed user input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// A command that needs a name was given none
    #[error("usage: {command} <{argument}>")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    /// The first word is not a known command
    #[error("unknown command: '{0}'. Type 'help' to list commands")]
    UnknownCommand(String),
}

/// A parsed REPL command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    /// Next page of location areas
    Map,
    /// Previous page of location areas
    MapBack,
    /// First page of location areas
    MapFirst,
    /// Next page of Pokémon
    List,
    /// Previous page of Pokémon
    ListBack,
    /// First page of Pokémon
    ListFirst,
    /// Pokémon found in a location area
    Explore(String),
    Catch(String),
    Inspect(String),
    /// Every caught Pokémon
    Pokedex,
}

/// Name, usage and description of every command, in help order
pub const COMMANDS: &[(&str, &str, &str)] = &[
    ("help", "help", "Displays this help message"),
    ("exit", "exit", "Exits the Pokedex"),
    ("map", "map", "Shows the next page of location areas"),
    ("mapb", "mapb", "Shows the previous page of location areas"),
    ("mapf", "mapf", "Shows the first page of location areas"),
    ("list", "list", "Shows the next page of Pokemon"),
    ("listb", "listb", "Shows the previous page of Pokemon"),
    ("listf", "listf", "Shows the first page of Pokemon"),
    ("explore", "explore <area>", "Lists the Pokemon found in a location area"),
    ("catch", "catch <pokemon>", "Throws a Pokeball at a Pokemon"),
    ("inspect", "inspect <pokemon>", "Shows details of a caught Pokemon"),
    ("pokedex", "pokedex", "Lists every Pokemon you have caught"),
];

/// Splits a line into lowercase words, dropping surrounding whitespace
pub fn clean_input(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

impl Command {
    /// Parses a raw input line
    ///
    /// # Returns
    /// * `Ok(None)` for a blank line
    /// * `Ok(Some(Command))` for a recognised command
    /// * `Err(CommandError)` for an unknown command or missing argument
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let words = clean_input(line);
        let Some((name, args)) = words.split_first() else {
            return Ok(None);
        };
        let arg = |command: &'static str, argument: &'static str| {
            args.first()
                .cloned()
                .ok_or(CommandError::MissingArgument { command, argument })
        };

        let command = match name.as_str() {
            "help" => Command::Help,
            "exit" => Command::Exit,
            "map" => Command::Map,
            "mapb" => Command::MapBack,
            "mapf" => Command::MapFirst,
            "list" => Command::List,
            "listb" => Command::ListBack,
            "listf" => Command::ListFirst,
            "explore" => Command::Explore(arg("explore", "area")?),
            "catch" => Command::Catch(arg("catch", "pokemon")?),
            "inspect" => Command::Inspect(arg("inspect", "pokemon")?),
            "pokedex" => Command::Pokedex,
            other => return Err(CommandError::UnknownCommand(other.to_string())),
        };
        Ok(Some(command))
    }
}

/// Renders the help text from [`COMMANDS`]
pub fn help_text() -> String {
    let width = COMMANDS.iter().map(|(_, usage, _)| usage.len()).max().unwrap_or(0);
    let mut text = String::from("Welcome to the Pokedex!\nUsage:\n\n");
    for (_, usage, description) in COMMANDS {
        text.push_str(&format!("  {:<width$}  {}\n", usage, description, width = width));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_input() {
        let cases = [
            ("    hello   world   ", vec!["hello", "world"]),
            (
                "All   your bases    are  belong to   us  ",
                vec!["all", "your", "bases", "are", "belong", "to", "us"],
            ),
            ("  Pain  is     the mindkiller", vec!["pain", "is", "the", "mindkiller"]),
            ("There    is  no   spoon", vec!["there", "is", "no", "spoon"]),
            ("\tTabs\tcount too\n", vec!["tabs", "count", "too"]),
        ];

        for (input, expected) in cases {
            assert_eq!(clean_input(input), expected, "input: {:?}", input);
        }
    }

    #[test]
    fn test_parse_blank_line() {
        assert_eq!(Command::parse(""), Ok(None));
        assert_eq!(Command::parse("   \t "), Ok(None));
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("help"), Ok(Some(Command::Help)));
        assert_eq!(Command::parse("EXIT"), Ok(Some(Command::Exit)));
        assert_eq!(Command::parse("map"), Ok(Some(Command::Map)));
        assert_eq!(Command::parse("mapb"), Ok(Some(Command::MapBack)));
        assert_eq!(Command::parse("mapf"), Ok(Some(Command::MapFirst)));
        assert_eq!(Command::parse("list"), Ok(Some(Command::List)));
        assert_eq!(Command::parse("listb"), Ok(Some(Command::ListBack)));
        assert_eq!(Command::parse("listf"), Ok(Some(Command::ListFirst)));
        assert_eq!(Command::parse(" pokedex "), Ok(Some(Command::Pokedex)));
    }

    #[test]
    fn test_parse_commands_with_names() {
        assert_eq!(
            Command::parse("explore Pastoria-City-Area"),
            Ok(Some(Command::Explore("pastoria-city-area".to_string())))
        );
        assert_eq!(
            Command::parse("catch pikachu extra words"),
            Ok(Some(Command::Catch("pikachu".to_string())))
        );
        assert_eq!(
            Command::parse("inspect pidgey"),
            Ok(Some(Command::Inspect("pidgey".to_string())))
        );
    }

    #[test]
    fn test_parse_missing_argument() {
        let err = Command::parse("catch").unwrap_err();
        assert_eq!(
            err,
            CommandError::MissingArgument {
                command: "catch",
                argument: "pokemon"
            }
        );
        assert_eq!(err.to_string(), "usage: catch <pokemon>");
        assert!(Command::parse("explore").is_err());
        assert!(Command::parse("inspect").is_err());
    }

    #[test]
    fn test_parse_unknown_command() {
        let err = Command::parse("fly away").unwrap_err();
        assert_eq!(err, CommandError::UnknownCommand("fly".to_string()));
        assert!(err.to_string().contains("'fly'"));
    }

    #[test]
    fn test_help_lists_every_command() {
        let help = help_text();
        for (name, _, description) in COMMANDS {
            assert!(help.contains(name), "help should mention {}", name);
            assert!(help.contains(description));
        }
    }
}
