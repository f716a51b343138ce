use std::error::Error;
use std::fmt::{self, Display};

/// A line of terminal input, interpreted.
///
/// Lines starting with `/` are commands; `//` escapes a leading slash.
/// Indexes are 1-based when typed and 0-based once parsed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Type the text into the input field and press Enter.
    Say(String),
    /// Click the send button.
    Send,
    /// Click the emoji toggle (`/emoji`).
    ToggleEmojis,
    /// Click an emoji item (`/emoji N`).
    PickEmoji(usize),
    /// List the quick replies (`/quick`).
    QuickReplies,
    /// Click a quick-reply button (`/quick N`).
    QuickReply(usize),
    /// Show the help text.
    Help,
    /// Leave the chat.
    Quit,
}

impl Command {
    /// Parses one line of input.
    pub fn parse(line: &str) -> Result<Self, ParseCommandError> {
        let line = line.trim_end_matches(['\r', '\n']);
        if let Some(escaped) = line.strip_prefix("//") {
            return Ok(Command::Say(format!("/{escaped}")));
        }
        let Some(command) = line.strip_prefix('/') else {
            return Ok(Command::Say(line.to_owned()));
        };

        let mut parts = command.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();
        if parts.next().is_some() {
            return Err(ParseCommandError::TooManyArguments(name.to_owned()));
        }

        match (name, arg) {
            ("send", None) => Ok(Command::Send),
            ("emoji", None) => Ok(Command::ToggleEmojis),
            ("emoji", Some(arg)) => parse_index(arg).map(Command::PickEmoji),
            ("quick", None) => Ok(Command::QuickReplies),
            ("quick", Some(arg)) => parse_index(arg).map(Command::QuickReply),
            ("help", None) => Ok(Command::Help),
            ("quit" | "exit", None) => Ok(Command::Quit),
            ("send" | "help" | "quit" | "exit", Some(_)) => {
                Err(ParseCommandError::TooManyArguments(name.to_owned()))
            }
            _ => Err(ParseCommandError::Unknown(name.to_owned())),
        }
    }
}

fn parse_index(arg: &str) -> Result<usize, ParseCommandError> {
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(ParseCommandError::BadIndex(arg.to_owned())),
    }
}

/// An error returned when a line is not a valid command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseCommandError {
    /// The command doesn't exist.
    Unknown(String),
    /// The index is not a positive number.
    BadIndex(String),
    /// The command got more arguments than it takes.
    TooManyArguments(String),
}

impl Display for ParseCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCommandError::Unknown(name) => {
                write!(f, "unknown command `/{name}`, try `/help`")
            }
            ParseCommandError::BadIndex(arg) => {
                write!(f, "`{arg}` is not a valid number")
            }
            ParseCommandError::TooManyArguments(name) => {
                write!(f, "too many arguments for `/{name}`")
            }
        }
    }
}

impl Error for ParseCommandError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text() {
        assert_eq!(
            Command::parse("Hello there\n"),
            Ok(Command::Say("Hello there".to_owned()))
        );
        assert_eq!(Command::parse(""), Ok(Command::Say(String::new())));
        assert_eq!(
            Command::parse("//etc/hosts"),
            Ok(Command::Say("/etc/hosts".to_owned()))
        );
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("/send"), Ok(Command::Send));
        assert_eq!(Command::parse("/emoji"), Ok(Command::ToggleEmojis));
        assert_eq!(Command::parse("/emoji 3"), Ok(Command::PickEmoji(2)));
        assert_eq!(Command::parse("/quick"), Ok(Command::QuickReplies));
        assert_eq!(Command::parse("/quick 1\r\n"), Ok(Command::QuickReply(0)));
        assert_eq!(Command::parse("/exit"), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Command::parse("/dance"),
            Err(ParseCommandError::Unknown("dance".to_owned()))
        );
        assert_eq!(
            Command::parse("/emoji 0"),
            Err(ParseCommandError::BadIndex("0".to_owned()))
        );
        assert_eq!(
            Command::parse("/quick two"),
            Err(ParseCommandError::BadIndex("two".to_owned()))
        );
        assert_eq!(
            Command::parse("/quit now"),
            Err(ParseCommandError::TooManyArguments("quit".to_owned()))
        );
    }
}
