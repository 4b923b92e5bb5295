use genz_types::{PostId, ReactionSlot, UserId};
use thiserror::Error;

/// One line of console input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Posts,
    Users,
    User(UserId),
    Post {
        author: Option<UserId>,
        title: String,
        content: String,
    },
    Edit {
        id: PostId,
        title: String,
        content: Option<String>,
    },
    React {
        id: PostId,
        slot: usize,
    },
    Notifications,
    Refresh,
    Go(String),
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0} (try 'help')")]
    Unknown(String),

    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("Invalid {what}: {value}")]
    InvalidArgument { what: &'static str, value: String },
}

pub const HELP: &str = "\
Commands:
  posts                              list all posts
  users                              list users
  user <id>                          posts by one user
  post <title> | <content>           create a post as the first user
  post-as <user-id> <title> | <content>
  edit <id> <title> [| <content>]    edit a post
  react <id> <slot>                  react with slot 0-3 (4 is disabled)
  notifications                      show notifications
  refresh                            refresh notifications
  go <path>                          navigate, e.g. go /users/1
  help                               this text
  quit";

impl Command {
    /// Parse a line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_lowercase().as_str() {
            "posts" | "ls" => Command::Posts,
            "users" => Command::Users,
            "user" => Command::User(parse_id(first_word(rest, "user id")?, "user id")?),
            "post" => {
                let (title, content) = split_body(rest);
                Command::Post {
                    author: None,
                    title,
                    content: content.unwrap_or_default(),
                }
            }
            "post-as" => {
                let (author, rest) = split_word(rest, "user id")?;
                let (title, content) = split_body(rest);
                Command::Post {
                    author: Some(parse_id(author, "user id")?),
                    title,
                    content: content.unwrap_or_default(),
                }
            }
            "edit" => {
                let (id, rest) = split_word(rest, "post id")?;
                let (title, content) = split_body(rest);
                Command::Edit {
                    id: parse_id(id, "post id")?,
                    title,
                    content,
                }
            }
            "react" => {
                let (id, rest) = split_word(rest, "post id")?;
                let slot = first_word(rest, "slot")?;
                Command::React {
                    id: parse_id(id, "post id")?,
                    slot: parse_slot(slot)?,
                }
            }
            "notifications" => Command::Notifications,
            "refresh" => Command::Refresh,
            "go" => Command::Go(first_word(rest, "path")?.to_string()),
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }
}

fn first_word<'a>(s: &'a str, what: &'static str) -> Result<&'a str, CommandError> {
    s.split_whitespace()
        .next()
        .ok_or(CommandError::MissingArgument(what))
}

fn split_word<'a>(s: &'a str, what: &'static str) -> Result<(&'a str, &'a str), CommandError> {
    let word = first_word(s, what)?;
    Ok((word, s[word.len()..].trim()))
}

/// Split `<title> | <content>`. The title keeps its raw form so the store
/// decides whether it is blank.
fn split_body(s: &str) -> (String, Option<String>) {
    match s.split_once('|') {
        Some((title, content)) => (title.trim().to_string(), Some(content.trim().to_string())),
        None => (s.trim().to_string(), None),
    }
}

fn parse_id<T: std::str::FromStr>(s: &str, what: &'static str) -> Result<T, CommandError> {
    s.parse().map_err(|_| CommandError::InvalidArgument {
        what,
        value: s.to_string(),
    })
}

/// Numeric slots pass through untouched so the store can reject ones out of
/// range; names map to their index.
fn parse_slot(s: &str) -> Result<usize, CommandError> {
    s.parse::<usize>()
        .ok()
        .or_else(|| ReactionSlot::parse(s).map(|slot| slot.index()))
        .ok_or_else(|| CommandError::InvalidArgument {
            what: "slot",
            value: s.to_string(),
        })
}
