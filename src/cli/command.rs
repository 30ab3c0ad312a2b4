use std::fmt;

pub const HELP_TEXT: &str = "usage: <method> [-<args> <value>]

These are methods' examples:
get -k 16         Get the value stored under key=16.
del -k 32         Delete the entry with key=32.
put -k 64 -v 8    Put value=8 under key=64.
exit              Leave the shell (also `quit`).
";

/// One line typed at the client shell.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum KvCommand {
    Help,
    Get { key: String },
    Del { key: String },
    Put { key: String, value: String },
    Exit,
}

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum UsageError {
    #[error("Incorrect parameters for `{0}`. See 'help'.")]
    IncorrectParameters(&'static str),
    #[error("{0} is not a command. See 'help'.")]
    UnknownCommand(String),
    #[error("empty line")]
    Empty,
}

/// Parses a whitespace separated line. Arguments are positional: `-k` must come first and
/// `-v` second, with nothing extra.
pub fn parse_command(line: &str) -> Result<KvCommand, UsageError> {
    let args: Vec<&str> = line.split_whitespace().collect();
    let method = match args.first() {
        Some(method) => *method,
        None => return Err(UsageError::Empty),
    };

    match method {
        "help" => Ok(KvCommand::Help),
        "exit" | "quit" => Ok(KvCommand::Exit),
        "get" => match args.as_slice() {
            [_, "-k", key] => Ok(KvCommand::Get { key: key.to_string() }),
            _ => Err(UsageError::IncorrectParameters("get")),
        },
        "del" => match args.as_slice() {
            [_, "-k", key] => Ok(KvCommand::Del { key: key.to_string() }),
            _ => Err(UsageError::IncorrectParameters("del")),
        },
        "put" => match args.as_slice() {
            [_, "-k", key, "-v", value] => Ok(KvCommand::Put {
                key: key.to_string(),
                value: value.to_string(),
            }),
            _ => Err(UsageError::IncorrectParameters("put")),
        },
        other => Err(UsageError::UnknownCommand(other.to_string())),
    }
}

impl fmt::Display for KvCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KvCommand::Help => write!(f, "help"),
            KvCommand::Get { key } => write!(f, "get -k {}", key),
            KvCommand::Del { key } => write!(f, "del -k {}", key),
            KvCommand::Put { key, value } => write!(f, "put -k {} -v {}", key, value),
            KvCommand::Exit => write!(f, "exit"),
        }
    }
}
