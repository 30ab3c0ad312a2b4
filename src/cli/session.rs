use crate::api::{KvClient, KvClientError};
use crate::cli::command::{KvCommand, HELP_TEXT};
use crate::shared::KvOutput;

/// What the shell should print after running a command, or that it should stop.
#[derive(Debug, Eq, PartialEq)]
pub enum Outcome {
    Print(String),
    Exit,
}

/// Runs one command against the master. Help and Exit never touch the network.
pub async fn execute(client: &KvClient, command: &KvCommand) -> Result<Outcome, KvClientError> {
    let output = match command {
        KvCommand::Help => return Ok(Outcome::Print(HELP_TEXT.to_string())),
        KvCommand::Exit => return Ok(Outcome::Exit),
        KvCommand::Get { key } => client.get(key).await?,
        KvCommand::Del { key } => client.del(key).await?,
        KvCommand::Put { key, value } => client.put(key, value).await?,
    };

    Ok(Outcome::Print(describe_success(command, &output)))
}

pub fn describe_success(command: &KvCommand, output: &KvOutput) -> String {
    match command {
        KvCommand::Get { .. } if !output.found => format!("No value stored with key: `{}`", output.key),
        KvCommand::Get { .. } => format!("Successfully get value: `{}` with key: `{}`", output.value, output.key),
        KvCommand::Del { .. } if !output.found => format!("Nothing to delete with key: `{}`", output.key),
        KvCommand::Del { .. } => format!("Successfully delete key-value: `{}`-`{}`", output.key, output.value),
        KvCommand::Put { .. } => format!("Successfully put value: `{}` with key: `{}`", output.value, output.key),
        KvCommand::Help | KvCommand::Exit => String::new(),
    }
}

pub const RETRY_PROMPT: &str = "RPC failed, would you like to retry? [y/n]";

/// Anything starting with `y` means yes.
pub fn wants_retry(answer: &str) -> bool {
    answer.trim_start().starts_with('y')
}
