//! The interactive client shell: command grammar and execution against a master.
mod command;
mod session;

pub use command::parse_command;
pub use command::KvCommand;
pub use command::UsageError;
pub use command::HELP_TEXT;
pub use session::describe_success;
pub use session::execute;
pub use session::wants_retry;
pub use session::Outcome;
pub use session::RETRY_PROMPT;
