use clap::Parser;
use replicated_kv::{execute, parse_command, wants_retry, KvClient, KvCommand, Outcome, UsageError, RETRY_PROMPT};
use std::error::Error;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

const PROMPT: &str = "kv> ";

/// Interactive shell for the replicated key-value store.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Master address, `host:port`.
    #[arg(long, default_value = "localhost:50051")]
    target: String,

    /// Run this one command and exit, e.g. `put -k 64 -v 8`.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let client = KvClient::connect(&args.target).await?;

    if !args.command.is_empty() {
        return run_once(&client, &args.command.join(" ")).await;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{}", PROMPT);
        std::io::stdout().flush()?;

        let line = match lines.next_line().await? {
            Some(line) => line,
            None => return Ok(()),
        };
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(UsageError::Empty) => continue,
            Err(e) => {
                println!("kv: {}", e);
                continue;
            }
        };

        if !run_with_retry_prompt(&client, &command, &mut lines).await? {
            return Ok(());
        }
    }
}

async fn run_once(client: &KvClient, line: &str) -> Result<(), Box<dyn Error>> {
    let command = parse_command(line)?;
    match execute(client, &command).await? {
        Outcome::Print(message) => println!("kv: {}", message),
        Outcome::Exit => {}
    }
    Ok(())
}

/// Returns false once the user asked to leave.
async fn run_with_retry_prompt(
    client: &KvClient,
    command: &KvCommand,
    lines: &mut Lines<BufReader<Stdin>>,
) -> Result<bool, Box<dyn Error>> {
    loop {
        match execute(client, command).await {
            Ok(Outcome::Print(message)) => {
                println!("kv: {}", message);
                return Ok(true);
            }
            Ok(Outcome::Exit) => return Ok(false),
            Err(e) => {
                println!("kv: {}", e);
                println!("kv: {}", RETRY_PROMPT);
                let answer = lines.next_line().await?.unwrap_or_default();
                if !wants_retry(&answer) {
                    return Ok(true);
                }
            }
        }
    }
}
