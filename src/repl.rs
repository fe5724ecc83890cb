use anyhow::{Context, Result};
use std::io::{self, Write};

use crate::command::Dispatcher;
use crate::http::HttpIssuer;
use crate::summarize::Summarizer;

pub async fn run_repl<H, S>(dispatcher: &Dispatcher<H, S>) -> Result<()>
where
    H: HttpIssuer,
    S: Summarizer,
{
    let commands: Vec<&str> = dispatcher.registry().names().collect();
    println!("curlbot");
    println!("commands: /{}", commands.join(", /"));
    println!("type a command line, or 'exit' to quit");

    loop {
        print!("> ");
        io::stdout().flush().context("Failed to flush stdout")?;

        let mut input = String::new();
        let read = io::stdin()
            .read_line(&mut input)
            .context("Failed to read stdin")?;
        if read == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        match dispatcher.dispatch(line).await {
            Ok(reply) => println!("{}\n", reply),
            Err(err) => println!("error: {}\n", err),
        }
    }

    Ok(())
}
