use anyhow::{Context, Result, anyhow};
use clap::{Arg, ArgAction, Command};

use curlbot::{build_dispatcher, command::CommandRegistry, config::Config, logging, repl::run_repl};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RequestPart {
    Method,
    Header,
    Cookie,
    Data,
    Url,
}

fn cli() -> Command {
    Command::new("curlbot")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A chat-bot command that issues curl-style HTTP requests")
        .subcommand(
            Command::new("parse")
                .about("Parses a command line such as '/get https://example.com'")
                .arg(
                    Arg::new("line")
                        .help("The command line, including the command name")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("part")
                        .short('p')
                        .long("part")
                        .value_name("PART")
                        .help("Prints only one part of the request (method, header, cookie, data, url)")
                        .required(false)
                        .value_parser(clap::value_parser!(RequestPart)),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Prints the parsed request as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("run")
                .about("Issues the request for a command line and prints the reply")
                .arg(
                    Arg::new("line")
                        .help("The command line, including the command name")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(Command::new("repl").about("Reads command lines from stdin"))
}

fn print_parsed(line: &str, part: Option<&RequestPart>, json: bool) -> Result<()> {
    let descriptor = CommandRegistry::default().parse_line(line)?;

    match part {
        Some(RequestPart::Method) => println!("{}", descriptor.method),
        Some(RequestPart::Header) => {
            for header in &descriptor.headers {
                println!("{}: {}", header.name, header.value);
            }
        }
        Some(RequestPart::Cookie) => {
            if let Some(cookies) = &descriptor.cookies {
                println!("{}", cookies);
            }
        }
        Some(RequestPart::Data) => {
            if let Some(body) = &descriptor.body {
                println!("{}", body);
            }
        }
        Some(RequestPart::Url) => println!("{}", descriptor.url),
        None if json => println!(
            "{}",
            serde_json::to_string_pretty(&descriptor).context("Failed to encode request")?
        ),
        None => println!("{:#?}", descriptor),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let matches = cli().get_matches();
    match matches.subcommand() {
        Some(("parse", sub_matches)) => {
            let line = sub_matches
                .get_one::<String>("line")
                .ok_or_else(|| anyhow!("missing command line"))?;
            let part = sub_matches.get_one::<RequestPart>("part");
            print_parsed(line, part, sub_matches.get_flag("json"))
        }
        Some(("run", sub_matches)) => {
            let line = sub_matches
                .get_one::<String>("line")
                .ok_or_else(|| anyhow!("missing command line"))?;
            let dispatcher = build_dispatcher(&Config::from_env())?;
            let reply = dispatcher.dispatch(line).await?;
            println!("{}", reply);
            Ok(())
        }
        _ => {
            let dispatcher = build_dispatcher(&Config::from_env())?;
            run_repl(&dispatcher).await
        }
    }
}
