//! Interactive mode command
//!
//! A line-oriented shell over the router: typing a path navigates to it,
//! a handful of words control history and listing.

use crate::output::{format_error, format_outcome, format_routes};
use anyhow::Result;
use colored::*;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use viewroute_core::RouterHandle;

const HELP: &str = "\
Commands:
  <path>     navigate to a path, e.g. /tutorial?step=2
  back       go back one page
  forward    go forward one page
  where      show the current location
  routes     list the route table
  help       show this help
  quit       leave the shell";

/// A parsed line of shell input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Navigate(String),
    Back,
    Forward,
    Where,
    Routes,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl ShellCommand {
    /// Parse one line of input
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line {
            "" => ShellCommand::Empty,
            "back" | "b" => ShellCommand::Back,
            "forward" | "f" => ShellCommand::Forward,
            "where" | "w" => ShellCommand::Where,
            "routes" | "r" => ShellCommand::Routes,
            "help" | "h" | "?" => ShellCommand::Help,
            "quit" | "exit" | "q" => ShellCommand::Quit,
            _ if line.starts_with('/') => ShellCommand::Navigate(line.to_string()),
            _ => ShellCommand::Unknown(line.to_string()),
        }
    }
}

/// Start interactive mode
pub async fn interactive_command(router: RouterHandle) -> Result<()> {
    info!("Starting interactive shell");

    // Land on the application root, as a browser opening the base URL would
    let entry = router.options().base.href("/");
    match router.start(&entry).await {
        Ok(outcome) => println!("{}", format_outcome(&entry, &outcome)),
        Err(err) => eprintln!("{}", format_error(&entry, &err)),
    }
    println!("\n{}", "Type a path to navigate, `help` for commands.".dimmed());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", "viewroute>".cyan().bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        let command = ShellCommand::parse(&line);
        debug!(?command, "shell input");

        match command {
            ShellCommand::Empty => continue,
            ShellCommand::Quit => break,
            ShellCommand::Help => println!("{}", HELP),
            ShellCommand::Routes => println!("{}", format_routes(&router)),
            ShellCommand::Where => match router.current() {
                Some(location) => println!("{} [{}]", location.href, location.name),
                None => println!("{}", "nowhere yet".dimmed()),
            },
            ShellCommand::Navigate(target) => match router.push(&target).await {
                Ok(outcome) => println!("{}", format_outcome(&target, &outcome)),
                Err(err) => eprintln!("{}", format_error(&target, &err)),
            },
            ShellCommand::Back => match router.back().await {
                Ok(Some(outcome)) => println!("{}", format_outcome("back", &outcome)),
                Ok(None) => println!("{}", "no previous page".dimmed()),
                Err(err) => eprintln!("{}", format_error("back", &err)),
            },
            ShellCommand::Forward => match router.forward().await {
                Ok(Some(outcome)) => println!("{}", format_outcome("forward", &outcome)),
                Ok(None) => println!("{}", "no next page".dimmed()),
                Err(err) => eprintln!("{}", format_error("forward", &err)),
            },
            ShellCommand::Unknown(input) => {
                println!("unknown command '{}', paths start with '/'", input)
            }
        }
    }

    Ok(())
}
