use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Args, Parser, Subcommand};
use tasklist_shared::TaskId;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct KeyVal {
    pub key: String,
    pub value: String,
}

impl std::str::FromStr for KeyVal {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (k, v) = s
            .split_once('=')
            .ok_or_else(|| anyhow!("expected KEY=VALUE, got: {s}"))?;
        Ok(Self {
            key: k.trim().to_string(),
            value: v.trim().to_string(),
        })
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "tasklist",
    version,
    about = "A small local task list",
    disable_help_subcommand = true
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[arg(
        long = "rc",
        value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<KeyVal>()),
        action = ArgAction::Append,
        global = true
    )]
    pub rc_overrides: Vec<KeyVal>,

    #[arg(long = "rcfile", global = true)]
    pub rcfile: Option<PathBuf>,

    #[arg(long = "data", global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a task
    Add(AddArgs),
    /// Show tasks, optionally only one list
    #[command(visible_alias = "ls")]
    List {
        #[arg(short = 'l', long = "list")]
        list: Option<String>,
    },
    /// Toggle a task between complete and incomplete
    Done { id: TaskId },
    /// Change a task's text, list, date, or time
    Edit(EditArgs),
    /// Remove a task
    #[command(visible_alias = "rm")]
    Delete { id: TaskId },
    /// Show the lists offered by the list filter
    Lists,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct AddArgs {
    #[arg(required = true, trailing_var_arg = true, num_args = 1..)]
    pub text: Vec<String>,

    #[arg(short = 'l', long = "list")]
    pub list: Option<String>,

    #[arg(short = 'd', long = "date")]
    pub date: Option<String>,

    #[arg(short = 't', long = "time")]
    pub time: Option<String>,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct EditArgs {
    pub id: TaskId,

    #[arg(long = "text")]
    pub text: Option<String>,

    #[arg(short = 'l', long = "list")]
    pub list: Option<String>,

    #[arg(short = 'd', long = "date", conflicts_with = "no_date")]
    pub date: Option<String>,

    #[arg(long = "no-date")]
    pub no_date: bool,

    #[arg(short = 't', long = "time", conflicts_with = "no_time")]
    pub time: Option<String>,

    #[arg(long = "no-time")]
    pub no_time: bool,
}

impl GlobalCli {
    /// Subcommand to run; bare `tasklist` lists everything.
    pub fn command_or_default(&self) -> Command {
        self.command.clone().unwrap_or_else(|| {
            debug!("no explicit command, using list");
            Command::List { list: None }
        })
    }
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Command, GlobalCli};

    fn parse(args: &[&str]) -> GlobalCli {
        GlobalCli::try_parse_from(args).expect("parse args")
    }

    #[test]
    fn bare_invocation_lists() {
        let cli = parse(&["tasklist"]);
        assert_eq!(cli.command_or_default(), Command::List { list: None });
    }

    #[test]
    fn add_joins_words_and_takes_flags() {
        let cli = parse(&[
            "tasklist", "add", "-l", "Work", "--date", "tomorrow", "Email", "the", "team",
        ]);
        let Some(Command::Add(args)) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.text, vec!["Email", "the", "team"]);
        assert_eq!(args.list.as_deref(), Some("Work"));
        assert_eq!(args.date.as_deref(), Some("tomorrow"));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["tasklist", "done", "42", "-vv", "--rc", "color=off"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.rc_overrides[0].key, "color");
        assert_eq!(cli.command, Some(Command::Done { id: 42 }));
    }

    #[test]
    fn edit_date_flags_conflict() {
        assert!(
            GlobalCli::try_parse_from(["tasklist", "edit", "1", "--date", "today", "--no-date"])
                .is_err()
        );
    }
}
