use anyhow::{Context, anyhow};
use chrono::{Local, NaiveDate, Utc};
use tasklist_shared::{FilterSelection, KeyValueStore, TaskBoard};
use tracing::{debug, info, instrument, warn};

use crate::cli::{AddArgs, Command, EditArgs};
use crate::config::Config;
use crate::datetime::{normalize_date_arg, normalize_time_arg};
use crate::render::Renderer;

/// Clock readings a command runs against.
#[derive(Debug, Clone, Copy)]
pub struct Now {
    pub today: NaiveDate,
    pub epoch_ms: i64,
}

impl Now {
    pub fn current() -> Self {
        Self {
            today: Local::now().date_naive(),
            epoch_ms: Utc::now().timestamp_millis(),
        }
    }
}

#[instrument(skip(store, cfg, renderer, command, now))]
pub fn dispatch<S>(
    store: S,
    cfg: &Config,
    renderer: &mut Renderer,
    command: Command,
    now: Now,
) -> anyhow::Result<()>
where
    S: KeyValueStore,
{
    debug!(?command, "dispatching command");

    match command {
        Command::Add(args) => cmd_add(store, cfg, renderer, args, now),
        Command::List { list } => cmd_list(store, renderer, list.as_deref()),
        Command::Done { id } => {
            info!(id, "command done");
            let mut board = TaskBoard::new(store);
            let task = board.toggle(id)?;
            let verb = if task.completed {
                "Completed"
            } else {
                "Reopened"
            };
            println!("{verb} task {} '{}'.", task.id, task.text);
            renderer.print_view(board.view())
        }
        Command::Edit(args) => cmd_edit(store, renderer, args, now),
        Command::Delete { id } => {
            info!(id, "command delete");
            let mut board = TaskBoard::new(store);
            let task = board.delete(id)?;
            println!("Deleted task {} '{}'.", task.id, task.text);
            renderer.print_view(board.view())
        }
        Command::Lists => {
            let board = TaskBoard::new(store);
            renderer.print_lists(board.view())
        }
    }
}

#[instrument(skip(store, renderer))]
fn cmd_list<S>(store: S, renderer: &mut Renderer, list: Option<&str>) -> anyhow::Result<()>
where
    S: KeyValueStore,
{
    let requested = list.map(FilterSelection::from_value).unwrap_or_default();
    let board = TaskBoard::with_selection(store, requested);

    if !board.view().offered {
        warn!(requested = %board.selection(), "unknown list requested");
        println!("No list named '{}'.", board.selection());
    }

    renderer.print_view(board.view())
}

#[instrument(skip(store, cfg, renderer, args, now))]
fn cmd_add<S>(
    store: S,
    cfg: &Config,
    renderer: &mut Renderer,
    args: AddArgs,
    now: Now,
) -> anyhow::Result<()>
where
    S: KeyValueStore,
{
    info!("command add");

    let date = args
        .date
        .as_deref()
        .map(|raw| normalize_date_arg(raw, now.today))
        .transpose()
        .context("invalid --date")?;
    let time = args
        .time
        .as_deref()
        .map(normalize_time_arg)
        .transpose()
        .context("invalid --time")?;
    if time.is_some() && date.is_none() {
        warn!("time given without a date; it will not be shown");
    }

    let mut board = TaskBoard::new(store);
    let input = board.input_mut();
    input.text = args.text.join(" ");
    input.list = args.list.unwrap_or_else(|| cfg.default_list.clone());
    input.date = date;
    input.time = time;

    match board.add(now.epoch_ms)? {
        Some(task) => {
            debug!(total = board.view().total, "task added");
            println!("Created task {}.", task.id);
            renderer.print_view(board.view())
        }
        None => {
            println!("Nothing added: task text is empty.");
            Ok(())
        }
    }
}

#[instrument(skip(store, renderer, args, now), fields(id = args.id))]
fn cmd_edit<S>(store: S, renderer: &mut Renderer, args: EditArgs, now: Now) -> anyhow::Result<()>
where
    S: KeyValueStore,
{
    info!("command edit");

    let date = match (&args.date, args.no_date) {
        (_, true) => Some(String::new()),
        (Some(raw), false) => Some(normalize_date_arg(raw, now.today).context("invalid --date")?),
        (None, false) => None,
    };
    let time = match (&args.time, args.no_time) {
        (_, true) => Some(String::new()),
        (Some(raw), false) => Some(normalize_time_arg(raw).context("invalid --time")?),
        (None, false) => None,
    };

    let mut board = TaskBoard::new(store);
    board.open_edit(args.id)?;

    let form = board
        .dialog_mut()
        .form_mut()
        .ok_or_else(|| anyhow!("edit dialog did not open for task {}", args.id))?;
    if let Some(text) = args.text {
        form.text = text;
    }
    if let Some(list) = args.list {
        form.list = list;
    }
    if let Some(date) = date {
        form.date = date;
    }
    if let Some(time) = time {
        form.time = time;
    }

    let task = board
        .submit_edit()?
        .ok_or_else(|| anyhow!("edit dialog closed before saving task {}", args.id))?;
    println!("Modified task {}.", task.id);
    renderer.print_view(board.view())
}
