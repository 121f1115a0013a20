use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;

use crate::format::{
  format_date_time,
  parse_stored_date
};
use crate::storage::{
  KeyValueStore,
  load_tasks
};
use crate::task::{
  SUGGESTED_LISTS,
  Task,
  TaskId
};

pub const ALL_LISTS_VALUE: &str = "All";

pub const ALL_LISTS_LABEL: &str =
  "All Lists";

pub const EMPTY_PLACEHOLDER: &str =
  "No tasks found.";

#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Eq,
  Hash,
)]
pub enum FilterSelection {
  #[default]
  All,
  List(String)
}

impl FilterSelection {
  /// Maps a select control value back to
  /// a selection. List names compare
  /// exactly, surrounding spaces included.
  pub fn from_value(value: &str) -> Self {
    match value {
      | ALL_LISTS_VALUE => Self::All,
      | list => {
        Self::List(list.to_string())
      }
    }
  }

  pub fn value(&self) -> &str {
    match self {
      | Self::All => ALL_LISTS_VALUE,
      | Self::List(list) => list
    }
  }

  pub fn matches(
    &self,
    task: &Task
  ) -> bool {
    match self {
      | Self::All => true,
      | Self::List(list) => {
        task.list == *list
      }
    }
  }
}

impl fmt::Display for FilterSelection {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.value())
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct FilterOption {
  pub value: String,
  pub label: String
}

/// One rendered task line.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct TaskRow {
  pub id:           TaskId,
  pub text:         String,
  pub list:         String,
  pub due_label:    String,
  pub completed:    bool,
  pub toggle_label: &'static str
}

impl TaskRow {
  fn from_task(task: &Task) -> Self {
    Self {
      id:           task.id,
      text:         task.text.clone(),
      list:         task.list.clone(),
      due_label:    format_date_time(
        task.date.as_deref(),
        task.time.as_deref()
      ),
      completed:    task.completed,
      toggle_label: if task.completed {
        "↩️"
      } else {
        "✓"
      }
    }
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct TaskView {
  pub rows:           Vec<TaskRow>,
  pub filter_options: Vec<FilterOption>,
  pub selection:      FilterSelection,
  /// Whether `selection` is among
  /// `filter_options`.
  pub offered:        bool,
  pub total:          usize
}

impl TaskView {
  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }
}

/// Builds the visible rows and filter
/// options from the full collection.
///
/// Rows always follow `selection`, so a
/// list with no tasks renders nothing.
/// `offered` tells whether the selection
/// still has an option to show it under.
pub fn build_view(
  tasks: &[Task],
  selection: &FilterSelection
) -> TaskView {
  let lists = list_names(tasks);
  let offered = match selection {
    | FilterSelection::All => true,
    | FilterSelection::List(list) => {
      lists.contains(list)
    }
  };
  if !offered {
    tracing::debug!(
      selection = %selection,
      "selected list is not offered"
    );
  }

  let mut visible: Vec<&Task> = tasks
    .iter()
    .filter(|task| {
      selection.matches(task)
    })
    .collect();
  visible.sort_by(|a, b| {
    compare_tasks(a, b)
  });

  let mut filter_options =
    Vec::with_capacity(lists.len() + 1);
  filter_options.push(FilterOption {
    value: ALL_LISTS_VALUE.to_string(),
    label: ALL_LISTS_LABEL.to_string()
  });
  filter_options.extend(
    lists.into_iter().map(|list| {
      FilterOption {
        value: list.clone(),
        label: list
      }
    })
  );

  TaskView {
    rows: visible
      .into_iter()
      .map(TaskRow::from_task)
      .collect(),
    filter_options,
    selection: selection.clone(),
    offered,
    total: tasks.len()
  }
}

/// Loads the collection and builds the
/// view from it.
#[tracing::instrument(skip(store))]
pub fn render_tasks<S>(
  store: &S,
  selection: &FilterSelection
) -> TaskView
where
  S: KeyValueStore + ?Sized
{
  let tasks = load_tasks(store);
  build_view(&tasks, selection)
}

/// Suggested list names followed by any
/// other list in use, in first-seen
/// order.
pub fn list_names(
  tasks: &[Task]
) -> Vec<String> {
  let mut names: Vec<String> =
    SUGGESTED_LISTS
      .iter()
      .map(|name| name.to_string())
      .collect();
  for task in tasks {
    if !names.contains(&task.list) {
      names.push(task.list.clone());
    }
  }
  names
}

/// Incomplete first, then earliest due
/// date (undated last), then newest.
pub fn compare_tasks(
  a: &Task,
  b: &Task
) -> Ordering {
  a.completed
    .cmp(&b.completed)
    .then_with(|| {
      sort_date(a).cmp(&sort_date(b))
    })
    .then_with(|| b.id.cmp(&a.id))
}

fn sort_date(task: &Task) -> NaiveDate {
  task
    .date
    .as_deref()
    .and_then(parse_stored_date)
    .unwrap_or(NaiveDate::MAX)
}
