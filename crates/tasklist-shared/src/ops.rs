use tracing::{
  debug,
  info
};

use crate::error::TaskError;
use crate::storage::{
  KeyValueStore,
  load_tasks,
  save_tasks
};
use crate::task::{
  Task,
  TaskDraft,
  TaskId,
  non_blank
};

/// Replacement values submitted from the
/// edit dialog.
#[derive(
  Debug, Clone, Default, PartialEq,
)]
pub struct TaskFields {
  pub text: String,
  pub list: String,
  pub date: Option<String>,
  pub time: Option<String>
}

/// Picks an id from the creation
/// timestamp, bumped past the largest
/// stored id so ids never collide.
pub fn next_task_id(
  tasks: &[Task],
  now_ms: i64
) -> TaskId {
  match tasks.iter().map(|t| t.id).max() {
    | Some(max) if max >= now_ms => {
      max.saturating_add(1)
    }
    | _ => now_ms
  }
}

/// Appends a task built from `draft`.
/// Blank text is rejected with no
/// effect and yields `None`; a blank list
/// name is an error.
#[tracing::instrument(skip(store, draft), fields(list = %draft.list))]
pub fn add_task<S>(
  store: &mut S,
  draft: TaskDraft,
  now_ms: i64
) -> Result<Option<Task>, TaskError>
where
  S: KeyValueStore + ?Sized
{
  if draft.text.trim().is_empty() {
    debug!("ignoring add with blank text");
    return Ok(None);
  }
  check_list(&draft.list)?;

  let mut tasks = load_tasks(store);
  let id = next_task_id(&tasks, now_ms);
  let task = Task::from_draft(id, draft);
  tasks.push(task.clone());
  save_tasks(store, &tasks)?;

  info!(id, count = tasks.len(), "task added");
  Ok(Some(task))
}

#[tracing::instrument(skip(store))]
pub fn toggle_complete<S>(
  store: &mut S,
  id: TaskId
) -> Result<Task, TaskError>
where
  S: KeyValueStore + ?Sized
{
  let mut tasks = load_tasks(store);
  let task = find_mut(&mut tasks, id)?;
  task.completed = !task.completed;
  let updated = task.clone();
  save_tasks(store, &tasks)?;

  info!(
    id,
    completed = updated.completed,
    "task toggled"
  );
  Ok(updated)
}

#[tracing::instrument(skip(store))]
pub fn delete_task<S>(
  store: &mut S,
  id: TaskId
) -> Result<Task, TaskError>
where
  S: KeyValueStore + ?Sized
{
  let mut tasks = load_tasks(store);
  let idx = tasks
    .iter()
    .position(|t| t.id == id)
    .ok_or(TaskError::NotFound(id))?;
  let removed = tasks.remove(idx);
  save_tasks(store, &tasks)?;

  info!(
    id,
    remaining = tasks.len(),
    "task deleted"
  );
  Ok(removed)
}

/// Overwrites text, list, date, and time
/// in place. Completion is left alone.
#[tracing::instrument(skip(store, fields))]
pub fn edit_task<S>(
  store: &mut S,
  id: TaskId,
  fields: TaskFields
) -> Result<Task, TaskError>
where
  S: KeyValueStore + ?Sized
{
  let mut tasks = load_tasks(store);
  let task = find_mut(&mut tasks, id)?;
  check_list(&fields.list)?;
  task.text = fields.text.trim().to_string();
  task.list = fields.list;
  task.date = non_blank(fields.date);
  task.time = non_blank(fields.time);
  let updated = task.clone();
  save_tasks(store, &tasks)?;

  info!(id, "task edited");
  Ok(updated)
}

pub fn find_task<S>(
  store: &S,
  id: TaskId
) -> Result<Task, TaskError>
where
  S: KeyValueStore + ?Sized
{
  load_tasks(store)
    .into_iter()
    .find(|t| t.id == id)
    .ok_or(TaskError::NotFound(id))
}

fn check_list(
  list: &str
) -> Result<(), TaskError> {
  if list.trim().is_empty() {
    return Err(TaskError::BlankList);
  }
  Ok(())
}

fn find_mut(
  tasks: &mut [Task],
  id: TaskId
) -> Result<&mut Task, TaskError> {
  tasks
    .iter_mut()
    .find(|t| t.id == id)
    .ok_or(TaskError::NotFound(id))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::storage::{
    MemoryStore,
    STORAGE_KEY
  };

  fn draft(text: &str) -> TaskDraft {
    TaskDraft {
      text: text.to_string(),
      list: "General".to_string(),
      date: None,
      time: None
    }
  }

  #[test]
  fn blank_text_is_rejected() {
    let mut store = MemoryStore::new();
    add_task(&mut store, draft("keep"), 1)
      .expect("add");
    let before = store
      .get_item(STORAGE_KEY)
      .expect("get");

    for text in ["", "   "] {
      let added =
        add_task(&mut store, draft(text), 2)
          .expect("add blank");
      assert!(added.is_none());
    }
    assert_eq!(
      store.get_item(STORAGE_KEY).expect("get"),
      before
    );
  }

  #[test]
  fn blank_list_is_an_error() {
    let mut store = MemoryStore::new();
    let task = add_task(&mut store, draft("x"), 10)
      .expect("add")
      .expect("task");

    let mut unlisted = draft("y");
    unlisted.list = " ".to_string();
    assert!(matches!(
      add_task(&mut store, unlisted, 11),
      Err(TaskError::BlankList)
    ));
    assert!(matches!(
      edit_task(&mut store, task.id, TaskFields {
        text: "x".to_string(),
        ..TaskFields::default()
      }),
      Err(TaskError::BlankList)
    ));
    assert_eq!(load_tasks(&store), vec![task]);
  }

  #[test]
  fn add_appends_with_clock_id() {
    let mut store = MemoryStore::new();
    let task = add_task(
      &mut store,
      draft(" Buy milk "),
      1_700_000_000_000
    )
    .expect("add")
    .expect("task created");

    assert_eq!(task.id, 1_700_000_000_000);
    assert_eq!(task.text, "Buy milk");
    assert!(!task.completed);
    assert_eq!(load_tasks(&store), vec![task]);
  }

  #[test]
  fn same_millisecond_adds_get_distinct_ids()
   {
    let mut store = MemoryStore::new();
    let a = add_task(&mut store, draft("a"), 500)
      .expect("add")
      .expect("task");
    let b = add_task(&mut store, draft("b"), 500)
      .expect("add")
      .expect("task");
    let c = add_task(&mut store, draft("c"), 200)
      .expect("add")
      .expect("task");
    assert_eq!((a.id, b.id, c.id), (500, 501, 502));
  }

  #[test]
  fn toggle_flips_and_persists() {
    let mut store = MemoryStore::new();
    let task = add_task(&mut store, draft("x"), 10)
      .expect("add")
      .expect("task");

    let toggled =
      toggle_complete(&mut store, task.id)
        .expect("toggle");
    assert!(toggled.completed);
    assert!(load_tasks(&store)[0].completed);

    let back =
      toggle_complete(&mut store, task.id)
        .expect("toggle back");
    assert!(!back.completed);
  }

  #[test]
  fn edit_keeps_completion() {
    let mut store = MemoryStore::new();
    let task = add_task(&mut store, draft("x"), 10)
      .expect("add")
      .expect("task");
    toggle_complete(&mut store, task.id)
      .expect("toggle");

    let edited = edit_task(
      &mut store,
      task.id,
      TaskFields {
        text: "  renamed ".to_string(),
        list: "Work".to_string(),
        date: Some("2025-05-05".to_string()),
        time: Some(String::new())
      }
    )
    .expect("edit");

    assert_eq!(edited.text, "renamed");
    assert_eq!(edited.list, "Work");
    assert_eq!(edited.date.as_deref(), Some("2025-05-05"));
    assert_eq!(edited.time, None);
    assert!(edited.completed);
    assert_eq!(load_tasks(&store), vec![edited]);
  }

  #[test]
  fn delete_only_task_empties_collection() {
    let mut store = MemoryStore::new();
    let task = add_task(&mut store, draft("x"), 10)
      .expect("add")
      .expect("task");
    delete_task(&mut store, task.id)
      .expect("delete");
    assert!(load_tasks(&store).is_empty());
    assert_eq!(
      store.get_item(STORAGE_KEY).expect("get").as_deref(),
      Some("[]")
    );
  }

  #[test]
  fn unknown_ids_are_reported() {
    let mut store = MemoryStore::new();
    add_task(&mut store, draft("x"), 10)
      .expect("add");
    let before = load_tasks(&store);

    assert!(matches!(
      toggle_complete(&mut store, 99),
      Err(TaskError::NotFound(99))
    ));
    assert!(matches!(
      delete_task(&mut store, 99),
      Err(TaskError::NotFound(99))
    ));
    assert!(matches!(
      edit_task(&mut store, 99, TaskFields::default()),
      Err(TaskError::NotFound(99))
    ));
    assert!(matches!(
      find_task(&store, 99),
      Err(TaskError::NotFound(99))
    ));
    assert_eq!(load_tasks(&store), before);
  }
}
