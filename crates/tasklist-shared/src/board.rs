use tracing::debug;

use crate::dialog::EditDialog;
use crate::error::TaskError;
use crate::ops::{
  add_task,
  delete_task,
  edit_task,
  find_task,
  toggle_complete
};
use crate::storage::KeyValueStore;
use crate::task::{
  DEFAULT_LIST,
  Task,
  TaskDraft,
  TaskId
};
use crate::view::{
  FilterSelection,
  TaskView,
  render_tasks
};

/// Event-level controller: every action
/// runs against storage, then the view is
/// rebuilt from storage.
#[derive(Debug)]
pub struct TaskBoard<S> {
  store:     S,
  selection: FilterSelection,
  dialog:    EditDialog,
  input:     TaskDraft,
  view:      TaskView
}

impl<S> TaskBoard<S>
where
  S: KeyValueStore
{
  pub fn new(store: S) -> Self {
    Self::with_selection(
      store,
      FilterSelection::All
    )
  }

  pub fn with_selection(
    store: S,
    selection: FilterSelection
  ) -> Self {
    let view =
      render_tasks(&store, &selection);
    Self {
      store,
      selection,
      dialog: EditDialog::Hidden,
      input: TaskDraft {
        list: DEFAULT_LIST.to_string(),
        ..TaskDraft::default()
      },
      view
    }
  }

  pub fn store(&self) -> &S {
    &self.store
  }

  pub fn view(&self) -> &TaskView {
    &self.view
  }

  pub fn selection(
    &self
  ) -> &FilterSelection {
    &self.selection
  }

  pub fn dialog(&self) -> &EditDialog {
    &self.dialog
  }

  pub fn dialog_mut(
    &mut self
  ) -> &mut EditDialog {
    &mut self.dialog
  }

  pub fn input(&self) -> &TaskDraft {
    &self.input
  }

  pub fn input_mut(
    &mut self
  ) -> &mut TaskDraft {
    &mut self.input
  }

  pub fn render(&mut self) -> &TaskView {
    self.view = render_tasks(
      &self.store,
      &self.selection
    );
    if !self.view.offered {
      debug!(
        selection = %self.selection,
        "filtering on a list with no option"
      );
    }
    &self.view
  }

  pub fn set_filter(
    &mut self,
    selection: FilterSelection
  ) -> &TaskView {
    self.selection = selection;
    self.render()
  }

  /// Adds the pending input. On success
  /// the text field is cleared; list,
  /// date, and time stay as entered.
  pub fn add(
    &mut self,
    now_ms: i64
  ) -> Result<Option<Task>, TaskError> {
    let added = add_task(
      &mut self.store,
      self.input.clone(),
      now_ms
    )?;
    if added.is_some() {
      self.input.text.clear();
      self.render();
    }
    Ok(added)
  }

  pub fn toggle(
    &mut self,
    id: TaskId
  ) -> Result<Task, TaskError> {
    let task =
      toggle_complete(&mut self.store, id)?;
    self.render();
    Ok(task)
  }

  pub fn delete(
    &mut self,
    id: TaskId
  ) -> Result<Task, TaskError> {
    let task =
      delete_task(&mut self.store, id)?;
    self.render();
    Ok(task)
  }

  pub fn open_edit(
    &mut self,
    id: TaskId
  ) -> Result<(), TaskError> {
    let task = find_task(&self.store, id)?;
    self.dialog.open(&task);
    Ok(())
  }

  pub fn cancel_edit(&mut self) {
    self.dialog.cancel();
  }

  /// Saves the dialog's form and hides
  /// it. Does nothing while hidden.
  pub fn submit_edit(
    &mut self
  ) -> Result<Option<Task>, TaskError> {
    let Some(form) = self.dialog.submit()
    else {
      return Ok(None);
    };
    let (id, fields) = form.into_fields();
    let task =
      edit_task(&mut self.store, id, fields)?;
    self.render();
    Ok(Some(task))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::storage::{
    MemoryStore,
    load_tasks
  };
  use crate::view::EMPTY_PLACEHOLDER;

  fn board() -> TaskBoard<MemoryStore> {
    TaskBoard::new(MemoryStore::new())
  }

  fn add(
    board: &mut TaskBoard<MemoryStore>,
    text: &str,
    list: &str,
    date: &str,
    now_ms: i64
  ) -> Task {
    let input = board.input_mut();
    input.text = text.to_string();
    input.list = list.to_string();
    input.date = Some(date.to_string());
    board
      .add(now_ms)
      .expect("add")
      .expect("task created")
  }

  #[test]
  fn scenario_add_to_empty_storage() {
    let mut board = board();
    assert!(board.view().is_empty());

    add(&mut board, "Buy milk", "General", "", 1);
    let view = board.view();
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].text, "Buy milk");
    assert_eq!(view.rows[0].due_label, "No Due Date");
    assert!(!view.rows[0].completed);
    assert_eq!(board.input().text, "");
    assert_eq!(board.input().list, "General");
  }

  #[test]
  fn scenario_toggle_moves_below_incomplete()
   {
    let mut board = board();
    let early =
      add(&mut board, "early", "Work", "2020-01-01", 1);
    add(&mut board, "late", "Work", "2030-01-01", 2);
    add(&mut board, "undated", "Work", "", 3);
    assert_eq!(board.view().rows[0].id, early.id);

    board.toggle(early.id).expect("toggle");
    let rows = &board.view().rows;
    assert_eq!(rows.last().map(|r| r.id), Some(early.id));
    assert!(rows.last().is_some_and(|r| r.completed));
  }

  #[test]
  fn scenario_delete_only_task_shows_placeholder()
   {
    let mut board = board();
    let task = add(&mut board, "solo", "General", "", 1);
    board.delete(task.id).expect("delete");
    assert!(board.view().is_empty());
    assert!(load_tasks(board.store()).is_empty());
    assert_eq!(EMPTY_PLACEHOLDER, "No tasks found.");
  }

  #[test]
  fn blank_add_keeps_input_and_storage() {
    let mut board = board();
    board.input_mut().text = "   ".to_string();
    let added = board.add(5).expect("add");
    assert!(added.is_none());
    assert_eq!(board.input().text, "   ");
    assert!(load_tasks(board.store()).is_empty());
  }

  #[test]
  fn edit_round_trip_through_dialog() {
    let mut board = board();
    let task = add(&mut board, "draft", "Work", "", 1);

    board.open_edit(task.id).expect("open");
    assert!(board.dialog().is_shown());
    if let Some(form) = board.dialog_mut().form_mut() {
      form.text = " final ".to_string();
      form.date = "2025-01-01".to_string();
    }

    let edited = board
      .submit_edit()
      .expect("submit")
      .expect("edited");
    assert!(!board.dialog().is_shown());
    assert_eq!(edited.text, "final");
    assert_eq!(board.view().rows[0].due_label, "Jan 1, 2025");
  }

  #[test]
  fn cancel_edit_leaves_storage_alone() {
    let mut board = board();
    let task = add(&mut board, "keep", "Work", "", 1);
    board.open_edit(task.id).expect("open");
    if let Some(form) = board.dialog_mut().form_mut() {
      form.text = "discard".to_string();
    }
    board.cancel_edit();
    assert!(board.submit_edit().expect("noop").is_none());
    assert_eq!(load_tasks(board.store())[0].text, "keep");
  }

  #[test]
  fn filter_survives_last_custom_task_going()
   {
    let mut board = board();
    let errand = add(&mut board, "post", "Errands", "", 1);
    add(&mut board, "email", "Work", "", 2);

    let errands = FilterSelection::List(
      "Errands".to_string()
    );
    board.set_filter(errands.clone());
    assert_eq!(board.view().rows.len(), 1);
    assert!(board.view().offered);

    board.delete(errand.id).expect("delete");
    assert_eq!(board.selection(), &errands);
    assert!(board.view().is_empty());
    assert!(!board.view().offered);
    assert_eq!(board.view().total, 1);
  }

  #[test]
  fn blank_list_add_keeps_input() {
    let mut board = board();
    let input = board.input_mut();
    input.text = "orphan".to_string();
    input.list = "  ".to_string();

    assert!(matches!(
      board.add(1),
      Err(TaskError::BlankList)
    ));
    assert_eq!(board.input().text, "orphan");
    assert!(load_tasks(board.store()).is_empty());
  }

  #[test]
  fn open_edit_unknown_id_keeps_dialog_hidden()
   {
    let mut board = board();
    assert!(matches!(
      board.open_edit(404),
      Err(TaskError::NotFound(404))
    ));
    assert!(!board.dialog().is_shown());
  }
}
