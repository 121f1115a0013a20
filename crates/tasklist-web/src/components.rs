mod add_task_form;
mod edit_modal;
mod list_filter;
mod task_list;
mod task_list_row;

pub use add_task_form::AddTaskForm;
pub use edit_modal::EditModal;
pub use list_filter::ListFilter;
pub use task_list::TaskList;
pub use task_list_row::TaskListRow;

/// Which input of the add form or the
/// edit dialog changed.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum TaskField {
  Text,
  List,
  Date,
  Time
}
