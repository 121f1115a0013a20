use crate::ops::TaskFields;
use crate::task::{
  Task,
  TaskId
};

#[derive(
  Debug, Clone, PartialEq,
)]
pub struct EditForm {
  pub id:   TaskId,
  pub text: String,
  pub list: String,
  pub date: String,
  pub time: String
}

impl EditForm {
  pub fn from_task(task: &Task) -> Self {
    Self {
      id:   task.id,
      text: task.text.clone(),
      list: task.list.clone(),
      date: task
        .date
        .clone()
        .unwrap_or_default(),
      time: task
        .time
        .clone()
        .unwrap_or_default()
    }
  }

  pub fn into_fields(
    self
  ) -> (TaskId, TaskFields) {
    (self.id, TaskFields {
      text: self.text,
      list: self.list,
      date: Some(self.date),
      time: Some(self.time)
    })
  }
}

#[derive(
  Debug, Clone, Default, PartialEq,
)]
pub enum EditDialog {
  #[default]
  Hidden,
  Shown(EditForm)
}

impl EditDialog {
  pub fn is_shown(&self) -> bool {
    matches!(self, Self::Shown(_))
  }

  pub fn form(&self) -> Option<&EditForm> {
    match self {
      | Self::Shown(form) => Some(form),
      | Self::Hidden => None
    }
  }

  pub fn form_mut(
    &mut self
  ) -> Option<&mut EditForm> {
    match self {
      | Self::Shown(form) => Some(form),
      | Self::Hidden => None
    }
  }

  /// Shows the dialog populated from the
  /// task's current values.
  pub fn open(&mut self, task: &Task) {
    *self =
      Self::Shown(EditForm::from_task(task));
  }

  pub fn cancel(&mut self) {
    *self = Self::Hidden;
  }

  /// Hides the dialog and hands back the
  /// form for saving. `None` when the
  /// dialog was not shown.
  pub fn submit(
    &mut self
  ) -> Option<EditForm> {
    match std::mem::take(self) {
      | Self::Shown(form) => Some(form),
      | Self::Hidden => None
    }
  }
}
