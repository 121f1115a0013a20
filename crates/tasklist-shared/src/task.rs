use std::collections::BTreeMap;

use serde::{
  Deserialize,
  Deserializer,
  Serialize,
  Serializer
};

pub type TaskId = i64;

pub const DEFAULT_LIST: &str =
  "General";

pub const SUGGESTED_LISTS: [&str; 5] = [
  "General", "Work", "Personal",
  "Health", "Study"
];

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct Task {
  pub id:        TaskId,
  pub text:      String,
  #[serde(default = "default_list")]
  pub list:      String,
  #[serde(
    default,
    with = "blank_as_none"
  )]
  pub date:      Option<String>,
  #[serde(
    default,
    with = "blank_as_none"
  )]
  pub time:      Option<String>,
  #[serde(default)]
  pub completed: bool,

  #[serde(flatten)]
  pub extra:
    BTreeMap<String, serde_json::Value>
}

/// Field values for a new task, as
/// read from an add form.
#[derive(
  Debug, Clone, Default, PartialEq,
)]
pub struct TaskDraft {
  pub text: String,
  pub list: String,
  pub date: Option<String>,
  pub time: Option<String>
}

impl Task {
  pub fn from_draft(
    id: TaskId,
    draft: TaskDraft
  ) -> Self {
    Self {
      id,
      text: draft.text.trim().to_string(),
      list: draft.list,
      date: non_blank(draft.date),
      time: non_blank(draft.time),
      completed: false,
      extra: BTreeMap::new()
    }
  }

  pub fn has_due_date(&self) -> bool {
    self.date.is_some()
  }
}

pub(crate) fn non_blank(
  value: Option<String>
) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}

fn default_list() -> String {
  DEFAULT_LIST.to_string()
}

/// Stored objects write absent dates
/// and times as `""`; a `null` or a
/// missing field reads as absent too.
mod blank_as_none {
  use super::*;

  pub fn serialize<S>(
    value: &Option<String>,
    serializer: S
  ) -> Result<S::Ok, S::Error>
  where
    S: Serializer
  {
    serializer.serialize_str(
      value.as_deref().unwrap_or("")
    )
  }

  pub fn deserialize<'de, D>(
    deserializer: D
  ) -> Result<Option<String>, D::Error>
  where
    D: Deserializer<'de>
  {
    let raw = Option::<String>::deserialize(
      deserializer
    )?;
    Ok(super::non_blank(raw))
  }
}
