use std::collections::BTreeMap;
use std::convert::Infallible;

use tracing::{
  debug,
  warn
};

use crate::error::TaskError;
use crate::task::Task;

pub const STORAGE_KEY: &str =
  "todo_app_tasks";

/// String key-value persistence, shaped
/// like the browser `Storage` API.
pub trait KeyValueStore {
  type Error: std::error::Error
    + Send
    + Sync
    + 'static;

  fn get_item(
    &self,
    key: &str
  ) -> Result<Option<String>, Self::Error>;

  fn set_item(
    &mut self,
    key: &str,
    value: &str
  ) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  items: BTreeMap<String, String>
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

impl KeyValueStore for MemoryStore {
  type Error = Infallible;

  fn get_item(
    &self,
    key: &str
  ) -> Result<Option<String>, Self::Error>
  {
    Ok(self.items.get(key).cloned())
  }

  fn set_item(
    &mut self,
    key: &str,
    value: &str
  ) -> Result<(), Self::Error> {
    self.items.insert(
      key.to_string(),
      value.to_string()
    );
    Ok(())
  }
}

/// Reads the whole collection. Missing,
/// unreadable, or corrupt content reads
/// as an empty collection.
#[tracing::instrument(skip(store))]
pub fn load_tasks<S>(
  store: &S
) -> Vec<Task>
where
  S: KeyValueStore + ?Sized
{
  let raw = match store
    .get_item(STORAGE_KEY)
  {
    | Ok(Some(raw)) => raw,
    | Ok(None) => {
      debug!(
        key = STORAGE_KEY,
        "no stored tasks"
      );
      return Vec::new();
    }
    | Err(error) => {
      warn!(
        key = STORAGE_KEY,
        %error,
        "failed reading stored tasks; treating as empty"
      );
      return Vec::new();
    }
  };

  match serde_json::from_str::<Vec<Task>>(
    &raw
  ) {
    | Ok(tasks) => {
      debug!(
        count = tasks.len(),
        "loaded tasks"
      );
      tasks
    }
    | Err(error) => {
      warn!(
        key = STORAGE_KEY,
        %error,
        "stored tasks are corrupt; treating as empty"
      );
      Vec::new()
    }
  }
}

/// Overwrites the stored collection.
#[tracing::instrument(skip(store, tasks), fields(count = tasks.len()))]
pub fn save_tasks<S>(
  store: &mut S,
  tasks: &[Task]
) -> Result<(), TaskError>
where
  S: KeyValueStore + ?Sized
{
  let serialized =
    serde_json::to_string(tasks)?;
  store
    .set_item(STORAGE_KEY, &serialized)
    .map_err(TaskError::backend)?;
  debug!("saved tasks");
  Ok(())
}
