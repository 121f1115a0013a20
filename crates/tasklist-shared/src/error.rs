use thiserror::Error;

use crate::task::TaskId;

pub type BoxError =
  Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum TaskError {
  #[error("task not found: {0}")]
  NotFound(TaskId),

  #[error("list name is blank")]
  BlankList,

  #[error("storage backend failed: {0}")]
  Backend(#[source] BoxError),

  #[error("failed to serialize tasks: {0}")]
  Serialize(#[from] serde_json::Error)
}

impl TaskError {
  pub fn backend<E>(err: E) -> Self
  where
    E: Into<BoxError>
  {
    Self::Backend(err.into())
  }
}
