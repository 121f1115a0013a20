pub mod board;
pub mod dialog;
pub mod error;
pub mod format;
pub mod ops;
pub mod storage;
pub mod task;
pub mod view;

pub use board::TaskBoard;
pub use error::TaskError;
pub use storage::{
  KeyValueStore,
  MemoryStore,
  STORAGE_KEY
};
pub use task::{
  Task,
  TaskDraft,
  TaskId
};
pub use view::{
  FilterSelection,
  TaskRow,
  TaskView
};
