use tasklist_shared::KeyValueStore;
use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum StorageError {
  #[error(
    "browser local storage is \
     unavailable"
  )]
  Unavailable,

  #[error(
    "browser local storage call \
     failed: {0}"
  )]
  Js(String)
}

/// `window.localStorage`, looked up on
/// every call.
#[derive(
  Debug, Clone, Copy, Default,
)]
pub struct LocalStorageStore;

impl KeyValueStore
  for LocalStorageStore
{
  type Error = StorageError;

  fn get_item(
    &self,
    key: &str
  ) -> Result<Option<String>, Self::Error>
  {
    local_storage()?
      .get_item(key)
      .map_err(js_error)
  }

  fn set_item(
    &mut self,
    key: &str,
    value: &str
  ) -> Result<(), Self::Error> {
    local_storage()?
      .set_item(key, value)
      .map_err(js_error)
  }
}

fn local_storage()
-> Result<web_sys::Storage, StorageError>
{
  web_sys::window()
    .and_then(|window| {
      window
        .local_storage()
        .ok()
        .flatten()
    })
    .ok_or(StorageError::Unavailable)
}

fn js_error(
  value: JsValue
) -> StorageError {
  StorageError::Js(
    value
      .as_string()
      .unwrap_or_else(|| {
        format!("{value:?}")
      })
  )
}
