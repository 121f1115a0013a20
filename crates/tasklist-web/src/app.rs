use std::cell::RefCell;
use std::rc::Rc;

use gloo::console::log;
use tasklist_shared::{
  FilterSelection,
  TaskBoard,
  TaskError,
  TaskId
};
use yew::{
  Callback,
  Html,
  function_component,
  html,
  use_effect_with,
  use_mut_ref,
  use_state
};

use crate::components::{
  AddTaskForm,
  EditModal,
  ListFilter,
  TaskField,
  TaskList
};
use crate::storage::LocalStorageStore;

type Board = TaskBoard<LocalStorageStore>;

fn ui_debug(
  event: &str,
  detail: impl AsRef<str>
) {
  let detail = detail.as_ref();
  tracing::debug!(
    event,
    detail,
    "ui event"
  );
  log!(format!(
    "[tasklist-ui] {event}: {detail}"
  ));
}

fn report(
  action: &str,
  result: Result<(), TaskError>
) {
  if let Err(error) = result {
    tracing::error!(
      action,
      error = %error,
      "task action failed"
    );
  }
}

#[function_component(App)]
pub fn app() -> Html {
  let board: Rc<RefCell<Board>> =
    use_mut_ref(|| {
      TaskBoard::new(LocalStorageStore)
    });
  let view = use_state(|| {
    board.borrow().view().clone()
  });
  let form = use_state(|| {
    board.borrow().dialog().form().cloned()
  });
  let input = use_state(|| {
    board.borrow().input().clone()
  });

  {
    let total = view.total;
    use_effect_with((), move |_| {
      ui_debug(
        "app.mounted",
        format!("loaded {total} tasks")
      );
      || ()
    });
  }

  // Runs one board action, then copies
  // its view, dialog, and input into
  // component state.
  let action = {
    let board = board.clone();
    let view = view.clone();
    let form = form.clone();
    let input = input.clone();
    move |run: Box<dyn Fn(&mut Board)>| {
      let mut board = board.borrow_mut();
      run(&mut board);
      view.set(board.view().clone());
      form.set(
        board.dialog().form().cloned()
      );
      input.set(board.input().clone());
    }
  };

  let on_input_change = {
    let action = action.clone();
    Callback::from(
      move |(field, value): (
        TaskField,
        String
      )| {
        action(Box::new(move |board: &mut Board| {
          let input = board.input_mut();
          match field {
            | TaskField::Text => {
              input.text = value.clone()
            }
            | TaskField::List => {
              input.list = value.clone()
            }
            | TaskField::Date => {
              input.date =
                Some(value.clone())
            }
            | TaskField::Time => {
              input.time =
                Some(value.clone())
            }
          }
        }));
      }
    )
  };

  let on_add = {
    let action = action.clone();
    Callback::from(move |()| {
      action(Box::new(|board: &mut Board| {
        let now_ms =
          js_sys::Date::now() as i64;
        match board.add(now_ms) {
          | Ok(Some(task)) => ui_debug(
            "add",
            format!("created {}", task.id)
          ),
          | Ok(None) => ui_debug(
            "add",
            "ignored blank text"
          ),
          | Err(error) => {
            report("add", Err(error))
          }
        }
      }));
    })
  };

  let on_filter = {
    let action = action.clone();
    Callback::from(
      move |value: String| {
        ui_debug("filter", &value);
        action(Box::new(move |board: &mut Board| {
          board.set_filter(
            FilterSelection::from_value(
              &value
            )
          );
        }));
      }
    )
  };

  let on_toggle = {
    let action = action.clone();
    Callback::from(move |id: TaskId| {
      ui_debug("toggle", id.to_string());
      action(Box::new(move |board: &mut Board| {
        report(
          "toggle",
          board.toggle(id).map(|_| ())
        );
      }));
    })
  };

  let on_delete = {
    let action = action.clone();
    Callback::from(move |id: TaskId| {
      ui_debug("delete", id.to_string());
      action(Box::new(move |board: &mut Board| {
        report(
          "delete",
          board.delete(id).map(|_| ())
        );
      }));
    })
  };

  let on_edit = {
    let action = action.clone();
    Callback::from(move |id: TaskId| {
      ui_debug("edit", id.to_string());
      action(Box::new(move |board: &mut Board| {
        report(
          "edit",
          board.open_edit(id)
        );
      }));
    })
  };

  let on_edit_change = {
    let action = action.clone();
    Callback::from(
      move |(field, value): (
        TaskField,
        String
      )| {
        action(Box::new(move |board: &mut Board| {
          let Some(form) =
            board.dialog_mut().form_mut()
          else {
            return;
          };
          match field {
            | TaskField::Text => {
              form.text = value.clone()
            }
            | TaskField::List => {
              form.list = value.clone()
            }
            | TaskField::Date => {
              form.date = value.clone()
            }
            | TaskField::Time => {
              form.time = value.clone()
            }
          }
        }));
      }
    )
  };

  let on_edit_submit = {
    let action = action.clone();
    Callback::from(move |()| {
      action(Box::new(|board: &mut Board| {
        report(
          "save edit",
          board.submit_edit().map(|_| ())
        );
      }));
    })
  };

  let on_edit_cancel = {
    let action = action.clone();
    Callback::from(move |()| {
      action(Box::new(|board: &mut Board| {
        board.cancel_edit();
      }));
    })
  };

  let view = (*view).clone();
  let lists: Vec<String> = view
    .filter_options
    .iter()
    .skip(1)
    .map(|option| option.value.clone())
    .collect();

  html! {
      <main class="page">
          <h1>{ "Tasks" }</h1>
          <AddTaskForm
              draft={(*input).clone()}
              lists={lists.clone()}
              on_change={on_input_change}
              on_add={on_add}
          />
          <ListFilter
              options={view.filter_options.clone()}
              selected={view.selection.value().to_string()}
              offered={view.offered}
              on_change={on_filter}
          />
          <TaskList
              view={view}
              on_toggle={on_toggle}
              on_edit={on_edit}
              on_delete={on_delete}
          />
          <EditModal
              form={(*form).clone()}
              lists={lists}
              on_change={on_edit_change}
              on_submit={on_edit_submit}
              on_cancel={on_edit_cancel}
          />
      </main>
  }
}
