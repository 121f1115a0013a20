use tasklist_shared::TaskDraft;
use web_sys::HtmlInputElement;
use yew::{
  Callback,
  Html,
  InputEvent,
  Properties,
  SubmitEvent,
  TargetCast,
  function_component,
  html
};

use super::TaskField;

#[derive(Properties, PartialEq)]
pub struct AddTaskFormProps {
  pub draft:     TaskDraft,
  pub lists:     Vec<String>,
  pub on_change:
    Callback<(TaskField, String)>,
  pub on_add:    Callback<()>
}

#[function_component(AddTaskForm)]
pub fn add_task_form(
  props: &AddTaskFormProps
) -> Html {
  let field = |which: TaskField| {
    let on_change =
      props.on_change.clone();
    Callback::from(
      move |e: InputEvent| {
        let input: HtmlInputElement =
          e.target_unchecked_into();
        on_change
          .emit((which, input.value()));
      }
    )
  };
  let on_submit = {
    let on_add = props.on_add.clone();
    Callback::from(
      move |e: SubmitEvent| {
        e.prevent_default();
        on_add.emit(());
      }
    )
  };

  html! {
      <form class="panel field-row" onsubmit={on_submit}>
          <input
              id="task-text"
              style="flex:1;min-width:12rem;"
              placeholder="What needs doing?"
              value={props.draft.text.clone()}
              oninput={field(TaskField::Text)}
          />
          <input
              id="task-list"
              list="task-list-names"
              placeholder="List"
              value={props.draft.list.clone()}
              oninput={field(TaskField::List)}
          />
          <datalist id="task-list-names">
              {
                  for props.lists.iter().map(|list| html! {
                      <option value={list.clone()} />
                  })
              }
          </datalist>
          <input
              id="task-date"
              type="date"
              value={props.draft.date.clone().unwrap_or_default()}
              oninput={field(TaskField::Date)}
          />
          <input
              id="task-time"
              type="time"
              value={props.draft.time.clone().unwrap_or_default()}
              oninput={field(TaskField::Time)}
          />
          <button id="add-task-btn" type="submit">{ "Add Task" }</button>
      </form>
  }
}
