use tasklist_shared::dialog::EditForm;
use web_sys::HtmlInputElement;
use yew::{
  Callback,
  Html,
  InputEvent,
  MouseEvent,
  Properties,
  SubmitEvent,
  TargetCast,
  function_component,
  html
};

use super::TaskField;

#[derive(Properties, PartialEq)]
pub struct EditModalProps {
  pub form:      Option<EditForm>,
  pub lists:     Vec<String>,
  pub on_change:
    Callback<(TaskField, String)>,
  pub on_submit: Callback<()>,
  pub on_cancel: Callback<()>
}

#[function_component(EditModal)]
pub fn edit_modal(
  props: &EditModalProps
) -> Html {
  let Some(form) = &props.form else {
    return html! {};
  };

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
    let on_submit =
      props.on_submit.clone();
    Callback::from(
      move |e: SubmitEvent| {
        e.prevent_default();
        on_submit.emit(());
      }
    )
  };
  let on_cancel = {
    let on_cancel =
      props.on_cancel.clone();
    Callback::from(
      move |_: MouseEvent| {
        on_cancel.emit(());
      }
    )
  };

  html! {
      <div id="edit-modal" class="modal-backdrop">
          <form id="edit-form" class="panel modal" onsubmit={on_submit}>
              <h2>{ "Edit Task" }</h2>
              <input type="hidden" id="edit-task-id" value={form.id.to_string()} />
              <div class="field-row">
                  <input
                      id="edit-text"
                      style="flex:1;"
                      value={form.text.clone()}
                      oninput={field(TaskField::Text)}
                  />
              </div>
              <div class="field-row" style="margin-top:0.5rem;">
                  <input
                      id="edit-list"
                      list="edit-list-names"
                      value={form.list.clone()}
                      oninput={field(TaskField::List)}
                  />
                  <datalist id="edit-list-names">
                      {
                          for props.lists.iter().map(|list| html! {
                              <option value={list.clone()} />
                          })
                      }
                  </datalist>
                  <input
                      id="edit-date"
                      type="date"
                      value={form.date.clone()}
                      oninput={field(TaskField::Date)}
                  />
                  <input
                      id="edit-time"
                      type="time"
                      value={form.time.clone()}
                      oninput={field(TaskField::Time)}
                  />
              </div>
              <div class="field-row" style="margin-top:1rem;justify-content:flex-end;">
                  <button id="cancel-edit-btn" type="button" onclick={on_cancel}>
                      { "Cancel" }
                  </button>
                  <button type="submit">{ "Save" }</button>
              </div>
          </form>
      </div>
  }
}
