use tasklist_shared::{
  TaskId,
  TaskRow
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskListRowProps {
  pub row:       TaskRow,
  pub on_toggle: Callback<TaskId>,
  pub on_edit:   Callback<TaskId>,
  pub on_delete: Callback<TaskId>
}

#[function_component(TaskListRow)]
pub fn task_list_row(
  props: &TaskListRowProps
) -> Html {
  let id = props.row.id;
  let action = |callback: &Callback<TaskId>| {
    let callback = callback.clone();
    Callback::from(move |e: MouseEvent| {
      e.stop_propagation();
      callback.emit(id);
    })
  };

  html! {
      <div
          class={classes!("task-item", props.row.completed.then_some("done"))}
          data-id={id.to_string()}
      >
          <div style="flex:1;">
              <p class="task-text">{ &props.row.text }</p>
              <div class="task-meta">
                  <span class="badge">{ &props.row.list }</span>
                  <span>{ &props.row.due_label }</span>
              </div>
          </div>
          <div class="field-row">
              <button
                  class="toggle-complete-btn"
                  title={if props.row.completed { "Mark incomplete" } else { "Mark complete" }}
                  onclick={action(&props.on_toggle)}
              >
                  { props.row.toggle_label }
              </button>
              <button class="edit-btn" title="Edit" onclick={action(&props.on_edit)}>
                  { "✏️" }
              </button>
              <button class="delete-btn" title="Delete" onclick={action(&props.on_delete)}>
                  { "🗑️" }
              </button>
          </div>
      </div>
  }
}
