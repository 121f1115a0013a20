use tasklist_shared::view::EMPTY_PLACEHOLDER;
use tasklist_shared::{
  TaskId,
  TaskView
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::TaskListRow;

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub view:      TaskView,
  pub on_toggle: Callback<TaskId>,
  pub on_edit:   Callback<TaskId>,
  pub on_delete: Callback<TaskId>
}

#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  if props.view.is_empty() {
    return html! {
        <div class="panel task-list">
            <p class="empty">{ EMPTY_PLACEHOLDER }</p>
        </div>
    };
  }

  html! {
      <div class="panel task-list">
          {
              for props.view.rows.iter().cloned().map(|row| html! {
                  <TaskListRow
                      key={row.id.to_string()}
                      row={row.clone()}
                      on_toggle={props.on_toggle.clone()}
                      on_edit={props.on_edit.clone()}
                      on_delete={props.on_delete.clone()}
                  />
              })
          }
      </div>
  }
}
