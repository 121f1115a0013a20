use tasklist_shared::view::FilterOption;
use web_sys::HtmlSelectElement;
use yew::{
  Callback,
  Event,
  Html,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct ListFilterProps {
  pub options:   Vec<FilterOption>,
  pub selected:  String,
  pub offered:   bool,
  pub on_change: Callback<String>
}

#[function_component(ListFilter)]
pub fn list_filter(
  props: &ListFilterProps
) -> Html {
  let on_change = {
    let on_change =
      props.on_change.clone();
    Callback::from(move |e: Event| {
      let select: HtmlSelectElement =
        e.target_unchecked_into();
      on_change.emit(select.value());
    })
  };

  html! {
      <div class="panel field-row">
          <label for="list-filter">{ "Show" }</label>
          <select id="list-filter" onchange={on_change}>
              if !props.offered {
                  <option value={props.selected.clone()} selected=true disabled=true>
                      { &props.selected }
                  </option>
              }
              {
                  for props.options.iter().map(|option| html! {
                      <option
                          value={option.value.clone()}
                          selected={option.value == props.selected}
                      >
                          { &option.label }
                      </option>
                  })
              }
          </select>
      </div>
  }
}
