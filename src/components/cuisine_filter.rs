use leptos::*;
use std::collections::HashSet;

/// A row of toggle chips, one per cuisine. Chips in `selected` are drawn as
/// active; what "active" means (shown or hidden) is up to the parent.
#[component]
pub fn CuisineFilter(
    #[prop(into)] cuisines: Signal<Vec<String>>,
    selected: ReadSignal<HashSet<String>>,
    on_toggle: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="cuisine-filter">
            <For
                each=move || cuisines.get()
                key=|cuisine| cuisine.clone()
                children=move |cuisine: String| {
                    let name = cuisine.clone();
                    let value = cuisine.clone();
                    let active = move || selected.with(|s| s.contains(&name));
                    view! {
                        <button
                            type="button"
                            class="chip"
                            class:active=active
                            on:click=move |_| on_toggle.call(value.clone())
                        >
                            {cuisine}
                        </button>
                    }
                }
            />
        </div>
    }
}

pub fn toggle(set: &mut HashSet<String>, cuisine: String) {
    if !set.remove(&cuisine) {
        set.insert(cuisine);
    }
}
