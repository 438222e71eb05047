/// Global leaderboard with a cuisine filter. Picking no cuisine shows
/// everything; picking some shows only those.
use leptos::*;
use std::collections::HashSet;
use crate::api::get_global_rankings;
use crate::components::{
    cuisine_filter::{toggle, CuisineFilter},
    ranking_table::RankingTable,
};
use crate::rating::{available_cuisines, filter_included};

#[component]
pub fn RankingsPage() -> impl IntoView {
    let rankings = create_resource(|| (), |_| get_global_rankings());
    let (included, set_included) = create_signal(HashSet::<String>::new());

    let cuisines = Signal::derive(move || {
        rankings
            .get()
            .and_then(Result::ok)
            .map(|entries| available_cuisines(&entries))
            .unwrap_or_default()
    });

    let on_toggle = Callback::new(move |cuisine: String| {
        set_included.update(|set| toggle(set, cuisine));
    });

    view! {
        <section>
            <h1>"Leaderboard"</h1>
            <CuisineFilter cuisines=cuisines selected=included on_toggle=on_toggle/>
            <Suspense fallback=move || view! { <p>"Loading..."</p> }>
                {move || {
                    rankings
                        .get()
                        .map(|result| match result {
                            Ok(entries) => {
                                let visible = filter_included(&entries, &included.get());
                                let count = format!("{} restaurants", visible.len());
                                view! {
                                    <p class="count">{count}</p>
                                    <RankingTable entries=visible/>
                                }
                                    .into_view()
                            }
                            Err(e) => {
                                leptos::logging::error!("[UI] Failed to load rankings: {}", e);
                                view! { <p class="error">"Error loading the leaderboard"</p> }
                                    .into_view()
                            }
                        })
                }}
            </Suspense>
        </section>
    }
}
