/// One user's personal leaderboard. Cuisines can be hidden one by one;
/// restaurants without a cuisine are always listed.
use leptos::*;
use leptos_router::use_params_map;
use std::collections::HashSet;
use crate::api::get_user_rankings;
use crate::components::{
    cuisine_filter::{toggle, CuisineFilter},
    user_ranking_list::UserRankingList,
};
use crate::rating::{available_cuisines, filter_excluded};

#[component]
pub fn UserRankingsPage() -> impl IntoView {
    let params = use_params_map();
    let user_id = move || params.with(|p| p.get("user_id").cloned().unwrap_or_default());

    let rankings = create_resource(user_id, get_user_rankings);
    let (excluded, set_excluded) = create_signal(HashSet::<String>::new());

    let cuisines = Signal::derive(move || {
        rankings
            .get()
            .and_then(Result::ok)
            .map(|entries| available_cuisines(&entries))
            .unwrap_or_default()
    });

    let on_toggle = Callback::new(move |cuisine: String| {
        set_excluded.update(|set| toggle(set, cuisine));
    });

    view! {
        <section>
            <h1>"Reviews by this user"</h1>
            <CuisineFilter cuisines=cuisines selected=excluded on_toggle=on_toggle/>
            <Suspense fallback=move || view! { <p>"Loading..."</p> }>
                {move || {
                    rankings
                        .get()
                        .map(|result| match result {
                            Ok(entries) => {
                                let visible = filter_excluded(&entries, &excluded.get());
                                view! { <UserRankingList entries=visible/> }.into_view()
                            }
                            Err(e) => {
                                leptos::logging::error!("[UI] Failed to load user rankings: {}", e);
                                view! { <p class="error">"User not found or reviews unavailable"</p> }
                                    .into_view()
                            }
                        })
                }}
            </Suspense>
        </section>
    }
}
