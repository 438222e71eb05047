/// Main application entry point for How I Ate.
/// Routes between the global leaderboard and the per-user leaderboards.
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use crate::components::{rankings_page::RankingsPage, user_rankings_page::UserRankingsPage};

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="How I Ate"/>
        <Router>
            <nav>
                <A href="/">{ "How I Ate" }</A>
            </nav>
            <main>
                <Routes>
                    <Route path="" view=RankingsPage/>
                    <Route path="/users/:user_id" view=UserRankingsPage/>
                </Routes>
            </main>
        </Router>
    }
}
