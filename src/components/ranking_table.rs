use leptos::*;
use crate::models::ranking::GlobalRankingEntry;
use crate::rating::format_rating;

#[component]
pub fn RankingTable(entries: Vec<GlobalRankingEntry>) -> impl IntoView {
    if entries.is_empty() {
        return view! { <p class="empty">"No rankings available yet"</p> }.into_view();
    }

    view! {
        <table class="rankings">
            <thead>
                <tr>
                    <th>"#"</th>
                    <th>"Restaurant"</th>
                    <th>"Cuisine"</th>
                    <th>"Rating"</th>
                    <th>"Reviews"</th>
                </tr>
            </thead>
            <tbody>
                {entries
                    .into_iter()
                    .enumerate()
                    .map(|(position, entry)| {
                        view! {
                            <tr>
                                <td>{position + 1}</td>
                                <td>{entry.restaurant_name}</td>
                                <td>{entry.cuisine.unwrap_or_default()}</td>
                                <td title={entry.average_rating.to_string()}>
                                    {format_rating(entry.average_rating)}
                                </td>
                                <td>{entry.review_count}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
    .into_view()
}
