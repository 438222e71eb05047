use leptos::*;
use crate::models::ranking::UserRankingEntry;
use crate::rating::{format_rating, star_array};

fn stars(rating: f64) -> String {
    star_array(rating)
        .into_iter()
        .map(|filled| if filled { '★' } else { '☆' })
        .collect()
}

#[component]
pub fn UserRankingList(entries: Vec<UserRankingEntry>) -> impl IntoView {
    if entries.is_empty() {
        return view! { <p class="empty">"This user has not reviewed any restaurant yet"</p> }
            .into_view();
    }

    view! {
        <ol class="user-rankings">
            {entries
                .into_iter()
                .map(|entry| {
                    view! {
                        <li>
                            <h3>{entry.restaurant_name}</h3>
                            <span class="stars" title={format_rating(entry.average_rating)}>
                                {stars(entry.average_rating)}
                            </span>
                            <dl>
                                <dt>"Service"</dt>
                                <dd>{entry.service_rating.to_string()}</dd>
                                <dt>"Price"</dt>
                                <dd>{entry.price_rating.to_string()}</dd>
                                <dt>"Menu"</dt>
                                <dd>{entry.menu_rating.to_string()}</dd>
                            </dl>
                            <p class="comment">{entry.comment}</p>
                            <time>{entry.created_at.format("%d/%m/%Y").to_string()}</time>
                        </li>
                    }
                })
                .collect_view()}
        </ol>
    }
    .into_view()
}
