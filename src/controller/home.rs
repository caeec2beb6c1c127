use axum::{extract::State, response::IntoResponse};

use crate::{context::AppContext, folio_view, view};

/// Posts shown under "Latest Posts".
pub const RECENT_POSTS: usize = 3;

pub async fn home(State(context): State<AppContext>) -> impl IntoResponse {
    let posts = context
        .content
        .recent_posts(RECENT_POSTS)
        .into_iter()
        .map(view::PostListItem::new)
        .collect();

    let site = context.site.clone();
    folio_view!(view::Home { site: site.clone(), posts }, {
        "title" => site.name,
        "description" => site.description,
        "og:title" => site.name,
        "og:description" => site.description,
        "og:type" => "website",
        "og:url" => site.url("/"),
    })
}
