use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{
    context::AppContext, counter::ViewCounter, folio_view, model::ViewCount, view, FolioError,
};

pub async fn index(State(context): State<AppContext>) -> impl IntoResponse {
    let records = match context.store().views_count().await {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!("could not read view counts for the blog index: {e}");
            vec![]
        }
    };

    let posts = context
        .content
        .posts()
        .into_iter()
        .map(|post| {
            let views = ViewCount::for_slug(&records, &post.slug);
            view::PostListItem::new(post).with_views(views)
        })
        .collect();

    let site = &context.site;
    folio_view!(view::BlogIndex { posts }, {
        "title" => site.title("Blog"),
        "og:title" => site.title("Blog"),
        "og:type" => "website",
        "og:url" => site.url("/blog"),
    })
}

pub async fn show(
    State(context): State<AppContext>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, FolioError> {
    let post = context.content.post(&slug).ok_or(FolioError::NotFound)?;

    let views = ViewCounter::count(context.store(), &post.slug).await;
    context.views.record(&post.slug);

    let site = context.site.clone();
    let mut data = crate::view_data! {
        "title" => site.title(&post.title),
        "description" => post.summary,
        "og:title" => site.title(&post.title),
        "og:description" => post.summary,
        "og:type" => "article",
        "og:url" => site.url(&format!("/blog/{}", post.slug)),
        "article:published_time" => post.published_iso(),
    };
    if let Some(ref image) = post.image {
        data.insert("og:image".to_string(), site.absolute_url(image));
    }

    Ok(folio_view!(view::PostPage { site, post, views }, data))
}
