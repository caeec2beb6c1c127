use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{context::AppContext, folio_view, view, FolioError};

pub async fn show(
    State(context): State<AppContext>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, FolioError> {
    let project = context.content.project(&slug).ok_or(FolioError::NotFound)?;

    let site = context.site.clone();
    let page = view::ProjectPage {
        site: site.clone(),
        project: project.clone(),
    };
    Ok(folio_view!(page, {
        "title" => site.title(&project.title),
        "description" => project.summary,
        "og:title" => site.title(&project.title),
        "og:description" => project.summary,
        "og:type" => "website",
        "og:url" => site.url(&format!("/projects/{}", project.slug)),
    }))
}
