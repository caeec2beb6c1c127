use axum::{
    extract::{rejection::FormRejection, State},
    response::{IntoResponse, Redirect},
    Form,
};
use serde::Deserialize;
use tracing::{info, warn};
use validator::{Validate, ValidationErrorsKind};

use crate::{
    auth::Identity, context::AppContext, folio_view, model::NewCommunityPost, view, FolioError,
};

#[derive(Debug, Deserialize, Validate)]
pub struct CommunityPostForm {
    #[validate(length(
        min = 1,
        max = 500,
        message = "Posts must be between 1 and 500 characters"
    ))]
    pub content: String,
}

pub async fn index(
    State(context): State<AppContext>,
    Identity(user): Identity,
) -> impl IntoResponse {
    let posts = match context.store().community_posts().await {
        Ok(posts) => posts,
        Err(e) => {
            warn!("could not load community posts: {e}");
            vec![]
        }
    };

    let site = &context.site;
    folio_view!(
        view::Community {
            posts,
            user,
            identity: context.identity.clone(),
        },
        {
            "title" => site.title("Community"),
            "description" => "Join the community and share your thoughts.",
            "og:title" => site.title("Community"),
            "og:description" => "Join the community and share your thoughts.",
            "og:type" => "website",
            "og:url" => site.url("/community"),
        }
    )
}

pub async fn create(
    State(context): State<AppContext>,
    Identity(user): Identity,
    form: Result<Form<CommunityPostForm>, FormRejection>,
) -> Result<impl IntoResponse, FolioError> {
    let user = user.ok_or(FolioError::Unauthorized)?;
    let Form(input) = form.map_err(|rejection| FolioError::BadRequest(rejection.body_text()))?;

    let content = input.content.trim().to_string();
    let input = CommunityPostForm { content };
    if let Err(validation) = input.validate() {
        let mut reasons = vec![];
        for (_, info) in validation.into_errors() {
            if let ValidationErrorsKind::Field(errors) = info {
                reasons.extend(errors.iter().map(|error| error.to_string()));
            }
        }
        return Err(FolioError::BadRequest(reasons.join(" ")));
    }

    let post = context
        .store()
        .create_community_post(NewCommunityPost::new(&user, input.content))
        .await?;
    info!("community post {} created by {}", post.id, user.id);

    Ok(Redirect::to("/community"))
}
