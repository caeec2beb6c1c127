mod blog;
mod community;
mod error;
mod home;
mod layout;
mod project;

pub use blog::*;
pub use community::*;
pub use error::*;
pub use home::*;
pub use layout::*;
pub use project::*;

use crate::{context::AppContext, error::ErrorWrapper, FolioError};
use axum::{
    body::Body,
    extract::State,
    response::{Html, IntoResponse, Response},
};
use rinja::Template;
use std::collections::BTreeMap;

/// Wrap rendered views and errors in the site layout. Other responses pass through.
pub async fn render_view(State(context): State<AppContext>, response: Response) -> Response {
    let (mut parts, body) = response.into_parts();

    let (content, data) =
        if let Some(RenderedTemplate(content)) = parts.extensions.remove::<RenderedTemplate>() {
            let data = parts.extensions.remove::<ViewData>().unwrap_or_default();
            (content, data)
        } else if let Some(ErrorWrapper(error)) = parts.extensions.remove::<ErrorWrapper>() {
            let page = ErrorPage::new(&error);
            let data = crate::view_data! {
                "title" => context.site.title(page.heading()),
            };
            match page.render() {
                Ok(content) => (content, data),
                Err(e) => {
                    tracing::error!("failed to render error page: {e}");
                    return Response::from_parts(parts, body);
                }
            }
        } else {
            return Response::from_parts(parts, body);
        };

    let layout = Layout::new(&context.site, content, data);
    match layout.render() {
        Ok(html) => (parts.status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("failed to render layout: {e}");
            FolioError::Internal(e.into()).into_response()
        }
    }
}

/// Page metadata: `title`, `description`, and OpenGraph style `prefix:name` properties.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewData(pub BTreeMap<String, String>);

impl ViewData {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }
}

impl std::ops::DerefMut for ViewData {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl std::ops::Deref for ViewData {
    type Target = BTreeMap<String, String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[macro_export]
macro_rules! view_data {
    ($($key:expr => $value:expr, )*) => {
        {
            let mut _data = $crate::view::ViewData::new();
        $(
            let _ = _data.insert($key.to_string(), $value.to_string());
        )*
            _data
        }
    }
}

#[macro_export(local_inner_macros)]
macro_rules! folio_view {
    ($template:expr , { $($data:tt)* }) => {
        $crate::view::ViewWithData($template, view_data! { $($data)* })
    };
    ($template:expr, $data:expr) => {
        $crate::view::ViewWithData($template, $data)
    };
    ($template:expr) => {
        $crate::view::View($template)
    };
}

#[derive(Clone)]
pub struct View<T: Template>(pub T);

#[derive(Clone)]
pub struct ViewWithData<T: Template>(pub T, pub ViewData);

#[derive(Clone)]
struct RenderedTemplate(String);

fn rendered_response(template: &impl Template) -> Result<Response, FolioError> {
    let rendered = RenderedTemplate(template.render().map_err(anyhow::Error::from)?);

    let mut response = Response::new(Body::empty());
    response.extensions_mut().insert(rendered);
    Ok(response)
}

impl<T: Template> IntoResponse for View<T> {
    fn into_response(self) -> Response {
        match rendered_response(&self.0) {
            Ok(response) => response,
            Err(e) => e.into_response(),
        }
    }
}

impl<T: Template> IntoResponse for ViewWithData<T> {
    fn into_response(self) -> Response {
        match rendered_response(&self.0) {
            Ok(mut response) => {
                response.extensions_mut().insert(self.1);
                response
            }
            Err(e) => e.into_response(),
        }
    }
}
