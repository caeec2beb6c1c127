use std::sync::Arc;

use axum::{http::StatusCode, response::IntoResponse};

#[derive(Debug, thiserror::Error)]
pub enum FolioError {
    #[error("400 Bad Request")]
    BadRequest(String),

    #[error("401 Unauthorized")]
    Unauthorized,

    #[error("404 Not Found")]
    NotFound,

    #[error("500 Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl FolioError {
    pub fn status(&self) -> StatusCode {
        use FolioError::*;

        match self {
            BadRequest(_) => StatusCode::BAD_REQUEST,
            Unauthorized => StatusCode::UNAUTHORIZED,
            NotFound => StatusCode::NOT_FOUND,
            Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text shown to the visitor below the status line.
    pub fn detail(&self) -> String {
        use FolioError::*;

        match self {
            BadRequest(reason) => reason.clone(),
            Unauthorized => "You need to sign in to do that.".to_string(),
            NotFound => "There is nothing here.".to_string(),
            Internal(_) => "Something went wrong on our end.".to_string(),
        }
    }
}

#[derive(Clone)]
pub(crate) struct ErrorWrapper(pub Arc<FolioError>);

impl IntoResponse for FolioError {
    fn into_response(self) -> axum::response::Response {
        let code = self.status();
        if let FolioError::Internal(ref inner) = self {
            tracing::error!("Internal server error: {inner:#}");
        }

        let mut response = (code, self.to_string()).into_response();
        response
            .extensions_mut()
            .insert(ErrorWrapper(Arc::new(self)));

        response
    }
}

impl From<crate::store::Error> for FolioError {
    fn from(value: crate::store::Error) -> Self {
        Self::Internal(value.into())
    }
}
