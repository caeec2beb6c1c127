use crate::FolioError;
use rinja::Template;

#[derive(Clone, Template)]
#[template(path = "pages/error.html")]
pub struct ErrorPage {
    pub code: u16,
    pub reason: String,
    pub detail: String,
}

impl ErrorPage {
    pub fn new(error: &FolioError) -> Self {
        let status = error.status();

        Self {
            code: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Error").to_string(),
            detail: error.detail(),
        }
    }

    pub fn heading(&self) -> &str {
        &self.reason
    }
}
