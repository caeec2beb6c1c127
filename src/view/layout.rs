use super::ViewData;
use crate::site::SiteConfig;
use rinja::Template;
use std::sync::Arc;

#[derive(Template)]
#[template(path = "layout.html")]
pub struct Layout {
    pub site: Arc<SiteConfig>,
    pub title: String,
    pub description: String,
    pub properties: Vec<(String, String)>,
    pub content: String,
    pub version_string: String,
}

impl Layout {
    pub fn new(site: &Arc<SiteConfig>, content: String, mut data: ViewData) -> Self {
        let title = data.remove("title").unwrap_or_else(|| site.name.clone());
        let description = data
            .remove("description")
            .unwrap_or_else(|| site.description.clone());
        let properties = data
            .0
            .into_iter()
            .filter(|(key, _)| key.contains(':'))
            .collect();

        Self {
            site: Arc::clone(site),
            title,
            description,
            properties,
            content,
            version_string: env!("VERGEN_GIT_SHA").to_string(),
        }
    }
}
