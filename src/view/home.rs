use super::PostListItem;
use crate::site::SiteConfig;
use rinja::Template;
use std::sync::Arc;

#[derive(Clone, Template)]
#[template(path = "pages/home.html")]
pub struct Home {
    pub site: Arc<SiteConfig>,
    pub posts: Vec<PostListItem>,
}
