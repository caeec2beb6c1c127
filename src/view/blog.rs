use crate::{content::BlogPost, model::ViewCount, site::SiteConfig};
use rinja::Template;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct PostListItem {
    pub post: Arc<BlogPost>,
    pub views: Option<ViewCount>,
}

impl PostListItem {
    pub fn new(post: Arc<BlogPost>) -> Self {
        Self { post, views: None }
    }

    pub fn with_views(self, views: ViewCount) -> Self {
        Self {
            views: Some(views),
            ..self
        }
    }
}

#[derive(Clone, Template)]
#[template(path = "pages/blog.html")]
pub struct BlogIndex {
    pub posts: Vec<PostListItem>,
}

#[derive(Clone, Template)]
#[template(path = "pages/post.html")]
pub struct PostPage {
    pub site: Arc<SiteConfig>,
    pub post: Arc<BlogPost>,
    pub views: ViewCount,
}
