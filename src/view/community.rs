use crate::{
    auth::{IdentityConfig, User},
    model::CommunityPost,
};
use rinja::Template;
use std::sync::Arc;

#[derive(Clone, Template)]
#[template(path = "pages/community.html")]
pub struct Community {
    pub posts: Vec<CommunityPost>,
    pub user: Option<User>,
    pub identity: Arc<IdentityConfig>,
}
