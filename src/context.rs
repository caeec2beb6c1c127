use axum::extract::FromRef;
use std::sync::Arc;

use crate::{
    auth::IdentityConfig, content::ContentIndex, counter::ViewCounter, site::SiteConfig,
    store::Store,
};

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppContext {
    pub store: Arc<dyn Store>,
    pub content: Arc<ContentIndex>,
    pub views: ViewCounter,
    pub site: Arc<SiteConfig>,
    pub identity: Arc<IdentityConfig>,
}

impl AppContext {
    pub fn new(
        store: Arc<dyn Store>,
        content: ContentIndex,
        views: ViewCounter,
        site: SiteConfig,
        identity: IdentityConfig,
    ) -> Self {
        Self {
            store,
            content: Arc::new(content),
            views,
            site: Arc::new(site),
            identity: Arc::new(identity),
        }
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }
}

impl FromRef<AppContext> for Arc<SiteConfig> {
    fn from_ref(input: &AppContext) -> Self {
        input.site.clone()
    }
}

impl FromRef<AppContext> for Arc<IdentityConfig> {
    fn from_ref(input: &AppContext) -> Self {
        input.identity.clone()
    }
}

impl FromRef<AppContext> for Arc<ContentIndex> {
    fn from_ref(input: &AppContext) -> Self {
        input.content.clone()
    }
}
