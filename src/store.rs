use async_trait::async_trait;
use diesel_async::pooled_connection::deadpool::Pool;

use crate::model::{CommunityPost, NewCommunityPost, ViewRecord};
use crate::Connection;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Deadpool(#[from] deadpool::managed::PoolError<diesel_async::pooled_connection::PoolError>),

    #[error(transparent)]
    Diesel(#[from] diesel::result::Error),
}

/// Persistence for view counters and community posts.
#[async_trait]
pub trait Store: Send + Sync + 'static {
    /// Current count for every slug that has been viewed at least once.
    async fn views_count(&self) -> Result<Vec<ViewRecord>>;

    /// Add exactly one view to `slug`.
    async fn increment_views(&self, slug: &str) -> Result<()>;

    async fn community_posts(&self) -> Result<Vec<CommunityPost>>;

    async fn create_community_post(&self, post: NewCommunityPost) -> Result<CommunityPost>;
}

#[derive(Clone, derive_more::Debug)]
pub struct DieselStore {
    #[debug(skip)]
    database: Pool<Connection>,
}

impl DieselStore {
    pub fn new(database: Pool<Connection>) -> Self {
        Self { database }
    }
}

#[async_trait]
impl Store for DieselStore {
    async fn views_count(&self) -> Result<Vec<ViewRecord>> {
        let mut conn = self.database.get().await?;
        Ok(ViewRecord::all(&mut conn).await?)
    }

    async fn increment_views(&self, slug: &str) -> Result<()> {
        let mut conn = self.database.get().await?;
        ViewRecord::increment(slug, &mut conn).await?;
        Ok(())
    }

    async fn community_posts(&self) -> Result<Vec<CommunityPost>> {
        let mut conn = self.database.get().await?;
        Ok(CommunityPost::all(&mut conn).await?)
    }

    async fn create_community_post(&self, post: NewCommunityPost) -> Result<CommunityPost> {
        let mut conn = self.database.get().await?;
        Ok(post.save(&mut conn).await?)
    }
}
