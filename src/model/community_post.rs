use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::auth::User;
use crate::schema::community_post;
use crate::Connection;

#[derive(Clone, Debug, PartialEq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = crate::schema::community_post)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CommunityPost {
    pub id: i32,
    pub author_id: String,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl CommunityPost {
    /// Every post, newest first.
    pub async fn all(conn: &mut Connection) -> QueryResult<Vec<CommunityPost>> {
        community_post::table
            .select(CommunityPost::as_select())
            .order((community_post::created_at.desc(), community_post::id.desc()))
            .load(conn)
            .await
    }

    pub fn initials(&self) -> String {
        crate::auth::initials(&self.author_name)
    }

    pub fn posted_on(&self) -> String {
        self.created_at.format("%B %-d, %Y").to_string()
    }
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = crate::schema::community_post)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NewCommunityPost {
    pub author_id: String,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl NewCommunityPost {
    pub fn new(author: &User, content: impl Into<String>) -> Self {
        Self {
            author_id: author.id.clone(),
            author_name: author.name.clone(),
            author_avatar: author.avatar_url.clone(),
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn with_created_at(self, created_at: DateTime<Utc>) -> Self {
        Self { created_at, ..self }
    }

    /// Create a new `community_post` in the database
    pub async fn save(&self, conn: &mut Connection) -> QueryResult<CommunityPost> {
        diesel::insert_into(community_post::table)
            .values(self)
            .returning(CommunityPost::as_returning())
            .get_result(conn)
            .await
    }
}
