use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use std::fmt::Display;

use crate::schema::views;
use crate::Connection;

/// Number of recorded views for a single slug.
#[derive(Clone, Debug, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::schema::views)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ViewRecord {
    pub slug: String,
    pub count: i64,
}

impl ViewRecord {
    pub async fn all(conn: &mut Connection) -> QueryResult<Vec<ViewRecord>> {
        views::table
            .select(ViewRecord::as_select())
            .load(conn)
            .await
    }

    /// Add one view to `slug`, creating the record on first sight.
    pub async fn increment(slug: &str, conn: &mut Connection) -> QueryResult<usize> {
        diesel::insert_into(views::table)
            .values((views::slug.eq(slug), views::count.eq(1)))
            .on_conflict(views::slug)
            .do_update()
            .set(views::count.eq(views::count + 1))
            .execute(conn)
            .await
    }
}

/// A view count as shown next to a post, e.g. `1 view` or `12 views`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewCount(pub i64);

impl ViewCount {
    /// Count for `slug` within a full listing; unknown slugs have no views.
    pub fn for_slug(records: &[ViewRecord], slug: &str) -> Self {
        records
            .iter()
            .find(|record| record.slug == slug)
            .map(|record| Self(record.count))
            .unwrap_or_default()
    }

    pub fn unit(&self) -> &'static str {
        if self.0 == 1 {
            "view"
        } else {
            "views"
        }
    }
}

impl Display for ViewCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.0, self.unit())
    }
}
