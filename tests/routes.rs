use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use folio::{
    content::{Collection, ContentIndex, Document},
    database,
    model::{CommunityPost, NewCommunityPost, ViewRecord},
    site::SiteConfig,
    store, AppContext, DieselStore, IdentityConfig, Store, ViewCounter,
};
use std::{sync::Arc, time::Duration};
use tower::ServiceExt as _;

fn post(slug: &str, published: &str, updated: Option<&str>) -> Document {
    let updated = updated
        .map(|date| format!("updatedAt: {date}\n"))
        .unwrap_or_default();
    let source = format!(
        "---\ntitle: Post {slug}\nsummary: About {slug}\npublishedAt: {published}\n{updated}---\n\nBody of *{slug}*.\n"
    );

    Document::parse(slug, &source).unwrap()
}

fn post_with_image(slug: &str, image: &str) -> Document {
    let source = format!(
        "---\ntitle: Post {slug}\nsummary: About {slug}\npublishedAt: 2023-06-01\nimage: {image}\n---\n\nBody.\n"
    );

    Document::parse(slug, &source).unwrap()
}

fn content() -> ContentIndex {
    let posts = Collection::new(vec![
        post_with_image("local-image", "images/cover.png"),
        post_with_image("remote-image", "https://cdn.example.com/a.png"),
        post("first", "2024-01-01", None),
        post("second", "2024-02-01", Some("2024-03-05")),
        post("third", "2024-03-01", Some("2024-03-01")),
        post("fourth", "2024-04-01", None),
    ])
    .unwrap();
    let projects = Collection::new(vec![post("portfolio", "2024-02-10", None)]).unwrap();

    ContentIndex::new(posts, projects)
}

struct TestApp {
    router: Router,
    store: Arc<dyn Store>,
    _dir: tempfile::TempDir,
}

async fn app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let url = dir.path().join("test.sqlite3");
    let pool = database::connect(url.to_str().unwrap(), 4).await.unwrap();
    let store: Arc<dyn Store> = Arc::new(DieselStore::new(pool));

    TestApp {
        router: router_with(store.clone()),
        store,
        _dir: dir,
    }
}

fn router_with(store: Arc<dyn Store>) -> Router {
    let (views, _worker) = ViewCounter::spawn(store.clone(), 16);
    let context = AppContext::new(
        store,
        content(),
        views,
        SiteConfig::default(),
        IdentityConfig::default(),
    );

    folio::router(context)
}

async fn get(router: &Router, uri: &str) -> Response {
    router
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn community_post(user: Option<&str>, content: &str) -> Request<Body> {
    let mut request = Request::post("/community")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(user) = user {
        request = request
            .header("x-forwarded-user", user)
            .header("x-forwarded-preferred-username", "Grace Hopper");
    }

    let form = format!("content={}", content.replace(' ', "+"));
    request.body(Body::from(form)).unwrap()
}

async fn views_of(store: &dyn Store, slug: &str) -> i64 {
    store
        .views_count()
        .await
        .unwrap()
        .iter()
        .find(|record| record.slug == slug)
        .map(|record| record.count)
        .unwrap_or(0)
}

#[tokio::test]
async fn home_lists_three_newest_posts() {
    let app = app().await;

    let response = get(&app.router, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body(response).await;

    let fourth = html.find("Post fourth").unwrap();
    let third = html.find("Post third").unwrap();
    let second = html.find("Post second").unwrap();
    assert!(fourth < third && third < second);
    assert!(!html.contains("Post first"));
    assert!(html.contains("<title>"));
}

#[tokio::test]
async fn blog_index_lists_every_post() {
    let app = app().await;

    let html = body(get(&app.router, "/blog").await).await;

    for slug in ["first", "second", "third", "fourth"] {
        assert!(html.contains(&format!("/blog/{slug}")), "missing {slug}");
    }
}

#[tokio::test]
async fn post_page_counts_views() {
    let app = app().await;

    let response = get(&app.router, "/blog/second").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body(response).await;
    assert!(html.contains("0 views"));
    assert!(html.contains("(Updated March 5, 2024)"));
    assert!(html.contains("<em>second</em>"));
    assert!(html.contains(r#"<meta property="og:type" content="article">"#));

    let mut count = 0;
    for _ in 0..50 {
        count = views_of(app.store.as_ref(), "second").await;
        if count > 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(count, 1);
}

#[tokio::test]
async fn og_image_is_made_absolute_once() {
    let app = app().await;

    let html = body(get(&app.router, "/blog/local-image").await).await;
    assert!(html.contains(
        r#"<meta property="og:image" content="http://localhost:3000/images/cover.png">"#
    ));

    let html = body(get(&app.router, "/blog/remote-image").await).await;
    assert!(html.contains(r#"<meta property="og:image" content="https://cdn.example.com/a.png">"#));
    assert!(!html.contains("localhost:3000/https"));
}

#[tokio::test]
async fn same_day_update_is_not_shown() {
    let app = app().await;

    let html = body(get(&app.router, "/blog/third").await).await;

    assert!(!html.contains("Updated"));
}

#[tokio::test]
async fn unknown_post_is_not_found() {
    let app = app().await;

    let response = get(&app.router, "/blog/missing").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let html = body(response).await;
    assert!(html.contains("404 Not Found"));
    assert!(html.contains("<title>Not Found | Folio</title>"));

    assert_eq!(views_of(app.store.as_ref(), "missing").await, 0);
}

#[tokio::test]
async fn project_pages() {
    let app = app().await;

    let response = get(&app.router, "/projects/portfolio").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body(response).await.contains("Post portfolio"));

    let response = get(&app.router, "/projects/missing").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unmatched_route_renders_error_page() {
    let app = app().await;

    let response = get(&app.router, "/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body(response).await.contains("There is nothing here."));
}

#[tokio::test]
async fn empty_community() {
    let app = app().await;

    let html = body(get(&app.router, "/community").await).await;

    assert!(html.contains("lonely here. Be the first to post!"));
    assert!(!html.contains("community-posts"));
    assert!(html.contains("Sign in"));
}

#[tokio::test]
async fn anonymous_post_is_rejected() {
    let app = app().await;

    let response = app
        .router
        .clone()
        .oneshot(community_post(None, "hello there"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(app.store.community_posts().await.unwrap().is_empty());
}

#[tokio::test]
async fn anonymous_post_without_a_form_is_unauthorized() {
    let app = app().await;

    let request = Request::post("/community")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"content":"hi"}"#))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(body(response).await.contains("You need to sign in to do that."));
}

#[tokio::test]
async fn malformed_form_is_a_bad_request() {
    let app = app().await;

    let request = Request::post("/community")
        .header("x-forwarded-user", "user_1")
        .body(Body::from("content=hi"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body(response).await.contains("<title>Bad Request | Folio</title>"));
}

#[tokio::test]
async fn blank_post_is_rejected() {
    let app = app().await;

    let response = app
        .router
        .clone()
        .oneshot(community_post(Some("user_1"), "   "))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body(response)
        .await
        .contains("Posts must be between 1 and 500 characters"));
}

#[tokio::test]
async fn signed_in_post_is_listed() {
    let app = app().await;

    let response = app
        .router
        .clone()
        .oneshot(community_post(Some("user_1"), "hello there"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/community");

    let html = body(get(&app.router, "/community").await).await;
    assert!(html.contains("community-posts"));
    assert!(html.contains("hello there"));
    assert!(html.contains("Grace Hopper"));
}

/// A store whose backing database is gone.
struct Unavailable;

fn unavailable() -> store::Error {
    store::Error::Diesel(diesel::result::Error::NotFound)
}

#[async_trait]
impl Store for Unavailable {
    async fn views_count(&self) -> store::Result<Vec<ViewRecord>> {
        Err(unavailable())
    }

    async fn increment_views(&self, _slug: &str) -> store::Result<()> {
        Err(unavailable())
    }

    async fn community_posts(&self) -> store::Result<Vec<CommunityPost>> {
        Err(unavailable())
    }

    async fn create_community_post(&self, _post: NewCommunityPost) -> store::Result<CommunityPost> {
        Err(unavailable())
    }
}

#[tokio::test]
async fn pages_render_without_a_store() {
    let router = router_with(Arc::new(Unavailable));

    let response = get(&router, "/blog/first").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body(response).await.contains("0 views"));

    let response = get(&router, "/community").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!body(response).await.contains("community-posts"));
}
