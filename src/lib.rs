use anyhow::Result;
use axum::{middleware, routing::get, Router};
use diesel::sqlite::SqliteConnection;
use diesel_async::sync_connection_wrapper::SyncConnectionWrapper;
use std::{sync::Arc, time::Duration};
use tokio::{signal, task::JoinHandle};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{info, warn};

mod auth;
pub mod cli;
pub mod config;
pub mod content;
mod context;
mod controller;
mod counter;
pub mod database;
mod error;
pub mod model;
mod schema;
pub mod site;
pub mod store;
pub mod view;

pub use {
    auth::{Identity, IdentityConfig, User},
    config::Config,
    context::AppContext,
    counter::ViewCounter,
    error::FolioError,
    store::{DieselStore, Store},
};

pub type Connection = SyncConnectionWrapper<SqliteConnection>;

/// How long shutdown waits for queued view increments.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

pub struct Folio {
    config: Config,
    context: AppContext,
    view_worker: JoinHandle<()>,
}

impl Folio {
    pub async fn boot(config: Config) -> Result<Self> {
        let content = content::ContentIndex::load(&config.content_dir)?;

        let database_url = config.database_url()?;
        let database = database::connect(&database_url, config.database_pool_size).await?;
        let store: Arc<dyn Store> = Arc::new(DieselStore::new(database));

        let (views, view_worker) = ViewCounter::spawn(store.clone(), config.view_queue_capacity);

        let context = AppContext::new(
            store,
            content,
            views,
            config.site.clone(),
            config.identity.clone(),
        );

        Ok(Self {
            config,
            context,
            view_worker,
        })
    }

    pub async fn serve(self) -> Result<()> {
        let Self {
            config,
            context,
            view_worker,
        } = self;

        let router = router(context).nest_service("/static", ServeDir::new(&config.static_dir));

        // Enable livereload for debug builds.
        #[cfg(debug_assertions)]
        let (router, _watcher) = livereload(router, &config.static_dir)?;

        let listener = tokio::net::TcpListener::bind(config.listen_address).await?;
        info!("listening on {}", listener.local_addr()?);

        axum::serve(listener, router.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        // The router owned the last view queue senders; the worker now drains and exits.
        if tokio::time::timeout(DRAIN_TIMEOUT, view_worker).await.is_err() {
            warn!("gave up waiting for queued view increments");
        }

        Ok(())
    }
}

/// Every page route, wrapped in the layout middleware.
pub fn router(context: AppContext) -> Router {
    Router::new()
        .route("/", get(controller::home))
        .route("/blog", get(controller::blog::index))
        .route("/blog/:slug", get(controller::blog::show))
        .route("/projects/:slug", get(controller::project::show))
        .route(
            "/community",
            get(controller::community::index).post(controller::community::create),
        )
        .fallback(|| async { FolioError::NotFound })
        .layer(middleware::map_response_with_state(
            context.clone(),
            view::render_view,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(context)
}

/// Insert `count` fake community posts.
pub async fn seed(config: &Config, count: usize) -> Result<()> {
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::lorem::en::Paragraph;
    use fake::faker::name::en::{FirstName, LastName};
    use fake::Fake;

    let database = database::connect(&config.database_url()?, 1).await?;
    let store = DieselStore::new(database);

    for _ in 0..count {
        let first_name: String = FirstName().fake();
        let last_name: String = LastName().fake();
        let author = User {
            id: format!("seed_{}", (100_000..999_999).fake::<u32>()),
            name: format!("{first_name} {last_name}"),
            email: Some(SafeEmail().fake()),
            avatar_url: Some(format!(
                "https://avatar.iran.liara.run/username?username={first_name}+{last_name}"
            )),
        };
        let content: String = Paragraph(1..3).fake();

        let post = store
            .create_community_post(model::NewCommunityPost::new(&author, content))
            .await?;
        info!("Added community post by: {}", post.author_name);
    }

    Ok(())
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutting down");
}

#[cfg(debug_assertions)]
fn livereload(
    router: Router,
    static_dir: &std::path::Path,
) -> Result<(Router, Option<notify::RecommendedWatcher>)> {
    use notify::Watcher;

    let livereload = tower_livereload::LiveReloadLayer::new();
    let reloader = livereload.reloader();

    let router = router.layer(livereload);

    if !static_dir.is_dir() {
        return Ok((router, None));
    }

    let mut watcher = notify::recommended_watcher(move |_| reloader.reload())?;
    watcher.watch(static_dir, notify::RecursiveMode::Recursive)?;

    Ok((router, Some(watcher)))
}
