use anyhow::{anyhow, Result};
use diesel::{
    connection::SimpleConnection as _, Connection as _, ConnectionError, SqliteConnection,
};
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::{deadpool::Pool, ManagerConfig};
use diesel_async::sync_connection_wrapper::SyncConnectionWrapper;
use diesel_async::{AsyncConnection, SimpleAsyncConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use futures::FutureExt;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::Connection;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Per-connection settings. `busy_timeout` goes first so the rest wait on a locked file.
const PRAGMAS: &str = "
PRAGMA busy_timeout = 30000;
PRAGMA synchronous = NORMAL;
PRAGMA foreign_keys = ON;
";

/// Default database location: `$XDG_DATA_HOME/folio/db/database.sqlite3`.
pub fn default_database_path() -> Result<PathBuf> {
    Ok(xdg::BaseDirectories::with_prefix("folio/db")?.place_data_file("database.sqlite3")?)
}

/// Run pending migrations against `url`, then build the connection pool.
pub async fn connect(url: &str, pool_size: usize) -> Result<Pool<Connection>> {
    migrate(url).await?;

    let mut manager_config = ManagerConfig::default();
    manager_config.custom_setup = Box::new(|url| {
        async {
            let mut conn = SyncConnectionWrapper::<SqliteConnection>::establish(url).await?;
            conn.batch_execute(PRAGMAS)
                .await
                .map_err(ConnectionError::CouldntSetupConfiguration)?;

            Ok(conn)
        }
        .boxed()
    });

    let manager = AsyncDieselConnectionManager::<Connection>::new_with_config(url, manager_config);
    let pool = Pool::builder(manager).max_size(pool_size).build()?;

    debug!("database pool ready ({pool_size} connections) at {url}");

    Ok(pool)
}

async fn migrate(url: &str) -> Result<()> {
    let url = url.to_string();

    let applied = tokio::task::spawn_blocking(move || -> Result<usize> {
        let mut conn = SqliteConnection::establish(&url)?;
        // WAL is persisted in the database file, so it is switched once here
        // before any pooled connection exists.
        conn.batch_execute("PRAGMA busy_timeout = 30000; PRAGMA journal_mode = WAL;")?;
        let versions = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| anyhow!("failed to run migrations: {e}"))?;

        Ok(versions.len())
    })
    .await??;

    if applied > 0 {
        info!("applied {applied} database migration(s)");
    }

    Ok(())
}
