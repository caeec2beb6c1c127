use confique::{yaml::FormatOptions, Config as _};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::PathBuf};

use crate::{auth::IdentityConfig, database, site::SiteConfig};
type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Confique(#[from] confique::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not determine config dir parent path")]
    ParentPath,

    #[error(transparent)]
    Xdg(#[from] xdg::BaseDirectoriesError),

    #[error("Could not determine database path: {0}")]
    DatabasePath(String),
}

#[derive(Clone, Debug, Serialize, Deserialize, confique::Config)]
pub struct Config {
    /// Address the http server listens on
    #[config(env = "FOLIO_LISTEN_ADDRESS", default = "127.0.0.1:3000")]
    pub listen_address: SocketAddr,

    /// Database url. Defaults to: $XDG_DATA_HOME/folio/db/database.sqlite3
    #[config(env = "FOLIO_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Database connection pool size
    #[config(default = 16)]
    pub database_pool_size: usize,

    /// Directory holding `blog/` and `projects/` markdown files
    #[config(default = "content")]
    pub content_dir: PathBuf,

    /// Directory served under /static
    #[config(default = "static")]
    pub static_dir: PathBuf,

    /// Pending view increments held before rendering starts deferring them
    #[config(default = 256)]
    pub view_queue_capacity: usize,

    /// Site details
    #[config(nested)]
    pub site: SiteConfig,

    /// Identity proxy integration
    #[config(nested)]
    pub identity: IdentityConfig,
}

impl Config {
    pub fn load(config_path: Option<PathBuf>) -> Result<Config> {
        let config_path = get_config_path(config_path)?;
        let config = Config::builder().env().file(config_path).load()?;

        Ok(config)
    }

    pub fn database_url(&self) -> Result<String> {
        if let Some(ref url) = self.database_url {
            return Ok(url.clone());
        }

        let path =
            database::default_database_path().map_err(|e| Error::DatabasePath(e.to_string()))?;
        path.to_str()
            .map(String::from)
            .ok_or_else(|| Error::DatabasePath(format!("{} is not valid utf-8", path.display())))
    }
}

pub fn init_config(config_path: Option<PathBuf>) -> Result<PathBuf> {
    let config_path = get_config_path(config_path)?;
    if config_path.exists() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("{} already exists", config_path.display()),
        )));
    }

    write_config_template(Some(config_path))
}

pub fn get_config_template() -> String {
    confique::yaml::template::<Config>(FormatOptions::default())
}

pub fn print_config_template() {
    println!("{}", get_config_template());
}

pub fn get_config_path(config_path: Option<PathBuf>) -> Result<PathBuf> {
    match config_path {
        Some(path) => Ok(path),
        None => {
            let xdg_dirs = xdg::BaseDirectories::with_prefix("folio")?;
            Ok(xdg_dirs.get_config_file("config.yml"))
        }
    }
}

pub fn write_config_template(config_path: Option<PathBuf>) -> Result<PathBuf> {
    let config_path = get_config_path(config_path)?;
    let config_template = get_config_template();

    let config_path_dir = config_path.parent().ok_or(Error::ParentPath)?;

    std::fs::create_dir_all(config_path_dir)?;
    std::fs::write(config_path.clone(), config_template)?;

    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_lists_every_section() {
        let template = get_config_template();

        assert!(template.contains("listen_address"));
        assert!(template.contains("view_queue_capacity"));
        assert!(template.contains("site:"));
        assert!(template.contains("identity:"));
    }

    #[test]
    fn loads_file_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(
            &path,
            "
database_url: /tmp/folio.sqlite3
site:
  name: Krasnokutskiy
  bento:
    - kind: map
      label: Zaporizhzha, UA
",
        )
        .unwrap();

        let config = Config::load(Some(path)).unwrap();

        assert_eq!(config.listen_address.port(), 3000);
        assert_eq!(config.database_url().unwrap(), "/tmp/folio.sqlite3");
        assert_eq!(config.site.name, "Krasnokutskiy");
        assert_eq!(config.site.bento.len(), 1);
        assert_eq!(config.identity.user_header, "x-forwarded-user");
        assert_eq!(config.content_dir, PathBuf::from("content"));
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.yml");

        assert_eq!(init_config(Some(path.clone())).unwrap(), path);
        assert!(init_config(Some(path)).is_err());
    }
}
