//! Authored markdown documents, loaded once at startup and shared read-only.

use chrono::NaiveDate;
use pulldown_cmark::{html, Options, Parser};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::{debug, info};

mod front_matter;

pub use front_matter::FrontMatter;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read content: {0}")]
    Io(#[from] std::io::Error),

    #[error("document has no front matter")]
    MissingFrontMatter,

    #[error("invalid front matter: {0}")]
    FrontMatter(#[from] serde_yaml::Error),

    #[error("{path}: {source}")]
    Document {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    #[error("duplicate slug `{0}`")]
    DuplicateSlug(String),
}

const EXTENSIONS: [&str; 2] = ["md", "mdx"];
const DATE_FORMAT: &str = "%B %-d, %Y";

/// A blog post or project page.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub published_at: NaiveDate,
    pub updated_at: Option<NaiveDate>,
    pub image: Option<String>,
    pub tags: Vec<String>,
    /// Rendered HTML body
    pub body: String,
}

pub type BlogPost = Document;
pub type Project = Document;

impl Document {
    pub fn parse(slug: &str, source: &str) -> Result<Self> {
        let (front_matter, body) = front_matter::parse(source)?;

        let mut rendered = String::with_capacity(body.len() * 3 / 2);
        html::push_html(&mut rendered, Parser::new_ext(body, markdown_options()));

        Ok(Self {
            slug: front_matter.slug.unwrap_or_else(|| slug.to_string()),
            title: front_matter.title,
            summary: front_matter.summary,
            published_at: front_matter.published_at,
            updated_at: front_matter.updated_at,
            image: front_matter.image,
            tags: front_matter.tags,
            body: rendered,
        })
    }

    pub fn published(&self) -> String {
        self.published_at.format(DATE_FORMAT).to_string()
    }

    pub fn published_iso(&self) -> String {
        self.published_at.format("%Y-%m-%d").to_string()
    }

    /// The update date, only when it is later than the publish date.
    pub fn updated(&self) -> Option<String> {
        self.updated_at
            .filter(|updated_at| *updated_at > self.published_at)
            .map(|updated_at| updated_at.format(DATE_FORMAT).to_string())
    }
}

fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_SMART_PUNCTUATION
        | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Documents of one kind, newest first, addressable by slug.
#[derive(Clone, Debug, Default)]
pub struct Collection {
    documents: Vec<Arc<Document>>,
    slugs: HashMap<String, usize>,
}

impl Collection {
    pub fn new(mut documents: Vec<Document>) -> Result<Self> {
        documents.sort_by(|a, b| {
            b.published_at
                .cmp(&a.published_at)
                .then_with(|| a.slug.cmp(&b.slug))
        });

        let mut slugs = HashMap::with_capacity(documents.len());
        for (index, document) in documents.iter().enumerate() {
            if slugs.insert(document.slug.clone(), index).is_some() {
                return Err(Error::DuplicateSlug(document.slug.clone()));
            }
        }

        Ok(Self {
            documents: documents.into_iter().map(Arc::new).collect(),
            slugs,
        })
    }

    /// Load every markdown file directly inside `dir`. A missing directory is empty.
    pub fn load(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            debug!("content directory {} does not exist", dir.display());
            return Self::new(vec![]);
        }

        let mut documents = vec![];
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_markdown = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| EXTENSIONS.contains(&ext));
            if !path.is_file() || !is_markdown {
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            let document = std::fs::read_to_string(&path)
                .map_err(Error::from)
                .and_then(|source| Document::parse(stem, &source))
                .map_err(|source| Error::Document {
                    path: path.clone(),
                    source: Box::new(source),
                })?;
            documents.push(document);
        }

        Self::new(documents)
    }

    pub fn get(&self, slug: &str) -> Option<Arc<Document>> {
        self.slugs
            .get(slug)
            .map(|index| Arc::clone(&self.documents[*index]))
    }

    pub fn all(&self) -> Vec<Arc<Document>> {
        self.documents.clone()
    }

    pub fn recent(&self, limit: usize) -> Vec<Arc<Document>> {
        self.documents.iter().take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct ContentIndex {
    posts: Collection,
    projects: Collection,
}

impl ContentIndex {
    pub fn new(posts: Collection, projects: Collection) -> Self {
        Self { posts, projects }
    }

    /// Load `<dir>/blog` and `<dir>/projects`.
    pub fn load(dir: &Path) -> Result<Self> {
        let posts = Collection::load(&dir.join("blog"))?;
        let projects = Collection::load(&dir.join("projects"))?;

        info!(
            "loaded {} blog post(s) and {} project(s) from {}",
            posts.len(),
            projects.len(),
            dir.display()
        );

        Ok(Self::new(posts, projects))
    }

    pub fn post(&self, slug: &str) -> Option<Arc<BlogPost>> {
        self.posts.get(slug)
    }

    pub fn posts(&self) -> Vec<Arc<BlogPost>> {
        self.posts.all()
    }

    pub fn recent_posts(&self, limit: usize) -> Vec<Arc<BlogPost>> {
        self.posts.recent(limit)
    }

    pub fn project(&self, slug: &str) -> Option<Arc<Project>> {
        self.projects.get(slug)
    }
}
