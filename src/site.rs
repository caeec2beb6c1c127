use serde::{Deserialize, Serialize};

/// Who the site belongs to and what the home page shows.
#[derive(Clone, Debug, Deserialize, Serialize, confique::Config)]
pub struct SiteConfig {
    /// Site name, appended to page titles
    #[config(default = "Folio")]
    pub name: String,

    /// Author shown on the home page and next to posts
    #[config(default = "Anonymous")]
    pub author: String,

    /// Short introduction on the home page
    #[config(default = "Hi there, welcome to my corner of the internet.")]
    pub tagline: String,

    /// Default page description
    #[config(default = "Personal site, blog and community.")]
    pub description: String,

    /// Public url used for canonical and OpenGraph links, without a trailing slash
    #[config(default = "http://localhost:3000")]
    pub base_url: String,

    /// Avatar image path or url
    pub avatar: Option<String>,

    /// Cards in the home page grid
    #[config(default = [])]
    pub bento: Vec<BentoCard>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Folio".into(),
            author: "Anonymous".into(),
            tagline: "Hi there, welcome to my corner of the internet.".into(),
            description: "Personal site, blog and community.".into(),
            base_url: "http://localhost:3000".into(),
            avatar: None,
            bento: vec![],
        }
    }
}

impl SiteConfig {
    pub fn title(&self, page: &str) -> String {
        format!("{page} | {}", self.name)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    /// `reference` as an absolute url. Values that already carry a scheme are kept.
    pub fn absolute_url(&self, reference: &str) -> String {
        if reference.contains("://") || reference.starts_with("//") {
            reference.to_string()
        } else {
            self.url(&format!("/{}", reference.trim_start_matches('/')))
        }
    }

    pub fn initials(&self) -> String {
        crate::auth::initials(&self.author)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BentoKind {
    GitHub,
    YouTube,
    Instagram,
    Gumroad,
    Map,
}

/// A decorative card on the home page: a social profile or a map.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct BentoCard {
    pub kind: BentoKind,
    /// Card heading, or the location chip for maps
    pub label: String,
    pub handle: Option<String>,
    /// Profile link, or the embed url for maps
    pub url: Option<String>,
    pub count: Option<u32>,
    #[serde(default = "BentoCard::default_action")]
    pub action: String,
}

impl BentoCard {
    fn default_action() -> String {
        "Follow".to_string()
    }

    pub fn is_map(&self) -> bool {
        self.kind == BentoKind::Map
    }

    /// Maps span two columns.
    pub fn span(&self) -> u8 {
        if self.is_map() {
            2
        } else {
            1
        }
    }
}
