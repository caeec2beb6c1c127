use crate::{content::Project, site::SiteConfig};
use rinja::Template;
use std::sync::Arc;

#[derive(Clone, Template)]
#[template(path = "pages/project.html")]
pub struct ProjectPage {
    pub site: Arc<SiteConfig>,
    pub project: Arc<Project>,
}
