use chrono::NaiveDate;
use serde::Deserialize;

use super::{Error, Result};

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FrontMatter {
    pub title: String,
    pub summary: String,
    pub published_at: NaiveDate,
    pub updated_at: Option<NaiveDate>,
    pub image: Option<String>,
    pub slug: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

const FENCE: &str = "---";

/// Split a document into its YAML front matter and the markdown body.
pub fn split(source: &str) -> Option<(&str, &str)> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let rest = source.strip_prefix(FENCE)?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            let header = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((header, body));
        }
        offset += line.len();
    }

    None
}

pub fn parse(source: &str) -> Result<(FrontMatter, &str)> {
    let (header, body) = split(source).ok_or(Error::MissingFrontMatter)?;
    let front_matter = serde_yaml::from_str(header)?;

    Ok((front_matter, body))
}
