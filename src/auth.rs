use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, HeaderMap},
};
use serde::{Deserialize, Serialize};
use std::{convert::Infallible, sync::Arc};

/// Where the identity proxy in front of the site puts the signed-in user.
#[derive(Clone, Debug, Deserialize, Serialize, confique::Config)]
pub struct IdentityConfig {
    /// Header holding the stable user id. Requests without it are anonymous.
    #[config(default = "x-forwarded-user")]
    pub user_header: String,

    /// Header holding the display name
    #[config(default = "x-forwarded-preferred-username")]
    pub name_header: String,

    /// Header holding the primary email address
    #[config(default = "x-forwarded-email")]
    pub email_header: String,

    /// Header holding the avatar image url
    #[config(default = "x-auth-request-avatar")]
    pub avatar_header: String,

    /// Sign in url, the community page is passed along as the redirect target
    #[config(default = "/oauth2/start?rd=/community")]
    pub sign_in_url: String,

    /// Sign out url
    #[config(default = "/oauth2/sign_out?rd=/community")]
    pub sign_out_url: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            user_header: "x-forwarded-user".into(),
            name_header: "x-forwarded-preferred-username".into(),
            email_header: "x-forwarded-email".into(),
            avatar_header: "x-auth-request-avatar".into(),
            sign_in_url: "/oauth2/start?rd=/community".into(),
            sign_out_url: "/oauth2/sign_out?rd=/community".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

impl User {
    pub fn from_headers(headers: &HeaderMap, config: &IdentityConfig) -> Option<Self> {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|value| std::str::from_utf8(value.as_bytes()).ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(String::from)
        };

        let id = header(&config.user_header)?;
        let name = header(&config.name_header).unwrap_or_else(|| id.clone());

        Some(Self {
            id,
            name,
            email: header(&config.email_header),
            avatar_url: header(&config.avatar_header),
        })
    }

    pub fn initials(&self) -> String {
        initials(&self.name)
    }
}

/// First letter of the first and last word of `name`, uppercased.
pub fn initials(name: &str) -> String {
    let mut words = name.split_whitespace();
    let first = words.next().and_then(|word| word.chars().next());
    let last = words.last().and_then(|word| word.chars().next());

    first
        .into_iter()
        .chain(last)
        .flat_map(char::to_uppercase)
        .collect()
}

/// The signed-in user, if any, as reported by the identity proxy.
#[derive(Clone, Debug)]
pub struct Identity(pub Option<User>);

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
    Arc<IdentityConfig>: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = Arc::<IdentityConfig>::from_ref(state);
        let user = User::from_headers(&parts.headers, &config);

        if let Some(ref user) = user {
            tracing::trace!("request identified as {}", user.id);
        }

        Ok(Self(user))
    }
}
