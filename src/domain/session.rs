//! Signed-in user identity, passed explicitly to store operations.

use percent_encoding::percent_decode_str;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque identifier of the signed-in user, issued by the identity provider.
///
/// It is supplied from outside (the post-sign-in redirect, a flag, or the
/// stored session) and never generated locally.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

/// Error returned when a user id cannot be obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseUserIdError(String);

impl fmt::Display for ParseUserIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseUserIdError {}

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extracts the user id from the URL the provider redirects back to.
    ///
    /// The id is the path segment after `home/`, looked up first in the
    /// fragment (hash routing) and then in the path. A `userId` or
    /// `googleId` query parameter is accepted as well. Route segments are
    /// percent-decoded, as query values are.
    ///
    /// # Errors
    ///
    /// Returns `ParseUserIdError` if the URL is malformed or carries no id.
    pub fn from_redirect(redirect: &str) -> Result<Self, ParseUserIdError> {
        let url = Url::parse(redirect)
            .map_err(|e| ParseUserIdError(format!("invalid redirect URL '{}': {}", redirect, e)))?;

        let route = url
            .fragment()
            .and_then(segment_after_home)
            .or_else(|| segment_after_home(url.path()));
        let from_route = match route {
            Some(segment) => Some(
                percent_decode_str(segment)
                    .decode_utf8()
                    .map_err(|e| {
                        ParseUserIdError(format!("user id in '{}' is not UTF-8: {}", redirect, e))
                    })?
                    .into_owned(),
            ),
            None => None,
        };

        let from_query = || {
            url.query_pairs()
                .find(|(k, _)| k == "userId" || k == "googleId")
                .map(|(_, v)| v.into_owned())
        };

        match from_route.or_else(from_query) {
            Some(id) => id.parse(),
            None => Err(ParseUserIdError(format!(
                "no user id found in redirect URL '{}'",
                redirect
            ))),
        }
    }
}

fn segment_after_home(route: &str) -> Option<&str> {
    let mut segments = route.split(['/', '?']).filter(|s| !s.is_empty());
    segments.find(|s| *s == "home")?;
    segments.next()
}

impl FromStr for UserId {
    type Err = ParseUserIdError;

    /// Accepts the id verbatim; blank ids and ids with surrounding
    /// whitespace are rejected rather than altered.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ParseUserIdError("user id cannot be empty".to_string()));
        }
        if s.trim() != s {
            return Err(ParseUserIdError(format!(
                "user id '{}' has leading or trailing whitespace",
                s
            )));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for UserId {
    type Error = ParseUserIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId(\"{}\")", self.0)
    }
}

/// The authenticated context every store operation runs under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    user_id: UserId,
}

impl Session {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
}
