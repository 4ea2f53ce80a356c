//! Typed HTTP client for the remote note store API.

use reqwest::{Client, RequestBuilder, Response, Url};
use std::error::Error as _;
use std::time::Duration;
use tracing::{debug, warn};

use super::repository::{NoteStore, StoreError, StoreResult};
use crate::domain::{Note, NoteFields, NoteId, UserId};

/// Default deadline applied to every request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// `NoteStore` backed by the REST API under `/notes`.
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpNoteStore {
    base_url: Url,
    client: Client,
}

impl HttpNoteStore {
    /// Creates a client for the store at `base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidUrl` if `base_url` is not an http(s) URL.
    pub fn new(base_url: &str, timeout: Duration) -> StoreResult<Self> {
        let invalid = |reason: String| StoreError::InvalidUrl {
            url: base_url.to_string(),
            reason,
        };

        let mut url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(invalid("expected an http or https URL".to_string()));
        }
        url.set_query(None);
        url.set_fragment(None);

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| invalid(describe(&e)))?;

        Ok(Self {
            base_url: url,
            client,
        })
    }

    /// Returns the store's base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the browser URL that starts sign-in with `provider`.
    pub fn sign_in_url(&self, provider: &str) -> StoreResult<Url> {
        self.endpoint(&["auth", provider])
    }

    fn notes_url(&self, user: &UserId, id: Option<&NoteId>) -> StoreResult<Url> {
        match id {
            Some(id) => self.endpoint(&["notes", user.as_str(), id.as_str()]),
            None => self.endpoint(&["notes", user.as_str()]),
        }
    }

    fn endpoint(&self, segments: &[&str]) -> StoreResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot have path segments".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a request and turns transport failures and non-2xx statuses into errors.
    async fn execute(
        &self,
        method: &'static str,
        url: &Url,
        request: RequestBuilder,
    ) -> StoreResult<Response> {
        debug!(method, %url, "sending store request");
        let response = request.send().await.map_err(|e| StoreError::Network {
            method,
            url: url.to_string(),
            reason: describe(&e),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(method, %url, status = status.as_u16(), "store rejected request");
            return Err(StoreError::Rejected {
                method,
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn body_text(method: &'static str, url: &Url, response: Response) -> StoreResult<String> {
        response.text().await.map_err(|e| StoreError::Network {
            method,
            url: url.to_string(),
            reason: describe(&e),
        })
    }
}

/// Parses an optional note echoed back by create/update.
fn optional_note(url: &Url, body: &str) -> Option<Note> {
    if body.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(body) {
        Ok(note) => Some(note),
        Err(e) => {
            debug!(%url, error = %e, "response body is not a note; ignoring it");
            None
        }
    }
}

/// Flattens a reqwest error and its sources into one line.
fn describe(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        return "request timed out".to_string();
    }
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl NoteStore for HttpNoteStore {
    async fn list(&self, user: &UserId, search: &str) -> StoreResult<Vec<Note>> {
        let mut url = self.notes_url(user, None)?;
        url.query_pairs_mut().append_pair("search", search);

        let response = self
            .execute("GET", &url, self.client.get(url.clone()))
            .await?;
        let body = Self::body_text("GET", &url, response).await?;

        serde_json::from_str(&body).map_err(|e| StoreError::InvalidResponse {
            url: url.to_string(),
            reason: format!("expected a list of notes: {}", e),
        })
    }

    async fn create(&self, user: &UserId, fields: &NoteFields) -> StoreResult<Option<Note>> {
        let url = self.notes_url(user, None)?;
        let response = self
            .execute("POST", &url, self.client.post(url.clone()).json(fields))
            .await?;
        let body = Self::body_text("POST", &url, response).await?;
        Ok(optional_note(&url, &body))
    }

    async fn update(
        &self,
        user: &UserId,
        id: &NoteId,
        fields: &NoteFields,
    ) -> StoreResult<Option<Note>> {
        let url = self.notes_url(user, Some(id))?;
        let response = self
            .execute("PUT", &url, self.client.put(url.clone()).json(fields))
            .await?;
        let body = Self::body_text("PUT", &url, response).await?;
        Ok(optional_note(&url, &body))
    }

    async fn delete(&self, user: &UserId, id: &NoteId) -> StoreResult<()> {
        let url = self.notes_url(user, Some(id))?;
        self.execute("DELETE", &url, self.client.delete(url.clone()))
            .await?;
        Ok(())
    }
}
