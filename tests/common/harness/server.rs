//! In-process fake of the remote note store.
//!
//! Serves the `/notes` REST API from a background thread so that both
//! blocking CLI tests and async client tests can talk to it.

#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

/// A note as the fake store keeps it. Serialized with a `_id` key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredNote {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct NoteBody {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: String,
}

#[derive(Default)]
struct StoreState {
    notes: Vec<(String, StoredNote)>,
    next_id: u64,
    requests: Vec<String>,
    /// Injected failure: method it applies to (any if `None`) and status.
    failure: Option<(Option<Method>, u16)>,
    empty_bodies: bool,
}

type Shared = Arc<Mutex<StoreState>>;

/// Running fake store; shuts down when dropped.
pub struct FakeNoteStore {
    url: String,
    state: Shared,
    shutdown: Option<oneshot::Sender<()>>,
}

impl FakeNoteStore {
    /// Starts the server on an ephemeral localhost port.
    pub fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(StoreState {
            next_id: 1,
            ..StoreState::default()
        }));
        let app = Router::new()
            .route("/notes/:user_id", get(list_notes).post(create_note))
            .route(
                "/notes/:user_id/:note_id",
                axum::routing::put(update_note).delete(delete_note),
            )
            .with_state(state.clone());

        let (addr_tx, addr_rx) = std::sync::mpsc::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("Failed to build fake store runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("Failed to bind fake store");
                addr_tx
                    .send(listener.local_addr().expect("Failed to read local addr"))
                    .expect("Failed to report fake store address");
                axum::serve(listener, app)
                    .with_graceful_shutdown(async {
                        let _ = shutdown_rx.await;
                    })
                    .await
                    .expect("Fake store failed");
            });
        });

        let addr = addr_rx.recv().expect("Fake store did not start");
        Self {
            url: format!("http://{}", addr),
            state,
            shutdown: Some(shutdown_tx),
        }
    }

    /// Base URL to pass as `--api-url`.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Adds a note for `user` and returns its id.
    pub fn seed(&self, user: &str, title: &str, content: &str, tags: &[&str]) -> String {
        let mut state = self.state.lock().unwrap();
        let note = new_note(&mut state, title, content, tags.iter().map(|t| t.to_string()).collect());
        state.notes.push((user.to_string(), note.clone()));
        note.id
    }

    /// Notes currently stored for `user`.
    pub fn notes(&self, user: &str) -> Vec<StoredNote> {
        let state = self.state.lock().unwrap();
        state
            .notes
            .iter()
            .filter(|(owner, _)| owner == user)
            .map(|(_, note)| note.clone())
            .collect()
    }

    /// Requests received so far, as `METHOD /path?query`.
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Makes the next request fail with `status`.
    pub fn fail_next(&self, status: u16) {
        self.state.lock().unwrap().failure = Some((None, status));
    }

    /// Makes the next request with `method` fail with `status`.
    pub fn fail_next_on(&self, method: &str, status: u16) {
        let method = Method::from_bytes(method.as_bytes()).expect("Invalid HTTP method");
        self.state.lock().unwrap().failure = Some((Some(method), status));
    }

    /// Makes create and update answer with an empty body.
    pub fn empty_bodies(&self) {
        self.state.lock().unwrap().empty_bodies = true;
    }
}

impl Drop for FakeNoteStore {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

fn new_note(state: &mut StoreState, title: &str, content: &str, tags: Vec<String>) -> StoredNote {
    let id = format!("64f0c2{:018x}", state.next_id);
    state.next_id += 1;
    StoredNote {
        id,
        title: title.to_string(),
        content: content.to_string(),
        tags,
    }
}

/// Records the request and consumes an injected failure, if any.
fn begin(state: &mut StoreState, method: &Method, uri: &Uri) -> Result<(), Response> {
    state.requests.push(format!("{} {}", method, uri));
    let applies = match &state.failure {
        Some((Some(only), _)) => only == method,
        Some((None, _)) => true,
        None => false,
    };
    if !applies {
        return Ok(());
    }
    let (_, status) = state.failure.take().expect("failure checked above");
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    Err((status, "injected failure").into_response())
}

fn echo(state: &StoreState, note: StoredNote) -> Response {
    if state.empty_bodies {
        StatusCode::OK.into_response()
    } else {
        Json(note).into_response()
    }
}

async fn list_notes(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    Path(user): Path<String>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let mut state = state.lock().unwrap();
    if let Err(failure) = begin(&mut state, &method, &uri) {
        return failure;
    }
    let needle = query.search.to_lowercase();
    let notes: Vec<StoredNote> = state
        .notes
        .iter()
        .filter(|(owner, _)| *owner == user)
        .map(|(_, note)| note)
        .filter(|note| {
            needle.is_empty()
                || note.title.to_lowercase().contains(&needle)
                || note.content.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();
    Json(notes).into_response()
}

async fn create_note(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    Path(user): Path<String>,
    Json(body): Json<NoteBody>,
) -> Response {
    let mut state = state.lock().unwrap();
    if let Err(failure) = begin(&mut state, &method, &uri) {
        return failure;
    }
    let note = new_note(&mut state, &body.title, &body.content, body.tags);
    state.notes.push((user, note.clone()));
    echo(&state, note)
}

async fn update_note(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    Path((user, note_id)): Path<(String, String)>,
    Json(body): Json<NoteBody>,
) -> Response {
    let mut state = state.lock().unwrap();
    if let Err(failure) = begin(&mut state, &method, &uri) {
        return failure;
    }
    let Some((_, note)) = state
        .notes
        .iter_mut()
        .find(|(owner, note)| *owner == user && note.id == note_id)
    else {
        return (StatusCode::NOT_FOUND, "note not found").into_response();
    };
    note.title = body.title;
    note.content = body.content;
    note.tags = body.tags;
    let updated = note.clone();
    echo(&state, updated)
}

async fn delete_note(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    Path((user, note_id)): Path<(String, String)>,
) -> Response {
    let mut state = state.lock().unwrap();
    if let Err(failure) = begin(&mut state, &method, &uri) {
        return failure;
    }
    let before = state.notes.len();
    state
        .notes
        .retain(|(owner, note)| !(*owner == user && note.id == note_id));
    if state.notes.len() == before {
        return (StatusCode::NOT_FOUND, "note not found").into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}
