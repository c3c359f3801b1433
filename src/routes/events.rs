use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::wrappers::WatchStream;
use tokio_stream::{Stream, StreamExt as _};

use crate::state::AppState;

/// Server-sent change feed: one event per store mutation, so an open page
/// can refresh when another tab (or another window on this machine) writes
/// the shared store. Best-effort notification only; no payload beyond the
/// collection size.
pub async fn stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let users = WatchStream::from_changes(state.directory.subscribe()).map(|profiles| {
        Ok::<_, Infallible>(
            Event::default()
                .event("users")
                .data(profiles.len().to_string()),
        )
    });

    let session = WatchStream::from_changes(state.session.subscribe()).map(|identity| {
        Ok::<_, Infallible>(Event::default().event("session").data(if identity.is_some() {
            "authenticated"
        } else {
            "anonymous"
        }))
    });

    let requests = WatchStream::from_changes(state.requests.subscribe()).map(|requests| {
        Ok::<_, Infallible>(
            Event::default()
                .event("requests")
                .data(requests.len().to_string()),
        )
    });

    Sse::new(users.merge(session).merge(requests)).keep_alive(KeepAlive::default())
}
