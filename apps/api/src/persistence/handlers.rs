use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::{self, Stream};

use crate::state::AppState;

/// GET /api/v1/events
/// One `resume` event per write of the live document, carrying its raw JSON.
/// Other tabs of the builder reload their view when it arrives.
pub async fn handle_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let subscription = state.persistence.subscribe_document();
    tracing::debug!(key = subscription.key(), "Event stream opened");
    let events = stream::unfold(subscription, |mut subscription| async move {
        let value = subscription.changed().await?;
        Some((Ok(Event::default().event("resume").data(value)), subscription))
    });
    Sse::new(events).keep_alive(KeepAlive::default())
}
