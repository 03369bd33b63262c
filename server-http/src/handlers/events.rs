use crate::state::AppState;
use axum::{
    extract::State,
    http::Uri,
    response::sse::{Event, KeepAlive, Sse},
};
use checkin::Session;
use checkin::domain::id_key;
use checkin::events::AttendanceEvent;
use futures::stream::{Stream, StreamExt};
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventFilter {
    sessions: Vec<Session>,
    ids: Vec<String>,
}

impl EventFilter {
    /// Parse query string with CSV support for multiple values
    /// Examples: ?session=day1_fn,day1_an&id=BK2026001
    fn from_query_string(query: &str) -> Self {
        let mut filter = Self::default();

        for pair in query.split('&') {
            if let Some((key, value)) = pair.split_once('=') {
                let values = value.split(',').map(str::trim).filter(|v| !v.is_empty());
                match key {
                    "session" => {
                        filter
                            .sessions
                            .extend(values.filter_map(|v| v.parse::<Session>().ok()));
                    }
                    "id" => {
                        filter.ids.extend(values.map(id_key));
                    }
                    _ => {}
                }
            }
        }

        filter
    }

    fn should_send(&self, event: &AttendanceEvent) -> bool {
        if !self.sessions.is_empty() && !self.sessions.contains(&event.session) {
            return false;
        }

        if !self.ids.is_empty() && !self.ids.contains(&id_key(&event.id)) {
            return false;
        }

        true
    }
}

/// GET /api/events
///
/// Server-sent stream of attendance marks, for dashboards that want live updates.
pub async fn stream_events(
    State(state): State<AppState>,
    uri: Uri,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let filter = uri
        .query()
        .map(EventFilter::from_query_string)
        .unwrap_or_default();

    tracing::info!(
        "New SSE client connected. Filters: session={:?}, id={:?}",
        filter.sessions,
        filter.ids
    );

    let stream = BroadcastStream::new(state.event_channel.subscribe());

    let filtered_stream = stream.filter_map(move |result| {
        let filter = filter.clone();
        async move {
            match result {
                Ok(event) if filter.should_send(&event) => Some(Ok(to_sse_event(&event))),
                Ok(_) => None,
                Err(BroadcastStreamRecvError::Lagged(n)) => Some(Ok(Event::default()
                    .event("error")
                    .data(format!("Lagged by {} events", n)))),
            }
        }
    });

    Sse::new(filtered_stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

fn to_sse_event(event: &AttendanceEvent) -> Event {
    let event_builder = Event::default().event("attendance.marked");
    match serde_json::to_string(event) {
        Ok(json) => event_builder.data(json),
        Err(e) => {
            tracing::error!("Failed to serialize attendance event: {}", e);
            Event::default().event("error").data("serialization failed")
        }
    }
}
