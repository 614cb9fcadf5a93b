use crate::AppState;
use axum::response::sse::{Event, Sse};
use axum::response::{IntoResponse, Response};
use futures::StreamExt;
use tokio_stream::wrappers::BroadcastStream;

pub async fn subscribe(state: AppState, session: Option<String>) -> Response {
    let stream = BroadcastStream::new(state.event_bus.subscribe()).filter_map(move |item| {
        let session = session.clone();
        async move {
            match item {
                Ok(record) => {
                    if let Some(filter) = session.as_deref() {
                        if record.session_id.as_deref() != Some(filter) {
                            return None;
                        }
                    }
                    let json =
                        serde_json::to_string(&record).unwrap_or_else(|_| "{}".to_string());
                    Some(Ok::<Event, std::convert::Infallible>(
                        Event::default().data(json),
                    ))
                }
                // Lagged receivers drop the missed records and continue.
                Err(_) => None,
            }
        }
    });
    Sse::new(stream).into_response()
}
