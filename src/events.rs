//! Realtime fan-out of booking activity to connected dashboards.
//!
//! This channel is display plumbing only: reservations are correct without
//! it, and a dropped event is recovered the next time a dashboard reloads
//! its booking list.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures_util::{Sink, SinkExt, StreamExt};
use serde::Serialize;
use tokio::sync::broadcast;

use crate::models::booking::Booking;
use crate::state::AppState;

#[derive(Serialize)]
struct BookingEvent<'a> {
    event: &'static str,
    booking: &'a Booking,
}

/// Publishes a committed booking to all connected subscribers. Send failures
/// (no subscribers) are ignored; the reservation has already committed.
pub fn publish_booking(tx: &broadcast::Sender<String>, booking: &Booking) {
    let payload = BookingEvent {
        event: "booking.created",
        booking,
    };
    match serde_json::to_string(&payload) {
        Ok(json) => {
            let _ = tx.send(json);
        }
        Err(e) => tracing::warn!(error = %e, "Failed to serialize booking event"),
    }
}

pub async fn booking_events_ws(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state.booking_events))
}

async fn handle_socket(socket: WebSocket, tx: broadcast::Sender<String>) {
    let (mut sender, mut receiver) = socket.split();
    let rx = tx.subscribe();

    // Drain inbound frames so pings and closes keep being processed; this
    // stream is push-only. Selecting over plain futures means the losing
    // branch is dropped the instant the other finishes, so a disconnecting
    // client tears the whole handler down without waiting for the next
    // broadcast message to fail.
    tokio::select! {
        _ = async { while let Some(Ok(_)) = receiver.next().await {} } => {},
        _ = forward_events(rx, &mut sender) => {},
    }
}

/// Copies broadcast messages into the client sink until either side goes
/// away: a closed channel ends the loop, and so does a failed send.
async fn forward_events<S>(mut rx: broadcast::Receiver<String>, sink: &mut S)
where
    S: Sink<Message> + Unpin,
{
    while let Ok(msg) = rx.recv().await {
        if sink.send(Message::Text(msg)).await.is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    struct CollectSink(Vec<Message>);

    impl Sink<Message> for CollectSink {
        type Error = ();

        fn poll_ready(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Result<(), ()>> {
            Poll::Ready(Ok(()))
        }

        fn start_send(self: Pin<&mut Self>, item: Message) -> Result<(), ()> {
            self.get_mut().0.push(item);
            Ok(())
        }

        fn poll_flush(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Result<(), ()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_close(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Result<(), ()>> {
            Poll::Ready(Ok(()))
        }
    }

    /// A sink whose client is gone; every send fails.
    struct ClosedSink;

    impl Sink<Message> for ClosedSink {
        type Error = ();

        fn poll_ready(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Result<(), ()>> {
            Poll::Ready(Err(()))
        }

        fn start_send(self: Pin<&mut Self>, _: Message) -> Result<(), ()> {
            Err(())
        }

        fn poll_flush(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Result<(), ()>> {
            Poll::Ready(Err(()))
        }

        fn poll_close(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Result<(), ()>> {
            Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn events_reach_the_client_until_the_channel_closes() {
        let (tx, rx) = broadcast::channel(8);
        tx.send(r#"{"event":"booking.created"}"#.to_string()).unwrap();
        drop(tx);

        let mut sink = CollectSink(Vec::new());
        forward_events(rx, &mut sink).await;

        assert_eq!(
            sink.0,
            vec![Message::Text(r#"{"event":"booking.created"}"#.to_string())]
        );
    }

    #[tokio::test]
    async fn forwarding_ends_as_soon_as_the_client_is_gone() {
        let (tx, rx) = broadcast::channel(8);
        tx.send("unreachable".to_string()).unwrap();

        // The sender stays alive, so the only way out of the loop is the
        // failed send. The await completing at all is the assertion.
        forward_events(rx, &mut ClosedSink).await;
        drop(tx);
    }
}
