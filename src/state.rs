use sqlx::PgPool;
use tokio::sync::broadcast;

const EVENT_BUFFER: usize = 64;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub booking_events: broadcast::Sender<String>,
}

impl AppState {
    pub fn new(db: PgPool) -> Self {
        let (booking_events, _) = broadcast::channel(EVENT_BUFFER);
        Self { db, booking_events }
    }
}
