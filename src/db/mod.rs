use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub mod bookings;
pub mod spaces;
pub mod users;

pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
}
