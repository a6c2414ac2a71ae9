use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use parkinghut_server::config::Config;
use parkinghut_server::db;
use parkinghut_server::routes::create_routes;
use parkinghut_server::state::AppState;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env();
    let pool = db::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Successfully connected to database");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    tracing::info!("Migrations run successfully");

    let app = create_routes(AppState::new(pool));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚗 Parking Hut API running at http://{}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}
