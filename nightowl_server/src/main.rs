mod docs;
mod error;
mod generate_schedule;
mod info;
mod router;
mod state;

use std::env;

use dotenvy::dotenv;
use router::router;

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let server_domain = env::var("SERVER_DOMAIN").unwrap_or("localhost:3000".to_string());

    let app = router();

    let listener = tokio::net::TcpListener::bind(&server_domain).await?;

    log::info!("Night owl planner listening on {}", server_domain);

    axum::serve(listener, app).await?;

    Ok(())
}
