mod app;
mod auth;
mod config;
mod db;
mod error;
mod projects;
mod response;
mod state;
mod users;

use crate::auth::JwtKeys;
use crate::config::JwtConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "folio=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    // `folio issue-token <subject>` prints an admin bearer token and exits.
    let mut args = std::env::args().skip(1);
    if args.next().as_deref() == Some("issue-token") {
        let subject = args.next().unwrap_or_else(|| "admin".into());
        let token = JwtKeys::from(&JwtConfig::from_env()?).sign(&subject)?;
        println!("{token}");
        return Ok(());
    }

    let app_state = AppState::init().await?;
    tracing::info!(owner = ?app_state.owner(), "owner record resolved");

    app::serve(app::build_app(app_state)).await
}
