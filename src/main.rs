use std::{process::exit, sync::Arc};
use dotenv::dotenv;
use log::{info, warn};
use tracing_subscriber::filter::LevelFilter;
use config::Config;
use github::{ContentStore, GithubClient};

mod dto;
mod error;
mod config;
mod router;
mod github;
mod modules;
mod utils;

#[derive(Clone)]
pub struct AppState {
    pub env: Config,
    pub content_store: Arc<dyn ContentStore>,
}
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::DEBUG)
        .init();

    dotenv().ok();
    let config = match Config::init() {
        Ok(config) => config,
        Err(err) => {
            println!("🔥 Invalid configuration: {}", err);
            exit(1);
        }
    };
    let github_client = match GithubClient::new(&config) {
        Ok(client) => client,
        Err(err) => {
            println!("🔥 Failed to create the GitHub client: {}", err);
            exit(1);
        }
    };
    if config.github_user.is_empty() || config.github_repo.is_empty() {
        warn!("GITHUB_USER or GITHUB_REPO is empty, every comment will be rejected by the Content API");
    }
    info!("Loaded configuration: {:?}", config);
    let app_state = AppState {
        env: config.clone(),
        content_store: Arc::new(github_client),
    };
    let app = router::create_router(Arc::new(app_state));
    println!("🚀 Server is running on http://localhost:{}{}/post", &config.port, config.base_path());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", &config.port))
        .await.expect("Failed to bind address");
    axum::serve(listener, app).await.expect("Failed to run server");
}
