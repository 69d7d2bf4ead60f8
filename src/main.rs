use score_api::{
    build_router,
    config::AppConfig,
    score::repository::{InMemoryScoreRepository, MySqlScoreRepository, ScoreRepository},
    shared::AppState,
    user::repository::{InMemoryUserRepository, MySqlUserRepository, UserRepository},
};
use sqlx::mysql::MySqlPoolOptions;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Repositories = (
    Arc<dyn UserRepository + Send + Sync>,
    Arc<dyn ScoreRepository + Send + Sync>,
);

async fn repositories(config: &AppConfig) -> Result<Repositories, sqlx::Error> {
    let Some(database) = &config.database else {
        warn!("DATABASE_URL not set, serving from empty in-memory repositories");
        let users: Arc<dyn UserRepository + Send + Sync> = Arc::new(InMemoryUserRepository::new());
        let scores: Arc<dyn ScoreRepository + Send + Sync> = Arc::new(InMemoryScoreRepository::new());
        return Ok((users, scores));
    };

    let pool = MySqlPoolOptions::new()
        .max_connections(database.max_connections)
        .connect(&database.url)
        .await?;
    info!(
        max_connections = database.max_connections,
        split_score_tables = config.split_score_tables,
        "Connected to database"
    );

    let users: Arc<dyn UserRepository + Send + Sync> =
        Arc::new(MySqlUserRepository::new(pool.clone()));
    let scores: Arc<dyn ScoreRepository + Send + Sync> =
        Arc::new(MySqlScoreRepository::new(pool, config.split_score_tables));
    Ok((users, scores))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "score_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting score API server");

    let config = AppConfig::from_env()?;
    let (user_repository, score_repository) = repositories(&config).await?;

    let bind_address = config.bind_address.clone();
    let app = build_router(AppState::new(user_repository, score_repository, config));

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Server running on http://{}", bind_address);
    axum::serve(listener, app).await?;

    Ok(())
}
