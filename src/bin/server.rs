//! TeamFlow HTTP server over a `PostgreSQL` store.
//!
//! Configuration comes from the environment: `DATABASE_URL` (required),
//! `TEAMFLOW_BIND_ADDR` (defaults to `127.0.0.1:3000`), and
//! `TEAMFLOW_DEFAULT_ACTOR` (optional UUID attributed to unauthenticated
//! mutations).

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::{Clock, DefaultClock};
use std::sync::Arc;
use teamflow::analytics::AnalyticsService;
use teamflow::api::{router, AppState};
use teamflow::config::ServerConfig;
use teamflow::summarize::{NoRemoteSummarizer, SummarizeService};
use teamflow::tracker::adapters::postgres::PgStore;
use teamflow::tracker::services::{ActivityService, BoardService, TaskService};
use tracing_subscriber::EnvFilter;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let manager = ConnectionManager::<PgConnection>::new(&config.database_url);
    let pool = Pool::builder().build(manager)?;
    let store = Arc::new(PgStore::new(pool));
    let clock: Arc<dyn Clock + Send + Sync> = Arc::new(DefaultClock);

    let state = AppState {
        tasks: TaskService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            clock.clone(),
            config.default_actor,
        ),
        boards: BoardService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            clock.clone(),
        ),
        activities: ActivityService::new(
            store.clone(),
            store.clone(),
            clock.clone(),
            config.default_actor,
        ),
        analytics: AnalyticsService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            clock.clone(),
        ),
        summarize: SummarizeService::new(Arc::new(NoRemoteSummarizer)),
        board_directory: store,
        default_actor: config.default_actor,
    };

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
