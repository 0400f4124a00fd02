use std::time::Duration;

use reqwest::Client;
use sqlx::PgPool;

use crate::config::Config;

/// Upper bound on a single model call.
const HTTP_TIMEOUT: Duration = Duration::from_secs(120);

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Holds no model credential: each request builds its own `LlmClient` from the
/// caller's stored key on top of the shared HTTP connection pool.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub http: Client,
    pub config: Config,
}

impl AppState {
    pub fn new(db: PgPool, config: Config) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(HTTP_TIMEOUT).build()?;
        Ok(Self { db, http, config })
    }
}
