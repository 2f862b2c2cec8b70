use axum::Json;

use crate::api::models::HealthResponse;
use crate::config::settings::AppConfig;
use crate::database::DbPool;

pub mod matches;
pub mod players;
pub mod standings;
pub mod tournaments;

pub struct AppState {
    pub pool: DbPool,
    pub config: AppConfig,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
