use axum::{extract::State, response::IntoResponse, Json};

use crate::{error::Error, services::Services};

pub mod accounts;
pub mod balances;
pub mod system;

// ==================== Health Handlers ====================

pub async fn health_check(State(services): State<Services>) -> Result<impl IntoResponse, Error> {
    let response = services.health.check_health().await;
    Ok(Json(response))
}
