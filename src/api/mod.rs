//! HTTP API
//!
//! `POST /predict_insurance_premium/` takes raw user attributes and answers
//! with the predicted premium category.

pub mod error;

use std::net::SocketAddr;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::Method;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use crate::features::UserAttributes;
use crate::predict::Predictor;
use crate::{PremiumCategory, PremiumError, Result, ServerConfig};

pub use error::ApiError;

pub const PREDICT_PATH: &str = "/predict_insurance_premium/";

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub predictor: Predictor,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PremiumResponse {
    pub predicted_premium: PremiumCategory,
}

/// Build the application router
pub fn router(predictor: Predictor) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route(PREDICT_PATH, post(predict_premium))
        .route(PREDICT_PATH.trim_end_matches('/'), post(predict_premium))
        .layer(cors)
        .with_state(AppState { predictor })
}

/// Bind and serve until the process is stopped
pub async fn serve(config: &ServerConfig, predictor: Predictor) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| PremiumError::Config(format!("Invalid server address: {}", e)))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Listening on http://{}", addr);

    axum::serve(listener, router(predictor)).await?;
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

async fn predict_premium(
    State(state): State<AppState>,
    payload: std::result::Result<Json<UserAttributes>, JsonRejection>,
) -> std::result::Result<Json<PremiumResponse>, ApiError> {
    let Json(attrs) = payload?;

    let prediction = state.predictor.predict(&attrs)?;
    log::debug!(
        "Predicted {} for age={} city={:?} occupation={}",
        prediction.category,
        attrs.age,
        attrs.city,
        attrs.occupation
    );

    Ok(Json(PremiumResponse {
        predicted_premium: prediction.category,
    }))
}
