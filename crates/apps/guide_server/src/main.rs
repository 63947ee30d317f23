use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use catalog::austin::austin_landmarks;
use catalog::{Catalog, LandmarkRecord};
use guide::gateway::GuideGateway;
use guide::gemini::GeminiApi;
use guide::wire::{ChatRequest, ChatResponse};

#[derive(Clone)]
struct AppState {
    catalog: Arc<Catalog>,
    gateway: Arc<GuideGateway<GeminiApi>>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let addr: SocketAddr = env::var("GUIDE_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:9300".to_string())
        .parse()
        .expect("invalid GUIDE_ADDR");

    // A missing GEMINI_API_KEY is logged inside the gateway setup and
    // is not fatal; chat requests resolve to the apology string until
    // the credential is provided.
    let state = AppState {
        catalog: Arc::new(austin_landmarks()),
        gateway: Arc::new(GuideGateway::new(GeminiApi::from_env())),
    };

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/api/landmarks", get(get_landmarks))
        .route("/api/chat", post(post_chat))
        .layer(CorsLayer::permissive())
        .with_state(state);

    info!("guide server listening on http://{addr}");
    axum::serve(tokio::net::TcpListener::bind(addr).await.unwrap(), app)
        .await
        .unwrap();
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

async fn get_landmarks(State(state): State<AppState>) -> Json<Vec<LandmarkRecord>> {
    Json(state.catalog.records().to_vec())
}

/// Failures are already resolved to the apology string inside the
/// gateway, so this endpoint always answers 200 with text.
async fn post_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let text = state
        .gateway
        .reply(&request.prompt, &request.history)
        .await;
    Json(ChatResponse { text })
}
