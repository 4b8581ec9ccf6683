use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderName, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::builder::RecipeRequestBuilder;
use crate::error::{GenerationError, SetupError};
use crate::generator::RecipeGenerator;
use crate::model::{GenerationRequest, Recipe};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// JSON error response: `{"error": "<message>"}`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        Self {
            status: StatusCode::from_u16(err.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            message: err.message().to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct GenerateRecipeBody {
    /// Missing and `null` both mean no ingredients
    #[serde(default)]
    pub ingredients: Option<Vec<String>>,
    #[serde(default)]
    pub dietary: Option<String>,
    /// Number or numeric text; anything else becomes 1
    #[serde(default)]
    pub servings: Value,
}

#[derive(Debug, Serialize)]
pub struct GenerateRecipeResponse {
    pub recipe: Recipe,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct AppState {
    generator: Arc<dyn RecipeGenerator>,
}

pub fn build_router(generator: Arc<dyn RecipeGenerator>) -> Router {
    Router::new()
        .route("/generate-recipe", post(generate_recipe))
        .route("/health", get(health))
        .layer(cors_layer())
        .with_state(AppState { generator })
}

/// Browser clients call from any origin; OPTIONS preflights get no body.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::GET, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
        ])
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub async fn serve(generator: Arc<dyn RecipeGenerator>, address: &str) -> Result<(), SetupError> {
    let addr: SocketAddr = address.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Recipe gateway listening on http://{}", addr);
    axum::serve(listener, build_router(generator))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Recipe gateway shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn generate_recipe(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GenerateRecipeResponse>, ApiError> {
    let body: GenerateRecipeBody = serde_json::from_slice(&body).map_err(|e| {
        error!("Error in generate-recipe handler: {}", e);
        ApiError::internal(format!("Invalid request body: {e}"))
    })?;
    info!(
        "Generating recipe for: ingredients={:?} dietary={:?} servings={}",
        body.ingredients, body.dietary, body.servings
    );

    let request = request_from_body(&body)?;
    let recipe = state.generator.generate(request).await?;
    Ok(Json(GenerateRecipeResponse { recipe }))
}

/// Run the inbound body through the same rules as the form
fn request_from_body(body: &GenerateRecipeBody) -> Result<GenerationRequest, ApiError> {
    let mut form = RecipeRequestBuilder::new();

    // Blank and repeated entries are skipped rather than rejected
    for ingredient in body.ingredients.iter().flatten() {
        if let Err(e) = form.add_ingredient(ingredient) {
            debug!("Skipping ingredient {:?}: {}", ingredient, e);
        }
    }
    if form.ingredients().is_empty() {
        return Err(GenerationError::no_ingredients().into());
    }

    match body.dietary.as_deref().map(str::trim) {
        None | Some("") => {}
        Some(dietary) => form
            .set_dietary(dietary)
            .map_err(|e| ApiError::bad_request(e.to_string()))?,
    }

    match &body.servings {
        Value::Number(n) => form.set_servings(
            n.as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(1),
        ),
        Value::String(s) => form.set_servings_input(s),
        _ => form.set_servings(1),
    }

    form.submit()
        .map_err(|_| ApiError::from(GenerationError::no_ingredients()))
}
