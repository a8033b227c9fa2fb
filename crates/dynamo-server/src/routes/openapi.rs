//! OpenAPI documentation configuration.

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::{analyze, health};
use crate::state::AppState;

/// OpenAPI documentation for the Dynamo API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dynamo API",
        description = "Key-concept extraction from YouTube video transcripts",
        version = "1.0.0",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Local server"),
    ),
    paths(
        health::health,
        analyze::analyze_video_handler,
    ),
    components(
        schemas(
            health::HealthResponse,
            analyze::AnalyzeVideoRequest,
            analyze::AnalyzeVideoResponse,
            analyze::KeyConcept,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "analysis", description = "Video analysis"),
    )
)]
pub struct ApiDoc;

/// Swagger UI routes serving the generated document.
pub fn swagger_routes() -> Router<AppState> {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
