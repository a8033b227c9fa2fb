//! API routes.

pub mod analyze;
pub mod health;
pub mod openapi;

pub use analyze::{AnalyzeVideoRequest, AnalyzeVideoResponse, KeyConcept, analyze_video_handler};
pub use health::{HealthResponse, health_routes};
pub use openapi::swagger_routes;
