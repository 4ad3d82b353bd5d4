//! API Module
//!
//! HTTP handlers and routing for the study backend REST API.
//!
//! # Endpoints
//! - `GET /` - Service banner
//! - `GET /health` - Health check endpoint
//! - `GET /stats` - Cache statistics
//! - `POST /curate-resources` - Curated learning resources for a subject
//! - `POST /generate-plan` - Study plan for a subject and exam date

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
