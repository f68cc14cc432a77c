//! HTTP layer: `POST /chat` and `GET /health`, with permissive CORS.

pub mod error;
pub mod handlers;
pub mod router;
