//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → route handler (flights, places, map, reminders, download)
//!     → response.rs (errors rendered as the JSON envelope)
//!     → Send to client
//! ```

pub mod download;
pub mod flights;
pub mod map;
pub mod places;
pub mod reminders;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use response::ApiError;
pub use server::{build_places_router, build_router, AppState, HttpServer};
