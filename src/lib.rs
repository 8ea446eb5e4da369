//! Travel planner API proxy library.

pub mod archive;
pub mod config;
pub mod flights;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod places;
pub mod samples;
pub mod upstream;

pub use config::schema::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
