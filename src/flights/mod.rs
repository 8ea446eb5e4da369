//! Flight tracker proxy.
//!
//! # Data Flow
//! ```text
//! GET /flight-tracker?endpoint=&query=&limit=
//!     → http/flights.rs (parse & validate into ProxyRequest)
//!     → tracker.rs (credential check, URL build, one timed GET)
//!     → query.rs (flight number vs airport code → upstream param)
//!     → FlightEnvelope or FlightError
//! ```

pub mod query;
pub mod tracker;
pub mod types;

pub use query::QueryTerm;
pub use tracker::FlightTracker;
pub use types::{Endpoint, FlightEnvelope, FlightError, ProxyRequest};
