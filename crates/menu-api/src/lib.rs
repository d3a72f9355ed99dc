//! # Menu API
//! 
//! HTTP handlers, router, and response envelope.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
