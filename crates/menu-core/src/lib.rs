//! # Menu Core
//! 
//! Domain entities, the menu tree builder, services, and the ports
//! (repository, URL resolver, renderer) the infrastructure implements.

pub mod domain;
pub mod ports;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
