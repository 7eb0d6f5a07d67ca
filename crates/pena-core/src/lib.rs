//! # Pena Core
//!
//! The domain layer of the Pena blog backend: posts, slugs, reading time,
//! the publish state machine and the post lifecycle service.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
pub use services::PostService;
