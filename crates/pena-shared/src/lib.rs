//! # Pena Shared
//!
//! Wire types shared between the API server and its clients.
//! Everything here serializes as camelCase JSON.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, MessageResponse};
