//! Standardized API response types.

use serde::{Deserialize, Serialize};

/// Error envelope returned by every failing request.
///
/// `error` is the user-facing (pt-BR) message, `detail` the specific
/// reason when one is safe to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,

    /// The HTTP status code.
    pub status: u16,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: u16, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            status,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    // Common error constructors
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(400, "Requisição inválida").with_detail(detail)
    }

    pub fn unauthorized() -> Self {
        Self::new(401, "Não autorizado")
    }

    pub fn not_found(error: impl Into<String>) -> Self {
        Self::new(404, error)
    }

    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::new(409, "Conflito ao salvar o post").with_detail(detail)
    }

    pub fn internal_error() -> Self {
        Self::new(500, "Erro interno do servidor")
    }
}

/// Plain acknowledgement, e.g. after a delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
