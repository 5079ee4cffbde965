//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay free of `utoipa` derives; these wrappers describe their
//! wire shape for the generated document.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or an answer fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Login is missing or the credentials did not match.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The username is already registered.
    #[schema(rename = "conflict")]
    Conflict,
    /// Credential storage could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "invalid answer for question `investment_horizon`: 4 is outside 1..=3")]
    message: String,
    /// Correlation identifier matching the `trace-id` response header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Machine-readable context such as the offending field or question.
    details: Option<serde_json::Value>,
}
