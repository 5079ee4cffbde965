//! Domain primitives, services, and ports.
//!
//! Purpose: keep the scoring engine and the credential store free of
//! transport and storage concerns. Inbound adapters translate requests into
//! these types; outbound adapters implement the traits in [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`) and ErrorCode for adapter mapping.
//! - TraceId for request correlation.
//! - questionnaire: catalogue, sentiment heuristic, scoring, tiering.
//! - Credentials, Username, PasswordDigest, UserAccount.
//! - CredentialService implementing the credential store driving port.

pub mod auth;
pub mod credential_service;
pub mod error;
pub mod ports;
pub mod questionnaire;
pub mod trace_id;
pub mod user;

pub use self::auth::{Credentials, CredentialsValidationError};
pub use self::credential_service::{BootstrapOutcome, CredentialService};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{PasswordDigest, USERNAME_MAX, UserAccount, UserValidationError, Username};
