//! Risk appetite questionnaire scoring behind a session-gated login.
//!
//! Layout follows ports and adapters: [`domain`] holds the scoring engine
//! and the credential store service, [`inbound`] the Actix handlers, and
//! [`outbound`] the SQLite and Argon2 adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
