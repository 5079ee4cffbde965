//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the questionnaire and the credential store port, and remain
//! testable without I/O.

use std::sync::Arc;

use crate::domain::ports::CredentialStore;
use crate::domain::questionnaire::Questionnaire;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Catalogue served to clients and used for scoring.
    pub questionnaire: Arc<Questionnaire>,
    /// Registration and login backend.
    pub credentials: Arc<dyn CredentialStore>,
}

impl HttpState {
    /// Construct state from the catalogue and a credential store.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use risk_appetite::domain::ports::{CredentialStore, CredentialStoreError};
    /// use risk_appetite::domain::questionnaire::Questionnaire;
    /// use risk_appetite::domain::Credentials;
    /// use risk_appetite::inbound::http::state::HttpState;
    ///
    /// struct Closed;
    ///
    /// #[async_trait::async_trait]
    /// impl CredentialStore for Closed {
    ///     async fn register(&self, _: &Credentials) -> Result<(), CredentialStoreError> {
    ///         Err(CredentialStoreError::storage_unavailable("closed"))
    ///     }
    ///     async fn validate(&self, _: &Credentials) -> Result<bool, CredentialStoreError> {
    ///         Ok(false)
    ///     }
    /// }
    ///
    /// let state = HttpState::new(Arc::new(Questionnaire::standard()), Arc::new(Closed));
    /// assert_eq!(state.questionnaire.questions().len(), 10);
    /// ```
    pub fn new(questionnaire: Arc<Questionnaire>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            questionnaire,
            credentials,
        }
    }
}
