//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;

use crate::domain::ports::CredentialStore;
use crate::domain::questionnaire::Questionnaire;
use crate::inbound::http::state::HttpState;

/// Build a session middleware configured for tests.
///
/// Each call generates a fresh key, names the cookie `session`, and drops
/// the `Secure` flag for plain HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Handler state over the standard catalogue and the given credential store.
pub fn state_with(credentials: impl CredentialStore + 'static) -> HttpState {
    HttpState::new(Arc::new(Questionnaire::standard()), Arc::new(credentials))
}
