//! Credentials supplied to registration and login.
//!
//! Inbound adapters build [`Credentials`] from raw strings before calling the
//! credential store, so blank input never reaches hashing or persistence.

use std::fmt;

use zeroize::Zeroizing;

use super::{UserValidationError, Username};

/// Domain error returned when credential values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Username failed validation.
    Username(UserValidationError),
    /// Password was empty.
    EmptyPassword,
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Username(err) => err.fmt(f),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Validated username and password pair.
///
/// ## Invariants
/// - `username` satisfies [`Username`] validation.
/// - `password` is non-empty and keeps caller whitespace; it is zeroed on drop.
///
/// # Examples
/// ```
/// use risk_appetite::domain::Credentials;
///
/// let creds = Credentials::try_from_parts(" ada ", "analytical engine").unwrap();
/// assert_eq!(creds.username().as_ref(), "ada");
/// assert_eq!(creds.password(), "analytical engine");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: Username,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let username = Username::new(username).map_err(CredentialsValidationError::Username)?;
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Login name used for lookups.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Cleartext password as supplied by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", CredentialsValidationError::Username(UserValidationError::EmptyUsername))]
    #[case("   ", "pw", CredentialsValidationError::Username(UserValidationError::EmptyUsername))]
    #[case("user", "", CredentialsValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: CredentialsValidationError,
    ) {
        let err = Credentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  ada  ", " padded secret ")]
    #[case("grace", "correct horse battery staple")]
    fn keeps_password_verbatim(#[case] username: &str, #[case] password: &str) {
        let creds = Credentials::try_from_parts(username, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.username().as_ref(), username.trim());
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    fn debug_redacts_password() {
        let creds = Credentials::try_from_parts("ada", "hunter2").expect("valid credentials");
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("ada"));
    }
}
