//! Registered user data model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum allowed length for a username, in characters.
pub const USERNAME_MAX: usize = 64;

/// Validation errors returned when constructing user values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Username was blank once trimmed.
    EmptyUsername,
    /// Username exceeded [`USERNAME_MAX`] characters.
    UsernameTooLong {
        /// Longest accepted username.
        max: usize,
    },
    /// Stored password digest was blank.
    EmptyPasswordDigest,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::EmptyPasswordDigest => write!(f, "password digest must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Unique login name, trimmed of surrounding whitespace.
///
/// # Examples
/// ```
/// use risk_appetite::domain::Username;
///
/// let name = Username::new("  ada ").expect("valid username");
/// assert_eq!(name.as_ref(), "ada");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = username.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Encoded password hash in PHC string format.
///
/// The digest carries its own algorithm, parameters and salt, so it can be
/// verified without any other stored state. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap an encoded digest read from storage or produced by a hasher.
    pub fn new(encoded: impl Into<String>) -> Result<Self, UserValidationError> {
        let encoded = encoded.into();
        if encoded.trim().is_empty() {
            return Err(UserValidationError::EmptyPasswordDigest);
        }
        Ok(Self(encoded))
    }

    /// Borrow the encoded digest.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

/// A registered account as held by the credential store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    username: Username,
    password_digest: PasswordDigest,
}

impl UserAccount {
    /// Build an account from its validated parts.
    pub fn new(username: Username, password_digest: PasswordDigest) -> Self {
        Self {
            username,
            password_digest,
        }
    }

    /// Login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Stored password hash.
    pub fn password_digest(&self) -> &PasswordDigest {
        &self.password_digest
    }
}
