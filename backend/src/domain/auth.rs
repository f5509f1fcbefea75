//! Authentication primitives: credentials, registration input, and tokens.
//!
//! Inbound adapters build these from raw strings; services only ever see the
//! validated forms. Passwords are held in [`Zeroizing`] buffers and hashed
//! with Argon2id before they reach a repository.

use std::fmt;

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use zeroize::Zeroizing;

/// Longest username the accounts table accepts.
pub const USERNAME_MAX_CHARS: usize = 150;

const TOKEN_BYTES: usize = 20;
const SALT_BYTES: usize = 16;

/// Validation failures for login and registration payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Username exceeded [`USERNAME_MAX_CHARS`].
    UsernameTooLong,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooLong => {
                write!(f, "username must be at most {USERNAME_MAX_CHARS} characters")
            }
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Validated username/password pair.
///
/// ## Invariants
/// - `username` is trimmed, non-empty, and at most [`USERNAME_MAX_CHARS`].
/// - `password` is non-empty; surrounding whitespace is preserved.
///
/// # Examples
/// ```
/// use timecapsule::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ada ", "hunter2").expect("valid");
/// assert_eq!(creds.username(), "ada");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(CredentialsValidationError::EmptyUsername);
        }
        if normalized.chars().count() > USERNAME_MAX_CHARS {
            return Err(CredentialsValidationError::UsernameTooLong);
        }
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised username.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password exactly as supplied.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Registration input: credentials plus the initial profile fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    /// Login credentials for the new account.
    pub credentials: LoginCredentials,
    /// Initial biography.
    pub bio: String,
    /// Initial horizontal coordinate.
    pub location_x: f64,
    /// Initial vertical coordinate.
    pub location_y: f64,
}

/// Opaque bearer token presented as `Authorization: Token <key>`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AuthToken(String);

impl AuthToken {
    /// Generate a new random 40 character hex token.
    #[must_use]
    pub fn generate() -> Self {
        let bytes: [u8; TOKEN_BYTES] = rand::random();
        Self(hex::encode(bytes))
    }

    /// Wrap a token supplied by a client or loaded from storage.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Token key.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Failure while hashing or parsing a stored password hash.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("password hashing failed: {message}")]
pub struct PasswordHashError {
    message: String,
}

/// Hash a password with Argon2id into a PHC string.
pub fn hash_password(password: &str) -> Result<String, PasswordHashError> {
    let salt_bytes: [u8; SALT_BYTES] = rand::random();
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|err| PasswordHashError {
        message: err.to_string(),
    })?;
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| PasswordHashError {
            message: err.to_string(),
        })
}

/// Check a password against a stored PHC hash.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, PasswordHashError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|err| PasswordHashError {
        message: err.to_string(),
    })?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
