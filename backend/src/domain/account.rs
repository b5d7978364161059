//! Account aggregate and the value types it is built from.
//!
//! Every value type validates on construction, so an [`Account`] can only
//! hold a trimmed username and email, a known role, well-formed phone numbers
//! and an opaque password hash.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::PasswordHash;

/// Validation errors raised by the account value types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountValidationError {
    /// Username was blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Email was blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Role was not one of the known roles.
    #[error("role must be either landlord or customer")]
    UnknownRole,
    /// Phone number did not match `+91` followed by ten digits.
    #[error("phone number must follow the format +91XXXXXXXXXX")]
    InvalidPhoneNumber,
}

/// Storage identifier for an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an identifier read back from storage.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// The underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

fn trimmed_non_empty(
    raw: &str,
    empty: AccountValidationError,
) -> Result<String, AccountValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(empty);
    }
    Ok(trimmed.to_owned())
}

/// Human-chosen account label, unique across accounts.
///
/// # Examples
/// ```
/// use backend::domain::Username;
///
/// let username = Username::new("  alice ").expect("valid username");
/// assert_eq!(username.as_ref(), "alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Trim and validate a username.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        trimmed_non_empty(raw.as_ref(), AccountValidationError::EmptyUsername).map(Self)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Login identifier, unique across accounts.
///
/// Only surrounding whitespace is removed; comparisons are exact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Trim and validate an email address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        trimmed_non_empty(raw.as_ref(), AccountValidationError::EmptyEmail).map(Self)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the account holder does on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Lists properties for rent.
    Landlord,
    /// Browses and enquires about properties.
    Customer,
}

impl Role {
    /// Wire and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Landlord => "landlord",
            Self::Customer => "customer",
        }
    }
}

impl FromStr for Role {
    type Err = AccountValidationError;

    /// Parse a role. Matching is exact: `Landlord` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "landlord" => Ok(Self::Landlord),
            "customer" => Ok(Self::Customer),
            _ => Err(AccountValidationError::UnknownRole),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static PHONE_NUMBER_RE: OnceLock<Regex> = OnceLock::new();

fn phone_number_regex() -> &'static Regex {
    PHONE_NUMBER_RE.get_or_init(|| {
        // `\d` matches any Unicode digit in the regex crate; keep it ASCII.
        Regex::new(r"^\+91[0-9]{10}$")
            .unwrap_or_else(|error| panic!("phone number regex failed to compile: {error}"))
    })
}

/// Indian mobile number: `+91` followed by exactly ten digits.
///
/// # Examples
/// ```
/// use backend::domain::PhoneNumber;
///
/// assert!(PhoneNumber::new("+919876543210").is_ok());
/// assert!(PhoneNumber::new("+9112345").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validate a phone number. Whitespace is not stripped.
    pub fn new(raw: impl Into<String>) -> Result<Self, AccountValidationError> {
        let raw = raw.into();
        if !phone_number_regex().is_match(&raw) {
            return Err(AccountValidationError::InvalidPhoneNumber);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered account.
///
/// ## Invariants
/// - `password_hash` is a one-way derivation; plaintext is never held here.
/// - The type does not implement `Serialize`, so the hash cannot leak into a
///   response by accident. Adapters project the public fields explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: AccountId,
    username: Username,
    email: EmailAddress,
    password_hash: PasswordHash,
    role: Role,
    phone: PhoneNumber,
    whatsapp_number: PhoneNumber,
    created_at: DateTime<Utc>,
}

/// Components used to assemble an [`Account`].
#[derive(Debug, Clone)]
pub struct AccountParts {
    pub id: AccountId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: PasswordHash,
    pub role: Role,
    pub phone: PhoneNumber,
    pub whatsapp_number: PhoneNumber,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Assemble an account from validated parts.
    #[must_use]
    pub fn new(parts: AccountParts) -> Self {
        let AccountParts {
            id,
            username,
            email,
            password_hash,
            role,
            phone,
            whatsapp_number,
            created_at,
        } = parts;
        Self {
            id,
            username,
            email,
            password_hash,
            role,
            phone,
            whatsapp_number,
            created_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> AccountId {
        self.id
    }

    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Stored credential hash. Never send this to a client.
    #[must_use]
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    #[must_use]
    pub fn whatsapp_number(&self) -> &PhoneNumber {
        &self.whatsapp_number
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
