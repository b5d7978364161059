//! Plaintext passwords, the password policy, and stored hashes.
//!
//! [`Password`] is the only place the policy is enforced. Anything holding a
//! `Password` has already passed it.

use std::fmt;

use thiserror::Error;
use zeroize::Zeroizing;

/// Minimum number of characters in a password.
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Reasons a candidate password fails the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PasswordPolicyViolation {
    /// Fewer than [`PASSWORD_MIN_LENGTH`] characters.
    #[error("password must be at least {min} characters long")]
    TooShort { min: usize },
    /// No ASCII letter.
    #[error("password must contain at least one letter")]
    MissingLetter,
    /// No ASCII digit.
    #[error("password must contain at least one digit")]
    MissingDigit,
}

/// A plaintext password that satisfies the policy.
///
/// The buffer is zeroed on drop and `Debug` never prints it.
///
/// # Examples
/// ```
/// use backend::domain::{Password, PasswordPolicyViolation};
///
/// assert!(Password::new("Passw0rd").is_ok());
/// assert_eq!(
///     Password::new("password").unwrap_err(),
///     PasswordPolicyViolation::MissingDigit,
/// );
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Check `raw` against the policy. Whitespace is kept as typed.
    pub fn new(raw: &str) -> Result<Self, PasswordPolicyViolation> {
        if raw.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(PasswordPolicyViolation::TooShort {
                min: PASSWORD_MIN_LENGTH,
            });
        }
        if !raw.chars().any(|c| c.is_ascii_alphabetic()) {
            return Err(PasswordPolicyViolation::MissingLetter);
        }
        if !raw.chars().any(|c| c.is_ascii_digit()) {
            return Err(PasswordPolicyViolation::MissingDigit);
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Borrow the plaintext for hashing.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// One-way, salted password hash as produced by a
/// [`PasswordHasher`](crate::domain::ports::PasswordHasher).
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash (for example a `$2b$...` bcrypt string).
    #[must_use]
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Passw0rd")]
    #[case("abcdefg1")]
    #[case("12345678a")]
    #[case("correct horse battery 9")]
    fn accepts_passwords_meeting_every_rule(#[case] raw: &str) {
        let password = Password::new(raw).expect("policy-compliant password");
        assert_eq!(password.expose(), raw);
    }

    #[rstest]
    #[case("", PasswordPolicyViolation::TooShort { min: 8 })]
    #[case("Pass0rd", PasswordPolicyViolation::TooShort { min: 8 })]
    #[case("12345678", PasswordPolicyViolation::MissingLetter)]
    #[case("éééééé12", PasswordPolicyViolation::MissingLetter)]
    #[case("Password", PasswordPolicyViolation::MissingDigit)]
    #[case("password!", PasswordPolicyViolation::MissingDigit)]
    fn rejects_passwords_breaking_a_rule(
        #[case] raw: &str,
        #[case] expected: PasswordPolicyViolation,
    ) {
        assert_eq!(Password::new(raw), Err(expected));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let password = Password::new("Passw0rd").expect("valid password");
        let hash = PasswordHash::new("$2b$10$secret");
        assert!(!format!("{password:?}").contains("Passw0rd"));
        assert!(!format!("{hash:?}").contains("secret"));
    }
}
