//! Signup input validation.
//!
//! [`Registration::try_from_parts`] is the single authoritative check for
//! signup payloads. Rules are applied in a fixed order and the first failure
//! is reported:
//!
//! 1. every field is present and non-empty
//! 2. the role is `landlord` or `customer`
//! 3. `phone`, then `whatsappNumber`, match `+91` plus ten digits
//! 4. the password satisfies the password policy

use std::fmt;

use thiserror::Error;

use super::{EmailAddress, Password, PasswordPolicyViolation, PhoneNumber, Role, Username};

/// Signup payload fields, named as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationField {
    Username,
    Email,
    Password,
    Role,
    Phone,
    WhatsappNumber,
}

impl RegistrationField {
    /// Wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
            Self::Password => "password",
            Self::Role => "role",
            Self::Phone => "phone",
            Self::WhatsappNumber => "whatsappNumber",
        }
    }
}

impl fmt::Display for RegistrationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a signup payload was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistrationValidationError {
    /// A field was absent or blank.
    #[error("{0} is required")]
    MissingField(RegistrationField),
    /// Role outside the known set.
    #[error("role must be either landlord or customer")]
    InvalidRole,
    /// `phone` or `whatsappNumber` is not `+91` followed by ten digits.
    #[error("{0} must follow the format +91XXXXXXXXXX")]
    InvalidPhoneFormat(RegistrationField),
    /// Password fails the policy.
    #[error(transparent)]
    WeakPassword(#[from] PasswordPolicyViolation),
}

/// Raw signup values as received from a client.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistrationParts<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub role: &'a str,
    pub phone: &'a str,
    pub whatsapp_number: &'a str,
}

/// A validated signup request ready for the account service.
#[derive(Debug, Clone)]
pub struct Registration {
    username: Username,
    email: EmailAddress,
    password: Password,
    role: Role,
    phone: PhoneNumber,
    whatsapp_number: PhoneNumber,
}

impl Registration {
    /// Validate raw signup values.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{Registration, RegistrationParts, Role};
    ///
    /// let registration = Registration::try_from_parts(RegistrationParts {
    ///     username: "alice",
    ///     email: "a@x.com",
    ///     password: "Passw0rd",
    ///     role: "customer",
    ///     phone: "+919876543210",
    ///     whatsapp_number: "+919876543210",
    /// })
    /// .expect("valid registration");
    /// assert_eq!(registration.role(), Role::Customer);
    /// ```
    pub fn try_from_parts(
        parts: RegistrationParts<'_>,
    ) -> Result<Self, RegistrationValidationError> {
        Self::require_all_fields(&parts)?;

        let username = Username::new(parts.username)
            .map_err(|_| RegistrationValidationError::MissingField(RegistrationField::Username))?;
        let email = EmailAddress::new(parts.email)
            .map_err(|_| RegistrationValidationError::MissingField(RegistrationField::Email))?;
        let role = parts
            .role
            .parse::<Role>()
            .map_err(|_| RegistrationValidationError::InvalidRole)?;
        let phone = PhoneNumber::new(parts.phone).map_err(|_| {
            RegistrationValidationError::InvalidPhoneFormat(RegistrationField::Phone)
        })?;
        let whatsapp_number = PhoneNumber::new(parts.whatsapp_number).map_err(|_| {
            RegistrationValidationError::InvalidPhoneFormat(RegistrationField::WhatsappNumber)
        })?;
        let password = Password::new(parts.password)?;

        Ok(Self {
            username,
            email,
            password,
            role,
            phone,
            whatsapp_number,
        })
    }

    fn require_all_fields(
        parts: &RegistrationParts<'_>,
    ) -> Result<(), RegistrationValidationError> {
        let fields = [
            (RegistrationField::Username, parts.username.trim()),
            (RegistrationField::Email, parts.email.trim()),
            (RegistrationField::Password, parts.password),
            (RegistrationField::Role, parts.role),
            (RegistrationField::Phone, parts.phone),
            (RegistrationField::WhatsappNumber, parts.whatsapp_number),
        ];
        match fields.iter().find(|(_, value)| value.is_empty()) {
            Some((field, _)) => Err(RegistrationValidationError::MissingField(*field)),
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    #[must_use]
    pub fn password(&self) -> &Password {
        &self.password
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn valid_parts() -> RegistrationParts<'static> {
        RegistrationParts {
            username: "alice",
            email: "a@x.com",
            password: "Passw0rd",
            role: "customer",
            phone: "+919876543210",
            whatsapp_number: "+919876543210",
        }
    }

    #[rstest]
    fn accepts_valid_parts(valid_parts: RegistrationParts<'static>) {
        let registration = Registration::try_from_parts(valid_parts).expect("valid parts");
        assert_eq!(registration.username().as_ref(), "alice");
        assert_eq!(registration.email().as_ref(), "a@x.com");
        assert_eq!(registration.role(), Role::Customer);
        assert_eq!(registration.password().expose(), "Passw0rd");
        assert_eq!(registration.whatsapp_number().as_ref(), "+919876543210");
    }

    #[rstest]
    fn trims_username_and_email(valid_parts: RegistrationParts<'static>) {
        let registration = Registration::try_from_parts(RegistrationParts {
            username: "  alice ",
            email: " a@x.com\t",
            ..valid_parts
        })
        .expect("valid parts");
        assert_eq!(registration.username().as_ref(), "alice");
        assert_eq!(registration.email().as_ref(), "a@x.com");
    }

    #[rstest]
    #[case(RegistrationField::Username)]
    #[case(RegistrationField::Email)]
    #[case(RegistrationField::Password)]
    #[case(RegistrationField::Role)]
    #[case(RegistrationField::Phone)]
    #[case(RegistrationField::WhatsappNumber)]
    fn reports_each_missing_field(
        valid_parts: RegistrationParts<'static>,
        #[case] field: RegistrationField,
    ) {
        let mut parts = valid_parts;
        match field {
            RegistrationField::Username => parts.username = "",
            RegistrationField::Email => parts.email = "",
            RegistrationField::Password => parts.password = "",
            RegistrationField::Role => parts.role = "",
            RegistrationField::Phone => parts.phone = "",
            RegistrationField::WhatsappNumber => parts.whatsapp_number = "",
        }
        let err = Registration::try_from_parts(parts).expect_err("missing field");
        assert_eq!(err, RegistrationValidationError::MissingField(field));
    }

    #[rstest]
    fn blank_username_counts_as_missing(valid_parts: RegistrationParts<'static>) {
        let err = Registration::try_from_parts(RegistrationParts {
            username: "   ",
            ..valid_parts
        })
        .expect_err("blank username");
        assert_eq!(
            err,
            RegistrationValidationError::MissingField(RegistrationField::Username)
        );
    }

    #[rstest]
    fn missing_fields_win_over_other_failures() {
        let err = Registration::try_from_parts(RegistrationParts {
            role: "admin",
            phone: "123",
            password: "short",
            ..RegistrationParts::default()
        })
        .expect_err("missing fields");
        assert_eq!(
            err,
            RegistrationValidationError::MissingField(RegistrationField::Username)
        );
    }

    #[rstest]
    #[case("admin")]
    #[case("LANDLORD")]
    fn rejects_unknown_role(valid_parts: RegistrationParts<'static>, #[case] role: &'static str) {
        let err = Registration::try_from_parts(RegistrationParts { role, ..valid_parts })
            .expect_err("unknown role");
        assert_eq!(err, RegistrationValidationError::InvalidRole);
    }

    #[rstest]
    #[case("+9112345", "+919876543210", RegistrationField::Phone)]
    #[case("12345678901", "+919876543210", RegistrationField::Phone)]
    #[case("+9112345678901", "+919876543210", RegistrationField::Phone)]
    #[case("+919876543210", "+9112345678901", RegistrationField::WhatsappNumber)]
    fn rejects_malformed_phone_numbers(
        valid_parts: RegistrationParts<'static>,
        #[case] phone: &'static str,
        #[case] whatsapp_number: &'static str,
        #[case] field: RegistrationField,
    ) {
        let err = Registration::try_from_parts(RegistrationParts {
            phone,
            whatsapp_number,
            ..valid_parts
        })
        .expect_err("malformed phone");
        assert_eq!(err, RegistrationValidationError::InvalidPhoneFormat(field));
    }

    #[rstest]
    #[case("Pass0rd", PasswordPolicyViolation::TooShort { min: 8 })]
    #[case("Password", PasswordPolicyViolation::MissingDigit)]
    #[case("12345678", PasswordPolicyViolation::MissingLetter)]
    fn rejects_weak_passwords(
        valid_parts: RegistrationParts<'static>,
        #[case] password: &'static str,
        #[case] violation: PasswordPolicyViolation,
    ) {
        let err = Registration::try_from_parts(RegistrationParts {
            password,
            ..valid_parts
        })
        .expect_err("weak password");
        assert_eq!(err, RegistrationValidationError::WeakPassword(violation));
    }

    #[test]
    fn field_names_match_wire_format() {
        assert_eq!(RegistrationField::WhatsappNumber.as_str(), "whatsappNumber");
        assert_eq!(
            RegistrationValidationError::MissingField(RegistrationField::Phone).to_string(),
            "phone is required"
        );
    }
}
