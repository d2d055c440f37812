//! Checkout contact details.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A field of the checkout contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Email,
    Address,
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Email => write!(f, "email"),
            Self::Address => write!(f, "address"),
        }
    }
}

/// Errors that can occur when validating [`ContactDetails`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    /// A required field is blank.
    #[error("{0} is required")]
    Missing(ContactField),
    /// A field exceeds its maximum length.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// The offending field.
        field: ContactField,
        /// Maximum allowed length.
        max: usize,
    },
    /// The email has no `@`, or an empty local part or domain.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
}

impl ContactError {
    /// The form field this error refers to.
    #[must_use]
    pub const fn field(&self) -> ContactField {
        match self {
            Self::Missing(field) | Self::TooLong { field, .. } => *field,
            Self::InvalidEmail(_) => ContactField::Email,
        }
    }
}

/// Name, email and shipping address collected at checkout.
///
/// ## Constraints
///
/// - Every field is trimmed and must be non-empty
/// - Email: at most 254 characters (RFC 5321), `local@domain` shape
/// - Name and address: at most 200 characters
///
/// ## Examples
///
/// ```
/// use istore_core::{ContactDetails, ContactError, ContactField};
///
/// let contact = ContactDetails::parse("Ada Lovelace", "ada@example.com", "12 St James's Sq").unwrap();
/// assert_eq!(contact.email(), "ada@example.com");
///
/// assert_eq!(
///     ContactDetails::parse("", "ada@example.com", "x"),
///     Err(ContactError::Missing(ContactField::Name))
/// );
/// assert!(ContactDetails::parse("Ada", "ada.example.com", "x").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    name: String,
    email: String,
    address: String,
}

impl ContactDetails {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_EMAIL_LENGTH: usize = 254;
    /// Maximum length of the name and address fields.
    pub const MAX_FIELD_LENGTH: usize = 200;

    /// Validate and normalize the three contact fields.
    ///
    /// # Errors
    ///
    /// Returns the first field that is blank, too long, or (for the email)
    /// not shaped like `local@domain`.
    pub fn parse(name: &str, email: &str, address: &str) -> Result<Self, ContactError> {
        let name = required(ContactField::Name, name, Self::MAX_FIELD_LENGTH)?;
        let email = required(ContactField::Email, email, Self::MAX_EMAIL_LENGTH)?;
        let address = required(ContactField::Address, address, Self::MAX_FIELD_LENGTH)?;

        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => return Err(ContactError::InvalidEmail(email)),
        }

        Ok(Self {
            name,
            email,
            address,
        })
    }

    /// Customer name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Customer email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Shipping address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }
}

fn required(field: ContactField, value: &str, max: usize) -> Result<String, ContactError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ContactError::Missing(field));
    }
    if value.chars().count() > max {
        return Err(ContactError::TooLong { field, max });
    }
    Ok(value.to_owned())
}
