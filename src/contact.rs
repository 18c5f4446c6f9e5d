//! Contact record and the request payload it is built from

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// A single entry in the directory, unique by `(first_name, last_name)`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Contact {
    pub first_name: String,
    pub last_name: String,
    pub category: String,
    pub phone_number: String,
    pub email: String,
    pub address: String,
}

impl Contact {
    /// Create a contact with only the name pair set
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = phone_number.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Whether this contact carries the given name pair
    pub fn has_name(&self, first_name: &str, last_name: &str) -> bool {
        self.first_name == first_name && self.last_name == last_name
    }

    /// "First Last", as used in log lines and API messages
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {} {}, Category: {}, Phone Number: {}, Email: {}, Address: {}",
            self.first_name, self.last_name, self.category, self.phone_number, self.email, self.address
        )
    }
}

/// JSON body accepted by the create and update endpoints.
///
/// Every field is optional at the deserialization step so that a missing
/// name surfaces as [`Error::InvalidContact`] from [`ContactPayload::validate`]
/// instead of a framework rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub category: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl ContactPayload {
    /// Check required fields and fill optional ones with `""`
    pub fn validate(self) -> Result<Contact> {
        let first_name = self
            .first_name
            .ok_or_else(|| Error::InvalidContact("missing required field: first_name".into()))?;
        let last_name = self
            .last_name
            .ok_or_else(|| Error::InvalidContact("missing required field: last_name".into()))?;

        Ok(Contact {
            first_name,
            last_name,
            category: self.category.unwrap_or_default(),
            phone_number: self.phone_number.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            address: self.address.unwrap_or_default(),
        })
    }
}
