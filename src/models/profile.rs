//! User profile model
//!
//! The profile is a singleton carried inside the document. Its currency symbol
//! is used when rendering amounts.

use serde::{Deserialize, Serialize};

/// Currency symbols offered by the profile editor
pub const SUPPORTED_CURRENCIES: [&str; 4] = ["₹", "$", "€", "£"];

/// Personal details and display preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub default_currency: String,
}

impl Profile {
    /// Currency symbol for display, falling back to `₹` when unset
    pub fn currency(&self) -> &str {
        if self.default_currency.is_empty() {
            "₹"
        } else {
            &self.default_currency
        }
    }

    /// Shallow-merge a patch into the profile
    pub fn apply(&mut self, patch: ProfilePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(currency) = patch.default_currency {
            self.default_currency = currency;
        }
    }
}

/// Partial update for the profile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub default_currency: Option<String>,
}

impl ProfilePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn default_currency(mut self, currency: impl Into<String>) -> Self {
        self.default_currency = Some(currency.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Form-level validation: currency, when supplied, must not be blank
    pub fn validate(&self) -> Result<(), String> {
        match &self.default_currency {
            Some(currency) if currency.trim().is_empty() => {
                Err("Default currency cannot be empty".into())
            }
            _ => Ok(()),
        }
    }
}
