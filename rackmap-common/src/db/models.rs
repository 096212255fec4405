//! Inventory database models

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Site record, including the legacy denormalized fields these tools migrate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    pub guid: String,
    pub name: String,
    pub slug: String,
    /// Legacy free-text contact fields (empty string when unset)
    pub contact_name: String,
    pub contact_phone: String,
    pub contact_email: String,
    /// Legacy single-value AS number (superseded by the site_asns relation)
    pub asn: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub guid: String,
    pub name: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRole {
    pub guid: String,
    pub name: String,
    pub slug: String,
}

/// Join record assigning a contact to an arbitrary inventory object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactAssignment {
    pub guid: String,
    pub object_type: String,
    pub object_id: String,
    pub contact_id: String,
    pub role_id: String,
    pub priority: Option<ContactPriority>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rir {
    pub guid: String,
    pub name: String,
    pub slug: String,
    pub is_private: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asn {
    pub guid: String,
    pub asn: i64,
    pub rir_id: String,
}

/// Priority of a contact assignment, stored as lowercase text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactPriority {
    Primary,
    Secondary,
    Tertiary,
    Inactive,
}

impl ContactPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactPriority::Primary => "primary",
            ContactPriority::Secondary => "secondary",
            ContactPriority::Tertiary => "tertiary",
            ContactPriority::Inactive => "inactive",
        }
    }
}

impl fmt::Display for ContactPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactPriority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "primary" => Ok(ContactPriority::Primary),
            "secondary" => Ok(ContactPriority::Secondary),
            "tertiary" => Ok(ContactPriority::Tertiary),
            "inactive" => Ok(ContactPriority::Inactive),
            _ => Err(Error::InvalidInput(format!("Invalid contact priority: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_round_trips_through_text() {
        for priority in [
            ContactPriority::Primary,
            ContactPriority::Secondary,
            ContactPriority::Tertiary,
            ContactPriority::Inactive,
        ] {
            let parsed: ContactPriority = priority.as_str().parse().expect("parse failed");
            assert_eq!(parsed, priority);
        }
    }

    #[test]
    fn priority_parse_is_case_insensitive() {
        let parsed: ContactPriority = "Primary".parse().expect("parse failed");
        assert_eq!(parsed, ContactPriority::Primary);
    }

    #[test]
    fn priority_rejects_unknown_values() {
        assert!("urgent".parse::<ContactPriority>().is_err());
    }
}
