//! User directory API request and response types.
//!
//! These types model the JSON returned by the `/users` and `/users/{id}`
//! endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a user record.
pub type UserId = u64;

/// A single user record.
///
/// Returned as an element of `GET /users` and on its own by `GET /users/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// The user's identifier, unique within the loaded collection.
    pub id: UserId,
    /// The user's full name.
    pub name: String,
    /// The user's handle. Fixed once the record exists.
    #[serde(default)]
    pub username: String,
    /// The user's email address.
    #[serde(default)]
    pub email: String,
    /// The user's phone number.
    #[serde(default)]
    pub phone: String,
    /// The user's website. Empty when none was given.
    #[serde(default)]
    pub website: String,
    /// The company the user works for.
    #[serde(default)]
    pub company: Company,
    /// The user's postal address.
    #[serde(default)]
    pub address: Address,
}

impl User {
    /// Check whether the user's name contains the query, ignoring case.
    ///
    /// The query is expected to be lowercased already.
    pub fn name_matches(&self, query_lower: &str) -> bool {
        self.name.to_lowercase().contains(query_lower)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, self.name)
    }
}

/// A user's company.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// The company name.
    #[serde(default)]
    pub name: String,
    /// The company's catch phrase.
    #[serde(default)]
    pub catch_phrase: String,
    /// The company's line of business.
    #[serde(default)]
    pub bs: String,
}


/// A user's postal address.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    /// Street name and number.
    #[serde(default)]
    pub street: String,
    /// Apartment or suite.
    #[serde(default)]
    pub suite: String,
    /// City name.
    #[serde(default)]
    pub city: String,
    /// Postal code.
    #[serde(default)]
    pub zipcode: String,
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.street, self.city, self.zipcode)
    }
}

#[cfg(test)]
impl Company {
    /// Create a company with only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}
