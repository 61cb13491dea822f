//! User session record.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Account kind carried in the session record.
///
/// Only job-seeker accounts exist today; the employer side of the product
/// is display-only (plan matrices). The field is kept in the serialized
/// record for forward compatibility with the stored blob format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    /// Candidate building a CV and applying to listings
    #[serde(rename = "job-seeker")]
    JobSeeker,
}

/// A signed-in user.
///
/// This is a mock record: no credentials are stored and nothing about it
/// is verified. Serialized camelCase under the `user` storage key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque id, assigned at login/registration time
    pub id: String,
    /// Display name
    pub name: String,
    /// Account email
    pub email: String,
    /// Account kind (always job-seeker)
    pub user_type: UserType,
    /// Premium tier flag; gates premium templates
    pub is_premium: bool,
}

impl User {
    /// Creates a fresh non-premium job-seeker with a timestamped id.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: format!("user-{}", Utc::now().timestamp_millis()),
            name: name.into(),
            email: email.into(),
            user_type: UserType::JobSeeker,
            is_premium: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_is_free_tier() {
        let user = User::new("Ada", "ada@example.com");
        assert!(!user.is_premium);
        assert!(user.id.starts_with("user-"));
        assert_eq!(user.name, "Ada");
    }

    #[test]
    fn test_user_serializes_camel_case() {
        let user = User::new("Ada", "ada@example.com");
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"userType\":\"job-seeker\""));
        assert!(json.contains("\"isPremium\":false"));
    }

    #[test]
    fn test_user_round_trip() {
        let mut user = User::new("Ada", "ada@example.com");
        user.is_premium = true;
        let json = serde_json::to_string(&user).unwrap();
        let restored: User = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, user);
    }
}
