use std::fmt;

use serde::{Deserialize, Serialize};

/// Role carried in the `user_type` field of a user and in token claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Admin,
    #[default]
    User,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Admin => write!(f, "ADMIN"),
            UserRole::User => write!(f, "USER"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(
            serde_json::from_str::<UserRole>("\"USER\"").unwrap(),
            UserRole::User
        );
        assert!(serde_json::from_str::<UserRole>("\"ROOT\"").is_err());
    }
}
