/// User domain types
use serde::{Deserialize, Serialize};

/// Personal name columns embedded into [`User`]
///
/// Every part is optional. A column absent from the result set decodes as
/// `None`, so partial select lists still map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct Name {
    /// `first_name` column
    #[cfg_attr(feature = "sqlx-support", sqlx(default))]
    pub first_name: Option<String>,

    /// `middle_name` column
    #[cfg_attr(feature = "sqlx-support", sqlx(default))]
    pub middle_name: Option<String>,

    /// `last_name` column
    #[cfg_attr(feature = "sqlx-support", sqlx(default))]
    pub last_name: Option<String>,
}

impl Name {
    /// Name with only a first name
    pub fn first(first_name: impl Into<String>) -> Self {
        Self {
            first_name: Some(first_name.into()),
            ..Self::default()
        }
    }

    /// Name with all three parts
    pub fn full(
        first_name: impl Into<String>,
        middle_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            first_name: Some(first_name.into()),
            middle_name: Some(middle_name.into()),
            last_name: Some(last_name.into()),
        }
    }

    /// True when no part is set
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.middle_name.is_none() && self.last_name.is_none()
    }
}

/// Row of the `users` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct User {
    /// Identifier (string primary key, not unique in the exercise schema)
    #[cfg_attr(feature = "sqlx-support", sqlx(default))]
    pub id: String,

    /// Embedded name columns
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx-support", sqlx(flatten))]
    pub name: Name,

    /// Plain-text password column
    #[cfg_attr(feature = "sqlx-support", sqlx(default))]
    pub password: String,

    /// Free-form note that is never persisted nor read back
    #[serde(skip)]
    #[cfg_attr(feature = "sqlx-support", sqlx(skip))]
    pub information: String,
}

impl User {
    /// Create a user with a first name only
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: Name::first(first_name),
            password: password.into(),
            information: String::new(),
        }
    }
}

/// Projection of `id, first_name, last_name`
///
/// Not an entity: it only shares column names with [`User`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct UserResponse {
    /// User identifier
    pub id: String,

    /// Given name, absent when not selected
    #[cfg_attr(feature = "sqlx-support", sqlx(default))]
    pub first_name: Option<String>,

    /// Family name, absent when not selected
    #[cfg_attr(feature = "sqlx-support", sqlx(default))]
    pub last_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_sets_first_name_only() {
        let user = User::new("11", "adib lagi", "adib123");

        assert_eq!(user.id, "11");
        assert_eq!(user.name.first_name.as_deref(), Some("adib lagi"));
        assert!(user.name.middle_name.is_none());
        assert!(user.name.last_name.is_none());
        assert!(user.information.is_empty());
    }

    #[test]
    fn test_name_is_empty() {
        assert!(Name::default().is_empty());
        assert!(!Name::first("User 2").is_empty());
    }

    #[test]
    fn test_information_is_not_serialized() {
        let user = User {
            id: "1".to_string(),
            name: Name::full("Adib", "Hauzan", "Sofyan"),
            password: "adib123".to_string(),
            information: "ini akan di ignore".to_string(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("information").is_none());
        // Name columns sit next to id, like the table layout
        assert_eq!(json["middle_name"], "Hauzan");

        let back: User = serde_json::from_value(json).unwrap();
        assert_eq!(back.name, user.name);
        assert!(back.information.is_empty());
    }
}
