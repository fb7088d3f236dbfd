/// Raw SQL scan target
use serde::{Deserialize, Serialize};

/// Row of the `sample` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct Sample {
    /// Identifier
    pub id: String,

    /// Display name
    pub name: String,
}

impl Sample {
    /// Create a sample row value
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
