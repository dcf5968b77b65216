//! Locally registered user.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    /// Trimmed and lowercased at registration.
    pub email: String,
    /// Lowercase hex SHA-256 of the password.
    pub password_hash: String,
}
