use serde::{Deserialize, Serialize};

/// A row of the users table.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub user: String,
    /// Email address.
    pub correo: String,
}
