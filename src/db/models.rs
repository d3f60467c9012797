// Data models — Rust structs that map to article rows.
//
// Kept separate from the queries so other modules can use them without
// depending on rusqlite directly.

use serde::{Deserialize, Serialize};

/// A classified article, archived under the category it was assigned to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub header: String,
    pub text: String,
    pub category: String,
    pub created_at: String,
}
