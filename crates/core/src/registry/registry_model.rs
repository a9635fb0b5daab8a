//! Registry domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A named trading strategy trades are grouped under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    pub id: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}

/// A broker account trades were executed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}
