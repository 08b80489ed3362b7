use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::agents::Analysis;

/// A row of the `reviews` table as stored on disk.
#[derive(Debug, FromRow, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub id: i64,
    pub filename: Option<String>,
    pub language: Option<String>,
    pub timestamp: Option<String>,
    pub review_data: Option<String>,
}

/// Values supplied by the caller for a new row; the id is assigned by SQLite.
#[derive(Debug)]
pub struct NewReview<'a> {
    pub filename: &'a str,
    pub language: &'a str,
    pub timestamp: &'a str,
    pub review_data: &'a str,
}

/// JSON document kept in `review_data`. Field order is the stored key order.
#[derive(Debug, Serialize)]
pub struct ReviewPayload<'a> {
    pub filename: &'a str,
    pub language: &'a str,
    pub analysis: &'a Analysis,
    pub code: String,
}
