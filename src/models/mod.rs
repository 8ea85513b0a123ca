use chrono::NaiveDate;
use serde::Deserialize;

pub mod diet;
pub mod exercise;
pub mod plan;
pub mod sleep;
pub mod unified;

/// Inclusive date-range filter shared by all entry listing endpoints.
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
