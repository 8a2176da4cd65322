use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

// ============================================================================
// Order line
// ============================================================================

/// One order line from the `Orders` sheet, joined with the `Returns` sheet
/// on `Order ID`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub order_id: String,
    pub order_date: NaiveDate,
    pub category: String,
    pub sub_category: String,
    pub region: String,
    pub state: String,
    pub city: String,
    pub sales: f64,
    /// true if the order id is listed in the `Returns` sheet
    pub returned: bool,
}

impl OrderLine {
    /// First day of the calendar month of the order date
    pub fn order_month(&self) -> NaiveDate {
        self.order_date.with_day(1).unwrap_or(self.order_date)
    }
}
