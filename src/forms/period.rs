use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendingPeriod {
    #[default]
    Week,
    Month,
    All,
}

impl TrendingPeriod {
    // Lower bound (inclusive) on launch_date for the trending window.
    // "month" subtracts a calendar month, so the window is 28 to 31
    // days long depending on the current date.
    pub fn since(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            TrendingPeriod::Week => Some(today - Duration::days(7)),
            TrendingPeriod::Month => today.checked_sub_months(Months::new(1)).or(Some(today)),
            TrendingPeriod::All => None,
        }
    }
}
