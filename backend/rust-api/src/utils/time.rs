use chrono::{Days, NaiveDate};

/// Whole calendar days from `from` to `to`; negative when `to` is earlier.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// The `len` calendar days ending on `last`, oldest first.
pub fn trailing_days(last: NaiveDate, len: u64) -> Vec<NaiveDate> {
    (0..len)
        .rev()
        .filter_map(|offset| last.checked_sub_days(Days::new(offset)))
        .collect()
}
