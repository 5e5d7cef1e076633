/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Wall-clock rendering of a millisecond timestamp: `YYYY-MM-DD HH:MM:SS` (UTC)
pub fn format_timestamp(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

/// Parse a calendar date, accepting either `YYYY-MM-DD` or an ISO datetime
/// (`2001-04-09T00:00:00.000Z`) whose date part is used.
pub fn parse_date(input: &str) -> Option<chrono::NaiveDate> {
    let date_part = input.trim().split('T').next()?;
    chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
