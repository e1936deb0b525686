use chrono::NaiveDate;

/// Parses a decimal id out of a raw request value. Only plain digit strings
/// count; signs, whitespace, fractions and overflowing values all yield None.
pub fn parse_numeric_id(value: Option<&str>) -> Option<i64> {
    let value = value?;
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

/// Parses a `YYYY-MM-DD` string into a calendar date. The shape is checked
/// before chrono sees the value, so `2025-1-5` is rejected along with
/// calendar nonsense like `2025-02-30`.
pub fn parse_date_only(value: Option<&str>) -> Option<NaiveDate> {
    let value = value?;
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_at = |range: std::ops::Range<usize>| bytes[range].iter().all(u8::is_ascii_digit);
    if !digits_at(0..4) || !digits_at(5..7) || !digits_at(8..10) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}
