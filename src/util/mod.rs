use crate::analyzer::MAX_INPUT_CHARS;

/// Polarity to three decimals; empty when the backend sent none.
pub(crate) fn format_polarity(score: Option<f64>) -> String {
    score.map(|s| format!("{s:.3}")).unwrap_or_default()
}

/// Calendar date of an ISO-8601 timestamp (`2024-03-01T10:15:00Z` -> `2024-03-01`).
///
/// Anything that does not start with a `YYYY-MM-DD` date is returned as-is.
pub(crate) fn format_created_date(created_at: &str) -> String {
    let date = created_at.trim().split(['T', ' ']).next().unwrap_or_default();
    let bytes = date.as_bytes();
    let looks_like_date = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && date
            .chars()
            .enumerate()
            .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit());

    if looks_like_date {
        date.to_string()
    } else {
        created_at.to_string()
    }
}

pub(crate) fn char_counter(input: &str) -> String {
    format!("{}/{} characters", input.chars().count(), MAX_INPUT_CHARS)
}
