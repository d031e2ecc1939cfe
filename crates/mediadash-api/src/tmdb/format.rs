//! Display formatting helpers for dates and ratings.

use chrono::NaiveDate;

/// Formats a `YYYY-MM-DD` date for display (e.g. "June 15, 2024").
///
/// Empty or unparseable input yields "N/A".
#[must_use]
pub fn format_date(date: &str) -> String {
    if date.is_empty() {
        return String::from("N/A");
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_or_else(
        |_| String::from("N/A"),
        |d| d.format("%B %-d, %Y").to_string(),
    )
}

/// Formats a vote average to one decimal place (e.g. "7.8").
#[must_use]
pub fn format_rating(rating: f64) -> String {
    format!("{rating:.1}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        // Arrange & Act & Assert
        assert_eq!(format_date("2024-06-15"), "June 15, 2024");
        assert_eq!(format_date("2025-01-01"), "January 1, 2025");
    }

    #[test]
    fn test_format_date_empty_is_na() {
        // Arrange & Act & Assert
        assert_eq!(format_date(""), "N/A");
    }

    #[test]
    fn test_format_date_invalid_is_na() {
        // Arrange & Act & Assert
        assert_eq!(format_date("not-a-date"), "N/A");
        assert_eq!(format_date("2024-13-45"), "N/A");
    }

    #[test]
    fn test_format_rating_rounds_to_one_decimal() {
        // Arrange & Act & Assert
        assert_eq!(format_rating(7.849), "7.8");
        assert_eq!(format_rating(7.96), "8.0");
        assert_eq!(format_rating(0.0), "0.0");
        assert_eq!(format_rating(10.0), "10.0");
    }
}
