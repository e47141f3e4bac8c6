//! Date parsing for document front matter.

use chrono::NaiveDate;

/// Parse a front-matter date such as `March 2, 2024`, `2 March 2024` or
/// `March 2024`. Dates without a day resolve to the first of the month.
pub(crate) fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim().trim_end_matches('.');
    if text.is_empty() {
        return None;
    }

    for fmt in ["%B %d, %Y", "%b %d, %Y", "%d %B %Y", "%d %b %Y", "%Y-%m-%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            return Some(date);
        }
    }

    let with_day = format!("1 {}", text);
    ["%d %B %Y", "%d %b %Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&with_day, fmt).ok())
}

/// Build a date from xml2rfc `<date>` attributes.
///
/// The month may be a name or a number; a missing day means the first.
pub fn date_from_parts(year: &str, month: Option<&str>, day: Option<&str>) -> Option<NaiveDate> {
    let year: i32 = year.trim().parse().ok()?;
    let month = match month.map(str::trim).filter(|m| !m.is_empty()) {
        Some(m) => match m.parse::<u32>() {
            Ok(n) => n,
            Err(_) => month_number(m)?,
        },
        None => 1,
    };
    let day = match day.map(str::trim).filter(|d| !d.is_empty()) {
        Some(d) => d.parse().ok()?,
        None => 1,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

fn month_number(name: &str) -> Option<u32> {
    NaiveDate::parse_from_str(&format!("1 {} 2000", name), "%d %B %Y")
        .or_else(|_| NaiveDate::parse_from_str(&format!("1 {} 2000", name), "%d %b %Y"))
        .ok()
        .map(|d| chrono::Datelike::month(&d))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_variants() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 2);
        assert_eq!(parse_date("March 2, 2024"), expected);
        assert_eq!(parse_date("2 March 2024"), expected);
        assert_eq!(parse_date("Mar 2, 2024"), expected);
        assert_eq!(parse_date("March 2024"), NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(parse_date("sometime soon"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_date_from_parts() {
        assert_eq!(
            date_from_parts("2024", Some("March"), Some("2")),
            NaiveDate::from_ymd_opt(2024, 3, 2)
        );
        assert_eq!(
            date_from_parts("2024", Some("11"), None),
            NaiveDate::from_ymd_opt(2024, 11, 1)
        );
        assert_eq!(date_from_parts("2024", None, None), NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(date_from_parts("soon", Some("March"), None), None);
        assert_eq!(date_from_parts("2024", Some("Smarch"), None), None);
    }
}
