//! Input validators and live input masks for the profile wizard.
//!
//! Validators are pure predicates; the wizard decides which warning to show.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

/// Earliest accepted birth year.
pub const MIN_BIRTH_YEAR: i32 = 1900;

/// Longest value the phone mask will produce.
pub const PHONE_MASK_MAX_LEN: usize = 16;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]+(?: [A-Za-z]+)*$").expect("valid name regex"));

static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("valid date regex"));

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[1-9]{2,3}[-\s.]?[0-9]{3,4}[-\s.]?[0-9]{3,4}(?:[-\s.][0-9]{3})?$")
        .expect("valid phone regex")
});

/// Letter groups separated by single spaces, no surrounding whitespace.
pub fn is_valid_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

/// `YYYY-MM-DD` with the year between 1900 and the current year.
pub fn is_valid_birth_date(value: &str) -> bool {
    is_valid_date_until(value, chrono::Local::now().year())
}

/// `YYYY-MM-DD` with the year in `[1900, max_year]`, a real month, and a day
/// that exists in that month (leap years included).
pub fn is_valid_date_until(value: &str, max_year: i32) -> bool {
    let Some(caps) = DATE_PATTERN.captures(value) else {
        return false;
    };
    let (Ok(year), Ok(month), Ok(day)) = (
        caps[1].parse::<i32>(),
        caps[2].parse::<u32>(),
        caps[3].parse::<u32>(),
    ) else {
        return false;
    };

    if !(MIN_BIRTH_YEAR..=max_year).contains(&year) {
        return false;
    }
    NaiveDate::from_ymd_opt(year, month, day).is_some()
}

/// The date picker lets a year grow past four digits; clip the value back
/// to `YYYY-MM-DD` length when that happens.
pub fn sanitize_date_input(value: &str) -> String {
    let year_len = value.split('-').next().map_or(0, str::len);
    if year_len > 4 {
        tracing::warn!("Year cannot be more than 4 digits.");
        value.chars().take(10).collect()
    } else {
        value.to_string()
    }
}

/// Apply the live phone mask: strip non-digits and regroup with hyphens.
///
/// | digits | groups |
/// |---|---|
/// | 0–2 | as typed |
/// | 3–6 | 2-4 |
/// | 7–10 | 2-4-4 |
/// | 11 | 3-4-4 |
/// | 12 | 3-3-3-3 |
/// | 13+ | 3-4-3-rest |
///
/// The result is capped at 16 characters.
pub fn format_phone_input(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let d = digits.as_str();
    let len = d.len();

    let masked = match len {
        0..=2 => d.to_string(),
        3..=6 => format!("{}-{}", &d[..2], &d[2..]),
        7..=10 => format!("{}-{}-{}", &d[..2], &d[2..6], &d[6..]),
        11 => format!("{}-{}-{}", &d[..3], &d[3..7], &d[7..]),
        12 => format!("{}-{}-{}-{}", &d[..3], &d[3..6], &d[6..9], &d[9..]),
        _ => format!("{}-{}-{}-{}", &d[..3], &d[3..7], &d[7..10], &d[10..]),
    };

    masked.chars().take(PHONE_MASK_MAX_LEN).collect()
}

/// Masked phone shape, no leading zero, longer than 11 characters.
pub fn is_valid_phone(number: &str) -> bool {
    PHONE_PATTERN.is_match(number) && number.len() > 11
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        assert!(is_valid_name("John Doe"));
        assert!(is_valid_name("Jo"));
        assert!(!is_valid_name("John  Doe"));
        assert!(!is_valid_name("John3"));
        assert!(!is_valid_name(" John"));
        assert!(!is_valid_name("John "));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("John\tDoe"));
    }

    #[test]
    fn dates_respect_calendar() {
        assert!(!is_valid_date_until("2024-02-30", 2026));
        assert!(is_valid_date_until("2024-02-29", 2026));
        assert!(!is_valid_date_until("2023-02-29", 2026));
        assert!(!is_valid_date_until("1899-01-01", 2026));
        assert!(is_valid_date_until("1900-01-01", 2026));
        assert!(!is_valid_date_until("2027-01-01", 2026));
        assert!(!is_valid_date_until("2020-13-01", 2026));
        assert!(!is_valid_date_until("2020-00-10", 2026));
        assert!(!is_valid_date_until("2020-04-31", 2026));
        assert!(!is_valid_date_until("2020-4-3", 2026));
    }

    #[test]
    fn date_year_bound_follows_clock() {
        let next_year = chrono::Local::now().year() + 1;
        assert!(!is_valid_birth_date(&format!("{next_year}-01-01")));
        assert!(is_valid_birth_date("2000-06-15"));
    }

    #[test]
    fn date_sanitizer_clips_long_years() {
        assert_eq!(sanitize_date_input("20245-01-01"), "20245-01-0");
        assert_eq!(sanitize_date_input("2024-01-01"), "2024-01-01");
    }

    #[test]
    fn phone_mask_groups() {
        assert_eq!(format_phone_input(""), "");
        assert_eq!(format_phone_input("81"), "81");
        assert_eq!(format_phone_input("812"), "81-2");
        assert_eq!(format_phone_input("812345"), "81-2345");
        assert_eq!(format_phone_input("8123456789"), "81-2345-6789");
        assert_eq!(format_phone_input("81234567890"), "812-3456-7890");
        assert_eq!(format_phone_input("812345678901"), "812-345-678-901");
        assert_eq!(format_phone_input("0812345678901"), "081-2345-678-901");
        assert_eq!(format_phone_input("081-2345-678-9012"), "081-2345-678-901");
    }

    #[test]
    fn phone_mask_ignores_non_digits() {
        assert_eq!(format_phone_input("81a2b3"), "81-23");
    }

    #[test]
    fn phones() {
        assert!(is_valid_phone("812-345-678-901"));
        assert!(is_valid_phone("81-2345-6789"));
        assert!(!is_valid_phone("81-2345-678"));
        assert!(!is_valid_phone("081-2345-678-901"));
        assert!(!is_valid_phone(""));
    }
}
