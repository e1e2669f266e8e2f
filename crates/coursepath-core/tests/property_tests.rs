//! Property-based tests for validators and input masks
//!
//! Uses proptest to check the invariants the wizard and profile page rely on.

use chrono::{Datelike, NaiveDate};
use coursepath_core::profile::censor_phone;
use coursepath_core::validate::{
    format_phone_input, is_valid_date_until, is_valid_name, PHONE_MASK_MAX_LEN,
};
use coursepath_core::{filter_courses, password_strength, CourseItem};
use proptest::prelude::*;

// ============================================================================
// Strategy Generators
// ============================================================================

/// Names built from letter groups joined by single spaces
fn name_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[A-Za-z]{1,12}", 1..4).prop_map(|parts| parts.join(" "))
}

/// Any calendar date between 1900 and 2020
fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..44_000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(1900, 1, 1).unwrap() + chrono::Duration::days(offset)
    })
}

fn course_strategy() -> impl Strategy<Value = Vec<CourseItem>> {
    prop::collection::vec("[A-Za-z ]{1,20}", 0..12).prop_map(|names| {
        names
            .into_iter()
            .enumerate()
            .map(|(id, name)| CourseItem {
                id: id as u64,
                name,
                description: String::new(),
                image_url: None,
            })
            .collect()
    })
}

// ============================================================================
// Phone mask
// ============================================================================

proptest! {
    /// The mask never grows past its cap and only emits digits and hyphens
    #[test]
    fn phone_mask_shape(raw in "[0-9a-z +().-]{0,30}") {
        let masked = format_phone_input(&raw);
        prop_assert!(masked.len() <= PHONE_MASK_MAX_LEN);
        prop_assert!(masked.chars().all(|c| c.is_ascii_digit() || c == '-'));
        prop_assert!(!masked.starts_with('-'));
    }

    /// Digits come out in the order they were typed
    #[test]
    fn phone_mask_keeps_digit_prefix(raw in "[0-9 -]{0,24}") {
        let typed: String = raw.chars().filter(char::is_ascii_digit).collect();
        let kept: String = format_phone_input(&raw).chars().filter(char::is_ascii_digit).collect();
        prop_assert!(typed.starts_with(&kept));
    }

    /// Re-masking already masked input changes nothing
    #[test]
    fn phone_mask_is_idempotent(raw in "[0-9]{0,20}") {
        let once = format_phone_input(&raw);
        prop_assert_eq!(format_phone_input(&once), once);
    }

    /// Censoring never changes the length of a number
    #[test]
    fn censor_keeps_length(number in "[0-9]{0,16}") {
        prop_assert_eq!(censor_phone(&number).len(), number.len());
    }
}

// ============================================================================
// Names and dates
// ============================================================================

proptest! {
    #[test]
    fn well_formed_names_pass(name in name_strategy()) {
        prop_assert!(is_valid_name(&name));
    }

    #[test]
    fn padded_names_fail(name in name_strategy()) {
        let leading = format!(" {}", name);
        let trailing = format!("{} ", name);
        prop_assert!(!is_valid_name(&leading));
        prop_assert!(!is_valid_name(&trailing));
    }

    #[test]
    fn names_with_digits_fail(name in name_strategy(), digit in 0u8..10) {
        let with_digit = format!("{}{}", name, digit);
        prop_assert!(!is_valid_name(&with_digit));
    }

    /// Every real calendar day in range is accepted
    #[test]
    fn real_dates_pass(date in date_strategy()) {
        let text = date.format("%Y-%m-%d").to_string();
        prop_assert!(is_valid_date_until(&text, 2020));
        prop_assert!(!is_valid_date_until(&text, date.year() - 1));
    }

    /// Day 31 only exists in the months that have it
    #[test]
    fn day_31_matches_calendar(year in 1900i32..2020, month in 1u32..=12) {
        let text = format!("{:04}-{:02}-31", year, month);
        let exists = NaiveDate::from_ymd_opt(year, month, 31).is_some();
        prop_assert_eq!(is_valid_date_until(&text, 2020), exists);
    }
}

// ============================================================================
// Password strength and course search
// ============================================================================

proptest! {
    #[test]
    fn strength_is_quantized(password in ".{0,40}") {
        let strength = password_strength(&password);
        prop_assert!(strength.percent <= 100);
        prop_assert_eq!(strength.percent % 25, 0);
    }

    /// Adding a special character to a short password never lowers the score
    #[test]
    fn special_char_never_hurts(password in "[A-Za-z0-9]{0,20}") {
        let before = password_strength(&password).percent;
        let after = password_strength(&format!("{}!", password)).percent;
        prop_assert!(after >= before);
    }

    #[test]
    fn search_results_match_term(courses in course_strategy(), term in "[a-zA-Z]{0,3}") {
        let hits = filter_courses(&courses, &term);
        prop_assert!(hits.len() <= courses.len());
        let lowered = term.to_lowercase();
        for hit in hits {
            prop_assert!(hit.name.to_lowercase().contains(&lowered));
        }
    }
}
