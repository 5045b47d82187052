//! Property tests for display formatting and HTML escaping.

use proptest::prelude::*;
use watchdash::format::{group_thousands, round_half_up, to_fixed, Formatter, RatePrecision};
use leptos::prelude::*;
use watchdash::view::Markup;

proptest! {
    #[test]
    fn grouped_digits_parse_back(value in any::<i64>()) {
        let grouped = group_thousands(value);
        let digits: String = grouped.chars().filter(|c| *c != ',').collect();
        prop_assert_eq!(digits.parse::<i64>().unwrap(), value);
        for group in grouped.trim_start_matches('-').split(',').skip(1) {
            prop_assert_eq!(group.len(), 3);
        }
    }

    #[test]
    fn round_half_up_is_nearest(value in -1.0e12f64..1.0e12f64) {
        let rounded = round_half_up(value) as f64;
        prop_assert!((rounded - value).abs() <= 0.5);
        prop_assert!(rounded - value > -0.5);
    }

    #[test]
    fn to_fixed_has_requested_decimals(value in -1.0e9f64..1.0e9f64, digits in 1u32..=2) {
        let text = to_fixed(value, digits);
        let fraction = text.split('.').nth(1).unwrap_or("");
        prop_assert_eq!(fraction.len(), digits as usize);
        let parsed: f64 = text.parse().unwrap();
        prop_assert!((parsed - value).abs() <= 0.5 * 10f64.powi(-(digits as i32)) + 1e-6);
    }

    #[test]
    fn rate_sign_matches_value(value in -1000.0f64..1000.0f64) {
        let fmt = Formatter::new("₩", RatePrecision::Two, "%Y-%m-%d");
        let text = fmt.rate(Some(value));
        prop_assert!(text.ends_with('%'));
        if value >= 0.0 {
            prop_assert!(text.starts_with('+'));
        }
    }

    #[test]
    fn escaped_text_has_no_markup(text in ".*") {
        let escaped = Markup::text(&text);
        prop_assert!(!escaped.as_str().contains('<'));
        prop_assert!(!escaped.as_str().contains('>'));
    }

    #[test]
    fn rendered_cell_never_opens_a_tag(text in ".*", title in ".*") {
        let html = Markup::render(view! { <td title=title>{text}</td> });
        let html = html.as_str();
        prop_assert!(html.starts_with("<td title=\""));
        prop_assert!(html.ends_with("</td>"));
        prop_assert_eq!(html.matches('<').count(), 2);
    }
}
