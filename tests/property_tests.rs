//! Property-based tests for rust_log_router using proptest

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rust_log_router::handlers::format::{FormatSettings, Formatter, TextFormatter};
use rust_log_router::prelude::*;
use std::sync::Arc;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop::sample::select(LogLevel::ALL.to_vec())
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Test that LogLevel string conversions roundtrip correctly
    #[test]
    fn test_log_level_str_roundtrip(level in any_level(), use_lower in any::<bool>()) {
        let text = if use_lower {
            level.to_str().to_lowercase()
        } else {
            level.to_str().to_string()
        };
        let parsed: LogLevel = text.parse().unwrap();
        prop_assert_eq!(level, parsed);
        prop_assert_eq!(format!("{}", level), level.to_str());
    }

    /// Test that LogLevel ordering follows the table index
    #[test]
    fn test_log_level_ordering(level1 in any_level(), level2 in any_level()) {
        prop_assert_eq!(level1 <= level2, level1.index() <= level2.index());
        prop_assert_eq!(level1 < level2, (level1 as u8) < (level2 as u8));
        prop_assert_eq!(LogLevel::ALL[level1.index()], level1);
    }

    /// Unknown names are rejected
    #[test]
    fn test_unknown_level_rejected(name in "[a-z]{8,12}") {
        prop_assert!(name.parse::<LogLevel>().is_err());
    }
}

// ============================================================================
// Field Rendering Tests
// ============================================================================

proptest! {
    /// Integers render in base 10 regardless of width or sign
    #[test]
    fn test_integer_fields_render_base10(signed in any::<i64>(), unsigned in any::<u64>(), small in any::<i16>()) {
        prop_assert_eq!(Field::new("k", signed).to_string(), format!("k={}", signed));
        prop_assert_eq!(Field::new("k", unsigned).to_string(), format!("k={}", unsigned));
        prop_assert_eq!(Field::new("k", small).to_string(), format!("k={}", small));
    }

    /// Strings are written raw
    #[test]
    fn test_string_fields_render_raw(key in "[a-z_]{1,12}", value in ".*") {
        let field = Field::new(key.clone(), value.as_str());
        let mut buf = Vec::new();
        field.value.write_to(&mut buf).unwrap();
        prop_assert_eq!(buf, value.as_bytes().to_vec());
        prop_assert_eq!(field.key, key);
    }
}

// ============================================================================
// Text Formatter Tests
// ============================================================================

proptest! {
    /// The plain layout is timestamp, padded level, message, then fields
    #[test]
    fn test_plain_layout(
        level in any_level(),
        message in "[a-zA-Z0-9 .,:-]{0,40}",
        fields in prop::collection::vec(("[a-z]{1,8}", any::<i32>()), 0..5),
        secs in 0i64..4_000_000_000,
    ) {
        let at = Utc.timestamp_opt(secs, 0).single().unwrap();
        let mut entry = Entry::new(level, message.clone()).with_timestamp(at);
        for (key, value) in &fields {
            entry.push_field(Field::new(key.as_str(), *value));
        }
        let entry: HandlerEntry = entry.into();

        let format = "%Y-%m-%dT%H:%M:%SZ";
        let mut formatter = TextFormatter::new(Arc::new(FormatSettings::plain(
            TimestampFormat::Custom(format.to_string()),
        )));
        let line = String::from_utf8(formatter.format(&entry).to_vec()).unwrap();

        let mut expected = format!("{} {:<6} {}", at.format(format), level.to_str(), message);
        for (key, value) in &fields {
            expected.push_str(&format!(" {}={}", key, value));
        }
        expected.push('\n');
        prop_assert_eq!(line, expected);
    }
}
