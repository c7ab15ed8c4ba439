use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default seconds between text changes
pub const DEFAULT_INTERVAL_SECS: u64 = 5;

/// User-facing cycle settings.
///
/// `text_list` holds one entry per line, the way a multiline text field stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleSettings {
    /// Name of the text source to update
    pub source_name: String,
    /// Newline-delimited entries
    pub text_list: String,
    /// Seconds between updates
    pub interval: u64,
}

impl Default for CycleSettings {
    fn default() -> Self {
        Self {
            source_name: String::new(),
            text_list: String::new(),
            interval: DEFAULT_INTERVAL_SECS,
        }
    }
}

impl CycleSettings {
    pub fn new(source_name: impl Into<String>, items: &[&str], interval: u64) -> Self {
        Self {
            source_name: source_name.into(),
            text_list: items.join("\n"),
            interval,
        }
    }

    /// Entries in order, with blank lines dropped
    pub fn items(&self) -> Vec<String> {
        parse_text_list(&self.text_list)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }

    pub fn validate(&self) -> Result<()> {
        if self.interval == 0 {
            return Err(Error::InvalidInterval);
        }
        Ok(())
    }
}

/// Split a newline-delimited list into entries.
///
/// Handles `\r\n` line endings. Lines that are empty after trimming are skipped;
/// the remaining lines keep their inner whitespace.
pub fn parse_text_list(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = CycleSettings::default();
        assert!(settings.source_name.is_empty());
        assert!(settings.items().is_empty());
        assert_eq!(settings.interval(), Duration::from_secs(5));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_parse_text_list_preserves_order() {
        assert_eq!(
            parse_text_list("first\nsecond\nthird"),
            vec!["first", "second", "third"]
        );
    }

    #[test]
    fn test_parse_text_list_skips_blank_lines() {
        assert_eq!(parse_text_list("a\n\n   \nb\n"), vec!["a", "b"]);
        assert!(parse_text_list("").is_empty());
        assert!(parse_text_list("\n\n").is_empty());
    }

    #[test]
    fn test_parse_text_list_crlf() {
        assert_eq!(parse_text_list("a\r\nb\r\n"), vec!["a", "b"]);
    }

    #[test]
    fn test_parse_text_list_keeps_inner_whitespace() {
        assert_eq!(parse_text_list("  Now playing: x  "), vec!["  Now playing: x  "]);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let settings = CycleSettings {
            interval: 0,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(Error::InvalidInterval)));
    }

    #[test]
    fn test_new_joins_items() {
        let settings = CycleSettings::new("ticker", &["a", "b"], 10);
        assert_eq!(settings.text_list, "a\nb");
        assert_eq!(settings.items(), vec!["a", "b"]);
        assert_eq!(settings.interval(), Duration::from_secs(10));
    }

    #[test]
    fn test_deserialize_with_missing_fields() {
        let settings: CycleSettings = toml::from_str("source_name = \"ticker\"").unwrap();
        assert_eq!(settings.source_name, "ticker");
        assert_eq!(settings.interval, DEFAULT_INTERVAL_SECS);
    }
}
