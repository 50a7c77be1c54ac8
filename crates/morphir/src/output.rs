//! Output formatting utilities for programmatic interactions

use serde::{Deserialize, Serialize};
use std::io::Write;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// Single JSON object
    Json,
}

impl OutputFormat {
    /// Determine format from CLI flags
    pub fn from_flags(json: bool) -> Self {
        if json { Self::Json } else { Self::Human }
    }

    pub fn is_json(self) -> bool {
        self == Self::Json
    }
}

/// Write `value` as pretty JSON to stdout. Human output is written by each
/// command.
pub fn write_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{json}")?;
    Ok(())
}

/// Diagnostic information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: String, // "error", "warning"
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flags() {
        assert_eq!(OutputFormat::from_flags(false), OutputFormat::Human);
        assert!(OutputFormat::from_flags(true).is_json());
    }

    #[test]
    fn test_diagnostic_skips_missing_file() {
        let diagnostic = Diagnostic {
            level: "error".into(),
            message: "boom".into(),
            file: None,
        };
        let json = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(json, serde_json::json!({"level": "error", "message": "boom"}));
    }
}
