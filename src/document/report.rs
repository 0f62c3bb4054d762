//! One-shot inspection of a document value.

use serde::{Deserialize, Serialize};

use super::checksum::validate;
use super::format::{format_document, has_complete_length, strip_formatting};
use super::kind::DocumentKind;
use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Everything a form needs to know about one document value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentReport {
    /// Kind the value was checked against
    pub kind: DocumentKind,

    /// Digits only, truncated to the kind's length
    pub digits: String,

    /// Display form with progressive punctuation
    pub formatted: String,

    /// Whether the digit count matches the kind exactly
    pub complete: bool,

    /// Checksum verdict; always `false` while incomplete
    pub valid: bool,
}

impl DocumentReport {
    /// Serialize the report.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        let result = match format {
            JsonFormat::Pretty => serde_json::to_string_pretty(self),
            JsonFormat::Compact => serde_json::to_string(self),
        };

        result.map_err(|e| Error::Serialize(format!("JSON serialization error: {}", e)))
    }
}

/// Format and, once complete, validate a value.
///
/// Validation only runs when the digit count is exact, so a half-typed number
/// reports `valid: false` without computing any check digit.
pub fn inspect(value: &str, kind: DocumentKind) -> DocumentReport {
    let mut digits = strip_formatting(value);
    let complete = has_complete_length(&digits, kind);
    let valid = complete && validate(&digits, kind);
    digits.truncate(kind.max_len());

    DocumentReport {
        kind,
        formatted: format_document(&digits, kind),
        digits,
        complete,
        valid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_complete_valid() {
        let report = inspect("52998224725", DocumentKind::Cpf);
        assert_eq!(report.digits, "52998224725");
        assert_eq!(report.formatted, "529.982.247-25");
        assert!(report.complete);
        assert!(report.valid);
    }

    #[test]
    fn test_inspect_partial() {
        let report = inspect("11.222.3", DocumentKind::Cnpj);
        assert_eq!(report.formatted, "11.222.3");
        assert!(!report.complete);
        assert!(!report.valid);
    }

    #[test]
    fn test_inspect_overlong_is_incomplete() {
        let report = inspect("529982247251", DocumentKind::Cpf);
        assert!(!report.complete);
        assert!(!report.valid);
        assert_eq!(report.digits, "52998224725");
    }

    #[test]
    fn test_to_json_pretty() {
        let report = inspect("11.222.333/0001-81", DocumentKind::Cnpj);
        let json = report.to_json(JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"kind\": \"cnpj\""));
        assert!(json.contains("\"valid\": true"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let report = inspect("", DocumentKind::Cpf);
        let json = report.to_json(JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"formatted\":\"\""));
    }
}
