//! Progressive display formatting.
//!
//! These functions run on every keystroke, so they accept anything and never
//! fail. Checksum validation lives in [`super::checksum`] and is independent.

use super::kind::DocumentKind;

/// Remove every character that is not an ASCII digit.
pub fn strip_formatting(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Format a (possibly partial) document with the kind's punctuation.
///
/// Non-digits are dropped and the digits are truncated to the kind's length.
/// A separator is only emitted once a digit follows it, so partial input
/// never ends with punctuation.
///
/// # Example
///
/// ```
/// use ongkit::document::{format_document, DocumentKind};
///
/// assert_eq!(format_document("5299822", DocumentKind::Cpf), "529.982.2");
/// assert_eq!(format_document("11222333000181", DocumentKind::Cnpj), "11.222.333/0001-81");
/// ```
pub fn format_document(raw: &str, kind: DocumentKind) -> String {
    let digits: Vec<char> = raw
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(kind.max_len())
        .collect();

    let mut out = String::with_capacity(kind.mask().len());
    let mut rest = digits.as_slice();

    for &(separator, width) in kind.groups() {
        if rest.is_empty() {
            break;
        }
        if let Some(sep) = separator {
            out.push(sep);
        }
        let take = width.min(rest.len());
        out.extend(&rest[..take]);
        rest = &rest[take..];
    }

    out
}

/// True iff the value holds exactly the kind's number of digits.
pub fn has_complete_length(value: &str, kind: DocumentKind) -> bool {
    value.chars().filter(|c| c.is_ascii_digit()).count() == kind.max_len()
}
