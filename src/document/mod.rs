//! CPF and CNPJ formatting and validation.
//!
//! Two independent concerns live here:
//!
//! - **Formatting** ([`format_document`], [`strip_formatting`],
//!   [`has_complete_length`]) runs on every keystroke and renders whatever
//!   has been typed so far with the kind's punctuation.
//! - **Validation** ([`validate`], [`check_digits`]) applies the modulo-11
//!   check digit rules and is meant to run once the value is complete.
//!
//! Every function here is total. Malformed input yields `false`, `None` or an
//! empty string, never a panic or an error.
//!
//! # Example
//!
//! ```
//! use ongkit::document::{format_document, has_complete_length, validate, DocumentKind};
//!
//! let typed = "11222333000181";
//! assert_eq!(format_document(typed, DocumentKind::Cnpj), "11.222.333/0001-81");
//! assert!(has_complete_length(typed, DocumentKind::Cnpj));
//! assert!(validate(typed, DocumentKind::Cnpj));
//! ```

mod checksum;
mod format;
mod kind;
mod report;

pub use checksum::{check_digits, validate};
pub use format::{format_document, has_complete_length, strip_formatting};
pub use kind::{DocumentKind, CNPJ_LEN, CPF_LEN};
pub use report::{inspect, DocumentReport, JsonFormat};
