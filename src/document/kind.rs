//! Document kinds and their display masks.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::format::strip_formatting;

/// CPF digit count, check digits included.
pub const CPF_LEN: usize = 11;

/// CNPJ digit count, check digits included.
pub const CNPJ_LEN: usize = 14;

/// Brazilian taxpayer document kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Individual taxpayer (Cadastro de Pessoas Físicas)
    Cpf,
    /// Organization taxpayer (Cadastro Nacional da Pessoa Jurídica)
    Cnpj,
}

impl DocumentKind {
    /// Number of digits in a complete document.
    pub fn max_len(&self) -> usize {
        match self {
            DocumentKind::Cpf => CPF_LEN,
            DocumentKind::Cnpj => CNPJ_LEN,
        }
    }

    /// Number of digits before the two check digits.
    pub fn base_len(&self) -> usize {
        self.max_len() - 2
    }

    /// Canonical display mask, `X` standing for a digit.
    pub fn mask(&self) -> &'static str {
        match self {
            DocumentKind::Cpf => "XXX.XXX.XXX-XX",
            DocumentKind::Cnpj => "XX.XXX.XXX/XXXX-XX",
        }
    }

    /// Digit groups and the separator that precedes each one.
    ///
    /// The first group has no leading separator.
    pub(crate) fn groups(&self) -> &'static [(Option<char>, usize)] {
        match self {
            DocumentKind::Cpf => &[(None, 3), (Some('.'), 3), (Some('.'), 3), (Some('-'), 2)],
            DocumentKind::Cnpj => &[
                (None, 2),
                (Some('.'), 3),
                (Some('.'), 3),
                (Some('/'), 4),
                (Some('-'), 2),
            ],
        }
    }

    /// Short uppercase label.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Cpf => "CPF",
            DocumentKind::Cnpj => "CNPJ",
        }
    }

    /// Guess the kind from the digit count of a value.
    ///
    /// Only exact lengths are recognized: 11 digits is a CPF, 14 a CNPJ.
    pub fn infer(value: &str) -> Option<Self> {
        match strip_formatting(value).len() {
            CPF_LEN => Some(DocumentKind::Cpf),
            CNPJ_LEN => Some(DocumentKind::Cnpj),
            _ => None,
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cpf" => Ok(DocumentKind::Cpf),
            "cnpj" => Ok(DocumentKind::Cnpj),
            other => Err(format!("Unknown document kind: {}", other)),
        }
    }
}
