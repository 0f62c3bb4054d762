//! Modulo-11 check digit verification for CPF and CNPJ.

use super::kind::DocumentKind;

/// Check digit for a run of digits weighted left to right.
fn mod11_digit(digits: &[u8], weights: impl Iterator<Item = u32>) -> u8 {
    let sum: u32 = digits
        .iter()
        .zip(weights)
        .map(|(&d, w)| u32::from(d) * w)
        .sum();

    let remainder = sum % 11;
    if remainder < 2 {
        0
    } else {
        (11 - remainder) as u8
    }
}

/// Weights for the next check digit over `len` digits.
///
/// CPF counts down from `len + 1` to 2. CNPJ cycles 2..=9 starting at the
/// rightmost digit.
fn weights(kind: DocumentKind, len: usize) -> Box<dyn Iterator<Item = u32>> {
    match kind {
        DocumentKind::Cpf => Box::new((2..=len as u32 + 1).rev()),
        DocumentKind::Cnpj => Box::new((0..len).rev().map(|i| (i % 8) as u32 + 2)),
    }
}

fn to_digits(value: &str) -> Vec<u8> {
    value
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect()
}

fn compute(base: &[u8], kind: DocumentKind) -> (u8, u8) {
    let first = mod11_digit(base, weights(kind, base.len()));

    let mut extended = Vec::with_capacity(base.len() + 1);
    extended.extend_from_slice(base);
    extended.push(first);
    let second = mod11_digit(&extended, weights(kind, extended.len()));

    (first, second)
}

/// Compute both check digits for a base number.
///
/// The base must hold exactly 9 (CPF) or 12 (CNPJ) digits once formatting is
/// stripped; anything else yields `None`.
///
/// # Example
///
/// ```
/// use ongkit::document::{check_digits, DocumentKind};
///
/// assert_eq!(check_digits("529.982.247", DocumentKind::Cpf), Some((2, 5)));
/// ```
pub fn check_digits(base: &str, kind: DocumentKind) -> Option<(u8, u8)> {
    let digits = to_digits(base);
    if digits.len() != kind.base_len() {
        return None;
    }
    Some(compute(&digits, kind))
}

/// Validate a CPF or CNPJ, formatted or not.
///
/// Returns `false` for the wrong digit count, for repeated-digit sequences
/// such as `000.000.000-00`, and for check digit mismatches.
pub fn validate(value: &str, kind: DocumentKind) -> bool {
    let digits = to_digits(value);
    if digits.len() != kind.max_len() {
        return false;
    }
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    let (base, check) = digits.split_at(kind.base_len());
    let (first, second) = compute(base, kind);
    check == [first, second]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpf_weights() {
        let w: Vec<u32> = weights(DocumentKind::Cpf, 9).collect();
        assert_eq!(w, vec![10, 9, 8, 7, 6, 5, 4, 3, 2]);
        let w: Vec<u32> = weights(DocumentKind::Cpf, 10).collect();
        assert_eq!(w.first(), Some(&11));
    }

    #[test]
    fn test_cnpj_weights() {
        let w: Vec<u32> = weights(DocumentKind::Cnpj, 12).collect();
        assert_eq!(w, vec![5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2]);
        let w: Vec<u32> = weights(DocumentKind::Cnpj, 13).collect();
        assert_eq!(w, vec![6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2]);
    }

    #[test]
    fn test_reference_cpf() {
        assert!(validate("529.982.247-25", DocumentKind::Cpf));
        assert!(validate("52998224725", DocumentKind::Cpf));
    }

    #[test]
    fn test_cpf_check_digit_mutation() {
        assert!(!validate("529.982.247-26", DocumentKind::Cpf));
        assert!(!validate("529.982.247-35", DocumentKind::Cpf));
    }

    #[test]
    fn test_reference_cnpj() {
        assert!(validate("11.222.333/0001-81", DocumentKind::Cnpj));
        assert!(!validate("11.222.333/0001-80", DocumentKind::Cnpj));
        assert!(!validate("11.222.333/0001-8", DocumentKind::Cnpj));
    }

    #[test]
    fn test_remainder_below_two_gives_zero() {
        // 123.456.789-09: the first digit hits remainder 1.
        assert_eq!(check_digits("123456789", DocumentKind::Cpf), Some((0, 9)));
        assert!(validate("123.456.789-09", DocumentKind::Cpf));
    }

    #[test]
    fn test_repeated_digits_rejected() {
        // 000.000.000-00 and 111.111.111-11 pass the checksum but are never issued.
        assert!(!validate("11111111111", DocumentKind::Cpf));
        assert!(!validate("000.000.000-00", DocumentKind::Cpf));
        assert!(!validate("00000000000000", DocumentKind::Cnpj));
    }

    #[test]
    fn test_wrong_kind_rejected() {
        assert!(!validate("529.982.247-25", DocumentKind::Cnpj));
        assert!(!validate("11.222.333/0001-81", DocumentKind::Cpf));
    }

    #[test]
    fn test_check_digits() {
        assert_eq!(check_digits("112223330001", DocumentKind::Cnpj), Some((8, 1)));
        assert_eq!(check_digits("11222333000", DocumentKind::Cnpj), None);
        assert_eq!(check_digits("", DocumentKind::Cpf), None);
    }

    #[test]
    fn test_validate_garbage() {
        assert!(!validate("", DocumentKind::Cpf));
        assert!(!validate("abc", DocumentKind::Cnpj));
    }
}
