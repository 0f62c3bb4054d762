//! C-ABI FFI bindings for cross-language integration.
//!
//! This module provides a C-compatible API so the native shell of the mobile
//! app (or any other host) can use ongkit without a Rust toolchain.
//!
//! Document kinds are passed as integers: `0` for CPF, `1` for CNPJ.

use std::ffi::{c_char, CStr, CString};
use std::path::Path;
use std::ptr;

use crate::banner::{normalize_banner_file, BannerOptions};
use crate::document::{format_document, inspect, validate, DocumentKind, JsonFormat};

/// Result structure returned by FFI functions.
#[repr(C)]
pub struct OngkitResult {
    /// Whether the operation succeeded.
    pub success: bool,
    /// The result data (null if failed). Must be freed with `ongkit_free_result`.
    pub data: *mut c_char,
    /// Error message (null if succeeded). Must be freed with `ongkit_free_result`.
    pub error: *mut c_char,
}

impl OngkitResult {
    fn success(data: String) -> Self {
        Self {
            success: true,
            data: CString::new(data).unwrap_or_default().into_raw(),
            error: ptr::null_mut(),
        }
    }

    fn error(message: String) -> Self {
        Self {
            success: false,
            data: ptr::null_mut(),
            error: CString::new(message).unwrap_or_default().into_raw(),
        }
    }
}

fn kind_from_int(kind: i32) -> Option<DocumentKind> {
    match kind {
        0 => Some(DocumentKind::Cpf),
        1 => Some(DocumentKind::Cnpj),
        _ => None,
    }
}

/// Borrow a C string as UTF-8, naming the argument in the error.
unsafe fn read_str<'a>(ptr: *const c_char, name: &str) -> Result<&'a str, String> {
    if ptr.is_null() {
        return Err(format!("{} cannot be null", name));
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map_err(|_| format!("Invalid UTF-8 {}", name))
}

/// Format a (possibly partial) document with its punctuation.
///
/// # Safety
///
/// The `value` must be a valid null-terminated string.
/// The returned result must be freed with `ongkit_free_result`.
#[no_mangle]
pub unsafe extern "C" fn ongkit_format_document(value: *const c_char, kind: i32) -> OngkitResult {
    let Some(kind) = kind_from_int(kind) else {
        return OngkitResult::error(format!("Unknown document kind: {}", kind));
    };
    match read_str(value, "value") {
        Ok(value) => OngkitResult::success(format_document(value, kind)),
        Err(e) => OngkitResult::error(e),
    }
}

/// Validate a CPF or CNPJ.
///
/// Returns `false` for null pointers, invalid UTF-8 and unknown kinds.
///
/// # Safety
///
/// The `value` must be null or a valid null-terminated string.
#[no_mangle]
pub unsafe extern "C" fn ongkit_validate_document(value: *const c_char, kind: i32) -> bool {
    let Some(kind) = kind_from_int(kind) else {
        return false;
    };
    match read_str(value, "value") {
        Ok(value) => validate(value, kind),
        Err(_) => false,
    }
}

/// Inspect a document and return the report as compact JSON.
///
/// # Safety
///
/// The `value` must be a valid null-terminated string.
/// The returned result must be freed with `ongkit_free_result`.
#[no_mangle]
pub unsafe extern "C" fn ongkit_inspect_document(value: *const c_char, kind: i32) -> OngkitResult {
    let Some(kind) = kind_from_int(kind) else {
        return OngkitResult::error(format!("Unknown document kind: {}", kind));
    };
    let value = match read_str(value, "value") {
        Ok(v) => v,
        Err(e) => return OngkitResult::error(e),
    };

    match inspect(value, kind).to_json(JsonFormat::Compact) {
        Ok(json) => OngkitResult::success(json),
        Err(e) => OngkitResult::error(e.to_string()),
    }
}

/// Normalize an image file into a banner JPEG written to `output`.
///
/// Passing both `width` and `height` as non-positive selects the default
/// 1200x400; passing only one of them positive is an error. A negative
/// `quality` selects the default 0.85. On success `data` holds banner
/// metadata as JSON.
///
/// # Safety
///
/// `input` and `output` must be valid null-terminated UTF-8 strings.
/// The returned result must be freed with `ongkit_free_result`.
#[no_mangle]
pub unsafe extern "C" fn ongkit_normalize_banner_file(
    input: *const c_char,
    output: *const c_char,
    width: i32,
    height: i32,
    quality: f32,
) -> OngkitResult {
    let input = match read_str(input, "input") {
        Ok(s) => s,
        Err(e) => return OngkitResult::error(e),
    };
    let output = match read_str(output, "output") {
        Ok(s) => s,
        Err(e) => return OngkitResult::error(e),
    };

    let mut options = BannerOptions::default();
    match (width > 0, height > 0) {
        (true, true) => options = options.with_size(width as u32, height as u32),
        (false, false) => {}
        _ => {
            return OngkitResult::error(format!(
                "width and height must both be positive or both be unset, got {}x{}",
                width, height
            ))
        }
    }
    if quality >= 0.0 {
        options = options.with_quality(quality);
    }

    match normalize_internal(Path::new(input), Path::new(output), &options) {
        Ok(json) => OngkitResult::success(json),
        Err(e) => OngkitResult::error(e.to_string()),
    }
}

fn normalize_internal(
    input: &Path,
    output: &Path,
    options: &BannerOptions,
) -> crate::Result<String> {
    let banner = normalize_banner_file(input, options)?;
    banner.save(output)?;
    serde_json::to_string(&banner).map_err(|e| crate::Error::Serialize(e.to_string()))
}

/// Free a result returned by any ongkit function.
///
/// # Safety
///
/// The `result` must have been returned by an ongkit function.
/// This function should only be called once per result.
#[no_mangle]
pub unsafe extern "C" fn ongkit_free_result(result: OngkitResult) {
    if !result.data.is_null() {
        drop(CString::from_raw(result.data));
    }
    if !result.error.is_null() {
        drop(CString::from_raw(result.error));
    }
}

/// Free a string allocated by ongkit.
///
/// # Safety
///
/// The `ptr` must have been allocated by ongkit.
/// This function should only be called once per pointer.
#[no_mangle]
pub unsafe extern "C" fn ongkit_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

/// Get the version of the ongkit library.
///
/// The returned string is statically allocated and should not be freed.
#[no_mangle]
pub extern "C" fn ongkit_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let version = ongkit_version();
        assert!(!version.is_null());
    }

    #[test]
    fn test_format_document() {
        let value = CString::new("52998224725").unwrap();
        unsafe {
            let result = ongkit_format_document(value.as_ptr(), 0);
            assert!(result.success);
            let text = CStr::from_ptr(result.data).to_str().unwrap();
            assert_eq!(text, "529.982.247-25");
            ongkit_free_result(result);
        }
    }

    #[test]
    fn test_validate_document() {
        let cnpj = CString::new("11.222.333/0001-81").unwrap();
        unsafe {
            assert!(ongkit_validate_document(cnpj.as_ptr(), 1));
            assert!(!ongkit_validate_document(cnpj.as_ptr(), 0));
            assert!(!ongkit_validate_document(cnpj.as_ptr(), 7));
            assert!(!ongkit_validate_document(ptr::null(), 1));
        }
    }

    #[test]
    fn test_null_value() {
        unsafe {
            let result = ongkit_inspect_document(ptr::null(), 0);
            assert!(!result.success);
            assert!(!result.error.is_null());
            ongkit_free_result(result);
        }
    }

    #[test]
    fn test_normalize_null_paths() {
        unsafe {
            let result = ongkit_normalize_banner_file(ptr::null(), ptr::null(), 0, 0, -1.0);
            assert!(!result.success);
            ongkit_free_result(result);
        }
    }

    #[test]
    fn test_normalize_rejects_half_specified_size() {
        let input = CString::new("cover.png").unwrap();
        let output = CString::new("cover.jpg").unwrap();
        for (width, height) in [(600, 0), (0, 200), (-1, 200)] {
            unsafe {
                let result = ongkit_normalize_banner_file(
                    input.as_ptr(),
                    output.as_ptr(),
                    width,
                    height,
                    -1.0,
                );
                assert!(!result.success);
                let error = CStr::from_ptr(result.error).to_str().unwrap();
                assert!(error.contains("both be positive"), "{}", error);
                ongkit_free_result(result);
            }
        }
    }
}
