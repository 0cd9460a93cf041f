//! C-FFI layer implementing `include/ens_normalize.h`.
//!
//! ZERO logic here. All calls delegate to `ens-core`.
//!
//! # Buffer Contract
//!
//! Output buffers are caller-provided. On entry `*output_len` carries the
//! buffer capacity in bytes; on return it carries the number of bytes
//! written (success) or the number of bytes required (buffer too small).
//! Calling with a zero-capacity buffer probes the required size.
//!
//! # Exit codes
//!
//! `0` success; `-1` out of memory (reserved: the Rust global allocator
//! aborts instead of reporting); `-3` any validation or UTF-8 error; `-4`
//! (normalized) output buffer too small; `-5` beautified buffer too small
//! (`ens_process` only). The rich error taxonomy of the core deliberately
//! collapses to `-3` at this boundary.

use std::os::raw::{c_char, c_int};

use ens_core::Error;

pub const ENS_SUCCESS: c_int = 0;
pub const ENS_ERR_OOM: c_int = -1;
pub const ENS_ERR_OTHER: c_int = -3;
pub const ENS_ERR_BUFFER_TOO_SMALL: c_int = -4;
pub const ENS_ERR_BEAUTIFIED_TOO_SMALL: c_int = -5;

/// Helper: view the caller's input as a str.
/// A null pointer with a non-zero length, or invalid UTF-8, is an error.
unsafe fn read_input<'a>(ptr: *const c_char, len: usize) -> Result<&'a str, Error> {
    if len == 0 {
        return Ok("");
    }
    if ptr.is_null() {
        return Err(Error::InvalidUtf8);
    }
    let bytes = std::slice::from_raw_parts(ptr as *const u8, len);
    std::str::from_utf8(bytes).map_err(|_| Error::InvalidUtf8)
}

/// Helper: write `bytes` into the caller's buffer under the length contract.
/// Always stores the required/written size into `*len`.
unsafe fn write_output(
    bytes: &[u8],
    out: *mut c_char,
    len: *mut usize,
) -> Result<(), Error> {
    let capacity = *len;
    *len = bytes.len();
    if bytes.len() > capacity {
        return Err(Error::OutputTooSmall {
            required: bytes.len(),
        });
    }
    if !bytes.is_empty() {
        if out.is_null() {
            return Err(Error::InvalidUtf8);
        }
        std::ptr::copy_nonoverlapping(bytes.as_ptr(), out as *mut u8, bytes.len());
    }
    Ok(())
}

fn collapse(err: &Error, too_small_code: c_int) -> c_int {
    match err {
        Error::OutputTooSmall { .. } => too_small_code,
        _ => ENS_ERR_OTHER,
    }
}

/// Normalize an ENS name.
///
/// # Safety
/// `input` must point to `input_len` readable bytes; `output` must point to
/// `*output_len` writable bytes; `output_len` must be a valid pointer.
#[no_mangle]
pub unsafe extern "C" fn ens_normalize(
    input: *const c_char,
    input_len: usize,
    output: *mut c_char,
    output_len: *mut usize,
) -> c_int {
    if output_len.is_null() {
        return ENS_ERR_OTHER;
    }
    let text = match read_input(input, input_len) {
        Ok(s) => s,
        Err(_) => return ENS_ERR_OTHER,
    };
    let normalized = match ens_core::normalize(text) {
        Ok(s) => s,
        Err(_) => return ENS_ERR_OTHER,
    };
    match write_output(normalized.as_bytes(), output, output_len) {
        Ok(()) => ENS_SUCCESS,
        Err(e) => collapse(&e, ENS_ERR_BUFFER_TOO_SMALL),
    }
}

/// Beautify an ENS name.
///
/// # Safety
/// Same contract as [`ens_normalize`].
#[no_mangle]
pub unsafe extern "C" fn ens_beautify(
    input: *const c_char,
    input_len: usize,
    output: *mut c_char,
    output_len: *mut usize,
) -> c_int {
    if output_len.is_null() {
        return ENS_ERR_OTHER;
    }
    let text = match read_input(input, input_len) {
        Ok(s) => s,
        Err(_) => return ENS_ERR_OTHER,
    };
    let beautified = match ens_core::beautify(text) {
        Ok(s) => s,
        Err(_) => return ENS_ERR_OTHER,
    };
    match write_output(beautified.as_bytes(), output, output_len) {
        Ok(()) => ENS_SUCCESS,
        Err(e) => collapse(&e, ENS_ERR_BUFFER_TOO_SMALL),
    }
}

/// Normalize and beautify in one call.
///
/// Both length out-parameters are always updated, so a caller probing with
/// two zero-capacity buffers learns both required sizes from one call. When
/// both buffers are too small the normalized buffer's code (`-4`) wins.
///
/// # Safety
/// Same contract as [`ens_normalize`], for both buffer/length pairs.
#[no_mangle]
pub unsafe extern "C" fn ens_process(
    input: *const c_char,
    input_len: usize,
    normalized: *mut c_char,
    normalized_len: *mut usize,
    beautified: *mut c_char,
    beautified_len: *mut usize,
) -> c_int {
    if normalized_len.is_null() || beautified_len.is_null() {
        return ENS_ERR_OTHER;
    }
    let text = match read_input(input, input_len) {
        Ok(s) => s,
        Err(_) => return ENS_ERR_OTHER,
    };
    let both = match ens_core::process(text) {
        Ok(p) => p,
        Err(_) => return ENS_ERR_OTHER,
    };

    let norm_written = write_output(both.normalized.as_bytes(), normalized, normalized_len);
    let beau_written = write_output(both.beautified.as_bytes(), beautified, beautified_len);

    match (norm_written, beau_written) {
        (Ok(()), Ok(())) => ENS_SUCCESS,
        (Err(e), _) => collapse(&e, ENS_ERR_BUFFER_TOO_SMALL),
        (_, Err(e)) => collapse(&e, ENS_ERR_BEAUTIFIED_TOO_SMALL),
    }
}
