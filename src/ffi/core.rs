// src/ffi/core.rs
//
// The four-symbol C ABI the Swift app links against. Signatures mirror
// include/keypath_bridge.h.
//
// Error convention: the three producers return null on any boundary-level
// failure (null or non-UTF-8 argument, parse error, export error, interior
// NUL in the result). validate_ir_json reports semantic failures in-band as
// "invalid: ..." and returns null only for boundary-level failures. Nothing
// here panics or unwinds across the ABI.
//
// All entry points are stateless and reentrant; the only global state is the
// Once guarding tracing setup. Safe to call from any thread.

use std::ffi::{CString, c_char};

use crate::export::export_kanata;
use crate::ffi::scaffold::{cstr_arg, ensure_tracing, to_c_string};
use crate::keys;
use crate::models::Ir;
use crate::validation::{parse_ir, to_pretty_json};

// ---------- FFI: mapping creation ----------

/// Build a one-key IR document from a captured input key and an output
/// sequence, returned as pretty-printed JSON.
#[unsafe(no_mangle)]
pub extern "C" fn create_mapping_json(
    input_key: *const c_char,
    output_sequence: *const c_char,
) -> *mut c_char {
    ensure_tracing();
    let Some(input) = (unsafe { cstr_arg(input_key) }) else {
        return std::ptr::null_mut();
    };
    let Some(output) = (unsafe { cstr_arg(output_sequence) }) else {
        return std::ptr::null_mut();
    };

    // Captured names arrive in macOS form ("space"); store kanata tokens so
    // the IR is host-independent.
    let input = keys::normalize(&input);
    let ir = Ir::with_mapping(&input, output.trim());

    match to_pretty_json(&ir) {
        Ok(json) => to_c_string(json),
        Err(e) => {
            tracing::error!("create_mapping_json failed: {e}");
            std::ptr::null_mut()
        }
    }
}

// ---------- FFI: export ----------

/// Parse + validate an IR document and return kanata .kbd text.
#[unsafe(no_mangle)]
pub extern "C" fn export_to_kanata(ir_json: *const c_char) -> *mut c_char {
    ensure_tracing();
    let Some(json) = (unsafe { cstr_arg(ir_json) }) else {
        return std::ptr::null_mut();
    };

    let ir = match parse_ir(&json) {
        Ok(ir) => ir,
        Err(e) => {
            tracing::error!("export_to_kanata: rejected IR: {e}");
            return std::ptr::null_mut();
        }
    };

    match export_kanata(&ir) {
        Ok(kanata) => to_c_string(kanata),
        Err(e) => {
            tracing::error!("export_to_kanata failed: {e}");
            std::ptr::null_mut()
        }
    }
}

// ---------- FFI: validation ----------

/// Validate an IR document. Returns "valid", or "invalid: <diagnostic>".
#[unsafe(no_mangle)]
pub extern "C" fn validate_ir_json(ir_json: *const c_char) -> *mut c_char {
    ensure_tracing();
    let Some(json) = (unsafe { cstr_arg(ir_json) }) else {
        return std::ptr::null_mut();
    };

    let result = match parse_ir(&json) {
        Ok(_) => "valid".to_string(),
        Err(e) => format!("invalid: {e}"),
    };

    to_c_string(result)
}

// ---------- FFI: ownership ----------

/// Release a string previously returned by one of the producers above.
/// Null-safe. Passing any other pointer, or the same pointer twice, is
/// undefined behavior.
#[unsafe(no_mangle)]
pub extern "C" fn free_rust_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}
