// src/ffi/scaffold.rs
//
// Shared plumbing for the C boundary: argument decoding and owned-string
// handoff, plus one-time tracing setup.

use std::ffi::{CStr, CString, c_char};
use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber once per process. Level comes from
/// RUST_LOG, defaulting to warn so a host app's stderr stays quiet.
pub(crate) fn ensure_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .try_init();
    });
}

/// Decode a caller-owned C string argument. None for null or non-UTF-8.
pub unsafe fn cstr_arg(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        None
    } else {
        unsafe { CStr::from_ptr(ptr) }.to_str().ok().map(|s| s.to_string())
    }
}

/// Hand a Rust string to the caller. Ownership transfers; the caller must
/// release it through free_rust_string exactly once. Null if the string
/// contains an interior NUL.
pub fn to_c_string(s: String) -> *mut c_char {
    match CString::new(s) {
        Ok(c_string) => c_string.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}
