// tests/bridge_test.rs
//
// FULL BOUNDARY TEST - exercises the C ABI the Swift host links against:
//   1. create_mapping_json builds the IR
//   2. validate_ir_json accepts it
//   3. export_to_kanata produces a loadable .kbd document
//   4. free_rust_string releases every producer result exactly once
//
// Everything goes through raw pointers, the way RustBridge.swift calls in.

use keypath_core::ffi::{create_mapping_json, export_to_kanata, free_rust_string, validate_ir_json};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;

fn read_and_free(ptr: *mut c_char) -> String {
    assert!(!ptr.is_null(), "producer returned null");
    let s = unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_string();
    free_rust_string(ptr);
    s
}

#[test]
fn capture_to_kanata_workflow() {
    let input = CString::new("a").unwrap();
    let output = CString::new("f").unwrap();

    // Step 1: the recorder captures "a" -> "f"
    let ir_ptr = create_mapping_json(input.as_ptr(), output.as_ptr());
    assert!(!ir_ptr.is_null());

    // Step 2: the host validates before saving
    let verdict_ptr = validate_ir_json(ir_ptr);
    assert_eq!(read_and_free(verdict_ptr), "valid");

    // Step 3: export for kanata
    let kanata = {
        let kanata_ptr = export_to_kanata(ir_ptr);
        read_and_free(kanata_ptr)
    };
    free_rust_string(ir_ptr);

    assert!(kanata.contains("(defsrc"));
    assert!(kanata.contains("(deflayer"));
    assert!(kanata.contains("a"));
    assert!(kanata.contains("f"));
}

#[test]
fn text_sequence_workflow() {
    let input = CString::new("a").unwrap();
    let output = CString::new("hello world").unwrap();

    let ir_ptr = create_mapping_json(input.as_ptr(), output.as_ptr());
    let ir_json = unsafe { CStr::from_ptr(ir_ptr) }.to_str().unwrap();
    assert!(ir_json.contains("hello world"));

    let kanata = {
        let kanata_ptr = export_to_kanata(ir_ptr);
        read_and_free(kanata_ptr)
    };
    free_rust_string(ir_ptr);

    // the text compiles to a spelled-out macro alias
    assert!(kanata.contains("(macro h e l l o spc w o r l d)"));
    assert!(kanata.contains("hello world"));
}

#[test]
fn validate_accepts_fully_populated_document() {
    let json = CString::new(
        r#"{
            "meta": {"app": "KeypathRecorder"},
            "keys": {
                "caps": {"tap": "esc", "hold": {"layer": "nav"}},
                "a": {"tap": {"macro_name": "greet"}}
            },
            "macros": {"greet": ["hi", "ret"]},
            "conditions": {},
            "layers": ["nav"]
        }"#,
    )
    .unwrap();

    let verdict_ptr = validate_ir_json(json.as_ptr());
    assert_eq!(read_and_free(verdict_ptr), "valid");
}

#[test]
fn validate_flags_broken_references() {
    let json =
        CString::new(r#"{"keys":{"caps":{"tap":{"layer":"nav"}}}}"#).unwrap();

    let verdict = read_and_free(validate_ir_json(json.as_ptr()));
    assert!(verdict.starts_with("invalid: "));
    assert!(verdict.contains("nav"));
}

#[test]
fn producers_reject_null_and_garbage() {
    assert!(create_mapping_json(std::ptr::null(), std::ptr::null()).is_null());
    assert!(export_to_kanata(std::ptr::null()).is_null());
    assert!(validate_ir_json(std::ptr::null()).is_null());

    let garbage = CString::new("definitely not json").unwrap();
    assert!(export_to_kanata(garbage.as_ptr()).is_null());

    // garbage is still a boundary-valid string, so validation reports in-band
    let verdict = read_and_free(validate_ir_json(garbage.as_ptr()));
    assert!(verdict.starts_with("invalid: "));

    // and the deallocator shrugs at null
    free_rust_string(std::ptr::null_mut());
}
