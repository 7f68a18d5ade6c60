// src/validation.rs
//
// Entry points for turning untrusted JSON into a typed Ir and back.

use crate::models::Ir;
use crate::schema::validate_ir_value;
use crate::{KeypathError, Result};

/// Parse and validate an IR document.
///
/// Runs the JSON parse, then the structural checks from schema.rs, then the
/// typed deserialization. Each stage fails with its own error variant so the
/// diagnostic tells the caller which layer rejected the input.
pub fn parse_ir(json: &str) -> Result<Ir> {
    let doc: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| KeypathError::InvalidIr(format!("JSON parse error: {e}")))?;

    validate_ir_value(&doc).map_err(KeypathError::SchemaValidation)?;

    let ir: Ir = serde_json::from_value(doc)
        .map_err(|e| KeypathError::InvalidIr(format!("IR deserialization error: {e}")))?;

    Ok(ir)
}

/// Canonical pretty-printed form. Key order is deterministic because the IR
/// maps are BTreeMaps.
pub fn to_pretty_json(ir: &Ir) -> Result<String> {
    let json = serde_json::to_string_pretty(ir)?;
    Ok(json)
}
