// src/schema.rs
//
// JSON schema generation for the IR, plus the structural checks run before
// typed deserialization. The structural pass reports every problem it finds
// in one string so the host can show a single diagnostic.

use crate::Result;
use crate::models::Ir;
use once_cell::sync::OnceCell;
use schemars::schema_for;
use serde_json::Value;

static SCHEMA: OnceCell<String> = OnceCell::new();

/// JSON schema for the IR document, generated once per process.
pub fn generate_schema() -> Result<String> {
    let schema = SCHEMA.get_or_try_init(|| {
        let schema = schema_for!(Ir);
        serde_json::to_string_pretty(&schema)
    })?;
    Ok(schema.clone())
}

/// Structural validation of a raw IR document.
///
/// Checks shape and referential integrity: every layer, macro, and condition
/// a key refers to must be declared. Returns all findings joined with "; ".
pub fn validate_ir_value(doc: &Value) -> std::result::Result<(), String> {
    let mut errors = Vec::new();

    let Some(obj) = doc.as_object() else {
        return Err("Root must be an object".to_string());
    };

    let layers: Vec<&str> = match obj.get("layers") {
        None => Vec::new(),
        Some(Value::Array(items)) => {
            let mut names = Vec::new();
            for item in items {
                match item.as_str() {
                    Some(name) => names.push(name),
                    None => errors.push("Field 'layers' must contain only strings".to_string()),
                }
            }
            names
        }
        Some(_) => {
            errors.push("Field 'layers' must be an array".to_string());
            Vec::new()
        }
    };

    let macros = named_object_field(obj, "macros", &mut errors);
    let conditions = named_object_field(obj, "conditions", &mut errors);

    // Macro bodies must be arrays of string steps.
    if let Some(Value::Object(defs)) = obj.get("macros") {
        for (name, body) in defs {
            let ok = body
                .as_array()
                .is_some_and(|steps| steps.iter().all(Value::is_string));
            if !ok {
                errors.push(format!("Macro '{name}' must be an array of string steps"));
            }
        }
    }

    match obj.get("keys") {
        None => errors.push("Missing required field: keys".to_string()),
        Some(Value::Object(keys)) => {
            for (key_name, key_value) in keys {
                let Some(key_obj) = key_value.as_object() else {
                    errors.push(format!("Key '{key_name}' must be an object"));
                    continue;
                };
                match key_obj.get("tap") {
                    None => errors.push(format!("Key '{key_name}' missing required field: tap")),
                    Some(action) => check_action(key_name, "tap", action, &layers, &macros, &mut errors),
                }
                // hold and when are optional, so an explicit null is fine
                if let Some(action) = key_obj.get("hold").filter(|v| !v.is_null()) {
                    check_action(key_name, "hold", action, &layers, &macros, &mut errors);
                }
                if let Some(when) = key_obj.get("when").filter(|v| !v.is_null()) {
                    match when.as_str() {
                        Some(name) if !conditions.contains(&name) => {
                            errors.push(format!("Key '{key_name}' references undefined condition '{name}'"));
                        }
                        Some(_) => {}
                        None => errors.push(format!("Key '{key_name}' field 'when' must be a string")),
                    }
                }
                if let Some(Value::Array(names)) = key_obj.get("macros") {
                    for name in names.iter().filter_map(Value::as_str) {
                        if !macros.contains(&name) {
                            errors.push(format!("Key '{key_name}' references undefined macro '{name}'"));
                        }
                    }
                }
            }
        }
        Some(_) => errors.push("Field 'keys' must be an object".to_string()),
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join("; "))
    }
}

fn named_object_field<'a>(
    obj: &'a serde_json::Map<String, Value>,
    field: &str,
    errors: &mut Vec<String>,
) -> Vec<&'a str> {
    match obj.get(field) {
        None => Vec::new(),
        Some(Value::Object(map)) => map.keys().map(String::as_str).collect(),
        Some(_) => {
            errors.push(format!("Field '{field}' must be an object"));
            Vec::new()
        }
    }
}

fn check_action(
    key_name: &str,
    slot: &str,
    action: &Value,
    layers: &[&str],
    macros: &[&str],
    errors: &mut Vec<String>,
) {
    match action {
        Value::String(_) => {}
        Value::Object(fields) => {
            let layer = fields.get("layer").and_then(Value::as_str);
            let macro_name = fields.get("macro_name").and_then(Value::as_str);
            match (layer, macro_name) {
                (Some(layer), None) => {
                    if !layers.contains(&layer) {
                        errors.push(format!(
                            "Key '{key_name}' {slot} references undeclared layer '{layer}'"
                        ));
                    }
                }
                (None, Some(name)) => {
                    if !macros.contains(&name) {
                        errors.push(format!(
                            "Key '{key_name}' {slot} references undefined macro '{name}'"
                        ));
                    }
                }
                (Some(_), Some(_)) => errors.push(format!(
                    "Key '{key_name}' {slot} sets both layer and macro_name"
                )),
                (None, None) => errors.push(format!(
                    "Key '{key_name}' {slot} must set layer or macro_name"
                )),
            }
        }
        _ => errors.push(format!("Key '{key_name}' {slot} must be a string or object")),
    }
}
