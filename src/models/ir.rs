// src/models/ir.rs
//
// The IR document for a keyboard configuration. Serialized as JSON across
// the FFI boundary and persisted as .json files by the host app.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A complete keyboard configuration.
///
/// The minimal wire form is `{"keys":{"a":{"tap":"b"}}}`; everything else
/// defaults to empty and is omitted when serialized.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Ir {
    /// Free-form metadata (author, app version, timestamps).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<BTreeMap<String, serde_json::Value>>,

    /// Physical key name -> mapping.
    pub keys: BTreeMap<String, KeyMapping>,

    /// Named macro definitions. Each value is an array of string steps.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub macros: BTreeMap<String, serde_json::Value>,

    /// Named condition definitions.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub conditions: BTreeMap<String, serde_json::Value>,

    /// Declared layer names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub layers: Vec<String>,
}

/// Behavior of one physical key.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeyMapping {
    /// Action when the key is tapped.
    pub tap: Action,

    /// Action when the key is held.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hold: Option<Action>,

    /// Modifier keys that must be active for this mapping.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mods: Vec<String>,

    /// Name of a condition gating this mapping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,

    /// Named macros attached to this key.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub macros: Vec<String>,
}

/// What a tap or hold does.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Action {
    /// Plain key output or literal text sequence.
    Key(String),
    /// Layer switch or macro invocation.
    Complex(ComplexAction),
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ComplexAction {
    /// Switch to this layer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<String>,

    /// Run this named macro.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macro_name: Option<String>,
}

impl Ir {
    pub fn new() -> Self {
        Self {
            meta: None,
            keys: BTreeMap::new(),
            macros: BTreeMap::new(),
            conditions: BTreeMap::new(),
            layers: Vec::new(),
        }
    }

    /// One-key configuration: `input` tapped produces `output`.
    /// This is what the recorder UI builds after a capture.
    pub fn with_mapping(input: &str, output: &str) -> Self {
        let mut ir = Self::new();
        ir.add_key_mapping(input, output);
        ir
    }

    pub fn add_key_mapping(&mut self, physical_key: &str, output: &str) {
        self.keys.insert(
            physical_key.to_string(),
            KeyMapping {
                tap: Action::Key(output.to_string()),
                hold: None,
                mods: Vec::new(),
                when: None,
                macros: Vec::new(),
            },
        );
    }
}

impl Default for Ir {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_empty_ir() {
        let ir = Ir::new();
        assert!(ir.keys.is_empty());
        assert!(ir.macros.is_empty());
        assert!(ir.conditions.is_empty());
        assert!(ir.layers.is_empty());
    }

    #[test]
    fn with_mapping_sets_tap() {
        let ir = Ir::with_mapping("a", "b");
        assert_eq!(ir.keys.len(), 1);
        match &ir.keys.get("a").unwrap().tap {
            Action::Key(k) => assert_eq!(k, "b"),
            _ => panic!("expected plain key action"),
        }
    }

    #[test]
    fn minimal_wire_form_round_trips() {
        let json = r#"{"keys":{"a":{"tap":"b"}}}"#;
        let ir: Ir = serde_json::from_str(json).unwrap();
        assert_eq!(ir.keys.len(), 1);

        let out = serde_json::to_string(&ir).unwrap();
        assert!(out.contains("\"a\""));
        assert!(out.contains("\"b\""));
        // empty collections stay off the wire
        assert!(!out.contains("macros"));
        assert!(!out.contains("layers"));
    }

    #[test]
    fn complex_action_deserializes_untagged() {
        let json = r#"{"keys":{"caps":{"tap":{"layer":"nav"}}},"layers":["nav"]}"#;
        let ir: Ir = serde_json::from_str(json).unwrap();
        match &ir.keys.get("caps").unwrap().tap {
            Action::Complex(c) => assert_eq!(c.layer.as_deref(), Some("nav")),
            _ => panic!("expected complex action"),
        }
    }
}
