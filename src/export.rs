// src/export.rs
//
// Kanata .kbd emitter. One defsrc line, one base deflayer, defaliases for
// anything that is not a bare key token, and a transparent deflayer per
// declared layer so the emitted file loads as-is.

use crate::keys;
use crate::models::{Action, ComplexAction, Ir};
use crate::{KeypathError, Result};

const TAP_TIMEOUT_MS: u32 = 200;
const HOLD_TIMEOUT_MS: u32 = 200;

/// Where an action sits in a mapping. Layer actions compile differently per
/// slot: tap switches, hold is momentary.
#[derive(Clone, Copy)]
enum Slot {
    Tap,
    Hold,
}

pub fn export_kanata(ir: &Ir) -> Result<String> {
    if ir.keys.is_empty() {
        return Err(KeypathError::ExportFailed("no key mappings to export".into()).into());
    }

    let mut src_tokens = Vec::new();
    let mut cells = Vec::new();
    let mut aliases: Vec<(String, String, Option<String>)> = Vec::new();

    for (key, mapping) in &ir.keys {
        let src = keys::normalize(key);
        if !keys::is_key_token(&src) {
            return Err(KeypathError::UnknownKey(key.clone()).into());
        }
        if src_tokens.contains(&src) {
            return Err(KeypathError::ExportFailed(format!(
                "key '{key}' maps to the same physical key as an earlier entry ('{src}')"
            ))
            .into());
        }

        if !mapping.mods.is_empty() {
            tracing::warn!(key = %key, "modifier constraints are not representable in kanata output, skipping");
        }
        if let Some(condition) = &mapping.when {
            tracing::warn!(key = %key, condition = %condition, "conditions are not representable in kanata output, skipping");
        }

        let tap = action_expr(ir, &mapping.tap, Slot::Tap)?;
        let cell = match &mapping.hold {
            Some(hold_action) => {
                let hold = action_expr(ir, hold_action, Slot::Hold)?;
                let slug = keys::alias_slug(&src);
                aliases.push((
                    slug.clone(),
                    format!("(tap-hold {TAP_TIMEOUT_MS} {HOLD_TIMEOUT_MS} {} {})", tap.expr, hold.expr),
                    None,
                ));
                format!("@{slug}")
            }
            None if tap.is_token => tap.expr,
            None => {
                let slug = keys::alias_slug(&src);
                aliases.push((slug.clone(), tap.expr, tap.note));
                format!("@{slug}")
            }
        };

        src_tokens.push(src);
        cells.push(cell);
    }

    let mut out = String::new();
    out.push_str(&format!(
        ";; keypath configuration - generated by keypath_core v{}\n\n",
        env!("CARGO_PKG_VERSION")
    ));
    out.push_str(&format!("(defsrc {})\n", src_tokens.join(" ")));

    if !aliases.is_empty() {
        out.push_str("\n(defalias\n");
        for (slug, expr, note) in &aliases {
            if let Some(note) = note {
                out.push_str(&format!("  ;; types \"{note}\"\n"));
            }
            out.push_str(&format!("  {slug} {expr}\n"));
        }
        out.push_str(")\n");
    }

    out.push_str(&format!("\n(deflayer base {})\n", cells.join(" ")));

    let transparent = vec!["_"; src_tokens.len()].join(" ");
    for layer in &ir.layers {
        if layer == "base" {
            continue;
        }
        out.push_str(&format!("\n(deflayer {layer} {transparent})\n"));
    }

    Ok(out)
}

struct CompiledAction {
    expr: String,
    /// Bare key tokens can sit directly in a deflayer cell.
    is_token: bool,
    /// Literal text reproduced as a comment next to macro aliases.
    note: Option<String>,
}

fn action_expr(ir: &Ir, action: &Action, slot: Slot) -> Result<CompiledAction> {
    match action {
        Action::Key(output) => {
            let token = keys::normalize(output);
            if keys::is_key_token(&token) {
                return Ok(CompiledAction {
                    expr: token,
                    is_token: true,
                    note: None,
                });
            }
            let tokens = keys::macro_tokens(output).map_err(KeypathError::ExportFailed)?;
            Ok(CompiledAction {
                expr: format!("(macro {})", tokens.join(" ")),
                is_token: false,
                note: Some(output.clone()),
            })
        }
        Action::Complex(ComplexAction { layer: Some(layer), macro_name: None }) => {
            let expr = match slot {
                Slot::Tap => format!("(layer-switch {layer})"),
                Slot::Hold => format!("(layer-while-held {layer})"),
            };
            Ok(CompiledAction { expr, is_token: false, note: None })
        }
        Action::Complex(ComplexAction { layer: None, macro_name: Some(name) }) => {
            let steps = ir
                .macros
                .get(name)
                .and_then(|body| body.as_array())
                .ok_or_else(|| KeypathError::ExportFailed(format!("macro '{name}' is not defined as a step list")))?;

            let mut tokens = Vec::new();
            for step in steps {
                let step = step
                    .as_str()
                    .ok_or_else(|| KeypathError::ExportFailed(format!("macro '{name}' has a non-string step")))?;
                let normalized = keys::normalize(step);
                if keys::is_key_token(&normalized) {
                    tokens.push(normalized);
                } else {
                    tokens.extend(keys::macro_tokens(step).map_err(KeypathError::ExportFailed)?);
                }
            }
            Ok(CompiledAction {
                expr: format!("(macro {})", tokens.join(" ")),
                is_token: false,
                note: None,
            })
        }
        Action::Complex(_) => Err(KeypathError::ExportFailed(
            "complex action must set exactly one of layer or macro_name".into(),
        )
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::KeyMapping;

    #[test]
    fn exports_simple_remap() {
        let ir = Ir::with_mapping("a", "f");
        let out = export_kanata(&ir).unwrap();

        assert!(out.contains("(defsrc a)"));
        assert!(out.contains("(deflayer base f)"));
    }

    #[test]
    fn empty_ir_is_an_error() {
        let err = export_kanata(&Ir::new()).unwrap_err();
        assert!(err.to_string().contains("no key mappings"));
    }

    #[test]
    fn text_sequence_becomes_macro_alias() {
        let ir = Ir::with_mapping("a", "hello world");
        let out = export_kanata(&ir).unwrap();

        assert!(out.contains("(defsrc a)"));
        assert!(out.contains("(deflayer base @a)"));
        assert!(out.contains("a (macro h e l l o spc w o r l d)"));
        assert!(out.contains(";; types \"hello world\""));
    }

    #[test]
    fn hold_action_becomes_tap_hold() {
        let mut ir = Ir::new();
        ir.keys.insert(
            "caps".into(),
            KeyMapping {
                tap: Action::Key("esc".into()),
                hold: Some(Action::Complex(ComplexAction {
                    layer: Some("nav".into()),
                    macro_name: None,
                })),
                mods: Vec::new(),
                when: None,
                macros: Vec::new(),
            },
        );
        ir.layers.push("nav".into());

        let out = export_kanata(&ir).unwrap();
        assert!(out.contains("caps (tap-hold 200 200 esc (layer-while-held nav))"));
        assert!(out.contains("(deflayer base @caps)"));
        assert!(out.contains("(deflayer nav _)"));
    }

    #[test]
    fn named_macro_is_expanded() {
        let mut ir = Ir::with_mapping("a", "b");
        ir.keys.insert(
            "g".into(),
            KeyMapping {
                tap: Action::Complex(ComplexAction {
                    layer: None,
                    macro_name: Some("greet".into()),
                }),
                hold: None,
                mods: Vec::new(),
                when: None,
                macros: Vec::new(),
            },
        );
        ir.macros
            .insert("greet".into(), serde_json::json!(["hi", "ret"]));

        let out = export_kanata(&ir).unwrap();
        assert!(out.contains("g (macro h i ret)"));
    }

    #[test]
    fn mac_key_names_are_normalized_in_defsrc() {
        let ir = Ir::with_mapping("space", "escape");
        let out = export_kanata(&ir).unwrap();

        assert!(out.contains("(defsrc spc)"));
        assert!(out.contains("(deflayer base esc)"));
    }

    #[test]
    fn unknown_physical_key_is_an_error() {
        let ir = Ir::with_mapping("hyperkey", "a");
        let err = export_kanata(&ir).unwrap_err();
        assert!(err.to_string().contains("hyperkey"));
    }

    #[test]
    fn colliding_physical_keys_are_an_error() {
        let mut ir = Ir::new();
        ir.add_key_mapping("space", "a");
        ir.add_key_mapping("spc", "b");

        let err = export_kanata(&ir).unwrap_err();
        assert!(err.to_string().contains("same physical key as an earlier entry"));
    }

    #[test]
    fn defsrc_order_is_deterministic() {
        let mut ir = Ir::new();
        ir.add_key_mapping("s", "2");
        ir.add_key_mapping("a", "1");
        ir.add_key_mapping("d", "3");

        let out = export_kanata(&ir).unwrap();
        assert!(out.contains("(defsrc a d s)"));
        assert!(out.contains("(deflayer base 1 3 2)"));
    }
}
