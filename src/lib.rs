// src/lib.rs
//
// keypath_core - Rust core for the Keypath keyboard remapper.
// The Swift app links the staticlib/cdylib and talks to this crate
// exclusively through the functions in src/ffi.

pub mod export;
pub mod ffi;
pub mod keys;
pub mod models;
pub mod schema;
pub mod validation;

pub use export::export_kanata;
pub use models::{Action, ComplexAction, Ir, KeyMapping};
pub use schema::{generate_schema, validate_ir_value};
pub use validation::{parse_ir, to_pretty_json};

pub type Result<T> = anyhow::Result<T>;

#[derive(Debug, thiserror::Error)]
pub enum KeypathError {
    #[error("Invalid IR format: {0}")]
    InvalidIr(String),

    #[error("Schema validation failed: {0}")]
    SchemaValidation(String),

    #[error("Export failed: {0}")]
    ExportFailed(String),

    #[error("Unknown key name: {0}")]
    UnknownKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
