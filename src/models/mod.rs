// src/models/mod.rs
//
// Models module - data types for Keypath
//
// Structure:
//   ir.rs - the IR document (Ir, KeyMapping, Action) exchanged with the
//           Swift host as JSON and consumed by validation/export

pub mod ir;

// Re-exports for convenience
pub use ir::{Action, ComplexAction, Ir, KeyMapping};
