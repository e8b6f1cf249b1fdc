// Transform module - the lazy component rewrite
//
// Extraction happens in `metadata`; this module turns the extracted model into
// constructor code, accessors, hoisted style imports and the runtime import.

pub mod class_export;
pub mod comments;
pub mod constructor;
pub mod imports;
pub mod members;
pub mod snippet;
pub mod state;
pub mod styles;
pub mod transform;
