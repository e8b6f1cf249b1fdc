#![deny(clippy::all)]

/**
 * Lazy Component Compiler - Rust Implementation
 *
 * Rewrites `@Component` decorated classes into lazy-loadable runtime classes.
 */
pub mod compile;
pub mod config;
pub mod lazy;
#[cfg(feature = "napi-bindings")]
pub mod binding;

pub use config::options::{ComponentExport, ModuleConvention, StyleMode, TransformOptions};
pub use lazy::transform::{
    lazy_component_transform, transform_module, TransformError, TransformOutput, TransformReport,
};

/// CLI version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
