//! Lazy component compilation
//!
//! Rewrites `@Component` decorated classes into plain classes that register
//! themselves with the lazy-loading runtime.

pub mod annotations;
pub mod diagnostics;
pub mod logging;
pub mod metadata;
pub mod transform;
