//! Structural access to decorator arguments.
//!
//! The extractor never evaluates code: it pattern-matches literal shapes through
//! the [`AstHost`] abstraction.

pub mod src {
    pub mod host;
    pub mod oxc_host;
}

pub use src::host::*;
pub use src::oxc_host::*;
