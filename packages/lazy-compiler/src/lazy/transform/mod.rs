pub mod src;

#[cfg(test)]
mod test;

pub use src::class_export::*;
pub use src::comments::*;
pub use src::constructor::*;
pub use src::imports::*;
pub use src::members::*;
pub use src::snippet::*;
pub use src::state::*;
pub use src::styles::*;
pub use src::transform::*;

pub use crate::lazy::diagnostics::TransformError;
