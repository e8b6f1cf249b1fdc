pub mod src;

pub use src::api::*;
pub use src::reader::*;
