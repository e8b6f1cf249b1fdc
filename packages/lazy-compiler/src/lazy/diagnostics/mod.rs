pub mod src {
    pub mod error;
    pub mod error_code;
}

pub use src::error::*;
pub use src::error_code::*;
