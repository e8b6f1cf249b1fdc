// Metadata module - component and member metadata read from decorators.

pub mod api;
pub mod reader;
