//! Literal value model for placeholder binding
//! This crate provides the value kinds shared by the builder and the execution layer

pub mod serialize;
pub mod types;

pub use serialize::bound_value_from_json;
pub use types::BoundValue;
