//! tween-api-core: plain snapshot values exchanged between evaluation contexts.

pub mod coercion;
pub mod json;
pub mod value;

pub use value::{Value, ValueKind, ValueMap};
