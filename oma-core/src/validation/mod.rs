//! Consistency checks on assembled geometry.

mod validate;

pub use validate::*;
