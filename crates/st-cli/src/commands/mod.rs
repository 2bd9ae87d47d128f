//! Command implementations

pub mod lint;
pub mod render;
