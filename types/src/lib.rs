//! Shared types for the radial wheel: host conditions, eligibility rules, colors.

pub mod color;
pub mod conditions;

pub use color::Rgba;
pub use conditions::{is_usable, is_visible, ConditionalProperties, ConditionalState};
