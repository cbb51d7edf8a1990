pub mod animation;
pub mod config;
pub mod element;
pub mod frame;
pub mod graphics;
pub mod keybind;
pub mod wheel;

// Re-exports for convenience
pub use animation::MsTime;
pub use config::{ConfigError, ConfigOption, ConfigStore};
pub use element::{DrawOrderKey, ElementDefinition, WheelElement};
pub use frame::{draw_wheel, sort_for_draw, usable_elements, visible_elements, FrameReport};
pub use graphics::{
    ElementShaderState, GraphicsBinding, SpriteDimensions, SpriteShaderState, TextureHandle,
};
pub use keybind::{KeyCombo, Keybind, KeybindError, Modifiers};
pub use radial_types::{ConditionalProperties, ConditionalState, Rgba};
pub use wheel::{ConditionalStateProvider, WheelContext, WheelSettings};
